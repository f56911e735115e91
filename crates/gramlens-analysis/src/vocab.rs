//! Pure scoring of fixed vocabularies against a text corpus.

/// Rank `vocabulary` terms by their non-overlapping occurrence count in
/// `corpus` (case-insensitive substring matching). Terms that never occur
/// are dropped; equal counts keep the vocabulary's declared order.
pub(crate) fn rank_by_occurrences<'a>(
    corpus: &str,
    vocabulary: &[&'a str],
) -> Vec<(&'a str, usize)> {
    let lowered = corpus.to_lowercase();
    let mut ranked: Vec<(&str, usize)> = vocabulary
        .iter()
        .map(|&term| (term, lowered.matches(term).count()))
        .filter(|&(_, count)| count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Score keyword groups by how many of their distinct keywords occur in
/// `corpus` at all. Every group is kept (zero scores included) so callers
/// can always take a fixed-size head; equal scores keep declaration order.
pub(crate) fn rank_groups_by_distinct_hits<'a>(
    corpus: &str,
    groups: &[(&'a str, &[&str])],
) -> Vec<(&'a str, usize)> {
    let lowered = corpus.to_lowercase();
    let mut ranked: Vec<(&str, usize)> = groups
        .iter()
        .map(|&(name, keywords)| {
            let hits = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
            (name, hits)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Mean of `sum` over `count`, rounded to the nearest integer. Zero for an
/// empty population.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn rounded_mean(sum: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    ((sum as f64) / (count as f64)).round() as u64
}
