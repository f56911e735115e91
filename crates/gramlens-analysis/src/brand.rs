//! Brand profile derivation.
//!
//! All signals are deterministic keyword heuristics over the concatenated
//! caption corpus; identical artifact lists always produce identical
//! profiles.

use gramlens_core::{Artifact, BrandDna};
use regex::Regex;

use crate::vocab::{rank_groups_by_distinct_hits, rounded_mean};
use crate::AnalysisError;

/// Thematic keyword groups scored against the corpus. Declaration order
/// doubles as the ranking tie-break.
const PILLAR_GROUPS: &[(&str, &[&str])] = &[
    ("music", &["music", "track", "beat", "drop", "remix", "mix"]),
    ("event", &["event", "show", "live", "gig", "festival", "venue"]),
    ("lifestyle", &["vibe", "mood", "energy", "love", "passion"]),
    ("visual", &["visual", "art", "design", "creative", "style"]),
];

/// Pillar groups named in the inferred pillar statement.
const PILLAR_TOP_N: usize = 3;

/// Keywords handed to competitor discovery, derived from the inferred
/// statements.
const KEYWORD_LIMIT: usize = 5;
const KEYWORD_MIN_LEN: usize = 4;

/// Derive a brand profile for `handle` from its collected artifacts.
///
/// `observed` and `inferred` statement order is fixed; downstream stages
/// match on statement prefixes like `"Tone:"`.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyArtifactSet`] for an empty input — the mean
/// caption length is undefined there and callers are expected to have
/// handled the no-artifacts case already.
pub fn analyze_brand(handle: &str, artifacts: &[Artifact]) -> Result<BrandDna, AnalysisError> {
    if artifacts.is_empty() {
        return Err(AnalysisError::EmptyArtifactSet);
    }
    tracing::debug!(handle, artifacts = artifacts.len(), "deriving brand profile");

    let corpus = artifacts
        .iter()
        .map(|a| a.caption_text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let has_emojis = contains_emoji(&corpus);
    let has_caps_runs = Regex::new(r"[A-Z]{2,}")
        .expect("valid caps regex")
        .is_match(&corpus);
    let has_hashtags = Regex::new(r"#\w+")
        .expect("valid hashtag regex")
        .is_match(&corpus);
    let has_mentions = Regex::new(r"@\w+")
        .expect("valid mention regex")
        .is_match(&corpus);

    #[allow(clippy::cast_possible_truncation)]
    let caption_chars: u64 = artifacts
        .iter()
        .map(|a| a.caption_text.chars().count() as u64)
        .sum();
    let avg_caption_length = rounded_mean(caption_chars, artifacts.len());

    let observed = vec![
        format!("{} recent posts analyzed", artifacts.len()),
        format!("Uses emojis: {}", if has_emojis { "Yes" } else { "No" }),
        format!(
            "Hashtag strategy: {}",
            if has_hashtags { "Active" } else { "Minimal" }
        ),
        format!(
            "Mention strategy: {}",
            if has_mentions { "Active" } else { "Minimal" }
        ),
        format!("Average caption length: {avg_caption_length} characters"),
    ];

    let inferred = vec![
        format!(
            "Tone: {}",
            if has_caps_runs {
                "Energetic/Emphatic"
            } else {
                "Measured"
            }
        ),
        format!(
            "Audience engagement approach: {}",
            if has_mentions {
                "Community-focused"
            } else {
                "Broadcast-focused"
            }
        ),
        format!("Content pillar: {}", content_pillars(&corpus)),
    ];

    Ok(BrandDna {
        observed,
        inferred,
        artifact_refs: artifacts.iter().map(|a| a.artifact_id.clone()).collect(),
    })
}

/// Top pillar groups as a comma-separated list. All-zero scores still name
/// the first [`PILLAR_TOP_N`] groups in declaration order.
fn content_pillars(corpus: &str) -> String {
    rank_groups_by_distinct_hits(corpus, PILLAR_GROUPS)
        .into_iter()
        .take(PILLAR_TOP_N)
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lowercased keywords for competitor discovery, taken from the inferred
/// statements: split on non-word runs, short tokens dropped.
#[must_use]
pub fn brand_keywords(dna: &BrandDna) -> Vec<String> {
    let joined = dna.inferred.join(" ").to_lowercase();
    Regex::new(r"\W+")
        .expect("valid splitter regex")
        .split(&joined)
        .filter(|w| w.len() >= KEYWORD_MIN_LEN)
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}

/// Glyph-range check covering the common emoji blocks.
fn contains_emoji(text: &str) -> bool {
    Regex::new(r"[\x{1F300}-\x{1FAFF}\x{2190}-\x{21FF}\x{2600}-\x{27BF}\x{2B00}-\x{2BFF}\x{FE0F}]")
        .expect("valid emoji regex")
        .is_match(text)
}

#[cfg(test)]
#[path = "brand_test.rs"]
mod tests;
