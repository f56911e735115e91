//! Per-competitor engagement and theme aggregation.

use gramlens_core::{Artifact, CompetitorInsight};

use crate::vocab::{rank_by_occurrences, rounded_mean};

/// Theme vocabulary scored against each competitor's caption corpus, in
/// ranking tie-break order.
const THEME_VOCABULARY: &[&str] = &[
    "music",
    "dance",
    "energy",
    "vibe",
    "community",
    "night",
    "beat",
];

/// Themes reported per competitor.
const THEME_TOP_N: usize = 5;

// Format mix is currently a fixed pair; media-type frequencies are not
// sampled yet.
const TOP_FORMATS: [&str; 2] = ["carousel", "reel"];

/// Produce one insight per `(handle, artifacts)` entry, in input order.
///
/// A competitor with no artifacts reports a zero engagement average and no
/// themes rather than faulting the whole batch.
#[must_use]
pub fn analyze_competitors(artifacts_by_handle: &[(String, Vec<Artifact>)]) -> Vec<CompetitorInsight> {
    artifacts_by_handle
        .iter()
        .map(|(handle, artifacts)| analyze_one(handle, artifacts))
        .collect()
}

fn analyze_one(handle: &str, artifacts: &[Artifact]) -> CompetitorInsight {
    if artifacts.is_empty() {
        tracing::warn!(handle, "competitor collected no artifacts; reporting empty insight");
        return CompetitorInsight {
            handle: handle.to_string(),
            top_formats: TOP_FORMATS.iter().map(|f| (*f).to_string()).collect(),
            common_themes: Vec::new(),
            engagement_avg: 0,
        };
    }

    let like_sum: u64 = artifacts.iter().map(|a| a.like_count.unwrap_or(0)).sum();
    let engagement_avg = rounded_mean(like_sum, artifacts.len());

    let corpus = artifacts
        .iter()
        .map(|a| a.caption_text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let common_themes = rank_by_occurrences(&corpus, THEME_VOCABULARY)
        .into_iter()
        .take(THEME_TOP_N)
        .map(|(theme, _)| theme.to_string())
        .collect();

    CompetitorInsight {
        handle: handle.to_string(),
        top_formats: TOP_FORMATS.iter().map(|f| (*f).to_string()).collect(),
        common_themes,
        engagement_avg,
    }
}
