//! Shared data entities flowing through the collection-and-analysis pipeline.
//!
//! Everything here serializes as `camelCase` because these types form the
//! wire shape of the analyze and report endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Captions longer than this are cut at creation time and never grow back.
pub const CAPTION_MAX_CHARS: usize = 500;

/// Rendered media kind of a collected post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Reel,
    Carousel,
    Image,
    Unknown,
}

impl MediaType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Reel => "reel",
            MediaType::Carousel => "carousel",
            MediaType::Image => "image",
            MediaType::Unknown => "unknown",
        }
    }
}

/// One collected content item.
///
/// Created exclusively by the collector; analyzers only ever read it.
/// `artifact_id` is unique within a single collection batch and
/// `caption_text` is already truncated to [`CAPTION_MAX_CHARS`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub artifact_id: String,
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
    pub account_handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    /// May be empty when the post had no caption or extraction found none.
    #[serde(default)]
    pub caption_text: String,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
}

/// Truncate `text` to at most `max` characters, respecting char boundaries.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Why a resolved target could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InaccessibleReason {
    NotFound,
    ErrorAccessing,
}

impl std::fmt::Display for InaccessibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InaccessibleReason::NotFound => write!(f, "not_found"),
            InaccessibleReason::ErrorAccessing => write!(f, "error_accessing"),
        }
    }
}

/// Outcome of resolving a raw handle-like string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResolution {
    pub handle: String,
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<InaccessibleReason>,
}

/// What one collection call produced.
///
/// `like_comment_visible` is true iff at least one artifact was collected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedBatch {
    pub artifacts: Vec<Artifact>,
    pub like_comment_visible: bool,
}

/// Heuristic profile of one account's content patterns.
///
/// `observed` and `inferred` are ordered statement sequences; the order is
/// the computation order and is part of the contract, so downstream matching
/// on statements like `"Tone: ..."` stays stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDna {
    pub observed: Vec<String>,
    pub inferred: Vec<String>,
    pub artifact_refs: Vec<String>,
}

/// Aggregated engagement and theme profile for one comparable account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorInsight {
    pub handle: String,
    pub top_formats: Vec<String>,
    /// Ranked by frequency descending, at most five entries.
    pub common_themes: Vec<String>,
    /// Rounded mean like-count across the account's collected artifacts.
    pub engagement_avg: u64,
}

/// One synthesized content draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub format: String,
    pub reasoning: String,
}

/// The full pipeline result returned by the analyze endpoint and consumed
/// back by the report endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport {
    pub target_handle: String,
    pub brand_dna: BrandDna,
    pub competitor_insights: Vec<CompetitorInsight>,
    pub generated_posts: Vec<GeneratedPost>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub artifacts_collected: usize,
    pub competitors_analyzed: usize,
    pub posts_generated: usize,
    pub like_comment_visible: bool,
    /// Re-submitted report payloads may omit this; it defaults to "now".
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}
