//! Competitor discovery.
//!
//! Downstream stages depend only on the [`CompetitorSource`] trait, so the
//! ranking strategy is swappable: a curated roster in declaration order, the
//! same roster ranked by keyword overlap, or an external lookup service
//! implementing the trait elsewhere.

use async_trait::async_trait;
use gramlens_core::roster::{CompetitorEntry, CompetitorRoster};

use crate::error::CollectorError;

#[derive(Debug, Clone)]
pub struct DiscoveryQuery {
    pub target_handle: String,
    /// Lowercased keywords derived from the target's brand profile.
    pub brand_keywords: Vec<String>,
    pub desired_count: usize,
}

/// Supplies a ranked list of comparable account handles.
#[async_trait]
pub trait CompetitorSource: Send + Sync {
    /// Up to `desired_count` handles, best candidates first. The target
    /// handle itself never appears in the result.
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<String>, CollectorError>;
}

/// Roster-order fallback: the curated pool, truncated.
pub struct StaticRoster {
    entries: Vec<CompetitorEntry>,
}

impl StaticRoster {
    #[must_use]
    pub fn new(roster: CompetitorRoster) -> Self {
        Self {
            entries: roster.competitors,
        }
    }
}

#[async_trait]
impl CompetitorSource for StaticRoster {
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<String>, CollectorError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| !e.handle.eq_ignore_ascii_case(&query.target_handle))
            .take(query.desired_count)
            .map(|e| e.handle.clone())
            .collect())
    }
}

/// Ranks the curated pool by overlap between roster tags and the brand
/// keywords; roster order breaks ties.
pub struct KeywordRanked {
    entries: Vec<CompetitorEntry>,
}

impl KeywordRanked {
    #[must_use]
    pub fn new(roster: CompetitorRoster) -> Self {
        Self {
            entries: roster.competitors,
        }
    }

    fn overlap(entry: &CompetitorEntry, keywords: &[String]) -> usize {
        entry
            .tags
            .iter()
            .filter(|tag| keywords.iter().any(|kw| kw.eq_ignore_ascii_case(tag)))
            .count()
    }
}

#[async_trait]
impl CompetitorSource for KeywordRanked {
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<String>, CollectorError> {
        let mut ranked: Vec<(&CompetitorEntry, usize)> = self
            .entries
            .iter()
            .filter(|e| !e.handle.eq_ignore_ascii_case(&query.target_handle))
            .map(|e| (e, Self::overlap(e, &query.brand_keywords)))
            .collect();
        // stable sort keeps roster order between equal scores
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(ranked
            .into_iter()
            .take(query.desired_count)
            .map(|(e, _)| e.handle.clone())
            .collect())
    }
}
