//! End-to-end analysis orchestration.
//!
//! One logical flow per request, no shared mutable state: resolver →
//! collector (target) → brand analyzer → competitor discovery → collector
//! (per competitor) → competitor analyzer → post generator. Collection
//! failures degrade to partial results; only resolution failures and empty
//! target batches abort a run.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use gramlens_analysis::{analyze_brand, analyze_competitors, brand_keywords, AnalysisError};
use gramlens_browser::BrowserDriver;
use gramlens_collector::{
    resolve_target, CollectParams, Collector, CollectorError, CollectorTuning, CompetitorSource,
    DiscoveryQuery,
};
use gramlens_core::{AnalyzeReport, Artifact, IdGenerator, InaccessibleReason, ReportMetadata};
use gramlens_generator::{generate_posts, GenerateParams, GeneratorError};
use thiserror::Error;

pub const DEFAULT_RECENCY_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_MAX_RECENT_POSTS: usize = 12;
pub const DEFAULT_COMPETITOR_COUNT: usize = 5;
pub const DEFAULT_GENERATE_POST_COUNT: usize = 3;

/// Competitor accounts are sampled shallower than the target.
const COMPETITOR_POST_CAP: usize = 6;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("target handle not accessible ({reason})")]
    TargetInaccessible { reason: InaccessibleReason },

    #[error("no artifacts found for target handle")]
    NoArtifactsFound,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Generation(#[from] GeneratorError),

    #[error(transparent)]
    Discovery(#[from] CollectorError),
}

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub target_handle: String,
    pub recency_window_days: u32,
    pub max_recent_posts: usize,
    pub competitor_count: usize,
    pub generate_post_count: usize,
}

impl AnalyzeOptions {
    /// Options for `target_handle` with the standard defaults.
    pub fn new(target_handle: impl Into<String>) -> Self {
        Self {
            target_handle: target_handle.into(),
            recency_window_days: DEFAULT_RECENCY_WINDOW_DAYS,
            max_recent_posts: DEFAULT_MAX_RECENT_POSTS,
            competitor_count: DEFAULT_COMPETITOR_COUNT,
            generate_post_count: DEFAULT_GENERATE_POST_COUNT,
        }
    }
}

/// Assembled analysis pipeline. Cheap to share behind an `Arc`; holds no
/// per-request state.
pub struct Pipeline {
    driver: Arc<dyn BrowserDriver>,
    collector: Collector,
    competitors: Arc<dyn CompetitorSource>,
    navigation_timeout: Duration,
}

impl Pipeline {
    pub fn new(
        driver: Arc<dyn BrowserDriver>,
        ids: Arc<dyn IdGenerator>,
        competitors: Arc<dyn CompetitorSource>,
        tuning: CollectorTuning,
    ) -> Self {
        let navigation_timeout = tuning.navigation_timeout;
        let collector = Collector::new(Arc::clone(&driver), ids).with_tuning(tuning);
        Self {
            driver,
            collector,
            competitors,
            navigation_timeout,
        }
    }

    /// Run the full analysis for one target.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::TargetInaccessible`] when the resolver reports the
    ///   profile unreachable.
    /// - [`PipelineError::NoArtifactsFound`] when the target collection
    ///   comes back empty.
    /// - Analysis/generation precondition failures and discovery errors are
    ///   passed through.
    pub async fn run(&self, options: &AnalyzeOptions) -> Result<AnalyzeReport, PipelineError> {
        let resolution = resolve_target(
            self.driver.as_ref(),
            &options.target_handle,
            self.navigation_timeout,
        )
        .await;
        if !resolution.accessible {
            return Err(PipelineError::TargetInaccessible {
                reason: resolution
                    .reason
                    .unwrap_or(InaccessibleReason::ErrorAccessing),
            });
        }
        let handle = resolution.handle;
        tracing::info!(handle = %handle, "target resolved; collecting artifacts");

        let batch = self
            .collector
            .collect_recent_artifacts(&CollectParams {
                handle: handle.clone(),
                recency_window_days: options.recency_window_days,
                max_recent_posts: options.max_recent_posts,
            })
            .await;
        if batch.artifacts.is_empty() {
            return Err(PipelineError::NoArtifactsFound);
        }

        let brand_dna = analyze_brand(&handle, &batch.artifacts)?;

        let competitor_handles = self
            .competitors
            .discover(&DiscoveryQuery {
                target_handle: handle.clone(),
                brand_keywords: brand_keywords(&brand_dna),
                desired_count: options.competitor_count,
            })
            .await?;
        tracing::info!(
            handle = %handle,
            competitors = competitor_handles.len(),
            "profiling competitor field"
        );

        let mut competitor_artifacts: Vec<(String, Vec<Artifact>)> =
            Vec::with_capacity(competitor_handles.len());
        for competitor in competitor_handles {
            let competitor_batch = self
                .collector
                .collect_recent_artifacts(&CollectParams {
                    handle: competitor.clone(),
                    recency_window_days: options.recency_window_days,
                    max_recent_posts: COMPETITOR_POST_CAP,
                })
                .await;
            competitor_artifacts.push((competitor, competitor_batch.artifacts));
        }

        let competitor_insights = analyze_competitors(&competitor_artifacts);
        let generated_posts = generate_posts(
            &GenerateParams {
                brand_dna: &brand_dna,
                competitor_insights: &competitor_insights,
                count: options.generate_post_count,
            },
            &mut rand::rng(),
        )?;

        Ok(AnalyzeReport {
            metadata: ReportMetadata {
                artifacts_collected: batch.artifacts.len(),
                competitors_analyzed: competitor_insights.len(),
                posts_generated: generated_posts.len(),
                like_comment_visible: batch.like_comment_visible,
                timestamp: Utc::now(),
            },
            target_handle: handle,
            brand_dna,
            competitor_insights,
            generated_posts,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
