use axum::{extract::State, Extension, Json};
use gramlens_core::AnalyzeReport;
use gramlens_pipeline::{
    AnalyzeOptions, PipelineError, DEFAULT_COMPETITOR_COUNT, DEFAULT_GENERATE_POST_COUNT,
    DEFAULT_MAX_RECENT_POSTS, DEFAULT_RECENCY_WINDOW_DAYS,
};
use serde::Deserialize;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    target_handle: Option<String>,
    #[serde(default)]
    recency_window_days: Option<u32>,
    #[serde(default)]
    max_recent_posts: Option<usize>,
    #[serde(default)]
    competitor_count: Option<usize>,
    #[serde(default)]
    generate_post_count: Option<usize>,
}

/// Run the full collection-and-analysis pipeline for one target handle.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeReport>>, ApiError> {
    let Some(handle) = request
        .target_handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
    else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "targetHandle is required",
        ));
    };

    let options = AnalyzeOptions {
        target_handle: handle.to_string(),
        recency_window_days: request
            .recency_window_days
            .unwrap_or(DEFAULT_RECENCY_WINDOW_DAYS),
        max_recent_posts: request.max_recent_posts.unwrap_or(DEFAULT_MAX_RECENT_POSTS),
        competitor_count: request.competitor_count.unwrap_or(DEFAULT_COMPETITOR_COUNT),
        generate_post_count: request
            .generate_post_count
            .unwrap_or(DEFAULT_GENERATE_POST_COUNT),
    };

    match state.pipeline.run(&options).await {
        Ok(report) => Ok(Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(PipelineError::TargetInaccessible { reason }) => Err(ApiError::new(
            req_id.0,
            "target_inaccessible",
            format!("target handle not accessible ({reason})"),
        )),
        Err(PipelineError::NoArtifactsFound) => Err(ApiError::new(
            req_id.0,
            "no_artifacts_found",
            "no artifacts found for target handle",
        )),
        Err(e) => {
            tracing::error!(error = %e, "analysis pipeline failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                format!("analysis failed: {e}"),
            ))
        }
    }
}
