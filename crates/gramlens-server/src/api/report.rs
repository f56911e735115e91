use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use gramlens_core::AnalyzeReport;
use gramlens_report::{render_report, report_filename};

use super::ApiError;
use crate::middleware::RequestId;

/// Render a previously produced analysis report as a downloadable document.
pub(super) async fn render_document(
    Extension(req_id): Extension<RequestId>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let handle_present = payload
        .get("targetHandle")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .is_some_and(|h| !h.is_empty());
    let has_object = |key: &str| payload.get(key).is_some_and(|v| !v.is_null());

    if !handle_present || !has_object("brandDna") || !has_object("competitorInsights") {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "invalid report payload; targetHandle, brandDna and competitorInsights are required",
        ));
    }

    let report: AnalyzeReport = serde_json::from_value(payload).map_err(|e| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("invalid report payload: {e}"),
        )
    })?;

    let html = render_report(&report);
    let filename = report_filename(&report.target_handle, report.metadata.timestamp);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/html; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        html,
    )
        .into_response())
}
