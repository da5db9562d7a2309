//! Text report endpoints.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use domain::models::ParsedPeriodReport;
use domain::services::{parse_report, render_report};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// POST /api/v1/reports/parse
///
/// Parses a generated text report. Unrecognized lines are skipped, so any
/// UTF-8 text within the size limit yields a (possibly empty) list of
/// sections. The route's body limit is `limits.max_report_bytes`.
pub async fn parse_report_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<ParsedPeriodReport>>, ApiError> {
    let limit = state.config.limits.max_report_bytes;
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::Validation(format!("Report exceeds {} bytes", limit))
        } else {
            ApiError::Validation(rejection.body_text())
        }
    })?;
    let text = std::str::from_utf8(&body)
        .map_err(|_| ApiError::Validation("Report is not valid UTF-8".to_string()))?;

    let reports = parse_report(text);

    info!(
        bytes = body.len(),
        sections = reports.len(),
        courses = reports.iter().map(|r| r.course_count()).sum::<usize>(),
        "Report parsed"
    );

    Ok(Json(reports))
}

/// POST /api/v1/reports/render
///
/// Renders parsed sections back to report text.
pub async fn render_report_text(Json(reports): Json<Vec<ParsedPeriodReport>>) -> String {
    render_report(&reports)
}
