//! Axum route handlers for the job form and its API.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::form::{FormSession, FormStatus};
use crate::jobs::page::render_new_job_page;
use crate::models::job::{ExtractedFields, JobRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub jd_text: String,
    /// Current form values; fields the extractor misses are kept as-is.
    #[serde(default)]
    pub form: JobRecord,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub ok: bool,
    pub fields: ExtractedFields,
    pub form: JobRecord,
    pub status: Option<FormStatus>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub status: Option<FormStatus>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET / and GET /jobs/new
pub async fn handle_new_job_page() -> Html<String> {
    Html(render_new_job_page())
}

/// POST /api/jobs/extract
///
/// Runs the JD heuristics and returns both the raw hits and the merged form.
pub async fn handle_extract(
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let Json(request) = payload?;

    let mut session = FormSession::new(request.form, request.jd_text);
    let fields = session.extract_from_jd()?;

    Ok(Json(ExtractResponse {
        ok: true,
        fields,
        form: session.record,
        status: session.status,
    }))
}

/// POST /api/jobs
///
/// Appends one row to the configured sheet. Every field is optional on the
/// wire; an empty company is rejected before the sheet is touched.
pub async fn handle_create_job(
    State(state): State<AppState>,
    payload: Result<Json<JobRecord>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(record) = payload?;

    let mut session = FormSession::new(record, "");
    session.submit(state.appender.as_ref()).await?;

    Ok(Json(SubmitResponse {
        ok: true,
        status: session.status,
    }))
}
