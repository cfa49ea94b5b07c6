//! Upload submission and HR decisions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::gate::{self, Route, RouteOutcome};
use crate::models::{Document, DocumentType, Role};
use crate::state::AppState;
use crate::store::repository::session;
use crate::upload::{UploadForm, MAX_UPLOAD_BYTES};
use crate::verify::{self, Verdict};

#[derive(Serialize)]
pub struct UploadPage {
    pub accepted_formats: Vec<&'static str>,
    pub max_size_bytes: u64,
    pub document_types: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub document: Document,
}

#[derive(Debug, Deserialize)]
pub struct DecisionForm {
    pub verdict: Verdict,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct DecisionResponse {
    pub document: Document,
}

/// `GET /upload`: form metadata for the upload screen.
pub async fn upload_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let conn = state.store().await;
    let current = session::load_session(&conn)?;

    if let RouteOutcome::Redirect(route) = gate::check(Route::Upload, &current) {
        return Ok(Redirect::to(route.path()).into_response());
    }

    Ok(Json(UploadPage {
        accepted_formats: vec!["pdf", "png", "jpg", "jpeg", "gif", "doc", "docx"],
        max_size_bytes: MAX_UPLOAD_BYTES,
        document_types: DocumentType::catalog().iter().map(|t| t.label()).collect(),
    })
    .into_response())
}

/// `POST /upload`: submit a document and run verification to completion.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Json(form): Json<UploadForm>,
) -> Result<Json<UploadResponse>, ApiError> {
    let pending = {
        let conn = state.store().await;
        let current = session::load_session(&conn)?;
        let account = gate::require_session(&current)?.clone();
        verify::submit_upload(&conn, &account, &form, Utc::now().date_naive())?
    };

    // The store lock is released while the engine runs; the task takes
    // it again only to apply the outcome.
    let task = verify::spawn_verification(Arc::clone(&state), pending.id);
    let document = task.join().await?;

    Ok(Json(UploadResponse { document }))
}

/// `POST /documents/:id/decision`: HR verdict on a pending document.
pub async fn decide(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
    Json(form): Json<DecisionForm>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let conn = state.store().await;
    let current = session::load_session(&conn)?;
    gate::require_role(&current, Role::Hr)?;

    let document = verify::hr_decide(&conn, document_id, form.verdict, form.notes)?;
    Ok(Json(DecisionResponse { document }))
}
