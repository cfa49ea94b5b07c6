//! Document requests: HR asking candidates for specific documents.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::gate;
use crate::models::{
    is_valid_email, DocumentRequest, DocumentType, RequestStatus, Role,
};
use crate::state::AppState;
use crate::store::repository::{requests, session};

#[derive(Debug, Deserialize)]
pub struct RequestForm {
    pub candidate_name: String,
    pub candidate_email: String,
    pub doc_type: DocumentType,
    #[serde(default)]
    pub notes: Option<String>,
    pub due_date: NaiveDate,
}

#[derive(Serialize)]
pub struct RequestResponse {
    pub request: DocumentRequest,
}

/// `POST /requests`: create an outstanding document request.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RequestForm>,
) -> Result<Json<RequestResponse>, ApiError> {
    let conn = state.store().await;
    let current = session::load_session(&conn)?;
    let account = gate::require_role(&current, Role::Hr)?;

    if form.candidate_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Candidate name is required".into()));
    }
    if !is_valid_email(form.candidate_email.trim()) {
        return Err(ApiError::BadRequest(
            "Candidate email is not valid".into(),
        ));
    }

    let request = DocumentRequest {
        id: Uuid::new_v4(),
        hr_name: account.name.clone(),
        hr_email: account.email.clone(),
        candidate_name: form.candidate_name.trim().to_string(),
        candidate_email: form.candidate_email.trim().to_string(),
        doc_type: form.doc_type,
        notes: form.notes.unwrap_or_default(),
        request_date: Utc::now().date_naive(),
        due_date: form.due_date,
        status: RequestStatus::Open,
    };

    requests::insert_request(&conn, &request)?;
    tracing::info!(
        request_id = %request.id,
        candidate = %request.candidate_email,
        doc_type = request.doc_type.as_str(),
        "Document request sent"
    );

    Ok(Json(RequestResponse { request }))
}
