//! HR and candidate dashboards.
//!
//! Each handler resolves the session, runs the route gate (failed gates
//! answer with a redirect, matching the portal's navigation), then
//! assembles a single response from the store projections.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::gate::{self, Route, RouteOutcome};
use crate::models::filters::{
    self, StatusCounts, DEFAULT_URGENCY_THRESHOLD_DAYS,
};
use crate::models::{Document, DocumentRequest, Role};
use crate::state::AppState;
use crate::store::repository::{digilocker, documents, requests, session};

#[derive(Serialize)]
pub struct HrDashboard {
    pub welcome: String,
    pub stats: StatusCounts,
    pub open_requests: usize,
    pub documents: Vec<Document>,
    pub requests: Vec<DocumentRequest>,
}

/// A request as the candidate sees it, with the urgency badge resolved.
#[derive(Serialize)]
pub struct RequestCard {
    #[serde(flatten)]
    pub request: DocumentRequest,
    pub urgent: bool,
}

#[derive(Serialize)]
pub struct UserDashboard {
    pub welcome: String,
    pub stats: StatusCounts,
    pub documents: Vec<Document>,
    pub pending_requests: Vec<RequestCard>,
    pub digilocker_connected: bool,
}

/// `GET /hr-dashboard`
pub async fn hr_dashboard(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let conn = state.store().await;
    let current = session::load_session(&conn)?;

    if let RouteOutcome::Redirect(route) = gate::check(Route::HrDashboard, &current) {
        return Ok(Redirect::to(route.path()).into_response());
    }
    let account = gate::require_role(&current, Role::Hr)?;

    let docs = documents::load_documents(&conn)?;
    let reqs = requests::load_requests(&conn)?;

    Ok(Json(HrDashboard {
        welcome: account.name.clone(),
        stats: filters::status_counts(&docs),
        open_requests: filters::open_requests(&reqs).len(),
        documents: docs,
        requests: reqs,
    })
    .into_response())
}

/// `GET /user-dashboard`
pub async fn user_dashboard(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let conn = state.store().await;
    let current = session::load_session(&conn)?;

    if let RouteOutcome::Redirect(route) = gate::check(Route::UserDashboard, &current) {
        return Ok(Redirect::to(route.path()).into_response());
    }
    let account = gate::require_role(&current, Role::User)?;

    let docs = documents::load_documents(&conn)?;
    let reqs = requests::load_requests(&conn)?;
    let connected = digilocker::is_connected(&conn)?;

    let today = Utc::now().date_naive();
    let pending_requests = filters::open_requests(&reqs)
        .into_iter()
        .map(|request| RequestCard {
            urgent: filters::is_urgent(&request, today, DEFAULT_URGENCY_THRESHOLD_DAYS),
            request,
        })
        .collect();

    Ok(Json(UserDashboard {
        welcome: account.name.clone(),
        stats: filters::status_counts(&docs),
        documents: docs,
        pending_requests,
        digilocker_connected: connected,
    })
    .into_response())
}
