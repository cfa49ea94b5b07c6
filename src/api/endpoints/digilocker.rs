//! DigiLocker connection and trusted import endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::digilocker::{SourceDocument, SourceError};
use crate::gate::{self, Route, RouteOutcome};
use crate::models::Document;
use crate::state::AppState;
use crate::store::repository::{digilocker, session};
use crate::verify;

#[derive(Serialize)]
pub struct DigiLockerView {
    pub connected: bool,
    pub abc_id: Option<String>,
    /// Empty until connected.
    pub documents: Vec<SourceDocument>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectForm {
    pub abc_id: String,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    pub connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct ImportForm {
    pub source_id: String,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub document: Document,
}

/// `GET /digilocker`: connection state and, when connected, the wallet.
pub async fn status(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let (connected, abc_id) = {
        let conn = state.store().await;
        let current = session::load_session(&conn)?;
        if let RouteOutcome::Redirect(route) = gate::check(Route::Digilocker, &current) {
            return Ok(Redirect::to(route.path()).into_response());
        }
        (digilocker::is_connected(&conn)?, digilocker::abc_id(&conn)?)
    };

    let documents = if connected {
        state.locker().available_documents().await?
    } else {
        Vec::new()
    };

    Ok(Json(DigiLockerView {
        connected,
        abc_id,
        documents,
    })
    .into_response())
}

/// `POST /digilocker/connect`: run the handshake and persist the link.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ConnectForm>,
) -> Result<Json<ConnectResponse>, ApiError> {
    {
        let conn = state.store().await;
        let current = session::load_session(&conn)?;
        gate::require_session(&current)?;
    }

    // Handshake runs without holding the store lock.
    state.locker().connect(&form.abc_id).await?;

    let conn = state.store().await;
    digilocker::set_connected(&conn, form.abc_id.trim())?;
    Ok(Json(ConnectResponse { connected: true }))
}

/// `POST /digilocker/disconnect`
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConnectResponse>, ApiError> {
    let conn = state.store().await;
    let current = session::load_session(&conn)?;
    gate::require_session(&current)?;

    digilocker::disconnect(&conn)?;
    Ok(Json(ConnectResponse { connected: false }))
}

/// `POST /digilocker/import`: bring a wallet document in as verified.
pub async fn import(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ImportForm>,
) -> Result<Json<ImportResponse>, ApiError> {
    let account = {
        let conn = state.store().await;
        let current = session::load_session(&conn)?;
        let account = gate::require_session(&current)?.clone();
        if !digilocker::is_connected(&conn)? {
            return Err(SourceError::NotConnected.into());
        }
        account
    };

    let wallet = state.locker().available_documents().await?;
    let source_doc = wallet
        .into_iter()
        .find(|d| d.id == form.source_id)
        .ok_or_else(|| SourceError::UnknownDocument(form.source_id.clone()))?;

    let conn = state.store().await;
    let document = verify::import_from_trusted_source(
        &conn,
        &account,
        &source_doc,
        Utc::now().date_naive(),
    )?;

    Ok(Json(ImportResponse { document }))
}
