pub mod auth;
pub mod dashboard;
pub mod digilocker;
pub mod documents;
pub mod requests;

use axum::Json;
use serde::Serialize;

use crate::config;
use crate::models::DocumentType;

/// Health check: verifies the portal backend is running.
pub async fn health() -> &'static str {
    tracing::debug!("Health check called");
    "ok"
}

#[derive(Serialize)]
pub struct LandingPage {
    pub app: &'static str,
    pub version: &'static str,
    pub tagline: &'static str,
    pub document_catalog: Vec<&'static str>,
}

/// `GET /landing`: public app metadata.
pub async fn landing() -> Json<LandingPage> {
    Json(LandingPage {
        app: config::APP_NAME,
        version: config::APP_VERSION,
        tagline: "AI-Powered Document Verification Platform",
        document_catalog: DocumentType::catalog().iter().map(|t| t.label()).collect(),
    })
}
