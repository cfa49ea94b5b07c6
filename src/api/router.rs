//! Portal router.
//!
//! Mirrors the portal's navigation map: public landing and login,
//! role-gated dashboards, and the upload/DigiLocker/request operations.
//! Unknown paths fall through to a JSON 404.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::error::{ErrorBody, ErrorDetail};
use crate::state::AppState;

/// Build the portal router with all routes mounted.
pub fn portal_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(endpoints::landing))
        .route("/landing", get(endpoints::landing))
        .route("/health", get(endpoints::health))
        .route("/login", get(endpoints::auth::login_page).post(endpoints::auth::login))
        .route("/logout", post(endpoints::auth::logout))
        .route("/hr-dashboard", get(endpoints::dashboard::hr_dashboard))
        .route("/user-dashboard", get(endpoints::dashboard::user_dashboard))
        .route(
            "/upload",
            get(endpoints::documents::upload_page).post(endpoints::documents::upload),
        )
        .route("/documents/:id/decision", post(endpoints::documents::decide))
        .route("/requests", post(endpoints::requests::create))
        .route("/digilocker", get(endpoints::digilocker::status))
        .route("/digilocker/connect", post(endpoints::digilocker::connect))
        .route(
            "/digilocker/disconnect",
            post(endpoints::digilocker::disconnect),
        )
        .route("/digilocker/import", post(endpoints::digilocker::import))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Catch-all for unknown views.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: ErrorDetail {
                code: "NOT_FOUND",
                message: "This page does not exist".to_string(),
            },
        }),
    )
}
