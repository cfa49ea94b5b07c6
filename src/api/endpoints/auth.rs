//! Login and logout.
//!
//! There is no credential backend: any well-formed email and password
//! signs in with the chosen role, exactly like the demo portal.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::gate::{self, Route};
use crate::models::{Role, UserAccount};
use crate::state::AppState;
use crate::store::repository::session;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub account: UserAccount,
    pub redirect_to: &'static str,
}

#[derive(Serialize)]
pub struct LoginPage {
    pub title: &'static str,
    pub roles: Vec<&'static str>,
    pub demo_credentials: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub redirect_to: &'static str,
}

/// `GET /login`: the sign-in form metadata.
pub async fn login_page() -> Json<LoginPage> {
    Json(LoginPage {
        title: "Sign In",
        roles: vec![Role::Hr.as_str(), Role::User.as_str()],
        demo_credentials: vec![
            "hr@company.com / password",
            "user@email.com / password",
        ],
    })
}

/// `POST /login`: validate the form, store the session, and point the
/// client at the role's home dashboard.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let account = UserAccount::login(&form.email, &form.password, form.role)?;

    let conn = state.store().await;
    session::save_session(&conn, &account)?;

    let redirect_to = gate::home_route(account.role).path();
    Ok(Json(LoginResponse {
        account,
        redirect_to,
    }))
}

/// `POST /logout`: clear the session.
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<LogoutResponse>, ApiError> {
    let conn = state.store().await;
    session::clear_session(&conn)?;
    Ok(Json(LogoutResponse {
        redirect_to: Route::Login.path(),
    }))
}
