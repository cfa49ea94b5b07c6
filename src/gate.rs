//! Role gate over the portal route map.
//!
//! A deliberately small guard, not a policy engine: each view names its
//! access requirement and the gate answers proceed-or-redirect from the
//! current session. Checked at the boundary of every view.

use crate::models::{Role, Session, UserAccount};

// ═══════════════════════════════════════════════════════════
// Routes
// ═══════════════════════════════════════════════════════════

/// Every navigable view in the portal. Unknown paths collapse to
/// `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    HrDashboard,
    UserDashboard,
    Upload,
    Digilocker,
    NotFound,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/landing",
            Self::Login => "/login",
            Self::HrDashboard => "/hr-dashboard",
            Self::UserDashboard => "/user-dashboard",
            Self::Upload => "/upload",
            Self::Digilocker => "/digilocker",
            Self::NotFound => "/not-found",
        }
    }

    pub fn from_path(path: &str) -> Route {
        match path {
            "/" | "/landing" => Self::Landing,
            "/login" => Self::Login,
            "/hr-dashboard" => Self::HrDashboard,
            "/user-dashboard" => Self::UserDashboard,
            "/upload" => Self::Upload,
            "/digilocker" => Self::Digilocker,
            _ => Self::NotFound,
        }
    }

    fn access(&self) -> Access {
        match self {
            Self::Landing | Self::Login | Self::NotFound => Access::Public,
            Self::Upload | Self::Digilocker => Access::Authenticated,
            Self::HrDashboard => Access::Role(Role::Hr),
            Self::UserDashboard => Access::Role(Role::User),
        }
    }
}

/// What a route demands of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
    Role(Role),
}

/// The dashboard a role lands on after login or a mismatch redirect.
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Hr => Route::HrDashboard,
        Role::User => Route::UserDashboard,
    }
}

// ═══════════════════════════════════════════════════════════
// Gate check
// ═══════════════════════════════════════════════════════════

/// Outcome of gating a route against a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Proceed,
    Redirect(Route),
}

/// Gate a view: no session on a protected route goes back to login,
/// a role mismatch goes to the session's own dashboard.
pub fn check(route: Route, session: &Session) -> RouteOutcome {
    match route.access() {
        Access::Public => RouteOutcome::Proceed,
        Access::Authenticated => match session {
            Session::LoggedOut => RouteOutcome::Redirect(Route::Login),
            Session::LoggedIn(_) => RouteOutcome::Proceed,
        },
        Access::Role(required) => match session {
            Session::LoggedOut => RouteOutcome::Redirect(Route::Login),
            Session::LoggedIn(account) if account.role == required => RouteOutcome::Proceed,
            Session::LoggedIn(account) => RouteOutcome::Redirect(home_route(account.role)),
        },
    }
}

// ═══════════════════════════════════════════════════════════
// Operation guards
// ═══════════════════════════════════════════════════════════

/// Gate failures for non-navigable operations (JSON endpoints).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Requires the {} role", .required.as_str())]
    NotAuthorized { required: Role },
}

/// Require any signed-in account.
pub fn require_session(session: &Session) -> Result<&UserAccount, GateError> {
    session.account().ok_or(GateError::NotAuthenticated)
}

/// Require a signed-in account holding the given role.
pub fn require_role(session: &Session, required: Role) -> Result<&UserAccount, GateError> {
    let account = require_session(session)?;
    if account.role != required {
        return Err(GateError::NotAuthorized { required });
    }
    Ok(account)
}
