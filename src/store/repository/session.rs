use rusqlite::Connection;

use super::{delete_key, read_key, write_key, KEY_SESSION};
use crate::models::{Session, UserAccount};
use crate::store::StoreError;

/// Resolve the current session. A missing `user` key is `LoggedOut`.
pub fn load_session(conn: &Connection) -> Result<Session, StoreError> {
    Ok(match read_key::<UserAccount>(conn, KEY_SESSION)? {
        Some(account) => Session::LoggedIn(account),
        None => Session::LoggedOut,
    })
}

pub fn save_session(conn: &Connection, account: &UserAccount) -> Result<(), StoreError> {
    write_key(conn, KEY_SESSION, account)?;
    tracing::info!(account_id = %account.id, role = account.role.as_str(), "Session started");
    Ok(())
}

pub fn clear_session(conn: &Connection) -> Result<(), StoreError> {
    delete_key(conn, KEY_SESSION)?;
    tracing::info!("Session cleared");
    Ok(())
}
