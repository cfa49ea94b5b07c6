//! DigiLocker connection flags.
//!
//! Connection state survives logout on purpose: reconnecting on every
//! visit would defeat the point of a linked locker.

use rusqlite::Connection;

use super::{delete_key, read_key, write_key, KEY_DIGILOCKER_ABC_ID, KEY_DIGILOCKER_CONNECTED};
use crate::store::StoreError;

pub fn is_connected(conn: &Connection) -> Result<bool, StoreError> {
    Ok(read_key(conn, KEY_DIGILOCKER_CONNECTED)?.unwrap_or(false))
}

/// Record a successful connection along with the ABC id used.
pub fn set_connected(conn: &Connection, abc_id: &str) -> Result<(), StoreError> {
    write_key(conn, KEY_DIGILOCKER_CONNECTED, &true)?;
    write_key(conn, KEY_DIGILOCKER_ABC_ID, &abc_id)?;
    tracing::info!("DigiLocker connected");
    Ok(())
}

pub fn abc_id(conn: &Connection) -> Result<Option<String>, StoreError> {
    read_key(conn, KEY_DIGILOCKER_ABC_ID)
}

pub fn disconnect(conn: &Connection) -> Result<(), StoreError> {
    delete_key(conn, KEY_DIGILOCKER_CONNECTED)?;
    delete_key(conn, KEY_DIGILOCKER_ABC_ID)?;
    tracing::info!("DigiLocker disconnected");
    Ok(())
}
