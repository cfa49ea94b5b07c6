//! Typed access to the JSON key-value store.
//!
//! Every piece of portal state lives under a well-known key in the
//! `local_store` table, JSON-encoded. These modules are the only code
//! that touches keys directly: services and views go through them.

pub mod digilocker;
pub mod documents;
pub mod requests;
pub mod session;

pub use digilocker::*;
pub use documents::*;
pub use requests::*;
pub use session::*;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StoreError;

pub(crate) const KEY_SESSION: &str = "user";
pub(crate) const KEY_DOCUMENTS: &str = "user_documents";
pub(crate) const KEY_REQUESTS: &str = "document_requests";
pub(crate) const KEY_DIGILOCKER_CONNECTED: &str = "digilocker_connected";
pub(crate) const KEY_DIGILOCKER_ABC_ID: &str = "digilocker_abc_id";

/// Read and decode a key. `None` when the key has never been written.
pub(crate) fn read_key<T: DeserializeOwned>(
    conn: &Connection,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM local_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        None => Ok(None),
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StoreError::CorruptValue {
                key: key.to_string(),
                source: e,
            }),
    }
}

/// Encode and write a key, replacing any previous value.
pub(crate) fn write_key<T: Serialize>(
    conn: &Connection,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|e| StoreError::CorruptValue {
        key: key.to_string(),
        source: e,
    })?;
    conn.execute(
        "INSERT INTO local_store (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, json],
    )?;
    Ok(())
}

pub(crate) fn delete_key(conn: &Connection, key: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM local_store WHERE key = ?1", params![key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::open_memory_store;

    #[test]
    fn missing_key_reads_none() {
        let conn = open_memory_store().unwrap();
        let value: Option<Vec<String>> = read_key(&conn, "nope").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let conn = open_memory_store().unwrap();
        write_key(&conn, "probe", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let value: Option<Vec<String>> = read_key(&conn, "probe").unwrap();
        assert_eq!(value.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn write_replaces_previous_value() {
        let conn = open_memory_store().unwrap();
        write_key(&conn, "probe", &1u32).unwrap();
        write_key(&conn, "probe", &2u32).unwrap();
        let value: Option<u32> = read_key(&conn, "probe").unwrap();
        assert_eq!(value, Some(2));
    }

    #[test]
    fn delete_removes_key() {
        let conn = open_memory_store().unwrap();
        write_key(&conn, "probe", &true).unwrap();
        delete_key(&conn, "probe").unwrap();
        let value: Option<bool> = read_key(&conn, "probe").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn corrupt_json_is_reported_with_key() {
        let conn = open_memory_store().unwrap();
        conn.execute(
            "INSERT INTO local_store (key, value) VALUES ('probe', 'not json')",
            [],
        )
        .unwrap();
        let err = read_key::<Vec<String>>(&conn, "probe").unwrap_err();
        match err {
            StoreError::CorruptValue { key, .. } => assert_eq!(key, "probe"),
            other => panic!("Expected CorruptValue, got: {other}"),
        }
    }
}
