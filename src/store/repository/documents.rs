use rusqlite::Connection;
use uuid::Uuid;

use super::{read_key, write_key, KEY_DOCUMENTS};
use crate::models::Document;
use crate::store::StoreError;

/// Load the full document collection (empty if nothing stored yet).
pub fn load_documents(conn: &Connection) -> Result<Vec<Document>, StoreError> {
    Ok(read_key(conn, KEY_DOCUMENTS)?.unwrap_or_default())
}

pub fn save_documents(conn: &Connection, docs: &[Document]) -> Result<(), StoreError> {
    write_key(conn, KEY_DOCUMENTS, &docs)
}

/// Append a document to the collection.
pub fn insert_document(conn: &Connection, doc: &Document) -> Result<(), StoreError> {
    let mut docs = load_documents(conn)?;
    docs.push(doc.clone());
    save_documents(conn, &docs)?;
    tracing::debug!(document_id = %doc.id, doc_type = doc.doc_type.as_str(), "Document stored");
    Ok(())
}

pub fn get_document(conn: &Connection, id: &Uuid) -> Result<Option<Document>, StoreError> {
    let docs = load_documents(conn)?;
    Ok(docs.into_iter().find(|d| d.id == *id))
}

/// Replace a document in place, matched by id.
pub fn update_document(conn: &Connection, doc: &Document) -> Result<(), StoreError> {
    let mut docs = load_documents(conn)?;
    let slot = docs
        .iter_mut()
        .find(|d| d.id == doc.id)
        .ok_or_else(|| StoreError::NotFound {
            entity_type: "Document".into(),
            id: doc.id.to_string(),
        })?;
    *slot = doc.clone();
    save_documents(conn, &docs)
}
