use rusqlite::Connection;
use uuid::Uuid;

use super::{read_key, write_key, KEY_REQUESTS};
use crate::models::{DocumentRequest, DocumentType, RequestStatus};
use crate::store::StoreError;

pub fn load_requests(conn: &Connection) -> Result<Vec<DocumentRequest>, StoreError> {
    Ok(read_key(conn, KEY_REQUESTS)?.unwrap_or_default())
}

pub fn save_requests(conn: &Connection, requests: &[DocumentRequest]) -> Result<(), StoreError> {
    write_key(conn, KEY_REQUESTS, &requests)
}

pub fn insert_request(conn: &Connection, request: &DocumentRequest) -> Result<(), StoreError> {
    let mut requests = load_requests(conn)?;
    requests.push(request.clone());
    save_requests(conn, &requests)?;
    tracing::debug!(
        request_id = %request.id,
        doc_type = request.doc_type.as_str(),
        candidate = %request.candidate_email,
        "Document request stored"
    );
    Ok(())
}

pub fn get_request(conn: &Connection, id: &Uuid) -> Result<Option<DocumentRequest>, StoreError> {
    let requests = load_requests(conn)?;
    Ok(requests.into_iter().find(|r| r.id == *id))
}

/// Close the oldest open request matching the candidate and document type.
///
/// Returns the fulfilled request, or `None` when nothing matched. Email
/// comparison is case-insensitive.
pub fn fulfil_matching(
    conn: &Connection,
    candidate_email: &str,
    doc_type: DocumentType,
) -> Result<Option<DocumentRequest>, StoreError> {
    let mut requests = load_requests(conn)?;

    let mut oldest: Option<usize> = None;
    for (idx, request) in requests.iter().enumerate() {
        if !request.is_open()
            || request.doc_type != doc_type
            || !request.candidate_email.eq_ignore_ascii_case(candidate_email)
        {
            continue;
        }
        match oldest {
            Some(best) if requests[best].request_date <= request.request_date => {}
            _ => oldest = Some(idx),
        }
    }

    let Some(idx) = oldest else {
        return Ok(None);
    };

    requests[idx].status = RequestStatus::Fulfilled;
    let fulfilled = requests[idx].clone();
    save_requests(conn, &requests)?;
    Ok(Some(fulfilled))
}
