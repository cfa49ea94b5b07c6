use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DocumentType, RequestStatus};

/// An outstanding ask from an HR user to a candidate for a specific
/// document type. Created by HR, fulfilled when the candidate uploads
/// (or imports) a document of the requested type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub id: Uuid,
    pub hr_name: String,
    pub hr_email: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub doc_type: DocumentType,
    pub notes: String,
    pub request_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: RequestStatus,
}

impl DocumentRequest {
    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}
