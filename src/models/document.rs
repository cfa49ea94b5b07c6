use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DecisionOrigin, DocumentOrigin, DocumentStatus, DocumentType};

/// Confidence assigned to documents imported from a trusted source.
/// Trusted-source documents skip verification entirely.
pub const TRUSTED_SOURCE_CONFIDENCE: u8 = 98;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Opaque candidate identifier: dashboards show this instead of
    /// name/email so documents can be listed without exposing identity.
    pub candidate_id: String,
    /// Kept for matching uploads against open document requests.
    pub candidate_email: Option<String>,
    pub file_name: String,
    pub doc_type: DocumentType,
    pub upload_date: NaiveDate,
    pub origin: DocumentOrigin,
    pub status: DocumentStatus,
    /// 0–100. Only meaningful once `status` leaves `Pending`.
    pub confidence: u8,
    /// How the terminal status was reached. `None` while pending.
    pub decided_by: Option<DecisionOrigin>,
    pub uploader_notes: Option<String>,
    pub reviewer_notes: Option<String>,
}

impl Document {
    /// Verified and rejected documents accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            DocumentStatus::Verified | DocumentStatus::Rejected
        )
    }

    /// Confidence to display. Pending documents suppress their score.
    pub fn display_confidence(&self) -> Option<u8> {
        if self.status == DocumentStatus::Pending {
            None
        } else {
            Some(self.confidence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: DocumentStatus, confidence: u8) -> Document {
        Document {
            id: Uuid::new_v4(),
            candidate_id: "cand-001".into(),
            candidate_email: Some("jane@email.com".into()),
            file_name: "resume_jane.pdf".into(),
            doc_type: DocumentType::Resume,
            upload_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            origin: DocumentOrigin::Manual,
            status,
            confidence,
            decided_by: None,
            uploader_notes: None,
            reviewer_notes: None,
        }
    }

    #[test]
    fn pending_suppresses_confidence() {
        let doc = sample(DocumentStatus::Pending, 0);
        assert_eq!(doc.display_confidence(), None);
        assert!(!doc.is_terminal());
    }

    #[test]
    fn verified_shows_confidence() {
        let doc = sample(DocumentStatus::Verified, 92);
        assert_eq!(doc.display_confidence(), Some(92));
        assert!(doc.is_terminal());
    }

    #[test]
    fn rejected_is_terminal() {
        let doc = sample(DocumentStatus::Rejected, 45);
        assert!(doc.is_terminal());
        assert_eq!(doc.display_confidence(), Some(45));
    }

    #[test]
    fn json_round_trip() {
        let doc = sample(DocumentStatus::Verified, 92);
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, doc.id);
        assert_eq!(back.status, DocumentStatus::Verified);
        assert_eq!(back.confidence, 92);
    }
}
