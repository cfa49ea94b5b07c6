//! Read-only projections over the document and request collections.
//!
//! Everything here is a pure function of its inputs: dashboards call
//! these to derive tabs, stat cards, and urgency badges without ever
//! mutating the underlying collections.

use chrono::NaiveDate;
use serde::Serialize;

use super::document::Document;
use super::enums::DocumentStatus;
use super::request::DocumentRequest;

/// Requests due within this many days are flagged as urgent.
pub const DEFAULT_URGENCY_THRESHOLD_DAYS: i64 = 3;

/// Per-status tallies for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub rejected: usize,
}

pub fn filter_by_status(docs: &[Document], status: DocumentStatus) -> Vec<Document> {
    docs.iter()
        .filter(|d| d.status == status)
        .cloned()
        .collect()
}

pub fn count_by_status(docs: &[Document], status: DocumentStatus) -> usize {
    docs.iter().filter(|d| d.status == status).count()
}

pub fn status_counts(docs: &[Document]) -> StatusCounts {
    StatusCounts {
        total: docs.len(),
        verified: count_by_status(docs, DocumentStatus::Verified),
        pending: count_by_status(docs, DocumentStatus::Pending),
        rejected: count_by_status(docs, DocumentStatus::Rejected),
    }
}

pub fn open_requests(requests: &[DocumentRequest]) -> Vec<DocumentRequest> {
    requests.iter().filter(|r| r.is_open()).cloned().collect()
}

/// A request is urgent when its due date is within `threshold_days` of
/// `today`, boundary inclusive. Overdue requests stay urgent.
pub fn is_urgent(request: &DocumentRequest, today: NaiveDate, threshold_days: i64) -> bool {
    (request.due_date - today).num_days() <= threshold_days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{DocumentOrigin, DocumentType, RequestStatus};
    use uuid::Uuid;

    fn doc(status: DocumentStatus) -> Document {
        Document {
            id: Uuid::new_v4(),
            candidate_id: "cand-001".into(),
            candidate_email: None,
            file_name: "file.pdf".into(),
            doc_type: DocumentType::Resume,
            upload_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            origin: DocumentOrigin::Manual,
            status,
            confidence: 0,
            decided_by: None,
            uploader_notes: None,
            reviewer_notes: None,
        }
    }

    fn request(due: NaiveDate, status: RequestStatus) -> DocumentRequest {
        DocumentRequest {
            id: Uuid::new_v4(),
            hr_name: "Sarah".into(),
            hr_email: "sarah@techcorp.com".into(),
            candidate_name: "Emma".into(),
            candidate_email: "emma@email.com".into(),
            doc_type: DocumentType::DegreeCertificate,
            notes: String::new(),
            request_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            due_date: due,
            status,
        }
    }

    #[test]
    fn status_filters_partition_the_collection() {
        let docs = vec![
            doc(DocumentStatus::Verified),
            doc(DocumentStatus::Pending),
            doc(DocumentStatus::Rejected),
            doc(DocumentStatus::Pending),
            doc(DocumentStatus::Verified),
        ];

        let verified = filter_by_status(&docs, DocumentStatus::Verified);
        let pending = filter_by_status(&docs, DocumentStatus::Pending);
        let rejected = filter_by_status(&docs, DocumentStatus::Rejected);

        assert_eq!(verified.len() + pending.len() + rejected.len(), docs.len());

        // Union of the three filters is exactly the original collection.
        let mut union: Vec<Uuid> = verified
            .iter()
            .chain(&pending)
            .chain(&rejected)
            .map(|d| d.id)
            .collect();
        let mut original: Vec<Uuid> = docs.iter().map(|d| d.id).collect();
        union.sort();
        original.sort();
        assert_eq!(union, original);
    }

    #[test]
    fn counts_match_filters() {
        let docs = vec![
            doc(DocumentStatus::Verified),
            doc(DocumentStatus::Pending),
            doc(DocumentStatus::Pending),
        ];
        assert_eq!(count_by_status(&docs, DocumentStatus::Verified), 1);
        assert_eq!(count_by_status(&docs, DocumentStatus::Pending), 2);
        assert_eq!(count_by_status(&docs, DocumentStatus::Rejected), 0);

        let counts = status_counts(&docs);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.verified, 1);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.rejected, 0);
    }

    #[test]
    fn empty_collection_counts() {
        let counts = status_counts(&[]);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.verified, 0);
    }

    #[test]
    fn open_requests_excludes_fulfilled() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let requests = vec![
            request(due, RequestStatus::Open),
            request(due, RequestStatus::Fulfilled),
        ];
        let open = open_requests(&requests);
        assert_eq!(open.len(), 1);
        assert!(open[0].is_open());
    }

    #[test]
    fn urgency_boundary_is_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let threshold = DEFAULT_URGENCY_THRESHOLD_DAYS;

        // Exactly at the threshold: urgent.
        let at = request(today + chrono::Duration::days(threshold), RequestStatus::Open);
        assert!(is_urgent(&at, today, threshold));

        // One day past the threshold: not urgent.
        let past = request(
            today + chrono::Duration::days(threshold + 1),
            RequestStatus::Open,
        );
        assert!(!is_urgent(&past, today, threshold));

        // Due today and overdue: urgent.
        let due_today = request(today, RequestStatus::Open);
        assert!(is_urgent(&due_today, today, threshold));
        let overdue = request(today - chrono::Duration::days(5), RequestStatus::Open);
        assert!(is_urgent(&overdue, today, threshold));
    }
}
