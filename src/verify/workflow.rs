//! Document status workflow.
//!
//! Owns every status/confidence transition a document can make:
//! upload submission, verification outcome application, HR override,
//! and trusted-source import. Transitions are only valid out of
//! `Pending`; terminal documents reject further decisions.

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::Connection;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::verifier::{VerificationOutcome, Verdict};
use crate::digilocker::SourceDocument;
use crate::models::{
    DecisionOrigin, Document, DocumentOrigin, DocumentStatus, UserAccount,
    TRUSTED_SOURCE_CONFIDENCE,
};
use crate::state::AppState;
use crate::store::repository::{documents, requests};
use crate::store::StoreError;
use crate::upload::{self, UploadForm, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Invalid status transition: {} -> {}", .from.as_str(), .to.as_str())]
    InvalidStateTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("Verification cancelled before completion")]
    Cancelled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Upload submission
// ---------------------------------------------------------------------------

/// Validate an upload form and create the pending document.
///
/// Validation failure creates nothing. The new document starts in
/// `Pending` with a zero confidence; verification runs separately.
pub fn submit_upload(
    conn: &Connection,
    account: &UserAccount,
    form: &UploadForm,
    today: NaiveDate,
) -> Result<Document, WorkflowError> {
    let doc_type = upload::validate(form)?;

    let doc = Document {
        id: Uuid::new_v4(),
        candidate_id: account.id.clone(),
        candidate_email: Some(account.email.clone()),
        file_name: upload::sanitize_filename(&form.file_name),
        doc_type,
        upload_date: today,
        origin: DocumentOrigin::Manual,
        status: DocumentStatus::Pending,
        confidence: 0,
        decided_by: None,
        uploader_notes: form
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from),
        reviewer_notes: None,
    };

    documents::insert_document(conn, &doc)?;
    tracing::info!(
        document_id = %doc.id,
        doc_type = doc.doc_type.as_str(),
        "Upload submitted, awaiting verification"
    );

    close_matching_request(conn, &doc)?;
    Ok(doc)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Apply a verification outcome to a pending document.
pub fn apply_verification(
    conn: &Connection,
    document_id: Uuid,
    outcome: &VerificationOutcome,
) -> Result<Document, WorkflowError> {
    apply_decision(
        conn,
        document_id,
        outcome.verdict,
        Some(outcome.confidence),
        DecisionOrigin::AutoVerification,
        None,
    )
}

/// Run verification for a stored document in a background task.
///
/// The returned handle must be joined to observe the result. Dropping
/// it without joining aborts the task and leaves the document pending,
/// so closing the upload view mid-verification never mutates state
/// behind a torn-down screen.
pub fn spawn_verification(state: Arc<AppState>, document_id: Uuid) -> VerificationTask {
    let handle = tokio::spawn(async move {
        let document = {
            let conn = state.store().await;
            documents::get_document(&conn, &document_id)?
                .ok_or(WorkflowError::DocumentNotFound(document_id))?
        };

        let outcome = state.verifier().verify(&document).await;

        let conn = state.store().await;
        apply_verification(&conn, document_id, &outcome)
    });

    VerificationTask {
        handle: Some(handle),
    }
}

/// Abort-on-drop handle for an in-flight verification.
pub struct VerificationTask {
    handle: Option<JoinHandle<Result<Document, WorkflowError>>>,
}

impl VerificationTask {
    /// Wait for the verification to finish and return the updated document.
    pub async fn join(mut self) -> Result<Document, WorkflowError> {
        let Some(handle) = self.handle.take() else {
            return Err(WorkflowError::Cancelled);
        };
        match handle.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(WorkflowError::Cancelled),
            Err(join_err) => {
                tracing::error!(error = %join_err, "Verification task failed to join");
                Err(WorkflowError::Cancelled)
            }
        }
    }

    pub fn abort(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

impl Drop for VerificationTask {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// HR decision
// ---------------------------------------------------------------------------

/// HR override: decide a pending document directly.
///
/// Valid only out of `Pending`. The stored confidence is left as the
/// engine set it; a human verdict carries no score of its own.
pub fn hr_decide(
    conn: &Connection,
    document_id: Uuid,
    verdict: Verdict,
    notes: Option<String>,
) -> Result<Document, WorkflowError> {
    apply_decision(
        conn,
        document_id,
        verdict,
        None,
        DecisionOrigin::HrReview,
        notes,
    )
}

// ---------------------------------------------------------------------------
// Trusted import
// ---------------------------------------------------------------------------

/// Create a document from a trusted source, already verified.
///
/// Issuer-verified documents skip the engine entirely and carry the
/// fixed trusted-source confidence.
pub fn import_from_trusted_source(
    conn: &Connection,
    account: &UserAccount,
    source_doc: &SourceDocument,
    today: NaiveDate,
) -> Result<Document, WorkflowError> {
    let doc = Document {
        id: Uuid::new_v4(),
        candidate_id: account.id.clone(),
        candidate_email: Some(account.email.clone()),
        file_name: source_doc.name.clone(),
        doc_type: source_doc.doc_type,
        upload_date: today,
        origin: DocumentOrigin::Digilocker,
        status: DocumentStatus::Verified,
        confidence: TRUSTED_SOURCE_CONFIDENCE,
        decided_by: Some(DecisionOrigin::TrustedImport),
        uploader_notes: None,
        reviewer_notes: Some(format!(
            "Imported from DigiLocker (issued by {} on {})",
            source_doc.issuer, source_doc.issue_date
        )),
    };

    documents::insert_document(conn, &doc)?;
    tracing::info!(
        document_id = %doc.id,
        issuer = %source_doc.issuer,
        "Trusted document imported as verified"
    );

    close_matching_request(conn, &doc)?;
    Ok(doc)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// The single place a document's status is allowed to change.
fn apply_decision(
    conn: &Connection,
    document_id: Uuid,
    verdict: Verdict,
    confidence: Option<u8>,
    decided_by: DecisionOrigin,
    reviewer_notes: Option<String>,
) -> Result<Document, WorkflowError> {
    let mut doc = documents::get_document(conn, &document_id)?
        .ok_or(WorkflowError::DocumentNotFound(document_id))?;

    let to = match verdict {
        Verdict::Verified => DocumentStatus::Verified,
        Verdict::Rejected => DocumentStatus::Rejected,
    };

    if doc.status != DocumentStatus::Pending {
        return Err(WorkflowError::InvalidStateTransition {
            from: doc.status,
            to,
        });
    }

    doc.status = to;
    doc.decided_by = Some(decided_by);
    if let Some(confidence) = confidence {
        doc.confidence = confidence;
    }
    if reviewer_notes.is_some() {
        doc.reviewer_notes = reviewer_notes;
    }

    documents::update_document(conn, &doc)?;
    tracing::info!(
        document_id = %doc.id,
        status = doc.status.as_str(),
        decided_by = decided_by.as_str(),
        "Document decided"
    );
    Ok(doc)
}

/// Uploading a matching document closes the oldest open request for it.
fn close_matching_request(conn: &Connection, doc: &Document) -> Result<(), WorkflowError> {
    let Some(email) = &doc.candidate_email else {
        return Ok(());
    };
    if let Some(request) = requests::fulfil_matching(conn, email, doc.doc_type)? {
        tracing::info!(
            request_id = %request.id,
            document_id = %doc.id,
            "Open document request fulfilled"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digilocker::{DocumentSource, SimulatedDigiLocker};
    use crate::models::{DocumentRequest, DocumentType, RequestStatus, Role};
    use crate::store::open_memory_store;
    use crate::verify::{SimulatedVerifier, SimulatedVerifierConfig};
    use std::time::Duration;

    fn account() -> UserAccount {
        UserAccount::login("emma@email.com", "password", Role::User).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    fn upload_form() -> UploadForm {
        UploadForm {
            file_name: "degree_certificate.pdf".into(),
            size_bytes: 250_000,
            document_type: Some(DocumentType::DegreeCertificate),
            notes: Some("Scanned copy".into()),
        }
    }

    fn instant_state(conn: Connection) -> Arc<AppState> {
        Arc::new(AppState::new(
            conn,
            Arc::new(SimulatedVerifier::new(SimulatedVerifierConfig::instant())),
            Arc::new(SimulatedDigiLocker::instant()),
        ))
    }

    #[test]
    fn upload_creates_pending_document() {
        let conn = open_memory_store().unwrap();
        let doc = submit_upload(&conn, &account(), &upload_form(), today()).unwrap();

        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.confidence, 0);
        assert_eq!(doc.display_confidence(), None);
        assert_eq!(doc.origin, DocumentOrigin::Manual);
        assert_eq!(doc.decided_by, None);
        assert_eq!(doc.uploader_notes.as_deref(), Some("Scanned copy"));

        let stored = documents::get_document(&conn, &doc.id).unwrap().unwrap();
        assert_eq!(stored.status, DocumentStatus::Pending);
    }

    #[test]
    fn upload_without_type_persists_nothing() {
        let conn = open_memory_store().unwrap();
        let form = UploadForm {
            document_type: None,
            ..upload_form()
        };

        let err = submit_upload(&conn, &account(), &form, today()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Validation(ValidationError::TypeRequired)
        ));
        assert!(documents::load_documents(&conn).unwrap().is_empty());
    }

    #[tokio::test]
    async fn verification_promotes_pending_to_verified() {
        let state = instant_state(open_memory_store().unwrap());
        let doc = {
            let conn = state.store().await;
            submit_upload(&conn, &account(), &upload_form(), today()).unwrap()
        };

        let verified = spawn_verification(Arc::clone(&state), doc.id)
            .join()
            .await
            .unwrap();

        assert_eq!(verified.status, DocumentStatus::Verified);
        assert!((70..100).contains(&verified.confidence));
        assert_eq!(verified.decided_by, Some(DecisionOrigin::AutoVerification));
        assert_eq!(verified.display_confidence(), Some(verified.confidence));
    }

    #[tokio::test]
    async fn dropping_the_task_cancels_verification() {
        let slow = SimulatedVerifierConfig {
            stage_delays: [Duration::from_secs(3600); 4],
            ..SimulatedVerifierConfig::default()
        };
        let state = Arc::new(AppState::new(
            open_memory_store().unwrap(),
            Arc::new(SimulatedVerifier::new(slow)),
            Arc::new(SimulatedDigiLocker::instant()),
        ));
        let doc = {
            let conn = state.store().await;
            submit_upload(&conn, &account(), &upload_form(), today()).unwrap()
        };

        let task = spawn_verification(Arc::clone(&state), doc.id);
        drop(task);
        tokio::time::sleep(Duration::from_millis(20)).await;

        let conn = state.store().await;
        let stored = documents::get_document(&conn, &doc.id).unwrap().unwrap();
        assert_eq!(stored.status, DocumentStatus::Pending);
        assert_eq!(stored.display_confidence(), None);
    }

    #[tokio::test]
    async fn verifying_unknown_document_errors() {
        let state = instant_state(open_memory_store().unwrap());
        let err = spawn_verification(state, Uuid::new_v4())
            .join()
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::DocumentNotFound(_)));
    }

    #[test]
    fn hr_decide_rejects_pending_with_notes() {
        let conn = open_memory_store().unwrap();
        let doc = submit_upload(&conn, &account(), &upload_form(), today()).unwrap();

        let decided = hr_decide(
            &conn,
            doc.id,
            Verdict::Rejected,
            Some("Document quality insufficient".into()),
        )
        .unwrap();

        assert_eq!(decided.status, DocumentStatus::Rejected);
        assert_eq!(decided.decided_by, Some(DecisionOrigin::HrReview));
        assert_eq!(
            decided.reviewer_notes.as_deref(),
            Some("Document quality insufficient")
        );
    }

    #[test]
    fn hr_decide_is_rejected_on_terminal_documents() {
        let conn = open_memory_store().unwrap();
        let doc = submit_upload(&conn, &account(), &upload_form(), today()).unwrap();
        hr_decide(&conn, doc.id, Verdict::Verified, None).unwrap();

        let err = hr_decide(&conn, doc.id, Verdict::Rejected, Some("changed my mind".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidStateTransition {
                from: DocumentStatus::Verified,
                to: DocumentStatus::Rejected,
            }
        ));

        // The stored document is untouched by the failed re-decision.
        let stored = documents::get_document(&conn, &doc.id).unwrap().unwrap();
        assert_eq!(stored.status, DocumentStatus::Verified);
        assert_eq!(stored.reviewer_notes, None);
    }

    #[tokio::test]
    async fn trusted_import_is_verified_with_fixed_confidence() {
        let conn = open_memory_store().unwrap();
        let locker = SimulatedDigiLocker::instant();
        let wallet = locker.available_documents().await.unwrap();

        for source_doc in &wallet {
            let doc = import_from_trusted_source(&conn, &account(), source_doc, today()).unwrap();
            assert_eq!(doc.status, DocumentStatus::Verified);
            assert_eq!(doc.confidence, TRUSTED_SOURCE_CONFIDENCE);
            assert_eq!(doc.origin, DocumentOrigin::Digilocker);
            assert_eq!(doc.decided_by, Some(DecisionOrigin::TrustedImport));
            assert!(doc
                .reviewer_notes
                .as_deref()
                .unwrap()
                .contains(&source_doc.issuer));
        }
    }

    #[test]
    fn upload_fulfils_oldest_matching_request() {
        let conn = open_memory_store().unwrap();
        let acct = account();
        let request = DocumentRequest {
            id: Uuid::new_v4(),
            hr_name: "Sarah".into(),
            hr_email: "sarah@techcorp.com".into(),
            candidate_name: "Emma".into(),
            candidate_email: acct.email.clone(),
            doc_type: DocumentType::DegreeCertificate,
            notes: "Need the bachelor degree certificate".into(),
            request_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            status: RequestStatus::Open,
        };
        requests::insert_request(&conn, &request).unwrap();

        submit_upload(&conn, &acct, &upload_form(), today()).unwrap();

        let stored = requests::get_request(&conn, &request.id).unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Fulfilled);
    }

    #[test]
    fn upload_of_unrequested_type_leaves_requests_open() {
        let conn = open_memory_store().unwrap();
        let acct = account();
        let request = DocumentRequest {
            id: Uuid::new_v4(),
            hr_name: "Sarah".into(),
            hr_email: "sarah@techcorp.com".into(),
            candidate_name: "Emma".into(),
            candidate_email: acct.email.clone(),
            doc_type: DocumentType::SkillCertificate,
            notes: String::new(),
            request_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            status: RequestStatus::Open,
        };
        requests::insert_request(&conn, &request).unwrap();

        submit_upload(&conn, &acct, &upload_form(), today()).unwrap();

        let stored = requests::get_request(&conn, &request.id).unwrap().unwrap();
        assert!(stored.is_open());
    }
}
