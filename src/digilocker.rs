//! DigiLocker integration port.
//!
//! DigiLocker is a government-backed digital document wallet; documents
//! fetched from it arrive pre-verified by the issuing authority. The
//! portal talks to it only through the `DocumentSource` trait, with a
//! simulated implementation standing in for the real OAuth + fetch flow.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DocumentType;

/// A document as listed by the external source, before import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Identifier within the source, not a portal document id.
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub doc_type: DocumentType,
    pub verified: bool,
}

/// Errors from the document source boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("ABC ID is required")]
    MissingAbcId,
    #[error("DigiLocker is not connected")]
    NotConnected,
    #[error("Unknown DigiLocker document: {0}")]
    UnknownDocument(String),
}

/// External document source boundary.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Establish the link using the holder's ABC id.
    async fn connect(&self, abc_id: &str) -> Result<(), SourceError>;

    /// List documents available for import.
    async fn available_documents(&self) -> Result<Vec<SourceDocument>, SourceError>;
}

/// Simulated DigiLocker: a fixed five-document wallet and a timed
/// connect handshake. No network traffic leaves the process.
pub struct SimulatedDigiLocker {
    connect_delay: Duration,
}

impl SimulatedDigiLocker {
    pub fn new(connect_delay: Duration) -> Self {
        Self { connect_delay }
    }

    /// Zero-delay source for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for SimulatedDigiLocker {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl DocumentSource for SimulatedDigiLocker {
    async fn connect(&self, abc_id: &str) -> Result<(), SourceError> {
        if abc_id.trim().is_empty() {
            return Err(SourceError::MissingAbcId);
        }
        // Stands in for the OAuth round trip.
        tokio::time::sleep(self.connect_delay).await;
        tracing::info!("DigiLocker handshake complete");
        Ok(())
    }

    async fn available_documents(&self) -> Result<Vec<SourceDocument>, SourceError> {
        Ok(wallet_catalog())
    }
}

/// The demo wallet contents every connected account sees.
fn wallet_catalog() -> Vec<SourceDocument> {
    let doc = |id: &str, name: &str, issuer: &str, date: (i32, u32, u32), doc_type| {
        SourceDocument {
            id: id.to_string(),
            name: name.to_string(),
            issuer: issuer.to_string(),
            issue_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .expect("catalog dates are valid"),
            doc_type,
            verified: true,
        }
    };

    vec![
        doc(
            "dl-aadhaar",
            "Aadhaar Card",
            "UIDAI",
            (2018, 3, 15),
            DocumentType::IdentityProof,
        ),
        doc(
            "dl-pan",
            "PAN Card",
            "Income Tax Department",
            (2017, 8, 22),
            DocumentType::IdentityProof,
        ),
        doc(
            "dl-license",
            "Driving License",
            "RTO Delhi",
            (2019, 11, 8),
            DocumentType::IdentityProof,
        ),
        doc(
            "dl-degree",
            "Degree Certificate - B.Tech",
            "ABC University",
            (2020, 7, 15),
            DocumentType::DegreeCertificate,
        ),
        doc(
            "dl-class12",
            "Class 12 Certificate",
            "CBSE",
            (2016, 5, 20),
            DocumentType::AcademicTranscripts,
        ),
    ]
}
