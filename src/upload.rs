//! Upload form validation.
//!
//! Uploaded files are opaque: only the declared name, size, and MIME
//! type are inspected. Content is never parsed here; judging it is the
//! verifier's job.

use std::path::Path;

use serde::Deserialize;

use crate::models::DocumentType;

/// Upload size cap, matching the portal's advertised 10 MB limit.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types the upload form accepts (PDF, common images, Word).
const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/gif",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// The upload form as submitted: file metadata plus declared type.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadForm {
    pub file_name: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub document_type: Option<DocumentType>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Field-level validation failures. Reported next to the offending
/// field and recoverable by correction: nothing is persisted on error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No file selected")]
    MissingFile,
    #[error("Document type is required")]
    TypeRequired,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("File exceeds the 10 MB limit ({0} bytes)")]
    Oversize(u64),
}

/// Validate an upload form, returning the declared document type.
pub fn validate(form: &UploadForm) -> Result<DocumentType, ValidationError> {
    if form.file_name.trim().is_empty() || form.size_bytes == 0 {
        return Err(ValidationError::MissingFile);
    }

    let doc_type = form.document_type.ok_or(ValidationError::TypeRequired)?;

    let mime = mime_guess::from_path(&form.file_name).first_or_octet_stream();
    if !ACCEPTED_MIME_TYPES.contains(&mime.essence_str()) {
        return Err(ValidationError::UnsupportedType(mime.essence_str().into()));
    }

    if form.size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::Oversize(form.size_bytes));
    }

    Ok(doc_type)
}

/// Sanitize a filename: strip path components, limit length
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect();

    if clean.is_empty() {
        "document".to_string()
    } else {
        clean
    }
}
