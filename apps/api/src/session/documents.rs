//! Candidate document queue and admission rules.
//!
//! Admission failures are per-file and reported back to the caller; the
//! offending file is simply excluded, never fatal to the session.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::extract::DocumentFormat;

pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_DOCUMENTS: usize = 200;

/// A user-submitted candidate file awaiting analysis.
/// `data` is `Bytes` so cloning a queue for a batch run never copies blobs.
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub file_name: String,
    pub size_bytes: usize,
    pub format: DocumentFormat,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionError {
    #[error("unsupported file format — only PDF, DOC, and DOCX are accepted")]
    UnsupportedFormat,

    #[error("file exceeds the 10 MiB size limit")]
    FileTooLarge,

    #[error("a file with the same name and size is already queued")]
    DuplicateFile,

    #[error("session already holds the maximum of 200 documents")]
    TooManyFiles,
}

/// Ordered queue of admitted documents for one session.
#[derive(Debug, Clone, Default)]
pub struct DocumentQueue {
    documents: Vec<CandidateDocument>,
}

impl DocumentQueue {
    /// Validates and enqueues one file. Rejections leave the queue unchanged.
    pub fn admit(&mut self, file_name: &str, data: Bytes) -> Result<(), AdmissionError> {
        let format =
            DocumentFormat::from_file_name(file_name).ok_or(AdmissionError::UnsupportedFormat)?;

        let size_bytes = data.len();
        if size_bytes > MAX_FILE_BYTES {
            return Err(AdmissionError::FileTooLarge);
        }
        if self
            .documents
            .iter()
            .any(|d| d.file_name == file_name && d.size_bytes == size_bytes)
        {
            return Err(AdmissionError::DuplicateFile);
        }
        if self.documents.len() >= MAX_DOCUMENTS {
            return Err(AdmissionError::TooManyFiles);
        }

        self.documents.push(CandidateDocument {
            file_name: file_name.to_string(),
            size_bytes,
            format,
            data,
        });
        Ok(())
    }

    /// Removes every queued document with the given name.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, file_name: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.file_name != file_name);
        self.documents.len() != before
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn documents(&self) -> &[CandidateDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
