//! Result Store — canonical owner of the analysis result collection.
//!
//! The store holds exactly one `AnalysisResult` per submitted document.
//! Everything presented to callers (filtered, sorted, paged views, exports,
//! analytics) is derived from it on demand and never kept as a second source
//! of truth.

pub mod analytics;
pub mod export;
pub mod handlers;
pub mod view;

use serde::{Deserialize, Serialize};

use crate::screening::parser::AnalysisFields;

/// Number of characters of extracted text kept for the detail view.
const TEXT_PREVIEW_CHARS: usize = 500;

/// One analysis outcome per candidate document, immutable once created.
/// `file_name` is the reference back to the source document in the session
/// queue. A failed pipeline stage produces a sentinel instead of dropping
/// the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_name: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub duration: String,
    pub education: String,
    pub score: u32,
    pub summary: String,
    pub rationale: String,
    /// First 500 characters of the extracted text.
    pub text_preview: String,
}

impl AnalysisResult {
    pub fn from_fields(file_name: &str, fields: AnalysisFields, extracted_text: &str) -> Self {
        AnalysisResult {
            file_name: file_name.to_string(),
            name: fields.name,
            role: fields.role,
            company: fields.company,
            duration: fields.duration,
            education: fields.education,
            score: fields.score,
            summary: fields.summary,
            rationale: fields.rationale,
            text_preview: extracted_text.chars().take(TEXT_PREVIEW_CHARS).collect(),
        }
    }

    /// Diagnostic sentinel for a document whose extraction or scoring failed.
    pub fn failed(file_name: &str, reason: &str) -> Self {
        AnalysisResult {
            file_name: file_name.to_string(),
            name: "Unknown".to_string(),
            role: "Analysis Failed".to_string(),
            company: "Unknown".to_string(),
            duration: "Unknown".to_string(),
            education: "Unknown".to_string(),
            score: 0,
            summary: "Failed to analyze this CV".to_string(),
            rationale: reason.to_string(),
            text_preview: String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.role == "Analysis Failed"
    }
}

/// Exclusive owner of the canonical result collection for one session.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    results: Vec<AnalysisResult>,
}

impl ResultStore {
    /// Replaces the whole collection with a fresh analysis run.
    pub fn replace(&mut self, results: Vec<AnalysisResult>) {
        self.results = results;
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn all(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
