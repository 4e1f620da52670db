//! Batch Orchestrator — drives extract → build prompt → score → parse across
//! many candidate documents.
//!
//! Documents run in contiguous fixed-size batches; members of a batch run
//! concurrently, and the orchestrator pauses between batches to stay under
//! the scoring API rate limit. Every pipeline stage is wrapped so a failure
//! for one document produces that document's sentinel result — the output
//! always has exactly one result per input document, in submission order,
//! before the final canonical sort by score.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::extract::TextExtractor;
use crate::llm_client::{RemoteError, ScoringClient};
use crate::results::AnalysisResult;
use crate::screening::parser::parse_analysis;
use crate::screening::prompt::{build_analysis_prompt, WeightConfig};
use crate::session::documents::CandidateDocument;
use crate::session::JobProfile;

/// Cooperative cancellation handle, checked at each batch boundary.
/// The in-flight batch always finishes; remaining documents get sentinels.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tunable batch parameters, sourced from `Config`.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub call_timeout: Duration,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            batch_size: 5,
            batch_delay: Duration::from_millis(1000),
            call_timeout: Duration::from_secs(60),
        }
    }
}

/// Failures that abort the whole run before any batch starts.
/// Per-document failures never surface here; they become sentinel results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("scoring weights must sum to 100, got {0}")]
    InvalidWeights(u32),
}

/// Analyzes every queued document against the job profile.
///
/// Guarantees `output.len() == documents.len()`: cancelled or failed
/// documents yield diagnostic sentinels. The returned collection is the
/// canonical baseline ordering — sorted by score descending, ties keeping
/// submission order.
pub async fn analyze_all(
    documents: &[CandidateDocument],
    job: &JobProfile,
    weights: &WeightConfig,
    client: &ScoringClient,
    extractor: &dyn TextExtractor,
    options: &AnalyzeOptions,
    cancel: &CancelFlag,
) -> Result<Vec<AnalysisResult>, AnalyzeError> {
    weights.validate().map_err(AnalyzeError::InvalidWeights)?;

    let total = documents.len();
    let batch_size = options.batch_size.max(1);
    let mut results: Vec<AnalysisResult> = Vec::with_capacity(total);

    for (batch_index, batch) in documents.chunks(batch_size).enumerate() {
        if cancel.is_cancelled() {
            warn!(
                "Analysis cancelled after {}/{} documents",
                results.len(),
                total
            );
            break;
        }

        // Pace between batches, never before the first one.
        if batch_index > 0 {
            tokio::time::sleep(options.batch_delay).await;
        }

        let batch_results = join_all(
            batch
                .iter()
                .map(|doc| analyze_single(doc, job, weights, client, extractor, options.call_timeout)),
        )
        .await;
        results.extend(batch_results);

        info!("Analyzed {}/{} documents", results.len(), total);
    }

    // Cancellation sentinels keep the one-result-per-document invariant.
    while results.len() < total {
        let doc = &documents[results.len()];
        results.push(AnalysisResult::failed(
            &doc.file_name,
            "Analysis was cancelled before this document was processed",
        ));
    }

    // Canonical baseline ordering. Stable: ties keep submission order.
    results.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(results)
}

/// Runs the full pipeline for one document. Infallible by construction:
/// every stage failure is converted into a sentinel result.
async fn analyze_single(
    doc: &CandidateDocument,
    job: &JobProfile,
    weights: &WeightConfig,
    client: &ScoringClient,
    extractor: &dyn TextExtractor,
    call_timeout: Duration,
) -> AnalysisResult {
    let text = match extractor.extract(&doc.data, doc.format).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to extract text from {}: {e}", doc.file_name);
            return AnalysisResult::failed(&doc.file_name, &format!("Text extraction failed: {e}"));
        }
    };

    let prompt = build_analysis_prompt(
        &job.title,
        &job.description,
        &text,
        job.extracted_priorities.as_ref(),
        weights,
    );

    let raw = match tokio::time::timeout(call_timeout, client.score(&prompt)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            warn!("Scoring call failed for {}: {e}", doc.file_name);
            return AnalysisResult::failed(&doc.file_name, &e.to_string());
        }
        Err(_) => {
            let e = RemoteError::Timeout(call_timeout.as_secs());
            warn!("Scoring call for {} timed out", doc.file_name);
            return AnalysisResult::failed(&doc.file_name, &e.to_string());
        }
    };

    AnalysisResult::from_fields(&doc.file_name, parse_analysis(&raw), &text)
}
