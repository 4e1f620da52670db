//! Job-Priority Extractor — one upfront call that distills a free-text job
//! description into a structured priority profile consumed by the prompt
//! builder. Extraction failure is recoverable: callers fall back to the
//! default rubric rather than aborting the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::llm_client::prompts::EXTRACTION_SYSTEM;
use crate::llm_client::{RemoteError, ScoringClient};
use crate::screening::parser::find_json_object;
use crate::screening::prompts::PRIORITY_EXTRACTION_PROMPT_TEMPLATE;

/// Qualitative priority level for one evaluation dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    High,
    #[default]
    Medium,
    Low,
}

/// How strongly the job description mentions a workplace trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mention {
    Required,
    Preferred,
    #[default]
    NotMentioned,
}

impl Mention {
    pub fn is_mentioned(&self) -> bool {
        matches!(self, Mention::Required | Mention::Preferred)
    }
}

/// Structured weights and flags extracted from a job description.
/// Every field defaults so a sparse extraction reply still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityProfile {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub education_priority: PriorityLevel,
    #[serde(default)]
    pub experience_priority: PriorityLevel,
    #[serde(default)]
    pub technical_priority: PriorityLevel,
    #[serde(default)]
    pub leadership_priority: PriorityLevel,
    #[serde(default)]
    pub publications_priority: PriorityLevel,
    #[serde(default)]
    pub certifications_priority: PriorityLevel,
    /// "onsite" / "remote" / "hybrid", or empty when unstated.
    #[serde(default)]
    pub work_location: String,
    #[serde(default)]
    pub team_collaboration: Mention,
    #[serde(default)]
    pub fast_paced: Mention,
    #[serde(default)]
    pub cross_functional: Mention,
    #[serde(default)]
    pub specific_requirements: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub bonus_factors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PriorityError {
    /// The remote call itself failed. Surfaced as a top-level failure before
    /// any batch work begins.
    #[error("priority extraction call failed: {0}")]
    Remote(#[from] RemoteError),

    /// The reply contained no parseable JSON object. Non-fatal: callers fall
    /// back to default scoring.
    #[error("no valid JSON object in priority extraction response")]
    MalformedResponse,
}

/// Extracts a priority profile from the job title and description.
pub async fn extract_priorities(
    client: &ScoringClient,
    job_title: &str,
    job_description: &str,
) -> Result<PriorityProfile, PriorityError> {
    let prompt = PRIORITY_EXTRACTION_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description);

    let raw = client.complete(EXTRACTION_SYSTEM, &prompt).await?;

    let span = find_json_object(&raw).ok_or(PriorityError::MalformedResponse)?;
    let profile: PriorityProfile =
        serde_json::from_str(span).map_err(|_| PriorityError::MalformedResponse)?;

    info!(
        "Extracted job priorities: industry='{}', {} required skills",
        profile.industry,
        profile.required_skills.len()
    );
    Ok(profile)
}
