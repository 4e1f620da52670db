//! Screening — the analysis pipeline: prompt construction, priority
//! extraction, batch orchestration, and response parsing.

pub mod handlers;
pub mod orchestrator;
pub mod parser;
pub mod priorities;
pub mod prompt;
pub mod prompts;
