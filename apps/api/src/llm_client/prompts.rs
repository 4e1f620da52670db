// Cross-cutting prompt fragments shared by all scoring calls.
// Each service that builds full prompts defines its own prompts.rs alongside it.

/// System prompt for CV analysis calls — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = "You are an expert HR recruiter analyzing CVs \
    against job descriptions. Always respond with valid JSON only.";

/// System prompt for job-priority extraction calls.
pub const EXTRACTION_SYSTEM: &str = "You are an expert HR recruiter analyzing \
    job descriptions. Always respond with valid JSON only.";

/// Minimal prompt used by `test_connection`.
pub const CONNECTION_TEST_PROMPT: &str = "Respond with only the word \"SUCCESS\"";

/// Sentinel token the connection test looks for in the reply.
pub const CONNECTION_TEST_TOKEN: &str = "SUCCESS";
