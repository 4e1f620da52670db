//! Response Parser — turns a raw completion into analysis fields.
//!
//! Never fails: an unparseable reply yields the parse-error sentinel so a bad
//! completion stays a per-document problem, not a batch-level one. Every
//! expected field substitutes a named default when absent or mistyped, and
//! the score is always clamped into [0, 100].

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN: &str = "Unknown";
pub const NO_SUMMARY: &str = "No summary available";
pub const NO_RATIONALE: &str = "No rationale available";

/// Fields the scoring capability is asked to return for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFields {
    pub name: String,
    pub role: String,
    pub company: String,
    pub duration: String,
    pub education: String,
    pub score: u32,
    pub summary: String,
    pub rationale: String,
}

impl AnalysisFields {
    /// Sentinel returned when the reply contains no parseable JSON.
    fn parse_error() -> Self {
        AnalysisFields {
            name: "Parse Error".to_string(),
            role: UNKNOWN.to_string(),
            company: UNKNOWN.to_string(),
            duration: UNKNOWN.to_string(),
            education: UNKNOWN.to_string(),
            score: 0,
            summary: "Failed to parse analysis".to_string(),
            rationale: "Response parsing failed".to_string(),
        }
    }
}

/// Locates the first `{...}` span via greedy brace matching: from the first
/// `{` to the last `}`. Mirrors how models wrap JSON in prose or fences.
pub fn find_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Parses a raw completion into `AnalysisFields`, filling defaults per field
/// and clamping the score. Idempotent on well-formed input.
pub fn parse_analysis(raw: &str) -> AnalysisFields {
    let Some(span) = find_json_object(raw) else {
        return AnalysisFields::parse_error();
    };
    let Ok(value) = serde_json::from_str::<Value>(span) else {
        return AnalysisFields::parse_error();
    };

    AnalysisFields {
        name: str_field(&value, "name", UNKNOWN),
        role: str_field(&value, "role", UNKNOWN),
        company: str_field(&value, "company", UNKNOWN),
        duration: str_field(&value, "duration", UNKNOWN),
        education: str_field(&value, "education", UNKNOWN),
        score: score_field(&value),
        summary: str_field(&value, "summary", NO_SUMMARY),
        rationale: str_field(&value, "rationale", NO_RATIONALE),
    }
}

fn str_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Coerces the score to an integer in [0, 100]. Accepts integers, floats
/// (truncated), and numeric strings; anything else defaults to 0.
fn score_field(value: &Value) -> u32 {
    let raw = match value.get("score") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        // Numeric strings truncate the same way floats do.
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    };
    raw.unwrap_or(0).clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "name": "Jane Doe",
        "role": "Data Scientist",
        "company": "Acme Bio",
        "duration": "2 years",
        "education": "PhD in Statistics",
        "score": 82,
        "summary": "Strong modeling background",
        "rationale": "Exact role match with required skills"
    }"#;

    #[test]
    fn test_well_formed_response_parses_all_fields() {
        let fields = parse_analysis(WELL_FORMED);
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.role, "Data Scientist");
        assert_eq!(fields.company, "Acme Bio");
        assert_eq!(fields.score, 82);
        assert_eq!(fields.summary, "Strong modeling background");
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_analysis(WELL_FORMED), parse_analysis(WELL_FORMED));
    }

    #[test]
    fn test_json_embedded_in_prose_is_found() {
        let raw = format!("Sure! Here is the analysis:\n```json\n{WELL_FORMED}\n```\nHope it helps.");
        let fields = parse_analysis(&raw);
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.score, 82);
    }

    #[test]
    fn test_score_above_100_clamps_to_100() {
        let fields = parse_analysis(r#"{"score": 150}"#);
        assert_eq!(fields.score, 100);
    }

    #[test]
    fn test_negative_score_clamps_to_0() {
        let fields = parse_analysis(r#"{"score": -20}"#);
        assert_eq!(fields.score, 0);
    }

    #[test]
    fn test_missing_score_defaults_to_0() {
        let fields = parse_analysis(r#"{"name": "Jane"}"#);
        assert_eq!(fields.score, 0);
    }

    #[test]
    fn test_numeric_string_score_is_coerced() {
        let fields = parse_analysis(r#"{"score": "73"}"#);
        assert_eq!(fields.score, 73);
    }

    #[test]
    fn test_float_string_score_is_truncated() {
        let fields = parse_analysis(r#"{"score": "82.5"}"#);
        assert_eq!(fields.score, 82);
        let fields = parse_analysis(r#"{"score": "not a number"}"#);
        assert_eq!(fields.score, 0);
    }

    #[test]
    fn test_float_score_is_truncated() {
        let fields = parse_analysis(r#"{"score": 66.9}"#);
        assert_eq!(fields.score, 66);
    }

    #[test]
    fn test_missing_fields_get_named_defaults() {
        let fields = parse_analysis(r#"{"score": 50}"#);
        assert_eq!(fields.name, UNKNOWN);
        assert_eq!(fields.role, UNKNOWN);
        assert_eq!(fields.summary, NO_SUMMARY);
        assert_eq!(fields.rationale, NO_RATIONALE);
    }

    #[test]
    fn test_mistyped_fields_get_defaults() {
        let fields = parse_analysis(r#"{"name": 42, "role": ["a"], "score": {"x": 1}}"#);
        assert_eq!(fields.name, UNKNOWN);
        assert_eq!(fields.role, UNKNOWN);
        assert_eq!(fields.score, 0);
    }

    #[test]
    fn test_no_json_yields_parse_error_sentinel() {
        let fields = parse_analysis("I cannot evaluate this CV.");
        assert_eq!(fields.name, "Parse Error");
        assert_eq!(fields.score, 0);
        assert!(!fields.rationale.is_empty());
    }

    #[test]
    fn test_invalid_json_yields_parse_error_sentinel() {
        let fields = parse_analysis("{not valid json}");
        assert_eq!(fields.name, "Parse Error");
        assert_eq!(fields.score, 0);
    }

    #[test]
    fn test_find_json_object_is_greedy() {
        assert_eq!(
            find_json_object("x {\"a\": {\"b\": 1}} y"),
            Some("{\"a\": {\"b\": 1}}")
        );
        assert_eq!(find_json_object("no braces"), None);
        assert_eq!(find_json_object("} reversed {"), None);
    }
}
