//! Export — renders the current derived view to CSV, JSON, or a plain-text
//! report. Pure functions of the result slice, no network access.

use anyhow::{Context, Result};

use crate::results::analytics::{recommendation, score_band};
use crate::results::AnalysisResult;

/// Delimited-text export with the same columns as the results table.
pub fn to_csv(results: &[AnalysisResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Score",
        "Name",
        "Role",
        "Company",
        "Duration",
        "Education",
        "Summary",
    ])?;
    for r in results {
        writer.write_record([
            r.score.to_string().as_str(),
            &r.name,
            &r.role,
            &r.company,
            &r.duration,
            &r.education,
            &r.summary,
        ])?;
    }
    let bytes = writer.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Pretty-printed JSON export of the full result objects.
pub fn to_json(results: &[AnalysisResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("failed to serialize results")
}

/// Formatted plain-text report with a score band and recommendation per
/// candidate.
pub fn to_report(results: &[AnalysisResult]) -> String {
    let mut out = String::new();
    out.push_str("CV ANALYSIS REPORT\n");
    out.push_str("==================\n\n");
    out.push_str(&format!("Candidates evaluated: {}\n\n", results.len()));

    for (rank, r) in results.iter().enumerate() {
        out.push_str(&format!(
            "#{} {} — {}/100 ({})\n",
            rank + 1,
            r.name,
            r.score,
            score_band(r.score)
        ));
        out.push_str(&format!("   {} at {} ({})\n", r.role, r.company, r.duration));
        out.push_str(&format!("   Education: {}\n", r.education));
        out.push_str(&format!("   Recommendation: {}\n", recommendation(r.score)));
        out.push_str(&format!("   Summary: {}\n", r.summary));
        out.push_str(&format!("   File: {}\n\n", r.file_name));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, score: u32, summary: &str) -> AnalysisResult {
        AnalysisResult {
            file_name: format!("{name}.pdf"),
            name: name.to_string(),
            role: "Scientist".to_string(),
            company: "Acme".to_string(),
            duration: "2 years".to_string(),
            education: "PhD".to_string(),
            score,
            summary: summary.to_string(),
            rationale: String::new(),
            text_preview: String::new(),
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_result() {
        let csv = to_csv(&[result("Alice", 82, "Strong"), result("Bob", 47, "Fair")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Score,Name,Role"));
        assert!(lines[1].starts_with("82,Alice"));
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let csv = to_csv(&[result("Alice", 82, "Python, R, and SQL")]).unwrap();
        assert!(csv.contains("\"Python, R, and SQL\""));
    }

    #[test]
    fn test_json_round_trips() {
        let results = vec![result("Alice", 82, "Strong")];
        let json = to_json(&results).unwrap();
        let back: Vec<AnalysisResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results);
    }

    #[test]
    fn test_report_lists_candidates_in_order_with_bands() {
        let report = to_report(&[result("Alice", 91, "Strong"), result("Bob", 47, "Fair")]);
        assert!(report.contains("#1 Alice — 91/100 (Exceptional)"));
        assert!(report.contains("#2 Bob — 47/100 (Poor)"));
        assert!(report.contains("Candidates evaluated: 2"));
    }
}
