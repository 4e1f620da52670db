//! Analytics — presentation helpers over a result slice: score distribution
//! buckets and a word-frequency "skills cloud". Cosmetic utilities outside
//! the orchestration core.

use std::collections::HashMap;

use serde::Serialize;

use crate::results::AnalysisResult;

/// The scoring bands shared by the chart, the report, and the detail view.
const BANDS: [(u32, u32, &str); 5] = [
    (85, 100, "Exceptional"),
    (70, 84, "Good"),
    (55, 69, "Fair"),
    (35, 54, "Poor"),
    (0, 34, "Very Poor"),
];

/// Band label for a single score.
pub fn score_band(score: u32) -> &'static str {
    BANDS
        .iter()
        .find(|(min, max, _)| score >= *min && score <= *max)
        .map(|(_, _, label)| *label)
        .unwrap_or("Very Poor")
}

/// Interview recommendation derived from the score band.
pub fn recommendation(score: u32) -> &'static str {
    if score >= 85 {
        "Strongly recommend for interview"
    } else if score >= 70 {
        "Recommend for interview"
    } else if score >= 55 {
        "Consider for interview if no better candidates"
    } else if score >= 35 {
        "Not recommended unless urgent need"
    } else {
        "Do not consider"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBucket {
    pub label: String,
    pub min: u32,
    pub max: u32,
    pub count: usize,
}

/// Counts results per scoring band, highest band first.
pub fn score_distribution(results: &[AnalysisResult]) -> Vec<ScoreBucket> {
    BANDS
        .iter()
        .map(|(min, max, label)| ScoreBucket {
            label: format!("{min}-{max} ({label})"),
            min: *min,
            max: *max,
            count: results
                .iter()
                .filter(|r| r.score >= *min && r.score <= *max)
                .count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTag {
    pub word: String,
    pub count: usize,
}

/// Common English words excluded from the skills cloud.
const STOP_WORDS: [&str; 40] = [
    "this", "that", "with", "have", "will", "from", "they", "been", "good", "much", "some",
    "time", "very", "when", "just", "into", "than", "more", "other", "about", "many", "then",
    "them", "these", "only", "would", "could", "there", "their", "what", "which", "also",
    "over", "such", "experience", "candidate", "strong", "years", "role", "skills",
];

/// Word-frequency cloud over summaries and roles. Ties break alphabetically
/// so the output is deterministic.
pub fn skills_cloud(results: &[AnalysisResult], limit: usize) -> Vec<SkillTag> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for r in results {
        let text = format!("{} {}", r.summary, r.role).to_lowercase();
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.len() > 3 && !STOP_WORDS.contains(&word) {
                *counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut tags: Vec<SkillTag> = counts
        .into_iter()
        .map(|(word, count)| SkillTag { word, count })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then(a.word.cmp(&b.word)));
    tags.truncate(limit);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32, summary: &str) -> AnalysisResult {
        AnalysisResult {
            file_name: "cv.pdf".to_string(),
            name: "X".to_string(),
            role: "Scientist".to_string(),
            company: "Acme".to_string(),
            duration: String::new(),
            education: String::new(),
            score,
            summary: summary.to_string(),
            rationale: String::new(),
            text_preview: String::new(),
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_band(100), "Exceptional");
        assert_eq!(score_band(85), "Exceptional");
        assert_eq!(score_band(84), "Good");
        assert_eq!(score_band(55), "Fair");
        assert_eq!(score_band(54), "Poor");
        assert_eq!(score_band(0), "Very Poor");
    }

    #[test]
    fn test_distribution_counts_each_result_exactly_once() {
        let results = vec![result(90, ""), result(72, ""), result(60, ""), result(10, "")];
        let dist = score_distribution(&results);
        let total: usize = dist.iter().map(|b| b.count).sum();
        assert_eq!(total, results.len());
        assert_eq!(dist[0].count, 1); // 85-100
        assert_eq!(dist[4].count, 1); // 0-34
    }

    #[test]
    fn test_skills_cloud_counts_and_orders_words() {
        let results = vec![
            result(80, "python machine learning"),
            result(70, "python laboratory work"),
        ];
        let tags = skills_cloud(&results, 10);
        assert_eq!(tags[0].word, "python");
        assert_eq!(tags[0].count, 2);
    }

    #[test]
    fn test_skills_cloud_skips_stop_words_and_short_words() {
        let results = vec![result(80, "this is a very strong ML fit")];
        let tags = skills_cloud(&results, 10);
        assert!(tags.iter().all(|t| t.word != "this"));
        assert!(tags.iter().all(|t| t.word != "very"));
        assert!(tags.iter().all(|t| t.word.len() > 3));
    }

    #[test]
    fn test_skills_cloud_respects_limit() {
        let results = vec![result(80, "alpha bravo charlie delta echo foxtrot golf")];
        assert_eq!(skills_cloud(&results, 3).len(), 3);
    }
}
