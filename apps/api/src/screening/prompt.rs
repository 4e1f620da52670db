//! Prompt Builder — assembles the CV analysis prompt from explicit inputs.
//!
//! Pure function of (title, description, candidate text, priorities, weights):
//! identical inputs always produce byte-identical prompt text, because the
//! remote capability's output quality depends on exact rubric wording.
//! The weight configuration changes only the point values embedded in the
//! scoring criteria, never the section structure.

use serde::{Deserialize, Serialize};

use crate::screening::priorities::PriorityProfile;
use crate::screening::prompts::{
    ANALYSIS_HEADER, ANALYSIS_RESPONSE_FORMAT, STRICT_SCORING_GUIDELINES,
};

/// Per-category scoring weights. Must sum to exactly 100 before a batch
/// analysis is allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub role_match: u32,
    pub experience: u32,
    pub skills: u32,
    pub education: u32,
    pub achievements: u32,
}

impl Default for WeightConfig {
    fn default() -> Self {
        WeightConfig {
            role_match: 30,
            experience: 25,
            skills: 20,
            education: 20,
            achievements: 5,
        }
    }
}

impl WeightConfig {
    pub fn sum(&self) -> u32 {
        self.role_match + self.experience + self.skills + self.education + self.achievements
    }

    /// Returns the offending sum when the weights do not add up to 100.
    pub fn validate(&self) -> Result<(), u32> {
        let sum = self.sum();
        if sum == 100 {
            Ok(())
        } else {
            Err(sum)
        }
    }
}

/// floor(weight * percent / 100) — point value for a partial-match tier.
fn tier(weight: u32, percent: u32) -> u32 {
    weight * percent / 100
}

/// Builds the full analysis prompt for one candidate.
///
/// With a `PriorityProfile` the deduction and bonus sections gain lines
/// derived from the extracted job priorities; without one a fixed generic
/// rubric is used. The five scoring categories are always generated from the
/// weight configuration.
pub fn build_analysis_prompt(
    job_title: &str,
    job_description: &str,
    candidate_text: &str,
    priorities: Option<&PriorityProfile>,
    weights: &WeightConfig,
) -> String {
    let mut p = String::with_capacity(4096);

    p.push_str(ANALYSIS_HEADER);
    p.push_str("\n\nJOB TITLE: ");
    p.push_str(job_title);
    p.push_str("\nJOB DESCRIPTION: ");
    p.push_str(job_description);
    p.push_str("\n\nCV TEXT:\n");
    p.push_str(candidate_text);
    p.push_str("\n\n");

    push_scoring_criteria(&mut p, priorities, weights);
    push_deductions(&mut p, priorities);
    push_bonus_factors(&mut p, priorities);

    p.push_str(STRICT_SCORING_GUIDELINES);
    p.push_str("\n\n");
    p.push_str(ANALYSIS_RESPONSE_FORMAT);

    p
}

fn push_scoring_criteria(
    p: &mut String,
    priorities: Option<&PriorityProfile>,
    weights: &WeightConfig,
) {
    if priorities.is_some() {
        p.push_str("DYNAMIC SCORING CRITERIA (based on job requirements):\n\n");
    } else {
        p.push_str("EVALUATION CRITERIA (be very strict):\n\n");
    }

    let w = weights.role_match;
    p.push_str(&format!(
        "1. ROLE MATCH ({w}% of score):\n\
         \x20  - Exact title match: +{w} points\n\
         \x20  - Very similar role: +{} points\n\
         \x20  - Related role: +{} points\n\
         \x20  - Unrelated role: 0 points\n\n",
        tier(w, 70),
        tier(w, 30),
    ));

    let w = weights.experience;
    p.push_str(&format!(
        "2. EXPERIENCE RELEVANCE ({w}% of score):\n\
         \x20  - 5+ years in exact field: +{w} points\n\
         \x20  - 3-4 years in exact field: +{} points\n\
         \x20  - 2-3 years in exact field: +{} points\n\
         \x20  - 1-2 years in exact field: +{} points\n\
         \x20  - Less than 1 year: +{} points\n\
         \x20  - No relevant experience: 0 points\n\n",
        tier(w, 80),
        tier(w, 60),
        tier(w, 40),
        tier(w, 20),
    ));

    let w = weights.skills;
    p.push_str(&format!(
        "3. SKILLS MATCH ({w}% of score):\n\
         \x20  - All required skills present: +{w} points\n\
         \x20  - Most required skills present: +{} points\n\
         \x20  - Some required skills present: +{} points\n\
         \x20  - Few required skills present: +{} points\n\
         \x20  - No required skills: 0 points\n",
        tier(w, 75),
        tier(w, 50),
        tier(w, 25),
    ));
    let required = priorities
        .map(|pr| pr.required_skills.as_slice())
        .unwrap_or(&[]);
    if required.is_empty() {
        p.push_str("\n   Required skills to check: None specified\n\n");
    } else {
        p.push_str(&format!(
            "\n   Required skills to check: {}\n\n",
            required.join(", ")
        ));
    }

    let w = weights.education;
    p.push_str(&format!(
        "4. EDUCATION ({w}% of score):\n\
         \x20  - PhD in relevant field: +{w} points\n\
         \x20  - MS in relevant field: +{} points\n\
         \x20  - BS in relevant field: +{} points\n\
         \x20  - Other degree: +{} points\n\
         \x20  - No degree: 0 points\n\n",
        tier(w, 80),
        tier(w, 60),
        tier(w, 30),
    ));

    let w = weights.achievements;
    p.push_str(&format!(
        "5. ACHIEVEMENTS & IMPACT ({w}% of score):\n\
         \x20  - High impact publications: +{w} points\n\
         \x20  - Patents or innovations: +{} points\n\
         \x20  - Conference presentations: +{} points\n\
         \x20  - Leadership roles: +{} points\n\
         \x20  - No significant achievements: 0 points\n\n",
        tier(w, 80),
        tier(w, 70),
        tier(w, 60),
    ));
}

fn push_deductions(p: &mut String, priorities: Option<&PriorityProfile>) {
    p.push_str(
        "DEDUCTIONS (apply these to the final score):\n\
         - Missing required skills: -5 points per skill\n\
         - No relevant industry experience: -10 points\n\
         - No technical skills: -15 points\n\
         - Employment gaps > 6 months: -5 points\n\
         - Job hopping (multiple jobs < 1 year): -10 points\n",
    );

    if let Some(pr) = priorities {
        match pr.work_location.as_str() {
            loc @ ("onsite" | "remote" | "hybrid") => {
                p.push_str(&format!(
                    "- Cannot accommodate {loc} work arrangement: -5 points\n"
                ));
            }
            _ => {}
        }
        for flag in &pr.red_flags {
            p.push_str(&format!("- Red flag ({flag}): -5 points\n"));
        }
    }

    p.push('\n');
}

fn push_bonus_factors(p: &mut String, priorities: Option<&PriorityProfile>) {
    p.push_str("BONUS FACTORS:\n");

    match priorities {
        None => {
            p.push_str(
                "- High impact journal publications: +8 points\n\
                 - Patents or innovations: +6 points\n\
                 - Leadership roles: +4 points\n",
            );
        }
        Some(pr) => {
            if !pr.industry.is_empty() {
                p.push_str(&format!(
                    "- Direct {} experience: +10 points\n",
                    pr.industry
                ));
                let lowered = pr.industry.to_lowercase();
                if lowered.contains("biotech")
                    || lowered.contains("mrna")
                    || lowered.contains("pharma")
                {
                    p.push_str("- Industry experience (vs CRO): +5 points\n");
                }
            }
            if pr.cross_functional.is_mentioned() {
                p.push_str("- Cross-functional experience: +5 points\n");
            }
            if pr.fast_paced.is_mentioned() {
                p.push_str("- Fast-paced environment experience: +3 points\n");
            }
            if pr.team_collaboration.is_mentioned() {
                p.push_str("- Strong team collaboration track record: +4 points\n");
            }
            p.push_str("- High impact journal publications: +8 points\n");
            for factor in &pr.bonus_factors {
                p.push_str(&format!("- {factor}: +3 points\n"));
            }
        }
    }

    p.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::priorities::Mention;

    fn profile() -> PriorityProfile {
        PriorityProfile {
            industry: "biotech".to_string(),
            required_skills: vec!["Python".to_string(), "CRISPR".to_string()],
            work_location: "onsite".to_string(),
            fast_paced: Mention::Required,
            cross_functional: Mention::Preferred,
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let weights = WeightConfig::default();
        let pr = profile();
        let a = build_analysis_prompt("Data Scientist", "Build models", "CV", Some(&pr), &weights);
        let b = build_analysis_prompt("Data Scientist", "Build models", "CV", Some(&pr), &weights);
        assert_eq!(a, b);
    }

    #[test]
    fn test_weights_change_only_point_values() {
        let pr = profile();
        let base = build_analysis_prompt(
            "Data Scientist",
            "Build models",
            "CV",
            Some(&pr),
            &WeightConfig::default(),
        );
        let shifted = build_analysis_prompt(
            "Data Scientist",
            "Build models",
            "CV",
            Some(&pr),
            &WeightConfig {
                role_match: 40,
                experience: 20,
                skills: 20,
                education: 15,
                achievements: 5,
            },
        );

        // Same structure: identical section headers in identical order.
        for header in [
            "1. ROLE MATCH (",
            "2. EXPERIENCE RELEVANCE (",
            "3. SKILLS MATCH (",
            "4. EDUCATION (",
            "5. ACHIEVEMENTS & IMPACT (",
            "DEDUCTIONS",
            "BONUS FACTORS:",
        ] {
            assert!(base.contains(header), "base missing {header}");
            assert!(shifted.contains(header), "shifted missing {header}");
        }

        // Different point values.
        assert!(base.contains("1. ROLE MATCH (30% of score)"));
        assert!(shifted.contains("1. ROLE MATCH (40% of score)"));
        assert_ne!(base, shifted);
    }

    #[test]
    fn test_tier_values_use_floor() {
        // 25 * 0.7 = 17.5 → 17
        assert_eq!(tier(25, 70), 17);
        assert_eq!(tier(20, 75), 15);
        assert_eq!(tier(5, 70), 3);
    }

    #[test]
    fn test_default_rubric_used_without_priorities() {
        let prompt = build_analysis_prompt(
            "Engineer",
            "Build things",
            "CV",
            None,
            &WeightConfig::default(),
        );
        assert!(prompt.contains("EVALUATION CRITERIA (be very strict):"));
        assert!(prompt.contains("Required skills to check: None specified"));
        assert!(prompt.contains("High impact journal publications: +8 points"));
        assert!(!prompt.contains("DYNAMIC SCORING CRITERIA"));
    }

    #[test]
    fn test_priorities_add_conditional_lines() {
        let prompt = build_analysis_prompt(
            "Scientist",
            "Run assays",
            "CV",
            Some(&profile()),
            &WeightConfig::default(),
        );
        assert!(prompt.contains("DYNAMIC SCORING CRITERIA"));
        assert!(prompt.contains("Required skills to check: Python, CRISPR"));
        assert!(prompt.contains("Cannot accommodate onsite work arrangement"));
        assert!(prompt.contains("Direct biotech experience: +10 points"));
        assert!(prompt.contains("Industry experience (vs CRO): +5 points"));
        assert!(prompt.contains("Fast-paced environment experience: +3 points"));
        assert!(prompt.contains("Cross-functional experience: +5 points"));
    }

    #[test]
    fn test_weight_sum_validation() {
        assert!(WeightConfig::default().validate().is_ok());
        let over = WeightConfig {
            achievements: 10,
            ..WeightConfig::default()
        };
        assert_eq!(over.validate(), Err(105));
    }
}
