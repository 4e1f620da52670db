// All prompt constants for the Screening module.
// The analysis prompt itself is assembled in `prompt.rs` because its scoring
// rubric is generated from the weight configuration; these are the fixed parts.

/// Priority extraction prompt template.
/// Replace `{job_title}` and `{job_description}` before sending.
pub const PRIORITY_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract key priorities, requirements, and scoring factors. Focus on identifying what the employer values most.

Job Title: {job_title}
Job Description: {job_description}

Please provide your analysis in the following JSON format only (no additional text):

{
  "industry": "Primary industry (e.g., 'mRNA', 'biotech', 'software', 'finance')",
  "required_skills": ["skill1", "skill2", "skill3"],
  "preferred_skills": ["skill1", "skill2"],
  "education_priority": "high/medium/low",
  "experience_priority": "high/medium/low",
  "technical_priority": "high/medium/low",
  "leadership_priority": "high/medium/low",
  "publications_priority": "high/medium/low",
  "certifications_priority": "high/medium/low",
  "work_location": "onsite/remote/hybrid",
  "team_collaboration": "required/preferred/not_mentioned",
  "fast_paced": "required/preferred/not_mentioned",
  "cross_functional": "required/preferred/not_mentioned",
  "specific_requirements": ["requirement1", "requirement2"],
  "red_flags": ["flag1", "flag2"],
  "bonus_factors": ["factor1", "factor2"]
}

Focus on:
1. Industry-specific requirements
2. Technical vs soft skills emphasis
3. Education level preferences
4. Experience requirements
5. Work environment preferences
6. Any specific technologies or methodologies mentioned
7. Leadership or management requirements
8. Publication or research requirements

Respond with ONLY the JSON object, no additional text or formatting."#;

/// Opening line of every analysis prompt.
pub const ANALYSIS_HEADER: &str = "You are a strict and experienced HR recruiter. \
Analyze the following CV against the job requirements and provide a comprehensive evaluation. \
Be very critical and thorough; only give high scores to candidates who truly excel.";

/// Fixed scoring bands appended to every analysis prompt.
pub const STRICT_SCORING_GUIDELINES: &str = r#"STRICT SCORING GUIDELINES (0-100):

95-100: EXCEPTIONAL - Perfect match, significantly exceeds all requirements, outstanding achievements
85-94: EXCELLENT - Meets all requirements with some exceeding expectations
70-84: GOOD - Meets most requirements, some gaps but strong potential
55-69: FAIR - Meets some requirements, significant gaps present
35-54: POOR - Meets few requirements, major gaps
0-34: VERY POOR - Does not meet requirements

IMPORTANT: Be very critical. Most candidates should score between 30-70. Only truly exceptional candidates should score above 80. If in doubt, score lower rather than higher."#;

/// Response schema block closing every analysis prompt.
pub const ANALYSIS_RESPONSE_FORMAT: &str = r#"Please provide your analysis in the following JSON format only (no additional text or formatting):

{
  "name": "Full name of the candidate",
  "role": "Most recent job title/role",
  "company": "Most recent company name",
  "duration": "Time in current role (e.g., '2 years', '6 months')",
  "education": "Highest education level achieved",
  "score": 65,
  "summary": "Brief summary of key qualifications and experience",
  "rationale": "Detailed explanation of why this score was given, including specific strengths and weaknesses"
}

Respond with ONLY the JSON object, no additional text or formatting."#;
