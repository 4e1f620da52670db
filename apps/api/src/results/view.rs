//! Result View — filtered, sorted, paginated projections of the canonical
//! result collection. Recomputed from scratch on every query so no ordering
//! or filter state leaks between requests.

use serde::{Deserialize, Serialize};

use crate::results::AnalysisResult;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sortable result fields. Score sorts descending; strings ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Score,
    Name,
    Role,
    Company,
    Education,
}

/// Conjunctive filter set over the canonical collection.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub min_score: u32,
    pub search: String,
    pub skill_tags: Vec<String>,
    pub education_tags: Vec<String>,
}

/// Query parameters for a derived view. Tag lists arrive comma-separated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    pub min_score: u32,
    pub search: String,
    pub skills: String,
    pub education: String,
    pub sort: SortField,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        ViewQuery {
            min_score: 0,
            search: String::new(),
            skills: String::new(),
            education: String::new(),
            sort: SortField::Score,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewQuery {
    pub fn filters(&self) -> Filters {
        Filters {
            min_score: self.min_score,
            search: self.search.clone(),
            skill_tags: split_tags(&self.skills),
            education_tags: split_tags(&self.education),
        }
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// One page of a derived view, plus enough bookkeeping to render pagination.
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub entries: Vec<AnalysisResult>,
}

/// Computes a full derived view: filter, sort, then page.
pub fn build_view(results: &[AnalysisResult], query: &ViewQuery) -> ResultPage {
    let mut filtered = apply_filters(results, &query.filters());
    sort_results(&mut filtered, query.sort);

    let page_size = if query.page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        query.page_size
    };
    let total = filtered.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let entries: Vec<AnalysisResult> = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    ResultPage {
        total,
        page,
        page_size,
        total_pages,
        entries,
    }
}

/// Applies all filters conjunctively. An empty search text matches everything;
/// empty tag lists impose no constraint.
pub fn apply_filters(results: &[AnalysisResult], filters: &Filters) -> Vec<AnalysisResult> {
    let search = filters.search.to_lowercase();
    results
        .iter()
        .filter(|r| r.score >= filters.min_score)
        .filter(|r| matches_search(r, &search))
        .filter(|r| matches_skill_tags(r, &filters.skill_tags))
        .filter(|r| matches_education_tags(r, &filters.education_tags))
        .cloned()
        .collect()
}

fn matches_search(r: &AnalysisResult, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    r.name.to_lowercase().contains(search)
        || r.role.to_lowercase().contains(search)
        || r.company.to_lowercase().contains(search)
        || r.summary.to_lowercase().contains(search)
}

/// At least one active skill tag must appear in the summary or rationale.
fn matches_skill_tags(r: &AnalysisResult, tags: &[String]) -> bool {
    if tags.is_empty() {
        return true;
    }
    let haystack = format!("{} {}", r.summary, r.rationale).to_lowercase();
    tags.iter()
        .any(|t| haystack.contains(&t.to_lowercase()))
}

/// At least one active education tag (underscores read as spaces) must appear
/// in the education field.
fn matches_education_tags(r: &AnalysisResult, tags: &[String]) -> bool {
    if tags.is_empty() {
        return true;
    }
    let education = r.education.to_lowercase();
    tags.iter()
        .any(|t| education.contains(&t.replace('_', " ").to_lowercase()))
}

/// Stable sort on one field. Score sorts descending by value; string fields
/// ascending, case-insensitively. Always applied to a freshly filtered copy,
/// so prior sort state cannot leak in.
///
/// String order is lowercased code-point order, not locale collation:
/// accented names sort after 'z' rather than next to their base letter.
pub fn sort_results(results: &mut [AnalysisResult], field: SortField) {
    match field {
        SortField::Score => results.sort_by(|a, b| b.score.cmp(&a.score)),
        SortField::Name => results.sort_by_key(|r| r.name.to_lowercase()),
        SortField::Role => results.sort_by_key(|r| r.role.to_lowercase()),
        SortField::Company => results.sort_by_key(|r| r.company.to_lowercase()),
        SortField::Education => results.sort_by_key(|r| r.education.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, score: u32, summary: &str, education: &str) -> AnalysisResult {
        AnalysisResult {
            file_name: format!("{name}.pdf"),
            name: name.to_string(),
            role: "Scientist".to_string(),
            company: "Acme".to_string(),
            duration: "2 years".to_string(),
            education: education.to_string(),
            score,
            summary: summary.to_string(),
            rationale: String::new(),
            text_preview: String::new(),
        }
    }

    fn sample() -> Vec<AnalysisResult> {
        vec![
            result("Alice", 82, "Python and machine learning", "PhD in Biology"),
            result("Bob", 47, "Laboratory automation", "MS in Chemistry"),
            result("Carol", 91, "Python, leadership, CRISPR", "PhD in Genetics"),
            result("Dave", 30, "Junior analyst", "BS in Physics"),
        ]
    }

    #[test]
    fn test_min_score_filter() {
        let filters = Filters {
            min_score: 70,
            ..Default::default()
        };
        let out = apply_filters(&sample(), &filters);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.score >= 70));
    }

    #[test]
    fn test_search_matches_any_text_field_case_insensitively() {
        let filters = Filters {
            search: "PYTHON".to_string(),
            ..Default::default()
        };
        let out = apply_filters(&sample(), &filters);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let out = apply_filters(&sample(), &Filters::default());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_adding_a_skill_tag_narrows_the_result_set() {
        let base = Filters {
            min_score: 70,
            ..Default::default()
        };
        let first = apply_filters(&sample(), &base);

        let narrowed_filters = Filters {
            min_score: 70,
            skill_tags: vec!["leadership".to_string()],
            ..Default::default()
        };
        let narrowed = apply_filters(&sample(), &narrowed_filters);

        // Conjunctive: the narrowed set must be a subset of the first.
        assert!(narrowed.len() <= first.len());
        for r in &narrowed {
            assert!(first.iter().any(|f| f.name == r.name));
        }
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].name, "Carol");
    }

    #[test]
    fn test_education_tags_replace_underscores_with_spaces() {
        let filters = Filters {
            education_tags: vec!["phd_in_genetics".to_string()],
            ..Default::default()
        };
        let out = apply_filters(&sample(), &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Carol");
    }

    #[test]
    fn test_any_of_multiple_education_tags_matches() {
        let filters = Filters {
            education_tags: vec!["ms".to_string(), "bs".to_string()],
            ..Default::default()
        };
        let out = apply_filters(&sample(), &filters);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_score_sorts_descending() {
        let mut results = sample();
        sort_results(&mut results, SortField::Score);
        let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![91, 82, 47, 30]);
    }

    #[test]
    fn test_name_sorts_ascending() {
        let mut results = sample();
        sort_results(&mut results, SortField::Score);
        sort_results(&mut results, SortField::Name);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_sort_is_independent_of_prior_sort_state() {
        let mut a = sample();
        sort_results(&mut a, SortField::Education);
        sort_results(&mut a, SortField::Name);

        let mut b = sample();
        sort_results(&mut b, SortField::Name);

        let names_a: Vec<&str> = a.iter().map(|r| r.name.as_str()).collect();
        let names_b: Vec<&str> = b.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let mut results = vec![
            result("First", 50, "", ""),
            result("Second", 50, "", ""),
            result("Third", 50, "", ""),
        ];
        sort_results(&mut results, SortField::Score);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_pagination_slices_and_clamps() {
        let results = sample();
        let query = ViewQuery {
            page: 1,
            page_size: 3,
            ..Default::default()
        };
        let page = build_view(&results, &query);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.entries.len(), 3);

        let past_end = ViewQuery {
            page: 99,
            page_size: 3,
            ..Default::default()
        };
        let page = build_view(&results, &past_end);
        assert_eq!(page.page, 2);
        assert_eq!(page.entries.len(), 1);
    }

    #[test]
    fn test_empty_collection_pages_to_one_empty_page() {
        let page = build_view(&[], &ViewQuery::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_zero_page_size_falls_back_to_default() {
        let query = ViewQuery {
            page_size: 0,
            ..Default::default()
        };
        let page = build_view(&sample(), &query);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_tag_splitting() {
        let query = ViewQuery {
            skills: "python, crispr ,,ml".to_string(),
            ..Default::default()
        };
        assert_eq!(query.filters().skill_tags, vec!["python", "crispr", "ml"]);
    }
}
