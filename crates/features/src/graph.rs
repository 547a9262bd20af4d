//! Terms of the graph (title keyword) formula.
//!
//! These mirror what the Cypher recommendation query computes, so the
//! in-memory and Neo4j paths agree.

use careermatch_ontology::Ontology;

/// Exact (case-insensitive) share of required skills the user lists.
pub fn direct_skill_match(user_skills: &[String], required_skills: &[String]) -> f64 {
    if required_skills.is_empty() {
        return 0.0;
    }
    let user: Vec<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();
    let matched = required_skills
        .iter()
        .filter(|r| user.contains(&r.to_lowercase()))
        .count();
    matched as f64 / required_skills.len() as f64 * 100.0
}

/// 100 for the same industry, 80 when one is a (transitive) sub-industry
/// of the other.
pub fn graph_industry_match(ontology: &Ontology, preferred: &str, job_industry: &str) -> f64 {
    if preferred.to_lowercase() == job_industry.to_lowercase() {
        100.0
    } else if ontology.is_sub_industry(job_industry, preferred)
        || ontology.is_sub_industry(preferred, job_industry)
    {
        80.0
    } else {
        0.0
    }
}

/// 100 when the requirement is met, a flat 50 above `close_ratio` of it.
pub fn stepped_experience_match(user_years: u32, required_years: u32, close_ratio: f64) -> f64 {
    let user = f64::from(user_years);
    let required = f64::from(required_years);

    if user >= required {
        100.0
    } else if user >= required * close_ratio {
        50.0
    } else {
        0.0
    }
}

/// Role keywords contained in the lowercased job title.
pub fn title_keyword_matches<'a>(keywords: &'a [String], job_title: &str) -> Vec<&'a str> {
    let title = job_title.to_lowercase();
    keywords
        .iter()
        .filter(|k| title.contains(&k.to_lowercase()))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::extract_keywords;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_direct_skill_match_is_exact() {
        let user = strings(&["javascript", "Spark"]);
        let required = strings(&["Java", "JavaScript", "Apache Spark", "Spark"]);
        assert_eq!(direct_skill_match(&user, &required), 50.0);
        assert_eq!(direct_skill_match(&user, &[]), 0.0);
    }

    #[test]
    fn test_graph_industry_match() {
        let o = Ontology::builtin();
        assert_eq!(graph_industry_match(o, "Technology", "TECHNOLOGY"), 100.0);
        assert_eq!(graph_industry_match(o, "Software", "Technology"), 80.0);
        assert_eq!(graph_industry_match(o, "Technology", "Cloud Computing"), 80.0);
        assert_eq!(graph_industry_match(o, "Gaming", "Technology"), 0.0);
    }

    #[test]
    fn test_stepped_experience() {
        assert_eq!(stepped_experience_match(4, 4, 0.7), 100.0);
        assert_eq!(stepped_experience_match(3, 4, 0.7), 50.0);
        assert_eq!(stepped_experience_match(1, 4, 0.7), 0.0);
    }

    #[test]
    fn test_title_keyword_matches() {
        let keywords = extract_keywords("Frontend Dev");
        assert_eq!(
            title_keyword_matches(&keywords, "Senior Frontend Engineer"),
            vec!["front", "end"]
        );
        assert!(title_keyword_matches(&keywords, "Data Scientist").is_empty());
        assert!(title_keyword_matches(&[], "Anything").is_empty());
    }
}
