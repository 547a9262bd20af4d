//! Rule-based dimension scores.

use careermatch_model::WorkStyle;

use crate::loose_contains;

/// Required skills (in job order) that some user skill loosely matches.
pub fn matched_skills<'a>(user_skills: &[String], required_skills: &'a [String]) -> Vec<&'a str> {
    required_skills
        .iter()
        .filter(|required| user_skills.iter().any(|user| loose_contains(user, required)))
        .map(String::as_str)
        .collect()
}

/// Share of required skills matched, 0 when the job requires none.
pub fn skill_match(user_skills: &[String], required_skills: &[String]) -> f64 {
    if required_skills.is_empty() {
        return 0.0;
    }
    let matched = matched_skills(user_skills, required_skills).len();
    matched as f64 / required_skills.len() as f64 * 100.0
}

/// Full credit when the requirement is met, proportional credit above
/// `close_ratio` of it, nothing below.
pub fn experience_match(user_years: u32, required_years: u32, close_ratio: f64) -> f64 {
    let user = f64::from(user_years);
    let required = f64::from(required_years);

    if user >= required {
        100.0
    } else if user >= required * close_ratio {
        user / required * 100.0
    } else {
        0.0
    }
}

pub fn industry_match(preferred: &str, job_industry: &str) -> f64 {
    let preferred = preferred.to_lowercase();
    let job_industry = job_industry.to_lowercase();

    if preferred == job_industry {
        100.0
    } else if preferred.contains(&job_industry) || job_industry.contains(&preferred) {
        80.0
    } else {
        0.0
    }
}

pub fn work_style_match(preferred: WorkStyle, offered: &[WorkStyle]) -> f64 {
    if preferred == WorkStyle::Any
        || offered.contains(&WorkStyle::Any)
        || offered.contains(&preferred)
    {
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CLOSE_EXPERIENCE_RATIO;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skill_match_partial() {
        let user = strings(&["React", "JavaScript"]);
        let required = strings(&["React", "JavaScript", "TypeScript"]);
        let score = skill_match(&user, &required);
        assert!((score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(matched_skills(&user, &required), vec!["React", "JavaScript"]);
    }

    #[test]
    fn test_skill_match_is_bidirectional_substring() {
        // "Java" is contained in "JavaScript"; "Spark" contains nothing but
        // is contained in "Apache Spark".
        let user = strings(&["javascript", "Apache Spark"]);
        let required = strings(&["Java", "Spark", "Go"]);
        assert_eq!(matched_skills(&user, &required), vec!["Java", "Spark"]);
    }

    #[test]
    fn test_short_skill_false_positive_is_kept() {
        let user = strings(&["C"]);
        let required = strings(&["C++", "Objective-C"]);
        assert_eq!(skill_match(&user, &required), 100.0);
    }

    #[test]
    fn test_skill_match_empty_inputs() {
        assert_eq!(skill_match(&strings(&["Rust"]), &[]), 0.0);
        assert_eq!(skill_match(&[], &strings(&["Rust"])), 0.0);
    }

    #[test]
    fn test_experience_match() {
        assert_eq!(experience_match(5, 3, CLOSE_EXPERIENCE_RATIO), 100.0);
        assert_eq!(experience_match(3, 3, CLOSE_EXPERIENCE_RATIO), 100.0);
        assert!((experience_match(7, 10, CLOSE_EXPERIENCE_RATIO) - 70.0).abs() < 1e-9);
        assert_eq!(experience_match(2, 4, CLOSE_EXPERIENCE_RATIO), 0.0);
        assert_eq!(experience_match(0, 0, CLOSE_EXPERIENCE_RATIO), 100.0);
    }

    #[test]
    fn test_industry_match() {
        assert_eq!(industry_match("Technology", "technology"), 100.0);
        assert_eq!(industry_match("Software", "Enterprise Software"), 80.0);
        assert_eq!(industry_match("Gaming", "Healthcare"), 0.0);
    }

    #[test]
    fn test_work_style_match() {
        assert_eq!(work_style_match(WorkStyle::Any, &[WorkStyle::OnSite]), 100.0);
        assert_eq!(work_style_match(WorkStyle::Remote, &[WorkStyle::Any]), 100.0);
        assert_eq!(
            work_style_match(WorkStyle::Hybrid, &[WorkStyle::Remote, WorkStyle::Hybrid]),
            100.0
        );
        assert_eq!(work_style_match(WorkStyle::Remote, &[WorkStyle::OnSite]), 0.0);
        assert_eq!(work_style_match(WorkStyle::Remote, &[]), 0.0);
    }
}
