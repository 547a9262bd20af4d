//! Explanation generation for job matches.
//!
//! Converts dimension scores into the short reason strings shown next to
//! each match. Thresholds here are display rules, not scoring rules, so
//! they stay fixed when scoring weights are reconfigured.

use careermatch_features::SemanticSkillMatch;
use careermatch_model::{Dimension, DimensionScore, Job, JobMatch, Profile};

fn score_of(breakdown: &[DimensionScore], dimension: Dimension) -> Option<f64> {
    breakdown
        .iter()
        .find(|d| d.dimension == dimension)
        .map(|d| d.score)
}

/// Reasons shared by the rule-based and ontology strategies.
///
/// `matched_skills` are the required skills credited by the skill scorer,
/// in job order; at most three are named.
pub fn match_reasons(breakdown: &[DimensionScore], matched_skills: &[&str]) -> Vec<String> {
    let mut reasons = Vec::new();

    let skills = score_of(breakdown, Dimension::Skills)
        .or_else(|| score_of(breakdown, Dimension::SemanticSkills))
        .unwrap_or(0.0);
    if skills >= 60.0 {
        let top: Vec<&str> = matched_skills.iter().take(3).copied().collect();
        reasons.push(format!("Strong skill match: {}", top.join(", ")));
    }

    match score_of(breakdown, Dimension::Experience) {
        Some(e) if e >= 100.0 => reasons.push("Meets experience requirements".to_string()),
        Some(e) if e >= 70.0 => reasons.push("Close to experience requirements".to_string()),
        _ => {}
    }

    if score_of(breakdown, Dimension::Industry).is_some_and(|s| s >= 80.0) {
        reasons.push("Perfect industry fit".to_string());
    }

    if score_of(breakdown, Dimension::WorkStyle).is_some_and(|s| s >= 100.0) {
        reasons.push("Work style preference match".to_string());
    }

    if score_of(breakdown, Dimension::Culture).is_some_and(|s| s >= 80.0) {
        reasons.push("Company culture match".to_string());
    }

    reasons
}

/// Scores the ontology reasons are written from.
#[derive(Debug, Clone, Copy)]
pub struct OntologySignals<'a> {
    pub skills: &'a SemanticSkillMatch,
    pub industry: f64,
    pub culture: f64,
    /// Role transfer bonus applied to the experience score
    pub role_bonus: Option<f64>,
}

/// Sentences describing what the ontology inferred.
pub fn ontology_reasons(profile: &Profile, job: &Job, signals: OntologySignals<'_>) -> Vec<String> {
    let mut reasons = Vec::new();

    if signals.skills.score >= 80.0 {
        let inferred = signals.skills.inferred().count();
        reasons.push(match inferred {
            0 => "Excellent semantic skill match".to_string(),
            1 => "Excellent semantic skill match, including 1 inferred or transferable skill"
                .to_string(),
            n => format!(
                "Excellent semantic skill match, including {n} inferred or transferable skills"
            ),
        });
    }

    if signals.industry >= 85.0 {
        reasons.push(format!(
            "Your {} background is directly applicable to {}",
            profile.preferred_industry, job.industry
        ));
    } else if signals.industry >= 70.0 {
        reasons.push(format!(
            "Your {} background is transferable to {}",
            profile.preferred_industry, job.industry
        ));
    }

    if signals.culture >= 80.0 {
        reasons.push(format!("Strong culture fit with {}", job.company));
    }

    if let Some(bonus) = signals.role_bonus {
        reasons.push(format!(
            "Experience as {} transfers to this role (+{bonus:.0})",
            profile.current_role
        ));
    }

    reasons
}

/// Reasons for the title keyword strategy.
pub fn title_bonus_reasons(breakdown: &[DimensionScore]) -> Vec<String> {
    let mut reasons = Vec::new();

    if score_of(breakdown, Dimension::Skills).is_some_and(|s| s > 70.0) {
        reasons.push("Strong skill match".to_string());
    }
    if score_of(breakdown, Dimension::Industry).is_some_and(|s| s > 80.0) {
        reasons.push("Industry alignment".to_string());
    }
    if score_of(breakdown, Dimension::Experience).is_some_and(|s| s > 90.0) {
        reasons.push("Experience requirement met".to_string());
    }
    if score_of(breakdown, Dimension::TitleKeywords).is_some_and(|s| s > 0.0) {
        reasons.push("Job title matches your current role".to_string());
    }

    reasons
}

/// One-line summary of a match for terminal output.
pub fn summarize_match(m: &JobMatch) -> String {
    let level = if m.match_score >= 80 {
        "STRONG MATCH"
    } else if m.match_score >= 50 {
        "GOOD MATCH"
    } else {
        "PARTIAL MATCH"
    };

    if m.match_reasons.is_empty() {
        format!("{level} ({}%)", m.match_score)
    } else {
        format!("{level} ({}%): {}", m.match_score, m.match_reasons.join("; "))
    }
}
