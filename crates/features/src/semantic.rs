//! Ontology-driven dimension scores.

use careermatch_model::{Job, Profile};
use careermatch_ontology::{Ontology, SkillRelation};
use serde::Serialize;

use crate::loose_contains;
use crate::rule::experience_match;
use crate::text::normalize_title;

/// Best inference found for one required skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInference {
    pub required: String,
    /// User skill that produced the best confidence
    pub user_skill: Option<String>,
    pub relation: Option<SkillRelation>,
    /// 0.0 - 1.0
    pub confidence: f64,
}

impl SkillInference {
    /// Matched through a relationship rather than by name.
    pub fn is_inferred(&self) -> bool {
        self.confidence > 0.7 && self.confidence < 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticSkillMatch {
    /// 0.0 - 100.0
    pub score: f64,
    pub skills: Vec<SkillInference>,
}

impl SemanticSkillMatch {
    pub fn inferred(&self) -> impl Iterator<Item = &SkillInference> {
        self.skills.iter().filter(|s| s.is_inferred())
    }

    /// Required skills with any positive confidence, in job order.
    pub fn matched(&self) -> impl Iterator<Item = &SkillInference> {
        self.skills.iter().filter(|s| s.confidence > 0.0)
    }
}

/// Average best confidence over the required skills.
pub fn semantic_skill_match(
    ontology: &Ontology,
    user_skills: &[String],
    required_skills: &[String],
) -> SemanticSkillMatch {
    let skills: Vec<SkillInference> = required_skills
        .iter()
        .map(|required| {
            let mut best = SkillInference {
                required: required.clone(),
                user_skill: None,
                relation: None,
                confidence: 0.0,
            };
            for user in user_skills {
                if let Some(relation) = ontology.skill_relation(user, required) {
                    if relation.confidence() > best.confidence {
                        best.user_skill = Some(user.clone());
                        best.relation = Some(relation);
                        best.confidence = relation.confidence();
                    }
                }
            }
            best
        })
        .collect();

    let score = if skills.is_empty() {
        0.0
    } else {
        skills.iter().map(|s| s.confidence).sum::<f64>() / skills.len() as f64 * 100.0
    };

    SemanticSkillMatch { score, skills }
}

/// Bonus for a current role that transfers to the job's role.
pub fn role_transfer_bonus(
    ontology: &Ontology,
    current_role: &str,
    job_title: &str,
) -> Option<f64> {
    let role = normalize_title(current_role);
    if role.is_empty() {
        return None;
    }
    let title = normalize_title(job_title);

    ontology
        .role_transfers()
        .iter()
        .filter(|t| normalize_title(&t.from_role) == role)
        .filter(|t| t.to_roles.iter().any(|to| title.contains(&normalize_title(to))))
        .map(|t| t.bonus)
        .reduce(f64::max)
}

/// Experience score plus the role transfer bonus, capped at 100.
///
/// Returns the score and the bonus that was applied, if any.
pub fn semantic_experience_match(
    ontology: &Ontology,
    profile: &Profile,
    job: &Job,
    close_ratio: f64,
) -> (f64, Option<f64>) {
    let base = experience_match(profile.years_of_experience, job.required_experience, close_ratio);
    let bonus = role_transfer_bonus(ontology, &profile.current_role, &job.title);
    let score = (base + bonus.unwrap_or(0.0)).min(100.0);
    (score, bonus)
}

pub fn semantic_industry_match(ontology: &Ontology, preferred: &str, job_industry: &str) -> f64 {
    ontology
        .industry_relation(preferred, job_industry)
        .map_or(0.0, |r| r.score())
}

/// Share of the company's technologies covered by user skills, capped at
/// 100. Neutral 50 when the company lists none.
pub fn tech_stack_alignment(user_skills: &[String], technologies: &[String]) -> f64 {
    if technologies.is_empty() {
        return 50.0;
    }
    let matches = user_skills
        .iter()
        .filter(|skill| technologies.iter().any(|tech| loose_contains(tech, skill)))
        .count();
    (matches as f64 / technologies.len() as f64 * 100.0).min(100.0)
}

/// Mean of work style fit, company size fit and tech stack alignment.
/// Neutral 50 for companies the ontology does not know.
pub fn culture_match(ontology: &Ontology, profile: &Profile, company: &str) -> f64 {
    let Some(company) = ontology.company(company) else {
        return 50.0;
    };

    let work_style = if company
        .work_styles
        .iter()
        .any(|s| s.eq_ignore_ascii_case(profile.work_style.as_str()))
    {
        100.0
    } else {
        0.0
    };

    let size = match &profile.preferred_company_size {
        Some(preferred) if preferred.eq_ignore_ascii_case(&company.size) => 100.0,
        _ => 0.0,
    };

    let tech = tech_stack_alignment(&profile.skills, &company.technologies);

    (work_style + size + tech) / 3.0
}
