//! Core domain model for careermatch job matching.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `Profile`: The candidate's skills and career preferences
//! - `Job`: A posting from the job catalog
//! - `JobMatch`: A scored, explained match produced by a strategy
//! - `Strategy`: Which scoring strategy produced a match

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or validating model values.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown work style: {0}")]
    UnknownWorkStyle(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preferred (or offered) way of working.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStyle {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
    /// No preference / every arrangement offered
    #[default]
    Any,
}

impl WorkStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
            Self::Any => "Any",
        }
    }
}

impl fmt::Display for WorkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStyle {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "hybrid" => Ok(Self::Hybrid),
            "on-site" | "onsite" | "on site" => Ok(Self::OnSite),
            "any" => Ok(Self::Any),
            _ => Err(ModelError::UnknownWorkStyle(s.to_string())),
        }
    }
}

/// A candidate profile as entered by the user.
///
/// Immutable input to every scoring strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identifier assigned by the profile store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Current job title, used for role transfer and title keywords
    #[serde(default)]
    pub current_role: String,

    pub years_of_experience: u32,

    /// User-entered skills, matched case-insensitively
    pub skills: Vec<String>,

    #[serde(default)]
    pub preferred_industry: String,

    #[serde(default)]
    pub work_style: WorkStyle,

    /// Not used by scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<f64>,

    /// Company size preference for culture matching (e.g. "Large")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_company_size: Option<String>,

    /// Not used by scoring
    #[serde(default)]
    pub about: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, years_of_experience: u32, skills: Vec<String>) -> Self {
        Self {
            name: name.into(),
            years_of_experience,
            skills,
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.current_role = role.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.preferred_industry = industry.into();
        self
    }

    pub fn with_work_style(mut self, work_style: WorkStyle) -> Self {
        self.work_style = work_style;
        self
    }

    pub fn with_company_size(mut self, size: impl Into<String>) -> Self {
        self.preferred_company_size = Some(size.into());
        self
    }

    /// Parse and validate a profile from JSON.
    ///
    /// Shape errors carry user-facing messages that callers can surface
    /// unchanged.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        if !value.get("skills").is_some_and(|s| s.is_array()) {
            return Err(ModelError::InvalidProfile("Skills array is required".to_string()));
        }

        match value.get("yearsOfExperience") {
            Some(v) if v.is_number() => {
                if v.as_u64().map_or(true, |n| n > u64::from(u32::MAX)) {
                    return Err(ModelError::InvalidProfile(
                        "Years of experience must be a non-negative integer".to_string(),
                    ));
                }
            }
            _ => {
                return Err(ModelError::InvalidProfile(
                    "Years of experience must be a number".to_string(),
                ))
            }
        }

        let profile: Profile = serde_json::from_value(value)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(salary) = self.expected_salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(ModelError::InvalidProfile(
                    "Expected salary must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// A job posting from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique within a catalog
    pub id: String,

    pub title: String,

    pub company: String,

    #[serde(default)]
    pub location: String,

    /// Display string, e.g. "$140k - $180k"
    #[serde(default)]
    pub salary_range: String,

    #[serde(default)]
    pub required_skills: Vec<String>,

    /// Years of experience required
    #[serde(default)]
    pub required_experience: u32,

    #[serde(default)]
    pub industry: String,

    /// Work styles the job supports
    #[serde(default)]
    pub work_style: Vec<WorkStyle>,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
}

impl Job {
    /// Create a minimal job for testing.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            location: String::new(),
            salary_range: String::new(),
            required_skills: Vec::new(),
            required_experience: 0,
            industry: String::new(),
            work_style: Vec::new(),
            description: String::new(),
            company_size: None,
            benefits: None,
        }
    }

    pub fn with_skills(mut self, skills: &[&str]) -> Self {
        self.required_skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_experience(mut self, years: u32) -> Self {
        self.required_experience = years;
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_work_styles(mut self, styles: &[WorkStyle]) -> Self {
        self.work_style = styles.to_vec();
        self
    }
}

/// Scoring strategies exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Weighted substring scoring (skills 0.4, experience 0.3, industry 0.2, work style 0.1)
    RuleBased,
    /// Ontology-driven semantic scoring
    Ontology,
    /// Average of rule-based and ontology scores
    Hybrid,
    /// Graph formula with the title keyword bonus
    Graph,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Self::RuleBased, Self::Ontology, Self::Hybrid, Self::Graph];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule-based",
            Self::Ontology => "ontology",
            Self::Hybrid => "hybrid",
            Self::Graph => "graph",
        }
    }

    /// Human-readable algorithm name.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::RuleBased => "Rule-Based Weighted Scoring",
            Self::Ontology => "Ontology-Based Semantic Matching",
            Self::Hybrid => "Hybrid Rule-Based + Ontology Matching",
            Self::Graph => "Graph Title-Keyword Scoring",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rule-based" | "rule" | "rules" => Ok(Self::RuleBased),
            "ontology" | "ontology-based" | "semantic" => Ok(Self::Ontology),
            "hybrid" => Ok(Self::Hybrid),
            "graph" | "title" | "title-bonus" => Ok(Self::Graph),
            _ => Err(ModelError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A scoring dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Skills,
    SemanticSkills,
    Experience,
    Industry,
    WorkStyle,
    Culture,
    TitleKeywords,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skills => "Skills",
            Self::SemanticSkills => "Semantic Skills",
            Self::Experience => "Experience",
            Self::Industry => "Industry",
            Self::WorkStyle => "Work Style",
            Self::Culture => "Culture",
            Self::TitleKeywords => "Title Keywords",
        }
    }
}

/// One weighted term of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// 0.0 - 100.0
    pub score: f64,
    pub weight: f64,
}

impl DimensionScore {
    pub fn new(dimension: Dimension, score: f64, weight: f64) -> Self {
        Self { dimension, score, weight }
    }

    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// Sum of weighted dimension scores (unrounded).
pub fn weighted_total(breakdown: &[DimensionScore]) -> f64 {
    breakdown.iter().map(DimensionScore::contribution).sum()
}

/// Fields only the ontology strategy produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyDetail {
    pub skill_semantic_score: f64,
    pub industry_semantic_score: f64,
    pub culture_match_score: f64,
    pub ontology_reasons: Vec<String>,
}

/// Provenance of a hybrid score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridDetail {
    pub rule_based_score: u32,
    pub ontology_score: u32,
    pub approaches: Vec<Strategy>,
}

/// A scored job. Transient; created fresh per scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    #[serde(flatten)]
    pub job: Job,

    /// 0 - 100
    pub match_score: u32,

    pub match_reasons: Vec<String>,

    /// Experience dimension scored at least 70
    pub experience_match: bool,

    /// Weighted terms behind `match_score`
    #[serde(default)]
    pub breakdown: Vec<DimensionScore>,

    pub strategy: Strategy,

    #[serde(flatten)]
    pub ontology: Option<OntologyDetail>,

    #[serde(flatten)]
    pub hybrid: Option<HybridDetail>,
}

impl JobMatch {
    /// Score of one dimension, if the producing strategy has it.
    pub fn dimension(&self, dimension: Dimension) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_work_style_from_str() {
        assert_eq!(WorkStyle::from_str("remote").unwrap(), WorkStyle::Remote);
        assert_eq!(WorkStyle::from_str("On-site").unwrap(), WorkStyle::OnSite);
        assert_eq!(WorkStyle::from_str("onsite").unwrap(), WorkStyle::OnSite);
        assert_eq!(WorkStyle::from_str(" ANY ").unwrap(), WorkStyle::Any);
        assert!(WorkStyle::from_str("sometimes").is_err());
    }

    #[test]
    fn test_work_style_defaults_to_any() {
        assert_eq!(WorkStyle::default(), WorkStyle::Any);
        assert_eq!(Profile::new("Ada", 1, vec![]).work_style, WorkStyle::Any);
    }

    #[test]
    fn test_work_style_serde_names() {
        let json = serde_json::to_string(&[WorkStyle::OnSite, WorkStyle::Hybrid]).unwrap();
        assert_eq!(json, r#"["On-site","Hybrid"]"#);
    }

    #[test]
    fn test_profile_from_json() {
        let profile = Profile::from_json(
            r#"{
                "name": "Ada",
                "currentRole": "Frontend Developer",
                "yearsOfExperience": 5,
                "skills": ["React", "JavaScript"],
                "preferredIndustry": "Technology",
                "workStyle": "Hybrid",
                "about": ""
            }"#,
        )
        .unwrap();

        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.years_of_experience, 5);
        assert_eq!(profile.skills, vec!["React", "JavaScript"]);
        assert_eq!(profile.work_style, WorkStyle::Hybrid);
        assert_eq!(profile.preferred_company_size, None);
    }

    #[test]
    fn test_profile_requires_skills_array() {
        let err = Profile::from_json(r#"{"yearsOfExperience": 3, "skills": "Rust"}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidProfile(msg) if msg.contains("Skills array")));
    }

    #[test]
    fn test_profile_requires_numeric_experience() {
        let err =
            Profile::from_json(r#"{"yearsOfExperience": "three", "skills": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidProfile(msg) if msg.contains("must be a number")));

        let err = Profile::from_json(r#"{"yearsOfExperience": -1, "skills": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidProfile(msg) if msg.contains("non-negative")));
    }

    #[test]
    fn test_profile_rejects_negative_salary() {
        let err = Profile::from_json(
            r#"{"yearsOfExperience": 1, "skills": [], "expectedSalary": -10}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidProfile(_)));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(Strategy::from_str("rule-based").unwrap(), Strategy::RuleBased);
        assert_eq!(Strategy::from_str("Ontology").unwrap(), Strategy::Ontology);
        assert_eq!(Strategy::from_str("title-bonus").unwrap(), Strategy::Graph);
        assert!(Strategy::from_str("llm").is_err());
    }

    #[test]
    fn test_weighted_total() {
        let breakdown = [
            DimensionScore::new(Dimension::Skills, 50.0, 0.4),
            DimensionScore::new(Dimension::Experience, 100.0, 0.6),
        ];
        assert!((weighted_total(&breakdown) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_job_match_serializes_flat() {
        let job = Job::new("7", "Data Engineer", "Acme").with_skills(&["Python"]);
        let m = JobMatch {
            job,
            match_score: 42,
            match_reasons: vec![],
            experience_match: true,
            breakdown: vec![],
            strategy: Strategy::Ontology,
            ontology: Some(OntologyDetail {
                skill_semantic_score: 90.0,
                industry_semantic_score: 0.0,
                culture_match_score: 50.0,
                ontology_reasons: vec!["x".into()],
            }),
            hybrid: None,
        };

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["matchScore"], 42);
        assert_eq!(value["requiredSkills"][0], "Python");
        assert_eq!(value["cultureMatchScore"], 50.0);
        assert!(value.get("ruleBasedScore").is_none());
    }
}
