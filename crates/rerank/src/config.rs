//! Scoring configuration.
//!
//! Every constant the strategies use lives here so it can be tuned from a
//! JSON file without touching the scorers. Missing fields fall back to the
//! defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{strategy} weights must sum to 1.0, got {sum}")]
    Weights { strategy: &'static str, sum: f64 },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Weights of the rule-based strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub skills: f64,
    pub experience: f64,
    pub industry: f64,
    pub work_style: f64,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            experience: 0.3,
            industry: 0.2,
            work_style: 0.1,
        }
    }
}

impl RuleWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.industry + self.work_style
    }
}

/// Weights of the ontology strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyWeights {
    pub semantic_skills: f64,
    pub experience: f64,
    pub industry: f64,
    pub culture: f64,
}

impl Default for OntologyWeights {
    fn default() -> Self {
        Self {
            semantic_skills: 0.5,
            experience: 0.25,
            industry: 0.15,
            culture: 0.1,
        }
    }
}

impl OntologyWeights {
    pub fn sum(&self) -> f64 {
        self.semantic_skills + self.experience + self.industry + self.culture
    }
}

/// Weights of the title keyword (graph) strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleWeights {
    pub skills: f64,
    pub industry: f64,
    pub experience: f64,
    pub title: f64,
}

impl Default for TitleWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            industry: 0.2,
            experience: 0.2,
            title: 0.2,
        }
    }
}

impl TitleWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.industry + self.experience + self.title
    }
}

/// Configuration for every scoring strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub rule: RuleWeights,
    pub ontology: OntologyWeights,
    pub title: TitleWeights,
    /// Minimum rounded rule-based score to qualify
    pub rule_threshold: f64,
    /// Minimum rounded ontology score to qualify
    pub ontology_threshold: f64,
    /// Raw title keyword scores must exceed this
    pub title_threshold: f64,
    /// Share of the required experience that still earns partial credit
    pub close_experience_ratio: f64,
    /// Length of every ranked list
    pub top_n: usize,
    /// Matches shown per strategy in a comparison
    pub compare_top_n: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rule: RuleWeights::default(),
            ontology: OntologyWeights::default(),
            title: TitleWeights::default(),
            rule_threshold: 30.0,
            ontology_threshold: 25.0,
            title_threshold: 10.0,
            close_experience_ratio: careermatch_features::CLOSE_EXPERIENCE_RATIO,
            top_n: 10,
            compare_top_n: 5,
        }
    }
}

const WEIGHT_TOLERANCE: f64 = 1e-6;

fn check_weights(strategy: &'static str, weights: &[f64], sum: f64) -> Result<(), ConfigError> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ConfigError::Invalid(format!("{strategy} weights must be non-negative")));
    }
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ConfigError::Weights { strategy, sum });
    }
    Ok(())
}

impl ScoringConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Weights must form a convex combination so scores stay in 0 - 100.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.rule;
        check_weights("rule", &[r.skills, r.experience, r.industry, r.work_style], r.sum())?;
        let o = &self.ontology;
        check_weights(
            "ontology",
            &[o.semantic_skills, o.experience, o.industry, o.culture],
            o.sum(),
        )?;
        let t = &self.title;
        check_weights("title", &[t.skills, t.industry, t.experience, t.title], t.sum())?;

        if !(0.0..=1.0).contains(&self.close_experience_ratio) {
            return Err(ConfigError::Invalid(
                "close_experience_ratio must be between 0 and 1".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}
