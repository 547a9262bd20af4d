//! Query translation and dialect generation.
//!
//! Converts a profile-derived `GraphQuery` into backend-specific syntax:
//! - Cypher recommendation statement (Neo4j)
//! - Cypher seed and catalog statements (see `seed`)

pub mod seed;

use careermatch_features::extract_keywords;
use careermatch_model::Profile;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub use seed::{all_jobs_statement, health_statement, seed_statements};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Limit must be at least 1")]
    InvalidLimit,
    #[error("Graph weights must sum to 1.0, got {0}")]
    InvalidWeights(f64),
}

/// Trait for translating queries to backend-specific syntax.
pub trait QueryDialect {
    /// The output type (usually a statement with its parameters)
    type Output;

    /// Translate a GraphQuery to this dialect
    fn translate(&self, query: &GraphQuery) -> Result<Self::Output, QueryError>;
}

/// Weights of the title keyword formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphWeights {
    pub skills: f64,
    pub industry: f64,
    pub experience: f64,
    /// Flat bonus weight when any role keyword appears in the title
    pub title: f64,
}

impl Default for GraphWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            industry: 0.2,
            experience: 0.2,
            title: 0.2,
        }
    }
}

impl GraphWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.industry + self.experience + self.title
    }
}

/// Everything the graph recommendation query needs from a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub user_skills: Vec<String>,
    pub user_industry: String,
    pub user_experience: u32,
    /// Keywords of the normalized current role
    pub role_keywords: Vec<String>,
    pub weights: GraphWeights,
    /// Share of the required experience that earns the half step
    pub close_ratio: f64,
    /// Scores (0-100) at or below this are dropped
    pub min_score: f64,
    pub limit: usize,
}

impl GraphQuery {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            user_skills: profile.skills.clone(),
            user_industry: profile.preferred_industry.clone(),
            user_experience: profile.years_of_experience,
            role_keywords: extract_keywords(&profile.current_role),
            weights: GraphWeights::default(),
            close_ratio: 0.7,
            min_score: 10.0,
            limit: 10,
        }
    }

    pub fn with_weights(mut self, weights: GraphWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_close_ratio(mut self, close_ratio: f64) -> Self {
        self.close_ratio = close_ratio;
        self
    }
}

/// A parameterized Cypher statement, shaped for the transactional HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CypherStatement {
    pub statement: String,
    pub parameters: Value,
}

impl CypherStatement {
    pub fn new(statement: impl Into<String>, parameters: Value) -> Self {
        Self {
            statement: statement.into(),
            parameters,
        }
    }
}

/// Cypher dialect generator.
///
/// User input only ever travels as parameters, never spliced into the text.
#[derive(Debug, Default)]
pub struct CypherDialect;

const RECOMMEND_CYPHER: &str = "\
WITH [s IN $userSkills | toLower(s)] AS userSkills, toLower($userIndustry) AS userIndustry,
     $userExp AS userExp, [k IN $roleKeywords | toLower(k)] AS roleKeywords
MATCH (c:Company)-[:POSTED]->(j:Job)-[:IN_INDUSTRY]->(i:Industry)
OPTIONAL MATCH (j)-[:REQUIRES_SKILL]->(req:Skill)
WITH j, c, i, userSkills, userIndustry, userExp, roleKeywords, collect(req.name) AS linkedSkills
WITH j, c, i, userSkills, userIndustry, userExp, roleKeywords,
     coalesce(j.requiredSkills, linkedSkills) AS requiredSkills
WITH j, c, i, requiredSkills, userIndustry, userExp, roleKeywords,
     CASE WHEN size(requiredSkills) > 0
          THEN toFloat(size([s IN requiredSkills WHERE toLower(s) IN userSkills]))
               / size(requiredSkills)
          ELSE 0.0 END AS skillScore
WITH j, c, i, requiredSkills, skillScore, userExp, roleKeywords,
     CASE
       WHEN toLower(i.name) = userIndustry THEN 1.0
       WHEN EXISTS {
         MATCH (i)-[:HAS_SUB_INDUSTRY*]->(sub:Industry) WHERE toLower(sub.name) = userIndustry
       } THEN 0.8
       WHEN EXISTS {
         MATCH (sup:Industry)-[:HAS_SUB_INDUSTRY*]->(i) WHERE toLower(sup.name) = userIndustry
       } THEN 0.8
       ELSE 0.0
     END AS industryScore
WITH j, c, i, requiredSkills, skillScore, industryScore, roleKeywords,
     CASE
       WHEN userExp >= j.requiredExperience THEN 1.0
       WHEN userExp >= j.requiredExperience * $closeRatio THEN 0.5
       ELSE 0.0
     END AS experienceScore
WITH j, c, i, requiredSkills, skillScore, industryScore, experienceScore,
     size([k IN roleKeywords WHERE toLower(j.title) CONTAINS k]) > 0 AS titleMatch
WITH j, c, i, requiredSkills, skillScore, industryScore, experienceScore, titleMatch,
     (skillScore * $skillWeight + industryScore * $industryWeight
       + experienceScore * $experienceWeight
       + CASE WHEN titleMatch THEN $titleWeight ELSE 0.0 END) * 100 AS matchScore
WHERE matchScore > $minScore
RETURN j.id AS id, j.title AS title, c.name AS company, j.location AS location,
       j.salaryRange AS salaryRange, requiredSkills, j.requiredExperience AS requiredExperience,
       i.name AS industry, j.workStyle AS workStyle, j.description AS description,
       j.companySize AS companySize, j.benefits AS benefits,
       matchScore, skillScore * 100 AS skillScore, industryScore * 100 AS industryScore,
       experienceScore * 100 AS experienceScore, titleMatch
ORDER BY matchScore DESC
LIMIT $limit";

impl QueryDialect for CypherDialect {
    type Output = CypherStatement;

    fn translate(&self, query: &GraphQuery) -> Result<CypherStatement, QueryError> {
        if query.limit == 0 {
            return Err(QueryError::InvalidLimit);
        }
        let sum = query.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(QueryError::InvalidWeights(sum));
        }

        let parameters = json!({
            "userSkills": query.user_skills,
            "userIndustry": query.user_industry,
            "userExp": query.user_experience,
            "roleKeywords": query.role_keywords,
            "skillWeight": query.weights.skills,
            "industryWeight": query.weights.industry,
            "experienceWeight": query.weights.experience,
            "titleWeight": query.weights.title,
            "closeRatio": query.close_ratio,
            "minScore": query.min_score,
            "limit": query.limit,
        });

        Ok(CypherStatement::new(RECOMMEND_CYPHER, parameters))
    }
}
