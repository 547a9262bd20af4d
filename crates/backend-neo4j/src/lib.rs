//! Neo4j graph backend implementation.
//!
//! Talks to the Neo4j transactional HTTP endpoint. The graph holds the
//! ontology and the job catalog; the title keyword formula runs as a Cypher
//! traversal, so the same scores come back as from the in-memory strategy.

use careermatch_catalog::{CatalogError, JobCatalog};
use careermatch_explain::title_bonus_reasons;
use careermatch_model::{Dimension, DimensionScore, Job, JobMatch, Profile, Strategy};
use careermatch_ontology::Ontology;
use careermatch_query::{
    all_jobs_statement, health_statement, seed_statements, CypherDialect, CypherStatement,
    GraphQuery, QueryDialect, QueryError,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from graph backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Backend not available")]
    Unavailable,

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Neo4j backend configuration.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Base URL of the Neo4j HTTP API
    pub base_url: String,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7474".to_string(),
            database: "neo4j".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: &'a [CypherStatement],
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Result rows as column name -> value maps, null columns dropped.
type Rows = Vec<Map<String, Value>>;

/// Parse a transactional endpoint response, one `Rows` per statement.
fn parse_response(response: Value) -> Result<Vec<Rows>, BackendError> {
    let response: TxResponse =
        serde_json::from_value(response).map_err(|e| BackendError::ParseError(e.to_string()))?;

    if let Some(error) = response.errors.first() {
        return Err(BackendError::QueryFailed(format!("{}: {}", error.code, error.message)));
    }

    response
        .results
        .into_iter()
        .map(|result| {
            result
                .data
                .into_iter()
                .map(|data| {
                    if data.row.len() != result.columns.len() {
                        return Err(BackendError::ParseError(format!(
                            "Expected {} columns, got {}",
                            result.columns.len(),
                            data.row.len()
                        )));
                    }
                    let row: Map<String, Value> = result
                        .columns
                        .iter()
                        .cloned()
                        .zip(data.row)
                        .filter(|(_, v)| !v.is_null())
                        .collect();
                    Ok(row)
                })
                .collect::<Result<Rows, BackendError>>()
        })
        .collect()
}

fn row_to_job(row: &Map<String, Value>) -> Result<Job, BackendError> {
    serde_json::from_value(Value::Object(row.clone()))
        .map_err(|e| BackendError::ParseError(e.to_string()))
}

fn number(row: &Map<String, Value>, column: &str) -> Result<f64, BackendError> {
    row.get(column)
        .and_then(Value::as_f64)
        .ok_or_else(|| BackendError::ParseError(format!("Missing numeric column {column}")))
}

/// Build a match from one recommendation row, using the weights the query
/// was run with.
fn row_to_match(row: &Map<String, Value>, query: &GraphQuery) -> Result<JobMatch, BackendError> {
    let job = row_to_job(row)?;
    let title = if row.get("titleMatch").and_then(Value::as_bool).unwrap_or(false) {
        100.0
    } else {
        0.0
    };
    let experience = number(row, "experienceScore")?;

    let breakdown = vec![
        DimensionScore::new(Dimension::Skills, number(row, "skillScore")?, query.weights.skills),
        DimensionScore::new(
            Dimension::Industry,
            number(row, "industryScore")?,
            query.weights.industry,
        ),
        DimensionScore::new(Dimension::Experience, experience, query.weights.experience),
        DimensionScore::new(Dimension::TitleKeywords, title, query.weights.title),
    ];

    Ok(JobMatch {
        job,
        match_score: number(row, "matchScore")?.round().clamp(0.0, 100.0) as u32,
        match_reasons: title_bonus_reasons(&breakdown),
        experience_match: experience >= 70.0,
        breakdown,
        strategy: Strategy::Graph,
        ontology: None,
        hybrid: None,
    })
}

/// Neo4j backend.
pub struct Neo4jBackend {
    config: Neo4jConfig,
    client: reqwest::Client,
}

impl Neo4jBackend {
    /// Create a new Neo4j backend.
    pub fn new(config: Neo4jConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.config.base_url.trim_end_matches('/'),
            self.config.database
        )
    }

    /// Run statements in a single transaction.
    pub async fn run(&self, statements: &[CypherStatement]) -> Result<Vec<Rows>, BackendError> {
        tracing::debug!(
            statements = statements.len(),
            url = %self.commit_url(),
            "Executing Cypher"
        );

        let response = self
            .client
            .post(self.commit_url())
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&TxRequest { statements })
            .send()
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::QueryFailed(format!("HTTP {}: {}", status, body)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(e.to_string()))?;

        parse_response(json)
    }

    async fn run_one(&self, statement: CypherStatement) -> Result<Rows, BackendError> {
        self.run(&[statement])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::ParseError("Missing result set".to_string()))
    }

    /// Graph recommendations for a profile.
    pub async fn recommend(
        &self,
        profile: &Profile,
        query: &GraphQuery,
    ) -> Result<Vec<JobMatch>, BackendError> {
        let statement = CypherDialect.translate(query)?;
        let rows = self.run_one(statement).await?;

        let matches = rows
            .iter()
            .map(|row| row_to_match(row, query))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            profile = %profile.name,
            matches = matches.len(),
            "Graph recommendations complete"
        );
        Ok(matches)
    }

    /// Wipe the graph and load the ontology and jobs.
    pub async fn seed(&self, ontology: &Ontology, jobs: &[Job]) -> Result<(), BackendError> {
        let statements = seed_statements(ontology, jobs);
        self.run(&statements).await?;
        tracing::info!(jobs = jobs.len(), "Seeded graph");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), BackendError> {
        match self.run_one(health_statement()).await {
            Ok(_) => Ok(()),
            Err(BackendError::Connection(e)) => {
                tracing::debug!(error = %e, "Neo4j unreachable");
                Err(BackendError::Unavailable)
            }
            Err(e) => Err(e),
        }
    }
}

impl JobCatalog for Neo4jBackend {
    async fn all_jobs(&self) -> Result<Vec<Job>, CatalogError> {
        let rows = self
            .run_one(all_jobs_statement())
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        rows.iter()
            .map(row_to_job)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "neo4j"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careermatch_model::WorkStyle;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_commit_url() {
        let backend = Neo4jBackend::new(Neo4jConfig {
            base_url: "http://graph:7474/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(backend.commit_url(), "http://graph:7474/db/neo4j/tx/commit");
    }

    #[test]
    fn test_request_shape() {
        let statements = vec![CypherStatement::new("RETURN $x", json!({ "x": 1 }))];
        let body = serde_json::to_value(TxRequest { statements: &statements }).unwrap();
        assert_eq!(
            body,
            json!({ "statements": [{ "statement": "RETURN $x", "parameters": { "x": 1 } }] })
        );
    }

    #[test]
    fn test_parse_rows_drops_nulls() {
        let response = json!({
            "results": [{
                "columns": ["id", "title", "company", "companySize", "workStyle"],
                "data": [{ "row": ["1", "Engineer", "Acme", null, ["On-site"]], "meta": [] }]
            }],
            "errors": []
        });
        let results = parse_response(response).unwrap();
        assert_eq!(results.len(), 1);
        let row = &results[0][0];
        assert!(!row.contains_key("companySize"));

        let job = row_to_job(row).unwrap();
        assert_eq!(job.id, "1");
        assert_eq!(job.company_size, None);
        assert_eq!(job.work_style, vec![WorkStyle::OnSite]);
    }

    #[test]
    fn test_parse_errors() {
        let response = json!({
            "results": [],
            "errors": [{ "code": "Neo.ClientError.Statement.SyntaxError", "message": "bad" }]
        });
        let err = parse_response(response).unwrap_err();
        assert!(matches!(err, BackendError::QueryFailed(msg) if msg.contains("SyntaxError")));
    }

    #[test]
    fn test_parse_column_mismatch() {
        let response = json!({ "results": [{ "columns": ["a", "b"], "data": [{ "row": [1] }] }] });
        assert!(matches!(parse_response(response), Err(BackendError::ParseError(_))));
    }

    #[test]
    fn test_row_to_match() {
        let profile = Profile::new("A", 5, vec!["React".into()]).with_role("Frontend Developer");
        let query = GraphQuery::from_profile(&profile);
        let row = json!({
            "id": "2", "title": "Frontend Engineer", "company": "Meta",
            "requiredSkills": ["React", "CSS"], "requiredExperience": 3, "industry": "Technology",
            "matchScore": 79.6, "skillScore": 50.0, "industryScore": 100.0,
            "experienceScore": 100.0, "titleMatch": true
        });
        let Value::Object(row) = row else { unreachable!() };

        let m = row_to_match(&row, &query).unwrap();
        assert_eq!(m.match_score, 80);
        assert_eq!(m.strategy, Strategy::Graph);
        assert!(m.experience_match);
        assert_eq!(
            m.match_reasons,
            vec![
                "Industry alignment",
                "Experience requirement met",
                "Job title matches your current role",
            ]
        );
        assert_eq!(m.dimension(Dimension::TitleKeywords), Some(100.0));
    }

    #[test]
    fn test_row_to_match_requires_scores() {
        let query = GraphQuery::from_profile(&Profile::new("A", 1, vec![]));
        let Value::Object(row) = json!({ "id": "1", "title": "T", "company": "C" }) else {
            unreachable!()
        };
        assert!(matches!(row_to_match(&row, &query), Err(BackendError::ParseError(_))));
    }
}
