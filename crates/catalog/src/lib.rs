//! Job catalogs and profile storage.
//!
//! Provides the `JobCatalog` trait the scoring front ends read jobs from,
//! the embedded seed catalog, and an in-memory profile store. Neither keeps
//! anything across process restarts.

mod profiles;

pub use profiles::ProfileStore;

use std::collections::HashSet;
use std::future::Future;

use careermatch_model::{Job, ModelError};
use thiserror::Error;

const SEED_JOBS: &str = include_str!("../data/jobs.json");

/// Errors from catalog and profile store operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate job id: {0}")]
    DuplicateId(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error(transparent)]
    InvalidProfile(#[from] ModelError),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Trait for job sources (seed data, Neo4j, etc.)
///
/// Scoring only needs read access to the whole catalog, in a stable order.
pub trait JobCatalog {
    /// Every job, in catalog order.
    fn all_jobs(&self) -> impl Future<Output = Result<Vec<Job>, CatalogError>> + Send;

    /// Get the catalog name for logging.
    fn name(&self) -> &'static str;
}

/// Static catalog loaded from the embedded seed data.
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    jobs: Vec<Job>,
}

impl SeedCatalog {
    /// Load the 25 built-in job postings.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_json(SEED_JOBS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let jobs: Vec<Job> = serde_json::from_str(json)?;
        Self::from_jobs(jobs)
    }

    pub fn from_jobs(jobs: Vec<Job>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        if let Some(dup) = jobs.iter().find(|j| !seen.insert(j.id.as_str())) {
            return Err(CatalogError::DuplicateId(dup.id.clone()));
        }
        tracing::debug!(jobs = jobs.len(), "Loaded job catalog");
        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl JobCatalog for SeedCatalog {
    async fn all_jobs(&self) -> Result<Vec<Job>, CatalogError> {
        Ok(self.jobs.clone())
    }

    fn name(&self) -> &'static str {
        "seed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careermatch_model::WorkStyle;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seed_catalog_loads() {
        let catalog = SeedCatalog::new().unwrap();
        assert_eq!(catalog.len(), 25);

        let first = catalog.job("1").unwrap();
        assert_eq!(first.company, "Google");
        assert_eq!(first.work_style, vec![WorkStyle::Hybrid, WorkStyle::OnSite]);
        assert_eq!(first.required_experience, 2);
        assert!(first.benefits.as_ref().is_some_and(|b| !b.is_empty()));
    }

    #[test]
    fn test_seed_ids_are_in_order() {
        let catalog = SeedCatalog::new().unwrap();
        let ids: Vec<String> = catalog.jobs().iter().map(|j| j.id.clone()).collect();
        let expected: Vec<String> = (1..=25).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let jobs = vec![Job::new("1", "A", "X"), Job::new("1", "B", "Y")];
        assert!(matches!(
            SeedCatalog::from_jobs(jobs),
            Err(CatalogError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = SeedCatalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_all_jobs_via_trait() {
        let catalog = SeedCatalog::from_jobs(vec![Job::new("a", "Engineer", "Acme")]).unwrap();
        let jobs = catalog.all_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(catalog.name(), "seed");
    }
}
