//! Command-line front end for job matching.
//!
//! Usage:
//!     careermatch match profile.json --strategy hybrid
//!     careermatch compare profile.json --format json
//!     careermatch jobs
//!     careermatch --source neo4j seed
//!     careermatch --source neo4j health

mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use careermatch_backend_neo4j::{Neo4jBackend, Neo4jConfig};
use careermatch_catalog::{JobCatalog, ProfileStore, SeedCatalog};
use careermatch_model::{Job, JobMatch, Profile, Strategy};
use careermatch_ontology::Ontology;
use careermatch_query::{GraphQuery, GraphWeights};
use careermatch_rerank::{compare, rank, ScoringConfig};
use clap::{Parser, Subcommand, ValueEnum};

use output::{print_comparison, print_jobs, print_matches, Format};

#[derive(Parser)]
#[command(name = "careermatch")]
#[command(about = "Match a career profile against a job catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Where jobs come from
    #[arg(long, value_enum, default_value_t = Source::Seed)]
    source: Source,

    /// Scoring config (JSON); defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Neo4j HTTP URL
    #[arg(long, default_value = "http://127.0.0.1:7474")]
    neo4j_url: String,

    #[arg(long, default_value = "neo4j")]
    neo4j_database: String,

    #[arg(long, default_value = "neo4j")]
    neo4j_user: String,

    #[arg(long, default_value = "password")]
    neo4j_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Built-in seed catalog
    Seed,
    /// Jobs stored in Neo4j
    Neo4j,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank jobs for a profile
    Match {
        /// Path to profile JSON
        profile: PathBuf,

        /// rule-based, ontology, hybrid or graph
        #[arg(short, long, default_value = "rule-based")]
        strategy: Strategy,

        /// Override the number of results
        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Run rule-based, ontology and hybrid side by side
    Compare {
        /// Path to profile JSON
        profile: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List the job catalog
    Jobs {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Validate a profile and print it with an assigned id
    Profile {
        /// Path to profile JSON
        profile: PathBuf,
    },

    /// Load the ontology and seed jobs into Neo4j
    Seed,

    /// Check backend health
    Health,
}

/// The catalog selected by `--source`.
enum Catalog {
    Seed(SeedCatalog),
    Neo4j(Neo4jBackend),
}

impl Catalog {
    async fn all_jobs(&self) -> Result<Vec<Job>> {
        let jobs = match self {
            Self::Seed(c) => c.all_jobs().await?,
            Self::Neo4j(c) => c.all_jobs().await?,
        };
        Ok(jobs)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Seed(c) => c.name(),
            Self::Neo4j(c) => c.name(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("careermatch=debug".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let scoring = match &cli.config {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("Failed to load scoring config {}", path.display()))?,
        None => ScoringConfig::default(),
    };

    let neo4j = Neo4jConfig {
        base_url: cli.neo4j_url.clone(),
        database: cli.neo4j_database.clone(),
        user: cli.neo4j_user.clone(),
        password: cli.neo4j_password.clone(),
        ..Default::default()
    };

    let catalog = match cli.source {
        Source::Seed => Catalog::Seed(SeedCatalog::new()?),
        Source::Neo4j => Catalog::Neo4j(Neo4jBackend::new(neo4j)?),
    };
    let ontology = Ontology::builtin();

    match cli.command {
        Commands::Match {
            profile,
            strategy,
            limit,
            format,
        } => {
            let mut scoring = scoring;
            if let Some(limit) = limit {
                scoring.top_n = limit;
                scoring.validate()?;
            }
            run_match(&catalog, ontology, &scoring, &profile, strategy, format).await?;
        }
        Commands::Compare { profile, format } => {
            let profile = load_profile(&profile)?;
            let jobs = catalog.all_jobs().await?;
            let comparison = compare(&profile, &jobs, ontology, &scoring);
            print_comparison(&profile, &comparison, format)?;
        }
        Commands::Jobs { format } => {
            let jobs = catalog.all_jobs().await?;
            print_jobs(&jobs, format)?;
        }
        Commands::Profile { profile } => {
            let store = ProfileStore::new();
            let stored = store.create(load_profile(&profile)?).await?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        Commands::Seed => {
            let Catalog::Neo4j(backend) = &catalog else {
                bail!("seed requires --source neo4j");
            };
            let seed = SeedCatalog::new()?;
            backend.seed(ontology, seed.jobs()).await?;
            println!("Seeded {} jobs into Neo4j", seed.len());
        }
        Commands::Health => {
            run_health(&catalog).await?;
        }
    }

    Ok(())
}

fn load_profile(path: &Path) -> Result<Profile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile = Profile::from_json(&json)?;
    Ok(profile)
}

fn graph_query(profile: &Profile, scoring: &ScoringConfig) -> GraphQuery {
    let t = &scoring.title;
    GraphQuery::from_profile(profile)
        .with_weights(GraphWeights {
            skills: t.skills,
            industry: t.industry,
            experience: t.experience,
            title: t.title,
        })
        .with_close_ratio(scoring.close_experience_ratio)
        .with_min_score(scoring.title_threshold)
        .with_limit(scoring.top_n)
}

async fn run_match(
    catalog: &Catalog,
    ontology: &Ontology,
    scoring: &ScoringConfig,
    profile_path: &Path,
    strategy: Strategy,
    format: Format,
) -> Result<()> {
    let profile = load_profile(profile_path)?;

    // The graph strategy runs inside Neo4j when that is the source.
    let matches: Vec<JobMatch> = match (strategy, catalog) {
        (Strategy::Graph, Catalog::Neo4j(backend)) => {
            backend.recommend(&profile, &graph_query(&profile, scoring)).await?
        }
        _ => {
            let jobs = catalog.all_jobs().await?;
            tracing::debug!(catalog = catalog.name(), jobs = jobs.len(), "Loaded jobs");
            rank(strategy, &profile, &jobs, ontology, scoring)
        }
    };

    print_matches(&profile, strategy, &matches, format)
}

async fn run_health(catalog: &Catalog) -> Result<()> {
    print!("Checking {} backend... ", catalog.name());

    let result = match catalog {
        Catalog::Seed(c) => c.all_jobs().await.map(|_| ()).map_err(anyhow::Error::from),
        Catalog::Neo4j(c) => c.health_check().await.map_err(anyhow::Error::from),
    };

    match result {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(e) => {
            println!("FAILED: {}", e);
            std::process::exit(1);
        }
    }
}
