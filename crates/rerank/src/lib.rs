//! Aggregation, thresholding and ranking of job matches.
//!
//! Takes a profile and a job catalog and applies the per-dimension scorers
//! to produce ranked, explained matches:
//! - `score_rule_based`: substring scoring, 0.4 / 0.3 / 0.2 / 0.1
//! - `score_ontology`: semantic scoring, 0.5 / 0.25 / 0.15 / 0.1
//! - `score_title_bonus`: graph formula with the title keyword bonus
//! - `score_hybrid` / `combine`: average of rule-based and ontology lists
//! - `compare`: all three side by side

mod config;

pub use config::{ConfigError, OntologyWeights, RuleWeights, ScoringConfig, TitleWeights};

use std::collections::HashMap;

use careermatch_explain::{match_reasons, ontology_reasons, title_bonus_reasons, OntologySignals};
use careermatch_features::{
    culture_match, direct_skill_match, experience_match, extract_keywords, graph_industry_match,
    industry_match, matched_skills, semantic_experience_match, semantic_industry_match,
    semantic_skill_match, skill_match, stepped_experience_match, title_keyword_matches,
    work_style_match,
};
use careermatch_model::{
    weighted_total, Dimension, DimensionScore, HybridDetail, Job, JobMatch, OntologyDetail, Profile,
    Strategy,
};
use careermatch_ontology::Ontology;
use serde::Serialize;
use tracing::{debug, info};

/// Experience scores at or above this count as an experience match.
const EXPERIENCE_MATCH_THRESHOLD: f64 = 70.0;

fn round_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, 100.0) as u32
}

/// Stable sort by score descending, then truncate.
///
/// Ties keep catalog order.
fn rank_matches(mut matches: Vec<JobMatch>, top_n: usize) -> Vec<JobMatch> {
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(top_n);
    matches
}

/// Rule-based recommendations.
pub fn score_rule_based(profile: &Profile, jobs: &[Job], config: &ScoringConfig) -> Vec<JobMatch> {
    let weights = &config.rule;

    let matches: Vec<JobMatch> = jobs
        .iter()
        .filter_map(|job| {
            let matched = matched_skills(&profile.skills, &job.required_skills);
            let experience = experience_match(
                profile.years_of_experience,
                job.required_experience,
                config.close_experience_ratio,
            );
            let breakdown = vec![
                DimensionScore::new(
                    Dimension::Skills,
                    skill_match(&profile.skills, &job.required_skills),
                    weights.skills,
                ),
                DimensionScore::new(Dimension::Experience, experience, weights.experience),
                DimensionScore::new(
                    Dimension::Industry,
                    industry_match(&profile.preferred_industry, &job.industry),
                    weights.industry,
                ),
                DimensionScore::new(
                    Dimension::WorkStyle,
                    work_style_match(profile.work_style, &job.work_style),
                    weights.work_style,
                ),
            ];

            let score = round_score(weighted_total(&breakdown));
            debug!(job_id = %job.id, score, "rule-based score");
            if f64::from(score) < config.rule_threshold {
                return None;
            }

            Some(JobMatch {
                job: job.clone(),
                match_score: score,
                match_reasons: match_reasons(&breakdown, &matched),
                experience_match: experience >= EXPERIENCE_MATCH_THRESHOLD,
                breakdown,
                strategy: Strategy::RuleBased,
                ontology: None,
                hybrid: None,
            })
        })
        .collect();

    let ranked = rank_matches(matches, config.top_n);
    info!(
        profile = %profile.name,
        jobs = jobs.len(),
        matches = ranked.len(),
        "rule-based ranking complete"
    );
    ranked
}

/// Ontology-driven semantic recommendations.
pub fn score_ontology(
    profile: &Profile,
    jobs: &[Job],
    ontology: &Ontology,
    config: &ScoringConfig,
) -> Vec<JobMatch> {
    let weights = &config.ontology;

    let matches: Vec<JobMatch> = jobs
        .iter()
        .filter_map(|job| {
            let skills = semantic_skill_match(ontology, &profile.skills, &job.required_skills);
            let (experience, role_bonus) =
                semantic_experience_match(ontology, profile, job, config.close_experience_ratio);
            let industry =
                semantic_industry_match(ontology, &profile.preferred_industry, &job.industry);
            let culture = culture_match(ontology, profile, &job.company);

            let breakdown = vec![
                DimensionScore::new(
                    Dimension::SemanticSkills,
                    skills.score,
                    weights.semantic_skills,
                ),
                DimensionScore::new(Dimension::Experience, experience, weights.experience),
                DimensionScore::new(Dimension::Industry, industry, weights.industry),
                DimensionScore::new(Dimension::Culture, culture, weights.culture),
            ];

            let score = round_score(weighted_total(&breakdown));
            debug!(
                job_id = %job.id,
                score,
                inferred = skills.inferred().count(),
                "ontology score"
            );
            if f64::from(score) < config.ontology_threshold {
                return None;
            }

            let matched: Vec<&str> = skills.matched().map(|s| s.required.as_str()).collect();
            let signals = OntologySignals {
                skills: &skills,
                industry,
                culture,
                role_bonus,
            };

            Some(JobMatch {
                job: job.clone(),
                match_score: score,
                match_reasons: match_reasons(&breakdown, &matched),
                experience_match: experience >= EXPERIENCE_MATCH_THRESHOLD,
                strategy: Strategy::Ontology,
                ontology: Some(OntologyDetail {
                    skill_semantic_score: skills.score,
                    industry_semantic_score: industry,
                    culture_match_score: culture,
                    ontology_reasons: ontology_reasons(profile, job, signals),
                }),
                breakdown,
                hybrid: None,
            })
        })
        .collect();

    let ranked = rank_matches(matches, config.top_n);
    info!(
        profile = %profile.name,
        jobs = jobs.len(),
        matches = ranked.len(),
        "ontology ranking complete"
    );
    ranked
}

/// Graph formula with the title keyword bonus.
///
/// Scores the catalog in memory exactly as the Cypher recommendation query
/// scores a seeded graph.
pub fn score_title_bonus(
    profile: &Profile,
    jobs: &[Job],
    ontology: &Ontology,
    config: &ScoringConfig,
) -> Vec<JobMatch> {
    let weights = &config.title;
    let keywords = extract_keywords(&profile.current_role);

    let matches: Vec<JobMatch> = jobs
        .iter()
        .filter_map(|job| {
            let experience = stepped_experience_match(
                profile.years_of_experience,
                job.required_experience,
                config.close_experience_ratio,
            );
            let title_hits = title_keyword_matches(&keywords, &job.title);
            let title = if title_hits.is_empty() { 0.0 } else { 100.0 };

            let breakdown = vec![
                DimensionScore::new(
                    Dimension::Skills,
                    direct_skill_match(&profile.skills, &job.required_skills),
                    weights.skills,
                ),
                DimensionScore::new(
                    Dimension::Industry,
                    graph_industry_match(ontology, &profile.preferred_industry, &job.industry),
                    weights.industry,
                ),
                DimensionScore::new(Dimension::Experience, experience, weights.experience),
                DimensionScore::new(Dimension::TitleKeywords, title, weights.title),
            ];

            let raw = weighted_total(&breakdown);
            debug!(job_id = %job.id, raw, title_hits = ?title_hits, "title bonus score");
            if raw <= config.title_threshold {
                return None;
            }

            Some(JobMatch {
                job: job.clone(),
                match_score: round_score(raw),
                match_reasons: title_bonus_reasons(&breakdown),
                experience_match: experience >= EXPERIENCE_MATCH_THRESHOLD,
                breakdown,
                strategy: Strategy::Graph,
                ontology: None,
                hybrid: None,
            })
        })
        .collect();

    let ranked = rank_matches(matches, config.top_n);
    info!(
        profile = %profile.name,
        jobs = jobs.len(),
        matches = ranked.len(),
        "title bonus ranking complete"
    );
    ranked
}

/// Merge a rule-based and an ontology list into hybrid matches.
///
/// Every record scores round((rule + ontology) / 2), a missing side counting
/// as 0. Ties keep rule-based order, then ontology-only order.
pub fn combine(rule_based: &[JobMatch], ontology: &[JobMatch], top_n: usize) -> Vec<JobMatch> {
    let mut combined: Vec<JobMatch> = Vec::with_capacity(rule_based.len() + ontology.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in rule_based {
        let mut entry = m.clone();
        entry.strategy = Strategy::Hybrid;
        entry.hybrid = Some(HybridDetail {
            rule_based_score: m.match_score,
            ontology_score: 0,
            approaches: vec![Strategy::RuleBased],
        });
        index.insert(m.job.id.as_str(), combined.len());
        combined.push(entry);
    }

    for m in ontology {
        match index.get(m.job.id.as_str()) {
            Some(&i) => {
                let entry = &mut combined[i];
                entry.ontology = m.ontology.clone();
                if let Some(hybrid) = entry.hybrid.as_mut() {
                    hybrid.ontology_score = m.match_score;
                    hybrid.approaches.push(Strategy::Ontology);
                }
            }
            None => {
                let mut entry = m.clone();
                entry.strategy = Strategy::Hybrid;
                entry.hybrid = Some(HybridDetail {
                    rule_based_score: 0,
                    ontology_score: m.match_score,
                    approaches: vec![Strategy::Ontology],
                });
                index.insert(m.job.id.as_str(), combined.len());
                combined.push(entry);
            }
        }
    }

    for entry in &mut combined {
        if let Some(h) = &entry.hybrid {
            entry.match_score = round_score(f64::from(h.rule_based_score + h.ontology_score) / 2.0);
        }
    }

    rank_matches(combined, top_n)
}

/// Run rule-based and ontology scoring in parallel and join.
fn score_both(
    profile: &Profile,
    jobs: &[Job],
    ontology: &Ontology,
    config: &ScoringConfig,
) -> (Vec<JobMatch>, Vec<JobMatch>) {
    rayon::join(
        || score_rule_based(profile, jobs, config),
        || score_ontology(profile, jobs, ontology, config),
    )
}

/// Hybrid recommendations.
pub fn score_hybrid(
    profile: &Profile,
    jobs: &[Job],
    ontology: &Ontology,
    config: &ScoringConfig,
) -> Vec<JobMatch> {
    let (rule_based, semantic) = score_both(profile, jobs, ontology, config);
    let hybrid = combine(&rule_based, &semantic, config.top_n);
    info!(
        rule_based = rule_based.len(),
        ontology = semantic.len(),
        hybrid = hybrid.len(),
        "hybrid ranking complete"
    );
    hybrid
}

/// Dispatch on a strategy name.
pub fn rank(
    strategy: Strategy,
    profile: &Profile,
    jobs: &[Job],
    ontology: &Ontology,
    config: &ScoringConfig,
) -> Vec<JobMatch> {
    match strategy {
        Strategy::RuleBased => score_rule_based(profile, jobs, config),
        Strategy::Ontology => score_ontology(profile, jobs, ontology, config),
        Strategy::Hybrid => score_hybrid(profile, jobs, ontology, config),
        Strategy::Graph => score_title_bonus(profile, jobs, ontology, config),
    }
}

/// One strategy's column in a comparison.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub algorithm: &'static str,
    /// Size of the full ranked list
    pub count: usize,
    /// Leading matches only
    pub recommendations: Vec<JobMatch>,
}

impl StrategyResult {
    fn new(strategy: Strategy, mut matches: Vec<JobMatch>, shown: usize) -> Self {
        let count = matches.len();
        matches.truncate(shown);
        Self {
            strategy,
            algorithm: strategy.algorithm(),
            count,
            recommendations: matches,
        }
    }
}

/// Rule-based, ontology and hybrid results side by side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub rule_based: StrategyResult,
    pub ontology_based: StrategyResult,
    pub hybrid: StrategyResult,
}

pub fn compare(
    profile: &Profile,
    jobs: &[Job],
    ontology: &Ontology,
    config: &ScoringConfig,
) -> Comparison {
    let (rule_based, semantic) = score_both(profile, jobs, ontology, config);
    let hybrid = combine(&rule_based, &semantic, config.top_n);
    let shown = config.compare_top_n;

    Comparison {
        rule_based: StrategyResult::new(Strategy::RuleBased, rule_based, shown),
        ontology_based: StrategyResult::new(Strategy::Ontology, semantic, shown),
        hybrid: StrategyResult::new(Strategy::Hybrid, hybrid, shown),
    }
}
