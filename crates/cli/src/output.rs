//! Text and JSON rendering.

use anyhow::Result;
use careermatch_explain::summarize_match;
use careermatch_model::{Job, JobMatch, Profile, Strategy};
use careermatch_rerank::{Comparison, StrategyResult};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchOutput<'a> {
    strategy: Strategy,
    algorithm: &'static str,
    profile: &'a str,
    total_count: usize,
    recommendations: &'a [JobMatch],
}

pub fn print_matches(
    profile: &Profile,
    strategy: Strategy,
    matches: &[JobMatch],
    format: Format,
) -> Result<()> {
    if format == Format::Json {
        let output = MatchOutput {
            strategy,
            algorithm: strategy.algorithm(),
            profile: &profile.name,
            total_count: matches.len(),
            recommendations: matches,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Matching: {} ({})", profile.name, profile.current_role);
    println!("Strategy: {}", strategy.algorithm());
    println!("---");

    if matches.is_empty() {
        println!("No matches found");
    }
    for (i, m) in matches.iter().enumerate() {
        print_match(i + 1, m);
    }

    println!("\n---");
    println!("Total: {} matches", matches.len());
    Ok(())
}

fn print_match(rank: usize, m: &JobMatch) {
    println!("\n{}. {} at {} (ID: {})", rank, m.job.title, m.job.company, m.job.id);
    if !m.job.location.is_empty() {
        println!("   {} | {}", m.job.location, m.job.salary_range);
    }
    println!("   {}", summarize_match(m));

    if let Some(hybrid) = &m.hybrid {
        println!(
            "   Rule-based: {} | Ontology: {}",
            hybrid.rule_based_score, hybrid.ontology_score
        );
    }
    if let Some(detail) = &m.ontology {
        for reason in &detail.ontology_reasons {
            println!("   * {}", reason);
        }
    }
}

fn print_column(result: &StrategyResult) {
    println!("\n== {} ({} matches) ==", result.algorithm, result.count);
    for (i, m) in result.recommendations.iter().enumerate() {
        println!("{}. {} at {}: {}%", i + 1, m.job.title, m.job.company, m.match_score);
    }
}

pub fn print_comparison(profile: &Profile, comparison: &Comparison, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(comparison)?),
        Format::Text => {
            println!("Comparing strategies for: {}", profile.name);
            print_column(&comparison.rule_based);
            print_column(&comparison.ontology_based);
            print_column(&comparison.hybrid);
        }
    }
    Ok(())
}

pub fn print_jobs(jobs: &[Job], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(jobs)?),
        Format::Text => {
            for job in jobs {
                println!(
                    "{:>3}  {} at {} [{}] {}+ yrs: {}",
                    job.id,
                    job.title,
                    job.company,
                    job.industry,
                    job.required_experience,
                    job.required_skills.join(", ")
                );
            }
            println!("\nTotal: {} jobs", jobs.len());
        }
    }
    Ok(())
}
