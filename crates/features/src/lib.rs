//! Feature extraction for job matching.
//!
//! Provides pure functions for the per-dimension scores every strategy is
//! built from. All scores are on a 0.0 - 100.0 scale.
//! - `text`: role/title normalization and keyword extraction
//! - `rule`: substring-based skill, experience, industry and work-style scores
//! - `semantic`: ontology-driven skill, experience, industry and culture scores
//! - `graph`: the direct-match terms of the title keyword formula

pub mod graph;
pub mod rule;
pub mod semantic;
pub mod text;

pub use graph::{
    direct_skill_match, graph_industry_match, stepped_experience_match, title_keyword_matches,
};
pub use rule::{experience_match, industry_match, matched_skills, skill_match, work_style_match};
pub use semantic::{
    culture_match, role_transfer_bonus, semantic_experience_match, semantic_industry_match,
    semantic_skill_match, tech_stack_alignment, SemanticSkillMatch, SkillInference,
};
pub use text::{extract_keywords, normalize_title};

/// Share of the required experience that still earns partial credit.
pub const CLOSE_EXPERIENCE_RATIO: f64 = 0.7;

/// Case-insensitive containment in either direction.
///
/// Deliberately loose: "C" matches "C++" and "R" matches anything with an "r".
pub(crate) fn loose_contains(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}
