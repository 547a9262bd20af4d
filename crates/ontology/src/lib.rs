//! Career ontology: static knowledge about skills, industries and companies.
//!
//! The ontology declares relationships that let the semantic scorers infer
//! non-exact matches:
//! - skills: category, sub-skills, implied skills, related skills
//! - transfer groups: skills that substitute for each other (TensorFlow/PyTorch)
//! - industries: parent/child and related industries
//! - companies: size, work styles and technology stack
//! - role transfers: current roles that carry over to a target role
//!
//! Every lookup is case-insensitive and total. Unknown names simply have no
//! relationships; nothing here fails at scoring time.

mod builtin;

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ontology: {0}")]
    Invalid(String),
}

/// A skill and its declared relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub name: String,

    /// Top-level category ("Programming", "Frontend", ...)
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default)]
    pub parent_skills: Vec<String>,

    /// Skills this one is a foundation for
    #[serde(default)]
    pub sub_skills: Vec<String>,

    #[serde(default)]
    pub related_skills: Vec<String>,

    #[serde(default)]
    pub alternatives: Vec<String>,

    /// Skills someone with this skill very likely has too
    #[serde(default)]
    pub implies: Vec<String>,

    #[serde(default)]
    pub enhances: Vec<String>,
}

/// An industry and its neighbours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryEntry {
    pub name: String,

    #[serde(default)]
    pub sub_industries: Vec<String>,

    #[serde(default)]
    pub parent_industries: Vec<String>,

    #[serde(default)]
    pub related_industries: Vec<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub regulations: Vec<String>,
}

/// Company characteristics used for culture matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    /// Size label compared against the profile's preference
    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub culture: Vec<String>,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub work_styles: Vec<String>,

    #[serde(default)]
    pub values: Vec<String>,
}

/// Experience bonus for moving from one role to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleTransfer {
    pub from_role: String,
    pub to_roles: Vec<String>,
    /// Points added to the experience score
    pub bonus: f64,
}

/// Raw ontology tables, as declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyData {
    #[serde(default)]
    pub skills: Vec<SkillEntry>,

    #[serde(default)]
    pub industries: Vec<IndustryEntry>,

    #[serde(default)]
    pub companies: Vec<CompanyProfile>,

    /// Each group lists mutually transferable skills
    #[serde(default)]
    pub transfer_groups: Vec<Vec<String>>,

    #[serde(default)]
    pub role_transfers: Vec<RoleTransfer>,
}

/// How a user skill relates to a required skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillRelation {
    Exact,
    /// Required skill is a sub-skill of, or implied by, the user skill
    Implied,
    Related,
    Transferable,
    SameCategory,
}

impl SkillRelation {
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Exact => 1.0,
            Self::Implied => 0.9,
            Self::Related => 0.8,
            Self::Transferable => 0.75,
            Self::SameCategory => 0.7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Implied => "implied",
            Self::Related => "related",
            Self::Transferable => "transferable",
            Self::SameCategory => "same category",
        }
    }
}

/// How a preferred industry relates to a job's industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndustryRelation {
    Exact,
    Related,
    ParentChild,
}

impl IndustryRelation {
    pub fn score(&self) -> f64 {
        match self {
            Self::Exact => 100.0,
            Self::Related => 85.0,
            Self::ParentChild => 90.0,
        }
    }
}

static BUILTIN: LazyLock<Ontology> = LazyLock::new(|| Ontology::new(builtin::data()));

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn contains_ci(list: &[String], name: &str) -> bool {
    let name = key(name);
    list.iter().any(|item| key(item) == name)
}

/// Indexed, read-only ontology. Cheap to share behind `&` or `Arc`.
#[derive(Debug, Clone)]
pub struct Ontology {
    data: OntologyData,
    skills: HashMap<String, usize>,
    categories: HashMap<String, String>,
    industries: HashMap<String, usize>,
    companies: HashMap<String, usize>,
    /// parent (lowercase) -> children (lowercase)
    sub_industries: HashMap<String, Vec<String>>,
}

impl Ontology {
    /// Index the given tables. The first declaration of a name wins.
    pub fn new(data: OntologyData) -> Self {
        let mut skills = HashMap::new();
        let mut categories = HashMap::new();
        for (i, entry) in data.skills.iter().enumerate() {
            skills.entry(key(&entry.name)).or_insert(i);
            categories
                .entry(key(&entry.name))
                .or_insert_with(|| entry.category.clone());
        }
        // Sub-skills without their own entry inherit the parent's category.
        for entry in &data.skills {
            for sub in &entry.sub_skills {
                categories
                    .entry(key(sub))
                    .or_insert_with(|| entry.category.clone());
            }
        }

        let mut industries = HashMap::new();
        let mut sub_industries: HashMap<String, Vec<String>> = HashMap::new();
        for (i, entry) in data.industries.iter().enumerate() {
            industries.entry(key(&entry.name)).or_insert(i);
            for sub in &entry.sub_industries {
                sub_industries.entry(key(&entry.name)).or_default().push(key(sub));
            }
            for parent in &entry.parent_industries {
                sub_industries.entry(key(parent)).or_default().push(key(&entry.name));
            }
        }

        let companies = data
            .companies
            .iter()
            .enumerate()
            .map(|(i, c)| (key(&c.name), i))
            .rev()
            .collect();

        Self {
            data,
            skills,
            categories,
            industries,
            companies,
            sub_industries,
        }
    }

    /// Load custom tables from JSON (same shape as `OntologyData`).
    pub fn from_json(json: &str) -> Result<Self, OntologyError> {
        let data: OntologyData = serde_json::from_str(json)?;

        if let Some(entry) = data.skills.iter().find(|s| s.name.trim().is_empty()) {
            return Err(OntologyError::Invalid(format!(
                "skill with empty name in category '{}'",
                entry.category
            )));
        }
        if data.industries.iter().any(|i| i.name.trim().is_empty()) {
            return Err(OntologyError::Invalid("industry with empty name".to_string()));
        }

        Ok(Self::new(data))
    }

    /// The built-in career ontology, built once per process.
    pub fn builtin() -> &'static Ontology {
        &BUILTIN
    }

    pub fn data(&self) -> &OntologyData {
        &self.data
    }

    pub fn skill(&self, name: &str) -> Option<&SkillEntry> {
        self.skills.get(&key(name)).map(|&i| &self.data.skills[i])
    }

    /// Top-level category of a skill, from its own entry or the entry
    /// listing it as a sub-skill.
    pub fn skill_category(&self, name: &str) -> Option<&str> {
        self.categories.get(&key(name)).map(String::as_str)
    }

    /// Distinct categories in declaration order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.data
            .skills
            .iter()
            .map(|s| s.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn is_transferable(&self, a: &str, b: &str) -> bool {
        self.data
            .transfer_groups
            .iter()
            .any(|group| contains_ci(group, a) && contains_ci(group, b))
    }

    /// First relationship from `user_skill` to `required_skill`, checked in
    /// priority order: exact, sub-skill or implied, same category, related,
    /// transferable. A lower-confidence relation found earlier wins.
    pub fn skill_relation(&self, user_skill: &str, required_skill: &str) -> Option<SkillRelation> {
        if key(user_skill) == key(required_skill) {
            return Some(SkillRelation::Exact);
        }

        let entry = self.skill(user_skill);

        if entry.is_some_and(|e| {
            contains_ci(&e.sub_skills, required_skill) || contains_ci(&e.implies, required_skill)
        }) {
            return Some(SkillRelation::Implied);
        }

        let user_category = self.skill_category(user_skill);
        if user_category.is_some() && user_category == self.skill_category(required_skill) {
            return Some(SkillRelation::SameCategory);
        }

        if entry.is_some_and(|e| contains_ci(&e.related_skills, required_skill)) {
            return Some(SkillRelation::Related);
        }

        if self.is_transferable(user_skill, required_skill) {
            return Some(SkillRelation::Transferable);
        }

        None
    }

    pub fn industry(&self, name: &str) -> Option<&IndustryEntry> {
        self.industries.get(&key(name)).map(|&i| &self.data.industries[i])
    }

    /// Relationship between a preferred industry and a job's industry,
    /// judged from the job industry's entry.
    pub fn industry_relation(
        &self,
        preferred: &str,
        job_industry: &str,
    ) -> Option<IndustryRelation> {
        if key(preferred) == key(job_industry) {
            return Some(IndustryRelation::Exact);
        }

        let entry = self.industry(job_industry)?;
        if contains_ci(&entry.related_industries, preferred) {
            Some(IndustryRelation::Related)
        } else if contains_ci(&entry.parent_industries, preferred)
            || contains_ci(&entry.sub_industries, preferred)
        {
            Some(IndustryRelation::ParentChild)
        } else {
            None
        }
    }

    /// True when `descendant` is reachable from `ancestor` through one or
    /// more sub-industry edges.
    pub fn is_sub_industry(&self, ancestor: &str, descendant: &str) -> bool {
        let target = key(descendant);
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([key(ancestor)]);

        while let Some(current) = queue.pop_front() {
            let Some(children) = self.sub_industries.get(&current) else {
                continue;
            };
            for child in children {
                if *child == target {
                    return true;
                }
                if visited.insert(child.clone()) {
                    queue.push_back(child.clone());
                }
            }
        }

        false
    }

    /// Sub-industry edges as declared (parent, child), original casing.
    pub fn industry_edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        for entry in &self.data.industries {
            for sub in &entry.sub_industries {
                edges.push((entry.name.clone(), sub.clone()));
            }
            for parent in &entry.parent_industries {
                edges.push((parent.clone(), entry.name.clone()));
            }
        }
        edges
    }

    pub fn company(&self, name: &str) -> Option<&CompanyProfile> {
        self.companies.get(&key(name)).map(|&i| &self.data.companies[i])
    }

    pub fn role_transfers(&self) -> &[RoleTransfer] {
        &self.data.role_transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ontology() -> &'static Ontology {
        Ontology::builtin()
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        assert_eq!(ontology().skill_relation("react", "React"), Some(SkillRelation::Exact));
        assert_eq!(
            ontology().skill_relation("Unheard Of", "unheard of"),
            Some(SkillRelation::Exact)
        );
    }

    #[test]
    fn test_sub_skill_and_implication() {
        assert_eq!(
            ontology().skill_relation("JavaScript", "React"),
            Some(SkillRelation::Implied)
        );
        assert_eq!(
            ontology().skill_relation("Python", "tensorflow"),
            Some(SkillRelation::Implied)
        );
        assert_eq!(ontology().skill_relation("React", "CSS"), Some(SkillRelation::Implied));
    }

    #[test]
    fn test_related_skill() {
        assert_eq!(ontology().skill_relation("Python", "SQL"), Some(SkillRelation::Related));
        assert_eq!(
            ontology().skill_relation("TensorFlow", "Deep Learning"),
            Some(SkillRelation::Related)
        );
    }

    #[test]
    fn test_transferable_without_shared_category() {
        // PyTorch has no category, so the transfer group decides.
        assert_eq!(
            ontology().skill_relation("TensorFlow", "PyTorch"),
            Some(SkillRelation::Transferable)
        );
        assert_eq!(
            ontology().skill_relation("PyTorch", "TensorFlow"),
            Some(SkillRelation::Transferable)
        );
        assert_eq!(SkillRelation::Transferable.confidence(), 0.75);
    }

    #[test]
    fn test_category_is_checked_before_related_and_transfer() {
        // TypeScript is related to JavaScript, Vue.js and Angular share a
        // transfer group, but each pair is in "Programming" first.
        assert_eq!(
            ontology().skill_relation("JavaScript", "TypeScript"),
            Some(SkillRelation::SameCategory)
        );
        assert_eq!(
            ontology().skill_relation("Vue.js", "Angular"),
            Some(SkillRelation::SameCategory)
        );
        assert_eq!(SkillRelation::SameCategory.confidence(), 0.7);
    }

    #[test]
    fn test_same_category() {
        assert_eq!(ontology().skill_category("Django"), Some("Programming"));
        assert_eq!(ontology().skill_category("React"), Some("Frontend"));
        assert_eq!(
            ontology().skill_relation("Django", "Node.js"),
            Some(SkillRelation::SameCategory)
        );
    }

    #[test]
    fn test_unknown_skills_are_unrelated() {
        assert_eq!(ontology().skill_relation("Cobol", "Fortran"), None);
        assert_eq!(ontology().skill_relation("Go", "Python"), None);
        assert_eq!(ontology().skill_category("Fortran"), None);
    }

    #[test]
    fn test_industry_relations() {
        let o = ontology();
        assert_eq!(o.industry_relation("technology", "Technology"), Some(IndustryRelation::Exact));
        assert_eq!(o.industry_relation("Fintech", "Technology"), Some(IndustryRelation::Related));
        let parent_child = Some(IndustryRelation::ParentChild);
        assert_eq!(o.industry_relation("Technology", "Fintech"), parent_child);
        assert_eq!(o.industry_relation("Software", "Technology"), parent_child);
        assert_eq!(o.industry_relation("Technology", "Gaming"), None);
        assert_eq!(o.industry_relation("Gaming", "Retail"), None);
    }

    #[test]
    fn test_sub_industry_is_transitive() {
        let o = Ontology::new(OntologyData {
            industries: vec![
                IndustryEntry {
                    name: "Technology".into(),
                    sub_industries: vec!["Software".into()],
                    ..Default::default()
                },
                IndustryEntry {
                    name: "Software".into(),
                    sub_industries: vec!["SaaS".into()],
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        assert!(o.is_sub_industry("Technology", "saas"));
        assert!(!o.is_sub_industry("SaaS", "Technology"));
        assert!(!o.is_sub_industry("Technology", "Technology"));
    }

    #[test]
    fn test_parent_declarations_become_edges() {
        let o = ontology();
        assert!(o.is_sub_industry("Technology", "Fintech"));
        assert!(o.is_sub_industry("Finance", "Fintech"));
        assert!(o.industry_edges().contains(&("Technology".to_string(), "Fintech".to_string())));
    }

    #[test]
    fn test_company_lookup() {
        let google = ontology().company("google").unwrap();
        assert_eq!(google.size, "Large");
        assert!(ontology().company("Initech").is_none());
    }

    #[test]
    fn test_categories_in_order() {
        assert_eq!(
            ontology().categories(),
            vec!["Programming", "Frontend", "MachineLearning"]
        );
    }

    #[test]
    fn test_from_json() {
        let o = Ontology::from_json(
            r#"{"skills": [{"name": "Rust", "category": "Systems", "relatedSkills": ["C++"]}]}"#,
        )
        .unwrap();
        assert_eq!(o.skill_relation("rust", "c++"), Some(SkillRelation::Related));
        assert!(o.company("Google").is_none());

        assert!(matches!(
            Ontology::from_json(r#"{"skills": [{"name": " ", "category": "X"}]}"#),
            Err(OntologyError::Invalid(_))
        ));
    }
}
