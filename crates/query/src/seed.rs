//! Statements that load the ontology and a job catalog into the graph.

use careermatch_model::Job;
use careermatch_ontology::Ontology;
use serde_json::{json, Value};

use crate::CypherStatement;

const CLEAR: &str = "MATCH (n) DETACH DELETE n";

const CATEGORIES: &str = "UNWIND $categories AS name MERGE (:Category {name: name})";

const SKILLS: &str = "\
UNWIND $skills AS skill
MERGE (s:Skill {name: skill.name})
SET s.level = skill.level
WITH s, skill
MATCH (c:Category {name: skill.category})
MERGE (s)-[:BELONGS_TO]->(c)";

const SUB_SKILLS: &str = "\
UNWIND $pairs AS pair
MERGE (parent:Skill {name: pair.from})
MERGE (child:Skill {name: pair.to})
MERGE (parent)-[:HAS_SUB_SKILL]->(child)";

const RELATED_SKILLS: &str = "\
UNWIND $pairs AS pair
MERGE (a:Skill {name: pair.from})
MERGE (b:Skill {name: pair.to})
MERGE (a)-[:RELATED_TO]->(b)";

const INDUSTRIES: &str = "UNWIND $industries AS name MERGE (:Industry {name: name})";

const SUB_INDUSTRIES: &str = "\
UNWIND $pairs AS pair
MERGE (parent:Industry {name: pair.from})
MERGE (child:Industry {name: pair.to})
MERGE (parent)-[:HAS_SUB_INDUSTRY]->(child)";

const JOBS: &str = "\
UNWIND $jobs AS job
MERGE (c:Company {name: job.company})
SET c.size = coalesce(job.companySize, c.size)
CREATE (j:Job {
  id: job.id, title: job.title, location: job.location, salaryRange: job.salaryRange,
  requiredSkills: job.requiredSkills, requiredExperience: job.requiredExperience,
  workStyle: job.workStyle, description: job.description,
  companySize: job.companySize, benefits: job.benefits
})
MERGE (c)-[:POSTED]->(j)
MERGE (i:Industry {name: job.industry})
MERGE (j)-[:IN_INDUSTRY]->(i)
FOREACH (name IN job.requiredSkills |
  MERGE (s:Skill {name: name})
  MERGE (j)-[:REQUIRES_SKILL]->(s))";

const ALL_JOBS: &str = "\
MATCH (c:Company)-[:POSTED]->(j:Job)
OPTIONAL MATCH (j)-[:IN_INDUSTRY]->(i:Industry)
RETURN j.id AS id, j.title AS title, c.name AS company, j.location AS location,
       j.salaryRange AS salaryRange, j.requiredSkills AS requiredSkills,
       j.requiredExperience AS requiredExperience, i.name AS industry,
       j.workStyle AS workStyle, j.description AS description,
       j.companySize AS companySize, j.benefits AS benefits
ORDER BY c.name, j.title";

fn pairs(edges: impl IntoIterator<Item = (String, String)>) -> Value {
    Value::Array(
        edges
            .into_iter()
            .map(|(from, to)| json!({ "from": from, "to": to }))
            .collect(),
    )
}

/// Statements that wipe the graph and rebuild it, in execution order.
pub fn seed_statements(ontology: &Ontology, jobs: &[Job]) -> Vec<CypherStatement> {
    let data = ontology.data();

    let skills: Vec<Value> = data
        .skills
        .iter()
        .map(|s| json!({ "name": s.name, "category": s.category, "level": s.level }))
        .collect();

    let sub_skills = pairs(data.skills.iter().flat_map(|s| {
        s.sub_skills
            .iter()
            .map(move |sub| (s.name.clone(), sub.clone()))
    }));

    let related = pairs(data.skills.iter().flat_map(|s| {
        s.related_skills
            .iter()
            .map(move |r| (s.name.clone(), r.clone()))
    }));

    let industries: Vec<&str> = data.industries.iter().map(|i| i.name.as_str()).collect();

    vec![
        CypherStatement::new(CLEAR, json!({})),
        CypherStatement::new(CATEGORIES, json!({ "categories": ontology.categories() })),
        CypherStatement::new(SKILLS, json!({ "skills": skills })),
        CypherStatement::new(SUB_SKILLS, json!({ "pairs": sub_skills })),
        CypherStatement::new(RELATED_SKILLS, json!({ "pairs": related })),
        CypherStatement::new(INDUSTRIES, json!({ "industries": industries })),
        CypherStatement::new(SUB_INDUSTRIES, json!({ "pairs": pairs(ontology.industry_edges()) })),
        CypherStatement::new(JOBS, json!({ "jobs": jobs })),
    ]
}

/// Every job in the graph, shaped like `Job`.
pub fn all_jobs_statement() -> CypherStatement {
    CypherStatement::new(ALL_JOBS, json!({}))
}

pub fn health_statement() -> CypherStatement {
    CypherStatement::new("RETURN 1 AS ok", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use careermatch_model::WorkStyle;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seed_order_starts_with_clear() {
        let statements = seed_statements(Ontology::builtin(), &[]);
        assert_eq!(statements.len(), 8);
        assert_eq!(statements[0].statement, CLEAR);
        assert!(statements[7].statement.contains("REQUIRES_SKILL"));
    }

    #[test]
    fn test_seed_carries_ontology() {
        let statements = seed_statements(Ontology::builtin(), &[]);
        let categories = statements[1].parameters["categories"].as_array().unwrap();
        assert!(categories.contains(&json!("Programming")));

        let edges = statements[6].parameters["pairs"].as_array().unwrap();
        assert!(edges.contains(&json!({ "from": "Technology", "to": "Fintech" })));
    }

    #[test]
    fn test_seed_serializes_jobs_camel_case() {
        let job = Job::new("7", "Backend Engineer", "Acme")
            .with_skills(&["Go"])
            .with_experience(3)
            .with_industry("Fintech")
            .with_work_styles(&[WorkStyle::OnSite]);
        let statements = seed_statements(Ontology::builtin(), &[job]);
        let jobs = &statements[7].parameters["jobs"];
        assert_eq!(jobs[0]["requiredExperience"], json!(3));
        assert_eq!(jobs[0]["workStyle"], json!(["On-site"]));
        assert_eq!(jobs[0]["requiredSkills"], json!(["Go"]));
    }

    #[test]
    fn test_all_jobs_columns_match_job_fields() {
        let statement = all_jobs_statement();
        let columns = [
            "id",
            "title",
            "company",
            "requiredSkills",
            "requiredExperience",
            "workStyle",
        ];
        for column in columns {
            assert!(statement.statement.contains(&format!("AS {column}")));
        }
    }
}
