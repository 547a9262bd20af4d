//! Built-in career ontology tables.

use crate::{CompanyProfile, IndustryEntry, OntologyData, RoleTransfer, SkillEntry};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn skills() -> Vec<SkillEntry> {
    vec![
        // Programming languages
        SkillEntry {
            name: "JavaScript".into(),
            category: "Programming".into(),
            level: Some("foundational".into()),
            sub_skills: strings(&["React", "Node.js", "Vue.js", "Angular"]),
            related_skills: strings(&["TypeScript", "HTML", "CSS"]),
            ..Default::default()
        },
        SkillEntry {
            name: "TypeScript".into(),
            category: "Programming".into(),
            level: Some("intermediate".into()),
            parent_skills: strings(&["JavaScript"]),
            enhances: strings(&["React", "Node.js", "JavaScript"]),
            ..Default::default()
        },
        SkillEntry {
            name: "Python".into(),
            category: "Programming".into(),
            level: Some("foundational".into()),
            sub_skills: strings(&["Django", "FastAPI", "Flask", "Pandas", "TensorFlow"]),
            related_skills: strings(&["SQL", "Machine Learning"]),
            ..Default::default()
        },
        // Frameworks and libraries
        SkillEntry {
            name: "React".into(),
            category: "Frontend".into(),
            level: Some("intermediate".into()),
            parent_skills: strings(&["JavaScript"]),
            related_skills: strings(&["Redux", "GraphQL", "Webpack"]),
            alternatives: strings(&["Vue.js", "Angular"]),
            implies: strings(&["JavaScript", "HTML", "CSS"]),
            ..Default::default()
        },
        // Domains
        SkillEntry {
            name: "TensorFlow".into(),
            category: "MachineLearning".into(),
            level: Some("advanced".into()),
            parent_skills: strings(&["Python"]),
            related_skills: strings(&["Neural Networks", "Deep Learning"]),
            alternatives: strings(&["PyTorch", "Scikit-learn"]),
            ..Default::default()
        },
    ]
}

fn industries() -> Vec<IndustryEntry> {
    vec![
        IndustryEntry {
            name: "Technology".into(),
            sub_industries: strings(&["Software", "Hardware", "Cloud Computing", "AI/ML"]),
            related_industries: strings(&["Fintech", "Healthtech", "Edtech"]),
            skills: strings(&["Programming", "System Design", "DevOps"]),
            ..Default::default()
        },
        IndustryEntry {
            name: "Fintech".into(),
            parent_industries: strings(&["Technology", "Finance"]),
            skills: strings(&["Payment Systems", "Blockchain", "Financial APIs"]),
            regulations: strings(&["PCI Compliance", "KYC", "AML"]),
            ..Default::default()
        },
        IndustryEntry {
            name: "Healthcare".into(),
            sub_industries: strings(&["Telemedicine", "Medical Devices", "Pharmaceuticals"]),
            skills: strings(&["Healthcare APIs", "Medical Data", "Compliance"]),
            regulations: strings(&["HIPAA", "FDA", "GDPR"]),
            ..Default::default()
        },
    ]
}

fn companies() -> Vec<CompanyProfile> {
    vec![
        CompanyProfile {
            name: "Google".into(),
            kind: "BigTech".into(),
            size: "Large".into(),
            culture: strings(&["Innovation", "Data-Driven", "Research"]),
            technologies: strings(&["Cloud", "AI/ML", "Distributed Systems"]),
            work_styles: strings(&["Hybrid", "Remote-Friendly"]),
            values: strings(&["Technical Excellence", "Scale", "Impact"]),
        },
        CompanyProfile {
            name: "Stripe".into(),
            kind: "Fintech".into(),
            size: "Unicorn".into(),
            culture: strings(&["Developer-First", "Global", "Infrastructure"]),
            technologies: strings(&["Payment Systems", "APIs", "Microservices"]),
            work_styles: strings(&["Remote-First"]),
            values: strings(&["Reliability", "Developer Experience", "Global Scale"]),
        },
    ]
}

pub(crate) fn data() -> OntologyData {
    OntologyData {
        skills: skills(),
        industries: industries(),
        companies: companies(),
        transfer_groups: vec![
            strings(&["TensorFlow", "PyTorch"]),
            strings(&["TensorFlow", "Machine Learning"]),
            strings(&["React", "Vue.js", "Angular"]),
        ],
        role_transfers: vec![
            RoleTransfer {
                from_role: "Frontend Developer".into(),
                to_roles: strings(&["Full Stack Developer", "UI/UX Developer"]),
                bonus: 15.0,
            },
            RoleTransfer {
                from_role: "Backend Engineer".into(),
                to_roles: strings(&["DevOps Engineer", "Platform Engineer"]),
                bonus: 10.0,
            },
        ],
    }
}
