//! Role and job title normalization.

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("dev", "developer"),
    ("eng", "engineer"),
    ("mgr", "manager"),
    ("fullstack", "full stack"),
    ("backend", "back end"),
    ("frontend", "front end"),
    ("qa", "quality assurance"),
    ("ui", "user interface"),
    ("ux", "user experience"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("sr", "senior"),
    ("jr", "junior"),
    ("tech", "technical"),
    ("admin", "administrator"),
    ("sys", "system"),
    ("ops", "operations"),
];

const STOP_WORDS: &[&str] = &["a", "an", "the", "of", "for", "in", "at", "to"];

fn expand(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|(_, full)| *full)
}

/// Split a glued token ("fullstackdev", "devops") into abbreviations.
///
/// Only succeeds when the whole token decomposes, so real words that merely
/// start with an abbreviation ("engineer", "aide") are left alone.
fn split_glued(token: &str) -> Option<Vec<&'static str>> {
    if token.is_empty() {
        return Some(Vec::new());
    }
    for (abbr, full) in ABBREVIATIONS {
        if let Some(rest) = token.strip_prefix(abbr) {
            if let Some(mut tail) = split_glued(rest) {
                tail.insert(0, *full);
                return Some(tail);
            }
        }
    }
    None
}

/// Normalize a role or job title: lowercase, split on whitespace, '-' and
/// '_', expand abbreviations, collapse whitespace.
pub fn normalize_title(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    lowered
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|t| !t.is_empty())
        .map(|token| match expand(token) {
            Some(full) => full.to_string(),
            None => match split_glued(token) {
                Some(parts) if parts.len() > 1 => parts.join(" "),
                _ => token.to_string(),
            },
        })
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unique keywords of a normalized title, without stop words or
/// single-character tokens.
pub fn extract_keywords(input: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in normalize_title(input).split(' ') {
        if word.chars().count() > 1
            && !STOP_WORDS.contains(&word)
            && !keywords.iter().any(|k| k == word)
        {
            keywords.push(word.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_expands_abbreviations() {
        assert_eq!(normalize_title("Sr. Frontend Dev"), "sr. front end developer");
        assert_eq!(normalize_title("  Sr Backend Eng "), "senior back end engineer");
        assert_eq!(normalize_title("QA_Mgr"), "quality assurance manager");
    }

    #[test]
    fn test_normalize_splits_glued_abbreviations() {
        assert_eq!(normalize_title("fullstackdev"), "full stack developer");
        assert_eq!(normalize_title("DevOps"), "developer operations");
        assert_eq!(normalize_title("sysadmin"), "system administrator");
    }

    #[test]
    fn test_normalize_leaves_real_words() {
        assert_eq!(normalize_title("Software Engineer"), "software engineer");
        assert_eq!(normalize_title("Engineer"), "engineer");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_extract_keywords() {
        assert_eq!(
            extract_keywords("Head of the ML Team"),
            vec!["head", "machine", "learning", "team"]
        );
        assert_eq!(extract_keywords("Frontend Developer"), vec!["front", "end", "developer"]);
        assert_eq!(extract_keywords("Dev dev"), vec!["developer"]);
        assert!(extract_keywords("a").is_empty());
    }
}
