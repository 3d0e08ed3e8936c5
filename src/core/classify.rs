//! Token classification
//!
//! Maps a single search token onto the destination it refers to. Classification
//! is total: anything that is not a KB article or a tracker key becomes a
//! free-text query.

use serde::Serialize;

/// Prefix marking a knowledge-base article (`KB-12345`)
const KB_PREFIX: &str = "KB";

/// Issue tracker project prefixes, checked in order after the KB prefix
const TRACKER_PREFIXES: [&str; 4] = ["ENG", "ONCALL", "TH", "UT"];

/// Where a token should be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Knowledge-base article id (text after the first `-`, may be empty)
    KnowledgeBase(String),
    /// Tracker issue key, uppercased
    Tracker(String),
    /// Raw token used as a search phrase
    FreeTextQuery(String),
}

impl Classification {
    /// Short machine-readable name of the variant
    pub fn kind(&self) -> ClassKind {
        match self {
            Classification::KnowledgeBase(_) => ClassKind::KnowledgeBase,
            Classification::Tracker(_) => ClassKind::Tracker,
            Classification::FreeTextQuery(_) => ClassKind::FreeTextQuery,
        }
    }
}

/// Variant tag of a [`Classification`], used in records and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    KnowledgeBase,
    Tracker,
    FreeTextQuery,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::KnowledgeBase => "knowledge_base",
            ClassKind::Tracker => "tracker",
            ClassKind::FreeTextQuery => "free_text_query",
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a token.
///
/// The token is split on its first `-`; the part before it (or the whole token
/// when there is no `-`) is compared case-insensitively against the known
/// prefixes. KB wins over tracker prefixes, so `KBENG-1` is a KB article.
pub fn classify(token: &str) -> Classification {
    let (prefix, remainder) = token.split_once('-').unwrap_or((token, ""));
    let prefix = prefix.to_ascii_uppercase();

    if prefix.starts_with(KB_PREFIX) {
        return Classification::KnowledgeBase(remainder.to_string());
    }

    if TRACKER_PREFIXES.iter().any(|p| prefix.starts_with(p)) {
        return Classification::Tracker(token.to_ascii_uppercase());
    }

    Classification::FreeTextQuery(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kb_token() {
        assert_eq!(
            classify("KB-12345"),
            Classification::KnowledgeBase("12345".to_string())
        );
    }

    #[test]
    fn test_kb_is_case_insensitive() {
        assert_eq!(
            classify("kb-abc12"),
            Classification::KnowledgeBase("abc12".to_string())
        );
    }

    #[test]
    fn test_kb_id_keeps_everything_after_first_dash() {
        assert_eq!(
            classify("KB-1-2-x"),
            Classification::KnowledgeBase("1-2-x".to_string())
        );
    }

    #[test]
    fn test_kb_without_dash_has_empty_id() {
        assert_eq!(classify("KB"), Classification::KnowledgeBase(String::new()));
        assert_eq!(classify("kb-"), Classification::KnowledgeBase(String::new()));
    }

    #[test]
    fn test_tracker_prefixes() {
        for (token, key) in [
            ("eng-665245", "ENG-665245"),
            ("ONCALL-42", "ONCALL-42"),
            ("th-7", "TH-7"),
            ("Ut-2", "UT-2"),
            ("ENG", "ENG"),
        ] {
            assert_eq!(classify(token), Classification::Tracker(key.to_string()));
        }
    }

    #[test]
    fn test_tracker_prefix_match_is_begins_with() {
        // ENGUT starts with ENG, so the first listed tracker prefix applies
        assert_eq!(
            classify("ENGUT-5"),
            Classification::Tracker("ENGUT-5".to_string())
        );
    }

    #[test]
    fn test_kb_takes_precedence_over_tracker() {
        assert_eq!(
            classify("KBENG-9"),
            Classification::KnowledgeBase("9".to_string())
        );
    }

    #[test]
    fn test_free_text_preserves_case() {
        assert_eq!(
            classify("random text"),
            Classification::FreeTextQuery("random text".to_string())
        );
        assert_eq!(
            classify("Cassandra-Restart"),
            Classification::FreeTextQuery("Cassandra-Restart".to_string())
        );
    }

    #[test]
    fn test_empty_token_is_free_text() {
        assert_eq!(classify(""), Classification::FreeTextQuery(String::new()));
    }

    #[test]
    fn test_classify_is_idempotent() {
        for token in ["KB-1", "eng-2", "hello", "KB", "", "ut"] {
            assert_eq!(classify(token), classify(token));
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(classify("KB-1").kind().as_str(), "knowledge_base");
        assert_eq!(classify("UT-1").kind().as_str(), "tracker");
        assert_eq!(classify("foo").kind().to_string(), "free_text_query");
    }
}
