//! Run configuration
//!
//! Built once from the command line and passed down explicitly.

use crate::core::classify::Classification;

/// Knowledge-base article base URL
pub const KB_BASE_URL: &str = "https://portal.nutanix.com/kb/";

/// Tracker issue base URL
pub const TRACKER_BASE_URL: &str = "https://jira.nutanix.com/browse/";

/// Tracker quick-search base URL
pub const QUERY_BASE_URL: &str = "https://jira.nutanix.com/secure/QuickSearch.jspa?searchString=";

/// Base URLs plus the per-run free-text query suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub kb_base: String,
    pub tracker_base: String,
    pub query_base: String,
    /// Literal appended after the quoted search phrase (e.g. an ordering clause)
    pub query_suffix: Option<String>,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            kb_base: KB_BASE_URL.to_string(),
            tracker_base: TRACKER_BASE_URL.to_string(),
            query_base: QUERY_BASE_URL.to_string(),
            query_suffix: None,
        }
    }
}

impl Destinations {
    /// Default destinations with an optional query suffix
    pub fn with_query_suffix(suffix: Option<String>) -> Self {
        Self {
            query_suffix: suffix.filter(|s| !s.is_empty()),
            ..Self::default()
        }
    }

    /// Resolve the URL for a classification
    pub fn url_for(&self, classification: &Classification) -> String {
        match classification {
            Classification::KnowledgeBase(id) => format!("{}{}", self.kb_base, id),
            Classification::Tracker(key) => format!("{}{}", self.tracker_base, key),
            Classification::FreeTextQuery(raw) => {
                let mut url = format!("{}text ~ \"{}\"", self.query_base, raw);
                if let Some(suffix) = &self.query_suffix {
                    url.push_str(suffix);
                }
                url
            }
        }
    }
}

/// Everything a run needs to know, resolved from the CLI
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Verbose logging and dry run (no browser launches)
    pub debug: bool,
    /// Abort on the first launch failure instead of continuing
    pub fail_fast: bool,
    pub destinations: Destinations,
}
