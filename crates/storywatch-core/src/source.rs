//! Source management wire types: monitored accounts and scrape results.

use serde::{Deserialize, Serialize};

/// A monitored upstream account, as returned by `GET /api/sources`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: i64,
    pub platform: String,
    pub account_handle: String,
    pub account_name: String,
    pub is_trusted: bool,
    pub is_kenyan: bool,
    #[serde(default)]
    pub location: Option<String>,
    /// Bare ISO 8601 timestamp without offset, or null if never checked.
    #[serde(default)]
    pub last_checked_at: Option<String>,
}

/// Counts reported by the backend after a manually triggered scrape of one
/// source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub success: bool,
    pub posts_fetched: u64,
    pub posts_processed: u64,
    pub stories_created: u64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_info_deserializes_with_null_optionals() {
        let json = r#"{
            "id": 7,
            "platform": "TikTok",
            "account_handle": "@newsdesk",
            "account_name": "News Desk",
            "is_trusted": true,
            "is_kenyan": false,
            "location": null,
            "last_checked_at": null
        }"#;
        let source: SourceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(source.id, 7);
        assert!(source.is_trusted);
        assert!(source.location.is_none());
        assert!(source.last_checked_at.is_none());
    }

    #[test]
    fn scrape_outcome_deserializes_failure_shape() {
        let json = r#"{
            "success": false,
            "posts_fetched": 0,
            "posts_processed": 0,
            "stories_created": 0,
            "error": "rate limited"
        }"#;
        let outcome: ScrapeOutcome = serde_json::from_str(json).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("rate limited"));
        assert!(outcome.source.is_none());
    }
}
