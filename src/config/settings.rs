use serde::{Deserialize, Serialize};

use crate::search::SearchKind;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file instead of stderr
    #[serde(default)]
    pub debug: bool,

    /// Debug log file (or directory, when it ends with a separator)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    /// Debug log rotation strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    /// Provider credentials, endpoints and request shaping
    #[serde(default)]
    pub search: SearchSettings,
}

/// Settings shared by the three search tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Bocha AI key, used for Chinese web search and AI search
    pub bocha_api_key: String,

    /// LangSearch key, used for English web search
    pub langsearch_api_key: String,

    pub chinese_web_search_endpoint: String,
    pub english_web_search_endpoint: String,
    pub ai_search_endpoint: String,

    /// Chinese web search result count (1-10)
    pub chinese_search_count: u32,

    /// English web search result count (1-10)
    pub english_search_count: u32,

    /// AI search result count (1-50)
    pub ai_search_count: u32,

    /// Send a citation event for every result
    pub citation_links: bool,

    /// Time range of the search
    pub freshness: Freshness,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            bocha_api_key: "YOUR_BOCHA_API_KEY".to_string(),
            langsearch_api_key: "YOUR_LANGSEARCH_API_KEY".to_string(),
            chinese_web_search_endpoint: "https://api.bochaai.com/v1/web-search".to_string(),
            english_web_search_endpoint: "https://api.langsearch.com/v1/web-search".to_string(),
            ai_search_endpoint: "https://api.bochaai.com/v1/ai-search".to_string(),
            chinese_search_count: 10,
            english_search_count: 10,
            ai_search_count: 10,
            citation_links: true,
            freshness: Freshness::NoLimit,
            timeout_secs: 120,
        }
    }
}

impl SearchSettings {
    /// Endpoint used by the given search kind
    pub fn endpoint(&self, kind: SearchKind) -> &str {
        match kind {
            SearchKind::ChineseWeb => &self.chinese_web_search_endpoint,
            SearchKind::EnglishWeb => &self.english_web_search_endpoint,
            SearchKind::Ai => &self.ai_search_endpoint,
        }
    }

    /// Credential used by the given search kind
    pub fn credential(&self, kind: SearchKind) -> &str {
        match kind {
            SearchKind::ChineseWeb | SearchKind::Ai => &self.bocha_api_key,
            SearchKind::EnglishWeb => &self.langsearch_api_key,
        }
    }

    /// Result count for the given search kind, clamped to the provider's limit
    pub fn count(&self, kind: SearchKind) -> u32 {
        let requested = match kind {
            SearchKind::ChineseWeb => self.chinese_search_count,
            SearchKind::EnglishWeb => self.english_search_count,
            SearchKind::Ai => self.ai_search_count,
        };
        let max = kind.max_count();
        let count = requested.clamp(1, max);
        if count != requested {
            tracing::warn!(
                kind = ?kind,
                requested,
                used = count,
                "search count outside 1..={}, clamping",
                max
            );
        }
        count
    }

    /// Replace credentials with non-empty values from `lookup`
    ///
    /// `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_credential_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(SearchKind::ChineseWeb.credential_role()) {
            self.bocha_api_key = key;
        }
        if let Some(key) = non_empty(SearchKind::EnglishWeb.credential_role()) {
            self.langsearch_api_key = key;
        }
    }
}

/// Freshness filter understood by Bocha and LangSearch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Freshness {
    #[default]
    NoLimit,
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
}

/// Debug log rotation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Append to a single file
    None,
    /// One file per day
    Daily,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_public_endpoints() {
        let settings = SearchSettings::default();
        assert_eq!(
            settings.endpoint(SearchKind::ChineseWeb),
            "https://api.bochaai.com/v1/web-search"
        );
        assert_eq!(
            settings.endpoint(SearchKind::EnglishWeb),
            "https://api.langsearch.com/v1/web-search"
        );
        assert_eq!(
            settings.endpoint(SearchKind::Ai),
            "https://api.bochaai.com/v1/ai-search"
        );
        assert_eq!(settings.timeout_secs, 120);
        assert!(settings.citation_links);
    }

    #[test]
    fn test_credentials_by_kind() {
        let settings = SearchSettings {
            bocha_api_key: "bocha".to_string(),
            langsearch_api_key: "lang".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.credential(SearchKind::ChineseWeb), "bocha");
        assert_eq!(settings.credential(SearchKind::Ai), "bocha");
        assert_eq!(settings.credential(SearchKind::EnglishWeb), "lang");
    }

    #[test]
    fn test_count_is_clamped_per_provider() {
        let settings = SearchSettings {
            chinese_search_count: 0,
            english_search_count: 25,
            ai_search_count: 25,
            ..Default::default()
        };
        assert_eq!(settings.count(SearchKind::ChineseWeb), 1);
        assert_eq!(settings.count(SearchKind::EnglishWeb), 10);
        assert_eq!(settings.count(SearchKind::Ai), 25);

        let settings = SearchSettings {
            ai_search_count: 99,
            ..Default::default()
        };
        assert_eq!(settings.count(SearchKind::Ai), 50);
    }

    #[test]
    fn test_freshness_wire_names() {
        assert_eq!(serde_json::to_string(&Freshness::NoLimit).unwrap(), "\"noLimit\"");
        assert_eq!(serde_json::to_string(&Freshness::OneWeek).unwrap(), "\"oneWeek\"");
        let parsed: Freshness = serde_json::from_str("\"oneYear\"").unwrap();
        assert_eq!(parsed, Freshness::OneYear);
    }

    #[test]
    fn test_credential_overrides_skip_blank_values() {
        let mut settings = SearchSettings::default();
        settings.apply_credential_overrides(|name| match name {
            "BOCHA_API_KEY" => Some("from-env".to_string()),
            "LANGSEARCH_API_KEY" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(settings.bocha_api_key, "from-env");
        assert_eq!(settings.langsearch_api_key, "YOUR_LANGSEARCH_API_KEY");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            bocha_api_key = "abc"
            freshness = "oneDay"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.bocha_api_key, "abc");
        assert_eq!(config.search.freshness, Freshness::OneDay);
        assert_eq!(config.search.ai_search_count, 10);
        assert!(!config.debug);
    }
}
