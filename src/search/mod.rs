pub mod client;
pub mod normalize;
pub mod pipeline;

pub use client::SearchClient;
pub use pipeline::{SearchOutcome, SearchPipeline, SearchProfile};

use crate::config::Freshness;
use serde::{Deserialize, Serialize};

/// The three search tools. They share one pipeline and differ only in
/// endpoint, credential, request flags and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    ChineseWeb,
    EnglishWeb,
    Ai,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [SearchKind::ChineseWeb, SearchKind::EnglishWeb, SearchKind::Ai];

    /// Tool identifier exposed to the host
    pub fn tool_id(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb => "search_chinese_web",
            SearchKind::EnglishWeb => "search_english_web",
            SearchKind::Ai => "search_ai_intelligent",
        }
    }

    /// Name of the credential setting / environment variable
    pub fn credential_role(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb | SearchKind::Ai => "BOCHA_API_KEY",
            SearchKind::EnglishWeb => "LANGSEARCH_API_KEY",
        }
    }

    /// Upper bound accepted by the provider for `count`
    pub fn max_count(self) -> u32 {
        match self {
            SearchKind::ChineseWeb | SearchKind::EnglishWeb => 10,
            SearchKind::Ai => 50,
        }
    }

    /// Human-readable operation name used in progress messages
    pub fn display_name(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb => "中文网页搜索",
            SearchKind::EnglishWeb => "英文网页搜索",
            SearchKind::Ai => "AI智能搜索",
        }
    }

    /// `source_type` label written on every result item
    pub fn source_label(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb => "🇨🇳 中文网页",
            SearchKind::EnglishWeb => "🌐 英文网页",
            SearchKind::Ai => "🤖 AI智能搜索",
        }
    }

    /// Prefix for the citation source name
    pub fn citation_marker(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb => "🇨🇳",
            SearchKind::EnglishWeb => "🌐",
            SearchKind::Ai => "🤖",
        }
    }

    fn start_marker(self) -> &'static str {
        match self {
            SearchKind::Ai => "🤖",
            _ => "🔍",
        }
    }

    fn server_name(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb => "中文搜索",
            SearchKind::EnglishWeb => "英文搜索",
            SearchKind::Ai => "AI智能搜索",
        }
    }

    fn results_name(self) -> &'static str {
        match self {
            SearchKind::ChineseWeb => "中文网页",
            SearchKind::EnglishWeb => "英文网页",
            SearchKind::Ai => "AI搜索",
        }
    }

    pub(crate) fn started_message(self, query: &str) -> String {
        format!("{} 正在进行{}: {}", self.start_marker(), self.display_name(), query)
    }

    pub(crate) fn connecting_message(self) -> String {
        format!("⏳ 正在连接{}服务器...", self.server_name())
    }

    pub(crate) fn processing_message(self, count: usize) -> String {
        format!("📄 正在处理 {} 个{}结果...", count, self.results_name())
    }

    pub(crate) fn failed_message(self, error: &str) -> String {
        format!("❌ {}出错: {}", self.display_name(), error)
    }

    /// `type` label of the error report
    pub fn error_label(self) -> String {
        format!("❌ {}错误", self.display_name())
    }
}

/// One normalized search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Provider summary, falling back to the snippet
    pub content: String,
    pub title: String,
    pub url: String,
    /// Empty when the provider gave no site name
    pub site_name: String,
    /// Empty when the provider gave no publication date
    pub date_published: String,
    pub source_type: String,
}

/// Aggregate returned by the AI search tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSearchResult {
    pub search_results: Vec<ResultItem>,
    pub ai_answers: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub summary: AiSearchSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSearchSummary {
    pub total_results: usize,
    pub ai_answers_count: usize,
    pub follow_up_count: usize,
    pub search_type: String,
}

/// JSON body posted to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub freshness: Freshness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    pub count: u32,
}

impl SearchRequest {
    pub fn new(kind: SearchKind, query: impl Into<String>, freshness: Freshness, count: u32) -> Self {
        let ai = kind == SearchKind::Ai;
        Self {
            query: query.into(),
            freshness,
            summary: (!ai).then_some(true),
            answer: ai.then_some(true),
            stream: ai.then_some(false),
            count,
        }
    }
}

/// Structured failure payload returned instead of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub endpoint: String,
    pub api_key_used: String,
    pub payload: SearchRequest,
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request timed out after {after:?}: {source}")]
    Timeout {
        after: std::time::Duration,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_request_body() {
        let request = SearchRequest::new(SearchKind::ChineseWeb, "天气", Freshness::NoLimit, 10);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "天气", "freshness": "noLimit", "summary": true, "count": 10 })
        );
    }

    #[test]
    fn test_ai_request_body() {
        let request = SearchRequest::new(SearchKind::Ai, "rust", Freshness::OneMonth, 30);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "rust", "freshness": "oneMonth", "answer": true, "stream": false, "count": 30 })
        );
    }

    #[test]
    fn test_request_preserves_field_order() {
        let request = SearchRequest::new(SearchKind::EnglishWeb, "q", Freshness::OneDay, 5);
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"query":"q","freshness":"oneDay","summary":true,"count":5}"#
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SearchKind::ChineseWeb.error_label(), "❌ 中文网页搜索错误");
        assert_eq!(
            SearchKind::EnglishWeb.started_message("hello"),
            "🔍 正在进行英文网页搜索: hello"
        );
        assert_eq!(SearchKind::Ai.started_message("hi"), "🤖 正在进行AI智能搜索: hi");
        assert_eq!(SearchKind::Ai.connecting_message(), "⏳ 正在连接AI智能搜索服务器...");
        assert_eq!(SearchKind::Ai.processing_message(3), "📄 正在处理 3 个AI搜索结果...");
        assert_eq!(
            SearchKind::ChineseWeb.failed_message("boom"),
            "❌ 中文网页搜索出错: boom"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = SearchError::Status {
            status: 401,
            body: "invalid key".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: invalid key");
    }
}
