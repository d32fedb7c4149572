use crate::config::Config;
use crate::search::{SearchKind, SearchPipeline};
use crate::tool::base::{Tool, ToolContext, ToolError, ToolResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Search tool backed by one [`SearchPipeline`]
///
/// - `search_chinese_web`: Bocha web search, summaries included
/// - `search_english_web`: LangSearch web search, summaries included
/// - `search_ai_intelligent`: Bocha AI search with generated answers and
///   follow-up questions
///
/// The output is always JSON: the results on success, an error report
/// (endpoint, credential name, request payload) when the provider call fails.
pub struct SearchTool {
    pipeline: SearchPipeline,
}

impl SearchTool {
    pub fn new(kind: SearchKind, config: &Config) -> Self {
        let pipeline = SearchPipeline::from_config(kind, config);
        tracing::debug!(
            tool = kind.tool_id(),
            endpoint = %pipeline.profile().endpoint,
            "search tool initialized"
        );
        Self { pipeline }
    }

    pub fn kind(&self) -> SearchKind {
        self.pipeline.profile().kind
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

#[async_trait]
impl Tool for SearchTool {
    fn id(&self) -> &str {
        self.kind().tool_id()
    }

    fn description(&self) -> &str {
        match self.kind() {
            SearchKind::ChineseWeb => {
                "Search Chinese-language web pages through Bocha AI. \
                 Returns a JSON list of results with title, url, site name, \
                 publication date and a page summary."
            }
            SearchKind::EnglishWeb => {
                "Search English-language web pages through LangSearch. \
                 Returns a JSON list of results with title, url, site name, \
                 publication date and a page summary."
            }
            SearchKind::Ai => {
                "AI-augmented search through Bocha AI. \
                 Returns JSON with search_results, AI-generated ai_answers, \
                 suggested follow_up_questions and a summary of the counts."
            }
        }
    }

    fn input_schema(&self) -> serde_json::Value {
        let query_description = match self.kind() {
            SearchKind::ChineseWeb => "Chinese search keywords",
            SearchKind::EnglishWeb => "English search keywords",
            SearchKind::Ai => "Search query",
        };
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": query_description
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: SearchParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        if params.query.trim().is_empty() {
            return Err(ToolError::InvalidParams("query cannot be empty".into()));
        }

        tracing::debug!(
            tool = self.id(),
            session_id = %ctx.session_id,
            message_id = %ctx.message_id,
            query = %params.query,
            "search tool start"
        );

        let outcome = self.pipeline.run(&params.query, &ctx.emitter()).await;

        let title = if outcome.is_error {
            format!("{} failed: {}", self.id(), params.query)
        } else {
            format!("{}: {}", self.id(), params.query)
        };

        Ok(ToolResult::new(title, outcome.payload)
            .with_metadata("query", json!(params.query))
            .with_metadata("num_results", json!(outcome.result_count))
            .with_metadata("is_error", json!(outcome.is_error)))
    }
}
