pub mod base;
pub mod context;
pub mod search;

use crate::config::Config;
use crate::search::SearchKind;
use base::{Tool, ToolContext, ToolError, ToolResult};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool registry - manages all available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with the Chinese web, English web and AI search tools
    pub fn new(config: &Config) -> Self {
        let mut tools: HashMap<String, Arc<dyn Tool>> = HashMap::new();

        for kind in SearchKind::ALL {
            tools.insert(
                kind.tool_id().to_string(),
                Arc::new(search::SearchTool::new(kind, config)),
            );
        }

        Self { tools }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Look up and run a tool
    pub async fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(params, ctx).await
    }

    /// Get all tool definitions, sorted by name
    pub fn list_tool_definitions(&self) -> Vec<serde_json::Value> {
        let mut names = self.list_names();
        names.sort();
        names
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                json!({
                    "name": tool.id(),
                    "description": tool.description(),
                    "input_schema": tool.input_schema(),
                })
            })
            .collect()
    }

    /// Get all tool names
    pub fn list_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}
