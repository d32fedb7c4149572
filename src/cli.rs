use anyhow::{bail, Context, Result};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config;
use crate::event::ToolEvent;
use crate::logging;
use crate::tool::base::ToolContext;
use crate::tool::ToolRegistry;

const USAGE: &str = "usage:\n  bocha-search list\n  bocha-search <tool> <query...>";

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Print tool definitions
    List,
    /// Run one tool with a query
    Run { tool: String, query: String },
}

impl Command {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let Some(first) = args.next() else {
            bail!("missing command\n{USAGE}");
        };
        if first == "list" {
            return Ok(Command::List);
        }

        let query = args.collect::<Vec<_>>().join(" ");
        if query.trim().is_empty() {
            bail!("missing query for '{first}'\n{USAGE}");
        }
        Ok(Command::Run { tool: first, query })
    }
}

/// Run the CLI: events go to stderr as JSON lines, the tool output to stdout
pub async fn run() -> Result<()> {
    let command = Command::parse(std::env::args().skip(1))?;

    let config = config::load_or_create_config()?;
    let _log_guard = logging::init(&config)?;
    let registry = ToolRegistry::new(&config);

    match command {
        Command::List => {
            let definitions = registry.list_tool_definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
        }
        Command::Run { tool, query } => {
            let (tx, mut rx) = mpsc::unbounded_channel::<ToolEvent>();
            let printer = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    match serde_json::to_string(&event) {
                        Ok(line) => eprintln!("{line}"),
                        Err(e) => tracing::warn!(error = %e, "failed to print event"),
                    }
                }
            });

            let ctx = ToolContext::new("cli", "cli").with_event_sink(Arc::new(tx));
            let result = registry
                .execute(&tool, json!({ "query": query }), &ctx)
                .await
                .with_context(|| format!("failed to run '{tool}'"))?;

            // Dropping the context closes the channel so the printer drains and exits.
            drop(ctx);
            printer.await.context("event printer panicked")?;

            println!("{}", result.output);
        }
    }

    Ok(())
}
