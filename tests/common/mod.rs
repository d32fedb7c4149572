//! Common test utilities and fixtures for search tool testing

#![allow(dead_code)]

use bocha_search::config::{Config, SearchSettings};
use bocha_search::event::{EventSink, Status, ToolEvent};
use bocha_search::tool::base::ToolContext;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub const BOCHA_KEY: &str = "test-bocha-key";
pub const LANGSEARCH_KEY: &str = "test-langsearch-key";

/// Config whose three endpoints point at `base_url`
pub fn test_config(base_url: &str) -> Config {
    Config {
        search: SearchSettings {
            bocha_api_key: BOCHA_KEY.to_string(),
            langsearch_api_key: LANGSEARCH_KEY.to_string(),
            chinese_web_search_endpoint: format!("{base_url}/v1/web-search"),
            english_web_search_endpoint: format!("{base_url}/lang/v1/web-search"),
            ai_search_endpoint: format!("{base_url}/v1/ai-search"),
            timeout_secs: 5,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Tool context with a channel listener attached
pub fn listening_context() -> (ToolContext, mpsc::UnboundedReceiver<ToolEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink: Arc<dyn EventSink> = Arc::new(tx);
    let ctx = ToolContext::new("test_session", "test_msg").with_event_sink(sink);
    (ctx, rx)
}

/// Drain every event the call produced. The context must be dropped first.
pub async fn collect_events(mut rx: mpsc::UnboundedReceiver<ToolEvent>) -> Vec<ToolEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

/// Status descriptions in order
pub fn descriptions(events: &[ToolEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            ToolEvent::Status(update) => Some(update.description.clone()),
            ToolEvent::Citation(_) => None,
        })
        .collect()
}

pub fn citation_count(events: &[ToolEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, ToolEvent::Citation(_)))
        .count()
}

/// Asserts exactly one terminal event, that it is last, and returns its status
pub fn terminal_status(events: &[ToolEvent]) -> Status {
    let terminals: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminals.len(), 1, "expected exactly one terminal event: {events:?}");
    assert!(
        events.last().map(ToolEvent::is_terminal).unwrap_or(false),
        "terminal event must be last: {events:?}"
    );
    match terminals[0] {
        ToolEvent::Status(update) => update.status,
        ToolEvent::Citation(_) => unreachable!("citations are never terminal"),
    }
}

/// A TCP server that accepts connections and never answers
pub async fn silent_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Test fixture for config files
pub struct TestFixture {
    /// Temporary directory that gets cleaned up automatically
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let filepath = self.path().join(name);
        std::fs::write(&filepath, content).expect("Failed to write test file");
        filepath
    }

    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).expect("Failed to read test file")
    }
}
