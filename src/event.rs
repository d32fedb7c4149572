use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Events a running search reports to its listener
///
/// Serialized as `{"type": "status" | "citation", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ToolEvent {
    Status(StatusUpdate),
    Citation(Citation),
}

impl ToolEvent {
    /// True for the status event that ends an invocation
    pub fn is_terminal(&self) -> bool {
        matches!(self, ToolEvent::Status(update) if update.done)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Status,
    pub description: String,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Complete,
    Error,
}

/// One search hit handed to the host for source attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub document: Vec<String>,
    pub metadata: Vec<CitationMetadata>,
    pub source: CitationSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationMetadata {
    pub source: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationSource {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Citation {
    /// Citation for a web page result
    pub fn webpage(
        content: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            document: vec![content.into()],
            metadata: vec![CitationMetadata {
                source: url.clone(),
                title: title.into(),
            }],
            source: CitationSource {
                name: source_name.into(),
                url,
                kind: "webpage".to_string(),
            },
        }
    }
}

/// Receiver of tool events
///
/// Delivery is awaited by the emitter, so a slow sink slows the search down
/// rather than queueing events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, event: ToolEvent);
}

#[async_trait]
impl EventSink for mpsc::UnboundedSender<ToolEvent> {
    async fn deliver(&self, event: ToolEvent) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.send(event);
    }
}

/// Adapts an async closure into an [`EventSink`]
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(ToolEvent) -> BoxFuture<'static, ()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> EventSink for FnSink<F>
where
    F: Fn(ToolEvent) -> BoxFuture<'static, ()> + Send + Sync,
{
    async fn deliver(&self, event: ToolEvent) {
        (self.0)(event).await
    }
}

/// Ordered, one-way progress reporter used by a single invocation
///
/// Every method is a no-op when no sink is attached.
#[derive(Clone, Default)]
pub struct EventEmitter {
    sink: Option<Arc<dyn EventSink>>,
}

impl EventEmitter {
    pub fn new(sink: Option<Arc<dyn EventSink>>) -> Self {
        Self { sink }
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    pub async fn emit(&self, description: impl Into<String>, status: Status, done: bool) {
        if let Some(sink) = &self.sink {
            sink.deliver(ToolEvent::Status(StatusUpdate {
                status,
                description: description.into(),
                done,
            }))
            .await;
        }
    }

    pub async fn progress(&self, description: impl Into<String>) {
        self.emit(description, Status::InProgress, false).await;
    }

    pub async fn complete(&self, description: impl Into<String>) {
        self.emit(description, Status::Complete, true).await;
    }

    pub async fn error(&self, description: impl Into<String>) {
        self.emit(description, Status::Error, true).await;
    }

    pub async fn citation(&self, citation: Citation) {
        if let Some(sink) = &self.sink {
            sink.deliver(ToolEvent::Citation(citation)).await;
        }
    }
}
