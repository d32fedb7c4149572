use std::sync::Arc;

use super::base::ToolContext;
use crate::event::{EventEmitter, EventSink};

impl ToolContext {
    /// Create a new tool context without a listener
    pub fn new(session_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message_id: message_id.into(),
            event_sink: None,
        }
    }

    /// Attach the listener that receives this call's events
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Emitter bound to this context's listener
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter::new(self.event_sink.clone())
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("session_id", &self.session_id)
            .field("message_id", &self.message_id)
            .field("event_sink", &self.event_sink.is_some())
            .finish()
    }
}
