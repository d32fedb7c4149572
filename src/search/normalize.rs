//! Provider JSON → result items.
//!
//! Field lookups never fail: missing or non-string fields read as empty.

use crate::event::Citation;
use crate::search::{ResultItem, SearchKind};
use serde_json::Value;

/// `data.webPages.value` of a web search reply, if present and a list
pub fn web_page_entries(body: &Value) -> Option<&Vec<Value>> {
    body.pointer("/data/webPages/value")?.as_array()
}

/// The fields of one provider web page entry
#[derive(Debug, Clone, Copy)]
pub struct WebPage<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub snippet: &'a str,
    pub summary: &'a str,
    pub site_name: &'a str,
    pub date_published: &'a str,
}

impl<'a> WebPage<'a> {
    pub fn from_value(entry: &'a Value) -> Self {
        let field = |key: &str| entry.get(key).and_then(Value::as_str).unwrap_or("");
        Self {
            name: field("name"),
            url: field("url"),
            snippet: field("snippet"),
            summary: field("summary"),
            site_name: field("siteName"),
            date_published: field("datePublished"),
        }
    }

    /// Summary when non-empty, otherwise the snippet
    pub fn content(&self) -> &'a str {
        if self.summary.is_empty() {
            self.snippet
        } else {
            self.summary
        }
    }

    pub fn title(&self) -> String {
        format!("📄 {}", self.name)
    }

    pub fn to_item(&self, kind: SearchKind) -> ResultItem {
        ResultItem {
            content: self.content().to_string(),
            title: self.title(),
            url: self.url.to_string(),
            site_name: decorate("🌐", self.site_name),
            date_published: decorate("📅", self.date_published),
            source_type: kind.source_label().to_string(),
        }
    }

    pub fn to_citation(&self, kind: SearchKind) -> Citation {
        Citation::webpage(
            self.content(),
            self.title(),
            self.url,
            format!("{} {}", kind.citation_marker(), self.name),
        )
    }
}

fn decorate(marker: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{marker} {value}")
    }
}

/// What an AI search message carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiMessage<'a> {
    /// JSON string wrapping a `value` list of web pages
    WebSources(&'a str),
    Answer(&'a str),
    FollowUp(&'a str),
    Other,
}

impl<'a> AiMessage<'a> {
    /// Classify by (role, type, content_type)
    pub fn classify(message: &'a Value) -> Self {
        let field = |key: &str| message.get(key).and_then(Value::as_str).unwrap_or("");
        let content = field("content");

        match (field("role"), field("type"), field("content_type")) {
            ("assistant", "source", "webpage") => AiMessage::WebSources(content),
            ("assistant", "answer", "text") => AiMessage::Answer(content),
            ("assistant", "follow_up", "text") => AiMessage::FollowUp(content),
            _ => AiMessage::Other,
        }
    }
}

/// `messages` of an AI search reply; empty when absent
pub fn ai_messages(body: &Value) -> &[Value] {
    body.get("messages")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parse the embedded JSON of a web source message.
///
/// `Ok(None)` when it parses but carries no `value` list.
pub fn source_entries(content: &str) -> Result<Option<Vec<Value>>, serde_json::Error> {
    let parsed: Value = serde_json::from_str(content)?;
    Ok(match parsed {
        Value::Object(mut map) => match map.remove("value") {
            Some(Value::Array(entries)) => Some(entries),
            _ => None,
        },
        _ => None,
    })
}
