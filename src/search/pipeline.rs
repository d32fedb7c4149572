use crate::config::{Config, Freshness};
use crate::event::EventEmitter;
use crate::search::normalize::{self, AiMessage, WebPage};
use crate::search::{
    AiSearchResult, AiSearchSummary, ErrorReport, ResultItem, SearchClient, SearchError,
    SearchKind, SearchRequest,
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Everything one search tool needs, fixed at construction
#[derive(Debug, Clone)]
pub struct SearchProfile {
    pub kind: SearchKind,
    pub endpoint: String,
    pub credential: String,
    pub count: u32,
    pub freshness: Freshness,
    pub citations: bool,
    pub timeout: Duration,
}

impl SearchProfile {
    pub fn from_config(kind: SearchKind, config: &Config) -> Self {
        let search = &config.search;
        Self {
            kind,
            endpoint: search.endpoint(kind).to_string(),
            credential: search.credential(kind).to_string(),
            count: search.count(kind),
            freshness: search.freshness,
            citations: search.citation_links,
            timeout: Duration::from_secs(search.timeout_secs),
        }
    }

    pub fn request(&self, query: &str) -> SearchRequest {
        SearchRequest::new(self.kind, query, self.freshness, self.count)
    }
}

/// What a finished invocation hands back to the tool layer
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Result aggregate or error report, serialized as JSON
    pub payload: String,
    /// Number of result items (0 on failure)
    pub result_count: usize,
    pub is_error: bool,
}

/// Request → provider → normalized JSON, reporting progress on the way.
///
/// [`SearchPipeline::run`] never fails: transport problems come back as an
/// [`ErrorReport`] payload, and exactly one terminal status event is emitted
/// per call.
#[derive(Clone)]
pub struct SearchPipeline {
    profile: SearchProfile,
    client: SearchClient,
}

impl SearchPipeline {
    pub fn new(profile: SearchProfile) -> Self {
        let client = SearchClient::new(profile.timeout);
        Self { profile, client }
    }

    pub fn from_config(kind: SearchKind, config: &Config) -> Self {
        Self::new(SearchProfile::from_config(kind, config))
    }

    pub fn profile(&self) -> &SearchProfile {
        &self.profile
    }

    pub async fn run(&self, query: &str, emitter: &EventEmitter) -> SearchOutcome {
        let kind = self.profile.kind;
        emitter.progress(kind.started_message(query)).await;

        let request = self.profile.request(query);

        emitter.progress(kind.connecting_message()).await;
        let response = self
            .client
            .post_json(&self.profile.endpoint, &self.profile.credential, &request)
            .await;

        match response {
            Ok(body) => match kind {
                SearchKind::ChineseWeb | SearchKind::EnglishWeb => {
                    self.finish_web(&body, emitter).await
                }
                SearchKind::Ai => self.finish_ai(&body, emitter).await,
            },
            Err(error) => self.fail(error, request, emitter).await,
        }
    }

    async fn finish_web(&self, body: &Value, emitter: &EventEmitter) -> SearchOutcome {
        let kind = self.profile.kind;
        let mut items = Vec::new();

        if let Some(entries) = normalize::web_page_entries(body) {
            emitter.progress(kind.processing_message(entries.len())).await;
            self.collect_pages(entries, &mut items, emitter).await;
        } else {
            tracing::debug!(kind = ?kind, "response has no data.webPages.value");
        }

        emitter
            .complete(format!(
                "✅ {}完成，找到 {} 个结果",
                kind.display_name(),
                items.len()
            ))
            .await;

        tracing::debug!(kind = ?kind, result_count = items.len(), "search completed");

        SearchOutcome {
            result_count: items.len(),
            payload: to_json(&items),
            is_error: false,
        }
    }

    async fn finish_ai(&self, body: &Value, emitter: &EventEmitter) -> SearchOutcome {
        let kind = self.profile.kind;
        let mut search_results = Vec::new();
        let mut ai_answers = Vec::new();
        let mut follow_up_questions = Vec::new();

        emitter.progress("🧠 AI正在分析搜索结果...").await;

        for message in normalize::ai_messages(body) {
            match AiMessage::classify(message) {
                AiMessage::WebSources(content) => match normalize::source_entries(content) {
                    Ok(Some(entries)) => {
                        emitter.progress(kind.processing_message(entries.len())).await;
                        self.collect_pages(&entries, &mut search_results, emitter)
                            .await;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping malformed source message");
                    }
                },
                AiMessage::Answer(content) => {
                    ai_answers.push(content.to_string());
                    emitter
                        .progress(format!("✨ AI生成了第 {} 个回答...", ai_answers.len()))
                        .await;
                }
                AiMessage::FollowUp(content) => {
                    follow_up_questions.push(content.to_string());
                    emitter
                        .progress(format!(
                            "💡 AI建议了第 {} 个追问问题...",
                            follow_up_questions.len()
                        ))
                        .await;
                }
                AiMessage::Other => {
                    tracing::trace!("ignoring ai search message");
                }
            }
        }

        let result = AiSearchResult {
            summary: AiSearchSummary {
                total_results: search_results.len(),
                ai_answers_count: ai_answers.len(),
                follow_up_count: follow_up_questions.len(),
                search_type: kind.source_label().to_string(),
            },
            search_results,
            ai_answers,
            follow_up_questions,
        };

        emitter
            .complete(format!(
                "🎉 AI智能搜索完成！找到 {} 个结果，生成 {} 个AI答案，{} 个追问建议",
                result.summary.total_results,
                result.summary.ai_answers_count,
                result.summary.follow_up_count
            ))
            .await;

        tracing::debug!(
            result_count = result.summary.total_results,
            answers = result.summary.ai_answers_count,
            follow_ups = result.summary.follow_up_count,
            "ai search completed"
        );

        SearchOutcome {
            result_count: result.summary.total_results,
            payload: to_json(&result),
            is_error: false,
        }
    }

    /// Append one item per entry, citing each before moving on
    async fn collect_pages(
        &self,
        entries: &[Value],
        items: &mut Vec<ResultItem>,
        emitter: &EventEmitter,
    ) {
        let kind = self.profile.kind;
        let cite = self.profile.citations && emitter.is_attached();

        for entry in entries {
            let page = WebPage::from_value(entry);
            items.push(page.to_item(kind));
            if cite {
                emitter.citation(page.to_citation(kind)).await;
            }
        }
    }

    async fn fail(
        &self,
        error: SearchError,
        request: SearchRequest,
        emitter: &EventEmitter,
    ) -> SearchOutcome {
        let kind = self.profile.kind;
        let message = error.to_string();

        tracing::warn!(
            kind = ?kind,
            endpoint = %self.profile.endpoint,
            error = %message,
            "search failed"
        );

        let report = ErrorReport {
            error: message.clone(),
            kind: kind.error_label(),
            endpoint: self.profile.endpoint.clone(),
            api_key_used: kind.credential_role().to_string(),
            payload: request,
        };

        emitter.error(kind.failed_message(&message)).await;

        SearchOutcome {
            payload: to_json(&report),
            result_count: 0,
            is_error: true,
        }
    }
}

/// serde_json leaves non-ASCII characters unescaped
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize search payload");
        serde_json::json!({ "error": e.to_string() }).to_string()
    })
}
