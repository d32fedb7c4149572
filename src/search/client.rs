use crate::search::{SearchError, SearchRequest};
use std::time::Duration;

/// Longest provider error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP transport shared by every search tool
///
/// One POST per call, no retries. The timeout covers the whole exchange,
/// body included.
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `request` to `endpoint` with a bearer credential and decode the
    /// JSON reply
    pub async fn post_json(
        &self,
        endpoint: &str,
        credential: &str,
        request: &SearchRequest,
    ) -> Result<serde_json::Value, SearchError> {
        tracing::debug!(
            endpoint = %endpoint,
            query = %request.query,
            count = request.count,
            "sending search request"
        );

        let response = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .bearer_auth(credential)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!(
                endpoint = %endpoint,
                status = %status,
                "search api error"
            );
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| SearchError::InvalidResponse(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout {
                after: self.timeout,
                source: e,
            }
        } else {
            SearchError::Network(e)
        }
    }
}
