use crate::error::ClientError;
use crate::suggestion::{SuggestRequest, SuggestResponse};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

pub const SUGGEST_PATH: &str = "/api/suggest_tags";

/// Source of tag suggestions. The wizard only talks to the service through this.
pub trait SuggestClient {
    fn suggest(
        &self,
        request: &SuggestRequest,
    ) -> impl Future<Output = Result<SuggestResponse, ClientError>> + Send;
}

/// `reqwest`-backed client for `POST /api/suggest_tags`.
#[derive(Clone)]
pub struct HttpSuggestClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUGGEST_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SuggestClient for HttpSuggestClient {
    async fn suggest(&self, request: &SuggestRequest) -> Result<SuggestResponse, ClientError> {
        info!(endpoint = %self.endpoint, tag_type = %request.tag_type, "requesting tag suggestions");

        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message =
                error_message_from_body(&body).unwrap_or_else(|| format!("HTTP {status}"));
            warn!(status = status.as_u16(), %message, "suggestion service rejected request");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SuggestResponse = serde_json::from_slice(&body)?;
        info!(
            groups = parsed.suggestions.len(),
            fallback = parsed.is_fallback,
            "received tag suggestions"
        );
        Ok(parsed)
    }
}

// Error bodies come as `{"error": ...}` or, from the framework itself, `{"detail": "..."}`.
fn error_message_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let error = value.get("error").and_then(|error| {
        error
            .as_str()
            .or_else(|| error.get("message").and_then(|m| m.as_str()))
    });
    error
        .or_else(|| value.get("detail").and_then(|d| d.as_str()))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
