//! Shared fixtures: a scripted suggestion client and canned service responses.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tag_genie::prelude::*;

/// Replays queued outcomes in order and records every request it receives.
/// Once the queue is drained it answers with an empty suggestion list.
#[derive(Default)]
pub struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<SuggestResponse, ClientError>>>,
    requests: Mutex<Vec<SuggestRequest>>,
}

impl ScriptedClient {
    pub fn new(outcomes: impl IntoIterator<Item = Result<SuggestResponse, ClientError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(response: SuggestResponse) -> Self {
        Self::new([Ok(response)])
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new([Err(ClientError::Status {
            status,
            message: message.to_string(),
        })])
    }

    pub fn requests(&self) -> Vec<SuggestRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SuggestClient for ScriptedClient {
    async fn suggest(&self, request: &SuggestRequest) -> Result<SuggestResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SuggestResponse::default()))
    }
}

pub fn disclaimer_rule() -> ConditionalTagConfig {
    ConditionalTagConfig {
        trigger_tags: vec!["language/ru".to_string()],
        description: HashMap::from([
            ("en".to_string(), "Legal disclaimer required".to_string()),
            ("ru".to_string(), "Требуется юридическая оговорка".to_string()),
        ]),
    }
}

/// A template response covering every segment of the file name.
///
/// On-screen numbering: 1 language/fi, 2 language/ru, 3 filter/vehicle/x-trail,
/// 4 system/media/story, 5 system/size/1080x1920.
pub fn template_response() -> SuggestResponse {
    SuggestResponse {
        suggestions: vec![
            SuggestionGroup::new("language", ["language/fi", "language/ru"])
                .with_conditional("system/legal/disclaimer", disclaimer_rule()),
            SuggestionGroup::new("filter", ["filter/vehicle/x-trail"]),
            SuggestionGroup::new("system/media", ["system/media/story"]),
            SuggestionGroup::new("system/size", ["system/size/1080x1920"]),
        ],
        is_fallback: false,
        error: None,
    }
}

pub fn asset_response() -> SuggestResponse {
    SuggestResponse {
        suggestions: vec![
            SuggestionGroup::new("language", ["language/en"]),
            SuggestionGroup::new("type", ["type/banner", "type/video"]),
            SuggestionGroup::new("filter", ["filter/ariya"]),
        ],
        is_fallback: false,
        error: None,
    }
}

pub fn fallback_response(error: Option<&str>) -> SuggestResponse {
    SuggestResponse {
        suggestions: vec![
            SuggestionGroup::new("filter", ["filter/vehicle/qashqai"]),
            SuggestionGroup::new("language", ["language/finnish"]),
        ],
        is_fallback: true,
        error: error.map(|message| ServiceError::Message(message.to_string())),
    }
}
