use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// What is being tagged. Selects the service's rule set and the export naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    #[default]
    Template,
    Asset,
}

impl TagType {
    pub fn as_str(self) -> &'static str {
        match self {
            TagType::Template => "template",
            TagType::Asset => "asset",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(TagType::Template),
            "asset" => Ok(TagType::Asset),
            _ => Err(ConfigError::InvalidTagType(s.to_string())),
        }
    }
}

/// Whether the user describes the item in prose or pastes an existing file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Description,
    Filename,
}

/// Body of `POST /api/suggest_tags`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestRequest {
    pub description: String,
    #[serde(rename = "type")]
    pub tag_type: TagType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl SuggestRequest {
    pub fn new(method: InputMethod, text: &str, tag_type: TagType) -> Self {
        let text = text.trim().to_string();
        match method {
            InputMethod::Description => Self {
                description: text,
                tag_type,
                filename: None,
            },
            InputMethod::Filename => Self {
                description: String::new(),
                tag_type,
                filename: Some(text),
            },
        }
    }
}

/// Tags that become required once any of `trigger_tags` is selected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionalTagConfig {
    #[serde(default)]
    pub trigger_tags: Vec<String>,
    #[serde(default)]
    pub description: HashMap<String, String>,
}

/// One category of candidate tags returned by the service.
///
/// `conditional_tags` keeps the order the service sent them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_tags: Option<IndexMap<String, ConditionalTagConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SuggestionGroup {
    pub fn new(category: impl Into<String>, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            category: category.into(),
            suggested_tags: tags.into_iter().map(Into::into).collect(),
            conditional_tags: None,
            confidence: None,
        }
    }

    pub fn with_conditional(mut self, tag: impl Into<String>, config: ConditionalTagConfig) -> Self {
        self.conditional_tags
            .get_or_insert_with(IndexMap::new)
            .insert(tag.into(), config);
        self
    }
}

/// The service reports errors either as a bare string or as `{message, type}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceError {
    Message(String),
    Detailed {
        #[serde(default)]
        message: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl ServiceError {
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Message(message) => message,
            ServiceError::Detailed { message, .. } => message,
        }
    }
}

/// Response of `POST /api/suggest_tags`. Missing or null fields read as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<SuggestionGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_service_contract() {
        let request = SuggestRequest::new(InputMethod::Description, "  Finnish banner  ", TagType::Asset);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "description": "Finnish banner", "type": "asset" })
        );

        let request = SuggestRequest::new(
            InputMethod::Filename,
            "FY23_Q3_CCL_X-TRAIL_STORY_1080x1920_V2",
            TagType::Template,
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "description": "",
                "type": "template",
                "filename": "FY23_Q3_CCL_X-TRAIL_STORY_1080x1920_V2"
            })
        );
    }

    #[test]
    fn missing_suggestions_is_an_empty_list() {
        let response: SuggestResponse = serde_json::from_str("{}").unwrap();
        assert!(response.suggestions.is_empty());
        assert!(!response.is_fallback);
        assert!(response.error.is_none());

        let response: SuggestResponse =
            serde_json::from_str(r#"{"suggestions": null, "is_fallback": null}"#).unwrap();
        assert!(response.suggestions.is_empty());
        assert!(!response.is_fallback);
    }

    #[test]
    fn accepts_both_error_shapes() {
        let response: SuggestResponse =
            serde_json::from_str(r#"{"suggestions": [], "error": "quota exceeded"}"#).unwrap();
        assert_eq!(response.error.unwrap().message(), "quota exceeded");

        let response: SuggestResponse = serde_json::from_value(json!({
            "suggestions": [],
            "is_fallback": true,
            "error": { "message": "model loading", "type": "HTTPError" }
        }))
        .unwrap();
        assert!(response.is_fallback);
        assert_eq!(response.error.unwrap().message(), "model loading");
    }

    #[test]
    fn group_carries_conditional_rules_and_confidence() {
        let group: SuggestionGroup = serde_json::from_value(json!({
            "category": "car/model",
            "suggested_tags": ["car/model/leaf", "car/model/leaf/2024"],
            "confidence": 0.9,
            "conditional_tags": {
                "system/dynamic/text": {
                    "trigger_tags": ["car/model/leaf"],
                    "description": { "english": "Enables the price lectern database" }
                }
            }
        }))
        .unwrap();

        assert_eq!(group.confidence, Some(0.9));
        let rules = group.conditional_tags.unwrap();
        assert_eq!(rules["system/dynamic/text"].trigger_tags, vec!["car/model/leaf"]);
    }

    #[test]
    fn conditional_tags_keep_wire_order() {
        let group: SuggestionGroup = serde_json::from_str(
            r#"{
                "category": "language",
                "suggested_tags": ["language/ru"],
                "conditional_tags": {
                    "system/legal/zeta": { "trigger_tags": ["language/ru"] },
                    "system/legal/alpha": { "trigger_tags": ["language/ru"] }
                }
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = group
            .conditional_tags
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["system/legal/zeta", "system/legal/alpha"]);
    }
}
