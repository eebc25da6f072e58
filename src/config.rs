use crate::error::ConfigError;
use crate::locale::Locale;
use crate::suggestion::TagType;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub locale: Locale,
    pub tag_type: TagType,
    pub output_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            locale: Locale::default(),
            tag_type: TagType::default(),
            output_dir: PathBuf::from("."),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `TAGGENIE_*` variables supplied by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = var("TAGGENIE_API_URL") {
            config.api_url = parse_api_url(&url)?;
        }
        if let Some(locale) = var("TAGGENIE_LOCALE") {
            config.locale = locale.parse()?;
        }
        if let Some(tag_type) = var("TAGGENIE_TAG_TYPE") {
            config.tag_type = tag_type.parse()?;
        }
        if let Some(dir) = var("TAGGENIE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(secs) = var("TAGGENIE_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&secs)?;
        }
        Ok(config)
    }
}

pub fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|_| ConfigError::InvalidApiUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::Fi);
        assert_eq!(config.tag_type, TagType::Template);
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("TAGGENIE_API_URL", "https://tags.example.com/"),
            ("TAGGENIE_LOCALE", "lv"),
            ("TAGGENIE_TAG_TYPE", "asset"),
            ("TAGGENIE_OUTPUT_DIR", "/tmp/tags"),
            ("TAGGENIE_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "https://tags.example.com");
        assert_eq!(config.locale, Locale::Lv);
        assert_eq!(config.tag_type, TagType::Asset);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/tags"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_variables_are_ignored() {
        let config = config_from(&[("TAGGENIE_LOCALE", "  ")]).unwrap();
        assert_eq!(config.locale, Locale::Fi);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config_from(&[("TAGGENIE_TAG_TYPE", "video")]),
            Err(ConfigError::InvalidTagType("video".into()))
        );
        assert_eq!(
            config_from(&[("TAGGENIE_API_URL", "localhost:8001")]),
            Err(ConfigError::InvalidApiUrl("localhost:8001".into()))
        );
        assert_eq!(
            config_from(&[("TAGGENIE_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidTimeout("0".into()))
        );
    }
}
