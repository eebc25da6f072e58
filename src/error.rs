use crate::wizard::Step;
use thiserror::Error;

/// Failures talking to the suggestion service.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Malformed suggestion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rejected wizard operations. None of these leave the wizard unusable.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Cannot {action} from the {from} step")]
    InvalidTransition { from: Step, action: &'static str },

    #[error("Nothing to submit: the {0} is empty")]
    EmptyInput(&'static str),

    #[error("Select at least one tag before continuing")]
    NoTagsSelected,

    #[error("Tags can only be exported from the save step (currently at {0})")]
    NotAtSaveStep(Step),

    #[error("A suggestion request is already in flight")]
    RequestInFlight,

    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown locale '{0}' (expected one of en, fi, sv, no, da, et, lv, lt, ru)")]
    InvalidLocale(String),

    #[error("Unknown tag type '{0}' (expected 'template' or 'asset')")]
    InvalidTagType(String),

    #[error("Invalid API URL '{0}'")]
    InvalidApiUrl(String),

    #[error("Invalid request timeout '{0}'")]
    InvalidTimeout(String),
}
