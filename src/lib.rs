pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod locale;
pub mod logging;
pub mod prelude;
pub mod selection;
pub mod suggestion;
pub mod terminal;
pub mod wizard;

pub use client::{HttpSuggestClient, SuggestClient};
pub use config::Config;
pub use error::{ClientError, ConfigError, WizardError};
pub use export::{TagExport, derive_filename};
pub use locale::Locale;
pub use selection::{ConditionalTag, SelectionEngine, TagSelection};
pub use suggestion::{
    ConditionalTagConfig, InputMethod, ServiceError, SuggestRequest, SuggestResponse,
    SuggestionGroup, TagType,
};
pub use terminal::Terminal;
pub use wizard::{PendingRequest, Step, Warning, Wizard};
