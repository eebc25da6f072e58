//! Commonly used types in one import.
//!
//! ```rust,no_run
//! use tag_genie::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let client = HttpSuggestClient::new(&config.api_url, config.timeout)?;
//! let mut wizard = Wizard::from_config(&config);
//!
//! wizard.set_description("Finnish X-Trail story ad, 1080x1920");
//! wizard.request_suggestions(&client).await?;
//! wizard.toggle("language/fi");
//! wizard.advance()?;
//! let path = wizard.export_tags()?;
//! println!("saved {}", path.display());
//! # Ok(())
//! # }
//! ```

pub use crate::client::{HttpSuggestClient, SuggestClient};
pub use crate::config::Config;
pub use crate::error::{ClientError, ConfigError, WizardError};
pub use crate::export::{TagExport, derive_filename, render_contents};
pub use crate::locale::Locale;
pub use crate::selection::{ConditionalTag, SelectionEngine, TagSelection};
pub use crate::suggestion::{
    ConditionalTagConfig, InputMethod, ServiceError, SuggestRequest, SuggestResponse,
    SuggestionGroup, TagType,
};
pub use crate::terminal::Terminal;
pub use crate::wizard::{PendingRequest, Step, Warning, Wizard};
