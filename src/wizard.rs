//! Wizard controller: Describe → Review → Save, looping back on "start new".

use crate::client::SuggestClient;
use crate::config::Config;
use crate::error::{ClientError, WizardError};
use crate::export::TagExport;
use crate::locale::Locale;
use crate::selection::{ConditionalTag, SelectionEngine};
use crate::suggestion::{InputMethod, SuggestRequest, SuggestResponse, SuggestionGroup, TagType};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Describe,
    Review,
    Save,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Describe, Step::Review, Step::Save];

    pub fn index(self) -> usize {
        match self {
            Step::Describe => 0,
            Step::Review => 1,
            Step::Save => 2,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Describe => Some(Step::Review),
            Step::Review => Some(Step::Save),
            Step::Save => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Describe => None,
            Step::Review => Some(Step::Describe),
            Step::Save => Some(Step::Review),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Describe => "describe",
            Step::Review => "review",
            Step::Save => "save",
        })
    }
}

/// Banner shown above the suggestions when the service degraded or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub fallback: bool,
    pub detail: String,
}

/// Handle for a suggestion request that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    generation: u64,
    pub request: SuggestRequest,
}

impl PendingRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct Wizard {
    step: Step,
    input_method: InputMethod,
    description: String,
    source_filename: String,
    tag_type: TagType,
    engine: SelectionEngine,
    error: Option<String>,
    is_fallback: bool,
    in_flight: Option<u64>,
    generation: u64,
    output_dir: PathBuf,
}

impl Wizard {
    pub fn new(locale: Locale, tag_type: TagType, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            step: Step::Describe,
            input_method: InputMethod::Description,
            description: String::new(),
            source_filename: String::new(),
            tag_type,
            engine: SelectionEngine::new(Vec::new(), locale),
            error: None,
            is_fallback: false,
            in_flight: None,
            generation: 0,
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.locale, config.tag_type, config.output_dir.clone())
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source_filename(&self) -> &str {
        &self.source_filename
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    pub fn locale(&self) -> Locale {
        self.engine.locale()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn suggestions(&self) -> &[SuggestionGroup] {
        self.engine.groups()
    }

    pub fn selected_tags(&self) -> &[String] {
        self.engine.selection().tags()
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.engine.is_selected(tag)
    }

    pub fn conditional_tags(&self) -> &[ConditionalTag] {
        self.engine.conditional_tags()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The warning banner, if the last request degraded or failed.
    pub fn warning(&self) -> Option<Warning> {
        if self.error.is_none() && !self.is_fallback {
            return None;
        }
        Some(Warning {
            fallback: self.is_fallback,
            detail: self.error.clone().unwrap_or_default(),
        })
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_source_filename(&mut self, filename: impl Into<String>) {
        self.source_filename = filename.into();
    }

    pub fn set_input_method(&mut self, method: InputMethod) {
        self.input_method = method;
    }

    pub fn set_tag_type(&mut self, tag_type: TagType) {
        self.tag_type = tag_type;
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.engine.set_locale(locale);
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Clears the previous round and issues a new request generation.
    ///
    /// Fails if the active input is blank or another request is still pending.
    pub fn begin_request(&mut self) -> Result<PendingRequest, WizardError> {
        if self.in_flight.is_some() {
            return Err(WizardError::RequestInFlight);
        }
        let (text, what) = match self.input_method {
            InputMethod::Description => (&self.description, "description"),
            InputMethod::Filename => (&self.source_filename, "filename"),
        };
        if text.trim().is_empty() {
            return Err(WizardError::EmptyInput(what));
        }
        let request = SuggestRequest::new(self.input_method, text, self.tag_type);

        self.engine.clear();
        self.error = None;
        self.is_fallback = false;
        self.generation += 1;
        self.in_flight = Some(self.generation);

        Ok(PendingRequest {
            generation: self.generation,
            request,
        })
    }

    /// Applies the outcome of `pending`. Returns `false` if it was superseded and dropped.
    ///
    /// Both a service-reported error and a transport failure move the wizard to
    /// the review step; the message is kept for the warning banner.
    pub fn complete_request(
        &mut self,
        pending: PendingRequest,
        outcome: Result<SuggestResponse, ClientError>,
    ) -> bool {
        if self.in_flight != Some(pending.generation) {
            debug!(
                generation = pending.generation,
                current = self.generation,
                "discarding stale suggestion response"
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(response) => {
                self.is_fallback = response.is_fallback;
                self.error = response.error.map(|e| e.message().to_string());
                if self.is_fallback || self.error.is_some() {
                    warn!(
                        fallback = self.is_fallback,
                        error = self.error.as_deref().unwrap_or(""),
                        "suggestion service returned a degraded result"
                    );
                }
                self.engine.load(response.suggestions);
            }
            Err(err) => {
                warn!(error = %err, "suggestion request failed");
                self.error = Some(err.to_string());
                self.engine.clear();
            }
        }
        self.step = Step::Review;
        true
    }

    /// Requests suggestions for the current input and applies the result.
    ///
    /// If the returned future is dropped before the service answers, the
    /// wizard stays at its current step and accepts a new submission.
    pub async fn request_suggestions<C: SuggestClient>(
        &mut self,
        client: &C,
    ) -> Result<(), WizardError> {
        let pending = self.begin_request()?;
        let mut guard = AbandonGuard {
            in_flight: &mut self.in_flight,
            generation: pending.generation,
            armed: true,
        };
        let outcome = client.suggest(&pending.request).await;
        guard.armed = false;
        drop(guard);
        self.complete_request(pending, outcome);
        Ok(())
    }

    pub fn toggle(&mut self, tag: &str) -> bool {
        self.engine.toggle(tag)
    }

    /// Moves forward one step. Review is only reached through a suggestion request.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        let next = match self.step {
            Step::Describe => None,
            step => step.next(),
        }
        .ok_or(WizardError::InvalidTransition {
            from: self.step,
            action: "advance",
        })?;
        if self.step == Step::Review && self.engine.selection().is_empty() {
            return Err(WizardError::NoTagsSelected);
        }
        self.step = next;
        Ok(next)
    }

    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let previous = self.step.previous().ok_or(WizardError::InvalidTransition {
            from: self.step,
            action: "go back",
        })?;
        self.step = previous;
        Ok(previous)
    }

    /// Starts over. Locale, tag type and input method are kept; a pending
    /// request is orphaned and its response will be discarded.
    pub fn reset(&mut self) {
        self.step = Step::Describe;
        self.description.clear();
        self.source_filename.clear();
        self.engine.clear();
        self.error = None;
        self.is_fallback = false;
        self.in_flight = None;
        info!("wizard reset");
    }

    /// The file `export_tags` would write for the current selection.
    pub fn preview(&self) -> TagExport {
        TagExport::new(self.selected_tags(), self.tag_type)
    }

    pub fn export_tags(&self) -> Result<PathBuf, WizardError> {
        if self.step != Step::Save {
            return Err(WizardError::NotAtSaveStep(self.step));
        }
        let export = self.preview();
        let path = export.write_to(&self.output_dir)?;
        info!(path = %path.display(), tags = self.selected_tags().len(), "exported tags");
        Ok(path)
    }
}

/// Releases the busy flag when a request future is dropped mid-flight.
struct AbandonGuard<'a> {
    in_flight: &'a mut Option<u64>,
    generation: u64,
    armed: bool,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if self.armed && *self.in_flight == Some(self.generation) {
            debug!(generation = self.generation, "suggestion request abandoned");
            *self.in_flight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::ServiceError;

    fn wizard() -> Wizard {
        Wizard::new(Locale::En, TagType::Template, ".")
    }

    fn response(tags: &[&str]) -> SuggestResponse {
        SuggestResponse {
            suggestions: vec![SuggestionGroup::new("language", tags.iter().copied())],
            is_fallback: false,
            error: None,
        }
    }

    #[test]
    fn step_transitions_are_closed() {
        assert_eq!(Step::Describe.previous(), None);
        assert_eq!(Step::Save.next(), None);
        for step in Step::ALL {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step));
                assert_eq!(next.index(), step.index() + 1);
            }
        }
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut wizard = wizard();
        wizard.set_description("   ");
        assert!(matches!(
            wizard.begin_request(),
            Err(WizardError::EmptyInput("description"))
        ));

        wizard.set_input_method(InputMethod::Filename);
        assert!(matches!(
            wizard.begin_request(),
            Err(WizardError::EmptyInput("filename"))
        ));
    }

    #[test]
    fn second_submission_while_pending_is_rejected() {
        let mut wizard = wizard();
        wizard.set_description("Finnish print ad");
        let _pending = wizard.begin_request().unwrap();

        assert!(wizard.is_busy());
        assert!(matches!(
            wizard.begin_request(),
            Err(WizardError::RequestInFlight)
        ));
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let mut wizard = wizard();
        wizard.set_description("Finnish print ad");
        let pending = wizard.begin_request().unwrap();
        wizard.reset();

        assert!(!wizard.complete_request(pending, Ok(response(&["language/fi"]))));
        assert_eq!(wizard.step(), Step::Describe);
        assert!(wizard.suggestions().is_empty());
        assert!(!wizard.is_busy());
    }

    #[test]
    fn superseded_generation_is_discarded() {
        let mut wizard = wizard();
        wizard.set_description("first");
        let first = wizard.begin_request().unwrap();
        wizard.reset();
        wizard.set_description("second");
        let second = wizard.begin_request().unwrap();

        assert!(wizard.complete_request(second, Ok(response(&["language/sv"]))));
        assert!(!wizard.complete_request(first, Ok(response(&["language/fi"]))));
        assert_eq!(wizard.suggestions()[0].suggested_tags, vec!["language/sv"]);
    }

    #[test]
    fn fallback_without_error_warns_with_empty_detail() {
        let mut wizard = wizard();
        wizard.set_description("anything");
        let pending = wizard.begin_request().unwrap();
        let outcome = SuggestResponse {
            is_fallback: true,
            ..response(&["language/fi"])
        };

        wizard.complete_request(pending, Ok(outcome));

        assert_eq!(wizard.step(), Step::Review);
        assert_eq!(
            wizard.warning(),
            Some(Warning {
                fallback: true,
                detail: String::new(),
            })
        );
    }

    #[test]
    fn service_error_is_a_warning_not_a_failure() {
        let mut wizard = wizard();
        wizard.set_description("anything");
        let pending = wizard.begin_request().unwrap();
        let outcome = SuggestResponse {
            is_fallback: true,
            error: Some(ServiceError::Message("rate limited".into())),
            ..response(&["language/fi"])
        };

        wizard.complete_request(pending, Ok(outcome));

        assert_eq!(wizard.step(), Step::Review);
        assert_eq!(wizard.error(), Some("rate limited"));
        assert_eq!(wizard.suggestions().len(), 1);
    }

    #[test]
    fn advance_from_review_needs_a_selection() {
        let mut wizard = wizard();
        wizard.set_description("anything");
        let pending = wizard.begin_request().unwrap();
        wizard.complete_request(pending, Ok(response(&["language/fi"])));

        assert!(matches!(wizard.advance(), Err(WizardError::NoTagsSelected)));
        wizard.toggle("language/fi");
        assert_eq!(wizard.advance().unwrap(), Step::Save);
        assert!(matches!(
            wizard.advance(),
            Err(WizardError::InvalidTransition { from: Step::Save, .. })
        ));
    }

    #[test]
    fn review_is_not_reachable_without_a_request() {
        let mut wizard = wizard();
        wizard.set_description("Finnish print ad");

        assert!(matches!(
            wizard.advance(),
            Err(WizardError::InvalidTransition { from: Step::Describe, .. })
        ));
        assert_eq!(wizard.step(), Step::Describe);
    }

    #[test]
    fn retreat_stops_at_describe() {
        let mut wizard = wizard();
        assert!(matches!(
            wizard.retreat(),
            Err(WizardError::InvalidTransition { from: Step::Describe, .. })
        ));
    }

    #[test]
    fn export_outside_save_step_is_rejected() {
        let wizard = wizard();
        assert!(matches!(
            wizard.export_tags(),
            Err(WizardError::NotAtSaveStep(Step::Describe))
        ));
    }

    #[test]
    fn reset_keeps_session_settings() {
        let mut wizard = Wizard::new(Locale::Ru, TagType::Asset, ".");
        wizard.set_description("banner");
        let pending = wizard.begin_request().unwrap();
        wizard.complete_request(pending, Ok(response(&["language/ru"])));
        wizard.toggle("language/ru");

        wizard.reset();

        assert_eq!(wizard.step(), Step::Describe);
        assert!(wizard.description().is_empty());
        assert!(wizard.selected_tags().is_empty());
        assert!(wizard.conditional_tags().is_empty());
        assert_eq!(wizard.warning(), None);
        assert_eq!(wizard.locale(), Locale::Ru);
        assert_eq!(wizard.tag_type(), TagType::Asset);
    }
}
