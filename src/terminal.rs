//! Line-oriented terminal front end.
//!
//! Renders the wizard's current step, reads one command per line and forwards
//! it to the controller. Generic over reader and writer so it can be driven
//! from a script.

use crate::client::SuggestClient;
use crate::locale::{Locale, UiStrings};
use crate::suggestion::{InputMethod, TagType};
use crate::wizard::{Step, Wizard};
use anyhow::Result;
use std::io::{BufRead, Write};

const BANNER_SIZE_CATEGORY: &str = "banner/size";

enum Flow {
    Continue,
    Quit,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `:quit` or end of input.
    pub async fn run<C: SuggestClient>(&mut self, wizard: &mut Wizard, client: &C) -> Result<()> {
        loop {
            self.render(wizard)?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            if let Flow::Quit = self.handle(wizard, client, line.trim()).await? {
                return Ok(());
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    async fn handle<C: SuggestClient>(
        &mut self,
        wizard: &mut Wizard,
        client: &C,
        line: &str,
    ) -> Result<Flow> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if let Some(command) = line.strip_prefix(':') {
            return self.command(wizard, command);
        }

        match wizard.step() {
            Step::Describe => {
                match wizard.input_method() {
                    InputMethod::Description => wizard.set_description(line),
                    InputMethod::Filename => wizard.set_source_filename(line),
                }
                writeln!(self.output, "{}", wizard.locale().strings().loading)?;
                self.output.flush()?;
                if let Err(err) = wizard.request_suggestions(client).await {
                    writeln!(self.output, "! {err}")?;
                }
            }
            Step::Review => match line {
                "n" => self.advance(wizard)?,
                "b" => self.retreat(wizard)?,
                _ => self.toggle_by_number(wizard, line)?,
            },
            Step::Save => match line {
                "s" => self.export(wizard)?,
                "b" => self.retreat(wizard)?,
                _ => writeln!(self.output, "! Unknown command '{line}'")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn command(&mut self, wizard: &mut Wizard, command: &str) -> Result<Flow> {
        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or("");
        let arg = words.next();

        match (name, arg) {
            ("q" | "quit", _) => return Ok(Flow::Quit),
            ("lang", Some(code)) => match code.parse::<Locale>() {
                Ok(locale) => wizard.set_locale(locale),
                Err(err) => writeln!(self.output, "! {err}")?,
            },
            ("type", Some(raw)) if wizard.step() == Step::Describe => {
                match raw.parse::<TagType>() {
                    Ok(tag_type) => wizard.set_tag_type(tag_type),
                    Err(err) => writeln!(self.output, "! {err}")?,
                }
            }
            ("method", Some(raw)) if wizard.step() == Step::Describe => match raw {
                "description" => wizard.set_input_method(InputMethod::Description),
                "filename" => wizard.set_input_method(InputMethod::Filename),
                _ => writeln!(self.output, "! Unknown input method '{raw}'")?,
            },
            ("next", None) => self.advance(wizard)?,
            ("back", None) => self.retreat(wizard)?,
            ("save", None) => self.export(wizard)?,
            ("new", None) => wizard.reset(),
            _ => writeln!(self.output, "! Unknown command ':{command}'")?,
        }
        Ok(Flow::Continue)
    }

    fn advance(&mut self, wizard: &mut Wizard) -> Result<()> {
        if let Err(err) = wizard.advance() {
            writeln!(self.output, "! {err}")?;
        }
        Ok(())
    }

    fn retreat(&mut self, wizard: &mut Wizard) -> Result<()> {
        if let Err(err) = wizard.retreat() {
            writeln!(self.output, "! {err}")?;
        }
        Ok(())
    }

    fn export(&mut self, wizard: &mut Wizard) -> Result<()> {
        match wizard.export_tags() {
            Ok(path) => writeln!(
                self.output,
                "{}: {}",
                wizard.locale().strings().buttons.save_tags,
                path.display()
            )?,
            Err(err) => writeln!(self.output, "! {err}")?,
        }
        Ok(())
    }

    fn toggle_by_number(&mut self, wizard: &mut Wizard, line: &str) -> Result<()> {
        let choices = choices(wizard);
        for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            match token.parse::<usize>().ok().and_then(|n| choices.get(n.wrapping_sub(1))) {
                Some(tag) => {
                    wizard.toggle(tag);
                }
                None => writeln!(self.output, "! No tag numbered '{token}'")?,
            }
        }
        Ok(())
    }

    fn render(&mut self, wizard: &Wizard) -> Result<()> {
        let t = wizard.locale().strings();
        writeln!(self.output)?;
        writeln!(self.output, "== {} ==", t.title)?;
        self.render_stepper(wizard.step(), t)?;
        writeln!(
            self.output,
            "{}: {} ({})",
            t.language.label,
            t.language.name_of(wizard.locale()),
            wizard.locale()
        )?;

        match wizard.step() {
            Step::Describe => self.render_describe(wizard, t),
            Step::Review => self.render_review(wizard, t),
            Step::Save => self.render_save(wizard, t),
        }
    }

    fn render_stepper(&mut self, current: Step, t: &UiStrings) -> Result<()> {
        let labels = Step::ALL
            .iter()
            .map(|step| {
                let label = match step {
                    Step::Describe => &t.steps.describe,
                    Step::Review => &t.steps.review,
                    Step::Save => &t.steps.save,
                };
                if *step == current {
                    format!("[{}. {}]", step.index() + 1, label)
                } else {
                    format!("{}. {}", step.index() + 1, label)
                }
            })
            .collect::<Vec<_>>();
        writeln!(self.output, "{}", labels.join(" > "))?;
        Ok(())
    }

    fn render_describe(&mut self, wizard: &Wizard, t: &UiStrings) -> Result<()> {
        let tag_type = match wizard.tag_type() {
            TagType::Template => &t.tag_type.options.template,
            TagType::Asset => &t.tag_type.options.asset,
        };
        let method = match wizard.input_method() {
            InputMethod::Description => &t.input_method.options.description,
            InputMethod::Filename => &t.input_method.options.filename,
        };
        writeln!(self.output, "{}: {}  (:type template|asset)", t.tag_type.label, tag_type)?;
        writeln!(
            self.output,
            "{}: {}  (:method description|filename)",
            t.input_method.label, method
        )?;
        writeln!(self.output)?;
        match wizard.input_method() {
            InputMethod::Description => {
                writeln!(self.output, "{}", t.description.label)?;
            }
            InputMethod::Filename => {
                writeln!(self.output, "{} ({})", t.filename.label, t.filename.placeholder)?;
            }
        }
        writeln!(
            self.output,
            "[Enter] {}  (:lang <code>, :quit)",
            t.description.button
        )?;
        Ok(())
    }

    fn render_review(&mut self, wizard: &Wizard, t: &UiStrings) -> Result<()> {
        if let Some(warning) = wizard.warning() {
            let text = if warning.fallback {
                format!("{} {}", t.suggestions.fallback, warning.detail)
            } else {
                warning.detail
            };
            writeln!(self.output, "! {}", text.trim_end())?;
        }

        writeln!(self.output, "{}", t.suggestions.title)?;
        if wizard.suggestions().is_empty() {
            writeln!(self.output, "  {}", t.no_suggestions)?;
        }

        let mut number = 0;
        for group in wizard.suggestions() {
            match group.confidence {
                Some(confidence) => writeln!(
                    self.output,
                    "{} ({:.0}%)",
                    group.category,
                    confidence * 100.0
                )?,
                None => writeln!(self.output, "{}", group.category)?,
            }
            for tag in &group.suggested_tags {
                number += 1;
                writeln!(self.output, "  {} {}. {}", mark(wizard, tag), number, tag)?;
            }
            if group.category == BANNER_SIZE_CATEGORY {
                writeln!(self.output, "  ({})", t.suggestions.banner_size)?;
            }
        }

        if !wizard.conditional_tags().is_empty() {
            writeln!(self.output, "{}", t.suggestions.conditional)?;
            for conditional in wizard.conditional_tags() {
                number += 1;
                write!(
                    self.output,
                    "  {} {}. {}",
                    mark(wizard, &conditional.tag),
                    number,
                    conditional.tag
                )?;
                if conditional.description.is_empty() {
                    writeln!(self.output)?;
                } else {
                    writeln!(self.output, " - {}", conditional.description)?;
                }
            }
        }

        writeln!(
            self.output,
            "[b] {}  [n] {}  (toggle tags by number)",
            t.buttons.back, t.buttons.next
        )?;
        Ok(())
    }

    fn render_save(&mut self, wizard: &Wizard, t: &UiStrings) -> Result<()> {
        writeln!(self.output, "{}", t.selected.title)?;
        for tag in wizard.selected_tags() {
            writeln!(self.output, "  {tag}")?;
        }
        writeln!(self.output, "{} {}", t.selected.save_as, wizard.preview().filename)?;
        writeln!(
            self.output,
            "[b] {}  [:new] {}  [s] {}",
            t.buttons.back, t.buttons.start_new, t.buttons.save_tags
        )?;
        Ok(())
    }
}

fn mark(wizard: &Wizard, tag: &str) -> &'static str {
    if wizard.is_selected(tag) { "[x]" } else { "[ ]" }
}

/// Tags in on-screen order: every group's suggestions, then the conditional tags.
fn choices(wizard: &Wizard) -> Vec<String> {
    wizard
        .suggestions()
        .iter()
        .flat_map(|group| group.suggested_tags.iter().cloned())
        .chain(wizard.conditional_tags().iter().map(|c| c.tag.clone()))
        .collect()
}
