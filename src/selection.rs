//! Tag selection engine.
//!
//! Holds the suggestion groups of the current session together with the
//! user's selection. The conditional tag list is a projection of both and is
//! rebuilt from scratch after every change, so an entry whose triggers are no
//! longer selected can never linger.

use crate::locale::Locale;
use crate::suggestion::SuggestionGroup;
use std::collections::HashSet;
use tracing::debug;

/// A tag required by the current selection, with its localized explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalTag {
    pub tag: String,
    pub description: String,
}

/// Selected tags with set semantics. Insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Flips membership of `tag`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                false
            }
            None => {
                self.tags.push(tag.to_string());
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for TagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = TagSelection::new();
        for tag in iter {
            let tag = tag.into();
            if !selection.contains(&tag) {
                selection.tags.push(tag);
            }
        }
        selection
    }
}

/// Every conditional tag triggered by `selection`, first occurrence per tag name.
pub fn resolve_conditional_tags(
    groups: &[SuggestionGroup],
    selection: &TagSelection,
    locale: Locale,
) -> Vec<ConditionalTag> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .filter_map(|group| group.conditional_tags.as_ref())
        .flat_map(|rules| rules.iter())
        .filter(|(_, config)| {
            config
                .trigger_tags
                .iter()
                .any(|trigger| selection.contains(trigger))
        })
        .filter(|&(tag, _)| seen.insert(tag.as_str()))
        .map(|(tag, config)| ConditionalTag {
            tag: tag.clone(),
            description: locale.pick(&config.description).to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    groups: Vec<SuggestionGroup>,
    selection: TagSelection,
    conditional: Vec<ConditionalTag>,
    locale: Locale,
}

impl SelectionEngine {
    pub fn new(groups: Vec<SuggestionGroup>, locale: Locale) -> Self {
        Self {
            groups,
            selection: TagSelection::new(),
            conditional: Vec::new(),
            locale,
        }
    }

    pub fn groups(&self) -> &[SuggestionGroup] {
        &self.groups
    }

    pub fn selection(&self) -> &TagSelection {
        &self.selection
    }

    pub fn conditional_tags(&self) -> &[ConditionalTag] {
        &self.conditional
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selection.contains(tag)
    }

    /// Flips `tag` and re-derives the conditional tags. Returns whether it is now selected.
    pub fn toggle(&mut self, tag: &str) -> bool {
        let selected = self.selection.toggle(tag);
        self.refresh();
        debug!(
            tag,
            selected,
            conditional = self.conditional.len(),
            "toggled tag"
        );
        selected
    }

    /// Switches the description language of the conditional tags.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.refresh();
    }

    /// Replaces the groups, dropping the previous selection.
    pub fn load(&mut self, groups: Vec<SuggestionGroup>) {
        self.groups = groups;
        self.selection.clear();
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    fn refresh(&mut self) {
        self.conditional = resolve_conditional_tags(&self.groups, &self.selection, self.locale);
    }
}
