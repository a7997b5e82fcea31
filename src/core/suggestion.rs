//! Suggestion records handed back to the shell.

use std::collections::HashSet;

use serde::Serialize;

/// Priority used when a record does not carry one.
pub const DEFAULT_PRIORITY: u8 = 50;

/// Upper bound of the priority scale.
pub const MAX_PRIORITY: u8 = 100;

/// Priority from which a suggestion is pinned above regular candidates.
pub const PRIORITY_TOP_THRESHOLD: u8 = 76;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Subcommand,
    Option,
    Arg,
    Folder,
    File,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Subcommand => "subcommand",
            SuggestionKind::Option => "option",
            SuggestionKind::Arg => "arg",
            SuggestionKind::Folder => "folder",
            SuggestionKind::File => "file",
        }
    }
}

/// One candidate completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Literal text inserted on accept.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    #[serde(skip_serializing_if = "is_false")]
    pub is_dangerous: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            priority: None,
            display_name: None,
            kind,
            is_dangerous: false,
            hidden: false,
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority.min(MAX_PRIORITY));
        self
    }

    pub fn effective_priority(&self) -> u8 {
        self.priority
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// First description line; descriptions are free text and may span lines.
    pub fn summary(&self) -> &str {
        self.description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or("")
    }
}

/// Fields merged over every record a generator produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dangerous: Option<bool>,
}

impl SuggestionOverrides {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority.min(MAX_PRIORITY));
        self
    }

    /// Later values win, so `base.merged(&caller)` lets the caller override.
    pub fn merged(&self, other: &SuggestionOverrides) -> SuggestionOverrides {
        SuggestionOverrides {
            description: other
                .description
                .clone()
                .or_else(|| self.description.clone()),
            priority: other.priority.or(self.priority),
            display_name: other
                .display_name
                .clone()
                .or_else(|| self.display_name.clone()),
            is_dangerous: other.is_dangerous.or(self.is_dangerous),
        }
    }

    pub fn apply(&self, mut suggestion: Suggestion) -> Suggestion {
        if let Some(description) = &self.description {
            suggestion.description = Some(description.clone());
        }
        if let Some(priority) = self.priority {
            suggestion.priority = Some(priority);
        }
        if let Some(display_name) = &self.display_name {
            suggestion.display_name = Some(display_name.clone());
        }
        if let Some(dangerous) = self.is_dangerous {
            suggestion.is_dangerous = dangerous;
        }
        suggestion
    }
}

/// Drop later records whose name was already seen; the first source wins.
pub fn dedupe(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.name.clone()))
        .collect()
}

/// Stable sort, higher priority first.
pub fn sort_by_priority(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|s| std::cmp::Reverse(s.effective_priority()));
}

fn is_false(b: &bool) -> bool {
    !*b
}
