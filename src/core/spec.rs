//! Strongly typed completion spec tree.
//!
//! A spec is a tree of [`CommandNode`]s. Each node declares its flags
//! ([`OptionNode`]) and positional slots ([`ArgNode`]); argument slots may
//! carry static suggestions, a filesystem [`Template`] or one or more
//! [`Generator`]s. Nodes are built with consuming builder methods and are
//! never mutated afterwards; see [`crate::core::validate::SpecTree`] for
//! load-time validation.

use serde::Serialize;

use crate::core::generator::Generator;
use crate::core::suggestion::{Suggestion, SuggestionKind};

/// Canonical name plus aliases.
///
/// Specs may spell a name as a single string or as a list; both normalise
/// into this shape so lookups never branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Names {
    #[serde(rename = "name")]
    canonical: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
}

impl Names {
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Canonical name first, then aliases in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|n| n == name)
    }

    fn from_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = names.into_iter().map(Into::into);
        let canonical = iter.next().unwrap_or_default();
        Self { canonical, aliases: iter.collect() }
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Self { canonical: name.to_string(), aliases: Vec::new() }
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Self { canonical: name, aliases: Vec::new() }
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Self::from_list(names)
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Self::from_list(names)
    }
}

/// Built-in filesystem suggestion sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Directories only
    Folders,
    /// Files and directories
    Filepaths,
}

/// A positional argument or the value slot of an option.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_variadic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_dangerous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generators: Vec<Generator>,
}

impl ArgNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn dangerous(mut self) -> Self {
        self.is_dangerous = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Fixed candidates, offered as plain argument suggestions.
    pub fn suggestions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions.extend(
            values
                .into_iter()
                .map(|v| Suggestion::new(v, SuggestionKind::Arg)),
        );
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn generator(mut self, generator: Generator) -> Self {
        self.generators.push(generator);
        self
    }

    /// True when anything beyond a bare name is attached to this slot.
    pub fn is_dynamic(&self) -> bool {
        self.template.is_some() || !self.generators.is_empty()
    }
}

/// A flag, optionally taking a value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionNode {
    #[serde(flatten)]
    pub names: Names,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_persistent: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<ArgNode>,
}

impl OptionNode {
    pub fn new(names: impl Into<Names>) -> Self {
        Self {
            names: names.into(),
            description: None,
            is_persistent: false,
            hidden: false,
            args: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inherited by every descendant command.
    pub fn persistent(mut self) -> Self {
        self.is_persistent = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn arg(mut self, arg: ArgNode) -> Self {
        self.args = Some(arg);
        self
    }

    pub fn takes_value(&self) -> bool {
        self.args.is_some()
    }
}

/// One level of the command tree, the root included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandNode {
    #[serde(flatten)]
    pub names: Names,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_dangerous: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandNode>,
}

impl CommandNode {
    pub fn new(names: impl Into<Names>) -> Self {
        Self {
            names: names.into(),
            description: None,
            hidden: false,
            is_dangerous: false,
            options: Vec::new(),
            args: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn dangerous(mut self) -> Self {
        self.is_dangerous = true;
        self
    }

    pub fn option(mut self, option: OptionNode) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = OptionNode>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn arg(mut self, arg: ArgNode) -> Self {
        self.args.push(arg);
        self
    }

    pub fn subcommand(mut self, command: CommandNode) -> Self {
        self.subcommands.push(command);
        self
    }

    pub fn name(&self) -> &str {
        self.names.canonical()
    }

    /// Exact, case-sensitive lookup over canonical names and aliases.
    pub fn find_subcommand(&self, token: &str) -> Option<&CommandNode> {
        self.subcommands
            .iter()
            .find(|c| c.names.contains(token))
    }

    /// Depth-first walk yielding every node with its depth (root = 0).
    pub fn walk(&self) -> Vec<(usize, &CommandNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.subcommands.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
