//! Output formatting for suggestions and resolutions.

use anyhow::Result;
use itertools::Itertools;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::AppContext;
use crate::core::resolve::{Expecting, Resolution};
use crate::core::spec::{ArgNode, OptionNode};
use crate::core::suggestion::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name<TAB>description` per line, for shell integration
    #[default]
    Text,
    Json,
    Table,
}

#[derive(Tabled)]
struct SuggestionRow {
    name: String,
    #[tabled(rename = "type")]
    kind: String,
    priority: u8,
    description: String,
}

/// Render suggestions; text output carries only the first description line.
pub fn suggestions(
    items: &[Suggestion],
    format: OutputFormat,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => items
            .iter()
            .map(|s| match s.summary() {
                "" => s.name.clone(),
                summary => format!("{}\t{}", s.name, summary),
            })
            .join("\n"),
        OutputFormat::Json => serde_json::to_string(items)?,
        OutputFormat::Table => {
            let rows = items.iter().map(|s| SuggestionRow {
                name: s.name.clone(),
                kind: s.kind.as_str().to_string(),
                priority: s.effective_priority(),
                description: s.summary().to_string(),
            });
            Table::new(rows)
                .with(Style::rounded())
                .to_string()
        }
    })
}

/// Serializable view of a [`Resolution`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionView<'a> {
    pub command: String,
    pub options: Vec<&'a OptionNode>,
    pub positionals: &'a [String],
    pub expecting: ExpectingView<'a>,
    pub can_descend: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExpectingView<'a> {
    OptionValue { option: &'a str, arg: &'a ArgNode },
    Positional { arg: &'a ArgNode },
    Nothing,
}

impl<'a> ResolutionView<'a> {
    pub fn new(res: &'a Resolution<'a>) -> Self {
        let expecting = match res.expecting {
            Expecting::OptionValue { option, arg } => ExpectingView::OptionValue { option: option.names.canonical(), arg },
            Expecting::Positional(arg) => ExpectingView::Positional { arg },
            Expecting::Nothing => ExpectingView::Nothing,
        };
        Self {
            command: res.command_path(),
            options: res.options.clone(),
            positionals: &res.positionals,
            expecting,
            can_descend: res.can_descend(),
        }
    }
}

pub fn resolution(
    res: &Resolution<'_>,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string(&ResolutionView::new(res))?);
    }

    let heading = |s: &str| if ctx.no_color { s.to_string() } else { s.bold().to_string() };

    let mut out = Vec::new();
    out.push(format!("{} {}", heading("command:"), res.command_path()));
    if let Some(description) = res
        .command()
        .description
        .as_deref()
        .and_then(|d| d.lines().next())
    {
        out.push(format!("  {description}"));
    }

    out.push(heading("options:"));
    for option in &res.options {
        let names = option.names.iter().join(", ");
        let value = option
            .args
            .as_ref()
            .map(|a| format!(" <{}>", a.name))
            .unwrap_or_default();
        let persistent = if option.is_persistent { " (persistent)" } else { "" };
        out.push(format!("  {names}{value}{persistent}"));
    }

    let next = match res.expecting {
        Expecting::OptionValue { option, arg } => format!("value of {} {}", option.names.canonical(), describe_arg(arg)),
        Expecting::Positional(arg) => format!("positional {}", describe_arg(arg)),
        Expecting::Nothing => "nothing".to_string(),
    };
    out.push(format!("{} {}", heading("expecting:"), next));

    if res.can_descend() && !res.command().subcommands.is_empty() {
        let subcommands = res
            .command()
            .subcommands
            .iter()
            .filter(|c| !c.hidden)
            .map(|c| c.name())
            .join(" ");
        out.push(format!("{} {}", heading("subcommands:"), subcommands));
    }

    Ok(out.join("\n"))
}

fn describe_arg(arg: &ArgNode) -> String {
    let mut flags = Vec::new();
    if arg.is_optional {
        flags.push("optional".to_string());
    }
    if arg.is_variadic {
        flags.push("variadic".to_string());
    }
    if let Some(default) = &arg.default {
        flags.push(format!("default: {default}"));
    }
    if arg.is_dynamic() {
        flags.push("dynamic".to_string());
    }
    if flags.is_empty() {
        arg.name.clone()
    } else {
        format!("{} ({})", arg.name, flags.join(", "))
    }
}
