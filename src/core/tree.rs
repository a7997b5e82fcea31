//! Tree view of the completion spec, one line per command with aliases
//! and description, e.g. `plugins (p, plugin): Manage plugins`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use ptree::TreeBuilder;
use ptree::item::StringItem;

use crate::cli::{AppContext, TreeArgs};
use crate::core::spec::{ArgNode, CommandNode};
use crate::core::validate::SpecTree;
use crate::infra::config::load_config;
use crate::specs::mise;

pub fn run(
    args: TreeArgs,
    ctx: &AppContext,
) -> Result<()> {
    let config = load_config()?;
    let tree = mise::spec(&config.generator.program).context("Built-in spec is invalid")?;

    let opts = TreeOptions {
        show_hidden: args.show_hidden || config.output.show_hidden,
        max_depth: args.depth,
        details: args.details,
        color: !ctx.no_color,
    };

    if !ctx.quiet {
        print!("{}", render(&tree, &opts)?);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub show_hidden: bool,
    /// Depth 0 prints only the root.
    pub max_depth: Option<usize>,
    /// List options and arguments under each command.
    pub details: bool,
    pub color: bool,
}

/// Render the tree into a string (ptree box drawing).
pub fn render(
    tree: &SpecTree,
    opts: &TreeOptions,
) -> Result<String> {
    let root = build(tree.root(), opts);
    let mut buf = Vec::new();
    ptree::write_tree(&root, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn build(
    root: &CommandNode,
    opts: &TreeOptions,
) -> StringItem {
    let mut builder = TreeBuilder::new(command_label(root, opts));
    add_details(&mut builder, root, opts);
    add_children(&mut builder, root, opts, 1);
    builder.build()
}

fn add_children(
    builder: &mut TreeBuilder,
    node: &CommandNode,
    opts: &TreeOptions,
    depth: usize,
) {
    if let Some(max_depth) = opts.max_depth
        && depth > max_depth
    {
        return;
    }

    for child in node
        .subcommands
        .iter()
        .filter(|c| opts.show_hidden || !c.hidden)
    {
        builder.begin_child(command_label(child, opts));
        add_details(builder, child, opts);
        add_children(builder, child, opts, depth + 1);
        builder.end_child();
    }
}

fn add_details(
    builder: &mut TreeBuilder,
    node: &CommandNode,
    opts: &TreeOptions,
) {
    if !opts.details {
        return;
    }
    for option in node
        .options
        .iter()
        .filter(|o| opts.show_hidden || !o.hidden)
    {
        let mut label = option
            .names
            .iter()
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(arg) = &option.args {
            label.push_str(&format!(" {}", arg_label(arg)));
        }
        if option.is_persistent {
            label.push_str(" [persistent]");
        }
        builder.add_empty_child(paint(&label, opts, |s| s.cyan().to_string()));
    }
    for arg in &node.args {
        builder.add_empty_child(paint(&arg_label(arg), opts, |s| s.green().to_string()));
    }
}

fn command_label(
    node: &CommandNode,
    opts: &TreeOptions,
) -> String {
    let mut label = if node.is_dangerous {
        paint(node.name(), opts, |s| s.red().bold().to_string())
    } else {
        paint(node.name(), opts, |s| s.bold().to_string())
    };
    if !node.names.aliases().is_empty() {
        label.push_str(&format!(" ({})", node.names.aliases().join(", ")));
    }
    if node.hidden {
        label.push_str(" [hidden]");
    }
    if let Some(summary) = node
        .description
        .as_deref()
        .and_then(|d| d.lines().next())
    {
        label.push_str(&format!(": {}", paint(summary, opts, |s| s.dimmed().to_string())));
    }
    label
}

/// `<NAME>`, `[NAME]`, with `...` when variadic.
fn arg_label(arg: &ArgNode) -> String {
    let dots = if arg.is_variadic { "..." } else { "" };
    if arg.is_optional {
        format!("[{}]{dots}", arg.name)
    } else {
        format!("<{}>{dots}", arg.name)
    }
}

fn paint(
    text: &str,
    opts: &TreeOptions,
    style: impl Fn(&str) -> String,
) -> String {
    if opts.color { style(text) } else { text.to_string() }
}
