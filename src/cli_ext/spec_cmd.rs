//! Handlers for `validate` and `export`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{AppContext, ExportArgs, ValidateArgs};
use crate::core::validate::{SpecStats, SpecTree, validate as validate_tree};
use crate::infra::config::load_config;
use crate::specs::mise;

#[derive(Tabled)]
struct StatRow {
    metric: &'static str,
    count: usize,
}

fn stat_rows(stats: &SpecStats) -> Vec<StatRow> {
    vec![
        StatRow { metric: "commands", count: stats.commands },
        StatRow { metric: "hidden commands", count: stats.hidden_commands },
        StatRow { metric: "options", count: stats.options },
        StatRow { metric: "persistent options", count: stats.persistent_options },
        StatRow { metric: "arguments", count: stats.args },
        StatRow { metric: "generators", count: stats.generators },
        StatRow { metric: "max depth", count: stats.max_depth },
    ]
}

/// Report every structural problem; fail if there is any.
pub fn validate(
    args: ValidateArgs,
    ctx: &AppContext,
) -> Result<()> {
    let config = load_config()?;
    let root = mise::command(&config.generator.program);

    let errors = validate_tree(&root);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("{:?}", miette::Report::new(err.clone()));
        }
        anyhow::bail!("spec has {} problem(s)", errors.len());
    }

    let tree = SpecTree::new(root)?;
    let stats = tree.stats();

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    let ok = format!("✓ {} spec is valid", tree.root().name());
    if ctx.no_color {
        println!("{ok}");
    } else {
        println!("{}", ok.green());
    }
    println!(
        "{}",
        Table::new(stat_rows(&stats))
            .with(Style::rounded())
    );
    Ok(())
}

pub fn export(
    args: ExportArgs,
    _ctx: &AppContext,
) -> Result<()> {
    let config = load_config()?;
    let tree = mise::spec(&config.generator.program).context("Built-in spec is invalid")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(tree.root())?
    } else {
        serde_json::to_string(tree.root())?
    };
    println!("{json}");
    Ok(())
}
