//! Handlers for `complete`, `resolve` and `generate`.
//!
//! `complete` is the hot path a shell calls on every key press. It never
//! fails on bad input: broken config falls back to defaults and token
//! paths that do not resolve print nothing.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{instrument, warn};

use crate::cli::{AppContext, CompleteArgs, GenerateArgs, ResolveArgs};
use crate::core::engine::Engine;
use crate::core::generator::Generator;
use crate::core::suggestion::{SuggestionOverrides, sort_by_priority};
use crate::infra::config::{Config, load_config};
use crate::infra::process::SystemRunner;
use crate::infra::render;
use crate::specs::mise;

#[instrument(level = "debug", skip_all, fields(words = args.words.len()))]
pub fn complete(
    args: CompleteArgs,
    _ctx: &AppContext,
) -> Result<()> {
    let config = load_config().unwrap_or_else(|err| {
        warn!("ignoring unreadable configuration: {err:#}");
        Config::default()
    });
    let tree = mise::spec(&config.generator.program).context("Built-in spec is invalid")?;
    let runner = SystemRunner::default();

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.generator.timeout());
    let engine = Engine::new(&tree, &runner)
        .timeout(timeout)
        .show_hidden(args.show_hidden || config.output.show_hidden);

    let (tokens, current) = args.split_current();
    let suggestions = engine.complete(tokens, current);

    let format = args
        .format
        .unwrap_or(config.output.format);
    let out = render::suggestions(&suggestions, format)?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}

pub fn resolve(
    args: ResolveArgs,
    ctx: &AppContext,
) -> Result<()> {
    let config = load_config()?;
    let tree = mise::spec(&config.generator.program).context("Built-in spec is invalid")?;

    let resolution = tree
        .resolve(args.tokens.as_slice())
        .with_context(|| format!("Cannot resolve `{}`", args.tokens.join(" ")))?;

    let format = args
        .format
        .unwrap_or(config.output.format);
    println!("{}", render::resolution(&resolution, format, ctx)?);
    Ok(())
}

/// Unlike `complete`, failures of the ad-hoc script are reported.
pub fn generate(
    args: GenerateArgs,
    _ctx: &AppContext,
) -> Result<()> {
    let config = load_config()?;

    let mut overrides = SuggestionOverrides::default();
    if let Some(description) = args.description {
        overrides = overrides.description(description);
    }
    if let Some(priority) = args.priority {
        overrides = overrides.priority(priority);
    }

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.generator.timeout());
    let generator = Generator::lines(args.argv, overrides);
    let mut suggestions = generator
        .try_generate(&SystemRunner::default(), timeout)
        .context("Generator failed")?;
    sort_by_priority(&mut suggestions);

    let format = args
        .format
        .unwrap_or(config.output.format);
    let out = render::suggestions(&suggestions, format)?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}
