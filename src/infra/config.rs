use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::infra::render::OutputFormat;
use crate::specs::mise::DEFAULT_PROGRAM;

/// File name written by `init`.
pub const CONFIG_FILE: &str = "mise-complete.toml";

/// Environment variable prefix; sections are separated by `__`.
pub const ENV_PREFIX: &str = "MISE_COMPLETE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Dynamic suggestion settings
    pub generator: GeneratorConfig,

    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig
{
    /// Executable invoked by generators (e.g. an absolute path to `mise`)
    pub program: String,

    /// Upper bound for a single generator run, in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig
{
    pub format: OutputFormat,
    pub show_hidden: bool,
}

impl Default for GeneratorConfig
{
    fn default() -> Self
    {
        Self { program: DEFAULT_PROGRAM.to_string(), timeout_ms: 1500 }
    }
}

impl Default for OutputConfig
{
    fn default() -> Self
    {
        Self { format: OutputFormat::Text, show_hidden: false }
    }
}

impl GeneratorConfig
{
    pub fn timeout(&self) -> Duration
    {
        Duration::from_millis(self.timeout_ms)
    }
}

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Defaults, then the first config file found in `dir`, then environment.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let defaults =
        config::Config::try_from(&Config::default()).context("Failed to encode default configuration")?;
    let mut builder = config::Config::builder().add_source(defaults);

    // Load from config files in priority order
    let config_paths = ["mise-complete.toml", "mise-complete.yaml", "mise-complete.json", ".mise-complete.toml"];

    for name in &config_paths
    {
        let path = dir.join(name);
        if path.exists()
        {
            tracing::debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    // MISE_COMPLETE_GENERATOR__TIMEOUT_MS=500
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILE);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_files()
    {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = load_config_from(tmp.path()).expect("loads");
        assert_eq!(cfg.generator.program, "mise");
        assert_eq!(cfg.generator.timeout(), Duration::from_millis(1500));
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn partial_file_keeps_other_defaults()
    {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join(CONFIG_FILE), "[generator]\ntimeout_ms = 250\n").expect("write");

        let cfg = load_config_from(tmp.path()).expect("loads");
        assert_eq!(cfg.generator.timeout_ms, 250);
        assert_eq!(cfg.generator.program, "mise");
        assert!(!cfg.output.show_hidden);
    }

    #[test]
    fn init_refuses_to_overwrite()
    {
        let tmp = TempDir::new().expect("tempdir");
        let ctx = AppContext { quiet: true, no_color: true };
        let args = || InitArgs { path: tmp.path().to_path_buf(), force: false };

        init(args(), &ctx).expect("first init");
        assert!(init(args(), &ctx).is_err());

        let written = std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).expect("read");
        let parsed: Config = toml::from_str(&written).expect("round-trips");
        assert_eq!(parsed, Config::default());
    }
}
