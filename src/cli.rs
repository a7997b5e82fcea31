use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infra::render::OutputFormat;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "mise-complete")]
#[command(about = "Declarative command-line completion for mise")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output and log only errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest completions for the word under the cursor
    Complete(CompleteArgs),

    /// Show which command a token path resolves to
    Resolve(ResolveArgs),

    /// Run an ad-hoc generator and print its suggestions
    Generate(GenerateArgs),

    /// Print the completion tree
    Tree(TreeArgs),

    /// Check the completion tree and print a summary
    Validate(ValidateArgs),

    /// Print the completion tree as JSON
    Export(ExportArgs),

    /// Initialize a mise-complete.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Words after the program name; the last one is the word under the
    /// cursor (pass "" for a fresh word)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Offer hidden commands and options
    #[arg(long)]
    pub show_hidden: bool,

    /// Generator timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Completed words after the program name
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Output format; `table` renders as text
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Command to run, e.g. `-- mise plugins ls --quiet`
    #[arg(last = true, required = true, value_name = "ARGV")]
    pub argv: Vec<String>,

    /// Priority applied to every suggestion (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub priority: Option<u8>,

    /// Description applied to every suggestion
    #[arg(long)]
    pub description: Option<String>,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Include hidden commands
    #[arg(long)]
    pub show_hidden: bool,

    /// Maximum depth to print
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Also list each command's options and arguments
    #[arg(long)]
    pub details: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl CompleteArgs {
    /// Completed words and the word under the cursor.
    pub fn split_current(&self) -> (&[String], &str) {
        match self.words.split_last() {
            Some((current, tokens)) => (tokens, current.as_str()),
            None => (&[], ""),
        }
    }
}
