//! **mise-complete** - Declarative command-line completion for `mise`
//!
//! A typed tree of commands, options and arguments, resolved against what
//! the user has typed and turned into ranked suggestions. Dynamic values
//! come from generators that run `mise` itself under a timeout.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation for this binary
pub mod completion;

/// Completion model and pipeline
pub mod core {
    /// Commands, options and arguments (builder API)
    pub mod spec;
    pub use spec::{ArgNode, CommandNode, Names, OptionNode, Template};

    /// Suggestion records, priorities, dedupe and ordering
    pub mod suggestion;
    pub use suggestion::{Suggestion, SuggestionKind, SuggestionOverrides};

    /// External commands whose output becomes suggestions
    pub mod generator;
    pub use generator::{Generator, GeneratorError, PostProcess, ScriptRunner};

    /// Load-time structural checks
    pub mod validate;
    pub use validate::{SpecError, SpecStats, SpecTree};

    /// Token path → command node, visible options and next slot
    pub mod resolve;
    pub use resolve::{Expecting, Resolution, ResolveError};

    /// Resolve, collect, filter, dedupe and rank
    pub mod engine;
    pub use engine::Engine;

    /// Filesystem suggestions (`folders`, `filepaths`)
    pub mod template;

    /// Tree view of the command spec
    pub mod tree;
    pub use tree::run as tree_run;
}

/// Built-in specs
pub mod specs {
    /// The `mise` command tree
    pub mod mise;
}

/// Infrastructure - configuration, processes, logging and output
pub mod infra {
    /// Layered configuration (defaults, file, environment)
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Child processes with a deadline
    pub mod process;
    pub use process::SystemRunner;

    /// tracing-subscriber setup on stderr
    pub mod logging;

    /// Text, JSON and table output
    pub mod render;
    pub use render::OutputFormat;
}

/// Subcommand handlers
pub mod cli_ext {
    pub mod complete_cmd;
    pub mod spec_cmd;
}

pub use cli::{AppContext, Cli, Commands};
pub use cli_ext::complete_cmd::{complete as complete_run, generate as generate_run, resolve as resolve_run};
pub use cli_ext::spec_cmd::{export as export_run, validate as validate_run};
pub use crate::core::tree_run;
pub use crate::core::{CommandNode, Engine, Generator, SpecTree, Suggestion};
pub use infra::{Config, SystemRunner, load_config};
