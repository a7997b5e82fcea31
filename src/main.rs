use anyhow::Result;
use clap::Parser;
use mise_complete::cli::{AppContext, Cli, Commands};
use mise_complete::infra::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let completing = matches!(cli.command, Commands::Complete(_));
    logging::init(cli.verbose, cli.quiet, cli.no_color, completing);

    // Build a context once, pass everywhere
    let ctx = AppContext { quiet: cli.quiet, no_color: cli.no_color };

    match cli.command {
        Commands::Complete(args) => mise_complete::complete_run(args, &ctx),
        Commands::Resolve(args) => mise_complete::resolve_run(args, &ctx),
        Commands::Generate(args) => mise_complete::generate_run(args, &ctx),
        Commands::Tree(args) => mise_complete::tree_run(args, &ctx),
        Commands::Validate(args) => mise_complete::validate_run(args, &ctx),
        Commands::Export(args) => mise_complete::export_run(args, &ctx),
        Commands::Init(args) => mise_complete::infra::config::init(args, &ctx),
        Commands::Completions(args) => mise_complete::completion::run(args, &ctx),
    }
}
