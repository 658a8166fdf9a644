//! calmjs - JavaScript dependencies of Python packages
//!
//! A command line tool flattening the npm style dependency declarations
//! embedded in installed Python packages across their dependency graph.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use calmjs::cli::{Cli, Commands};
use calmjs::commands;

fn init_tracing(verbose: bool) {
    let default = if verbose { "calmjs=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let result = match cli.command {
        Commands::Flatten(args) => commands::flatten::run(&cli.global, args),
        Commands::Extras(args) => commands::extras::run(&cli.global, args),
        Commands::Modules(args) => commands::modules::run(&cli.global, args),
        Commands::Resolve(args) => commands::resolve::run(&cli.global, args),
        Commands::Read(args) => commands::read::run(&cli.global, args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Version => commands::version::run(&cli.global),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
