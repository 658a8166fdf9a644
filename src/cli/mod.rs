//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - flatten: Flatten command arguments
//! - extras: Extras command arguments
//! - modules: Modules command arguments
//! - resolve: Resolve command arguments
//! - read: Read command arguments
//! - validate: Validate command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod extras;
pub mod flatten;
pub mod modules;
pub mod read;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsArgs;
pub use extras::ExtrasArgs;
pub use flatten::FlattenArgs;
pub use modules::ModulesArgs;
pub use read::ReadArgs;
pub use resolve::ResolveArgs;
pub use validate::ValidateArgs;

/// calmjs - JavaScript dependencies of Python packages
///
/// Flatten the npm style dependency declarations carried by installed Python
/// packages across their dependency graph.
#[derive(Parser, Debug)]
#[command(
    name = "calmjs",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Flatten JavaScript dependencies declared by Python packages",
    long_about = "calmjs reads the JSON dependency documents embedded in the metadata of installed \
                  Python packages, walks their Python dependency graph, and merges the documents \
                  so that packages override what they depend on.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  calmjs flatten site                      \x1b[90m# Merged default.json of site and its dependencies\x1b[0m\n   \
                  calmjs flatten site --filename package.json\n   \
                  calmjs resolve site                      \x1b[90m# Show the resolution order\x1b[0m\n   \
                  calmjs modules site                      \x1b[90m# Merged module locations\x1b[0m\n   \
                  calmjs read framework                    \x1b[90m# One package's own document\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file (defaults to ./calmjs.yaml, then the user config directory)
    #[arg(long, short = 'c', global = true, env = "CALMJS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Additional site-packages directory to scan (repeatable)
    #[arg(long = "site-packages", short = 's', global = true, value_name = "DIR")]
    pub site_packages: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten dependency documents across the dependency graph
    Flatten(FlattenArgs),

    /// Flatten extras documents across the dependency graph
    Extras(ExtrasArgs),

    /// Merge module locations from a module registry
    Modules(ModulesArgs),

    /// Show the resolution order of packages
    Resolve(ResolveArgs),

    /// Show one package's own document
    Read(ReadArgs),

    /// Check that a JSON file holds an object
    Validate(ValidateArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
