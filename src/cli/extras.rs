use clap::Parser;
use std::path::PathBuf;

/// Arguments for the extras command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Flatten the extras of a package:\n    calmjs extras app\n\n\
                  Only the package's own extras:\n    calmjs extras app --direct\n\n\
                  Write the result to a file:\n    calmjs extras app --output extras_calmjs.json")]
pub struct ExtrasArgs {
    /// Packages to flatten
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Only merge the named packages, without their dependencies
    #[arg(long)]
    pub direct: bool,

    /// Write the document to this file instead of stdout; removed when empty
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
