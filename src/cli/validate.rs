use clap::Parser;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check a package.json:\n    calmjs validate package.json\n\n\
                  Report errors under another name:\n    calmjs validate default.json --field package_json")]
pub struct ValidateArgs {
    /// JSON file to check
    pub file: PathBuf,

    /// Field name used in error messages (defaults to the file name)
    #[arg(long)]
    pub field: Option<String>,
}
