use clap::Parser;
use std::path::PathBuf;

/// Arguments for the flatten command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Flatten the dependencies of a package:\n    calmjs flatten site\n\n\
                  Read bower.json instead of the configured file:\n    calmjs flatten site --filename bower.json\n\n\
                  Only the runtime dependencies:\n    calmjs flatten site --dep-key dependencies\n\n\
                  Write the result to a file:\n    calmjs flatten site --output package.json")]
pub struct FlattenArgs {
    /// Packages to flatten (requirement strings such as site or site>=2.0)
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Metadata file to read from each package
    #[arg(long)]
    pub filename: Option<String>,

    /// Dependency group to flatten (repeatable; defaults to the configured keys)
    #[arg(long = "dep-key", value_name = "KEY")]
    pub dep_keys: Vec<String>,

    /// Only merge the named packages, without their dependencies
    #[arg(long)]
    pub direct: bool,

    /// Write the document to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
