use clap::Parser;

/// Arguments for the read command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a package's document:\n    calmjs read framework\n\n\
                  Show another metadata file:\n    calmjs read framework --filename extras_calmjs.json")]
pub struct ReadArgs {
    /// Package to read
    pub package: String,

    /// Metadata file to read
    #[arg(long)]
    pub filename: Option<String>,
}
