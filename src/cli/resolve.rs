use clap::Parser;

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the resolution order of a package:\n    calmjs resolve site\n\n\
                  Several packages at once:\n    calmjs resolve forms service")]
pub struct ResolveArgs {
    /// Packages to resolve
    #[arg(required = true)]
    pub packages: Vec<String>,
}
