use clap::Parser;

use crate::registry::MODULE_REGISTRY;

/// Arguments for the modules command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Merged module locations of a package:\n    calmjs modules site\n\n\
                  Use another registry:\n    calmjs modules site --registry calmjs.module.tests")]
pub struct ModulesArgs {
    /// Packages to look up
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Registry to read module records from
    #[arg(long, default_value = MODULE_REGISTRY)]
    pub registry: String,

    /// Only the named packages, without their dependencies
    #[arg(long)]
    pub direct: bool,
}
