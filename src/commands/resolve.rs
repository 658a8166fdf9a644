//! Resolve command implementation

use console::style;

use crate::cli::{GlobalArgs, ResolveArgs};
use crate::commands::helpers::{Session, package_names};
use crate::environment::find_packages_requirements_dists;
use crate::error::Result;

/// Run resolve command
///
/// Lists the closure ancestors first, the order documents are merged in.
pub fn run(global: &GlobalArgs, args: ResolveArgs) -> Result<()> {
    let session = Session::load(global)?;
    let names = package_names(&args.packages);
    let dists = find_packages_requirements_dists(&session.working_set, &names)?;

    if dists.is_empty() {
        println!("No installed packages matched.");
        return Ok(());
    }

    for dist in dists {
        let location = dist
            .location()
            .map(|path| format!(" ({})", path.display()))
            .unwrap_or_default();
        println!(
            "{} {}{}",
            style(dist.name()).cyan().bold(),
            dist.version(),
            style(location).dim()
        );
    }
    Ok(())
}
