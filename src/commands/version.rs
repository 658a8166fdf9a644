//! Version command implementation

use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;
use crate::commands::helpers::resolve_current_dir;
use crate::config::{self, Settings};
use crate::error::Result;

/// Run version command
///
/// Prints the build, then the settings and marker environment a flatten
/// run from this directory would use.
pub fn run(global: &GlobalArgs) -> Result<()> {
    let cwd = resolve_current_dir()?;
    let source = config::locate(global.config.as_deref(), &cwd)?;
    let settings = config::load(global.config.as_deref(), &cwd)?;

    println!("calmjs {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!();
    print_settings(source.as_deref(), &settings, global);

    Ok(())
}

fn print_settings(source: Option<&Path>, settings: &Settings, global: &GlobalArgs) {
    println!("Settings:");
    match source {
        Some(path) => println!("  File: {}", path.display()),
        None => println!("  File: (defaults)"),
    }
    println!("  Filename: {}", settings.filename);
    println!("  Dependency keys: {}", settings.dep_keys.join(", "));
    println!("  Extras keys: {}", settings.extras_keys.join(", "));

    let site_packages: Vec<&Path> = settings
        .site_packages
        .iter()
        .chain(&global.site_packages)
        .map(PathBuf::as_path)
        .collect();
    if site_packages.is_empty() {
        println!("  Site packages: (none)");
    } else {
        println!("  Site packages:");
        for dir in site_packages {
            println!("    {}", dir.display());
        }
    }

    let markers = &settings.markers;
    println!();
    println!("Marker environment:");
    println!("  python_version: {}", markers.python_version);
    println!("  python_full_version: {}", markers.python_full_version);
    println!("  implementation_name: {}", markers.implementation_name);
    println!("  sys_platform: {}", markers.sys_platform);
    println!("  platform_machine: {}", markers.platform_machine);
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
