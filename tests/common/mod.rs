//! Common test utilities for calmjs integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary Python environment for integration tests
///
/// Holds a `site-packages` directory of egg-info metadata and runs the real
/// binary from the temporary root, isolated from any user settings.
pub struct TestEnvironment {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Root of the environment, used as the working directory
    pub path: PathBuf,
    /// The scanned site-packages directory
    pub site_packages: PathBuf,
}

impl TestEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let site_packages = path.join("site-packages");
        std::fs::create_dir_all(&site_packages).expect("Failed to create site-packages");
        Self {
            temp,
            path,
            site_packages,
        }
    }

    /// The security -> framework -> widget, forms, service -> site environment
    #[allow(dead_code)]
    pub fn site() -> Self {
        let env = Self::new();
        env.add_egg_info(
            "security",
            "9999",
            &[],
            &[("default.json", "This is very NOT a package.json.")],
        );
        env.add_egg_info(
            "framework",
            "2.4",
            &["security"],
            &[(
                "default.json",
                r#"{"name": "framework", "description": "some framework",
                    "dependencies": {"left-pad": "~1.1.1"},
                    "devDependencies": {"sinon": "~1.15.0"}}"#,
            )],
        );
        env.add_egg_info(
            "widget",
            "1.1",
            &["framework>=2.1"],
            &[(
                "default.json",
                r#"{"dependencies": {"jquery": "~2.0.0", "underscore": "~1.7.0"}}"#,
            )],
        );
        env.add_egg_info(
            "forms",
            "1.6",
            &["framework>=2.2", "widget>=1.0"],
            &[(
                "default.json",
                r#"{"dependencies": {"backbone": "~1.3.0", "jquery-ui": "~1.12.0"}}"#,
            )],
        );
        env.add_egg_info(
            "service",
            "1.1",
            &["framework>=2.1"],
            &[(
                "default.json",
                r#"{"dependencies": {"underscore": "~1.8.0"},
                    "devDependencies": {"sinon": "~1.17.0"}}"#,
            )],
        );
        env.add_egg_info(
            "site",
            "2.0",
            &["framework>=2.1", "widget>=1.1", "forms>=1.6", "service>=1.1"],
            &[(
                "default.json",
                r#"{"name": "site", "dependencies": {"underscore": "~1.8.0", "jquery": "~1.9.0"}}"#,
            )],
        );
        env
    }

    /// Write a `name-version.egg-info` directory into site-packages
    pub fn add_egg_info(
        &self,
        name: &str,
        version: &str,
        requires: &[&str],
        files: &[(&str, &str)],
    ) -> PathBuf {
        let egg_info = self
            .site_packages
            .join(format!("{}-{}.egg-info", name, version));
        std::fs::create_dir_all(&egg_info).expect("Failed to create egg-info directory");
        std::fs::write(
            egg_info.join("PKG-INFO"),
            format!("Metadata-Version: 1.1\nName: {}\nVersion: {}\n", name, version),
        )
        .expect("Failed to write PKG-INFO");
        std::fs::write(egg_info.join("requires.txt"), requires.join("\n"))
            .expect("Failed to write requires.txt");
        for (filename, contents) in files {
            std::fs::write(egg_info.join(filename), contents).expect("Failed to write metadata");
        }
        egg_info
    }

    /// Write a `name-version.dist-info` directory into site-packages
    #[allow(dead_code)]
    pub fn add_dist_info(
        &self,
        name: &str,
        version: &str,
        requires_dist: &[&str],
        files: &[(&str, &str)],
    ) -> PathBuf {
        let dist_info = self
            .site_packages
            .join(format!("{}-{}.dist-info", name, version));
        std::fs::create_dir_all(&dist_info).expect("Failed to create dist-info directory");
        let mut metadata = format!("Metadata-Version: 2.1\nName: {}\nVersion: {}\n", name, version);
        for requirement in requires_dist {
            metadata.push_str(&format!("Requires-Dist: {}\n", requirement));
        }
        std::fs::write(dist_info.join("METADATA"), metadata).expect("Failed to write METADATA");
        for (filename, contents) in files {
            std::fs::write(dist_info.join(filename), contents).expect("Failed to write metadata");
        }
        dist_info
    }

    /// Write a file relative to the environment root
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file relative to the environment root
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists relative to the environment root
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// The binary, run from the environment root with no settings file
    pub fn calmjs(&self) -> Command {
        let mut cmd = calmjs_cmd(&self.path);
        cmd.arg("--site-packages").arg(&self.site_packages);
        cmd
    }
}

/// The binary run from `cwd`, isolated from user settings
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn calmjs_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("calmjs").expect("calmjs binary");
    cmd.current_dir(cwd)
        .env_remove("CALMJS_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env("HOME", cwd);
    cmd
}

/// Parse command output as JSON
#[allow(dead_code)]
pub fn json_output(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("output should be JSON")
}
