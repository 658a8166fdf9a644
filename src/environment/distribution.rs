//! Installed distributions and their metadata stores

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, unknown_extra};
use crate::requirement::{MarkerEnvironment, Requirement, safe_key};

/// Access to the metadata files shipped with one distribution
pub trait MetadataProvider: fmt::Debug {
    /// Whether a metadata file with this name exists
    fn has_metadata(&self, name: &str) -> bool;

    /// Raw text of the named metadata file
    ///
    /// # Errors
    ///
    /// Any I/O failure while reading, including non UTF-8 content.
    fn get_metadata(&self, name: &str) -> io::Result<String>;
}

/// Metadata read from an `.egg-info` or `.dist-info` directory
#[derive(Debug, Clone)]
pub struct PathMetadata {
    root: PathBuf,
}

impl PathMetadata {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MetadataProvider for PathMetadata {
    fn has_metadata(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    fn get_metadata(&self, name: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(name))
    }
}

/// In-memory metadata, mostly for fixtures
///
/// A file registered with `None` exists but fails to read.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadata {
    files: BTreeMap<String, Option<String>>,
}

impl MemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(name.into(), Some(contents.into()));
        self
    }

    /// Register a file whose reads fail with an I/O error
    #[must_use]
    pub fn with_unreadable(mut self, name: impl Into<String>) -> Self {
        self.files.insert(name.into(), None);
        self
    }
}

impl MetadataProvider for MemoryMetadata {
    fn has_metadata(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn get_metadata(&self, name: &str) -> io::Result<String> {
        match self.files.get(name) {
            Some(Some(contents)) => Ok(contents.clone()),
            Some(None) => Err(io::Error::other(format!("unreadable metadata '{name}'"))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no metadata '{name}'"),
            )),
        }
    }
}

/// One installed distribution
///
/// Requirement lines are kept as written and parsed when the dependency
/// graph is walked, so a malformed line only fails the walk that reaches it.
#[derive(Debug, Clone)]
pub struct Distribution {
    name: String,
    key: String,
    version: String,
    requires: Vec<String>,
    extras: BTreeMap<String, Vec<String>>,
    metadata: Arc<dyn MetadataProvider>,
    location: Option<PathBuf>,
}

impl Distribution {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        metadata: impl MetadataProvider + 'static,
    ) -> Self {
        let name = name.into();
        Self {
            key: safe_key(&name),
            name,
            version: version.into(),
            requires: Vec::new(),
            extras: BTreeMap::new(),
            metadata: Arc::new(metadata),
            location: None,
        }
    }

    /// Add base requirement lines
    #[must_use]
    pub fn with_requires<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Add requirement lines that only apply when `extra` is requested
    #[must_use]
    pub fn with_extra<I, S>(mut self, extra: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras
            .entry(safe_key(extra))
            .or_default()
            .extend(lines.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Names of the declared extras
    pub fn extras(&self) -> impl Iterator<Item = &str> {
        self.extras.keys().map(String::as_str)
    }

    /// Requirements for the base install plus each requested extra
    ///
    /// Marker guarded lines are kept only when their marker holds in `env`.
    /// Base lines are evaluated with no extra and again for each requested
    /// extra, so `extra == "name"` conditions on them are honored. A marker
    /// that cannot be evaluated drops its line with a warning.
    ///
    /// # Errors
    ///
    /// Fails on an undeclared extra or a malformed requirement line.
    pub fn requires(&self, extras: &[String], env: &MarkerEnvironment) -> Result<Vec<Requirement>> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        self.collect_requires(&self.requires, None, env, &mut seen, &mut result)?;

        for extra in extras {
            let extra = safe_key(extra);
            let extra_lines = self
                .extras
                .get(&extra)
                .ok_or_else(|| unknown_extra(self.to_string(), extra.as_str()))?;
            self.collect_requires(&self.requires, Some(extra.as_str()), env, &mut seen, &mut result)?;
            self.collect_requires(extra_lines, Some(extra.as_str()), env, &mut seen, &mut result)?;
        }
        Ok(result)
    }

    fn collect_requires<'a>(
        &self,
        lines: &'a [String],
        extra: Option<&str>,
        env: &MarkerEnvironment,
        seen: &mut HashSet<&'a str>,
        result: &mut Vec<Requirement>,
    ) -> Result<()> {
        for line in lines {
            if seen.contains(line.as_str()) {
                continue;
            }
            let requirement = Requirement::parse(line)?;
            match requirement.applies_to(env, extra) {
                Ok(true) => {
                    seen.insert(line.as_str());
                    result.push(requirement);
                }
                Ok(false) => {
                    tracing::debug!(
                        "'{}' of '{}' does not apply to this environment",
                        requirement,
                        self
                    );
                }
                Err(e) => {
                    tracing::warn!("skipping '{}' of '{}': {}", requirement, self, e);
                }
            }
        }
        Ok(())
    }

    pub fn has_metadata(&self, name: &str) -> bool {
        self.metadata.has_metadata(name)
    }

    /// # Errors
    ///
    /// Propagates the metadata store's I/O error.
    pub fn get_metadata(&self, name: &str) -> io::Result<String> {
        self.metadata.get_metadata(name)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
