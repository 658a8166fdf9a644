//! The environment index of installed distributions
//!
//! A [`WorkingSet`] holds at most one distribution per project key. The
//! first distribution registered for a key wins; later ones are ignored, so
//! a closure walk can never see two versions of the same project.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use calmjs::environment::discovery;
//!
//! let working_set = discovery::discover(&["/usr/lib/python3/site-packages".into()]);
//! let order = calmjs::environment::find_packages_requirements_dists(&working_set, &["site"])?;
//! # Ok::<(), calmjs::error::CalmjsError>(())
//! ```

pub mod discovery;
pub mod distribution;
pub mod resolve;

use std::collections::HashMap;

pub use distribution::{Distribution, MemoryMetadata, MetadataProvider, PathMetadata};
pub use resolve::{find_packages_requirements_dists, find_pkg_dist, pkg_names_to_dists};

use crate::error::{Result, version_conflict};
use crate::requirement::{MarkerEnvironment, Requirement, safe_key};

/// Index of installed distributions keyed by normalized project name
///
/// The marker environment decides which marker guarded requirements a
/// closure walk follows.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    entries: Vec<Distribution>,
    by_key: HashMap<String, usize>,
    markers: MarkerEnvironment,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_markers(mut self, markers: MarkerEnvironment) -> Self {
        self.markers = markers;
        self
    }

    pub fn markers(&self) -> &MarkerEnvironment {
        &self.markers
    }

    /// Register a distribution
    ///
    /// Returns `false` and leaves the index untouched when a distribution
    /// with the same key is already present.
    pub fn add(&mut self, dist: Distribution) -> bool {
        if let Some(existing) = self.by_key.get(dist.key()) {
            tracing::debug!(
                "ignoring '{}'; '{}' is already registered",
                dist,
                self.entries[*existing]
            );
            return false;
        }
        self.by_key.insert(dist.key().to_string(), self.entries.len());
        self.entries.push(dist);
        true
    }

    /// Look up a distribution by project name or key
    pub fn get(&self, name: &str) -> Option<&Distribution> {
        self.by_key
            .get(&safe_key(name))
            .map(|idx| &self.entries[*idx])
    }

    /// Find the distribution satisfying `requirement`
    ///
    /// A project absent from the index is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CalmjsError::VersionConflict`] when the
    /// registered version does not satisfy the requirement.
    pub fn find(&self, requirement: &Requirement) -> Result<Option<&Distribution>> {
        let Some(dist) = self.get(&requirement.key) else {
            return Ok(None);
        };
        if !requirement.contains(dist.version()) {
            return Err(version_conflict(dist.to_string(), requirement.to_string()));
        }
        Ok(Some(dist))
    }

    /// Distributions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Distribution> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Distribution> for WorkingSet {
    fn from_iter<I: IntoIterator<Item = Distribution>>(iter: I) -> Self {
        let mut working_set = WorkingSet::new();
        for dist in iter {
            working_set.add(dist);
        }
        working_set
    }
}

impl Extend<Distribution> for WorkingSet {
    fn extend<I: IntoIterator<Item = Distribution>>(&mut self, iter: I) {
        for dist in iter {
            self.add(dist);
        }
    }
}
