//! Dependency closure walking over a working set
//!
//! ## Walk order
//!
//! The walk keeps a FIFO queue of requirements, seeded with the roots in
//! reverse order. Each dequeued requirement picks its distribution (once per
//! key), and that distribution's requirements are appended in reverse
//! declaration order. Distributions are recorded the first time they are
//! reached, which puts the roots first. [`find_packages_requirements_dists`]
//! reverses that list so ancestors come first:
//!
//! ```text
//! site -> framework, widget, forms, service
//! framework -> security
//!
//! walk:     site, service, forms, widget, framework, security
//! reversed: security, framework, widget, forms, service, site
//! ```
//!
//! Later entries override earlier ones when flattening, which is what makes
//! this order load-bearing.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::environment::{Distribution, WorkingSet};
use crate::error::{Result, distribution_not_found, version_conflict};
use crate::requirement::Requirement;

impl WorkingSet {
    /// Walk the dependency graph of `requirements` in activation order
    ///
    /// # Errors
    ///
    /// Fails when any reachable requirement is missing from the index, is not
    /// satisfied by the registered version, names an unknown extra, or has a
    /// malformed requirement line. Requirements whose marker does not hold
    /// are not followed.
    pub fn resolve(&self, requirements: &[Requirement]) -> Result<Vec<&Distribution>> {
        let mut queue: VecDeque<(Requirement, Option<&Distribution>)> = requirements
            .iter()
            .rev()
            .map(|requirement| (requirement.clone(), None))
            .collect();
        let mut processed = HashSet::new();
        let mut best: HashMap<String, &Distribution> = HashMap::new();
        let mut to_activate = Vec::new();

        while let Some((requirement, required_by)) = queue.pop_front() {
            if !processed.insert(requirement.identity()) {
                continue;
            }

            let dist = if let Some(dist) = best.get(&requirement.key) {
                *dist
            } else {
                let dist = self.get(&requirement.key).ok_or_else(|| {
                    distribution_not_found(
                        requirement.to_string(),
                        required_by.map_or_else(|| "the application".to_string(), ToString::to_string),
                    )
                })?;
                best.insert(requirement.key.clone(), dist);
                to_activate.push(dist);
                dist
            };

            if !requirement.contains(dist.version()) {
                return Err(version_conflict(dist.to_string(), requirement.to_string()));
            }

            let dependencies = dist.requires(&requirement.extras, &self.markers)?;
            for dependency in dependencies.into_iter().rev() {
                queue.push_back((dependency, Some(dist)));
            }
        }

        Ok(to_activate)
    }
}

/// Locate a distribution by name or requirement string
///
/// # Errors
///
/// Fails on an unparseable requirement or a version conflict; a project that
/// is simply not installed is `Ok(None)`.
pub fn find_pkg_dist<'a>(working_set: &'a WorkingSet, name: &str) -> Result<Option<&'a Distribution>> {
    let requirement = Requirement::parse(name)?;
    working_set.find(&requirement)
}

/// Direct lookups of each name, with no dependency walk
///
/// # Errors
///
/// See [`find_pkg_dist`].
pub fn pkg_names_to_dists<'a, S: AsRef<str>>(
    working_set: &'a WorkingSet,
    names: &[S],
) -> Result<Vec<Option<&'a Distribution>>> {
    names
        .iter()
        .map(|name| find_pkg_dist(working_set, name.as_ref()))
        .collect()
}

/// The whole dependency closure of `names`, ancestors first
///
/// Roots that are not installed are dropped silently. A dependency of an
/// installed root that cannot be found is a hard failure.
///
/// # Errors
///
/// Fails on an unparseable name, a version conflict, or a broken graph.
pub fn find_packages_requirements_dists<'a, S: AsRef<str>>(
    working_set: &'a WorkingSet,
    names: &[S],
) -> Result<Vec<&'a Distribution>> {
    let mut roots = Vec::with_capacity(names.len());
    for name in names {
        let requirement = Requirement::parse(name.as_ref())?;
        if working_set.find(&requirement)?.is_some() {
            roots.push(requirement);
        } else {
            tracing::debug!("'{}' is not installed; dropping from roots", requirement);
        }
    }

    let mut dists = working_set.resolve(&roots)?;
    dists.reverse();
    Ok(dists)
}
