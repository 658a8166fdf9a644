//! calmjs - JavaScript dependencies of Python packages
//!
//! Installed Python packages can carry npm style dependency documents in
//! their metadata. This crate walks the Python dependency graph of a set of
//! packages and layers those documents, ancestors first, into one result.

pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod flatten;
pub mod metadata;
pub mod registry;
pub mod requirement;

#[cfg(test)]
mod test_fixtures;
