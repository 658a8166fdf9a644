//! Command implementations for calmjs CLI

pub mod completions;
pub mod extras;
pub mod flatten;
pub mod helpers;
pub mod modules;
pub mod read;
pub mod resolve;
pub mod validate;
pub mod version;
