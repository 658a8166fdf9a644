//! Python requirement strings
//!
//! A requirement names a distribution, optionally narrowed by extras and
//! version specifiers:
//!
//! ```text
//! framework
//! framework>=2.1
//! calmjs[dev]
//! uilib>=1.0,<2 ; python_version >= "3"
//! ```
//!
//! Names compare by key: lowercased, with every run of characters other than
//! ASCII alphanumerics and `.` collapsed into `-`, so `Jquery_UI` and
//! `jquery-ui` are the same distribution.

pub mod marker;
pub mod names;
pub mod version;

use std::fmt;
use std::str::FromStr;

pub use marker::{Marker, MarkerEnvironment};
pub use names::{convert_package_names, split_package_names};
pub use version::{Specifier, SpecifierSet, Version};

use crate::error::{CalmjsError, Result, invalid_requirement};

/// Normalize a project name into its lookup key
pub fn safe_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            key.push(c.to_ascii_lowercase());
            in_run = false;
        } else if !in_run {
            key.push('-');
            in_run = true;
        }
    }
    key
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// A parsed requirement
#[derive(Debug, Clone)]
pub struct Requirement {
    /// Project name as written
    pub name: String,
    /// Normalized lookup key
    pub key: String,
    /// Requested extras, normalized
    pub extras: Vec<String>,
    pub specifiers: SpecifierSet,
    /// Environment marker text after `;`
    pub marker: Option<String>,
}

impl Requirement {
    /// Parse a requirement string
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidRequirement`] if the text does not start
    /// with a project name or carries malformed extras or specifiers.
    pub fn parse(input: &str) -> Result<Self> {
        let (body, marker) = match input.split_once(';') {
            Some((body, marker)) => (body, Some(marker.trim()).filter(|m| !m.is_empty())),
            None => (input, None),
        };
        let body = body.trim();

        let name_len = body.chars().take_while(|c| is_name_char(*c)).count();
        let name = &body[..name_len];
        if !name.starts_with(|c: char| c.is_ascii_alphanumeric())
            || !name.ends_with(|c: char| c.is_ascii_alphanumeric())
        {
            return Err(invalid_requirement(input, "expected package name"));
        }

        let mut rest = body[name_len..].trim_start();
        let mut extras = Vec::new();
        if let Some(inner) = rest.strip_prefix('[') {
            let close = inner
                .find(']')
                .ok_or_else(|| invalid_requirement(input, "unclosed extras"))?;
            for extra in inner[..close].split(',').map(str::trim) {
                if extra.is_empty() {
                    continue;
                }
                if !extra.chars().all(is_name_char) {
                    return Err(invalid_requirement(input, format!("invalid extra '{extra}'")));
                }
                let extra = safe_key(extra);
                if !extras.contains(&extra) {
                    extras.push(extra);
                }
            }
            rest = inner[close + 1..].trim();
        }

        let rest = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .unwrap_or(rest);
        let specifiers = SpecifierSet::parse(rest)
            .map_err(|e| invalid_requirement(input, e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            key: safe_key(name),
            extras,
            specifiers,
            marker: marker.map(str::to_string),
        })
    }

    /// Whether the given version string satisfies the specifiers
    ///
    /// An unparseable version only satisfies an unconstrained requirement.
    pub fn contains(&self, version: &str) -> bool {
        if self.specifiers.is_empty() {
            return true;
        }
        Version::parse(version).is_ok_and(|v| self.specifiers.contains(&v))
    }

    /// Whether the marker admits this requirement in `env`
    ///
    /// A requirement without a marker always applies. `extra` names the
    /// extra being resolved, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidMarker`] when the marker cannot be
    /// parsed or evaluated.
    pub fn applies_to(&self, env: &MarkerEnvironment, extra: Option<&str>) -> Result<bool> {
        match &self.marker {
            Some(marker) => Marker::parse(marker)?.evaluate(env, extra),
            None => Ok(true),
        }
    }

    /// Identity used to skip requirements already walked
    pub fn identity(&self) -> String {
        let mut extras = self.extras.clone();
        extras.sort();
        format!("{}[{}]{}", self.key, extras.join(","), self.specifiers)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        write!(f, "{}", self.specifiers)?;
        if let Some(marker) = &self.marker {
            write!(f, "; {marker}")?;
        }
        Ok(())
    }
}

impl FromStr for Requirement {
    type Err = CalmjsError;

    fn from_str(s: &str) -> Result<Self> {
        Requirement::parse(s)
    }
}
