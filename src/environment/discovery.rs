//! Building a working set from `site-packages` style directories
//!
//! Each directory is scanned one level deep for metadata directories:
//!
//! ```text
//! site-packages/
//! ├── framework-2.4.egg-info/      requires.txt, PKG-INFO, package.json, ...
//! ├── widget-1.1.dist-info/        METADATA, package.json, ...
//! └── forms-1.6-py3.11.egg/
//!     └── EGG-INFO/                requires.txt, ...
//! ```
//!
//! Name and version come from `PKG-INFO` / `METADATA` headers when present,
//! otherwise from the directory name. Within one directory the newest
//! version of a project is registered first, which makes it the one the
//! working set keeps. Earlier directories take precedence over later ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::environment::{Distribution, PathMetadata, WorkingSet};
use crate::requirement::{Version, safe_key};

const EGG_INFO_SUFFIX: &str = ".egg-info";
const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_SUFFIX: &str = ".egg";

/// Scan every path in order and index what is found
///
/// Missing or unreadable directories are skipped with a warning.
pub fn discover(paths: &[PathBuf]) -> WorkingSet {
    let mut working_set = WorkingSet::new();
    for path in paths {
        working_set.extend(scan_path(path));
    }
    tracing::debug!("discovered {} distributions", working_set.len());
    working_set
}

/// Distributions found directly under `path`, newest version first per key
pub fn scan_path(path: &Path) -> Vec<Distribution> {
    if !path.is_dir() {
        tracing::warn!("skipping '{}': not a directory", path.display());
        return Vec::new();
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("error scanning '{}': {}", path.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(dist) = load_entry(entry.path()) {
            found.push(dist);
        }
    }

    found.sort_by(|a, b| {
        a.key().cmp(b.key()).then_with(|| {
            match (Version::parse(a.version()), Version::parse(b.version())) {
                (Ok(va), Ok(vb)) => vb.cmp(&va),
                _ => b.version().cmp(a.version()),
            }
        })
    });
    found
}

fn load_entry(path: &Path) -> Option<Distribution> {
    let file_name = path.file_name()?.to_str()?;
    if let Some(stem) = file_name.strip_suffix(EGG_INFO_SUFFIX) {
        load_egg_info(path, stem, path)
    } else if let Some(stem) = file_name.strip_suffix(DIST_INFO_SUFFIX) {
        load_dist_info(path, stem)
    } else if let Some(stem) = file_name.strip_suffix(EGG_SUFFIX) {
        let egg_info = path.join("EGG-INFO");
        egg_info
            .is_dir()
            .then(|| load_egg_info(&egg_info, stem, path))
            .flatten()
    } else {
        None
    }
}

/// Split `name-version[-pyX.Y]` into name and version
fn split_stem(stem: &str) -> Option<(String, String)> {
    let (name, rest) = stem.split_once('-')?;
    let version = rest.split('-').next().unwrap_or(rest);
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name.replace('_', "-"), version.replace('_', "-")))
}

fn load_egg_info(metadata_dir: &Path, stem: &str, location: &Path) -> Option<Distribution> {
    let headers = read_headers(&metadata_dir.join("PKG-INFO"));
    let (name, version) = identify(stem, &headers)?;
    let (requires, extras) = match std::fs::read_to_string(metadata_dir.join("requires.txt")) {
        Ok(text) => parse_requires_txt(&text),
        Err(_) => (Vec::new(), BTreeMap::new()),
    };

    let mut dist = Distribution::new(name, version, PathMetadata::new(metadata_dir))
        .with_requires(requires)
        .with_location(location);
    for (extra, lines) in extras {
        dist = dist.with_extra(&extra, lines);
    }
    Some(dist)
}

fn load_dist_info(metadata_dir: &Path, stem: &str) -> Option<Distribution> {
    let metadata_path = metadata_dir.join("METADATA");
    let headers = read_headers(&metadata_path);
    let (name, version) = identify(stem, &headers)?;
    let (requires, extras) = match std::fs::read_to_string(&metadata_path) {
        Ok(text) => parse_requires_dist(&text),
        Err(_) => (Vec::new(), BTreeMap::new()),
    };

    let mut dist = Distribution::new(name, version, PathMetadata::new(metadata_dir))
        .with_requires(requires)
        .with_location(metadata_dir.parent().unwrap_or(metadata_dir));
    for (extra, lines) in extras {
        dist = dist.with_extra(&extra, lines);
    }
    Some(dist)
}

fn identify(stem: &str, headers: &BTreeMap<String, String>) -> Option<(String, String)> {
    let from_stem = split_stem(stem);
    let name = headers
        .get("name")
        .cloned()
        .or_else(|| from_stem.as_ref().map(|(name, _)| name.clone()))?;
    let version = headers
        .get("version")
        .cloned()
        .or_else(|| from_stem.map(|(_, version)| version))?;
    Some((name, version))
}

/// RFC 822 style headers up to the first blank line, keys lowercased
fn read_headers(path: &Path) -> BTreeMap<String, String> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    let mut headers = BTreeMap::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers
                .entry(key.trim().to_ascii_lowercase())
                .or_insert_with(|| value.trim().to_string());
        }
    }
    headers
}

type RequirementLines = (Vec<String>, BTreeMap<String, Vec<String>>);

/// Parse an egg-info `requires.txt`
///
/// Lines before any `[section]` are base requirements; `[extra]` sections
/// belong to that extra. A section qualified by a marker (`[:marker]` or
/// `[extra:marker]`) attaches that marker to each of its lines, to be
/// evaluated by [`Distribution::requires`].
pub fn parse_requires_txt(text: &str) -> RequirementLines {
    let mut base = Vec::new();
    let mut extras: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut extra: Option<String> = None;
    let mut marker: Option<String> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let (name, condition) = match header.split_once(':') {
                Some((name, condition)) => (name.trim(), Some(condition.trim())),
                None => (header.trim(), None),
            };
            extra = (!name.is_empty()).then(|| safe_key(name));
            marker = condition.filter(|c| !c.is_empty()).map(str::to_string);
            if let Some(extra) = &extra {
                extras.entry(extra.clone()).or_default();
            }
            continue;
        }

        let line = match &marker {
            Some(condition) => with_marker(line, condition),
            None => line.to_string(),
        };
        match &extra {
            Some(extra) => extras.entry(extra.clone()).or_default().push(line),
            None => base.push(line),
        }
    }

    (base, extras)
}

/// Attach a section marker to a requirement line, keeping any of its own
fn with_marker(line: &str, condition: &str) -> String {
    match line.split_once(';') {
        Some((requirement, own)) if !own.trim().is_empty() => {
            format!("{} ; ({}) and ({})", requirement.trim(), own.trim(), condition)
        }
        Some((requirement, _)) => format!("{} ; {}", requirement.trim(), condition),
        None => format!("{line} ; {condition}"),
    }
}

/// Collect `Requires-Dist` headers from a dist-info `METADATA`
///
/// A bare `extra == "name"` marker files the requirement under that extra.
/// Other markers are kept on the line and left to
/// [`Distribution::requires`] to evaluate.
pub fn parse_requires_dist(text: &str) -> RequirementLines {
    let mut base = Vec::new();
    let mut extras: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        let Some(value) = line.strip_prefix("Requires-Dist:") else {
            if let Some(extra) = line.strip_prefix("Provides-Extra:") {
                extras.entry(safe_key(extra.trim())).or_default();
            }
            continue;
        };
        let value = value.trim();
        match value.split_once(';') {
            Some((requirement, marker)) => match extra_marker(marker) {
                Some(extra) => extras
                    .entry(extra)
                    .or_default()
                    .push(requirement.trim().to_string()),
                None => base.push(value.to_string()),
            },
            None => base.push(value.to_string()),
        }
    }

    (base, extras)
}

/// The extra named by a marker of exactly the form `extra == "name"`
fn extra_marker(marker: &str) -> Option<String> {
    let rest = marker.trim().strip_prefix("extra")?.trim_start();
    let quoted = rest.strip_prefix("==")?.trim();
    let name = quoted
        .strip_prefix('"')
        .and_then(|q| q.strip_suffix('"'))
        .or_else(|| quoted.strip_prefix('\'').and_then(|q| q.strip_suffix('\'')))?;
    Some(safe_key(name))
}
