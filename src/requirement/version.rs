//! Release versions and version specifiers
//!
//! Versions follow the public part of PEP 440: an optional epoch, a dotted
//! release, and optional pre, post and dev segments. A `+local` label is kept
//! for display and `===` matching but ignored when ordering.
//!
//! ```text
//! 1.0.dev0 < 1.0a1 < 1.0b2 < 1.0rc1 < 1.0 == 1.0.0 < 1.0.post1 < 1.1
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CalmjsError, Result, invalid_version};

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    Candidate,
}

impl PreRelease {
    fn as_str(self) -> &'static str {
        match self {
            PreRelease::Alpha => "a",
            PreRelease::Beta => "b",
            PreRelease::Candidate => "rc",
        }
    }
}

/// Ordering helper placing missing segments before or after present ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot<T> {
    Low,
    At(T),
    High,
}

/// A parsed release version
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<(PreRelease, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    pub local: Option<String>,
    raw: String,
}

impl Version {
    /// Parse a version string
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidVersion`] when the text is not a version.
    pub fn parse(input: &str) -> Result<Self> {
        Cursor::new(input).version()
    }

    /// The original text this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Release segments with trailing zeros stripped, so `1.0` equals `1`
    fn trimmed_release(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|segment| *segment != 0)
            .map_or(0, |idx| idx + 1);
        &self.release[..end]
    }

    fn pre_slot(&self) -> Slot<(PreRelease, u64)> {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => Slot::Low,
            (None, _, _) => Slot::High,
            (Some(pre), _, _) => Slot::At(pre),
        }
    }

    fn post_slot(&self) -> Slot<u64> {
        self.post.map_or(Slot::Low, Slot::At)
    }

    fn dev_slot(&self) -> Slot<u64> {
        self.dev.map_or(Slot::High, Slot::At)
    }

    /// Release segment at `idx`, padding with zero
    fn segment(&self, idx: usize) -> u64 {
        self.release.get(idx).copied().unwrap_or(0)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_slot().cmp(&other.pre_slot()))
            .then_with(|| self.post_slot().cmp(&other.post_slot()))
            .then_with(|| self.dev_slot().cmp(&other.dev_slot()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((phase, n)) = self.pre {
            write!(f, "{}{n}", phase.as_str())?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{n}")?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{n}")?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{local}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = CalmjsError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Hand-rolled scanner over a lowercased version string
struct Cursor<'a> {
    raw: &'a str,
    text: String,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            text: raw.trim().to_ascii_lowercase(),
            pos: 0,
        }
    }

    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn fail(&self) -> CalmjsError {
        invalid_version(self.raw)
    }

    fn number(&mut self) -> Option<u64> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value = self.rest()[..digits].parse().ok()?;
        self.pos += digits;
        Some(value)
    }

    fn separator(&mut self) {
        if self.rest().starts_with(['.', '-', '_']) {
            self.pos += 1;
        }
    }

    /// Consume the first matching word, optionally preceded by a separator
    fn word(&mut self, words: &[&str]) -> Option<usize> {
        let start = self.pos;
        self.separator();
        for (idx, word) in words.iter().enumerate() {
            if self.rest().starts_with(word) {
                self.pos += word.len();
                return Some(idx);
            }
        }
        self.pos = start;
        None
    }

    fn trailing_number(&mut self) -> u64 {
        let start = self.pos;
        self.separator();
        match self.number() {
            Some(n) => n,
            None => {
                self.pos = start;
                0
            }
        }
    }

    fn version(mut self) -> Result<Version> {
        if self.rest().starts_with('v') {
            self.pos += 1;
        }

        let mut epoch = 0;
        let mut release = vec![self.number().ok_or_else(|| self.fail())?];
        if self.rest().starts_with('!') {
            self.pos += 1;
            epoch = release[0];
            release = vec![self.number().ok_or_else(|| self.fail())?];
        }
        while self.rest().starts_with('.') {
            self.pos += 1;
            match self.number() {
                Some(n) => release.push(n),
                None => {
                    self.pos -= 1;
                    break;
                }
            }
        }

        let pre = self
            .word(&["alpha", "a", "beta", "b", "rc", "c", "preview", "pre"])
            .map(|idx| {
                let phase = match idx {
                    0 | 1 => PreRelease::Alpha,
                    2 | 3 => PreRelease::Beta,
                    _ => PreRelease::Candidate,
                };
                (phase, self.trailing_number())
            });

        let implicit_post = self.rest().starts_with('-')
            && self.rest()[1..].starts_with(|c: char| c.is_ascii_digit());
        let post = if implicit_post {
            self.pos += 1;
            self.number()
        } else {
            self.word(&["post", "rev", "r"]).map(|_| self.trailing_number())
        };

        let dev = self.word(&["dev"]).map(|_| self.trailing_number());

        let local = if self.rest().starts_with('+') {
            let label = self.rest()[1..].to_string();
            if label.is_empty()
                || !label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            {
                return Err(self.fail());
            }
            self.pos = self.text.len();
            Some(label)
        } else {
            None
        };

        if !self.rest().is_empty() {
            return Err(self.fail());
        }

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
            raw: self.raw.trim().to_string(),
        })
    }
}

/// Comparison operator of a specifier clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Compatible,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Arbitrary,
}

impl Operator {
    /// Operators ordered so that longer tokens are tried first
    const TOKENS: [(&'static str, Operator); 8] = [
        ("===", Operator::Arbitrary),
        ("~=", Operator::Compatible),
        ("==", Operator::Equal),
        ("!=", Operator::NotEqual),
        ("<=", Operator::LessEqual),
        (">=", Operator::GreaterEqual),
        ("<", Operator::Less),
        (">", Operator::Greater),
    ];

    fn as_str(self) -> &'static str {
        Self::TOKENS
            .iter()
            .find(|(_, op)| *op == self)
            .map_or("", |(token, _)| *token)
    }
}

/// A single clause such as `>=2.1` or `==1.*`
#[derive(Debug, Clone)]
pub struct Specifier {
    pub operator: Operator,
    pub version: String,
    parsed: Option<Version>,
    wildcard: bool,
}

impl Specifier {
    /// Parse one specifier clause
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidVersion`] for a missing operator or an
    /// unparseable version.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        let (token, operator) = Operator::TOKENS
            .iter()
            .find(|(token, _)| text.starts_with(token))
            .ok_or_else(|| invalid_version(text))?;
        let version = text[token.len()..].trim().to_string();
        if version.is_empty() {
            return Err(invalid_version(text));
        }

        if *operator == Operator::Arbitrary {
            return Ok(Self {
                operator: *operator,
                version,
                parsed: None,
                wildcard: false,
            });
        }

        let wildcard = version.ends_with(".*");
        if wildcard && !matches!(operator, Operator::Equal | Operator::NotEqual) {
            return Err(invalid_version(text));
        }
        let parsed = Version::parse(version.trim_end_matches(".*"))?;
        if *operator == Operator::Compatible && parsed.release.len() < 2 {
            return Err(invalid_version(text));
        }

        Ok(Self {
            operator: *operator,
            version,
            parsed: Some(parsed),
            wildcard,
        })
    }

    /// Whether `candidate` satisfies this clause
    pub fn contains(&self, candidate: &Version) -> bool {
        let Some(target) = &self.parsed else {
            return candidate.as_str().eq_ignore_ascii_case(&self.version);
        };
        match self.operator {
            Operator::Equal if self.wildcard => prefix_matches(candidate, target),
            Operator::NotEqual if self.wildcard => !prefix_matches(candidate, target),
            Operator::Equal => candidate == target,
            Operator::NotEqual => candidate != target,
            Operator::LessEqual => candidate <= target,
            Operator::GreaterEqual => candidate >= target,
            Operator::Less => candidate < target,
            Operator::Greater => candidate > target,
            Operator::Compatible => {
                let prefix = target.release.len() - 1;
                candidate >= target
                    && candidate.epoch == target.epoch
                    && (0..prefix).all(|idx| candidate.segment(idx) == target.segment(idx))
            }
            Operator::Arbitrary => false,
        }
    }
}

/// `==1.2.*` style prefix comparison on the release segments
fn prefix_matches(candidate: &Version, target: &Version) -> bool {
    candidate.epoch == target.epoch
        && (0..target.release.len()).all(|idx| candidate.segment(idx) == target.segment(idx))
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.as_str(), self.version)
    }
}

/// Comma separated specifier clauses, all of which must hold
#[derive(Debug, Clone, Default)]
pub struct SpecifierSet {
    pub clauses: Vec<Specifier>,
}

impl SpecifierSet {
    /// Parse `>=1.0,<2`; an empty string yields an empty set
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidVersion`] for any bad clause.
    pub fn parse(input: &str) -> Result<Self> {
        let clauses = input
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Specifier::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn contains(&self, candidate: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.contains(candidate))
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.clauses.iter().map(ToString::to_string).collect();
        write!(f, "{}", clauses.join(","))
    }
}
