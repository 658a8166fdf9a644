//! Environment markers
//!
//! The text after `;` in a requirement limits it to some environments:
//!
//! ```text
//! futures ; python_version < "3"
//! pywin32 ; sys_platform == "win32" and platform_machine == "AMD64"
//! mock ; extra == "dev"
//! ```
//!
//! Markers are evaluated against a [`MarkerEnvironment`] describing the
//! interpreter the packages are installed for. A comparison uses version
//! ordering when the left side parses as a version and the right side forms
//! a valid specifier with the operator; otherwise the two sides compare as
//! plain strings.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Specifier, Version, safe_key};
use crate::error::{CalmjsError, Result, invalid_marker};

/// Values of the marker variables for the target interpreter
///
/// Every field can be overridden from the `markers` block of the settings
/// file; the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerEnvironment {
    pub python_version: String,
    pub python_full_version: String,
    pub implementation_name: String,
    pub implementation_version: String,
    pub platform_python_implementation: String,
    pub os_name: String,
    pub sys_platform: String,
    pub platform_system: String,
    pub platform_machine: String,
    pub platform_release: String,
    pub platform_version: String,
}

impl Default for MarkerEnvironment {
    /// CPython 3.12 on the host platform
    fn default() -> Self {
        let (os_name, sys_platform, platform_system) = match std::env::consts::OS {
            "windows" => ("nt", "win32", "Windows"),
            "macos" => ("posix", "darwin", "Darwin"),
            "linux" => ("posix", "linux", "Linux"),
            other => ("posix", other, other),
        };
        Self {
            python_version: "3.12".to_string(),
            python_full_version: "3.12.0".to_string(),
            implementation_name: "cpython".to_string(),
            implementation_version: "3.12.0".to_string(),
            platform_python_implementation: "CPython".to_string(),
            os_name: os_name.to_string(),
            sys_platform: sys_platform.to_string(),
            platform_system: platform_system.to_string(),
            platform_machine: std::env::consts::ARCH.to_string(),
            platform_release: String::new(),
            platform_version: String::new(),
        }
    }
}

impl MarkerEnvironment {
    /// Value of a marker variable, `None` for an unknown name
    ///
    /// The dotted spellings of older metadata (`sys.platform`, ...) are
    /// accepted as well.
    pub fn get(&self, variable: &str) -> Option<&str> {
        let value = match variable {
            "python_version" => &self.python_version,
            "python_full_version" => &self.python_full_version,
            "implementation_name" => &self.implementation_name,
            "implementation_version" => &self.implementation_version,
            "platform_python_implementation"
            | "platform.python_implementation"
            | "python_implementation" => &self.platform_python_implementation,
            "os_name" | "os.name" => &self.os_name,
            "sys_platform" | "sys.platform" => &self.sys_platform,
            "platform_system" => &self.platform_system,
            "platform_machine" | "platform.machine" => &self.platform_machine,
            "platform_release" => &self.platform_release,
            "platform_version" | "platform.version" => &self.platform_version,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Comparison operator of a marker expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerOp {
    Compatible,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Arbitrary,
    In,
    NotIn,
}

impl MarkerOp {
    /// Symbolic operators, longer tokens first
    const TOKENS: [(&'static str, MarkerOp); 8] = [
        ("===", MarkerOp::Arbitrary),
        ("~=", MarkerOp::Compatible),
        ("==", MarkerOp::Equal),
        ("!=", MarkerOp::NotEqual),
        ("<=", MarkerOp::LessEqual),
        (">=", MarkerOp::GreaterEqual),
        ("<", MarkerOp::Less),
        (">", MarkerOp::Greater),
    ];

    fn as_str(self) -> &'static str {
        match self {
            MarkerOp::In => "in",
            MarkerOp::NotIn => "not in",
            op => Self::TOKENS
                .iter()
                .find(|(_, candidate)| *candidate == op)
                .map_or("", |(token, _)| *token),
        }
    }
}

impl fmt::Display for MarkerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerValue {
    Variable(String),
    Literal(String),
}

impl MarkerValue {
    fn is_extra(&self) -> bool {
        matches!(self, MarkerValue::Variable(name) if name == "extra")
    }

    fn resolve(&self, env: &MarkerEnvironment, extra: Option<&str>) -> Result<String> {
        match self {
            MarkerValue::Literal(value) => Ok(value.clone()),
            MarkerValue::Variable(name) if name == "extra" => {
                Ok(extra.map(safe_key).unwrap_or_default())
            }
            MarkerValue::Variable(name) => env
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| invalid_marker(name.as_str(), format!("unknown variable '{name}'"))),
        }
    }
}

impl fmt::Display for MarkerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerValue::Variable(name) => f.write_str(name),
            MarkerValue::Literal(value) if value.contains('"') => write!(f, "'{value}'"),
            MarkerValue::Literal(value) => write!(f, "\"{value}\""),
        }
    }
}

/// A parsed marker expression
///
/// `and` binds tighter than `or`; parentheses group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Compare {
        left: MarkerValue,
        op: MarkerOp,
        right: MarkerValue,
    },
    And(Box<Marker>, Box<Marker>),
    Or(Box<Marker>, Box<Marker>),
}

impl Marker {
    /// Parse marker text
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidMarker`] for text that is not a marker
    /// expression.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser {
            input,
            tokens: tokenize(input)?,
            pos: 0,
        };
        let marker = parser.parse_or()?;
        if parser.pos < parser.tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(marker)
    }

    /// Evaluate against `env`, with `extra` naming the extra being resolved
    ///
    /// # Errors
    ///
    /// Returns [`CalmjsError::InvalidMarker`] for an unknown variable or a
    /// comparison with no meaning, such as `~=` between non-versions.
    pub fn evaluate(&self, env: &MarkerEnvironment, extra: Option<&str>) -> Result<bool> {
        match self {
            Marker::And(lhs, rhs) => Ok(lhs.evaluate(env, extra)? && rhs.evaluate(env, extra)?),
            Marker::Or(lhs, rhs) => Ok(lhs.evaluate(env, extra)? || rhs.evaluate(env, extra)?),
            Marker::Compare { left, op, right } => {
                let mut lhs = left.resolve(env, extra)?;
                let mut rhs = right.resolve(env, extra)?;
                if left.is_extra() || right.is_extra() {
                    lhs = safe_key(&lhs);
                    rhs = safe_key(&rhs);
                }
                compare(*op, &lhs, &rhs).ok_or_else(|| {
                    invalid_marker(self.to_string(), format!("'{op}' needs versions on both sides"))
                })
            }
        }
    }
}

fn compare(op: MarkerOp, lhs: &str, rhs: &str) -> Option<bool> {
    match op {
        MarkerOp::In => Some(rhs.contains(lhs)),
        MarkerOp::NotIn => Some(!rhs.contains(lhs)),
        MarkerOp::Arbitrary => Some(lhs.eq_ignore_ascii_case(rhs)),
        _ => {
            if let (Ok(version), Ok(specifier)) =
                (Version::parse(lhs), Specifier::parse(&format!("{op}{rhs}")))
            {
                return Some(specifier.contains(&version));
            }
            let ordering = lhs.cmp(rhs);
            match op {
                MarkerOp::Equal => Some(ordering == Ordering::Equal),
                MarkerOp::NotEqual => Some(ordering != Ordering::Equal),
                MarkerOp::LessEqual => Some(ordering != Ordering::Greater),
                MarkerOp::GreaterEqual => Some(ordering != Ordering::Less),
                MarkerOp::Less => Some(ordering == Ordering::Less),
                MarkerOp::Greater => Some(ordering == Ordering::Greater),
                _ => None,
            }
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Compare { left, op, right } => write!(f, "{left} {op} {right}"),
            Marker::Or(lhs, rhs) => write!(f, "{lhs} or {rhs}"),
            Marker::And(lhs, rhs) => {
                write_operand(f, lhs)?;
                f.write_str(" and ")?;
                write_operand(f, rhs)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, marker: &Marker) -> fmt::Result {
    if matches!(marker, Marker::Or(..)) {
        write!(f, "({marker})")
    } else {
        write!(f, "{marker}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Literal(String),
    Word(String),
    Op(MarkerOp),
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' | '\'' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, quote)) if quote == c => break,
                        Some((_, ch)) => value.push(ch),
                        None => return Err(invalid_marker(input, "unterminated string")),
                    }
                }
                tokens.push(Token::Literal(value));
            }
            c if c.is_ascii_alphanumeric() || c == '_' => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.') {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            _ => {
                let rest = &input[start..];
                let (token, op) = MarkerOp::TOKENS
                    .iter()
                    .find(|(token, _)| rest.starts_with(*token))
                    .ok_or_else(|| invalid_marker(input, format!("unexpected character '{c}'")))?;
                for _ in 0..token.len() {
                    chars.next();
                }
                tokens.push(Token::Op(*op));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> CalmjsError {
        invalid_marker(self.input, reason)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn at_word(&self, word: &str) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token::Word(w)) if w == word)
    }

    fn parse_or(&mut self) -> Result<Marker> {
        let mut marker = self.parse_and()?;
        while self.at_word("or") {
            self.pos += 1;
            let rhs = self.parse_and()?;
            marker = Marker::Or(Box::new(marker), Box::new(rhs));
        }
        Ok(marker)
    }

    fn parse_and(&mut self) -> Result<Marker> {
        let mut marker = self.parse_atom()?;
        while self.at_word("and") {
            self.pos += 1;
            let rhs = self.parse_atom()?;
            marker = Marker::And(Box::new(marker), Box::new(rhs));
        }
        Ok(marker)
    }

    fn parse_atom(&mut self) -> Result<Marker> {
        if self.tokens.get(self.pos) == Some(&Token::Open) {
            self.pos += 1;
            let marker = self.parse_or()?;
            if self.next() != Some(Token::Close) {
                return Err(self.error("expected ')'"));
            }
            return Ok(marker);
        }
        let left = self.parse_value()?;
        let op = self.parse_op()?;
        let right = self.parse_value()?;
        Ok(Marker::Compare { left, op, right })
    }

    fn parse_value(&mut self) -> Result<MarkerValue> {
        match self.next() {
            Some(Token::Literal(value)) => Ok(MarkerValue::Literal(value)),
            Some(Token::Word(word)) if !matches!(word.as_str(), "and" | "or" | "in" | "not") => {
                Ok(MarkerValue::Variable(word))
            }
            _ => Err(self.error("expected a variable or a quoted string")),
        }
    }

    fn parse_op(&mut self) -> Result<MarkerOp> {
        match self.next() {
            Some(Token::Op(op)) => Ok(op),
            Some(Token::Word(word)) if word == "in" => Ok(MarkerOp::In),
            Some(Token::Word(word)) if word == "not" => match self.next() {
                Some(Token::Word(word)) if word == "in" => Ok(MarkerOp::NotIn),
                _ => Err(self.error("expected 'in' after 'not'")),
            },
            _ => Err(self.error("expected a comparison operator")),
        }
    }
}
