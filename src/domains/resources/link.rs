//! Link-format (RFC 6690) descriptions of resources.
//!
//! A link-format document is a comma-separated list of links, each written as
//! `<target>` followed by `;name=value` parameters:
//!
//! ```text
//! </pulseoximeter/heartrate>;ct=41;rt="Heartrate Resource";if="sensor"
//! ```
//!
//! Token values (`ct=41`) are written bare; free-text values (`rt`, `if`,
//! `title`) are quoted.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A numeric content-format code from the CoAP Content-Formats registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentFormat(pub u16);

impl ContentFormat {
    pub const TEXT_PLAIN: Self = Self(0);
    pub const LINK_FORMAT: Self = Self(40);
    pub const XML: Self = Self(41);

    /// The numeric code.
    pub const fn code(self) -> u16 {
        self.0
    }

    /// The MIME type registered for this code, if known.
    pub fn media_type(self) -> Option<&'static str> {
        match self {
            Self::TEXT_PLAIN => Some("text/plain; charset=utf-8"),
            Self::LINK_FORMAT => Some("application/link-format"),
            Self::XML => Some("application/xml"),
            _ => None,
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while parsing a link-format document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkFormatError {
    /// A link does not start with `<`.
    #[error("Link does not start with a target: {0}")]
    MissingTarget(String),

    /// A `<` has no matching `>`.
    #[error("Unterminated link target: {0}")]
    UnterminatedTarget(String),

    /// A quoted value has no closing quote.
    #[error("Unterminated quoted value in: {0}")]
    UnterminatedQuote(String),

    /// A parameter has no name.
    #[error("Empty parameter name in: {0}")]
    EmptyParameterName(String),
}

/// The value of a link parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkParam {
    /// A bare token, e.g. `ct=41`.
    Token(String),
    /// A quoted string, e.g. `rt="Heartrate Resource"`.
    Quoted(String),
    /// A parameter without a value, e.g. `obs`.
    Flag,
}

impl LinkParam {
    /// The unquoted value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Token(v) | Self::Quoted(v) => Some(v),
            Self::Flag => None,
        }
    }
}

/// A single link: a target URI reference plus ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub target: String,
    pub params: Vec<(String, LinkParam)>,
}

impl Link {
    /// Create a link without parameters.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            params: Vec::new(),
        }
    }

    /// Append a bare token parameter.
    pub fn with_token(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params
            .push((name.into(), LinkParam::Token(value.to_string())));
        self
    }

    /// Append a quoted parameter.
    pub fn with_quoted(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .push((name.into(), LinkParam::Quoted(value.into())));
        self
    }

    /// Look up the first parameter with the given name.
    pub fn param(&self, name: &str) -> Option<&LinkParam> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.target)?;
        for (name, param) in &self.params {
            match param {
                LinkParam::Token(v) => write!(f, ";{}={}", name, v)?,
                LinkParam::Quoted(v) => write!(f, ";{}=\"{}\"", name, escape(v))?,
                LinkParam::Flag => write!(f, ";{}", name)?,
            }
        }
        Ok(())
    }
}

/// Serialize links into a link-format document.
pub fn format_links(links: &[Link]) -> String {
    links
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a link-format document. Blank input yields no links.
pub fn parse_links(input: &str) -> Result<Vec<Link>, LinkFormatError> {
    split_outside(input, ',')?
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_link)
        .collect()
}

fn parse_link(raw: &str) -> Result<Link, LinkFormatError> {
    let rest = raw
        .strip_prefix('<')
        .ok_or_else(|| LinkFormatError::MissingTarget(raw.to_string()))?;
    let end = rest
        .find('>')
        .ok_or_else(|| LinkFormatError::UnterminatedTarget(raw.to_string()))?;

    let mut link = Link::new(&rest[..end]);
    for part in split_outside(&rest[end + 1..], ';')? {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, param) = match part.split_once('=') {
            Some((name, value)) => (name.trim(), parse_value(value.trim(), raw)?),
            None => (part, LinkParam::Flag),
        };
        if name.is_empty() {
            return Err(LinkFormatError::EmptyParameterName(raw.to_string()));
        }
        link.params.push((name.to_string(), param));
    }
    Ok(link)
}

fn parse_value(value: &str, raw: &str) -> Result<LinkParam, LinkFormatError> {
    let Some(inner) = value.strip_prefix('"') else {
        return Ok(LinkParam::Token(value.to_string()));
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => break,
            },
            '"' => return Ok(LinkParam::Quoted(out)),
            other => out.push(other),
        }
    }
    Err(LinkFormatError::UnterminatedQuote(raw.to_string()))
}

/// Split on `sep` where it is not inside a quoted value or a `<...>` target.
fn split_outside(input: &str, sep: char) -> Result<Vec<&str>, LinkFormatError> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut in_target = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quote => escaped = true,
            '"' if !in_target => in_quote = !in_quote,
            '<' if !in_quote => in_target = true,
            '>' if !in_quote => in_target = false,
            c if c == sep && !in_quote && !in_target => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if in_quote {
        return Err(LinkFormatError::UnterminatedQuote(input.to_string()));
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
