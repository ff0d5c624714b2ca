//! Route template parsing.
//!
//! A template such as `api/{controller}/{id}` is split on `/` into segments.
//! Each segment is either a literal, a named placeholder (`{id}`) or a
//! catch-all placeholder (`{*path}`) which must be the last segment.

use std::fmt;
use std::str::FromStr;

use crate::error::{RouteError, RouteResult};

/// A single segment of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text (e.g., "api")
    Literal(String),
    /// Named placeholder (e.g., "{id}")
    Parameter(String),
    /// Catch-all placeholder (e.g., "{*path}")
    CatchAll(String),
}

impl Segment {
    /// Returns the placeholder name, if this segment is a placeholder.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Parameter(name) | Self::CatchAll(name) => Some(name),
        }
    }
}

/// A parsed route template.
///
/// # Example
///
/// ```rust
/// use hyprlinkr_router::{RouteTemplate, Segment};
///
/// let template: RouteTemplate = "api/{controller}/{id}".parse().unwrap();
///
/// assert_eq!(template.segments().len(), 3);
/// assert_eq!(template.segments()[0], Segment::Literal("api".to_string()));
/// assert!(template.has_parameter("controller"));
/// assert!(!template.has_parameter("action"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    text: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parses a template.
    ///
    /// A leading `/` or `~/` is ignored, as is a trailing `/`.
    pub fn parse(text: &str) -> RouteResult<Self> {
        let trimmed = text.strip_prefix('~').unwrap_or(text);
        let trimmed = trimmed.trim_start_matches('/').trim_end_matches('/');

        let mut segments: Vec<Segment> = Vec::new();
        if !trimmed.is_empty() {
            for raw in trimmed.split('/') {
                if matches!(segments.last(), Some(Segment::CatchAll(_))) {
                    return Err(RouteError::invalid_template(
                        text,
                        "a catch-all placeholder must be the last segment",
                    ));
                }
                let segment = Self::parse_segment(text, raw)?;
                if let Some(name) = segment.parameter_name() {
                    if segments
                        .iter()
                        .filter_map(Segment::parameter_name)
                        .any(|existing| existing.eq_ignore_ascii_case(name))
                    {
                        return Err(RouteError::invalid_template(
                            text,
                            format!("placeholder '{name}' appears more than once"),
                        ));
                    }
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            text: text.to_string(),
            segments,
        })
    }

    fn parse_segment(text: &str, raw: &str) -> RouteResult<Segment> {
        if raw.is_empty() {
            return Err(RouteError::invalid_template(text, "empty segment"));
        }

        let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
            if raw.contains(['{', '}']) {
                return Err(RouteError::invalid_template(
                    text,
                    format!("segment '{raw}' mixes literal text and placeholders"),
                ));
            }
            return Ok(Segment::Literal(raw.to_string()));
        };

        let (catch_all, name) = match inner.strip_prefix('*') {
            Some(name) => (true, name),
            None => (false, inner),
        };

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RouteError::invalid_template(
                text,
                format!("'{raw}' is not a valid placeholder"),
            ));
        }

        Ok(if catch_all {
            Segment::CatchAll(name.to_string())
        } else {
            Segment::Parameter(name.to_string())
        })
    }

    /// Returns the template text as it was supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the placeholder names in template order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::parameter_name)
    }

    /// Returns true if the template has a placeholder named `name`.
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters().any(|p| p.eq_ignore_ascii_case(name))
    }
}

impl FromStr for RouteTemplate {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
