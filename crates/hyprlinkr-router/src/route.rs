//! Named routes.
//!
//! A [`Route`] couples a [`RouteTemplate`] with defaults and constraints and
//! implements both directions of routing: matching an inbound path into
//! [`RouteValues`], and expanding route values into a relative path.

use regex::Regex;

use crate::error::{RouteError, RouteResult};
use crate::template::{RouteTemplate, Segment};
use crate::values::RouteValues;

/// Default for a route parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDefault {
    /// The parameter may be omitted; it is then absent from the route values.
    Optional,
    /// The parameter falls back to this value.
    Value(String),
}

impl RouteDefault {
    /// Creates a concrete default.
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    /// Returns the concrete default, if any.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Optional => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// A regular-expression constraint on one route value.
///
/// Patterns are anchored and matched case-insensitively, so `\d+` only
/// accepts values made entirely of digits.
#[derive(Debug, Clone)]
pub struct Constraint {
    parameter: String,
    regex: Regex,
}

impl Constraint {
    /// Compiles a constraint for `parameter`.
    pub fn new(parameter: impl Into<String>, pattern: impl Into<String>) -> RouteResult<Self> {
        let parameter = parameter.into();
        let pattern = pattern.into();
        let regex = Regex::new(&format!("(?i)^(?:{pattern})$")).map_err(|e| {
            RouteError::InvalidConstraint {
                parameter: parameter.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { parameter, regex })
    }

    /// Returns the constrained parameter name.
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Returns true if `value` satisfies the constraint.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// A named route.
///
/// # Example
///
/// ```rust
/// use hyprlinkr_router::{Route, RouteValues};
///
/// let route = Route::builder("API Default", "api/{controller}/{id}")
///     .optional("id")
///     .build()
///     .unwrap();
///
/// let values = route.match_path("/api/foo/42").unwrap();
/// assert_eq!(values.get("controller"), Some("foo"));
/// assert_eq!(values.get("id"), Some("42"));
///
/// let mut values = RouteValues::new();
/// values.insert("controller", "foo");
/// assert_eq!(route.expand(&values).unwrap(), "api/foo");
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    template: RouteTemplate,
    defaults: Vec<(String, RouteDefault)>,
    constraints: Vec<Constraint>,
}

impl Route {
    /// Starts building a route named `name` with the template text `template`.
    pub fn builder(name: impl Into<String>, template: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            name: name.into(),
            template: template.into(),
            defaults: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Returns the route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the route template.
    #[must_use]
    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    /// Returns the default for `name`, if one is declared.
    #[must_use]
    pub fn default_for(&self, name: &str) -> Option<&RouteDefault> {
        self.defaults
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, d)| d)
    }

    /// Returns the declared defaults.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &RouteDefault)> {
        self.defaults.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Returns the declared constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Matches a path (without query string) against this route.
    ///
    /// Returns the route values on success: one per filled placeholder, plus
    /// concrete defaults for missing placeholders and for names that are not
    /// placeholders at all.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteValues> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut values = RouteValues::with_capacity(self.template.segments().len());
        let mut index = 0;

        for segment in self.template.segments() {
            match segment {
                Segment::Literal(literal) => {
                    let candidate = segments.get(index)?;
                    if !candidate.eq_ignore_ascii_case(literal) {
                        return None;
                    }
                    index += 1;
                }
                Segment::Parameter(name) => {
                    if let Some(raw) = segments.get(index) {
                        values.insert(name.as_str(), decode(raw)?);
                        index += 1;
                    } else if let RouteDefault::Value(value) = self.default_for(name)? {
                        values.insert(name.as_str(), value.as_str());
                    }
                }
                Segment::CatchAll(name) => {
                    if index < segments.len() {
                        let rest = segments[index..]
                            .iter()
                            .map(|s| decode(s))
                            .collect::<Option<Vec<_>>>()?;
                        values.insert(name.as_str(), rest.join("/"));
                        index = segments.len();
                    } else if let Some(RouteDefault::Value(value)) = self.default_for(name) {
                        values.insert(name.as_str(), value.as_str());
                    }
                }
            }
        }

        if index < segments.len() {
            return None;
        }

        for (name, default) in &self.defaults {
            if let RouteDefault::Value(value) = default {
                if !self.template.has_parameter(name) && !values.contains_key(name) {
                    values.insert(name.as_str(), value.as_str());
                }
            }
        }

        let satisfied = self.constraints.iter().all(|constraint| {
            values
                .get(constraint.parameter())
                .map_or(true, |value| constraint.is_match(value))
        });

        satisfied.then_some(values)
    }

    /// Expands this route's template with `values` into a relative path.
    ///
    /// Placeholders are filled from `values`, then from concrete defaults;
    /// trailing optional placeholders without a value are dropped. Values
    /// that no placeholder consumes become the query string, in insertion
    /// order. All values are percent-encoded.
    pub fn expand(&self, values: &RouteValues) -> RouteResult<String> {
        self.check_constraints(values)?;

        let mut path: Vec<String> = Vec::with_capacity(self.template.segments().len());
        let mut omitted: Option<&str> = None;

        for segment in self.template.segments() {
            let name = match segment {
                Segment::Literal(literal) => {
                    if let Some(parameter) = omitted {
                        return Err(RouteError::unsatisfied(&self.name, parameter));
                    }
                    path.push(literal.clone());
                    continue;
                }
                Segment::Parameter(name) | Segment::CatchAll(name) => name.as_str(),
            };

            let value = values
                .get(name)
                .filter(|v| !v.is_empty())
                .or_else(|| self.default_for(name).and_then(RouteDefault::as_value));

            match value {
                Some(value) => {
                    if let Some(parameter) = omitted {
                        return Err(RouteError::unsatisfied(&self.name, parameter));
                    }
                    if matches!(segment, Segment::CatchAll(_)) {
                        path.extend(value.split('/').map(|part| encode(part)));
                    } else {
                        path.push(encode(value));
                    }
                }
                None => {
                    let may_omit = matches!(segment, Segment::CatchAll(_))
                        || matches!(self.default_for(name), Some(RouteDefault::Optional));
                    if !may_omit {
                        return Err(RouteError::unsatisfied(&self.name, name));
                    }
                    omitted.get_or_insert(name);
                }
            }
        }

        let mut query: Vec<String> = Vec::new();
        for (name, value) in values {
            if self.template.has_parameter(name) {
                continue;
            }
            if let Some(RouteDefault::Value(default)) = self.default_for(name) {
                if default.eq_ignore_ascii_case(value) {
                    continue;
                }
                return Err(RouteError::DefaultMismatch {
                    route_name: self.name.clone(),
                    parameter: name.to_string(),
                    value: value.to_string(),
                });
            }
            query.push(format!("{}={}", encode(name), encode(value)));
        }

        let mut expanded = path.join("/");
        if !query.is_empty() {
            expanded.push('?');
            expanded.push_str(&query.join("&"));
        }
        Ok(expanded)
    }

    fn check_constraints(&self, values: &RouteValues) -> RouteResult<()> {
        for constraint in &self.constraints {
            let value = values.get(constraint.parameter()).or_else(|| {
                self.default_for(constraint.parameter())
                    .and_then(RouteDefault::as_value)
            });
            if let Some(value) = value {
                if !constraint.is_match(value) {
                    return Err(RouteError::ConstraintFailed {
                        route_name: self.name.clone(),
                        parameter: constraint.parameter().to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`Route`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    name: String,
    template: String,
    defaults: Vec<(String, RouteDefault)>,
    constraints: Vec<(String, String)>,
}

impl RouteBuilder {
    /// Declares a default for `name`.
    pub fn default(mut self, name: impl Into<String>, default: RouteDefault) -> Self {
        let name = name.into();
        self.defaults.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.defaults.push((name, default));
        self
    }

    /// Declares a concrete default value for `name`.
    pub fn default_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default(name, RouteDefault::value(value))
    }

    /// Declares `name` as optional.
    pub fn optional(self, name: impl Into<String>) -> Self {
        self.default(name, RouteDefault::Optional)
    }

    /// Constrains `name` to values matching `pattern`.
    pub fn constraint(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.constraints.push((name.into(), pattern.into()));
        self
    }

    /// Parses the template and compiles the constraints.
    pub fn build(self) -> RouteResult<Route> {
        let template = RouteTemplate::parse(&self.template)?;
        let constraints = self
            .constraints
            .into_iter()
            .map(|(name, pattern)| Constraint::new(name, pattern))
            .collect::<RouteResult<Vec<_>>>()?;

        Ok(Route {
            name: self.name,
            template,
            defaults: self.defaults,
            constraints,
        })
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn decode(value: &str) -> Option<String> {
    urlencoding::decode(value).ok().map(|v| v.into_owned())
}
