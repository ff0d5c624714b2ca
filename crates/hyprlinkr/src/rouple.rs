//! Dispatch results.

use hyprlinkr_router::RouteValues;

/// A route name paired with the route values to expand it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rouple {
    route_name: String,
    route_values: RouteValues,
}

impl Rouple {
    /// Creates a rouple.
    #[must_use]
    pub fn new(route_name: impl Into<String>, route_values: RouteValues) -> Self {
        Self {
            route_name: route_name.into(),
            route_values,
        }
    }

    /// Returns the route name.
    #[must_use]
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Returns the route values.
    #[must_use]
    pub const fn route_values(&self) -> &RouteValues {
        &self.route_values
    }

    /// Splits the rouple into its parts.
    #[must_use]
    pub fn into_parts(self) -> (String, RouteValues) {
        (self.route_name, self.route_values)
    }
}
