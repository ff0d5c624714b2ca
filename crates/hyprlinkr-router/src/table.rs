//! The named route table.
//!
//! This module provides [`RouteTable`], the collection every link is built
//! against and every inbound URI is matched against.

use indexmap::IndexMap;

use crate::error::{RouteError, RouteResult};
use crate::route::{Route, RouteDefault};
use crate::values::RouteValues;

/// The result of matching an inbound path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteData {
    /// Name of the route that matched
    pub route_name: String,
    /// Values captured from the path, plus route defaults
    pub values: RouteValues,
}

/// The result of expanding a named route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPath {
    /// Name of the expanded route
    pub route_name: String,
    /// Relative path without a leading `/`, possibly with a `?query`
    pub path: String,
}

/// Named routes in registration order.
///
/// # Example
///
/// ```rust
/// use hyprlinkr_router::{RouteDefault, RouteTable, RouteValues};
///
/// let mut table = RouteTable::new();
/// table
///     .map_route(
///         "API Default",
///         "api/{controller}/{id}",
///         [("id", RouteDefault::Optional)],
///         Vec::<(&str, &str)>::new(),
///     )
///     .unwrap();
///
/// let data = table.route_data("/api/foo/42?x=1").unwrap();
/// assert_eq!(data.route_name, "API Default");
/// assert_eq!(data.values.get("id"), Some("42"));
///
/// let values: RouteValues = [("controller", "foo"), ("id", "42")].into_iter().collect();
/// let path = table.virtual_path("API Default", &values).unwrap();
/// assert_eq!(path.path, "api/foo/42");
/// ```
///
/// # Matching Order
///
/// Inbound matching tries routes in the order they were registered; the
/// first route that matches wins. Register specific routes before general
/// ones.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<String, Route>,
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route built from its parts.
    pub fn map_route<N, D, C, K, P>(
        &mut self,
        name: impl Into<String>,
        template: impl Into<String>,
        defaults: D,
        constraints: C,
    ) -> RouteResult<&mut Self>
    where
        D: IntoIterator<Item = (N, RouteDefault)>,
        N: Into<String>,
        C: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let mut builder = Route::builder(name, template);
        for (name, default) in defaults {
            builder = builder.default(name, default);
        }
        for (name, pattern) in constraints {
            builder = builder.constraint(name, pattern);
        }
        self.insert(builder.build()?)
    }

    /// Registers an already-built route.
    pub fn insert(&mut self, route: Route) -> RouteResult<&mut Self> {
        if self.routes.contains_key(route.name()) {
            return Err(RouteError::DuplicateRoute {
                name: route.name().to_string(),
            });
        }
        self.routes.insert(route.name().to_string(), route);
        Ok(self)
    }

    /// Returns the route named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over the routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// Matches a path (an optional query string is ignored).
    ///
    /// Returns the first matching route's data, or `None`.
    #[must_use]
    pub fn route_data(&self, path_and_query: &str) -> Option<RouteData> {
        self.routes.values().find_map(|route| {
            route.match_path(path_and_query).map(|values| RouteData {
                route_name: route.name().to_string(),
                values,
            })
        })
    }

    /// Expands the route named `name` with `values`.
    pub fn virtual_path(&self, name: &str, values: &RouteValues) -> RouteResult<VirtualPath> {
        let route = self.get(name).ok_or_else(|| RouteError::UnknownRoute {
            name: name.to_string(),
        })?;

        Ok(VirtualPath {
            route_name: route.name().to_string(),
            path: route.expand(values)?,
        })
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = indexmap::map::Values<'a, String, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CONSTRAINTS: [(&str, &str); 0] = [];

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table
            .map_route(
                "CustomRoute",
                "customRoute",
                [("controller", RouteDefault::value("foo"))],
                NO_CONSTRAINTS,
            )
            .unwrap()
            .map_route(
                "API Default",
                "api/{controller}/{id}",
                [("id", RouteDefault::Optional)],
                NO_CONSTRAINTS,
            )
            .unwrap();
        table
    }

    #[test]
    fn test_table_len_and_order() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        let names: Vec<_> = table.iter().map(Route::name).collect();
        assert_eq!(names, vec!["CustomRoute", "API Default"]);
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut table = table();
        let err = table
            .map_route(
                "API Default",
                "other/{id}",
                Vec::<(&str, RouteDefault)>::new(),
                NO_CONSTRAINTS,
            )
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicateRoute {
                name: "API Default".to_string()
            }
        );
    }

    #[test]
    fn test_route_data_first_match_wins() {
        let data = table().route_data("/customRoute").unwrap();
        assert_eq!(data.route_name, "CustomRoute");
        assert_eq!(data.values.get("controller"), Some("foo"));

        let data = table().route_data("/api/bar/1").unwrap();
        assert_eq!(data.route_name, "API Default");
    }

    #[test]
    fn test_route_data_no_match() {
        assert!(table().route_data("/nothing/here/at/all").is_none());
    }

    #[test]
    fn test_virtual_path_unknown_route() {
        let err = table()
            .virtual_path("Missing", &RouteValues::new())
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownRoute {
                name: "Missing".to_string()
            }
        );
    }

    #[test]
    fn test_virtual_path_expands() {
        let values: RouteValues = [("controller", "foo"), ("ploeh", "5")].into_iter().collect();
        let path = table().virtual_path("API Default", &values).unwrap();
        assert_eq!(path.route_name, "API Default");
        assert_eq!(path.path, "api/foo?ploeh=5");
    }

    #[test]
    fn test_virtual_path_fixed_default_is_not_a_query_value() {
        let same: RouteValues = [("controller", "FOO"), ("ploeh", "5")].into_iter().collect();
        let path = table().virtual_path("CustomRoute", &same).unwrap();
        assert_eq!(path.path, "customRoute?ploeh=5");

        let other: RouteValues = [("controller", "bar")].into_iter().collect();
        let err = table().virtual_path("CustomRoute", &other).unwrap_err();
        assert_eq!(
            err,
            RouteError::DefaultMismatch {
                route_name: "CustomRoute".to_string(),
                parameter: "controller".to_string(),
                value: "bar".to_string(),
            }
        );
    }
}
