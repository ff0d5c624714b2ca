//! Routing error types.

use thiserror::Error;

/// Result type alias using [`RouteError`].
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors raised while building a route table or expanding a named route.
///
/// The first three variants are registration errors; the rest are raised by
/// [`RouteTable::virtual_path`](crate::RouteTable::virtual_path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route with the same name is already registered.
    #[error("a route named '{name}' is already in the route table")]
    DuplicateRoute {
        /// The duplicated route name.
        name: String,
    },

    /// The route template could not be parsed.
    #[error("invalid route template '{template}': {reason}")]
    InvalidTemplate {
        /// The template text.
        template: String,
        /// Why the template was rejected.
        reason: String,
    },

    /// A constraint pattern is not a valid regular expression.
    #[error("invalid constraint for parameter '{parameter}': {reason}")]
    InvalidConstraint {
        /// The constrained parameter.
        parameter: String,
        /// The regex compilation error.
        reason: String,
    },

    /// No route with the requested name exists.
    #[error("no route named '{name}' is in the route table")]
    UnknownRoute {
        /// The requested route name.
        name: String,
    },

    /// A template placeholder has no value and no default.
    #[error("route '{route_name}' has no value for placeholder '{parameter}'")]
    Unsatisfied {
        /// The route being expanded.
        route_name: String,
        /// The placeholder that could not be filled.
        parameter: String,
    },

    /// A value does not satisfy the route's constraint for it.
    #[error("value '{value}' for '{parameter}' violates a constraint of route '{route_name}'")]
    ConstraintFailed {
        /// The route being expanded.
        route_name: String,
        /// The constrained parameter.
        parameter: String,
        /// The offending value.
        value: String,
    },

    /// A value contradicts a fixed default that is not a template placeholder.
    #[error("value '{value}' for '{parameter}' contradicts the default of route '{route_name}'")]
    DefaultMismatch {
        /// The route being expanded.
        route_name: String,
        /// The parameter with a fixed default.
        parameter: String,
        /// The supplied value.
        value: String,
    },
}

impl RouteError {
    /// Creates an invalid template error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsatisfied placeholder error.
    pub fn unsatisfied(route_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::Unsatisfied {
            route_name: route_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Returns true for errors raised while registering routes.
    #[must_use]
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRoute { .. } | Self::InvalidTemplate { .. } | Self::InvalidConstraint { .. }
        )
    }
}
