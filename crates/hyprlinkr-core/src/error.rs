//! Error types for Hyprlinkr.
//!
//! This module provides [`LinkError`], the error type raised while building
//! links and parsing them back into action contexts.
//!
//! # Error kinds
//!
//! | `ErrorKind` | Raised when |
//! |---|---|
//! | `InvalidArgument` | an expression is not a method call, names an unknown action, or a URI matches no action |
//! | `InvalidOperation` | the request has no routing context, or is not absolute |
//! | `RoutingConfiguration` | the selected route does not exist or cannot be expanded with the supplied values |
//!
//! Absent inputs cannot be expressed through the API, so there is no
//! null-argument kind.

use hyprlinkr_router::RouteError;
use thiserror::Error;

/// Result type alias using [`LinkError`].
pub type LinkResult<T> = Result<T, LinkError>;

/// Classification of [`LinkError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A supplied expression or URI is structurally wrong or unmatchable.
    InvalidArgument,
    /// Required context is missing from the request.
    InvalidOperation,
    /// The selected route is missing or does not fit the supplied values.
    RoutingConfiguration,
}

/// Standard error type for Hyprlinkr.
///
/// # Example
///
/// ```
/// use hyprlinkr_core::{ErrorKind, LinkError};
///
/// let err = LinkError::invalid_argument("expression is not a method call");
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// A supplied expression or URI is structurally wrong or unmatchable.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable error message.
        message: String,
    },

    /// Required context is missing from the request.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Human-readable error message.
        message: String,
    },

    /// The routing engine rejected the selected route.
    #[error("Routing configuration error for route '{route_name}': {source}")]
    RoutingConfiguration {
        /// The route that was sought.
        route_name: String,
        /// The routing engine's error.
        #[source]
        source: RouteError,
    },
}

impl LinkError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates a routing configuration error for `route_name`.
    #[must_use]
    pub fn routing_configuration(route_name: impl Into<String>, source: RouteError) -> Self {
        Self::RoutingConfiguration {
            route_name: route_name.into(),
            source,
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            Self::RoutingConfiguration { .. } => ErrorKind::RoutingConfiguration,
        }
    }

    /// Returns the route name for routing configuration errors.
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        match self {
            Self::RoutingConfiguration { route_name, .. } => Some(route_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_argument() {
        let err = LinkError::invalid_argument("not a method call");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Invalid argument: not a method call");
        assert!(err.route_name().is_none());
    }

    #[test]
    fn test_invalid_operation() {
        let err = LinkError::invalid_operation("no route data");
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(err.to_string().contains("no route data"));
    }

    #[test]
    fn test_routing_configuration_names_route() {
        let err = LinkError::routing_configuration(
            "DefaultApi",
            RouteError::UnknownRoute {
                name: "DefaultApi".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::RoutingConfiguration);
        assert_eq!(err.route_name(), Some("DefaultApi"));
        assert!(err.to_string().contains("'DefaultApi'"));
        assert!(err.source().is_some());
    }
}
