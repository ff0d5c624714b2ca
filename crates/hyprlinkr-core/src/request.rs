//! The request model.
//!
//! A [`Request`] is the in-flight request a link is computed for: its
//! absolute URI, the API configuration it is served under and, once it has
//! been routed, its routing context.

use std::sync::Arc;

use http::Uri;
use hyprlinkr_router::{RouteData, RouteTable};
use tracing::trace;

use crate::error::{LinkError, LinkResult};
use crate::registry::ControllerRegistry;

/// Routes and controllers of an API.
///
/// Shared between requests through an `Arc`; never modified while serving.
#[derive(Debug, Clone, Default)]
pub struct ApiConfiguration {
    routes: RouteTable,
    controllers: ControllerRegistry,
}

impl ApiConfiguration {
    /// Creates a configuration.
    #[must_use]
    pub fn new(routes: RouteTable, controllers: ControllerRegistry) -> Self {
        Self {
            routes,
            controllers,
        }
    }

    /// Returns the route table.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns the controller registry.
    #[must_use]
    pub const fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }
}

/// An in-flight request.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use hyprlinkr_core::{ApiConfiguration, Request};
///
/// let request = Request::parse("http://localhost/api/foo", Arc::new(ApiConfiguration::default()))
///     .unwrap();
/// assert!(request.route_data().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    uri: Uri,
    configuration: Arc<ApiConfiguration>,
    route_data: Option<RouteData>,
}

impl Request {
    /// Creates a request that has not been routed.
    #[must_use]
    pub fn new(uri: Uri, configuration: Arc<ApiConfiguration>) -> Self {
        Self {
            uri,
            configuration,
            route_data: None,
        }
    }

    /// Parses `uri` and creates a request that has not been routed.
    pub fn parse(uri: &str, configuration: Arc<ApiConfiguration>) -> LinkResult<Self> {
        let uri = uri
            .parse::<Uri>()
            .map_err(|e| LinkError::invalid_argument(format!("'{uri}' is not a valid URI: {e}")))?;
        Ok(Self::new(uri, configuration))
    }

    /// Matches the request against its route table and records the result.
    ///
    /// If no route matches, the request stays unrouted.
    #[must_use]
    pub fn route(mut self) -> Self {
        let path = self
            .uri
            .path_and_query()
            .map_or("/", |path_and_query| path_and_query.as_str());
        self.route_data = self.configuration.routes().route_data(path);
        trace!(
            uri = %self.uri,
            route_name = ?self.route_data.as_ref().map(|d| d.route_name.as_str()),
            "routed request"
        );
        self
    }

    /// Sets the routing context explicitly.
    #[must_use]
    pub fn with_route_data(mut self, route_data: RouteData) -> Self {
        self.route_data = Some(route_data);
        self
    }

    /// Returns the request URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the API configuration.
    #[must_use]
    pub fn configuration(&self) -> &Arc<ApiConfiguration> {
        &self.configuration
    }

    /// Returns the routing context, if the request has been routed.
    #[must_use]
    pub const fn route_data(&self) -> Option<&RouteData> {
        self.route_data.as_ref()
    }
}
