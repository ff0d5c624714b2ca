//! Fixture requests.

use std::sync::Arc;

use hyprlinkr_core::{ApiConfiguration, Request};

use crate::error::TestError;
use crate::routes::configuration;

/// Builder for in-flight requests.
///
/// # Example
///
/// ```
/// use hyprlinkr_test::TestRequest;
///
/// let request = TestRequest::get("http://localhost/api/foo/1").build().unwrap();
/// assert_eq!(request.route_data().unwrap().route_name, "API Default");
///
/// let unrouted = TestRequest::get("http://localhost/api/foo").unrouted().build().unwrap();
/// assert!(unrouted.route_data().is_none());
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TestRequest {
    uri: String,
    configuration: Option<Arc<ApiConfiguration>>,
    routed: bool,
}

impl TestRequest {
    /// Starts a request for `uri`.
    pub fn get(uri: impl AsRef<str>) -> Self {
        Self {
            uri: uri.as_ref().to_string(),
            configuration: None,
            routed: true,
        }
    }

    /// Uses `configuration` instead of the fixture configuration.
    pub fn configuration(mut self, configuration: Arc<ApiConfiguration>) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Leaves the request without routing context.
    pub fn unrouted(mut self) -> Self {
        self.routed = false;
        self
    }

    /// Builds the request, routing it unless [`unrouted`](Self::unrouted)
    /// was called.
    ///
    /// # Errors
    ///
    /// Fails if the URI is invalid, or if a routed request matches no route.
    pub fn build(self) -> Result<Request, TestError> {
        let configuration = self.configuration.unwrap_or_else(configuration);
        let request = Request::parse(&self.uri, configuration)?;
        if !self.routed {
            return Ok(request);
        }

        let request = request.route();
        if request.route_data().is_none() {
            return Err(TestError::Unrouted(self.uri));
        }
        Ok(request)
    }
}

/// Returns a routed request for `uri` under the fixture configuration.
///
/// # Panics
///
/// Panics if the URI is invalid or matches no fixture route.
pub fn request(uri: &str) -> Request {
    TestRequest::get(uri).build().expect("valid routed request")
}

/// Returns an unrouted request for `uri` under the fixture configuration.
///
/// # Panics
///
/// Panics if the URI is invalid.
pub fn unrouted_request(uri: &str) -> Request {
    TestRequest::get(uri)
        .unrouted()
        .build()
        .expect("valid request")
}
