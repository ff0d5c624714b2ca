//! Link generation.
//!
//! The [`RouteLinker`] builds the absolute URI of a controller action from a
//! typed call expression:
//!
//! ```text
//! expression → method call → route values → (route name, values) → path → URI
//!                             (query)         (dispatcher)         (route table)
//! ```

use http::uri::{PathAndQuery, Uri};
use hyprlinkr_config::LinkerConfig;
use hyprlinkr_core::{Controller, ControllerDescriptor, Expression, LinkError, LinkResult, Request};
use tracing::debug;

use crate::dispatch::{DefaultRouteDispatcher, RouteDispatcher};
use crate::query::{DefaultRouteValuesQuery, RouteValuesQuery};

/// Builds absolute URIs to controller actions for one request.
///
/// # Example
///
/// ```rust,ignore
/// let linker = RouteLinker::new(request);
/// let uri = linker.get_uri::<FooController>(|c| c.get_by_id(42))?;
/// assert_eq!(uri.to_string(), "http://localhost/api/foo/42");
/// ```
#[derive(Debug, Clone)]
pub struct RouteLinker<Q = DefaultRouteValuesQuery, D = DefaultRouteDispatcher> {
    request: Request,
    query: Q,
    dispatcher: D,
}

impl RouteLinker {
    /// Creates a linker with the default query and dispatcher.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            query: DefaultRouteValuesQuery,
            dispatcher: DefaultRouteDispatcher::new(),
        }
    }

    /// Creates a linker whose dispatcher uses the configured default route
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the configured name is blank.
    pub fn from_config(request: Request, config: &LinkerConfig) -> LinkResult<Self> {
        Ok(Self::new(request)
            .with_dispatcher(DefaultRouteDispatcher::try_new(config.default_route_name.clone())?))
    }
}

impl<Q, D> RouteLinker<Q, D> {
    /// Replaces the route dispatcher.
    pub fn with_dispatcher<D2>(self, dispatcher: D2) -> RouteLinker<Q, D2> {
        RouteLinker {
            request: self.request,
            query: self.query,
            dispatcher,
        }
    }

    /// Replaces the route values query.
    pub fn with_query<Q2>(self, query: Q2) -> RouteLinker<Q2, D> {
        RouteLinker {
            request: self.request,
            query,
            dispatcher: self.dispatcher,
        }
    }

    /// Returns the request links are built for.
    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }
}

impl<Q: RouteValuesQuery, D: RouteDispatcher> RouteLinker<Q, D> {
    /// Returns the URI of the action recorded by `action` on controller `C`.
    ///
    /// # Errors
    ///
    /// - invalid argument: the expression is not an action call of `C`
    /// - invalid operation: the request has not been routed, or its URI is
    ///   not absolute
    /// - routing configuration: the selected route does not exist or cannot
    ///   be expanded with the call's values
    pub fn get_uri<C, F>(&self, action: F) -> LinkResult<Uri>
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression,
    {
        let expression = action(&C::Actions::default());
        self.link(&expression, Some(C::descriptor()))
    }

    /// Returns the URI of the action described by a pre-built expression.
    ///
    /// The controller is the one the call was recorded on.
    pub fn get_uri_from(&self, expression: &Expression) -> LinkResult<Uri> {
        self.link(expression, None)
    }

    fn link(
        &self,
        expression: &Expression,
        receiver: Option<&'static ControllerDescriptor>,
    ) -> LinkResult<Uri> {
        let call = match receiver {
            Some(receiver) => expression.method_call_on(receiver),
            None => expression.method_call(),
        }
        .inspect_err(|e| debug!(error = %e, "expression is not an action call"))?;

        let route_values = self.query.get_route_values(&call)?;
        let rouple = self.dispatcher.dispatch(&call, &route_values)?;

        if self.request.route_data().is_none() {
            debug!(uri = %self.request.uri(), "request has no route data");
            return Err(LinkError::invalid_operation(format!(
                "the request for '{}' has no route data; route the request before building links",
                self.request.uri()
            )));
        }

        let (route_name, route_values) = rouple.into_parts();
        let virtual_path = self
            .request
            .configuration()
            .routes()
            .virtual_path(&route_name, &route_values)
            .map_err(|e| {
                debug!(route_name = %route_name, error = %e, "route expansion failed");
                LinkError::routing_configuration(route_name.clone(), e)
            })?;

        let uri = self.absolute(&virtual_path.path)?;
        debug!(
            controller = call.controller().type_name(),
            action = call.action().name(),
            route_name = %virtual_path.route_name,
            uri = %uri,
            "built link"
        );
        Ok(uri)
    }

    fn absolute(&self, path: &str) -> LinkResult<Uri> {
        let request_uri = self.request.uri();
        let (Some(scheme), Some(authority)) = (request_uri.scheme(), request_uri.authority())
        else {
            return Err(LinkError::invalid_operation(format!(
                "the request URI '{request_uri}' is not absolute"
            )));
        };

        let path_and_query: PathAndQuery = format!("/{path}").parse().map_err(|e| {
            LinkError::invalid_operation(format!("expanded path '{path}' is not a valid URI path: {e}"))
        })?;

        Uri::builder()
            .scheme(scheme.clone())
            .authority(authority.clone())
            .path_and_query(path_and_query)
            .build()
            .map_err(|e| LinkError::invalid_operation(format!("cannot build link URI: {e}")))
    }
}

impl<Q, D> RouteLinker<Q, D>
where
    Q: RouteValuesQuery + Clone + 'static,
    D: RouteDispatcher + Clone + 'static,
{
    /// Returns the URI of an action as a future.
    ///
    /// The computation is the same as [`get_uri`](Self::get_uri); it runs on
    /// the runtime's blocking pool. Must be awaited inside a Tokio runtime.
    pub async fn get_uri_async<C, F>(&self, action: F) -> LinkResult<Uri>
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression,
    {
        let expression = action(&C::Actions::default());
        let linker = self.clone();

        tokio::task::spawn_blocking(move || linker.link(&expression, Some(C::descriptor())))
            .await
            .map_err(|e| LinkError::invalid_operation(format!("link computation did not complete: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FlattenComplex, ScalarRouteValuesQuery};
    use hyprlinkr_core::ErrorKind;
    use hyprlinkr_test::controllers::{
        ActionRouteController, BarController, FooController, ModelController, NoRouteController,
        QueryModel,
    };
    use hyprlinkr_test::{configuration, request, unrouted_request};

    fn linker() -> RouteLinker {
        RouteLinker::new(request("http://localhost/api/foo"))
    }

    #[test]
    fn test_get_uri_with_id() {
        let uri = linker()
            .get_uri::<FooController, _>(|c| c.get_by_id(42))
            .unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/foo/42");
    }

    #[test]
    fn test_get_uri_without_arguments() {
        let uri = linker().get_uri::<FooController, _>(|c| c.get()).unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/foo");
    }

    #[test]
    fn test_get_uri_omits_null_query_value() {
        let uri = linker()
            .get_uri::<FooController, _>(|c| c.get_with_ploeh_and_fnaah(5, None))
            .unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/foo?ploeh=5");
    }

    #[test]
    fn test_get_uri_keeps_port_and_scheme() {
        let linker = RouteLinker::new(request("https://example.com:8443/api/foo/1"));
        let uri = linker.get_uri::<FooController, _>(|c| c.get_by_id(2)).unwrap();
        assert_eq!(uri.to_string(), "https://example.com:8443/api/foo/2");
    }

    #[test]
    fn test_get_uri_action_route() {
        let uri = linker()
            .get_uri::<ActionRouteController, _>(|c| c.get_by_id(3))
            .unwrap();
        assert_eq!(uri.to_string(), "http://localhost/custom/3");
    }

    #[test]
    fn test_get_uri_unrouted_request() {
        let linker = RouteLinker::new(unrouted_request("http://localhost/api/foo"));
        let err = linker.get_uri::<FooController, _>(|c| c.get()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_get_uri_from_non_call() {
        let err = linker()
            .get_uri_from(&Expression::new_object::<String>())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_get_uri_from_prebuilt_expression() {
        let expression = <FooController as Controller>::Actions::default().get_by_id(7);
        let uri = linker().get_uri_from(&expression).unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/foo/7");
    }

    #[test]
    fn test_get_uri_unknown_route_names_route() {
        let linker = linker().with_dispatcher(DefaultRouteDispatcher::try_new("Missing").unwrap());
        let err = linker.get_uri::<FooController, _>(|c| c.get()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RoutingConfiguration);
        assert_eq!(err.route_name(), Some("Missing"));
    }

    #[test]
    fn test_get_uri_unexpandable_route() {
        let err = linker()
            .get_uri::<NoRouteController, _>(|c| c.get_by_id(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RoutingConfiguration);
        assert_eq!(err.route_name(), Some("Unused Route"));
    }

    #[test]
    fn test_get_uri_not_absolute() {
        let request = hyprlinkr_core::Request::parse("/api/foo", configuration())
            .unwrap()
            .route();
        let err = RouteLinker::new(request)
            .get_uri::<FooController, _>(|c| c.get())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_with_flattening_query() {
        let linker = linker().with_query(ScalarRouteValuesQuery::new(FlattenComplex));
        let uri = linker
            .get_uri::<ModelController, _>(|c| {
                c.get(QueryModel {
                    term: "ploeh fnaah".to_string(),
                    page: 2,
                    filter: None,
                })
            })
            .unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/model?term=ploeh%20fnaah&page=2");
    }

    #[test]
    fn test_from_config() {
        let config = LinkerConfig {
            default_route_name: "Missing".to_string(),
        };
        let linker = RouteLinker::from_config(request("http://localhost/api/foo"), &config).unwrap();
        let err = linker.get_uri::<FooController, _>(|c| c.get()).unwrap_err();
        assert_eq!(err.route_name(), Some("Missing"));

        let blank = LinkerConfig {
            default_route_name: String::new(),
        };
        assert!(RouteLinker::from_config(request("http://localhost/api/foo"), &blank).is_err());
    }

    #[tokio::test]
    async fn test_get_uri_async() {
        let uri = linker()
            .get_uri_async::<BarController, _>(|c| c.get_async(9))
            .await
            .unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/bar/9");
    }

    #[tokio::test]
    async fn test_get_uri_async_propagates_errors() {
        let linker = RouteLinker::new(unrouted_request("http://localhost/api/foo"));
        let err = linker
            .get_uri_async::<BarController, _>(|c| c.get_async(9))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}
