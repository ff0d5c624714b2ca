//! Link building directly from a request.

use http::Uri;
use hyprlinkr_core::{Controller, Expression, LinkResult, Request};

use crate::dispatch::RouteDispatcher;
use crate::linker::RouteLinker;

/// Builds links from an in-flight request without constructing a linker.
///
/// # Example
///
/// ```rust,ignore
/// use hyprlinkr::RequestLinkExt;
///
/// let uri = request.link::<FooController, _>(|c| c.get_by_id(42))?;
/// ```
pub trait RequestLinkExt {
    /// Returns the URI of an action, using the default dispatcher.
    fn link<C, F>(&self, action: F) -> LinkResult<Uri>
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression;

    /// Returns the URI of an action, using `dispatcher` to pick the route.
    fn link_with<C, D, F>(&self, dispatcher: D, action: F) -> LinkResult<Uri>
    where
        C: Controller,
        D: RouteDispatcher,
        F: FnOnce(&C::Actions) -> Expression;
}

impl RequestLinkExt for Request {
    fn link<C, F>(&self, action: F) -> LinkResult<Uri>
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression,
    {
        RouteLinker::new(self.clone()).get_uri::<C, F>(action)
    }

    fn link_with<C, D, F>(&self, dispatcher: D, action: F) -> LinkResult<Uri>
    where
        C: Controller,
        D: RouteDispatcher,
        F: FnOnce(&C::Actions) -> Expression,
    {
        RouteLinker::new(self.clone())
            .with_dispatcher(dispatcher)
            .get_uri::<C, F>(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DefaultRouteDispatcher;
    use hyprlinkr_test::controllers::FooController;
    use hyprlinkr_test::request;

    #[test]
    fn test_link() {
        let request = request("http://localhost/api/foo");
        let uri = request.link::<FooController, _>(|c| c.get_by_id(1)).unwrap();
        assert_eq!(uri.to_string(), "http://localhost/api/foo/1");
    }

    #[test]
    fn test_link_with_dispatcher() {
        let request = request("http://localhost/api/foo");
        let dispatcher = DefaultRouteDispatcher::try_new("Controller Route").unwrap();
        let uri = request
            .link_with::<FooController, _, _>(dispatcher, |c| c.get_by_id(1))
            .unwrap();
        assert_eq!(uri.to_string(), "http://localhost/routes/foo/1");
    }
}
