//! Route dispatch.
//!
//! A [`RouteDispatcher`] decides which named route a link is built from and
//! which route values it is expanded with.

use hyprlinkr_core::{LinkError, LinkResult, MethodCall};
use hyprlinkr_router::RouteValues;
use tracing::trace;

use crate::rouple::Rouple;

/// Route name used when nothing else names a route.
pub const DEFAULT_ROUTE_NAME: &str = "API Default";

/// Selects the route for a method call.
///
/// Implementations never modify `route_values`; any additions are made to a
/// copy carried by the returned [`Rouple`].
pub trait RouteDispatcher: Send + Sync {
    /// Returns the route name and final route values for `call`.
    fn dispatch(&self, call: &MethodCall<'_>, route_values: &RouteValues) -> LinkResult<Rouple>;
}

/// The standard dispatch policy.
///
/// In order, first match wins:
///
/// 1. An action route attribute with a name: that name, values unchanged.
/// 2. A controller route attribute: its name (or the default name), with
///    `controller` and `action` values added unless the attribute's
///    template lacks the corresponding placeholder.
/// 3. Otherwise: the default name, with a `controller` value added.
///
/// # Example
///
/// ```
/// use hyprlinkr::DefaultRouteDispatcher;
///
/// let dispatcher = DefaultRouteDispatcher::try_new("DefaultApi").unwrap();
/// assert_eq!(dispatcher.route_name(), "DefaultApi");
/// assert!(DefaultRouteDispatcher::try_new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRouteDispatcher {
    route_name: String,
}

impl DefaultRouteDispatcher {
    /// Creates a dispatcher using [`DEFAULT_ROUTE_NAME`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            route_name: DEFAULT_ROUTE_NAME.to_string(),
        }
    }

    /// Creates a dispatcher using `route_name` as the default route name.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `route_name` is blank.
    pub fn try_new(route_name: impl Into<String>) -> LinkResult<Self> {
        let route_name = route_name.into();
        if route_name.trim().is_empty() {
            return Err(LinkError::invalid_argument(
                "the default route name must not be empty",
            ));
        }
        Ok(Self { route_name })
    }

    /// Returns the default route name.
    #[must_use]
    pub fn route_name(&self) -> &str {
        &self.route_name
    }
}

impl Default for DefaultRouteDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteDispatcher for DefaultRouteDispatcher {
    fn dispatch(&self, call: &MethodCall<'_>, route_values: &RouteValues) -> LinkResult<Rouple> {
        let action = call.action();
        let controller = call.controller();

        if let Some(name) = action.route_attribute().and_then(|route| route.name()) {
            trace!(route_name = name, action = action.name(), "dispatching to action route");
            return Ok(Rouple::new(name, route_values.clone()));
        }

        let mut values = route_values.clone();
        values.insert("controller", controller.controller_name());

        if let Some(route) = controller.route_attribute() {
            let name = route.name().unwrap_or(&self.route_name);
            values.insert("action", action.name().to_ascii_lowercase());
            if !route.mentions("controller") {
                values.remove("controller");
            }
            if !route.mentions("action") {
                values.remove("action");
            }
            trace!(route_name = name, controller = controller.type_name(), "dispatching to controller route");
            return Ok(Rouple::new(name, values));
        }

        trace!(route_name = %self.route_name, controller = controller.type_name(), "dispatching to default route");
        Ok(Rouple::new(self.route_name.clone(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprlinkr_core::{Controller, Expression};
    use hyprlinkr_test::controllers::{
        ActionRouteController, FooController, RouteAttributeController, TemplateOnlyController,
    };

    fn dispatch(dispatcher: &DefaultRouteDispatcher, expression: &Expression, values: &RouteValues) -> Rouple {
        dispatcher
            .dispatch(&expression.method_call().unwrap(), values)
            .unwrap()
    }

    fn values(pairs: &[(&str, &str)]) -> RouteValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_default_name() {
        assert_eq!(DefaultRouteDispatcher::new().route_name(), "API Default");
        assert_eq!(DefaultRouteDispatcher::default(), DefaultRouteDispatcher::new());
    }

    #[test]
    fn test_try_new_rejects_blank_name() {
        for name in ["", "   "] {
            let err = DefaultRouteDispatcher::try_new(name).unwrap_err();
            assert_eq!(err.kind(), hyprlinkr_core::ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_plain_controller_adds_controller_value() {
        let actions = <FooController as Controller>::Actions::default();
        let rouple = dispatch(
            &DefaultRouteDispatcher::new(),
            &actions.get_by_id(1),
            &values(&[("id", "1")]),
        );

        assert_eq!(rouple.route_name(), "API Default");
        assert_eq!(rouple.route_values(), &values(&[("id", "1"), ("controller", "foo")]));
    }

    #[test]
    fn test_custom_default_name() {
        let dispatcher = DefaultRouteDispatcher::try_new("DefaultApi").unwrap();
        let actions = <FooController as Controller>::Actions::default();
        let rouple = dispatch(&dispatcher, &actions.get(), &RouteValues::new());
        assert_eq!(rouple.route_name(), "DefaultApi");
    }

    #[test]
    fn test_action_route_name_keeps_values_unchanged() {
        let actions = <ActionRouteController as Controller>::Actions::default();
        let input = values(&[("id", "3")]);
        let rouple = dispatch(&DefaultRouteDispatcher::new(), &actions.get_by_id(3), &input);

        assert_eq!(rouple.route_name(), "CustomRoute");
        assert_eq!(rouple.route_values(), &input);
    }

    #[test]
    fn test_controller_route_with_controller_placeholder() {
        let actions = <RouteAttributeController as Controller>::Actions::default();
        let rouple = dispatch(
            &DefaultRouteDispatcher::new(),
            &actions.get_by_id(1),
            &values(&[("id", "1")]),
        );

        assert_eq!(rouple.route_name(), "Controller Route");
        assert_eq!(
            rouple.route_values(),
            &values(&[("id", "1"), ("controller", "routeattribute")])
        );
    }

    #[test]
    fn test_controller_route_without_name_uses_default() {
        let actions = <TemplateOnlyController as Controller>::Actions::default();
        let rouple = dispatch(&DefaultRouteDispatcher::new(), &actions.get(), &RouteValues::new());

        assert_eq!(rouple.route_name(), "API Default");
        assert_eq!(rouple.route_values(), &values(&[("action", "get")]));
    }

    #[test]
    fn test_dispatch_leaves_input_untouched() {
        let actions = <RouteAttributeController as Controller>::Actions::default();
        let input = values(&[("id", "1")]);
        let snapshot = input.clone();
        let _ = dispatch(&DefaultRouteDispatcher::new(), &actions.get_by_id(1), &input);
        assert_eq!(input, snapshot);
    }
}
