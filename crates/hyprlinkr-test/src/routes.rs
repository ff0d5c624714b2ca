//! Fixture route table and API configuration.

use std::sync::Arc;

use hyprlinkr_core::{ApiConfiguration, ControllerRegistry};
use hyprlinkr_router::{Route, RouteDefault, RouteTable};

use crate::controllers::{
    ActionRouteController, BarController, BaseController, DerivedController, FooController,
    ModelController, NoGetActionController, NoRouteController, RouteAttributeController,
    TemplateOnlyController,
};

/// Returns the fixture route table.
///
/// | Name | Template | Defaults |
/// |------|----------|----------|
/// | `CustomRoute` | `custom/{id}` | `controller=actionroute`, `action=get_by_id` |
/// | `Unused Route` | `unused/{slug}` | `controller=noroute` |
/// | `Controller Route` | `routes/{controller}/{id}` | |
/// | `API Default` | `api/{controller}/{id}` | `id` optional |
pub fn route_table() -> RouteTable {
    let mut routes = RouteTable::new();
    routes
        .map_route(
            "CustomRoute",
            "custom/{id}",
            [
                ("controller", RouteDefault::value("actionroute")),
                ("action", RouteDefault::value("get_by_id")),
            ],
            [("id", r"\d+")],
        )
        .and_then(|routes| {
            routes.map_route(
                "Unused Route",
                "unused/{slug}",
                [("controller", RouteDefault::value("noroute"))],
                no_constraints(),
            )
        })
        .and_then(|routes| {
            routes.insert(Route::builder("Controller Route", "routes/{controller}/{id}").build()?)
        })
        .and_then(|routes| {
            routes.insert(
                Route::builder("API Default", "api/{controller}/{id}")
                    .optional("id")
                    .build()?,
            )
        })
        .expect("fixture routes are valid");
    routes
}

fn no_constraints() -> [(&'static str, &'static str); 0] {
    []
}

/// Returns a registry holding every fixture controller.
pub fn registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry
        .register::<FooController>()
        .register::<BarController>()
        .register::<ModelController>()
        .register::<RouteAttributeController>()
        .register::<ActionRouteController>()
        .register::<TemplateOnlyController>()
        .register::<NoRouteController>()
        .register::<NoGetActionController>()
        .register::<BaseController>()
        .register::<DerivedController>();
    registry
}

/// Returns the fixture API configuration.
pub fn configuration() -> Arc<ApiConfiguration> {
    Arc::new(ApiConfiguration::new(route_table(), registry()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_order() {
        let names: Vec<_> = route_table().iter().map(|route| route.name().to_string()).collect();
        assert_eq!(
            names,
            ["CustomRoute", "Unused Route", "Controller Route", "API Default"]
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 10);
        assert!(registry.get("foo").is_some());
        assert!(registry.get("routeattribute").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_custom_route_defaults() {
        let data = route_table().route_data("/custom/3").unwrap();
        assert_eq!(data.route_name, "CustomRoute");
        assert_eq!(data.values.get("controller"), Some("actionroute"));
        assert_eq!(data.values.get("action"), Some("get_by_id"));
    }
}
