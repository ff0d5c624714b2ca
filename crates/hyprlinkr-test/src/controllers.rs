//! Fixture controllers.
//!
//! Every controller here is registered by
//! [`registry()`](crate::registry) and reachable through
//! [`route_table()`](crate::route_table).

#![allow(missing_docs)]

use hyprlinkr_macros::controller;
use serde::{Deserialize, Serialize};

/// Plain controller served by the default route.
#[derive(Debug, Default)]
pub struct FooController;

#[controller]
impl FooController {
    pub fn get(&self) -> String {
        "foo".to_string()
    }

    pub fn get_by_id(&self, id: i32) -> String {
        format!("foo {id}")
    }

    pub fn get_with_ploeh_and_fnaah(&self, ploeh: i32, fnaah: Option<&str>) -> String {
        format!("{ploeh} {}", fnaah.unwrap_or_default())
    }
}

/// Controller with an asynchronous action and a defaulted parameter.
#[derive(Debug, Default)]
pub struct BarController;

#[controller]
impl BarController {
    pub fn get_page(&self, #[optional(default = "1")] page: u32) -> u32 {
        page
    }

    pub async fn get_async(&self, id: i32) -> String {
        format!("bar {id}")
    }
}

/// Query model bound from query string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryModel {
    /// Search term.
    pub term: String,
    /// Page number.
    pub page: u32,
    /// Optional filter.
    pub filter: Option<String>,
}

/// Controller whose action takes a complex parameter.
#[derive(Debug, Default)]
pub struct ModelController;

#[controller]
impl ModelController {
    pub fn get(&self, query: QueryModel) -> String {
        query.term
    }

    pub fn search(&self, query: QueryModel, page: u32) -> String {
        format!("{} {page}", query.term)
    }
}

/// Controller with a route attribute naming `Controller Route`.
#[derive(Debug, Default)]
pub struct RouteAttributeController;

#[controller(route = "routes/{controller}/{id}", route_name = "Controller Route")]
impl RouteAttributeController {
    pub fn get_by_id(&self, id: i32) -> i32 {
        id
    }
}

/// Controller whose action names `CustomRoute`.
#[derive(Debug, Default)]
pub struct ActionRouteController;

#[controller]
impl ActionRouteController {
    #[route(name = "CustomRoute")]
    pub fn get_by_id(&self, id: i32) -> i32 {
        id
    }
}

/// Controller whose route template has no `{controller}` placeholder.
#[derive(Debug, Default)]
pub struct TemplateOnlyController;

#[controller(route = "api/{action}")]
impl TemplateOnlyController {
    pub fn get(&self) {}
}

/// Controller whose action names a route its values cannot expand.
#[derive(Debug, Default)]
pub struct NoRouteController;

#[controller]
impl NoRouteController {
    #[route(name = "Unused Route")]
    pub fn get_by_id(&self, id: i32) -> i32 {
        id
    }
}

/// Controller without GET actions.
#[derive(Debug, Default)]
pub struct NoGetActionController;

#[controller]
impl NoGetActionController {
    pub fn post(&self, id: i32) -> i32 {
        id
    }

    pub fn create(&self) {}
}

/// Base controller.
#[derive(Debug, Default)]
pub struct BaseController;

#[controller]
impl BaseController {
    pub fn get(&self, id: i32) -> i32 {
        id
    }
}

/// Controller inheriting every action of [`BaseController`].
#[derive(Debug, Default)]
pub struct DerivedController;

#[controller(inherit = BaseController)]
impl DerivedController {}
