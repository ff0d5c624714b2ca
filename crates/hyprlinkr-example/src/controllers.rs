//! Controllers of the example service.

#![allow(missing_docs)]

use hyprlinkr::controller;

/// Entry point of the API.
#[derive(Debug, Default)]
pub struct HomeController;

#[controller]
impl HomeController {
    #[route(name = "Home")]
    pub fn get(&self) -> &'static str {
        "home"
    }
}

/// Order collection and items.
#[derive(Debug, Default)]
pub struct OrdersController;

#[controller]
impl OrdersController {
    pub fn get_page(&self, #[optional(default = "1")] page: u32) -> u32 {
        page
    }

    pub fn get_by_id(&self, id: u32) -> u32 {
        id
    }
}

/// Catalogue search.
#[derive(Debug, Default)]
pub struct SearchController;

#[controller]
impl SearchController {
    pub fn get(&self, term: &str, category: Option<&str>) -> String {
        format!("{term} {}", category.unwrap_or_default())
    }
}
