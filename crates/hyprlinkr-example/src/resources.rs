//! Resource representations.

use hyprlinkr::{RequestLinkExt, RouteLinker};
use hyprlinkr_core::{LinkResult, Request};
use serde::Serialize;

use crate::controllers::{HomeController, OrdersController, SearchController};

/// An Atom-style link.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AtomLink {
    pub rel: String,
    pub href: String,
}

impl AtomLink {
    fn new(rel: &str, href: impl ToString) -> Self {
        Self {
            rel: rel.to_string(),
            href: href.to_string(),
        }
    }
}

/// The home resource: a name and links to everything reachable from it.
#[derive(Debug, Clone, Serialize)]
pub struct HomeResource {
    pub name: String,
    pub links: Vec<AtomLink>,
}

impl HomeResource {
    /// Builds the home resource for `request`.
    pub fn for_request(request: &Request, linker: &RouteLinker) -> LinkResult<Self> {
        let links = vec![
            AtomLink::new("self", request.link::<HomeController, _>(|c| c.get())?),
            AtomLink::new(
                "orders",
                linker.get_uri::<OrdersController, _>(|c| c.get_page(1))?,
            ),
            AtomLink::new(
                "next",
                linker.get_uri::<OrdersController, _>(|c| c.get_page(2))?,
            ),
            AtomLink::new(
                "latest-order",
                linker.get_uri::<OrdersController, _>(|c| c.get_by_id(1337))?,
            ),
            AtomLink::new(
                "search",
                linker.get_uri::<SearchController, _>(|c| c.get("rust book", None))?,
            ),
        ];

        Ok(Self {
            name: "Hyprlinkr example".to_string(),
            links,
        })
    }
}
