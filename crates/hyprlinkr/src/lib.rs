//! # Hyprlinkr
//!
//! Typed hypermedia link generation for REST APIs.
//!
//! Hyprlinkr builds absolute URIs to controller actions from typed calls, so
//! that links in resource representations follow the route table instead of
//! hand-assembled strings. It also works the other way round: a URI received
//! from a client can be parsed back into the action it addresses and checked
//! against an expected call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hyprlinkr::prelude::*;
//!
//! pub struct FooController;
//!
//! #[controller]
//! impl FooController {
//!     pub fn get_by_id(&self, id: i32) -> Foo { /* ... */ }
//! }
//!
//! let linker = RouteLinker::new(request);
//! let uri = linker.get_uri::<FooController, _>(|c| c.get_by_id(42))?;
//! assert_eq!(uri.to_string(), "http://localhost/api/foo/42");
//!
//! let parser = ResourceLinkParser::new(configuration);
//! let context = parser.parse(&uri)?;
//! assert!(parser.verify::<FooController, _>(&context, |c| c.get_by_id(Arg::any())));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! typed call → MethodCall → RouteValuesQuery → RouteDispatcher → RouteTable → URI
//!                                                                    ↓
//! ActionContext ← action selection + binding ← route match ←─────── URI
//! ```
//!
//! Crates using `#[controller]` must also depend on `hyprlinkr-core`, which
//! the generated code refers to.

#![doc(html_root_url = "https://docs.rs/hyprlinkr/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatch;
mod ext;
mod linker;
mod parser;
mod query;
mod rouple;

pub use dispatch::{DefaultRouteDispatcher, RouteDispatcher, DEFAULT_ROUTE_NAME};
pub use ext::RequestLinkExt;
pub use linker::RouteLinker;
pub use parser::{ActionVerifier, ResourceLinkParser};
pub use query::{
    scalar_string, DefaultRouteValuesQuery, FlattenComplex, ParameterValues, RouteValuesQuery,
    ScalarRouteValuesQuery, ScalarValues,
};
pub use rouple::Rouple;

// Re-export core types
pub use hyprlinkr_core as core;

// Re-export router types
pub use hyprlinkr_router as router;

// Re-export configuration types
pub use hyprlinkr_config as config;

// Re-export the controller attribute macro
pub use hyprlinkr_macros::controller;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use hyprlinkr::prelude::*;
/// ```
pub mod prelude {
    pub use hyprlinkr_core::{
        ActionContext, ApiConfiguration, Arg, Controller, ControllerRegistry, ErrorKind,
        Expression, LinkError, LinkResult, Request,
    };

    pub use hyprlinkr_router::{Route, RouteDefault, RouteTable, RouteValues};

    pub use hyprlinkr_macros::controller;

    pub use crate::{
        ActionVerifier, DefaultRouteDispatcher, RequestLinkExt, ResourceLinkParser, RouteDispatcher,
        RouteLinker, RouteValuesQuery,
    };
}
