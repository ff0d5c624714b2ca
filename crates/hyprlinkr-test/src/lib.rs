//! # Hyprlinkr Test
//!
//! Fixtures for testing Hyprlinkr: a set of controllers covering every
//! dispatch and binding rule, the route table they are served from, and
//! helpers for building in-flight requests.
//!
//! ## Example
//!
//! ```ignore
//! use hyprlinkr::RouteLinker;
//! use hyprlinkr_test::{controllers::FooController, request};
//!
//! let linker = RouteLinker::new(request("http://localhost/api/foo"));
//! let uri = linker.get_uri::<FooController, _>(|c| c.get_by_id(42)).unwrap();
//! assert_eq!(uri.to_string(), "http://localhost/api/foo/42");
//! ```

#![doc(html_root_url = "https://docs.rs/hyprlinkr-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod controllers;
mod error;
mod request;
mod routes;

pub use error::TestError;
pub use request::{request, unrouted_request, TestRequest};
pub use routes::{configuration, registry, route_table};
