//! Named route table for Hyprlinkr.
//!
//! This crate is the routing engine that link generation and link parsing
//! are built on. It keeps a table of named routes, each with a template such
//! as `api/{controller}/{id}`, per-parameter defaults and regular-expression
//! constraints, and implements both directions of routing:
//!
//! - **Inbound**: [`RouteTable::route_data`] matches a path against the
//!   table and yields the captured [`RouteValues`].
//! - **Outbound**: [`RouteTable::virtual_path`] expands a named route with a
//!   set of values into a relative path. Values the template does not use
//!   become the query string.
//!
//! # Example
//!
//! ```rust
//! use hyprlinkr_router::{Route, RouteTable, RouteValues};
//!
//! let mut table = RouteTable::new();
//! table
//!     .insert(
//!         Route::builder("API Default", "api/{controller}/{id}")
//!             .optional("id")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! // Outbound
//! let values: RouteValues = [("controller", "foo"), ("ploeh", "5")].into_iter().collect();
//! let path = table.virtual_path("API Default", &values).unwrap();
//! assert_eq!(path.path, "api/foo?ploeh=5");
//!
//! // Inbound
//! let data = table.route_data("/api/foo/42").unwrap();
//! assert_eq!(data.values.get("controller"), Some("foo"));
//! assert_eq!(data.values.get("id"), Some("42"));
//! ```

mod error;
mod route;
mod table;
mod template;
mod values;

pub use error::{RouteError, RouteResult};
pub use route::{Constraint, Route, RouteBuilder, RouteDefault};
pub use table::{RouteData, RouteTable, VirtualPath};
pub use template::{RouteTemplate, Segment};
pub use values::RouteValues;
