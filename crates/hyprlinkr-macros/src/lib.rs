//! Procedural macros for Hyprlinkr controllers.
//!
//! This crate provides the `#[controller]` attribute, which turns an inherent
//! `impl` block into a controller Hyprlinkr can build links to and parse
//! links back into.
//!
//! # Example
//!
//! ```rust,ignore
//! use hyprlinkr_macros::controller;
//!
//! pub struct FooController;
//!
//! #[controller]
//! impl FooController {
//!     pub fn get_by_id(&self, id: i32) -> String {
//!         format!("foo {id}")
//!     }
//! }
//!
//! let expression = FooControllerActions::default().get_by_id(42);
//! ```
//!
//! # Macro Expansion
//!
//! The `#[controller]` macro:
//!
//! 1. Re-emits the `impl` block with the helper attributes removed
//! 2. Generates `<Type>Actions`, a call recorder with one method per action
//!    that returns an `Expression` instead of running the action
//! 3. Implements `hyprlinkr_core::Controller`, whose descriptor lists the
//!    actions, their parameters and route attributes
//!
//! Generated code refers to `::hyprlinkr_core`, so crates using the macro
//! depend on `hyprlinkr-core` directly.

mod controller;
mod parse;

use proc_macro::TokenStream;

/// Marks an inherent `impl` block as a controller.
///
/// Every `pub fn` taking `&self` is an action unless it is marked
/// `#[non_action]`.
///
/// # Attributes
///
/// - `route`: controller route template (optional)
/// - `route_name`: controller route name (optional)
/// - `inherit`: base controller whose actions this controller inherits
///   (optional); the recorder derefs to the base recorder
///
/// # Helper Attributes
///
/// - `#[route("template", name = "...")]` on an action: action route
/// - `#[optional(default = "...")]` on a parameter: default used when a
///   parsed link does not supply the parameter
/// - `#[non_action]` on a method: not an action
///
/// # Example
///
/// ```rust,ignore
/// #[controller(route = "api/{controller}/{id}", route_name = "Custom")]
/// impl RouteAttributeController {
///     #[route(name = "CustomRoute")]
///     pub fn get(&self) -> String {
///         String::new()
///     }
///
///     pub fn get_page(&self, #[optional(default = "1")] page: u32) -> String {
///         page.to_string()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::expand_controller(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
