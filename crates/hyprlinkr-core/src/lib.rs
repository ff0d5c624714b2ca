//! # Hyprlinkr Core
//!
//! Core types for Hyprlinkr, the typed hypermedia link library.
//!
//! This crate provides the types shared by link generation and link parsing:
//!
//! - [`ControllerDescriptor`] / [`ActionMethod`] - Static controller and action metadata
//! - [`Controller`] - Trait implemented by `#[controller]`
//! - [`Expression`] / [`Arg`] - Typed call expressions and their arguments
//! - [`MethodEquality`] - Strategy for comparing action identities
//! - [`ControllerRegistry`] / [`ApiConfiguration`] / [`Request`] - The request model
//! - [`ActionContext`] - A URI resolved back into an action
//! - [`LinkError`] - Standard error type

#![doc(html_root_url = "https://docs.rs/hyprlinkr-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod descriptor;
mod error;
mod expression;
mod registry;
mod request;

pub use context::ActionContext;
pub use descriptor::{
    controller_name, verb_for, ActionMethod, ControllerDescriptor, DeclaringSemantics,
    MethodEquality, MethodIdentity, ParameterDescriptor, ParameterKind, ReflectedSemantics,
    RouteAttribute,
};
pub use error::{ErrorKind, LinkError, LinkResult};
pub use expression::{Arg, ArgExpr, ArgSource, Controller, Expression, MethodCall};
pub use registry::ControllerRegistry;
pub use request::{ApiConfiguration, Request};

pub use hyprlinkr_router as router;
