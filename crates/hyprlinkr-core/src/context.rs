//! Action contexts.
//!
//! An [`ActionContext`] is what a parsed URI resolves to: the controller, the
//! selected action and the arguments bound from the route and query.

use std::fmt;

use hyprlinkr_router::RouteData;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::descriptor::{ActionMethod, ControllerDescriptor, MethodIdentity};

/// A resolved controller action with bound arguments.
///
/// Two contexts are equal when they name the same controller type and
/// action and carry the same set of arguments, in any order.
#[derive(Clone)]
pub struct ActionContext {
    controller: &'static ControllerDescriptor,
    action: &'static ActionMethod,
    arguments: IndexMap<String, Value>,
    route_data: RouteData,
}

impl ActionContext {
    /// Creates an action context.
    #[must_use]
    pub fn new(
        controller: &'static ControllerDescriptor,
        action: &'static ActionMethod,
        arguments: IndexMap<String, Value>,
        route_data: RouteData,
    ) -> Self {
        Self {
            controller,
            action,
            arguments,
            route_data,
        }
    }

    /// Returns the controller.
    #[must_use]
    pub const fn controller(&self) -> &'static ControllerDescriptor {
        self.controller
    }

    /// Returns the action.
    #[must_use]
    pub const fn action(&self) -> &'static ActionMethod {
        self.action
    }

    /// Returns the action's identity as reached through the controller.
    #[must_use]
    pub fn identity(&self) -> MethodIdentity {
        self.action.identity(self.controller.type_id())
    }

    /// Returns the bound arguments by parameter name.
    #[must_use]
    pub const fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }

    /// Consumes the context, returning the bound arguments.
    #[must_use]
    pub fn into_arguments(self) -> IndexMap<String, Value> {
        self.arguments
    }

    /// Returns the argument `name` converted to `T`.
    ///
    /// Returns `None` if there is no such argument or it does not convert.
    #[must_use]
    pub fn argument<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.arguments
            .get(name)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Returns the route data the context was resolved from.
    #[must_use]
    pub const fn route_data(&self) -> &RouteData {
        &self.route_data
    }
}

impl PartialEq for ActionContext {
    fn eq(&self, other: &Self) -> bool {
        self.controller.type_id() == other.controller.type_id()
            && self.action.name() == other.action.name()
            && self.arguments == other.arguments
    }
}

impl fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("controller", &self.controller.type_name())
            .field("action", &self.action.name())
            .field("arguments", &self.arguments)
            .field("route_name", &self.route_data.route_name)
            .finish()
    }
}
