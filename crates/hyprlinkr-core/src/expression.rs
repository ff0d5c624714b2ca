//! Typed call expressions.
//!
//! A call expression records "invoke action M on controller C with these
//! arguments" without running the action. Expressions are produced by the
//! recorder type that `#[controller]` generates for each controller:
//!
//! ```ignore
//! let expression = FooControllerActions::default().get_by_id(42);
//! let call = expression.method_call()?;
//! ```
//!
//! Each argument is an [`Arg`]: a value, a deferred closure evaluated only
//! when route values are extracted, or the [`Arg::any`] wildcard used in
//! verification.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::descriptor::{ActionMethod, ControllerDescriptor, ParameterDescriptor};
use crate::error::{LinkError, LinkResult};

/// A controller type known to Hyprlinkr.
///
/// Implemented by the `#[controller]` attribute.
pub trait Controller: 'static {
    /// The call recorder for this controller's actions.
    type Actions: Default;

    /// Returns the controller's static metadata.
    fn descriptor() -> &'static ControllerDescriptor;
}

type Evaluate = Arc<dyn Fn() -> LinkResult<Value> + Send + Sync>;

/// A typed argument sub-expression.
///
/// # Example
///
/// ```
/// use hyprlinkr_core::Arg;
/// use serde_json::Value;
///
/// let value: Arg<i32> = 42.into();
/// assert_eq!(value.erase().evaluate().unwrap(), Value::from(42));
///
/// let deferred = Arg::from_fn(|| 6 * 7);
/// assert_eq!(deferred.erase().evaluate().unwrap(), Value::from(42));
///
/// let any = Arg::<i32>::any().erase();
/// assert!(any.is_any());
/// ```
pub struct Arg<T> {
    expr: ArgExpr,
    _type: PhantomData<fn() -> T>,
}

impl<T: Serialize + Send + Sync + 'static> Arg<T> {
    /// Creates an argument from a concrete value.
    pub fn value(value: T) -> Self {
        let value = Arc::new(value);
        Self::wrap(ArgSource::Value, Arc::new(move || to_json(&*value)))
    }

    /// Creates an argument evaluated on demand.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::wrap(ArgSource::Deferred, Arc::new(move || to_json(&f())))
    }

    fn wrap(source: ArgSource, evaluate: Evaluate) -> Self {
        Self {
            expr: ArgExpr { source, evaluate },
            _type: PhantomData,
        }
    }

    /// Erases the argument's type.
    #[must_use]
    pub fn erase(self) -> ArgExpr {
        self.expr
    }
}

impl<T: Serialize + Default + Send + Sync + 'static> Arg<T> {
    /// Creates a wildcard argument.
    ///
    /// During verification it matches any bound value. When evaluated it
    /// yields `T::default()`.
    #[must_use]
    pub fn any() -> Self {
        Self::wrap(ArgSource::Any, Arc::new(|| to_json(&T::default())))
    }
}

impl<T: Serialize + Send + Sync + 'static> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Self::value(value)
    }
}

impl From<&str> for Arg<String> {
    fn from(value: &str) -> Self {
        Self::value(value.to_string())
    }
}

impl From<&str> for Arg<Option<String>> {
    fn from(value: &str) -> Self {
        Self::value(Some(value.to_string()))
    }
}

impl<T> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Arg").field(&self.expr).finish()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> LinkResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| LinkError::invalid_argument(format!("argument cannot be evaluated: {e}")))
}

/// Where an argument's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSource {
    /// A value supplied directly.
    Value,
    /// A closure evaluated on demand.
    Deferred,
    /// The wildcard.
    Any,
}

/// A type-erased argument sub-expression.
#[derive(Clone)]
pub struct ArgExpr {
    source: ArgSource,
    evaluate: Evaluate,
}

impl ArgExpr {
    /// Evaluates the argument to a JSON value.
    pub fn evaluate(&self) -> LinkResult<Value> {
        (self.evaluate)()
    }

    /// Returns where the value comes from.
    #[must_use]
    pub const fn source(&self) -> ArgSource {
        self.source
    }

    /// Returns true for the wildcard.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.source == ArgSource::Any
    }
}

impl fmt::Debug for ArgExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgExpr")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// The body of a link expression.
///
/// Only [`Expression::Call`] describes an action; every other shape is
/// rejected by [`Expression::method_call`].
#[derive(Debug, Clone)]
pub enum Expression {
    /// A call to an action.
    Call {
        /// The controller the call was recorded on.
        receiver: &'static ControllerDescriptor,
        /// The action name.
        action: &'static str,
        /// Positional arguments.
        arguments: Vec<ArgExpr>,
    },
    /// Construction of a value.
    New {
        /// The constructed type.
        type_name: &'static str,
    },
    /// Access to a field or property.
    Member {
        /// The owning type.
        type_name: &'static str,
        /// The member name.
        member: &'static str,
    },
    /// A constant value.
    Constant(Value),
}

impl Expression {
    /// Creates a call expression.
    #[must_use]
    pub fn call(
        receiver: &'static ControllerDescriptor,
        action: &'static str,
        arguments: Vec<ArgExpr>,
    ) -> Self {
        Self::Call {
            receiver,
            action,
            arguments,
        }
    }

    /// Creates an expression that constructs a `T`.
    #[must_use]
    pub fn new_object<T>() -> Self {
        Self::New {
            type_name: short_type_name::<T>(),
        }
    }

    /// Returns a short description of the expression's shape.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Call {
                receiver, action, ..
            } => format!("{}::{}(..)", receiver.type_name(), action),
            Self::New { type_name } => format!("new {type_name}"),
            Self::Member { type_name, member } => format!("{type_name}.{member}"),
            Self::Constant(value) => value.to_string(),
        }
    }

    /// Extracts the method call this expression describes.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the expression is not a call,
    /// names an action the receiver does not have, or supplies a different
    /// number of arguments than the action declares.
    pub fn method_call(&self) -> LinkResult<MethodCall<'_>> {
        let Self::Call {
            receiver,
            action,
            arguments,
        } = self
        else {
            return Err(LinkError::invalid_argument(format!(
                "expression '{}' is not a method call expression",
                self.describe()
            )));
        };
        let receiver: &'static ControllerDescriptor = *receiver;

        let method = receiver.action_named(action).ok_or_else(|| {
            LinkError::invalid_argument(format!(
                "'{}' is not an action of {}",
                action,
                receiver.type_name()
            ))
        })?;

        MethodCall::new(receiver, method, arguments)
    }

    /// Extracts the method call, reached through `receiver` instead of the
    /// controller the call was recorded on.
    ///
    /// The recorded action must be one `receiver` has, either declared or
    /// inherited.
    pub fn method_call_on(
        &self,
        receiver: &'static ControllerDescriptor,
    ) -> LinkResult<MethodCall<'_>> {
        let recorded = self.method_call()?;
        let action = recorded.action();
        let method = receiver
            .find_action(action.declaring_type_id(), action.name())
            .ok_or_else(|| {
                LinkError::invalid_argument(format!(
                    "{}::{} is not an action of {}",
                    action.declaring_type(),
                    action.name(),
                    receiver.type_name()
                ))
            })?;

        MethodCall::new(receiver, method, recorded.arguments)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// A method call extracted from an [`Expression`].
#[derive(Debug, Clone)]
pub struct MethodCall<'a> {
    controller: &'static ControllerDescriptor,
    action: &'static ActionMethod,
    arguments: &'a [ArgExpr],
}

impl<'a> MethodCall<'a> {
    fn new(
        controller: &'static ControllerDescriptor,
        action: &'static ActionMethod,
        arguments: &'a [ArgExpr],
    ) -> LinkResult<Self> {
        if arguments.len() != action.parameters().len() {
            return Err(LinkError::invalid_argument(format!(
                "{}::{} takes {} arguments but {} were supplied",
                controller.type_name(),
                action.name(),
                action.parameters().len(),
                arguments.len()
            )));
        }

        Ok(Self {
            controller,
            action,
            arguments,
        })
    }

    /// Returns the controller the action is invoked on.
    #[must_use]
    pub const fn controller(&self) -> &'static ControllerDescriptor {
        self.controller
    }

    /// Returns the invoked action.
    #[must_use]
    pub const fn action(&self) -> &'static ActionMethod {
        self.action
    }

    /// Returns each formal parameter with its argument sub-expression.
    pub fn arguments(
        &self,
    ) -> impl Iterator<Item = (&'static ParameterDescriptor, &'a ArgExpr)> + '_ {
        self.action.parameters().iter().zip(self.arguments.iter())
    }
}
