//! Controller and action descriptors.
//!
//! Descriptors are the static metadata the `#[controller]` attribute records
//! for a controller type: its actions, their parameters, and any route
//! attributes. Link generation reads them to build route values and pick a
//! route; link parsing reads them to select an action and bind arguments.

use std::any::TypeId;

use http::Method;
use serde_json::Value;

/// How a parameter's value is represented in a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Signed or unsigned integer.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean.
    Boolean,
    /// String or character.
    Text,
    /// Any other type; carried as JSON.
    Complex,
}

impl ParameterKind {
    /// Returns true for kinds that bind from a single route or query value.
    #[must_use]
    pub const fn is_simple(self) -> bool {
        !matches!(self, Self::Complex)
    }

    /// Converts a raw route or query value into a JSON value of this kind.
    ///
    /// Returns `None` if the text is not a valid value of this kind.
    /// Complex values are read as JSON, falling back to a JSON string.
    #[must_use]
    pub fn parse(self, raw: &str) -> Option<Value> {
        match self {
            Self::Integer => raw
                .parse::<i64>()
                .map(Value::from)
                .or_else(|_| raw.parse::<u64>().map(Value::from))
                .ok(),
            Self::Float => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            Self::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            Self::Text => Some(Value::String(raw.to_string())),
            Self::Complex => Some(
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
            ),
        }
    }
}

/// A formal parameter of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: &'static str,
    type_name: &'static str,
    kind: ParameterKind,
    nullable: bool,
    default: Option<&'static str>,
}

impl ParameterDescriptor {
    /// Creates a required parameter.
    #[must_use]
    pub const fn new(name: &'static str, type_name: &'static str, kind: ParameterKind) -> Self {
        Self {
            name,
            type_name,
            kind,
            nullable: false,
            default: None,
        }
    }

    /// Marks the parameter as nullable (`Option<T>`).
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Gives the parameter a default, which makes it optional.
    #[must_use]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared type as written in source.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Returns true if the parameter accepts null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns true if the parameter has a default.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Converts a raw route or query value for this parameter.
    ///
    /// Like [`ParameterKind::parse`], but integers must also fit the
    /// declared type: `-1` is not a `u32`, `2^31` is not an `i32`.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<Value> {
        let value = self.kind.parse(raw)?;
        if self.kind == ParameterKind::Integer && !integer_fits(self.type_name, &value) {
            return None;
        }
        Some(value)
    }

    /// Returns the default converted by [`parse`](Self::parse).
    #[must_use]
    pub fn default_value(&self) -> Option<Value> {
        self.default.and_then(|raw| self.parse(raw))
    }
}

/// Whether an integer value is within the range of the primitive named by
/// `type_name` (`Option<..>` unwrapped). Unknown names accept any integer.
fn integer_fits(type_name: &str, value: &Value) -> bool {
    let primitive = type_name
        .strip_prefix("Option<")
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(type_name);
    let range: (i128, i128) = match primitive {
        "i8" => (i8::MIN.into(), i8::MAX.into()),
        "i16" => (i16::MIN.into(), i16::MAX.into()),
        "i32" => (i32::MIN.into(), i32::MAX.into()),
        "i64" | "isize" => (i64::MIN.into(), i64::MAX.into()),
        "u8" => (0, u8::MAX.into()),
        "u16" => (0, u16::MAX.into()),
        "u32" => (0, u32::MAX.into()),
        "u64" | "usize" => (0, u64::MAX.into()),
        _ => return true,
    };
    let Some(n) = value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
    else {
        return false;
    };
    (range.0..=range.1).contains(&n)
}

/// Route metadata attached to a controller or an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteAttribute {
    template: Option<&'static str>,
    name: Option<&'static str>,
}

impl RouteAttribute {
    /// Creates an empty route attribute.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            template: None,
            name: None,
        }
    }

    /// Sets the route template.
    #[must_use]
    pub const fn with_template(mut self, template: &'static str) -> Self {
        self.template = Some(template);
        self
    }

    /// Sets the route name.
    #[must_use]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Returns the route template.
    #[must_use]
    pub const fn template(&self) -> Option<&'static str> {
        self.template
    }

    /// Returns the route name.
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Returns true if the template contains the `{placeholder}` placeholder.
    ///
    /// An attribute without a template mentions every placeholder.
    #[must_use]
    pub fn mentions(&self, placeholder: &str) -> bool {
        self.template.map_or(true, |template| {
            template
                .to_ascii_lowercase()
                .contains(&format!("{{{}}}", placeholder.to_ascii_lowercase()))
        })
    }
}

/// Derives the HTTP verb an action responds to from its name.
///
/// Names starting with a verb (`get_by_id`, `post`, `delete_all`) respond to
/// that verb; anything else responds to POST.
#[must_use]
pub fn verb_for(action_name: &str) -> Method {
    const VERBS: [(&str, Method); 7] = [
        ("get", Method::GET),
        ("post", Method::POST),
        ("put", Method::PUT),
        ("delete", Method::DELETE),
        ("patch", Method::PATCH),
        ("head", Method::HEAD),
        ("options", Method::OPTIONS),
    ];

    let lower = action_name.to_ascii_lowercase();
    VERBS
        .into_iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map_or(Method::POST, |(_, verb)| verb)
}

/// An action method on a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMethod {
    declaring_type: &'static str,
    declaring_type_id: TypeId,
    name: &'static str,
    parameters: Vec<ParameterDescriptor>,
    route: Option<RouteAttribute>,
    is_async: bool,
    verb: Method,
}

impl ActionMethod {
    /// Creates an action `name` declared by `D`.
    #[must_use]
    pub fn new<D: 'static>(declaring_type: &'static str, name: &'static str) -> Self {
        Self {
            declaring_type,
            declaring_type_id: TypeId::of::<D>(),
            name,
            parameters: Vec::new(),
            route: None,
            is_async: false,
            verb: verb_for(name),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Attaches an action route attribute.
    #[must_use]
    pub fn route(mut self, route: RouteAttribute) -> Self {
        self.route = Some(route);
        self
    }

    /// Marks the action as returning a future.
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Returns the declaring type's name.
    #[must_use]
    pub const fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    /// Returns the declaring type's id.
    #[must_use]
    pub const fn declaring_type_id(&self) -> TypeId {
        self.declaring_type_id
    }

    /// Returns the action name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the formal parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Returns the action route attribute.
    #[must_use]
    pub const fn route_attribute(&self) -> Option<&RouteAttribute> {
        self.route.as_ref()
    }

    /// Returns true if the action returns a future.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.is_async
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub const fn http_method(&self) -> &Method {
        &self.verb
    }

    /// Returns the parameter type names in declaration order.
    pub fn signature(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parameters.iter().map(ParameterDescriptor::type_name)
    }

    /// Returns this action's identity when reached through `reflected_type`.
    #[must_use]
    pub fn identity(&self, reflected_type: TypeId) -> MethodIdentity {
        MethodIdentity {
            reflected_type,
            declaring_type: self.declaring_type_id,
            name: self.name,
            signature: self.signature().collect(),
        }
    }
}

/// Static metadata for a controller type.
#[derive(Debug, Clone)]
pub struct ControllerDescriptor {
    type_name: &'static str,
    type_id: TypeId,
    route: Option<RouteAttribute>,
    actions: Vec<ActionMethod>,
}

impl ControllerDescriptor {
    /// Creates a descriptor for `C` without actions.
    #[must_use]
    pub fn new<C: 'static>(type_name: &'static str) -> Self {
        Self {
            type_name,
            type_id: TypeId::of::<C>(),
            route: None,
            actions: Vec::new(),
        }
    }

    /// Attaches a controller route attribute.
    #[must_use]
    pub fn route(mut self, route: RouteAttribute) -> Self {
        self.route = Some(route);
        self
    }

    /// Appends an action.
    #[must_use]
    pub fn action(mut self, action: ActionMethod) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends the actions of `base` that this controller does not redefine.
    ///
    /// Inherited actions keep `base` as their declaring type.
    #[must_use]
    pub fn inherit(mut self, base: &ControllerDescriptor) -> Self {
        let inherited: Vec<ActionMethod> = base
            .actions
            .iter()
            .filter(|action| self.actions.iter().all(|own| own.name != action.name))
            .cloned()
            .collect();
        self.actions.extend(inherited);
        if self.route.is_none() {
            self.route.clone_from(&base.route);
        }
        self
    }

    /// Returns the type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the type id.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the controller name used in routes.
    ///
    /// The type name in ASCII lower case, with one trailing `controller`
    /// removed: `FooController` becomes `foo`.
    #[must_use]
    pub fn controller_name(&self) -> String {
        controller_name(self.type_name)
    }

    /// Returns the controller route attribute.
    #[must_use]
    pub const fn route_attribute(&self) -> Option<&RouteAttribute> {
        self.route.as_ref()
    }

    /// Returns all actions, own actions first.
    #[must_use]
    pub fn actions(&self) -> &[ActionMethod] {
        &self.actions
    }

    /// Returns the action named exactly `name`.
    #[must_use]
    pub fn action_named(&self, name: &str) -> Option<&ActionMethod> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// Returns the action `name` declared by `declaring_type`.
    #[must_use]
    pub fn find_action(&self, declaring_type: TypeId, name: &str) -> Option<&ActionMethod> {
        self.actions
            .iter()
            .find(|action| action.declaring_type_id == declaring_type && action.name == name)
    }
}

/// Derives a route controller name from a type name.
#[must_use]
pub fn controller_name(type_name: &str) -> String {
    let lower = type_name.to_ascii_lowercase();
    match lower.strip_suffix("controller") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lower,
    }
}

/// The identity of an action as reached through a particular controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodIdentity {
    /// The controller the action was reached through.
    pub reflected_type: TypeId,
    /// The type that declares the action.
    pub declaring_type: TypeId,
    /// The action name.
    pub name: &'static str,
    /// The parameter type names.
    pub signature: Vec<&'static str>,
}

/// Strategy for deciding whether two method identities denote the same action.
pub trait MethodEquality: Send + Sync {
    /// Returns true if `left` and `right` denote the same action.
    fn equals(&self, left: &MethodIdentity, right: &MethodIdentity) -> bool;
}

/// Compares declaring type, name and signature; ignores the reflected type.
///
/// An action declared on a base controller is the same action whether it is
/// reached through the base or through a derived controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaringSemantics;

impl MethodEquality for DeclaringSemantics {
    fn equals(&self, left: &MethodIdentity, right: &MethodIdentity) -> bool {
        left.declaring_type == right.declaring_type
            && left.name == right.name
            && left.signature == right.signature
    }
}

/// Compares every part of the identity, including the reflected type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectedSemantics;

impl MethodEquality for ReflectedSemantics {
    fn equals(&self, left: &MethodIdentity, right: &MethodIdentity) -> bool {
        left == right
    }
}
