//! Link parsing and verification.
//!
//! The inverse of [`RouteLinker`](crate::RouteLinker): a URI is matched
//! against the route table, resolved to a registered controller and one of
//! its actions, and the action's arguments are bound from the route values
//! and the query string.

use std::sync::Arc;

use http::Uri;
use hyprlinkr_core::{
    ActionContext, ActionMethod, ApiConfiguration, Controller, ControllerDescriptor,
    DeclaringSemantics, Expression, LinkError, LinkResult, MethodEquality, ParameterDescriptor,
};
use hyprlinkr_router::{RouteData, RouteValues};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

const CONTROLLER_KEY: &str = "controller";
const ACTION_KEY: &str = "action";

/// Checks an action context against an expected action call.
pub trait ActionVerifier {
    /// Returns true if `context` is a call of the action recorded by
    /// `expected` on controller `C`, with the same arguments.
    ///
    /// The controller type must match exactly. Arguments created with
    /// [`Arg::any`](hyprlinkr_core::Arg::any) match any bound value.
    fn verify<C, F>(&self, context: &ActionContext, expected: F) -> bool
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression;
}

/// Parses URIs into action contexts.
///
/// # Example
///
/// ```rust,ignore
/// let parser = ResourceLinkParser::new(configuration);
/// let context = parser.parse(&"http://localhost/api/foo/42".parse()?)?;
/// assert!(parser.verify::<FooController, _>(&context, |c| c.get_by_id(Arg::any())));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceLinkParser<E = DeclaringSemantics> {
    configuration: Arc<ApiConfiguration>,
    equality: E,
}

impl ResourceLinkParser {
    /// Creates a parser comparing actions by declaring type.
    #[must_use]
    pub fn new(configuration: Arc<ApiConfiguration>) -> Self {
        Self {
            configuration,
            equality: DeclaringSemantics,
        }
    }
}

impl<E> ResourceLinkParser<E> {
    /// Replaces the method equality strategy used by verification.
    pub fn with_equality<E2: MethodEquality>(self, equality: E2) -> ResourceLinkParser<E2> {
        ResourceLinkParser {
            configuration: self.configuration,
            equality,
        }
    }

    /// Returns the API configuration.
    #[must_use]
    pub fn configuration(&self) -> &Arc<ApiConfiguration> {
        &self.configuration
    }

    /// Parses `uri` into an action context.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if no route matches, the route names
    /// no registered controller, or no single action can be selected and
    /// bound.
    pub fn parse(&self, uri: &Uri) -> LinkResult<ActionContext> {
        let path = uri.path_and_query().map_or("/", |p| p.as_str());
        let route_data = self
            .configuration
            .routes()
            .route_data(path)
            .ok_or_else(|| {
                debug!(uri = %uri, "no route matches");
                LinkError::invalid_argument(format!("no route matches '{uri}'"))
            })?;

        let controller = self.controller(uri, &route_data)?;
        let available = available_values(uri, &route_data)?;

        let (action, arguments) = select_action(controller, &route_data, &available)
            .ok_or_else(|| {
                debug!(uri = %uri, controller = controller.type_name(), "no single action matches");
                LinkError::invalid_argument(format!(
                    "no single action of {} matches '{uri}'",
                    controller.type_name()
                ))
            })?;

        debug!(
            uri = %uri,
            route_name = %route_data.route_name,
            controller = controller.type_name(),
            action = action.name(),
            "parsed link"
        );
        Ok(ActionContext::new(controller, action, arguments, route_data))
    }

    /// Parses `uri`, returning `None` on any failure.
    #[must_use]
    pub fn try_parse(&self, uri: &Uri) -> Option<ActionContext> {
        self.parse(uri).ok()
    }

    fn controller(&self, uri: &Uri, route_data: &RouteData) -> LinkResult<&'static ControllerDescriptor> {
        let name = route_data.values.get(CONTROLLER_KEY).ok_or_else(|| {
            LinkError::invalid_argument(format!(
                "route '{}' matched '{uri}' without a controller value",
                route_data.route_name
            ))
        })?;

        self.configuration.controllers().get(name).ok_or_else(|| {
            debug!(uri = %uri, controller = name, "unknown controller");
            LinkError::invalid_argument(format!("'{name}' is not a registered controller"))
        })
    }
}

impl<E: MethodEquality> ResourceLinkParser<E> {
    /// Parses `uri` and verifies it against an expected action call,
    /// returning the bound arguments.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if parsing fails or the parsed
    /// context does not verify.
    pub fn parse_and_verify<C, F>(&self, uri: &Uri, expected: F) -> LinkResult<IndexMap<String, Value>>
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression,
    {
        let context = self.parse(uri)?;
        if !self.verify::<C, F>(&context, expected) {
            return Err(LinkError::invalid_argument(format!(
                "'{uri}' does not link to the expected action of {}",
                C::descriptor().type_name()
            )));
        }
        Ok(context.into_arguments())
    }
}

impl<E: MethodEquality> ActionVerifier for ResourceLinkParser<E> {
    fn verify<C, F>(&self, context: &ActionContext, expected: F) -> bool
    where
        C: Controller,
        F: FnOnce(&C::Actions) -> Expression,
    {
        if context.controller().type_id() != C::descriptor().type_id() {
            trace!(
                expected = C::descriptor().type_name(),
                actual = context.controller().type_name(),
                "controller mismatch"
            );
            return false;
        }

        let expression = expected(&C::Actions::default());
        let Ok(call) = expression.method_call() else {
            return false;
        };

        let expected_identity = call.action().identity(call.controller().type_id());
        if !self.equality.equals(&context.identity(), &expected_identity) {
            trace!(
                expected = call.action().name(),
                actual = context.action().name(),
                "action mismatch"
            );
            return false;
        }

        let arguments_match = call.arguments().all(|(parameter, argument)| {
            if argument.is_any() {
                return true;
            }
            let Ok(expected) = argument.evaluate() else {
                return false;
            };
            let actual = context.arguments().get(parameter.name()).unwrap_or(&Value::Null);
            let matches = *actual == expected;
            if !matches {
                trace!(parameter = parameter.name(), %expected, %actual, "argument mismatch");
            }
            matches
        });
        arguments_match
    }
}

/// Values a link offers for binding.
struct Available {
    /// Route values followed by query pairs; a later value replaces an
    /// earlier one with the same name.
    values: RouteValues,
    /// The query pairs alone.
    query: RouteValues,
}

fn available_values(uri: &Uri, route_data: &RouteData) -> LinkResult<Available> {
    let query: RouteValues = match uri.query() {
        Some(query) => serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map_err(|e| {
                LinkError::invalid_argument(format!("query string '{query}' is malformed: {e}"))
            })?
            .into_iter()
            .collect(),
        None => RouteValues::new(),
    };

    let mut values = route_data.values.clone();
    values.extend(query.iter().map(|(name, value)| (name.to_string(), value.to_string())));
    Ok(Available { values, query })
}

fn select_action(
    controller: &'static ControllerDescriptor,
    route_data: &RouteData,
    available: &Available,
) -> Option<(&'static ActionMethod, IndexMap<String, Value>)> {
    let requested = route_data.values.get(ACTION_KEY);
    let candidates = controller.actions().iter().filter(|action| match requested {
        Some(name) => action.name().eq_ignore_ascii_case(name),
        None => action.http_method() == http::Method::GET,
    });

    let mut best: Option<(usize, &'static ActionMethod, IndexMap<String, Value>)> = None;
    let mut ambiguous = false;
    for action in candidates {
        let Some(arguments) = bind(action, available) else {
            trace!(action = action.name(), "action not viable");
            continue;
        };
        let matched = action
            .parameters()
            .iter()
            .filter(|parameter| available.values.contains_key(parameter.name()))
            .count();

        match &best {
            Some((score, ..)) if matched < *score => {}
            Some((score, ..)) if matched == *score => ambiguous = true,
            _ => {
                best = Some((matched, action, arguments));
                ambiguous = false;
            }
        }
    }

    if ambiguous {
        trace!(controller = controller.type_name(), "ambiguous action selection");
        return None;
    }
    best.map(|(_, action, arguments)| (action, arguments))
}

/// Binds every parameter of `action`, or returns `None` if one cannot be
/// bound.
fn bind(action: &ActionMethod, available: &Available) -> Option<IndexMap<String, Value>> {
    let mut arguments = IndexMap::with_capacity(action.parameters().len());
    for parameter in action.parameters() {
        let value = if parameter.kind().is_simple() {
            bind_simple(parameter, &available.values)?
        } else {
            bind_complex(parameter, action, available)
        };
        arguments.insert(parameter.name().to_string(), value);
    }
    Some(arguments)
}

fn bind_simple(parameter: &ParameterDescriptor, available: &RouteValues) -> Option<Value> {
    match available.get(parameter.name()) {
        Some("") if parameter.is_nullable() => Some(Value::Null),
        Some(raw) => parameter.parse(raw),
        None => parameter
            .default_value()
            .or_else(|| parameter.is_nullable().then_some(Value::Null)),
    }
}

/// A complex parameter binds from a value named after it or, failing that,
/// from the query pairs no other parameter claims. Path values never become
/// fields.
fn bind_complex(parameter: &ParameterDescriptor, action: &ActionMethod, available: &Available) -> Value {
    if let Some(raw) = available.values.get(parameter.name()) {
        return parameter.kind().parse(raw).unwrap_or(Value::Null);
    }

    let fields: Map<String, Value> = available
        .query
        .iter()
        .filter(|(name, _)| {
            !name.eq_ignore_ascii_case(CONTROLLER_KEY)
                && !name.eq_ignore_ascii_case(ACTION_KEY)
                && action
                    .parameters()
                    .iter()
                    .all(|other| !other.name().eq_ignore_ascii_case(name))
        })
        .map(|(name, raw)| {
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            (name.to_string(), value)
        })
        .collect();
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprlinkr_core::{Arg, ErrorKind, ReflectedSemantics};
    use hyprlinkr_test::configuration;
    use hyprlinkr_test::controllers::{
        ActionRouteController, BarController, BaseController, DerivedController, FooController,
        ModelController, QueryModel,
    };
    use serde_json::json;

    fn parser() -> ResourceLinkParser {
        ResourceLinkParser::new(configuration())
    }

    fn uri(text: &str) -> Uri {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_get_by_id() {
        let context = parser().parse(&uri("http://localhost/api/foo/42")).unwrap();
        assert_eq!(context.controller().type_name(), "FooController");
        assert_eq!(context.action().name(), "get_by_id");
        assert_eq!(context.argument::<i32>("id"), Some(42));
    }

    #[test]
    fn test_parse_prefers_parameterless_get() {
        let context = parser().parse(&uri("http://localhost/api/foo")).unwrap();
        assert_eq!(context.action().name(), "get");
        assert!(context.arguments().is_empty());
    }

    #[test]
    fn test_parse_query_parameters() {
        let context = parser()
            .parse(&uri("http://localhost/api/foo?ploeh=5"))
            .unwrap();
        assert_eq!(context.action().name(), "get_with_ploeh_and_fnaah");
        assert_eq!(context.arguments().get("ploeh"), Some(&json!(5)));
        assert_eq!(context.arguments().get("fnaah"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_ignores_extra_query_values() {
        let context = parser()
            .parse(&uri("http://localhost/api/foo/42?unrelated=1"))
            .unwrap();
        assert_eq!(context.action().name(), "get_by_id");
    }

    #[test]
    fn test_parse_query_overrides_route_value() {
        let context = parser()
            .parse(&uri("http://localhost/api/foo/1?id=2"))
            .unwrap();
        assert_eq!(context.argument::<i32>("id"), Some(2));
    }

    #[test]
    fn test_parse_controller_name_is_case_insensitive() {
        let context = parser().parse(&uri("http://localhost/api/FOO/7")).unwrap();
        assert_eq!(context.controller().type_name(), "FooController");
    }

    #[test]
    fn test_parse_default_parameter_value() {
        let context = parser().parse(&uri("http://localhost/api/bar")).unwrap();
        assert_eq!(context.action().name(), "get_page");
        assert_eq!(context.argument::<u32>("page"), Some(1));
    }

    #[test]
    fn test_parse_action_from_route_defaults() {
        let context = parser().parse(&uri("http://localhost/custom/3")).unwrap();
        assert_eq!(context.controller().type_name(), "ActionRouteController");
        assert_eq!(context.action().name(), "get_by_id");
    }

    #[test]
    fn test_parse_complex_parameter_from_query() {
        let context = parser()
            .parse(&uri("http://localhost/api/model?term=ploeh&page=2"))
            .unwrap();
        let query: QueryModel = context.argument("query").unwrap();
        assert_eq!(query.term, "ploeh");
        assert_eq!(query.page, 2);
        assert_eq!(query.filter, None);
    }

    #[test]
    fn test_parse_complex_parameter_ignores_path_values() {
        let context = parser()
            .parse(&uri("http://localhost/api/model/5?term=ploeh&page=2"))
            .unwrap();
        assert_eq!(
            context.arguments().get("query"),
            Some(&json!({"term": "ploeh", "page": 2}))
        );
    }

    #[test]
    fn test_parse_rejects_integers_out_of_range() {
        let parser = parser();
        for text in [
            "http://localhost/api/bar?page=-1",
            "http://localhost/api/bar?page=4294967296",
        ] {
            assert!(parser.try_parse(&uri(text)).is_none(), "{text}");
        }

        let context = parser.parse(&uri("http://localhost/api/foo/99999999999")).unwrap();
        assert_eq!(context.action().name(), "get");
        assert!(!parser.verify::<FooController, _>(&context, |c| c.get_by_id(Arg::any())));
    }

    #[test]
    fn test_parse_failures() {
        for text in [
            "http://localhost/nowhere",
            "http://localhost/api/unknown/1",
            "http://localhost/api/nogetaction",
            "http://localhost/api/bar?page=minus-one",
            "http://localhost/api/foo/1?ploeh=5",
        ] {
            let err = parser().parse(&uri(text)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{text}");
            assert!(parser().try_parse(&uri(text)).is_none(), "{text}");
        }
    }

    #[test]
    fn test_verify() {
        let parser = parser();
        let context = parser.parse(&uri("http://localhost/api/foo/42")).unwrap();

        assert!(parser.verify::<FooController, _>(&context, |c| c.get_by_id(42)));
        assert!(parser.verify::<FooController, _>(&context, |c| c.get_by_id(Arg::any())));
        assert!(!parser.verify::<FooController, _>(&context, |c| c.get_by_id(43)));
        assert!(!parser.verify::<FooController, _>(&context, |c| c.get()));
        assert!(!parser.verify::<BarController, _>(&context, |c| c.get_page(42)));
    }

    #[test]
    fn test_verify_null_argument() {
        let parser = parser();
        let context = parser.parse(&uri("http://localhost/api/foo?ploeh=5")).unwrap();
        assert!(parser.verify::<FooController, _>(&context, |c| c.get_with_ploeh_and_fnaah(5, None)));
        assert!(!parser.verify::<FooController, _>(&context, |c| c.get_with_ploeh_and_fnaah(5, "x")));
    }

    #[test]
    fn test_verify_inherited_action() {
        let parser = parser();
        let context = parser.parse(&uri("http://localhost/api/derived/1")).unwrap();
        assert_eq!(context.controller().type_name(), "DerivedController");

        assert!(parser.verify::<DerivedController, _>(&context, |c| c.get(1)));
        assert!(!parser.verify::<BaseController, _>(&context, |c| c.get(1)));

        let strict = parser.with_equality(ReflectedSemantics);
        assert!(!strict.verify::<DerivedController, _>(&context, |c| c.get(1)));
    }

    #[test]
    fn test_parse_and_verify() {
        let parser = parser();
        let arguments = parser
            .parse_and_verify::<FooController, _>(&uri("http://localhost/api/foo/42"), |c| {
                c.get_by_id(Arg::any())
            })
            .unwrap();
        assert_eq!(arguments.get("id"), Some(&json!(42)));

        let err = parser
            .parse_and_verify::<FooController, _>(&uri("http://localhost/api/foo/42"), |c| c.get())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_parse_and_verify_action_route() {
        let arguments = parser()
            .parse_and_verify::<ActionRouteController, _>(&uri("http://localhost/custom/3"), |c| {
                c.get_by_id(3)
            })
            .unwrap();
        assert_eq!(arguments.get("id"), Some(&json!(3)));
    }
}
