//! Route values queries.
//!
//! A [`RouteValuesQuery`] turns the arguments of a method call into route
//! values: one `name → string` pair per argument, with null arguments left
//! out entirely.

use hyprlinkr_core::{LinkError, LinkResult, MethodCall, ParameterDescriptor};
use hyprlinkr_router::RouteValues;
use serde_json::Value;
use tracing::trace;

/// Extracts route values from a method call.
pub trait RouteValuesQuery: Send + Sync {
    /// Evaluates the call's arguments into route values.
    fn get_route_values(&self, call: &MethodCall<'_>) -> LinkResult<RouteValues>;
}

/// Converts a JSON value to its route value text.
///
/// Strings are used verbatim, numbers in invariant form and booleans as
/// `true`/`false`. Arrays and objects become compact JSON. Null has no text.
#[must_use]
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Stringifies every argument; null arguments are omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRouteValuesQuery;

impl RouteValuesQuery for DefaultRouteValuesQuery {
    fn get_route_values(&self, call: &MethodCall<'_>) -> LinkResult<RouteValues> {
        let mut values = RouteValues::with_capacity(call.action().parameters().len());
        for (parameter, argument) in call.arguments() {
            if let Some(text) = scalar_string(&argument.evaluate()?) {
                values.insert(parameter.name(), text);
            }
        }
        trace!(action = call.action().name(), count = values.len(), "extracted route values");
        Ok(values)
    }
}

/// Per-parameter step of [`ScalarRouteValuesQuery`].
pub trait ParameterValues: Send + Sync {
    /// Returns the route values for one evaluated argument.
    fn parameter_values(
        &self,
        parameter: &ParameterDescriptor,
        value: &Value,
    ) -> Vec<(String, String)>;
}

/// One value per parameter, named after the parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarValues;

impl ParameterValues for ScalarValues {
    fn parameter_values(
        &self,
        parameter: &ParameterDescriptor,
        value: &Value,
    ) -> Vec<(String, String)> {
        scalar_string(value)
            .map(|text| vec![(parameter.name().to_string(), text)])
            .unwrap_or_default()
    }
}

/// Expands object-valued arguments into one value per field.
///
/// A query model `{ "term": "x", "page": 2 }` passed as `query` yields
/// `term=x` and `page=2` rather than a single `query` value. Null fields
/// are omitted. Non-object arguments are handled like [`ScalarValues`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenComplex;

impl ParameterValues for FlattenComplex {
    fn parameter_values(
        &self,
        parameter: &ParameterDescriptor,
        value: &Value,
    ) -> Vec<(String, String)> {
        match value {
            Value::Object(fields) => fields
                .iter()
                .filter_map(|(name, field)| scalar_string(field).map(|text| (name.clone(), text)))
                .collect(),
            other => ScalarValues.parameter_values(parameter, other),
        }
    }
}

/// A route values query with an injectable per-parameter step.
///
/// Two parameters producing the same name is an invalid argument error,
/// e.g. a flattened field named like another parameter.
///
/// # Example
///
/// ```
/// use hyprlinkr::{FlattenComplex, ScalarRouteValuesQuery};
///
/// let query = ScalarRouteValuesQuery::new(FlattenComplex);
/// # let _ = query;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarRouteValuesQuery<P = ScalarValues> {
    parameter_values: P,
}

impl<P: ParameterValues> ScalarRouteValuesQuery<P> {
    /// Creates a query using `parameter_values` for each argument.
    pub const fn new(parameter_values: P) -> Self {
        Self { parameter_values }
    }
}

impl<P: ParameterValues> RouteValuesQuery for ScalarRouteValuesQuery<P> {
    fn get_route_values(&self, call: &MethodCall<'_>) -> LinkResult<RouteValues> {
        let mut values = RouteValues::with_capacity(call.action().parameters().len());
        for (parameter, argument) in call.arguments() {
            let value = argument.evaluate()?;
            for (name, text) in self.parameter_values.parameter_values(parameter, &value) {
                if values.contains_key(&name) {
                    return Err(LinkError::invalid_argument(format!(
                        "route value '{name}' of {} is produced twice",
                        call.action().name()
                    )));
                }
                values.insert(name, text);
            }
        }
        trace!(action = call.action().name(), count = values.len(), "extracted route values");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprlinkr_core::{Arg, Controller};
    use hyprlinkr_test::controllers::{FooController, ModelController, QueryModel};
    use serde_json::json;

    fn route_values<Q: RouteValuesQuery>(
        query: &Q,
        expression: &hyprlinkr_core::Expression,
    ) -> RouteValues {
        query
            .get_route_values(&expression.method_call().unwrap())
            .unwrap()
    }

    #[test]
    fn test_scalar_string() {
        assert_eq!(scalar_string(&json!("a b")), Some("a b".to_string()));
        assert_eq!(scalar_string(&json!(42)), Some("42".to_string()));
        assert_eq!(scalar_string(&json!(-1.5)), Some("-1.5".to_string()));
        assert_eq!(scalar_string(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_string(&json!([1, 2])), Some("[1,2]".to_string()));
        assert_eq!(scalar_string(&Value::Null), None);
    }

    #[test]
    fn test_default_query_zero_arguments() {
        let actions = <FooController as Controller>::Actions::default();
        let values = route_values(&DefaultRouteValuesQuery, &actions.get());
        assert!(values.is_empty());
    }

    #[test]
    fn test_default_query_stringifies_arguments() {
        let actions = <FooController as Controller>::Actions::default();
        let values = route_values(
            &DefaultRouteValuesQuery,
            &actions.get_with_ploeh_and_fnaah(5, "fnaah"),
        );
        let expected: RouteValues = [("ploeh", "5"), ("fnaah", "fnaah")].into_iter().collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_default_query_omits_null() {
        let actions = <FooController as Controller>::Actions::default();
        let values = route_values(
            &DefaultRouteValuesQuery,
            &actions.get_with_ploeh_and_fnaah(5, None),
        );
        assert_eq!(values.get("ploeh"), Some("5"));
        assert!(!values.contains_key("fnaah"));
    }

    #[test]
    fn test_default_query_evaluates_deferred_arguments() {
        let id = 6;
        let actions = <FooController as Controller>::Actions::default();
        let values = route_values(
            &DefaultRouteValuesQuery,
            &actions.get_by_id(Arg::from_fn(move || id * 7)),
        );
        assert_eq!(values.get("id"), Some("42"));
    }

    #[test]
    fn test_scalar_query_matches_default_query() {
        let actions = <FooController as Controller>::Actions::default();
        let expression = actions.get_with_ploeh_and_fnaah(5, None);
        assert_eq!(
            route_values(&ScalarRouteValuesQuery::<ScalarValues>::default(), &expression),
            route_values(&DefaultRouteValuesQuery, &expression)
        );
    }

    #[test]
    fn test_flatten_complex_rejects_duplicate_names() {
        let actions = <ModelController as Controller>::Actions::default();
        let expression = actions.search(QueryModel::default(), 3);
        let err = ScalarRouteValuesQuery::new(FlattenComplex)
            .get_route_values(&expression.method_call().unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), hyprlinkr_core::ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("'page'"));
    }

    #[test]
    fn test_flatten_complex() {
        let actions = <ModelController as Controller>::Actions::default();
        let expression = actions.get(QueryModel {
            term: "ploeh".to_string(),
            page: 2,
            filter: None,
        });

        let values = route_values(&ScalarRouteValuesQuery::new(FlattenComplex), &expression);
        let expected: RouteValues = [("term", "ploeh"), ("page", "2")].into_iter().collect();
        assert_eq!(values, expected);
    }
}
