//! Property tests for route value extraction and dispatch.

use hyprlinkr::{DefaultRouteDispatcher, DefaultRouteValuesQuery, RouteDispatcher, RouteValuesQuery};
use hyprlinkr_core::Controller;
use hyprlinkr_router::RouteValues;
use hyprlinkr_test::controllers::{
    ActionRouteController, FooController, RouteAttributeController,
};
use proptest::prelude::*;

fn route_values() -> impl Strategy<Value = RouteValues> {
    prop::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,8}"), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn null_arguments_are_omitted(ploeh in any::<i32>()) {
        let actions = <FooController as Controller>::Actions::default();
        let expression = actions.get_with_ploeh_and_fnaah(ploeh, None);
        let values = DefaultRouteValuesQuery
            .get_route_values(&expression.method_call().unwrap())
            .unwrap();

        let expected = ploeh.to_string();
        prop_assert_eq!(values.get("ploeh"), Some(expected.as_str()));
        prop_assert!(!values.contains_key("fnaah"));
    }

    #[test]
    fn supplied_arguments_are_kept(ploeh in any::<i32>(), fnaah in "[a-z]{0,12}") {
        let actions = <FooController as Controller>::Actions::default();
        let expression = actions.get_with_ploeh_and_fnaah(ploeh, fnaah.as_str());
        let values = DefaultRouteValuesQuery
            .get_route_values(&expression.method_call().unwrap())
            .unwrap();

        prop_assert_eq!(values.len(), 2);
        prop_assert_eq!(values.get("fnaah"), Some(fnaah.as_str()));
    }

    #[test]
    fn dispatch_never_mutates_input(input in route_values(), id in any::<i32>()) {
        let dispatcher = DefaultRouteDispatcher::new();
        let snapshot = input.clone();

        let foo = <FooController as Controller>::Actions::default().get_by_id(id);
        let attributed = <RouteAttributeController as Controller>::Actions::default().get_by_id(id);
        let action_routed = <ActionRouteController as Controller>::Actions::default().get_by_id(id);

        for expression in [&foo, &attributed, &action_routed] {
            let _ = dispatcher.dispatch(&expression.method_call().unwrap(), &input).unwrap();
            prop_assert_eq!(&input, &snapshot);
        }
    }
}

#[test]
fn zero_argument_actions_yield_empty_values() {
    let actions = <FooController as Controller>::Actions::default();
    let values = DefaultRouteValuesQuery
        .get_route_values(&actions.get().method_call().unwrap())
        .unwrap();
    assert!(values.is_empty());
}
