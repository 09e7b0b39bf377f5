//! Tests for the type factory variants

use std::sync::Arc;

use cradle_domain::{Callable, Error, Instance, Value, args};
use cradle_engine::{Factory, ParameterResolver, TypeFactory, TypeRegistry};

use crate::test_utils::*;

fn construction_message(factory: &TypeFactory) -> String {
    factory
        .construction_error()
        .map(ToString::to_string)
        .unwrap_or_default()
}

// ============================================================================
// Function factory
// ============================================================================

#[cfg(test)]
mod function_factory_tests {
    use super::*;

    #[test]
    fn test_arguments_in_declaration_order() {
        let constructor = Callable::from_fn("new_triple", |_a: String, _b: i64, _c: bool| {
            Arc::new(MockType::default())
        });
        let factory = TypeFactory::function(constructor, args!["%a%", 5, true]);

        assert!(factory.is_valid());
        assert_eq!(factory.kind(), "function");
        assert_eq!(factory.arguments(), args!["%a%", 5, true]);
    }

    #[test]
    fn test_interface_return_is_accepted() {
        let constructor = Callable::from_fn("new_erased", || {
            Instance::component(Arc::new(MockType::default()))
        });
        assert!(TypeFactory::function(constructor, vec![]).is_valid());
    }

    #[test]
    fn test_non_callable_constructor_is_invalid() {
        let factory = TypeFactory::function("not a function", vec![]);
        assert_eq!(
            construction_message(&factory),
            "the given constructor must be a callable (given string)"
        );
    }

    #[test]
    fn test_zero_return_values_is_invalid() {
        let factory = TypeFactory::function(Callable::from_fn("nothing", || ()), vec![]);
        assert_eq!(
            construction_message(&factory),
            "invalid number of return parameters: 0"
        );
    }

    #[test]
    fn test_two_return_values_is_invalid() {
        let constructor = Callable::from_fn("pair", || {
            (Arc::new(MockType::default()), Arc::new(MockType::default()))
        });
        assert_eq!(
            construction_message(&TypeFactory::function(constructor, vec![])),
            "invalid number of return parameters: 2"
        );
    }

    #[test]
    fn test_literal_return_is_invalid() {
        let constructor = Callable::from_fn("text", || "text".to_string());
        assert_eq!(
            construction_message(&TypeFactory::function(constructor, vec![])),
            "return parameter is no interface or pointer but a string"
        );
    }

    #[test]
    fn test_arity_mismatch_is_invalid() {
        let factory = TypeFactory::function(mock_constructor(), args!["a", "b"]);
        assert_eq!(
            construction_message(&factory),
            "invalid number of input parameters: got 2 but expected 1"
        );
    }

    #[test]
    fn test_invalid_factory_always_fails_with_recorded_error() {
        let factory = TypeFactory::function(mock_constructor(), vec![]);
        let recorded = factory.construction_error().cloned().unwrap();

        let container = container(TypeRegistry::new());
        let resolver = ParameterResolver::new(&container);
        for _ in 0..3 {
            assert_eq!(factory.generate(&resolver).unwrap_err(), recorded);
        }
        assert!(factory.arguments().is_empty());
    }

    #[test]
    fn test_fallible_constructor_error_names_constructor() {
        let constructor = Callable::from_fn("new_fallible", |fail: bool| {
            if fail {
                Err("boom".to_string())
            } else {
                Ok(Arc::new(MockType::default()))
            }
        });

        let mut registry = TypeRegistry::new();
        registry.register("ok", TypeFactory::function(constructor.clone(), args![false]));
        registry.register("failing", TypeFactory::function(constructor, args![true]));
        let container = container(registry);

        assert!(container.get("ok").is_ok());
        assert_eq!(
            container.get("failing").unwrap_err().root_cause(),
            &Error::invocation("new_fallible", "boom")
        );
    }
}

// ============================================================================
// Variadic constructors
// ============================================================================

#[cfg(test)]
mod variadic_tests {
    use super::*;

    #[test]
    fn test_tail_is_packed_in_order() {
        let mut registry = TypeRegistry::new();
        registry.register(
            "numbers",
            TypeFactory::function(numbers_constructor(), args!["primes", 2, 3, 5, 7]),
        );

        let numbers: Arc<Numbers> = container(registry).get_as("numbers").unwrap();
        assert_eq!(numbers.label, "primes");
        assert_eq!(numbers.values, vec![2, 3, 5, 7]);
    }

    #[test]
    fn test_empty_tail() {
        let mut registry = TypeRegistry::new();
        registry.register(
            "numbers",
            TypeFactory::function(numbers_constructor(), args!["none"]),
        );

        let numbers: Arc<Numbers> = container(registry).get_as("numbers").unwrap();
        assert!(numbers.values.is_empty());
    }

    #[test]
    fn test_fewer_than_fixed_arguments_is_invalid() {
        let factory = TypeFactory::function(numbers_constructor(), vec![]);
        assert_eq!(
            construction_message(&factory),
            "invalid number of input parameters for variadic function: got 0 but expected at least 1"
        );
    }

    #[test]
    fn test_tail_element_shape_is_checked() {
        let mut registry = TypeRegistry::new();
        registry.register(
            "numbers",
            TypeFactory::function(numbers_constructor(), args!["mixed", 1, "two"]),
        );

        let err = container(registry).get("numbers").unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            "input argument 3 is of type string but needs to be a int"
        );
    }
}

// ============================================================================
// Struct factory
// ============================================================================

#[cfg(test)]
mod struct_factory_tests {
    use super::*;

    #[test]
    fn test_fields_are_assigned_positionally() {
        let mut registry = TypeRegistry::new();
        registry.register("mock", TypeFactory::structure::<MockType>(args!["%text%", 42]));
        let container = container_with(registry, &[("text", Value::from("hello"))]);

        let mock: Arc<MockType> = container.get_as("mock").unwrap();
        assert_eq!(mock.string_parameter, "hello");
        assert_eq!(mock.int_parameter, 42);
    }

    #[test]
    fn test_fewer_arguments_keep_defaults() {
        let mut registry = TypeRegistry::new();
        registry.register("mock", TypeFactory::structure::<MockType>(args!["only text"]));

        let mock: Arc<MockType> = container(registry).get_as("mock").unwrap();
        assert_eq!(mock.string_parameter, "only text");
        assert_eq!(mock.int_parameter, 0);
    }

    #[test]
    fn test_more_arguments_than_fields_is_invalid() {
        let factory = TypeFactory::structure::<MockType>(args!["a", 1, "extra"]);
        assert_eq!(factory.kind(), "invalid");
        assert!(construction_message(&factory).ends_with("has only 2 fields but 3 arguments were provided"));
    }

    #[test]
    fn test_field_shape_mismatch_names_position() {
        let mut registry = TypeRegistry::new();
        registry.register("mock", TypeFactory::structure::<MockType>(args!["text", "not a number"]));

        let err = container(registry).get("mock").unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            "input argument 2 is of type string but needs to be a int"
        );
    }
}

// ============================================================================
// Alias, func reference and proxy
// ============================================================================

#[cfg(test)]
mod member_factory_tests {
    use super::*;

    fn registry_with_foo() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            "foo",
            TypeFactory::function(mock_constructor(), args!["I was created by @foo"]),
        );
        registry
    }

    #[test]
    fn test_alias_arguments() {
        assert_eq!(TypeFactory::alias("foo").arguments(), args!["@foo"]);
        assert_eq!(
            TypeFactory::alias("foo::ReturnString").arguments(),
            args!["@foo::ReturnString"]
        );
    }

    #[test]
    fn test_alias_returns_the_same_instance() {
        let mut registry = registry_with_foo();
        registry.register("bar", TypeFactory::alias("foo"));
        let container = container(registry);

        let bar = container.get("bar").unwrap();
        let foo = container.get("foo").unwrap();
        assert_eq!(bar, foo);

        let mock: Arc<MockType> = container.get_as("bar").unwrap();
        assert_eq!(mock.string_parameter, "I was created by @foo");
    }

    #[test]
    fn test_alias_with_member_returns_bound_callable() {
        let mut registry = registry_with_foo();
        registry.register("bar", TypeFactory::alias("foo::ReturnString"));
        let container = container(registry);

        let method: Callable = container.get_as("bar").unwrap();
        assert_eq!(
            method.call(args!["TEST"]).unwrap(),
            Value::from("I was created by @foo TEST")
        );
    }

    #[test]
    fn test_empty_alias_is_invalid() {
        assert!(!TypeFactory::alias("").is_valid());
        assert!(!TypeFactory::alias("foo::").is_valid());
    }

    #[test]
    fn test_func_reference_returns_bound_callable() {
        let mut registry = registry_with_foo();
        registry.register("say", TypeFactory::func_reference("foo", "ReturnString"));
        let container = container(registry);

        assert_eq!(
            container.registry().get("say").unwrap().arguments(),
            args!["@foo::ReturnString"]
        );
        let method: Callable = container.get_as("say").unwrap();
        assert_eq!(
            method.call(args!["again"]).unwrap(),
            Value::from("I was created by @foo again")
        );
    }

    #[test]
    fn test_unknown_member() {
        let mut registry = registry_with_foo();
        registry.register("say", TypeFactory::func_reference("foo", "Shout"));

        let err = container(registry).get("say").unwrap_err();
        assert!(matches!(
            err.root_cause(),
            Error::UnknownMember { type_id, member, .. } if type_id == "foo" && member == "Shout"
        ));
    }

    #[test]
    fn test_proxy_invokes_member_with_resolved_arguments() {
        let mut registry = registry_with_foo();
        registry.register("derived", TypeFactory::proxy("foo", "Derive", args!["%suffix%"]));
        let container = container_with(registry, &[("suffix", Value::from("and derived"))]);

        assert_eq!(
            container.registry().get("derived").unwrap().arguments(),
            args!["@foo::Derive", "%suffix%"]
        );
        let derived: Arc<MockType> = container.get_as("derived").unwrap();
        assert_eq!(derived.string_parameter, "I was created by @foo and derived");

        let foo: Arc<MockType> = container.get_as("foo").unwrap();
        assert!(!Arc::ptr_eq(&foo, &derived));
    }

    #[test]
    fn test_proxy_checks_member_signature_on_generation() {
        let mut registry = registry_with_foo();
        registry.register("no_args", TypeFactory::proxy("foo", "Derive", vec![]));
        registry.register("literal", TypeFactory::proxy("foo", "ReturnString", args!["x"]));
        let container = container(registry);

        assert_eq!(
            container.get("no_args").unwrap_err().root_cause().to_string(),
            "invalid number of input parameters: got 0 but expected 1"
        );
        assert_eq!(
            container.get("literal").unwrap_err().root_cause().to_string(),
            "return parameter is no interface or pointer but a string"
        );
    }
}

// ============================================================================
// Instance, func and configured factories
// ============================================================================

#[cfg(test)]
mod prebuilt_factory_tests {
    use super::*;

    #[test]
    fn test_instance_factory_returns_stored_value() {
        let mock = Arc::new(MockType {
            string_parameter: "prebuilt".into(),
            int_parameter: 1,
        });
        let mut registry = TypeRegistry::new();
        registry.inject_instance("mock", Instance::component(Arc::clone(&mock)));
        let container = container(registry);

        assert!(container.registry().get("mock").unwrap().arguments().is_empty());
        let retrieved: Arc<MockType> = container.get_as("mock").unwrap();
        assert!(Arc::ptr_eq(&mock, &retrieved));
    }

    #[test]
    fn test_null_instance_is_invalid() {
        assert_eq!(
            construction_message(&TypeFactory::instance(Value::Null)),
            "the given instance must not be null"
        );
    }

    #[test]
    fn test_func_factory_returns_callable_uninvoked() {
        let mut registry = TypeRegistry::new();
        registry.register("factory", TypeFactory::func(mock_constructor()));

        let constructor: Callable = container(registry).get_as("factory").unwrap();
        let built = constructor.call(args!["later"]).unwrap();
        assert!(built.as_instance().is_some());
    }

    #[test]
    fn test_func_factory_rejects_non_callable() {
        assert_eq!(
            construction_message(&TypeFactory::func(3)),
            "the given function must be a callable (given int)"
        );
    }

    #[test]
    fn test_configured_factory_runs_configurator() {
        let mut registry = TypeRegistry::new();
        registry.inject_instance("configurator", Instance::component(Arc::new(Configurator { start: 7 })));
        registry.register(
            "counter",
            TypeFactory::configured(
                TypeFactory::function(
                    Callable::from_fn("new_counter", || Arc::new(Counter::default())),
                    vec![],
                ),
                "configurator",
                "Configure",
            ),
        );
        let container = container(registry);

        assert_eq!(
            container.registry().get("counter").unwrap().arguments(),
            args!["@configurator::Configure"]
        );
        let counter: Arc<Counter> = container.get_as("counter").unwrap();
        assert_eq!(counter.value.load(std::sync::atomic::Ordering::SeqCst), 7);
    }

    #[test]
    fn test_configured_inherits_embedded_error() {
        let embedded = TypeFactory::function(mock_constructor(), vec![]);
        let recorded = embedded.construction_error().cloned();

        let configured = TypeFactory::configured(embedded, "configurator", "Configure");
        assert_eq!(configured.construction_error().cloned(), recorded);
        assert!(!TypeFactory::configured(TypeFactory::func(mock_constructor()), "", "Configure").is_valid());
    }
}
