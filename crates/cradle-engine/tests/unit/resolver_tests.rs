//! Tests for raw argument resolution

use std::sync::Arc;

use cradle_domain::{Error, Instance, Shape, TypeKey, Value, args};
use cradle_engine::{Container, ParameterResolver, TypeFactory, TypeRegistry};

use crate::test_utils::*;

fn foo_container(parameters: &[(&str, Value)]) -> Container {
    let mut registry = TypeRegistry::new();
    registry.register(
        "foo",
        TypeFactory::function(mock_constructor(), args!["I was created by @foo"]),
    );
    container_with(registry, parameters)
}

// ============================================================================
// Literals
// ============================================================================

#[cfg(test)]
mod literal_tests {
    use super::*;

    #[test]
    fn test_literal_passes_through() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        assert_eq!(
            resolver.resolve(&Value::from("plain"), &Shape::Str).unwrap(),
            Value::from("plain")
        );
        assert_eq!(resolver.resolve(&Value::Int(3), &Shape::Any).unwrap(), Value::Int(3));
    }

    #[test]
    fn test_literal_shape_mismatch() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let err = resolver.resolve(&Value::Int(3), &Shape::Str).unwrap_err();
        assert_eq!(err, Error::shape_mismatch("string", "int"));
        assert_eq!(err.to_string(), "value is of type int but needs to be a string");
    }

    #[test]
    fn test_no_numeric_coercion() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        assert!(resolver.resolve(&Value::Int(1), &Shape::Float).is_err());
        assert!(resolver.resolve(&Value::Float(1.0), &Shape::Int).is_err());
    }

    #[test]
    fn test_text_mentioning_a_reference_is_a_literal() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let raw = Value::from("I was created by @foo");
        assert_eq!(resolver.resolve(&raw, &Shape::Str).unwrap(), raw);
    }
}

// ============================================================================
// Configuration placeholders
// ============================================================================

#[cfg(test)]
mod parameter_tests {
    use super::*;

    #[test]
    fn test_placeholder_is_substituted() {
        let container = foo_container(&[("bar", Value::from("baz"))]);
        let resolver = ParameterResolver::new(&container);

        assert_eq!(
            resolver.resolve(&Value::from("%bar%"), &Shape::Str).unwrap(),
            Value::from("baz")
        );
    }

    #[test]
    fn test_missing_placeholder_is_not_found() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let err = resolver.resolve(&Value::from("%bar%"), &Shape::Str).unwrap_err();
        assert_eq!(err, Error::parameter_not_found("bar"));
        assert_eq!(err.to_string(), "the parameter \"%bar%\" has not been defined");
    }

    #[test]
    fn test_substituted_value_is_shape_checked() {
        let container = foo_container(&[("port", Value::from("eighty"))]);
        let resolver = ParameterResolver::new(&container);

        assert_eq!(
            resolver.resolve(&Value::from("%port%"), &Shape::Int).unwrap_err(),
            Error::shape_mismatch("int", "string")
        );
    }

    #[test]
    fn test_placeholder_text_is_resolved_again() {
        let container = foo_container(&[
            ("outer", Value::from("%inner%")),
            ("inner", Value::Int(8080)),
            ("logger", Value::from("@foo")),
        ]);
        let resolver = ParameterResolver::new(&container);

        assert_eq!(
            resolver.resolve(&Value::from("%outer%"), &Shape::Int).unwrap(),
            Value::Int(8080)
        );
        let logger = resolver
            .resolve(&Value::from("%logger%"), &Shape::pointer::<MockType>())
            .unwrap();
        assert_eq!(logger, container.get("foo").unwrap());
    }

    #[test]
    fn test_placeholder_cycle() {
        let container = foo_container(&[("a", Value::from("%b%")), ("b", Value::from("%a%"))]);
        let resolver = ParameterResolver::new(&container);

        let err = resolver.resolve(&Value::from("%a%"), &Shape::Str).unwrap_err();
        assert_eq!(
            err,
            Error::Cycle {
                chain: vec!["%a%".into(), "%b%".into(), "%a%".into()]
            }
        );
    }
}

// ============================================================================
// Type references
// ============================================================================

#[cfg(test)]
mod reference_tests {
    use super::*;

    #[test]
    fn test_reference_retrieves_instance() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let value = resolver
            .resolve(&Value::from("@foo"), &Shape::pointer::<MockType>())
            .unwrap();
        assert_eq!(value, container.get("foo").unwrap());
        assert_eq!(resolver.resolve(&Value::from("@foo"), &Shape::Interface).unwrap(), value);
    }

    #[test]
    fn test_missing_reference_fails() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let err = resolver
            .resolve(&Value::from("@missing"), &Shape::Interface)
            .unwrap_err();
        assert_eq!(err, Error::unknown_type("missing"));
    }

    #[test]
    fn test_reference_of_wrong_shape() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let err = resolver
            .resolve(&Value::from("@foo"), &Shape::pointer::<Service>())
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidReference {
                type_id: "foo".into(),
                instance_type: TypeKey::of::<Arc<MockType>>().name().to_string(),
            }
        );
    }

    #[test]
    fn test_factory_enriches_reference_error() {
        let mut registry = TypeRegistry::new();
        registry.inject_instance("wrong", Instance::component(Arc::new(Counter::default())));
        registry.register("service", TypeFactory::function(service_constructor(), args!["@wrong"]));
        let container = container(registry);

        let err = container.get("service").unwrap_err();
        match err.root_cause() {
            Error::TypeReference {
                type_id,
                position,
                constructor,
                signature,
                ..
            } => {
                assert_eq!(type_id, "wrong");
                assert_eq!(*position, 1);
                assert_eq!(constructor, "new_service");
                assert!(signature.starts_with('('));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_member_reference() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        let method = resolver
            .resolve(&Value::from("@foo::ReturnString"), &Shape::Func)
            .unwrap();
        let method = method.as_callable().unwrap();
        assert_eq!(
            method.call(args!["TEST"]).unwrap(),
            Value::from("I was created by @foo TEST")
        );
    }

    #[test]
    fn test_optional_reference() {
        let container = foo_container(&[]);
        let resolver = ParameterResolver::new(&container);

        assert_eq!(
            resolver
                .resolve(&Value::from("@?missing"), &Shape::optional(Shape::Interface))
                .unwrap(),
            Value::Null
        );
        assert!(matches!(
            resolver.resolve(&Value::from("@?missing"), &Shape::Interface),
            Err(Error::InvalidReference { .. })
        ));
        assert!(matches!(
            resolver.resolve(&Value::from("@?missing"), &Shape::Str),
            Err(Error::InvalidReference { .. })
        ));
        assert!(resolver.resolve(&Value::from("@?foo"), &Shape::Interface).unwrap().as_instance().is_some());
    }

    #[test]
    fn test_optional_dependency_in_constructor() {
        let constructor = cradle_domain::Callable::from_fn(
            "new_optional_service",
            |mock: Option<Arc<MockType>>| {
                Arc::new(MockType {
                    string_parameter: mock.map_or_else(|| "alone".into(), |m| m.string_parameter.clone()),
                    int_parameter: 0,
                })
            },
        );
        let mut registry = TypeRegistry::new();
        registry.register("service", TypeFactory::function(constructor, args!["@?logger"]));

        let service: Arc<MockType> = container(registry).get_as("service").unwrap();
        assert_eq!(service.string_parameter, "alone");
    }

    #[test]
    fn test_missing_optional_dependency_needs_option_parameter() {
        let mut registry = TypeRegistry::new();
        registry.register_type("service", service_constructor(), args!["@?logger"]);

        let err = container(registry).get("service").unwrap_err();
        assert!(
            matches!(
                err.root_cause(),
                Error::TypeReference { type_id, position: 1, constructor, .. }
                    if type_id == "logger" && constructor == "new_service"
            ),
            "unexpected error: {err}"
        );
    }
}
