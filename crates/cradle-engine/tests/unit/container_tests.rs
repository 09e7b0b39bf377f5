//! Tests for container retrieval, caching and cycle detection

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, mpsc};
use std::thread;
use std::time::Duration;

use cradle_domain::{Callable, Error, Value, args};
use cradle_engine::{TypeFactory, TypeRegistry};

use crate::test_utils::*;

// ============================================================================
// Retrieval
// ============================================================================

#[cfg(test)]
mod retrieval_tests {
    use super::*;

    #[test]
    fn test_unknown_type() {
        let container = container(TypeRegistry::new());
        let err = container.get("nope").unwrap_err();

        assert_eq!(err, Error::unknown_type("nope"));
        assert_eq!(err.to_string(), "the type \"nope\" has not been defined");
    }

    #[test]
    fn test_dependency_is_injected() {
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", mock_constructor(), args!["%text%"]);
        registry.register_type("service", service_constructor(), args!["@foo"]);
        let container = container_with(registry, &[("text", Value::from("injected"))]);

        let service: Arc<Service> = container.get_as("service").unwrap();
        let foo: Arc<MockType> = container.get_as("foo").unwrap();
        assert!(Arc::ptr_eq(&service.mock, &foo));
        assert_eq!(foo.string_parameter, "injected");
    }

    #[test]
    fn test_error_chain_names_every_type() {
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", mock_constructor(), vec![]);
        registry.register_type("service", service_constructor(), args!["@foo"]);
        let container = container(registry);

        assert_eq!(
            container.get("service").unwrap_err().to_string(),
            "could not generate type \"service\": could not generate type \"foo\": invalid number of input parameters: got 0 but expected 1"
        );
    }

    #[test]
    fn test_get_as_wrong_type() {
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", mock_constructor(), args!["x"]);
        let container = container(registry);

        assert!(matches!(
            container.get_as::<Arc<Service>>("foo"),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}

// ============================================================================
// Singleton caching
// ============================================================================

#[cfg(test)]
mod caching_tests {
    use super::*;

    #[test]
    fn test_constructor_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", counting_constructor(Arc::clone(&calls)), args!["x"]);
        registry.register("bar", TypeFactory::alias("foo"));
        let container = container(registry);

        assert!(!container.is_cached("foo"));
        let first = container.get("foo").unwrap();
        let second = container.get("foo").unwrap();
        let aliased = container.get("bar").unwrap();

        assert_eq!(first, second);
        assert_eq!(first, aliased);
        assert!(container.is_cached("foo"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_access_constructs_once() {
        const THREADS: usize = 8;

        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", counting_constructor(Arc::clone(&calls)), args!["shared"]);
        let container = container(registry);
        let barrier = Barrier::new(THREADS);

        let results: Vec<Value> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        container.get("foo").unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|value| *value == results[0]));
    }

    #[test]
    fn test_failures_are_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let flaky = Callable::from_fn("new_flaky", move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("first attempt fails")
            } else {
                Ok(Arc::new(MockType::default()))
            }
        });

        let mut registry = TypeRegistry::new();
        registry.register_type("flaky", flaky, vec![]);
        let container = container(registry);

        assert!(container.get("flaky").is_err());
        assert!(!container.is_cached("flaky"));
        assert!(container.get("flaky").is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_register_discards_cached_instance() {
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", mock_constructor(), args!["old"]);
        let mut container = container(registry);

        let old: Arc<MockType> = container.get_as("foo").unwrap();
        container.register("foo", TypeFactory::function(mock_constructor(), args!["new"]));
        assert!(!container.is_cached("foo"));

        let new: Arc<MockType> = container.get_as("foo").unwrap();
        assert_eq!(old.string_parameter, "old");
        assert_eq!(new.string_parameter, "new");
    }

    #[test]
    fn test_set_parameter_applies_to_new_instances() {
        let mut registry = TypeRegistry::new();
        registry.register_type("foo", mock_constructor(), args!["%text%"]);
        let mut container = container(registry);

        container.set_parameter("text", "late");
        assert_eq!(container.parameter("text"), Some(&Value::from("late")));
        let foo: Arc<MockType> = container.get_as("foo").unwrap();
        assert_eq!(foo.string_parameter, "late");
    }
}

// ============================================================================
// Cycle detection
// ============================================================================

#[cfg(test)]
mod cycle_tests {
    use super::*;

    #[test]
    fn test_mutual_references_fail_with_cycle() {
        let mock_from_service = Callable::from_fn("new_mock_from_service", |service: Arc<Service>| {
            Arc::clone(&service.mock)
        });

        let mut registry = TypeRegistry::new();
        registry.register_type("a", service_constructor(), args!["@b"]);
        registry.register_type("b", mock_from_service, args!["@a"]);
        let container = container(registry);

        let err = container.get("a").unwrap_err();
        assert!(err.is_cycle());
        assert_eq!(
            err.root_cause(),
            &Error::Cycle {
                chain: vec!["a".into(), "b".into(), "a".into()]
            }
        );
        assert!(!container.is_cached("a"));
        assert!(!container.is_cached("b"));
    }

    #[test]
    fn test_self_alias_is_a_cycle() {
        let mut registry = TypeRegistry::new();
        registry.register("loop", TypeFactory::alias("loop"));

        let err = container(registry).get("loop").unwrap_err();
        assert_eq!(
            err.root_cause(),
            &Error::Cycle {
                chain: vec!["loop".into(), "loop".into()]
            }
        );
    }

    #[test]
    fn test_concurrent_cycle_fails_instead_of_blocking() {
        let slow = || {
            Callable::from_fn("new_slow_mock_type", || {
                thread::sleep(Duration::from_millis(200));
                Arc::new(MockType::default())
            })
        };
        let node = || {
            Callable::from_fn("new_node", |mock: Arc<MockType>, _next: Value| {
                Arc::new(Service { mock })
            })
        };

        let mut registry = TypeRegistry::new();
        registry.register_type("slow_a", slow(), args![]);
        registry.register_type("slow_b", slow(), args![]);
        registry.register_type("a", node(), args!["@slow_a", "@b"]);
        registry.register_type("b", node(), args!["@slow_b", "@a"]);
        let container = Arc::new(container(registry));

        let (sender, receiver) = mpsc::channel();
        for id in ["a", "b"] {
            let container = Arc::clone(&container);
            let sender = sender.clone();
            thread::spawn(move || {
                let _ = sender.send((id, container.get(id)));
            });
        }

        for _ in 0..2 {
            let (id, result) = receiver
                .recv_timeout(Duration::from_secs(5))
                .expect("concurrent retrieval of a cycle must not block");
            let err = result.unwrap_err();
            assert!(err.is_cycle(), "{id}: unexpected error {err}");
        }
        assert!(!container.is_cached("a"));
        assert!(!container.is_cached("b"));
        assert!(container.is_cached("slow_a"));
    }
}
