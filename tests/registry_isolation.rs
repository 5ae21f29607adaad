//! Integration tests for registry isolation and multiple registries.
//!
//! Registries created by `make_registry`, declared with `define_registry!`, and
//! the default registry never see each other's names.

use futures::FutureExt;
use promise_registry::{define_registry, make_registry, RegistryApi, RegistryError};

#[tokio::test]
async fn test_multiple_isolated_registries() {
    let spider = make_registry::<u32>();
    let beetle = make_registry::<u32>();
    let dog = make_registry::<u32>();
    let human = make_registry::<u32>();

    spider.register_value("legs", 8).unwrap();
    beetle.register_value("legs", 6).unwrap();
    dog.register_value("legs", 4).unwrap();
    human.register_value("legs", 2).unwrap();

    assert_eq!(spider.once("legs").unwrap().await.unwrap(), 8);
    assert_eq!(beetle.once("legs").unwrap().await.unwrap(), 6);
    assert_eq!(dog.once("legs").unwrap().await.unwrap(), 4);
    assert_eq!(human.once("legs").unwrap().await.unwrap(), 2);
}

#[test]
fn test_registry_does_not_leak_between_instances() {
    let a = make_registry::<String>();
    let b = make_registry::<String>();

    a.register_value("x", "only in A".to_string()).unwrap();

    // `b` has never seen "x", so its future stays pending.
    let waiting = b.once("x").unwrap();
    assert!(waiting.now_or_never().is_none());
}

#[test]
fn test_duplicate_is_per_registry() {
    let a = make_registry::<u8>();
    let b = make_registry::<u8>();

    a.register_value("planets", 9).unwrap();
    assert!(b.register_value("planets", 8).is_ok());

    assert_eq!(
        a.register_value("planets", 10).unwrap_err(),
        RegistryError::DuplicateRegistration {
            name: "planets".to_string()
        }
    );
}

#[test]
fn test_factory_registry_is_isolated_from_default() {
    promise_registry::register_value("isolation-comet", "Icy body").unwrap();

    let fresh = make_registry::<&'static str>();
    assert!(fresh.once("isolation-comet").unwrap().now_or_never().is_none());
    assert!(fresh.register_value("isolation-comet", "Tail").is_ok());
}

#[test]
fn test_same_name_different_static_registries() {
    define_registry!(reg_a, i32);
    define_registry!(reg_b, i32);

    reg_a::register_value("n", 100).unwrap();
    reg_b::register_value("n", 200).unwrap();

    let a = futures::executor::block_on(reg_a::once("n").unwrap()).unwrap();
    let b = futures::executor::block_on(reg_b::once("n").unwrap()).unwrap();

    assert_eq!(a, 100);
    assert_eq!(b, 200);
}

#[test]
fn test_registry_scoping() {
    // Registries can be scoped to different modules
    mod module_a {
        use promise_registry::define_registry;
        define_registry!(scoped, String);

        pub fn setup() {
            scoped::register_value("owner", "module A".to_string()).unwrap();
        }

        pub fn get_value() -> String {
            futures::executor::block_on(scoped::once("owner").unwrap()).unwrap()
        }
    }

    mod module_b {
        use promise_registry::define_registry;
        define_registry!(scoped, String);

        pub fn setup() {
            scoped::register_value("owner", "module B".to_string()).unwrap();
        }

        pub fn get_value() -> String {
            futures::executor::block_on(scoped::once("owner").unwrap()).unwrap()
        }
    }

    module_a::setup();
    module_b::setup();

    assert_eq!(module_a::get_value(), "module A");
    assert_eq!(module_b::get_value(), "module B");
}

#[test]
fn test_registry_with_tracing_isolation() {
    let traced = make_registry::<i32>();
    let silent = make_registry::<i32>();

    let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let events_clone = events.clone();

    traced.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(format!("{}", event));
    });

    traced.register_value("one", 1).unwrap();
    silent.register_value("two", 2).unwrap();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0], "register { name: one, placeholder: false }");
}
