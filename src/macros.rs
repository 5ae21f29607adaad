//! Macros for creating static, module-scoped registries.

/// Creates a complete static registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - Entries storage static (hidden)
/// - Trace callback static (hidden)
/// - An `Api` struct that implements `RegistryApi`
/// - Free functions delegating to it
///
/// `define_registry!(name)` stores type-erased [`AnyValue`](crate::AnyValue)s;
/// `define_registry!(name, Type)` stores `Type`, which must be nameable from the
/// module the macro is invoked in.
///
/// # Examples
///
/// ```rust
/// use promise_registry::define_registry;
///
/// define_registry!(birds, &'static str);
///
/// let waiting = birds::once("hawk").unwrap();
/// birds::register_value("hawk", "Bird of prey").unwrap();
///
/// assert_eq!(futures::executor::block_on(waiting).unwrap(), "Bird of prey");
/// ```
///
/// # Multiple Registries
///
/// Each invocation is isolated from every other registry:
///
/// ```rust
/// use promise_registry::define_registry;
/// use futures::FutureExt;
///
/// define_registry!(spiders, u32);
/// define_registry!(beetles, u32);
///
/// spiders::register_value("legs", 8).unwrap();
///
/// // Nothing registered "legs" in `beetles` yet.
/// assert!(beetles::once("legs").unwrap().now_or_never().is_none());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        $crate::define_registry!($name, $crate::AnyValue);
    };
    ($name:ident, $value:ty) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;
            use std::sync::{LazyLock, Mutex};

            // Entries storage (module-private)
            static ENTRIES: LazyLock<$crate::Entries<$value>> = LazyLock::new(Default::default);

            // Trace callback storage (module-private)
            static TRACE: $crate::TraceSlot = Mutex::new(None);

            /// Zero-sized type that implements the registry API over the statics above.
            struct Api;

            impl $crate::RegistryApi for Api {
                type Value = $value;

                fn entries(&self) -> &$crate::Entries<$value> {
                    &ENTRIES
                }

                fn trace(&self) -> &$crate::TraceSlot {
                    &TRACE
                }
            }

            const API: Api = Api;

            /// Returns a future for the value registered under `name`.
            pub fn once(
                name: &str,
            ) -> Result<$crate::Rendezvous<$value>, $crate::RegistryError> {
                use $crate::RegistryApi;
                API.once(name)
            }

            /// Registers a value source and returns it unchanged.
            pub fn register(
                name: &str,
                source: $crate::Rendezvous<$value>,
            ) -> Result<$crate::Rendezvous<$value>, $crate::RegistryError> {
                use $crate::RegistryApi;
                API.register(name, source)
            }

            /// Registers an already-available value.
            pub fn register_value(
                name: &str,
                value: $value,
            ) -> Result<$crate::Rendezvous<$value>, $crate::RegistryError> {
                use $crate::RegistryApi;
                API.register_value(name, value)
            }

            /// Registers a future as the value source for `name`.
            pub fn register_future<F>(
                name: &str,
                future: F,
            ) -> Result<$crate::Rendezvous<$value>, $crate::RegistryError>
            where
                F: std::future::Future<Output = $crate::Outcome<$value>> + Send + 'static,
            {
                use $crate::RegistryApi;
                API.register_future(name, future)
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                use $crate::RegistryApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                API.clear_trace_callback()
            }
        }
    };
}
