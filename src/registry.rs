//! Registry instances: the factory-built [`Registry`] and the process-wide default.
//!
//! # Examples
//!
//! ```
//! use promise_registry::{make_registry, RegistryApi};
//!
//! let birds = make_registry::<&str>();
//!
//! // The consumer may arrive before the producer.
//! let waiting = birds.once("hawk").unwrap();
//! birds.register_value("hawk", "Bird of prey").unwrap();
//!
//! assert_eq!(futures::executor::block_on(waiting).unwrap(), "Bird of prey");
//! ```

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, LazyLock, Mutex};

use futures::FutureExt;

use crate::registry_trait::{Entries, TraceSlot};
use crate::rendezvous::{Outcome, Rendezvous};
use crate::{RegistryApi, RegistryError, RegistryEvent};

/// Type-erased value stored by the default registry.
///
/// Recover the concrete type with [`Arc::downcast`].
pub type AnyValue = Arc<dyn Any + Send + Sync>;

/// A registry owning its entries.
///
/// Every instance is isolated: a name used in one registry is invisible to all
/// others, including the default registry.
pub struct Registry<T> {
    entries: Entries<T>,
    trace: TraceSlot,
}

impl<T> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::default(),
            trace: Mutex::new(None),
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Names are deliberately not listed.
impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

impl<T> RegistryApi for Registry<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    fn entries(&self) -> &Entries<T> {
        &self.entries
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }
}

/// Creates a new, empty registry disjoint from every other registry.
pub fn make_registry<T>() -> Registry<T> {
    Registry::new()
}

// -------------------------------------------------------------------------------------------------
// Default registry
// -------------------------------------------------------------------------------------------------

/// The process-wide registry behind the free functions of this crate.
static DEFAULT_REGISTRY: LazyLock<Registry<AnyValue>> = LazyLock::new(Registry::new);

/// Returns the process-wide default registry.
///
/// It is created empty on first use and lives until the process exits, so its
/// placeholders are never abandoned.
pub fn default_registry() -> &'static Registry<AnyValue> {
    &DEFAULT_REGISTRY
}

/// Returns a future for the value registered under `name` in the default registry.
///
/// # Examples
///
/// ```
/// use promise_registry::{once, register_value};
///
/// let waiting = once("docs-heron").unwrap();
/// register_value("docs-heron", "Wading bird").unwrap();
///
/// let value = futures::executor::block_on(waiting).unwrap();
/// assert_eq!(*value.downcast::<&str>().unwrap(), "Wading bird");
/// ```
pub fn once(name: &str) -> Result<Rendezvous<AnyValue>, RegistryError> {
    DEFAULT_REGISTRY.once(name)
}

/// Registers a value source in the default registry and returns it unchanged.
pub fn register(
    name: &str,
    source: Rendezvous<AnyValue>,
) -> Result<Rendezvous<AnyValue>, RegistryError> {
    DEFAULT_REGISTRY.register(name, source)
}

/// Erases `value` into an [`AnyValue`]. An `AnyValue` is passed through as-is
/// rather than wrapped a second time.
fn erase<V: Any + Send + Sync>(value: V) -> AnyValue {
    let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
    match boxed.downcast::<AnyValue>() {
        Ok(erased) => *erased,
        Err(boxed) => Arc::from(boxed),
    }
}

/// Registers an already-available value in the default registry.
///
/// Plain values are stored behind an `Arc`; an [`AnyValue`] is stored as given,
/// so both downcast to the same concrete type.
pub fn register_value<V: Any + Send + Sync>(
    name: &str,
    value: V,
) -> Result<Rendezvous<AnyValue>, RegistryError> {
    DEFAULT_REGISTRY.register_value(name, erase(value))
}

/// Registers a future as the value source for `name` in the default registry.
///
/// # Examples
///
/// ```
/// use promise_registry::{once, register_future};
///
/// register_future("docs-planets", async { Ok(8u32) }).unwrap();
///
/// let value = futures::executor::block_on(once("docs-planets").unwrap()).unwrap();
/// assert_eq!(*value.downcast::<u32>().unwrap(), 8);
/// ```
pub fn register_future<V, F>(name: &str, future: F) -> Result<Rendezvous<AnyValue>, RegistryError>
where
    V: Any + Send + Sync,
    F: Future<Output = Outcome<V>> + Send + 'static,
{
    DEFAULT_REGISTRY.register_future(
        name,
        future.map(|outcome| outcome.map(erase)),
    )
}

/// Sets a tracing callback on the default registry.
pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
    DEFAULT_REGISTRY.set_trace_callback(callback);
}

/// Clears the tracing callback of the default registry.
pub fn clear_trace_callback() {
    DEFAULT_REGISTRY.clear_trace_callback();
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceError;
    use futures::executor::block_on;

    #[test]
    fn test_registries_are_isolated() {
        let a = make_registry::<i32>();
        let b = make_registry::<i32>();

        a.register_value("legs", 8).unwrap();

        assert!(b.once("legs").unwrap().now_or_never().is_none());
        assert!(b.register_value("legs", 6).is_ok());

        assert_eq!(block_on(a.once("legs").unwrap()).unwrap(), 8);
        assert_eq!(block_on(b.once("legs").unwrap()).unwrap(), 6);
    }

    #[test]
    fn test_dropped_registry_abandons_placeholders() {
        let registry = Registry::<String>::new();
        let waiting = registry.once("ocelot").unwrap();
        drop(registry);

        let err = block_on(waiting).unwrap_err();
        assert!(matches!(err, SourceError::Abandoned { name } if name == "ocelot"));
    }

    #[test]
    fn test_settled_values_outlive_registry() {
        let registry = Registry::<String>::new();
        let waiting = registry.once("otter").unwrap();
        registry.register_value("otter", "Swims".to_string()).unwrap();
        drop(registry);

        assert_eq!(block_on(waiting).unwrap(), "Swims");
    }

    #[test]
    fn test_debug_hides_names() {
        let registry = Registry::<u8>::default();
        registry.register_value("secret", 1).unwrap();
        assert_eq!(format!("{:?}", registry), "Registry { .. }");
    }

    #[test]
    fn test_default_registry_is_one_instance() {
        assert!(std::ptr::eq(default_registry(), default_registry()));
    }

    #[test]
    fn test_erase_does_not_rewrap_any_value() {
        let plain = erase(5u16);
        assert_eq!(*plain.downcast::<u16>().unwrap(), 5);

        let original: AnyValue = Arc::new(5u16);
        let erased = erase(original.clone());
        assert!(Arc::ptr_eq(&erased, &original));
        assert_eq!(*erased.downcast::<u16>().unwrap(), 5);
    }

    #[test]
    fn test_register_value_accepts_erased_value() {
        let waiting = once("registry-rs-kiwi").unwrap();
        register_value("registry-rs-kiwi", Arc::new(3i32) as AnyValue).unwrap();

        let value = block_on(waiting).unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 3);
    }

    #[test]
    fn test_register_future_on_default_registry() {
        let waiting = once("registry-rs-wren").unwrap();
        register_future("registry-rs-wren", async { Ok::<_, SourceError>(String::from("Tiny")) })
            .unwrap();

        let value = block_on(waiting).unwrap();
        assert_eq!(*value.downcast::<String>().unwrap(), "Tiny");
    }
}
