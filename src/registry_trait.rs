//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! the rendezvous operations (`once`, `register`) and for tracing.
//!
//! The registry is name-based: each name has at most one entry, which is either a
//! placeholder waiting for a producer or a settled value source. A settled name
//! can never be registered again.

use std::collections::hash_map::Entry as Slot;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::rendezvous::{self, Outcome, Rendezvous, Resolver};
use crate::{RegistryError, RegistryEvent};

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Storage for a registry's trace callback.
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// Storage for a registry's entries, keyed by name.
pub type Entries<T> = Mutex<HashMap<String, Entry<T>>>;

/// The per-name record kept by a registry.
///
/// Entries are only created and replaced by [`RegistryApi`] operations.
pub struct Entry<T> {
    state: EntryState<T>,
}

enum EntryState<T> {
    /// A consumer arrived first; `resolver` settles `future` once a producer arrives.
    Placeholder {
        resolver: Resolver<T>,
        future: Rendezvous<T>,
    },
    /// A producer supplied `future`. Final.
    Settled { future: Rendezvous<T> },
}

impl<T> Entry<T> {
    fn placeholder(resolver: Resolver<T>, future: Rendezvous<T>) -> Self {
        Self {
            state: EntryState::Placeholder { resolver, future },
        }
    }

    fn settled(future: Rendezvous<T>) -> Self {
        Self {
            state: EntryState::Settled { future },
        }
    }

    fn is_settled(&self) -> bool {
        matches!(self.state, EntryState::Settled { .. })
    }

    fn future(&self) -> Rendezvous<T> {
        match &self.state {
            EntryState::Placeholder { future, .. } | EntryState::Settled { future } => {
                future.clone()
            }
        }
    }

    fn into_resolver(self) -> Option<Resolver<T>> {
        match self.state {
            EntryState::Placeholder { resolver, .. } => Some(resolver),
            EntryState::Settled { .. } => None,
        }
    }
}

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`entries` and `trace`) to be implemented by the implementor.
/// [`Registry`](crate::Registry) keeps both in owned fields; [`define_registry!`](crate::define_registry)
/// keeps them in statics.
pub trait RegistryApi {
    /// The type of value exchanged through this registry.
    type Value: Clone + Send + Sync + 'static;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Access the trace callback storage.
    fn trace(&self) -> &TraceSlot;

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked for every `once` and `register` call, after the
    /// entries lock has been released, so it may call back into the registry.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Emit a registry event using the current callback.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller. Neither
    /// the entries lock nor the trace lock is held at that point.
    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Access the entries storage.
    fn entries(&self) -> &Entries<Self::Value>;

    /// Returns a future for the value registered under `name`, now or later.
    ///
    /// The first call for an unknown name stores a placeholder; every later call
    /// returns a handle to whatever the entry currently holds. All handles for a
    /// name resolve to the same outcome.
    ///
    /// Every string, including `""`, is a valid name, so this currently always
    /// returns `Ok`.
    fn once(&self, name: &str) -> Result<Rendezvous<Self::Value>, RegistryError> {
        let (future, found) = {
            let mut entries = self.entries().lock().unwrap_or_else(PoisonError::into_inner);

            match entries.get(name) {
                Some(entry) => (entry.future(), true),
                None => {
                    let (resolver, future) = rendezvous::placeholder(name);
                    entries.insert(
                        name.to_owned(),
                        Entry::placeholder(resolver, future.clone()),
                    );
                    (future, false)
                }
            }
        };

        if found {
            tracing::trace!(entry = name, "once: returning existing entry");
        } else {
            tracing::debug!(entry = name, "once: created placeholder");
        }

        self.emit_event(&RegistryEvent::Once {
            name: name.to_owned(),
            found,
        });

        Ok(future)
    }

    /// Supplies the value source for `name` and returns it unchanged.
    ///
    /// If consumers are already waiting on a placeholder, the placeholder is
    /// chained onto `source` and the entry is replaced by `source` itself, so
    /// later `once` calls receive `source` directly.
    ///
    /// # Errors
    ///
    /// - `DuplicateRegistration` if `name` already has a value. The registry is
    ///   left unchanged and `source` is dropped without being polled.
    fn register(
        &self,
        name: &str,
        source: Rendezvous<Self::Value>,
    ) -> Result<Rendezvous<Self::Value>, RegistryError> {
        let retired = {
            let mut entries = self.entries().lock().unwrap_or_else(PoisonError::into_inner);

            match entries.entry(name.to_owned()) {
                Slot::Occupied(slot) if slot.get().is_settled() => {
                    Err(RegistryError::DuplicateRegistration {
                        name: name.to_owned(),
                    })
                }
                Slot::Occupied(mut slot) => {
                    Ok(slot.insert(Entry::settled(source.clone())).into_resolver())
                }
                Slot::Vacant(slot) => {
                    slot.insert(Entry::settled(source.clone()));
                    Ok(None)
                }
            }
        };

        let resolver = match retired {
            Ok(resolver) => resolver,
            Err(error) => {
                tracing::warn!(entry = name, "register: rejected duplicate registration");
                self.emit_event(&RegistryEvent::Duplicate {
                    name: name.to_owned(),
                });
                return Err(error);
            }
        };

        let placeholder = resolver.is_some();
        if let Some(resolver) = resolver {
            // Err only means every placeholder handle is gone; nobody is waiting.
            let _ = resolver.send(source.clone());
            tracing::debug!(entry = name, "register: settled placeholder");
        } else {
            tracing::debug!(entry = name, "register: stored value source");
        }

        self.emit_event(&RegistryEvent::Register {
            name: name.to_owned(),
            placeholder,
        });

        Ok(source)
    }

    /// Registers a value that is already available.
    fn register_value(
        &self,
        name: &str,
        value: Self::Value,
    ) -> Result<Rendezvous<Self::Value>, RegistryError> {
        self.register(name, Rendezvous::ready(value))
    }

    /// Registers a future as the value source for `name`.
    fn register_future<F>(
        &self,
        name: &str,
        future: F,
    ) -> Result<Rendezvous<Self::Value>, RegistryError>
    where
        F: Future<Output = Outcome<Self::Value>> + Send + 'static,
    {
        self.register(name, Rendezvous::new(future))
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
