//! # Promise Registry
//!
//! A thread-safe rendezvous registry for futures identified by a string name.
//! A consumer can ask for the eventual value of a name before or after a producer
//! supplies it; both observe the same outcome, and a name can be supplied at most once.
//!
//! ## Quick Start
//!
//! ```rust
//! use promise_registry::{once, register_value};
//!
//! // The consumer arrives first and receives a pending future.
//! let waiting = once("hawk").unwrap();
//!
//! // The producer supplies the value later.
//! register_value("hawk", "Bird of prey").unwrap();
//!
//! let value = futures::executor::block_on(waiting).unwrap();
//! assert_eq!(*value.downcast::<&str>().unwrap(), "Bird of prey");
//! ```
//!
//! ## Features
//!
//! - **Order-independent**: consumers and producers may arrive in either order
//! - **Write-once**: a second registration under the same name is rejected
//! - **Isolated instances**: [`make_registry`] and [`define_registry!`] create registries
//!   that never see each other's names
//! - **Executor-agnostic**: returned futures are plain [`Future`](std::future::Future)s
//! - **Tracing support**: `tracing` diagnostics plus an optional per-registry callback
//!
//! ## Main Functions
//!
//! - [`once`] - Get a future for a name in the default registry
//! - [`register`] - Supply a value source for a name in the default registry
//! - [`register_value`] / [`register_future`] - Convenience forms of [`register`]
//! - [`make_registry`] - Create a new isolated registry
//! - [`default_registry`] - Access the default registry as a value
//! - [`set_trace_callback`] - Set up tracing for the default registry

mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod rendezvous;

// Re-export the main public API
pub use registry::{
    clear_trace_callback, default_registry, make_registry, once, register, register_future,
    register_value, set_trace_callback, AnyValue, Registry,
};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{Entries, Entry, RegistryApi, TraceCallback, TraceSlot};
pub use rendezvous::{Outcome, Rendezvous, SourceError};
