//! The future handle handed out by a registry.
//!
//! A [`Rendezvous`] is a cloneable, shareable future. Every clone observes the
//! same outcome, which is what lets many waiters attach to one named value.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use thiserror::Error;

use crate::RegistryError;

/// What a value source eventually yields.
pub type Outcome<T> = Result<T, SourceError>;

/// Failure of a value source.
///
/// Every waiter on a name receives its own copy of the failure, so the type is
/// cheap to clone.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The producer's computation failed.
    #[error("{0}")]
    Failed(Arc<dyn StdError + Send + Sync>),

    /// The producer failed with a plain message.
    #[error("{0}")]
    Message(String),

    /// The owning registry was dropped while the name was still waiting for a producer.
    #[error("registry dropped before a promise was registered with name \"{name}\"")]
    Abandoned { name: String },

    /// A registry call made while producing the value was rejected.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl SourceError {
    /// Wraps any error produced by a value source.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        SourceError::Failed(Arc::new(error))
    }

    /// Builds a failure from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        SourceError::Message(message.into())
    }
}

/// A shareable future resolving to the value registered under a name.
///
/// Cloning a `Rendezvous` yields another handle to the *same* future object;
/// the underlying computation runs at most once no matter how many handles
/// are polled.
pub struct Rendezvous<T> {
    inner: Shared<BoxFuture<'static, Outcome<T>>>,
}

impl<T> Rendezvous<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wraps a future as a value source.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// Wraps a future that fails with an arbitrary error type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use promise_registry::Rendezvous;
    ///
    /// let source = Rendezvous::fallible(async { "42".parse::<u32>() });
    /// let value = futures::executor::block_on(source).unwrap();
    /// assert_eq!(value, 42);
    /// ```
    pub fn fallible<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self::new(future.map(|result| result.map_err(SourceError::new)))
    }

    /// A value source that is already available.
    pub fn ready(value: T) -> Self {
        Self::new(future::ready(Ok(value)))
    }

    /// A value source that has already failed.
    pub fn failed(error: SourceError) -> Self {
        Self::new(future::ready(Err(error)))
    }
}

impl<T: Clone> Rendezvous<T> {
    /// Returns `true` if both handles refer to the same future object.
    ///
    /// Handles that are not `ptr_eq` may still resolve to the same value: a waiter
    /// that arrived before registration holds a placeholder chained onto the
    /// registered source, while later waiters hold the source itself.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// Returns the outcome if some handle has already driven the future to completion.
    pub fn peek(&self) -> Option<&Outcome<T>> {
        self.inner.peek()
    }
}

impl<T: Clone> Future for Rendezvous<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<T> Clone for Rendezvous<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Rendezvous<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendezvous")
            .field("outcome", &self.peek())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Placeholders
// -------------------------------------------------------------------------------------------------

/// Capability to settle a placeholder. Consumed on use, so it settles at most once.
pub(crate) type Resolver<T> = oneshot::Sender<Rendezvous<T>>;

/// Creates an unresolved future for `name` together with its resolver.
///
/// The resolver hands over the registered value source; the placeholder then
/// awaits that source, so holders of the placeholder and holders of the source
/// observe the same outcome.
pub(crate) fn placeholder<T>(name: &str) -> (Resolver<T>, Rendezvous<T>)
where
    T: Clone + Send + Sync + 'static,
{
    let (resolver, handoff) = oneshot::channel::<Rendezvous<T>>();
    let name = name.to_owned();

    let future = Rendezvous::new(async move {
        match handoff.await {
            Ok(source) => source.await,
            Err(oneshot::Canceled) => Err(SourceError::Abandoned { name }),
        }
    });

    (resolver, future)
}
