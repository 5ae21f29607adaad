use thiserror::Error;

/// Registry-level failures.
///
/// Both variants are raised synchronously by the call that caused them and leave
/// the registry untouched. They never poison an entry or affect other names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The call was malformed.
    ///
    /// Any `&str` is a valid name and every [`Rendezvous`](crate::Rendezvous) is a
    /// valid source, so the registries in this crate never return this variant.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A value was already registered under this name.
    #[error("promise already registered with name \"{name}\"")]
    DuplicateRegistration { name: String },
}
