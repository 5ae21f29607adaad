/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use promise_registry::RegistryEvent;
///
/// let event = RegistryEvent::Once { name: "hawk".into(), found: false };
/// assert_eq!(event.to_string(), "once { name: hawk, found: false }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A consumer asked for a name.
    Once {
        name: String,
        /// Whether an entry already existed. `false` means a placeholder was created.
        found: bool,
    },

    /// A producer supplied a value source for a name.
    Register {
        name: String,
        /// Whether the registration retired a placeholder with waiters attached.
        placeholder: bool,
    },

    /// A registration was rejected because the name already had a value.
    Duplicate { name: String },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Once { name, found } => {
                write!(f, "once {{ name: {name}, found: {found} }}")
            }
            RegistryEvent::Register { name, placeholder } => {
                write!(f, "register {{ name: {name}, placeholder: {placeholder} }}")
            }
            RegistryEvent::Duplicate { name } => write!(f, "duplicate {{ name: {name} }}"),
        }
    }
}
