use crate::error::{non_empty, ValidationError};
use crate::target::Handler;

/// Listener modifiers mirroring the host's native listener options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Detach automatically after the first delivery.
    pub once: bool,
    /// The handler promises never to cancel the event.
    pub passive: bool,
    /// Run during the capture phase instead of the bubble phase.
    pub capture: bool,
}

/// One recorded (event name, handler, modifiers) association for a target.
///
/// Immutable after construction; the registry appends and drops whole
/// bindings, it never edits one in place.
#[derive(Debug, Clone)]
pub struct Binding {
    name: String,
    handler: Handler,
    options: ListenerOptions,
}

impl Binding {
    /// A binding with all modifiers left at their defaults.
    pub fn new(name: &str, handler: Handler) -> Result<Self, ValidationError> {
        Self::with_options(name, handler, ListenerOptions::default())
    }

    pub fn with_options(
        name: &str,
        handler: Handler,
        options: ListenerOptions,
    ) -> Result<Self, ValidationError> {
        non_empty("name", name)?;
        Ok(Self {
            name: name.to_string(),
            handler,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn options(&self) -> ListenerOptions {
        self.options
    }

    pub fn once(&self) -> bool {
        self.options.once
    }

    pub fn passive(&self) -> bool {
        self.options.passive
    }

    pub fn capture(&self) -> bool {
        self.options.capture
    }

    /// True when this binding matches `name` and, if supplied, `handler` by
    /// identity.
    pub(crate) fn matches(&self, name: &str, handler: Option<&Handler>) -> bool {
        self.name == name && handler.is_none_or(|h| self.handler.ptr_eq(h))
    }
}
