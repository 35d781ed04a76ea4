use std::fmt;
use std::rc::Rc;

use anyhow::Result;

use crate::binding::ListenerOptions;
use crate::event::CustomEvent;

/// A reference-counted handler callback, compared by identity.
///
/// Two handlers are the same only when they share the same underlying
/// allocation; wrapping the same closure twice yields distinct handlers.
/// The registry never invokes handlers itself — hosts call
/// [`Handler::call`] when they deliver an event.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&CustomEvent)>);

impl Handler {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&CustomEvent) + 'static,
    {
        Self(Rc::new(callback))
    }

    pub fn call(&self, event: &CustomEvent) {
        (self.0)(event);
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}

/// A bindable target as seen by the registry: a document element or a
/// window-like singleton, bridged to the host's native listener and
/// dispatch facility.
///
/// Identity is `Rc` pointer identity, never structural equality. Detaching
/// a listener that is not attached is host-defined and expected to be a
/// no-op, matching native `removeEventListener` semantics.
pub trait EventTarget {
    /// Attach a native listener for `name`.
    fn add_listener(&self, name: &str, handler: &Handler, options: ListenerOptions) -> Result<()>;

    /// Detach one native listener for `name` previously attached with
    /// `handler`.
    fn remove_listener(&self, name: &str, handler: &Handler) -> Result<()>;

    /// Deliver a synthesized event to this target.
    fn dispatch_event(&self, event: &CustomEvent) -> Result<()>;

    /// Current state of the host's disabled flag, or `None` when the target
    /// has no such concept (the window singleton, for example).
    fn disabled(&self) -> Option<bool> {
        None
    }

    /// Set or clear the disabled flag. Only called on targets whose
    /// [`disabled`](EventTarget::disabled) returns `Some`.
    fn set_disabled(&self, _disabled: bool) {}
}

pub type TargetRef = Rc<dyn EventTarget>;

/// One target, or an ordered collection of targets.
///
/// Every registry operation accepts either. Collections are fanned out
/// member by member in input order, sequentially, with no rollback on
/// partial failure: effects already applied to earlier members stay applied
/// when a later member's call fails.
pub enum TargetScope {
    One(TargetRef),
    Many(Vec<TargetRef>),
}

impl TargetScope {
    pub(crate) fn into_targets(self) -> Vec<TargetRef> {
        match self {
            TargetScope::One(target) => vec![target],
            TargetScope::Many(targets) => targets,
        }
    }
}

impl From<TargetRef> for TargetScope {
    fn from(target: TargetRef) -> Self {
        TargetScope::One(target)
    }
}

impl From<&TargetRef> for TargetScope {
    fn from(target: &TargetRef) -> Self {
        TargetScope::One(Rc::clone(target))
    }
}

impl<T: EventTarget + 'static> From<Rc<T>> for TargetScope {
    fn from(target: Rc<T>) -> Self {
        TargetScope::One(target)
    }
}

impl<T: EventTarget + 'static> From<&Rc<T>> for TargetScope {
    fn from(target: &Rc<T>) -> Self {
        TargetScope::One(Rc::clone(target) as TargetRef)
    }
}

impl From<Vec<TargetRef>> for TargetScope {
    fn from(targets: Vec<TargetRef>) -> Self {
        TargetScope::Many(targets)
    }
}

impl From<&[TargetRef]> for TargetScope {
    fn from(targets: &[TargetRef]) -> Self {
        TargetScope::Many(targets.to_vec())
    }
}
