use std::fmt;
use std::rc::Rc;

use crate::binding::Binding;
use crate::error::{non_empty, ValidationError};
use crate::target::{Handler, TargetRef};

/// Bookkeeping for one bindable target: the target reference plus the
/// ordered list of bindings the registry has installed on it.
///
/// Records mirror native listener state; the registry keeps the two in sync
/// on every mutating call and is the only code that talks to the host. A
/// record is never discarded once created, even after its binding list
/// empties — identity lookups depend on record presence.
pub struct TargetRecord {
    target: TargetRef,
    bindings: Vec<Binding>,
}

impl fmt::Debug for TargetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRecord")
            .field("target", &Rc::as_ptr(&self.target))
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl TargetRecord {
    pub(crate) fn new(target: TargetRef) -> Self {
        Self {
            target,
            bindings: Vec::new(),
        }
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    /// Every binding, in registration order (except where an insert-first
    /// reordering has been applied).
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Bindings for `name`, additionally filtered by handler identity when
    /// `handler` is supplied, in stored order.
    pub fn events(
        &self,
        name: &str,
        handler: Option<&Handler>,
    ) -> Result<Vec<Binding>, ValidationError> {
        non_empty("name", name)?;
        Ok(self
            .bindings
            .iter()
            .filter(|binding| binding.matches(name, handler))
            .cloned()
            .collect())
    }

    /// Append a binding at the end of the list. Duplicate (name, handler)
    /// pairs are allowed; the registry never deduplicates.
    pub fn add_event(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Drop every binding matched by the same predicate as
    /// [`events`](TargetRecord::events), preserving the relative order of
    /// the remainder. Removing nothing is a no-op, not an error.
    pub fn remove_events(
        &mut self,
        name: &str,
        handler: Option<&Handler>,
    ) -> Result<(), ValidationError> {
        non_empty("name", name)?;
        self.bindings.retain(|binding| !binding.matches(name, handler));
        Ok(())
    }
}
