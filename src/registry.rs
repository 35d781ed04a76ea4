use std::rc::Rc;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::binding::{Binding, ListenerOptions};
use crate::error::{non_empty, RegistryError};
use crate::event::CustomEvent;
use crate::record::TargetRecord;
use crate::target::{Handler, TargetRef, TargetScope};

/// How long to wait before putting a cleared disabled flag back. Matches
/// the one-tick deferral the workaround needs; restoring synchronously
/// suppresses the delivery itself on hosts with the quirk.
const DISABLED_RESTORE_DELAY: Duration = Duration::from_millis(1);

/// The bookkeeping layer between client code and the host's native event
/// facility.
///
/// Tracks, per target, an ordered list of (event name, handler, options)
/// bindings, and is the only entity that talks to the host: every mutating
/// operation changes native listener state first, then mirrors the change
/// into the matching [`TargetRecord`]. Records are found by `Rc` pointer
/// identity, created lazily, and kept for the registry's lifetime even when
/// their binding lists empty.
///
/// All operations accept a single target or an ordered collection of
/// targets; collections are processed sequentially in input order with no
/// rollback on partial failure.
#[derive(Debug, Default)]
pub struct Registry {
    targets: Vec<TargetRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in creation order.
    pub fn records(&self) -> &[TargetRecord] {
        &self.targets
    }

    /// The record for `target`, if one was ever created.
    pub fn record(&self, target: &TargetRef) -> Option<&TargetRecord> {
        self.targets
            .iter()
            .find(|record| Rc::ptr_eq(record.target(), target))
    }

    /// Recorded bindings for `name` on `target`, optionally narrowed by
    /// handler identity. A target with no record yields an empty result,
    /// never an error.
    pub fn events(
        &self,
        target: &TargetRef,
        name: &str,
        handler: Option<&Handler>,
    ) -> Result<Vec<Binding>, RegistryError> {
        non_empty("name", name)?;
        match self.record(target) {
            Some(record) => Ok(record.events(name, handler)?),
            None => Ok(Vec::new()),
        }
    }

    /// Install `handler` for `name` on every target in `scope`: native
    /// attach first, then a mirroring binding appended to the target's
    /// record. Repeated calls append duplicate bindings; whether the host
    /// deduplicates identical native registrations is host-defined.
    pub fn register(
        &mut self,
        scope: impl Into<TargetScope>,
        name: &str,
        handler: &Handler,
    ) -> Result<(), RegistryError> {
        non_empty("name", name)?;
        for target in scope.into().into_targets() {
            self.register_one(&target, name, handler)?;
        }
        Ok(())
    }

    /// Install `handler` so it is the first of all handlers for `name` on
    /// each target to run, including handlers registered earlier.
    ///
    /// Native listener tables cannot be reordered in place, so every
    /// existing registration for `name` is detached, the new handler is
    /// attached, and the old registrations are re-attached behind it in
    /// their original relative order, all through the normal register path.
    /// This sequence is not atomic: if a re-registration fails partway, the
    /// members not yet re-attached stay unregistered and the error
    /// propagates.
    pub fn register_first(
        &mut self,
        scope: impl Into<TargetScope>,
        name: &str,
        handler: &Handler,
    ) -> Result<(), RegistryError> {
        non_empty("name", name)?;
        for target in scope.into().into_targets() {
            self.register_first_one(&target, name, handler)?;
        }
        Ok(())
    }

    /// Remove registrations for `name` on every target in `scope`. With a
    /// handler, only that (name, handler) pair is removed; without, every
    /// binding the record currently knows about for `name` is detached and
    /// cleared — registrations made outside this registry are untouched.
    /// A target with no record is a silent no-op.
    pub fn unregister(
        &mut self,
        scope: impl Into<TargetScope>,
        name: &str,
        handler: Option<&Handler>,
    ) -> Result<(), RegistryError> {
        non_empty("name", name)?;
        for target in scope.into().into_targets() {
            self.unregister_one(&target, name, handler)?;
        }
        Ok(())
    }

    /// Synthesize a cancelable, non-bubbling event named `name` carrying
    /// `detail` and deliver it to every target in `scope`, in order.
    ///
    /// Targets whose disabled flag is set get the workaround for hosts that
    /// refuse delivery to disabled targets: the flag is cleared, the event
    /// delivered, and the flag restored one scheduler tick later. The
    /// restoration runs on the current thread's local task set, so
    /// dispatching to a disabled target must happen inside one (a
    /// `tokio::task::LocalSet`); there is no cancellation hook once it is
    /// scheduled.
    pub fn dispatch(
        &self,
        scope: impl Into<TargetScope>,
        name: &str,
        detail: Option<JsonValue>,
    ) -> Result<(), RegistryError> {
        non_empty("name", name)?;
        for target in scope.into().into_targets() {
            let event = CustomEvent::new(name, detail.clone());
            Self::dispatch_one(&target, &event)?;
        }
        Ok(())
    }

    fn ensure_record(&mut self, target: &TargetRef) -> &mut TargetRecord {
        let index = match self
            .targets
            .iter()
            .position(|record| Rc::ptr_eq(record.target(), target))
        {
            Some(index) => index,
            None => {
                self.targets.push(TargetRecord::new(Rc::clone(target)));
                self.targets.len() - 1
            }
        };
        &mut self.targets[index]
    }

    fn record_mut(&mut self, target: &TargetRef) -> Option<&mut TargetRecord> {
        self.targets
            .iter_mut()
            .find(|record| Rc::ptr_eq(record.target(), target))
    }

    fn register_one(
        &mut self,
        target: &TargetRef,
        name: &str,
        handler: &Handler,
    ) -> Result<(), RegistryError> {
        target
            .add_listener(name, handler, ListenerOptions::default())
            .map_err(RegistryError::Host)?;
        let binding = Binding::new(name, handler.clone())?;
        self.ensure_record(target).add_event(binding);
        debug!(name, "registered handler");
        Ok(())
    }

    fn register_first_one(
        &mut self,
        target: &TargetRef,
        name: &str,
        handler: &Handler,
    ) -> Result<(), RegistryError> {
        let prior = self.ensure_record(target).events(name, None)?;
        for binding in &prior {
            self.unregister_one(target, name, Some(binding.handler()))?;
        }
        self.register_one(target, name, handler)?;
        for binding in &prior {
            self.register_one(target, name, binding.handler())?;
        }
        debug!(name, displaced = prior.len(), "registered handler first");
        Ok(())
    }

    fn unregister_one(
        &mut self,
        target: &TargetRef,
        name: &str,
        handler: Option<&Handler>,
    ) -> Result<(), RegistryError> {
        match handler {
            Some(handler) => {
                target
                    .remove_listener(name, handler)
                    .map_err(RegistryError::Host)?;
                if let Some(record) = self.record_mut(target) {
                    record.remove_events(name, Some(handler))?;
                }
            }
            None => {
                let Some(record) = self.record(target) else {
                    return Ok(());
                };
                // Snapshot the matching set before mutating, so a handler
                // calling back in mid-delivery cannot invalidate this
                // iteration.
                let matching = record.events(name, None)?;
                for binding in &matching {
                    target
                        .remove_listener(name, binding.handler())
                        .map_err(RegistryError::Host)?;
                }
                if let Some(record) = self.record_mut(target) {
                    record.remove_events(name, None)?;
                }
                debug!(name, removed = matching.len(), "unregistered handlers");
            }
        }
        Ok(())
    }

    fn dispatch_one(target: &TargetRef, event: &CustomEvent) -> Result<(), RegistryError> {
        if target.disabled() == Some(true) {
            target.set_disabled(false);
            let delivered = target.dispatch_event(event).map_err(RegistryError::Host);
            let target = Rc::clone(target);
            tokio::task::spawn_local(async move {
                tokio::time::sleep(DISABLED_RESTORE_DELAY).await;
                target.set_disabled(true);
            });
            delivered
        } else {
            target.dispatch_event(event).map_err(RegistryError::Host)
        }
    }
}
