//! Bookkeeping layer between client code and a host's native event
//! dispatch facility.
//!
//! Handlers are registered on bindable targets (document elements or a
//! window-like singleton) through a [`Registry`], which mirrors every
//! native registration into per-target records so callers can later query,
//! selectively remove, or reorder them, and synthesize custom events with
//! an arbitrary payload. The host side is abstracted behind the
//! [`EventTarget`] trait.

pub mod binding;
pub mod error;
pub mod event;
pub mod record;
pub mod registry;
pub mod target;

pub use binding::{Binding, ListenerOptions};
pub use error::{RegistryError, ValidationError};
pub use event::CustomEvent;
pub use record::TargetRecord;
pub use registry::Registry;
pub use target::{EventTarget, Handler, TargetRef, TargetScope};
