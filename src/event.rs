use serde::Serialize;
use serde_json::Value as JsonValue;

/// A synthesized event descriptor handed to the host for delivery.
///
/// Registry-triggered events are always cancelable and never bubble. The
/// `detail` payload is opaque JSON so embedding hosts can forward it across
/// their own boundary unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct CustomEvent {
    name: String,
    cancelable: bool,
    bubbles: bool,
    detail: Option<JsonValue>,
}

impl CustomEvent {
    pub fn new(name: &str, detail: Option<JsonValue>) -> Self {
        Self {
            name: name.to_string(),
            cancelable: true,
            bubbles: false,
            detail,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn detail(&self) -> Option<&JsonValue> {
        self.detail.as_ref()
    }
}
