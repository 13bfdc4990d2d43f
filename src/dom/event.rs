use super::Element;
use serde_json::Value;
use std::cell::{Cell, RefCell};

/// Handle returned by [`Element::add_event_listener`], used to unlisten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A DOM-style event travelling from its target up through the ancestors.
#[derive(Debug)]
pub struct Event {
    kind: String,
    detail: Value,
    bubbles: bool,
    key: Option<String>,
    target: RefCell<Option<Element>>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// A non-bubbling event with an empty detail payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: Value::Null,
            bubbles: false,
            key: None,
            target: RefCell::new(None),
            propagation_stopped: Cell::new(false),
        }
    }

    /// A custom event carrying `detail`, like `new CustomEvent(kind, { detail, bubbles })`.
    pub fn custom(kind: impl Into<String>, detail: Value, bubbles: bool) -> Self {
        Self {
            detail,
            bubbles,
            ..Self::new(kind)
        }
    }

    pub fn click() -> Self {
        Self {
            bubbles: true,
            ..Self::new("click")
        }
    }

    pub fn keydown(key: impl Into<String>) -> Self {
        Self {
            bubbles: true,
            key: Some(key.into()),
            ..Self::new("keydown")
        }
    }

    pub fn transition_end() -> Self {
        Self {
            bubbles: true,
            ..Self::new("transitionend")
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn detail(&self) -> &Value {
        &self.detail
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The element the event was dispatched on. `None` until dispatched.
    pub fn target(&self) -> Option<Element> {
        self.target.borrow().clone()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn set_target(&self, target: &Element) {
        *self.target.borrow_mut() = Some(target.clone());
    }
}
