use crate::constants::TRIGGER_SUFFIX;
use crate::dom::{Element, Event, ListenerId};
use std::rc::Rc;

/// Target of declarative event bindings such as
/// `MDCDialog:closing.trigger="handleClosing($event)"`.
pub trait BindingContext {
    /// Invokes `method` with the native event. Returns `false` when the
    /// context has no such method.
    fn call(&self, method: &str, event: &Event) -> bool;
}

/// A `<event>.trigger` attribute parsed into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerBinding {
    pub event: String,
    pub method: String,
}

impl TriggerBinding {
    /// Parses `name="value"`; `None` unless `name` ends in `.trigger` and
    /// `value` starts with a method name.
    pub fn parse(name: &str, value: &str) -> Option<Self> {
        let event = name.strip_suffix(TRIGGER_SUFFIX)?;
        let method = value.split('(').next()?.trim();
        if event.is_empty() || method.is_empty() {
            return None;
        }
        Some(Self {
            event: event.to_string(),
            method: method.to_string(),
        })
    }
}

/// Wires every trigger attribute on `element` to `context`. The returned
/// listener ids must be handed back to [`unbind_triggers`] on teardown.
pub fn bind_triggers(element: &Element, context: Rc<dyn BindingContext>) -> Vec<ListenerId> {
    element
        .attributes()
        .iter()
        .filter_map(|(name, value)| TriggerBinding::parse(name, value))
        .map(|binding| {
            let context = Rc::clone(&context);
            let method = binding.method.clone();
            element.add_event_listener(&binding.event, move |event| {
                if !context.call(&method, event) {
                    log::warn!("Binding context has no method '{}' for {}", method, event.kind());
                }
            })
        })
        .collect()
}

pub fn unbind_triggers(element: &Element, listeners: &[ListenerId]) {
    for id in listeners {
        element.remove_event_listener(*id);
    }
}
