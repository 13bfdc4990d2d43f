//! Dialog foundation.
//!
//! Transitions complete synchronously: `open` emits opening then opened,
//! `close` emits closing then closed, both carrying the close action.

use crate::constants::{
    DIALOG_CLOSE_ACTION, DIALOG_CLOSING, DIALOG_OPEN, DIALOG_OPENING, DIALOG_SCROLL_LOCK, KEY_ESCAPE,
};
use crate::dom::Event;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Primitive operations a dialog foundation needs from its host.
pub trait DialogAdapter {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn add_body_class(&self, class: &str);
    fn remove_body_class(&self, class: &str);
    /// Whether the event originated on the dialog's scrim.
    fn is_scrim_event(&self, event: &Event) -> bool;
    /// Action declared by the clicked element or its nearest ancestor.
    fn action_from_event(&self, event: &Event) -> Option<String>;
    fn trap_focus(&self);
    fn release_focus(&self);
    fn notify_opening(&self);
    fn notify_opened(&self);
    fn notify_closing(&self, action: Option<&str>);
    fn notify_closed(&self, action: Option<&str>);
}

pub struct DialogFoundation {
    adapter: Rc<dyn DialogAdapter>,
    is_open: Cell<bool>,
    escape_key_action: RefCell<String>,
    scrim_click_action: RefCell<String>,
}

impl DialogFoundation {
    pub fn new(adapter: Rc<dyn DialogAdapter>) -> Self {
        Self {
            adapter,
            is_open: Cell::new(false),
            escape_key_action: RefCell::new(DIALOG_CLOSE_ACTION.to_string()),
            scrim_click_action: RefCell::new(DIALOG_CLOSE_ACTION.to_string()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    pub fn escape_key_action(&self) -> String {
        self.escape_key_action.borrow().clone()
    }

    /// An empty action disables closing on Escape.
    pub fn set_escape_key_action(&self, action: &str) {
        self.escape_key_action.replace(action.to_string());
    }

    pub fn scrim_click_action(&self) -> String {
        self.scrim_click_action.borrow().clone()
    }

    /// An empty action disables closing on scrim click.
    pub fn set_scrim_click_action(&self, action: &str) {
        self.scrim_click_action.replace(action.to_string());
    }

    pub fn open(&self) {
        if self.is_open.replace(true) {
            return;
        }
        let adapter = &self.adapter;
        adapter.notify_opening();
        adapter.add_class(DIALOG_OPENING);
        adapter.add_body_class(DIALOG_SCROLL_LOCK);
        adapter.add_class(DIALOG_OPEN);
        adapter.trap_focus();
        adapter.remove_class(DIALOG_OPENING);
        adapter.notify_opened();
    }

    pub fn close(&self, action: Option<&str>) {
        if !self.is_open.replace(false) {
            return;
        }
        let adapter = &self.adapter;
        adapter.notify_closing(action);
        adapter.add_class(DIALOG_CLOSING);
        adapter.remove_class(DIALOG_OPEN);
        adapter.remove_body_class(DIALOG_SCROLL_LOCK);
        adapter.release_focus();
        adapter.remove_class(DIALOG_CLOSING);
        adapter.notify_closed(action);
    }

    pub fn handle_click(&self, event: &Event) {
        if !self.is_open() {
            return;
        }
        if self.adapter.is_scrim_event(event) {
            let action = self.scrim_click_action();
            if !action.is_empty() {
                self.close(Some(&action));
            }
        } else if let Some(action) = self.adapter.action_from_event(event) {
            self.close(Some(&action));
        }
    }

    pub fn handle_keydown(&self, event: &Event) {
        if !self.is_open() || event.key() != Some(KEY_ESCAPE) {
            return;
        }
        let action = self.escape_key_action();
        if !action.is_empty() {
            self.close(Some(&action));
        }
    }
}
