//! Drawer foundations.
//!
//! The open/close state lives entirely in the root's class list; the
//! foundations only read and write it through a [`DrawerAdapter`].

use crate::constants::{
    DRAWER_ANIMATE, DRAWER_CLOSING, DRAWER_OPEN, DRAWER_OPENING, DRAWER_ROOT, KEY_ESCAPE,
};
use crate::dom::{Element, Event};
use std::rc::Rc;

/// Primitive operations a drawer foundation needs from its host.
pub trait DrawerAdapter {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn element_has_class(&self, element: &Element, class: &str) -> bool;
    /// Remembers the focused element so it can be restored on close.
    fn save_focus(&self);
    fn restore_focus(&self);
    fn focus_active_navigation_item(&self);
    fn notify_close(&self);
    fn notify_open(&self);
    fn trap_focus(&self);
    fn release_focus(&self);
}

/// Behaviour shared by every drawer variant.
pub trait DrawerFoundation {
    fn adapter(&self) -> &dyn DrawerAdapter;

    /// Runs once the opening transition has finished.
    fn opened(&self) {}

    /// Runs once the closing transition has finished.
    fn closed(&self) {}

    fn open(&self) {
        if self.is_open() || self.is_opening() || self.is_closing() {
            return;
        }
        let adapter = self.adapter();
        adapter.add_class(DRAWER_OPEN);
        adapter.add_class(DRAWER_ANIMATE);
        adapter.add_class(DRAWER_OPENING);
        adapter.save_focus();
    }

    fn close(&self) {
        if !self.is_open() || self.is_opening() || self.is_closing() {
            return;
        }
        self.adapter().add_class(DRAWER_CLOSING);
    }

    /// True once open has been requested, even mid-transition.
    fn is_open(&self) -> bool {
        self.adapter().has_class(DRAWER_OPEN)
    }

    fn is_opening(&self) -> bool {
        let adapter = self.adapter();
        adapter.has_class(DRAWER_OPENING) || adapter.has_class(DRAWER_ANIMATE)
    }

    fn is_closing(&self) -> bool {
        self.adapter().has_class(DRAWER_CLOSING)
    }

    fn handle_keydown(&self, event: &Event) {
        if event.key() == Some(KEY_ESCAPE) {
            self.close();
        }
    }

    fn handle_transition_end(&self, event: &Event) {
        let adapter = self.adapter();
        // Transitions of descendants bubble up here too.
        let is_root = event
            .target()
            .is_some_and(|target| adapter.element_has_class(&target, DRAWER_ROOT));
        if !is_root {
            return;
        }

        if self.is_closing() {
            adapter.remove_class(DRAWER_OPEN);
            self.closed();
            adapter.restore_focus();
            adapter.notify_close();
        } else {
            adapter.focus_active_navigation_item();
            self.opened();
            adapter.notify_open();
        }

        adapter.remove_class(DRAWER_ANIMATE);
        adapter.remove_class(DRAWER_OPENING);
        adapter.remove_class(DRAWER_CLOSING);
    }

    /// Forces the closed state without waiting for a transition, including
    /// mid-open or mid-close.
    fn destroy(&self) {
        let adapter = self.adapter();
        let was_open = self.is_open();
        for class in [DRAWER_OPEN, DRAWER_ANIMATE, DRAWER_OPENING, DRAWER_CLOSING] {
            adapter.remove_class(class);
        }
        if was_open {
            adapter.release_focus();
        }
    }
}

/// Drawer that slides in next to the content without blocking it.
pub struct DismissibleDrawerFoundation {
    adapter: Rc<dyn DrawerAdapter>,
}

impl DismissibleDrawerFoundation {
    pub fn new(adapter: Rc<dyn DrawerAdapter>) -> Self {
        Self { adapter }
    }
}

impl DrawerFoundation for DismissibleDrawerFoundation {
    fn adapter(&self) -> &dyn DrawerAdapter {
        self.adapter.as_ref()
    }
}

/// Drawer above a scrim; traps focus while open.
pub struct ModalDrawerFoundation {
    adapter: Rc<dyn DrawerAdapter>,
}

impl ModalDrawerFoundation {
    pub fn new(adapter: Rc<dyn DrawerAdapter>) -> Self {
        Self { adapter }
    }

    pub fn handle_scrim_click(&self) {
        self.close();
    }
}

impl DrawerFoundation for ModalDrawerFoundation {
    fn adapter(&self) -> &dyn DrawerAdapter {
        self.adapter.as_ref()
    }

    fn opened(&self) {
        self.adapter.trap_focus();
    }

    fn closed(&self) {
        self.adapter.release_focus();
    }
}
