use crate::dom::{Document, Element};
use std::cell::{Cell, RefCell};

/// Options accepted by [`FocusTrap::with_options`].
#[derive(Debug, Clone, Default)]
pub struct FocusOptions {
    /// Element to focus when the trap activates. Defaults to the first
    /// tabbable descendant of the root.
    pub initial_focus: Option<Element>,
    /// Leave focus where it is when the trap activates.
    pub skip_initial_focus: bool,
}

/// Confines document focus to a root element while active.
///
/// Activation remembers what had focus; release hands focus back to it.
#[derive(Debug)]
pub struct FocusTrap {
    root: Element,
    options: FocusOptions,
    previously_focused: RefCell<Option<Element>>,
    active: Cell<bool>,
}

impl FocusTrap {
    pub fn new(root: Element) -> Self {
        Self::with_options(root, FocusOptions::default())
    }

    pub fn with_options(root: Element, options: FocusOptions) -> Self {
        Self {
            root,
            options,
            previously_focused: RefCell::new(None),
            active: Cell::new(false),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn trap_focus(&self) {
        if self.active.get() {
            return;
        }
        let Some(document) = self.root.owner_document() else {
            return;
        };

        self.previously_focused.replace(document.active_element());
        document.push_trap_root(&self.root);
        self.active.set(true);

        if !self.options.skip_initial_focus {
            if let Some(target) = self.initial_focus_target() {
                target.focus();
            }
        }
    }

    /// Idempotent: releasing an inactive trap does nothing.
    pub fn release_focus(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(document) = self.root.owner_document() {
            document.remove_trap_root(&self.root);
            self.restore(&document);
        }
    }

    fn restore(&self, document: &Document) {
        let previous = self.previously_focused.take();
        match previous {
            Some(previous) if previous.is_connected() => {
                previous.focus();
            }
            _ => {
                if let Some(active) = document.active_element() {
                    if self.root.contains(&active) {
                        active.blur();
                    }
                }
            }
        }
    }

    fn initial_focus_target(&self) -> Option<Element> {
        self.options
            .initial_focus
            .clone()
            .or_else(|| self.root.descendants().into_iter().find(Element::is_tabbable))
    }
}
