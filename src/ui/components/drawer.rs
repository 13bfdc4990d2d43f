//! Drawer component
//!
//! Binds a dismissible or modal drawer foundation to a root element. The
//! variant is read from the root's class list once, at construction.

use crate::constants::{
    DRAWER_CLOSE_EVENT, DRAWER_DISMISSIBLE, DRAWER_MODAL, DRAWER_OPEN_EVENT, DRAWER_SCRIM_SELECTOR,
    LIST_ITEM_ACTIVATED_CLASS,
};
use crate::dom::{Element, Event, ListenerId};
use crate::error::UiError;
use crate::foundation::{
    DismissibleDrawerFoundation, DrawerAdapter, DrawerFoundation, FocusOptions, FocusTrap, ModalDrawerFoundation,
};
use crate::ui::core::Component;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVariant {
    Dismissible,
    Modal,
}

impl PanelVariant {
    /// Exactly one of the variant classes must be present.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Result<Self, UiError> {
        let has = |class: &str| classes.iter().any(|candidate| candidate.as_ref() == class);
        match (has(DRAWER_DISMISSIBLE), has(DRAWER_MODAL)) {
            (true, false) => Ok(PanelVariant::Dismissible),
            (false, true) => Ok(PanelVariant::Modal),
            _ => Err(UiError::UnsupportedVariant),
        }
    }
}

enum VariantFoundation {
    Dismissible(DismissibleDrawerFoundation),
    Modal(ModalDrawerFoundation),
}

impl VariantFoundation {
    fn new(variant: PanelVariant, adapter: Rc<dyn DrawerAdapter>) -> Self {
        match variant {
            PanelVariant::Dismissible => VariantFoundation::Dismissible(DismissibleDrawerFoundation::new(adapter)),
            PanelVariant::Modal => VariantFoundation::Modal(ModalDrawerFoundation::new(adapter)),
        }
    }

    fn as_foundation(&self) -> &dyn DrawerFoundation {
        match self {
            VariantFoundation::Dismissible(foundation) => foundation,
            VariantFoundation::Modal(foundation) => foundation,
        }
    }

    fn as_modal(&self) -> Option<&ModalDrawerFoundation> {
        match self {
            VariantFoundation::Modal(foundation) => Some(foundation),
            VariantFoundation::Dismissible(_) => None,
        }
    }
}

struct DrawerRootAdapter {
    root: Element,
    previous_focus: RefCell<Option<Element>>,
    focus_trap: RefCell<Option<FocusTrap>>,
}

impl DrawerRootAdapter {
    fn new(root: Element) -> Self {
        Self {
            root,
            previous_focus: RefCell::new(None),
            focus_trap: RefCell::new(None),
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.root.owner_document().and_then(|document| document.active_element())
    }
}

impl DrawerAdapter for DrawerRootAdapter {
    fn add_class(&self, class: &str) {
        self.root.add_class(class);
    }

    fn remove_class(&self, class: &str) {
        self.root.remove_class(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.root.has_class(class)
    }

    fn element_has_class(&self, element: &Element, class: &str) -> bool {
        element.has_class(class)
    }

    fn save_focus(&self) {
        self.previous_focus.replace(self.active_element());
    }

    fn restore_focus(&self) {
        let previous = self.previous_focus.borrow().clone();
        let Some(previous) = previous else {
            return;
        };
        // Only pull focus back if it is still ours to give.
        let focus_inside = self.active_element().is_some_and(|active| self.root.contains(&active));
        if focus_inside {
            previous.focus();
        }
    }

    fn focus_active_navigation_item(&self) {
        if let Some(item) = self.root.query_selector(&format!(".{}", LIST_ITEM_ACTIVATED_CLASS)) {
            item.focus();
        }
    }

    fn notify_close(&self) {
        self.root.dispatch_event(&Event::custom(DRAWER_CLOSE_EVENT, json!({}), true));
    }

    fn notify_open(&self) {
        self.root.dispatch_event(&Event::custom(DRAWER_OPEN_EVENT, json!({}), true));
    }

    fn trap_focus(&self) {
        if let Some(trap) = self.focus_trap.borrow().as_ref() {
            trap.trap_focus();
        }
    }

    fn release_focus(&self) {
        if let Some(trap) = self.focus_trap.borrow().as_ref() {
            trap.release_focus();
        }
    }
}

/// A navigation drawer bound to one root element.
///
/// Dropping the drawer runs [`Component::destroy`].
pub struct Drawer {
    root: Element,
    variant: PanelVariant,
    adapter: Rc<DrawerRootAdapter>,
    foundation: Rc<VariantFoundation>,
    scrim: Option<Element>,
    scrim_click: Option<ListenerId>,
    keydown: Option<ListenerId>,
    transition_end: Option<ListenerId>,
}

impl Drawer {
    /// Builds the foundation for the root's variant and wires the DOM.
    pub fn new(root: Element) -> Result<Self, UiError> {
        let variant = PanelVariant::from_classes(&root.classes())?;
        let adapter = Rc::new(DrawerRootAdapter::new(root.clone()));
        let foundation = Rc::new(VariantFoundation::new(variant, adapter.clone()));

        let mut drawer = Self {
            root,
            variant,
            adapter,
            foundation,
            scrim: None,
            scrim_click: None,
            keydown: None,
            transition_end: None,
        };
        drawer.initialise();
        drawer.initial_sync_with_dom();
        Ok(drawer)
    }

    pub fn variant(&self) -> PanelVariant {
        self.variant
    }

    /// True from the moment opening starts until closing finishes.
    pub fn is_open(&self) -> bool {
        self.foundation.as_foundation().is_open()
    }

    pub fn set_open(&self, open: bool) {
        let foundation = self.foundation.as_foundation();
        if open {
            foundation.open();
        } else {
            foundation.close();
        }
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn scrim(&self) -> Option<&Element> {
        self.scrim.as_ref()
    }

    pub fn has_focus_trap(&self) -> bool {
        self.adapter.focus_trap.borrow().is_some()
    }
}

impl Component for Drawer {
    fn root(&self) -> &Element {
        &self.root
    }

    fn initial_sync_with_dom(&mut self) {
        self.scrim = self
            .root
            .parent()
            .and_then(|parent| parent.query_selector(DRAWER_SCRIM_SELECTOR));

        if let (Some(scrim), PanelVariant::Modal) = (&self.scrim, self.variant) {
            let foundation = Rc::downgrade(&self.foundation);
            self.scrim_click = Some(scrim.add_event_listener("click", move |_| {
                if let Some(modal) = foundation.upgrade() {
                    if let Some(modal) = modal.as_modal() {
                        modal.handle_scrim_click();
                    }
                }
            }));

            let options = FocusOptions {
                initial_focus: None,
                skip_initial_focus: true,
            };
            self.adapter
                .focus_trap
                .replace(Some(FocusTrap::with_options(self.root.clone(), options)));
        }

        let foundation = Rc::downgrade(&self.foundation);
        self.keydown = Some(self.listen("keydown", move |event| {
            if let Some(foundation) = foundation.upgrade() {
                foundation.as_foundation().handle_keydown(event);
            }
        }));

        let foundation = Rc::downgrade(&self.foundation);
        self.transition_end = Some(self.listen("transitionend", move |event| {
            if let Some(foundation) = foundation.upgrade() {
                foundation.as_foundation().handle_transition_end(event);
            }
        }));
    }

    fn destroy(&mut self) {
        for id in [self.keydown.take(), self.transition_end.take()].into_iter().flatten() {
            self.unlisten(id);
        }

        if let (Some(scrim), Some(id)) = (&self.scrim, self.scrim_click.take()) {
            scrim.remove_event_listener(id);
            // The transitionend listener is gone, so close without animating.
            self.foundation.as_foundation().destroy();
        }

        if let Some(trap) = self.adapter.focus_trap.take() {
            trap.release_focus();
            log::debug!("Released drawer focus trap on teardown");
        }
    }
}

impl Drop for Drawer {
    fn drop(&mut self) {
        self.destroy();
    }
}
