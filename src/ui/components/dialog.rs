//! Dialog host component
//!
//! [`MdcDialog`] is the component behind a dialog host element: it builds the
//! container/surface/content structure, owns the dialog foundation and
//! reports readiness. [`DialogEnhancer`] turns a bare host element into one.

use crate::config::DialogConfig;
use crate::constants::{
    DEFAULT_SLOT_KEY, DIALOG_ACTION_ATTRIBUTE, DIALOG_CLOSED_EVENT, DIALOG_CLOSING_EVENT, DIALOG_CONTAINER,
    DIALOG_CONTENT, DIALOG_DESTROY_ACTION, DIALOG_INITIAL_FOCUS_ATTRIBUTE, DIALOG_OPENED_EVENT, DIALOG_OPENING_EVENT,
    DIALOG_ROOT, DIALOG_SCRIM, DIALOG_SURFACE,
};
use crate::dom::{Element, Event, ListenerId};
use crate::foundation::{DialogAdapter, DialogFoundation, FocusOptions, FocusTrap};
use crate::ui::core::{
    bind_triggers, unbind_triggers, Container, DialogHost, EnhanceInstruction, EnhancedView, Enhancer,
};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::watch;

fn action_detail(action: Option<&str>) -> Value {
    match action {
        Some(action) => json!({ "action": action }),
        None => json!({}),
    }
}

struct DialogRootAdapter {
    root: Element,
    container: Element,
    focus_trap: RefCell<Option<FocusTrap>>,
}

impl DialogRootAdapter {
    fn emit(&self, kind: &str, detail: Value) {
        self.root.dispatch_event(&Event::custom(kind, detail, false));
    }

    fn body(&self) -> Option<Element> {
        self.root.owner_document().map(|document| document.body())
    }
}

impl DialogAdapter for DialogRootAdapter {
    fn add_class(&self, class: &str) {
        self.root.add_class(class);
    }

    fn remove_class(&self, class: &str) {
        self.root.remove_class(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.root.has_class(class)
    }

    fn add_body_class(&self, class: &str) {
        if let Some(body) = self.body() {
            body.add_class(class);
        }
    }

    fn remove_body_class(&self, class: &str) {
        if let Some(body) = self.body() {
            body.remove_class(class);
        }
    }

    fn is_scrim_event(&self, event: &Event) -> bool {
        event.target().is_some_and(|target| target.has_class(DIALOG_SCRIM))
    }

    fn action_from_event(&self, event: &Event) -> Option<String> {
        let target = event.target()?;
        let element = target.closest(|element| element.has_attribute(DIALOG_ACTION_ATTRIBUTE))?;
        if !self.root.contains(&element) {
            return None;
        }
        element.attribute(DIALOG_ACTION_ATTRIBUTE)
    }

    fn trap_focus(&self) {
        // Built on demand: the initial focus target lives in composed content.
        let initial_focus = self
            .container
            .descendants()
            .into_iter()
            .find(|element| element.has_attribute(DIALOG_INITIAL_FOCUS_ATTRIBUTE));
        let trap = FocusTrap::with_options(
            self.container.clone(),
            FocusOptions {
                initial_focus,
                skip_initial_focus: false,
            },
        );
        trap.trap_focus();
        self.focus_trap.replace(Some(trap));
    }

    fn release_focus(&self) {
        if let Some(trap) = self.focus_trap.take() {
            trap.release_focus();
        }
    }

    fn notify_opening(&self) {
        self.emit(DIALOG_OPENING_EVENT, json!({}));
    }

    fn notify_opened(&self) {
        self.emit(DIALOG_OPENED_EVENT, json!({}));
    }

    fn notify_closing(&self, action: Option<&str>) {
        self.emit(DIALOG_CLOSING_EVENT, action_detail(action));
    }

    fn notify_closed(&self, action: Option<&str>) {
        self.emit(DIALOG_CLOSED_EVENT, action_detail(action));
    }
}

/// The component behind a dialog host element.
pub struct MdcDialog {
    root: Element,
    content: Element,
    adapter: Rc<DialogRootAdapter>,
    foundation: Rc<DialogFoundation>,
    listeners: RefCell<Vec<ListenerId>>,
    ready: watch::Sender<bool>,
}

impl MdcDialog {
    pub fn new(root: Element, config: &DialogConfig) -> anyhow::Result<Self> {
        let document = root
            .owner_document()
            .context("Dialog host does not belong to a document")?;

        root.add_class(DIALOG_ROOT);
        let container = document.create_element("div");
        container.add_class(DIALOG_CONTAINER);
        let surface = document.create_element("div");
        surface.add_class(DIALOG_SURFACE);
        surface.set_attribute("role", "alertdialog");
        surface.set_attribute("aria-modal", "true");
        let content = document.create_element("div");
        content.add_class(DIALOG_CONTENT);
        let scrim = document.create_element("div");
        scrim.add_class(DIALOG_SCRIM);

        surface.append_child(&content);
        container.append_child(&surface);
        root.append_child(&container);
        root.append_child(&scrim);

        let adapter = Rc::new(DialogRootAdapter {
            root: root.clone(),
            container,
            focus_trap: RefCell::new(None),
        });
        let foundation = Rc::new(DialogFoundation::new(adapter.clone()));
        foundation.set_escape_key_action(&config.escape_key_action);
        foundation.set_scrim_click_action(&config.scrim_click_action);

        let (ready, _) = watch::channel(false);
        let dialog = Self {
            root,
            content,
            adapter,
            foundation,
            listeners: RefCell::new(Vec::new()),
            ready,
        };
        dialog.initial_sync_with_dom();
        Ok(dialog)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Element composed content is inserted into.
    pub fn content(&self) -> &Element {
        &self.content
    }

    fn initial_sync_with_dom(&self) {
        let foundation = Rc::downgrade(&self.foundation);
        let click = self.root.add_event_listener("click", move |event| {
            if let Some(foundation) = foundation.upgrade() {
                foundation.handle_click(event);
            }
        });

        let foundation = Rc::downgrade(&self.foundation);
        let keydown = self.root.add_event_listener("keydown", move |event| {
            if let Some(foundation) = foundation.upgrade() {
                foundation.handle_keydown(event);
            }
        });

        self.listeners.borrow_mut().extend([click, keydown]);
    }

    /// Marks the component initialised, releasing anyone awaiting
    /// [`DialogHost::initialised`].
    pub fn attached(&self) {
        self.ready.send_replace(true);
    }

    /// Unlistens and closes with the destroy action if still open.
    pub fn destroy(&self) {
        for id in self.listeners.borrow_mut().drain(..) {
            self.root.remove_event_listener(id);
        }
        if self.foundation.is_open() {
            self.foundation.close(Some(DIALOG_DESTROY_ACTION));
        }
        self.adapter.release_focus();
    }
}

#[async_trait(?Send)]
impl DialogHost for MdcDialog {
    async fn initialised(&self) {
        let mut ready = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = ready.wait_for(|ready| *ready).await;
    }

    fn open(&self) {
        self.foundation.open();
    }

    fn close(&self, action: Option<&str>) {
        self.foundation.close(action);
    }

    fn is_open(&self) -> bool {
        self.foundation.is_open()
    }
}

struct DialogView {
    element: Element,
    dialog: Rc<MdcDialog>,
    triggers: RefCell<Vec<ListenerId>>,
    container: Rc<Container>,
}

impl EnhancedView for DialogView {
    fn container(&self) -> Rc<Container> {
        Rc::clone(&self.container)
    }

    fn host(&self) -> Option<Rc<dyn DialogHost>> {
        let host: Rc<dyn DialogHost> = self.dialog.clone();
        Some(host)
    }

    fn slot_anchor(&self, key: &str) -> Option<Element> {
        (key == DEFAULT_SLOT_KEY).then(|| self.dialog.content().clone())
    }

    fn detached(&self) {
        let triggers = self.triggers.take();
        unbind_triggers(&self.element, &triggers);
        self.dialog.destroy();
    }
}

/// Enhancer that recognises the configured dialog host tag.
pub struct DialogEnhancer {
    config: DialogConfig,
    container: Rc<Container>,
}

impl DialogEnhancer {
    pub fn new(config: DialogConfig, container: Rc<Container>) -> Self {
        Self { config, container }
    }
}

impl Enhancer for DialogEnhancer {
    fn enhance(&self, instruction: EnhanceInstruction) -> anyhow::Result<Rc<dyn EnhancedView>> {
        let EnhanceInstruction {
            element,
            binding_context,
        } = instruction;

        if element.tag() != self.config.host_tag {
            anyhow::bail!("<{}> is not registered as a dialog element", element.tag());
        }

        let dialog = Rc::new(MdcDialog::new(element.clone(), &self.config)?);
        let triggers = bind_triggers(&element, binding_context);
        dialog.attached();

        Ok(Rc::new(DialogView {
            element,
            dialog,
            triggers: RefCell::new(triggers),
            container: self.container.create_child(),
        }))
    }
}
