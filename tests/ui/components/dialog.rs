use overlaykit::config::DialogConfig;
use overlaykit::constants::{
    DIALOG_CLOSED_EVENT, DIALOG_CLOSING_EVENT, DIALOG_INITIAL_FOCUS_ATTRIBUTE, DIALOG_OPENED_EVENT,
    DIALOG_OPENING_EVENT, DIALOG_OPEN, DIALOG_SCROLL_LOCK,
};
use overlaykit::dom::{Document, Element};
use overlaykit::ui::components::MdcDialog;
use overlaykit::ui::core::DialogHost;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

fn mount(document: &Document) -> MdcDialog {
    let root = document.create_element("mdc-dialog");
    document.body().append_child(&root);
    MdcDialog::new(root, &DialogConfig::default()).unwrap()
}

/// Records `(event, detail)` for every dialog lifecycle event on `root`.
fn record_events(root: &Element) -> Rc<RefCell<Vec<(String, Value)>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    for kind in [DIALOG_OPENING_EVENT, DIALOG_OPENED_EVENT, DIALOG_CLOSING_EVENT, DIALOG_CLOSED_EVENT] {
        let events = Rc::clone(&events);
        root.add_event_listener(kind, move |event| {
            events
                .borrow_mut()
                .push((event.kind().to_string(), event.detail().clone()));
        });
    }
    events
}

#[test]
fn test_builds_surface_structure() {
    let document = Document::new();
    let dialog = mount(&document);
    let root = dialog.root();

    assert!(root.has_class("mdc-dialog"));
    let surface = root.query_selector(".mdc-dialog__surface").unwrap();
    assert!(surface.parent().unwrap().has_class("mdc-dialog__container"));
    assert_eq!(surface.attribute("role").as_deref(), Some("alertdialog"));
    assert!(surface.contains(dialog.content()));
    assert!(root.query_selector(".mdc-dialog__scrim").is_some());
}

#[test]
fn test_open_and_close_emit_events_in_order() {
    let document = Document::new();
    let dialog = mount(&document);
    let events = record_events(dialog.root());

    dialog.open();
    assert!(dialog.is_open());
    assert!(dialog.root().has_class(DIALOG_OPEN));
    assert!(document.body().has_class(DIALOG_SCROLL_LOCK));

    dialog.close(Some("accept"));
    assert!(!dialog.is_open());
    assert!(!document.body().has_class(DIALOG_SCROLL_LOCK));

    let events = events.borrow();
    let kinds: Vec<&str> = events.iter().map(|(kind, _)| kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec![DIALOG_OPENING_EVENT, DIALOG_OPENED_EVENT, DIALOG_CLOSING_EVENT, DIALOG_CLOSED_EVENT]
    );
    assert_eq!(events[2].1["action"], "accept");
    assert_eq!(events[3].1["action"], "accept");
}

#[test]
fn test_focus_moves_to_initial_focus_target() {
    let document = Document::new();
    let dialog = mount(&document);
    let cancel = document.create_element("button");
    let name = document.create_element("input");
    name.set_attribute(DIALOG_INITIAL_FOCUS_ATTRIBUTE, "");
    dialog.content().append_child(&cancel);
    dialog.content().append_child(&name);

    dialog.open();

    assert_eq!(document.active_element(), Some(name));
}

#[test]
fn test_focus_trapped_while_open_and_restored_on_close() {
    let document = Document::new();
    let trigger = document.create_element("button");
    document.body().append_child(&trigger);
    let dialog = mount(&document);
    let ok = document.create_element("button");
    dialog.content().append_child(&ok);

    assert!(trigger.focus());
    dialog.open();
    assert_eq!(document.active_element().as_ref(), Some(&ok));
    assert!(!trigger.focus());

    dialog.close(None);
    assert_eq!(document.active_element(), Some(trigger));
}

#[test]
fn test_destroy_closes_with_destroy_action() {
    let document = Document::new();
    let dialog = mount(&document);
    let events = record_events(dialog.root());
    dialog.open();

    dialog.destroy();

    assert!(!dialog.is_open());
    assert_eq!(dialog.root().listener_count("click"), 0);
    assert_eq!(dialog.root().listener_count("keydown"), 0);
    let events = events.borrow();
    let (kind, detail) = events.last().unwrap();
    assert_eq!(kind, DIALOG_CLOSED_EVENT);
    assert_eq!(detail["action"], "destroy");
}

#[tokio::test]
async fn test_initialised_after_attached() {
    let document = Document::new();
    let dialog = mount(&document);

    dialog.attached();
    dialog.initialised().await;
    dialog.initialised().await;
}
