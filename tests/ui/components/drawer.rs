use overlaykit::constants::{
    DRAWER_CLOSE_EVENT, DRAWER_DISMISSIBLE, DRAWER_MODAL, DRAWER_OPEN, DRAWER_OPEN_EVENT, DRAWER_ROOT,
    LIST_ITEM_ACTIVATED_CLASS,
};
use overlaykit::dom::{Document, Element, Event};
use overlaykit::ui::components::PanelVariant;
use overlaykit::ui::core::Component;
use overlaykit::{Drawer, UiError};
use std::cell::Cell;
use std::rc::Rc;

/// Appends a drawer root with `classes` (and optionally a sibling scrim) to the body.
fn mount(document: &Document, classes: &[&str], with_scrim: bool) -> (Element, Option<Element>) {
    let body = document.body();
    let root = document.create_element("aside");
    for class in classes {
        root.add_class(class);
    }
    body.append_child(&root);

    let scrim = with_scrim.then(|| {
        let scrim = document.create_element("div");
        scrim.add_class("mdc-drawer-scrim");
        body.append_child(&scrim);
        scrim
    });
    (root, scrim)
}

fn finish_transition(root: &Element) {
    root.dispatch_event(&Event::transition_end());
}

#[test]
fn test_root_without_variant_is_rejected() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT], false);

    let err = Drawer::new(root).err().expect("drawer without variant");
    assert!(matches!(err, UiError::UnsupportedVariant));
    let message = err.to_string();
    assert!(message.contains(DRAWER_DISMISSIBLE));
    assert!(message.contains(DRAWER_MODAL));
}

#[test]
fn test_root_with_both_variants_is_rejected() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE, DRAWER_MODAL], false);

    assert!(matches!(Drawer::new(root), Err(UiError::UnsupportedVariant)));
}

#[test]
fn test_variant_selection() {
    assert_eq!(
        PanelVariant::from_classes(&[DRAWER_ROOT, DRAWER_DISMISSIBLE]).unwrap(),
        PanelVariant::Dismissible
    );
    assert_eq!(
        PanelVariant::from_classes(&[DRAWER_MODAL, DRAWER_ROOT]).unwrap(),
        PanelVariant::Modal
    );
    assert!(PanelVariant::from_classes::<&str>(&[]).is_err());
}

#[test]
fn test_modal_with_scrim_wires_scrim_and_focus_trap() {
    let document = Document::new();
    let (root, scrim) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let scrim = scrim.unwrap();

    let drawer = Drawer::new(root.clone()).unwrap();

    assert_eq!(drawer.variant(), PanelVariant::Modal);
    assert_eq!(drawer.scrim(), Some(&scrim));
    assert!(drawer.has_focus_trap());
    assert_eq!(scrim.listener_count("click"), 1);
    assert_eq!(root.listener_count("keydown"), 1);
    assert_eq!(root.listener_count("transitionend"), 1);
}

#[test]
fn test_modal_without_scrim_has_no_trap() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], false);

    let drawer = Drawer::new(root.clone()).unwrap();

    assert!(drawer.scrim().is_none());
    assert!(!drawer.has_focus_trap());
    assert_eq!(root.listener_count("keydown"), 1);
}

#[test]
fn test_dismissible_ignores_scrim() {
    let document = Document::new();
    let (root, scrim) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], true);

    let drawer = Drawer::new(root).unwrap();

    assert!(!drawer.has_focus_trap());
    assert_eq!(scrim.unwrap().listener_count("click"), 0);
}

#[test]
fn test_destroy_removes_listeners_and_is_idempotent() {
    let document = Document::new();
    let (root, scrim) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let scrim = scrim.unwrap();

    let mut drawer = Drawer::new(root.clone()).unwrap();
    drawer.destroy();

    assert_eq!(scrim.listener_count("click"), 0);
    assert_eq!(root.listener_count("keydown"), 0);
    assert_eq!(root.listener_count("transitionend"), 0);
    assert!(!drawer.has_focus_trap());

    drawer.destroy();
    drop(drawer);
    assert_eq!(scrim.listener_count("click"), 0);
}

#[test]
fn test_destroy_mid_open_closes_modal() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let outside = document.create_element("button");
    document.body().append_child(&outside);

    let mut drawer = Drawer::new(root.clone()).unwrap();
    drawer.set_open(true);
    drawer.destroy();

    assert!(!drawer.is_open());
    assert_eq!(root.classes(), vec![DRAWER_ROOT.to_string(), DRAWER_MODAL.to_string()]);
    assert!(outside.focus());
}

#[test]
fn test_destroy_while_open_closes_modal() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let outside = document.create_element("button");
    document.body().append_child(&outside);

    let mut drawer = Drawer::new(root.clone()).unwrap();
    drawer.set_open(true);
    finish_transition(&root);
    assert!(!outside.focus());

    drawer.destroy();

    assert!(!drawer.is_open());
    assert!(!root.has_class(DRAWER_OPEN));
    assert!(outside.focus());
}

#[test]
fn test_drop_tears_down() {
    let document = Document::new();
    let (root, scrim) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let scrim = scrim.unwrap();

    {
        let _drawer = Drawer::new(root.clone()).unwrap();
        assert_eq!(scrim.listener_count("click"), 1);
    }

    assert_eq!(scrim.listener_count("click"), 0);
    assert_eq!(root.listener_count("keydown"), 0);
}

#[test]
fn test_toggle_twice_restores_state() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let drawer = Drawer::new(root.clone()).unwrap();
    assert!(!drawer.is_open());

    drawer.toggle();
    finish_transition(&root);
    assert!(drawer.is_open());
    assert!(root.has_class(DRAWER_OPEN));

    drawer.toggle();
    finish_transition(&root);
    assert!(!drawer.is_open());
    assert_eq!(root.classes(), vec![DRAWER_ROOT.to_string(), DRAWER_DISMISSIBLE.to_string()]);
}

#[test]
fn test_set_open_twice_is_noop() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let drawer = Drawer::new(root.clone()).unwrap();

    drawer.set_open(true);
    finish_transition(&root);
    drawer.set_open(true);
    assert!(drawer.is_open());
    assert_eq!(root.classes().len(), 3);
}

#[test]
fn test_escape_and_scrim_click_close_modal() {
    let document = Document::new();
    let (root, scrim) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let scrim = scrim.unwrap();
    let drawer = Drawer::new(root.clone()).unwrap();

    drawer.set_open(true);
    finish_transition(&root);
    root.dispatch_event(&Event::keydown("Escape"));
    finish_transition(&root);
    assert!(!drawer.is_open());

    drawer.set_open(true);
    finish_transition(&root);
    scrim.dispatch_event(&Event::click());
    finish_transition(&root);
    assert!(!drawer.is_open());
}

#[test]
fn test_open_and_close_events_bubble() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let drawer = Drawer::new(root.clone()).unwrap();

    let opened = Rc::new(Cell::new(0));
    let closed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&opened);
    document
        .body()
        .add_event_listener(DRAWER_OPEN_EVENT, move |_| counter.set(counter.get() + 1));
    let counter = Rc::clone(&closed);
    document
        .body()
        .add_event_listener(DRAWER_CLOSE_EVENT, move |_| counter.set(counter.get() + 1));

    drawer.set_open(true);
    assert_eq!(opened.get(), 0);
    finish_transition(&root);
    assert_eq!(opened.get(), 1);

    drawer.set_open(false);
    finish_transition(&root);
    assert_eq!(closed.get(), 1);
}

#[test]
fn test_descendant_transition_is_ignored() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let item = document.create_element("a");
    root.append_child(&item);
    let drawer = Drawer::new(root.clone()).unwrap();

    drawer.set_open(true);
    item.dispatch_event(&Event::transition_end());
    assert!(root.has_class("mdc-drawer--opening"));

    finish_transition(&root);
    assert!(!root.has_class("mdc-drawer--opening"));
}

#[test]
fn test_opening_focuses_active_navigation_item() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let item = document.create_element("a");
    item.add_class(LIST_ITEM_ACTIVATED_CLASS);
    root.append_child(&item);
    let drawer = Drawer::new(root.clone()).unwrap();

    drawer.set_open(true);
    finish_transition(&root);

    assert_eq!(document.active_element(), Some(item));
}

#[test]
fn test_focus_restored_when_inside_drawer() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let item = document.create_element("a");
    item.add_class(LIST_ITEM_ACTIVATED_CLASS);
    root.append_child(&item);
    let menu_button = document.create_element("button");
    document.body().append_child(&menu_button);
    let drawer = Drawer::new(root.clone()).unwrap();

    assert!(menu_button.focus());
    drawer.set_open(true);
    finish_transition(&root);
    assert_eq!(document.active_element().as_ref(), Some(&item));

    drawer.set_open(false);
    finish_transition(&root);
    assert_eq!(document.active_element(), Some(menu_button));
}

#[test]
fn test_focus_restore_is_noop_when_focus_left_drawer() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_DISMISSIBLE], false);
    let menu_button = document.create_element("button");
    let search = document.create_element("input");
    document.body().append_child(&menu_button);
    document.body().append_child(&search);
    let drawer = Drawer::new(root.clone()).unwrap();

    assert!(menu_button.focus());
    drawer.set_open(true);
    finish_transition(&root);
    assert!(search.focus());

    drawer.set_open(false);
    finish_transition(&root);
    assert_eq!(document.active_element(), Some(search));
}

#[test]
fn test_modal_traps_focus_while_open() {
    let document = Document::new();
    let (root, _) = mount(&document, &[DRAWER_ROOT, DRAWER_MODAL], true);
    let item = document.create_element("a");
    item.add_class(LIST_ITEM_ACTIVATED_CLASS);
    root.append_child(&item);
    let outside = document.create_element("button");
    document.body().append_child(&outside);
    let drawer = Drawer::new(root.clone()).unwrap();

    drawer.set_open(true);
    finish_transition(&root);
    assert!(!outside.focus());
    assert_eq!(document.active_element().as_ref(), Some(&item));

    drawer.set_open(false);
    finish_transition(&root);
    assert!(outside.focus());
}
