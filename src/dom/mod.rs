//! In-memory host document.
//!
//! The widgets in this crate are written against a small DOM: elements with a
//! tag, a class list, attributes, children, event listeners with bubbling
//! dispatch and a document-wide focus pointer. It is single-threaded by
//! nature (`Rc`/`RefCell`), like the browser document it stands in for.
//!
//! # Example
//!
//! ```
//! use overlaykit::dom::{Document, Event};
//!
//! let document = Document::new();
//! let panel = document.create_element("aside");
//! panel.add_class("mdc-drawer");
//! document.body().append_child(&panel);
//!
//! assert_eq!(document.query_selector(".mdc-drawer"), Some(panel.clone()));
//! panel.dispatch_event(&Event::click());
//! ```

pub mod event;
pub mod selector;

pub use event::{Event, ListenerId};
pub use selector::Selector;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Tags that take part in sequential focus navigation without a `tabindex`.
const TABBABLE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

type Callback = Rc<dyn Fn(&Event)>;

struct Listener {
    id: ListenerId,
    kind: String,
    callback: Callback,
}

struct ElementData {
    id: u64,
    tag: String,
    document: Weak<DocumentInner>,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    parent: RefCell<Weak<ElementData>>,
    children: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<Listener>>,
    next_listener: Cell<u64>,
}

/// Shared handle to a node of a [`Document`]. Cloning is cheap and equality
/// is identity.
#[derive(Clone)]
pub struct Element(Rc<ElementData>);

/// Non-owning handle to an [`Element`].
#[derive(Clone, Default)]
pub struct WeakElement(Weak<ElementData>);

impl WeakElement {
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }
}

impl Element {
    fn new_in(id: u64, tag: &str, document: Weak<DocumentInner>) -> Self {
        Self(Rc::new(ElementData {
            id,
            tag: tag.to_ascii_lowercase(),
            document,
            classes: RefCell::new(Vec::new()),
            attributes: RefCell::new(BTreeMap::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    pub fn owner_document(&self) -> Option<Document> {
        self.0.document.upgrade().map(Document)
    }

    // Class list

    pub fn add_class(&self, class: &str) {
        let mut classes = self.0.classes.borrow_mut();
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|existing| existing != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|existing| existing == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().clone()
    }

    // Attributes

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0.attributes.borrow_mut().insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.attributes.borrow().contains_key(name)
    }

    pub fn remove_attribute(&self, name: &str) {
        self.0.attributes.borrow_mut().remove(name);
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0
            .attributes
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    // Tree

    pub fn parent(&self) -> Option<Element> {
        self.0.parent.borrow().upgrade().map(Element)
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.children.borrow().clone()
    }

    /// Moves `child` under this element, detaching it from its previous parent.
    pub fn append_child(&self, child: &Element) {
        debug_assert!(!child.contains(self), "appending an ancestor would create a cycle");
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Detaches this element (and its subtree) from its parent. Focus inside
    /// the subtree falls back to the document.
    pub fn remove(&self) {
        let parent = self.0.parent.replace(Weak::new()).upgrade();
        if let Some(parent) = parent {
            parent.children.borrow_mut().retain(|child| !Rc::ptr_eq(&child.0, &self.0));
        }

        if let Some(document) = self.owner_document() {
            if let Some(active) = document.active_element() {
                if self.contains(&active) {
                    document.0.active.replace(None);
                }
            }
        }
    }

    /// Inclusive descendant check, like `Node.contains`.
    pub fn contains(&self, other: &Element) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Whether the element is attached to its document's body.
    pub fn is_connected(&self) -> bool {
        let Some(document) = self.owner_document() else {
            return false;
        };
        let mut root = self.clone();
        while let Some(parent) = root.parent() {
            root = parent;
        }
        root == document.0.body
    }

    /// Descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<Element> {
        let mut found = Vec::new();
        self.collect_descendants(&mut found);
        found
    }

    fn collect_descendants(&self, found: &mut Vec<Element>) {
        for child in self.children() {
            found.push(child.clone());
            child.collect_descendants(found);
        }
    }

    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let selector = Selector::parse(selector);
        if selector.is_empty() {
            return None;
        }
        self.descendants().into_iter().find(|element| selector.matches(element))
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let selector = Selector::parse(selector);
        if selector.is_empty() {
            return Vec::new();
        }
        self.descendants()
            .into_iter()
            .filter(|element| selector.matches(element))
            .collect()
    }

    /// Nearest inclusive ancestor satisfying `predicate`.
    pub fn closest(&self, predicate: impl Fn(&Element) -> bool) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if predicate(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    // Focus

    /// Whether sequential keyboard navigation would stop on this element.
    pub fn is_tabbable(&self) -> bool {
        if self.has_attribute("disabled") {
            return false;
        }
        match self.attribute("tabindex") {
            Some(index) => index.trim() != "-1",
            None => TABBABLE_TAGS.contains(&self.tag()),
        }
    }

    /// Moves document focus here. Refused (returns `false`) when the element
    /// is detached or lies outside an active focus trap.
    pub fn focus(&self) -> bool {
        let Some(document) = self.owner_document() else {
            return false;
        };
        if !self.is_connected() || !document.focus_allowed(self) {
            return false;
        }
        document.0.active.replace(Some(self.downgrade()));
        true
    }

    pub fn blur(&self) {
        if let Some(document) = self.owner_document() {
            if document.active_element().as_ref() == Some(self) {
                document.0.active.replace(None);
            }
        }
    }

    // Events

    pub fn add_event_listener(&self, kind: &str, callback: impl Fn(&Event) + 'static) -> ListenerId {
        let id = ListenerId(self.0.next_listener.get());
        self.0.next_listener.set(id.0 + 1);
        self.0.listeners.borrow_mut().push(Listener {
            id,
            kind: kind.to_string(),
            callback: Rc::new(callback),
        });
        id
    }

    /// Returns `false` if the listener was not registered (or already removed).
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.0.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Dispatches `event` on this element, then on each ancestor if it
    /// bubbles. The propagation path is fixed before any listener runs.
    pub fn dispatch_event(&self, event: &Event) {
        event.set_target(self);

        let mut path = vec![self.clone()];
        if event.bubbles() {
            let mut current = self.parent();
            while let Some(node) = current {
                current = node.parent();
                path.push(node);
            }
        }

        for node in path {
            node.invoke_listeners(event);
            if event.is_propagation_stopped() {
                break;
            }
        }
    }

    fn invoke_listeners(&self, event: &Event) {
        // Listeners may add or remove listeners on this element.
        let callbacks: Vec<Callback> = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == event.kind())
            .map(|listener| Rc::clone(&listener.callback))
            .collect();

        for callback in callbacks {
            callback(event);
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.0.id)
            .field("tag", &self.0.tag)
            .field("classes", &*self.0.classes.borrow())
            .finish()
    }
}

struct DocumentInner {
    body: Element,
    active: RefCell<Option<WeakElement>>,
    trap_roots: RefCell<Vec<Element>>,
    next_id: Cell<u64>,
}

/// The host document: owns `body`, tracks the focused element and the
/// stack of active focus traps.
#[derive(Clone)]
pub struct Document(Rc<DocumentInner>);

impl Document {
    pub fn new() -> Self {
        Self(Rc::new_cyclic(|document| DocumentInner {
            body: Element::new_in(0, "body", document.clone()),
            active: RefCell::new(None),
            trap_roots: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }))
    }

    pub fn body(&self) -> Element {
        self.0.body.clone()
    }

    pub fn create_element(&self, tag: &str) -> Element {
        let id = self.0.next_id.get();
        self.0.next_id.set(id + 1);
        Element::new_in(id, tag, Rc::downgrade(&self.0))
    }

    /// The focused element, `None` when focus rests on the document itself.
    pub fn active_element(&self) -> Option<Element> {
        self.0.active.borrow().as_ref().and_then(WeakElement::upgrade)
    }

    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        self.0.body.query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        self.0.body.query_selector_all(selector)
    }

    pub(crate) fn push_trap_root(&self, root: &Element) {
        self.0.trap_roots.borrow_mut().push(root.clone());
    }

    pub(crate) fn remove_trap_root(&self, root: &Element) {
        self.0.trap_roots.borrow_mut().retain(|trapped| trapped != root);
    }

    /// Only the innermost trap constrains focus.
    fn focus_allowed(&self, element: &Element) -> bool {
        match self.0.trap_roots.borrow().last() {
            Some(root) => root.contains(element),
            None => true,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("active", &self.active_element())
            .field("traps", &self.0.trap_roots.borrow().len())
            .finish()
    }
}
