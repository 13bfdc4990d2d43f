use async_trait::async_trait;
use overlaykit::dom::Document;
use overlaykit::ui::core::{
    CompositionContext, Compositor, Container, Model, RegistryCompositor, ViewModel, ViewModelRef, ViewResources,
    ViewSlot,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Greeter {
    activated_with: RefCell<Option<Value>>,
}

#[async_trait(?Send)]
impl ViewModel for Greeter {
    async fn activate(&self, model: &Model) -> anyhow::Result<Value> {
        self.activated_with.replace(Some(model.clone()));
        Ok(Value::Null)
    }
}

fn context(document: &Document, container: Rc<Container>, view_model: Option<ViewModelRef>) -> CompositionContext {
    let host = document.create_element("mdc-dialog");
    document.body().append_child(&host);
    let anchor = document.create_element("div");
    host.append_child(&anchor);

    let view_resources = Rc::new(ViewResources::new());
    view_resources.register_view("greeter", "greeter-view");

    CompositionContext {
        container,
        binding_context: None,
        view_resources,
        model: json!({"name": "Ada"}),
        view: None,
        view_model,
        view_slot: Rc::new(ViewSlot::new(anchor)),
        host,
    }
}

#[test]
fn test_container_resolves_through_parent() {
    let root = Rc::new(Container::new());
    root.register("greeter", || -> Rc<dyn ViewModel> { Rc::new(Greeter::default()) });
    let child = root.create_child();

    assert!(child.has("greeter"));
    assert!(child.resolve("greeter").is_some());
    assert!(!child.has("missing"));
    assert!(child.resolve("missing").is_none());

    child.register("local", || -> Rc<dyn ViewModel> { Rc::new(Greeter::default()) });
    assert!(!root.has("local"));
}

#[test]
fn test_container_builds_fresh_instances() {
    let container = Container::new();
    container.register("greeter", || -> Rc<dyn ViewModel> { Rc::new(Greeter::default()) });

    let first = container.resolve("greeter").unwrap();
    let second = container.resolve("greeter").unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
}

#[test]
fn test_view_slot_tracks_added_views() {
    let document = Document::new();
    let anchor = document.create_element("div");
    document.body().append_child(&anchor);
    let slot = ViewSlot::new(anchor.clone());
    assert!(!slot.is_attached());
    slot.attached();
    assert!(slot.is_attached());

    let view = document.create_element("greeter-view");
    slot.add(&view);
    assert_eq!(anchor.children(), vec![view.clone()]);

    slot.remove_all();
    assert!(anchor.children().is_empty());
    assert!(slot.children().is_empty());
}

#[tokio::test]
async fn test_ensure_view_model_resolves_descriptor_and_view() {
    let document = Document::new();
    let container = Rc::new(Container::new());
    container.register("greeter", || -> Rc<dyn ViewModel> { Rc::new(Greeter::default()) });

    let context = context(&document, container, Some(ViewModelRef::from("greeter")));
    let context = RegistryCompositor::new().ensure_view_model(context).await.unwrap();

    assert!(context.view_model_instance().is_some());
    assert_eq!(context.view.as_deref(), Some("greeter-view"));
}

#[tokio::test]
async fn test_ensure_view_model_rejects_unknown_descriptor() {
    let document = Document::new();
    let context = context(&document, Rc::new(Container::new()), Some(ViewModelRef::from("greeter")));

    let result = RegistryCompositor::new().ensure_view_model(context).await;

    let message = result.err().map(|err| err.to_string()).unwrap_or_default();
    assert!(message.contains("greeter"));
}

#[tokio::test]
async fn test_compose_activates_and_inserts_view() {
    let document = Document::new();
    let greeter = Rc::new(Greeter::default());
    let instance: Rc<dyn ViewModel> = greeter.clone();
    let context = context(&document, Rc::new(Container::new()), Some(ViewModelRef::from(instance)));
    let anchor = context.view_slot.anchor().clone();

    let controller = RegistryCompositor::new().compose(context).await.unwrap();

    assert_eq!(greeter.activated_with.borrow().clone(), Some(json!({"name": "Ada"})));
    assert!(controller.view_model.is_some());
    assert_eq!(controller.view.tag(), "div");
    assert_eq!(anchor.children(), vec![controller.view]);
}

#[tokio::test]
async fn test_compose_without_view_model() {
    let document = Document::new();
    let mut context = context(&document, Rc::new(Container::new()), None);
    context.view = Some("notice-view".to_string());

    let controller = RegistryCompositor::new().compose(context).await.unwrap();

    assert!(controller.view_model.is_none());
    assert_eq!(controller.view.tag(), "notice-view");
}
