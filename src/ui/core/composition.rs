use super::binding::BindingContext;
use super::lifecycle::{invoke_lifecycle, LifecycleHook, Model, ViewModel};
use crate::dom::Element;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Tag used for composed content when no view is named.
const DEFAULT_VIEW_TAG: &str = "div";

pub type ViewModelFactory = Rc<dyn Fn() -> Rc<dyn ViewModel>>;

/// Named view-model factories, looked up through the parent chain.
#[derive(Default)]
pub struct Container {
    parent: Option<Rc<Container>>,
    factories: RefCell<HashMap<String, ViewModelFactory>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_child(self: &Rc<Self>) -> Rc<Container> {
        Rc::new(Self {
            parent: Some(Rc::clone(self)),
            factories: RefCell::new(HashMap::new()),
        })
    }

    pub fn register(&self, name: &str, factory: impl Fn() -> Rc<dyn ViewModel> + 'static) {
        self.factories.borrow_mut().insert(name.to_string(), Rc::new(factory));
    }

    pub fn has(&self, name: &str) -> bool {
        self.factories.borrow().contains_key(name) || self.parent.as_ref().is_some_and(|parent| parent.has(name))
    }

    /// Builds a fresh instance from the nearest registration of `name`.
    pub fn resolve(&self, name: &str) -> Option<Rc<dyn ViewModel>> {
        let factory = self.factories.borrow().get(name).cloned();
        match factory {
            Some(factory) => Some(factory()),
            None => self.parent.as_ref().and_then(|parent| parent.resolve(name)),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.factories.borrow().keys().cloned().collect();
        names.sort();
        f.debug_struct("Container")
            .field("registrations", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Maps view-model names to the element tag of their view.
#[derive(Debug, Default)]
pub struct ViewResources {
    views: RefCell<HashMap<String, String>>,
}

impl ViewResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_view(&self, view_model: &str, tag: &str) {
        self.views.borrow_mut().insert(view_model.to_string(), tag.to_string());
    }

    pub fn view_for(&self, view_model: &str) -> Option<String> {
        self.views.borrow().get(view_model).cloned()
    }
}

/// How a request names its view-model.
#[derive(Clone)]
pub enum ViewModelRef {
    /// Already instantiated; bound as is.
    Instance(Rc<dyn ViewModel>),
    /// Registered name, resolved through the container.
    Descriptor(String),
}

impl fmt::Debug for ViewModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewModelRef::Instance(_) => f.write_str("Instance(..)"),
            ViewModelRef::Descriptor(name) => f.debug_tuple("Descriptor").field(name).finish(),
        }
    }
}

impl From<&str> for ViewModelRef {
    fn from(name: &str) -> Self {
        ViewModelRef::Descriptor(name.to_string())
    }
}

impl From<Rc<dyn ViewModel>> for ViewModelRef {
    fn from(view_model: Rc<dyn ViewModel>) -> Self {
        ViewModelRef::Instance(view_model)
    }
}

/// Insertion point for composed content.
#[derive(Debug)]
pub struct ViewSlot {
    anchor: Element,
    attached: Cell<bool>,
    children: RefCell<Vec<Element>>,
}

impl ViewSlot {
    pub fn new(anchor: Element) -> Self {
        Self {
            anchor,
            attached: Cell::new(false),
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn anchor(&self) -> &Element {
        &self.anchor
    }

    pub fn attached(&self) {
        self.attached.set(true);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn add(&self, view: &Element) {
        self.anchor.append_child(view);
        self.children.borrow_mut().push(view.clone());
    }

    pub fn children(&self) -> Vec<Element> {
        self.children.borrow().clone()
    }

    pub fn remove_all(&self) {
        for child in self.children.borrow_mut().drain(..) {
            child.remove();
        }
    }
}

/// Everything a [`Compositor`] needs to bind one view/view-model pair.
pub struct CompositionContext {
    pub container: Rc<Container>,
    /// `None` whenever a view-model is supplied; it then is its own context.
    pub binding_context: Option<Rc<dyn BindingContext>>,
    pub view_resources: Rc<ViewResources>,
    pub model: Model,
    pub view: Option<String>,
    pub view_model: Option<ViewModelRef>,
    pub view_slot: Rc<ViewSlot>,
    pub host: Element,
}

impl CompositionContext {
    /// The view-model, once resolved to an instance.
    pub fn view_model_instance(&self) -> Option<Rc<dyn ViewModel>> {
        match &self.view_model {
            Some(ViewModelRef::Instance(view_model)) => Some(Rc::clone(view_model)),
            _ => None,
        }
    }
}

/// Result of a composition.
pub struct Controller {
    pub view_model: Option<Rc<dyn ViewModel>>,
    pub view: Element,
}

/// Instantiates and binds caller content.
#[async_trait(?Send)]
pub trait Compositor {
    /// Turns a [`ViewModelRef::Descriptor`] into an instance.
    async fn ensure_view_model(&self, context: CompositionContext) -> anyhow::Result<CompositionContext>;

    async fn compose(&self, context: CompositionContext) -> anyhow::Result<Controller>;
}

/// Compositor backed by the context's [`Container`] and [`ViewResources`].
#[derive(Debug, Default)]
pub struct RegistryCompositor;

impl RegistryCompositor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl Compositor for RegistryCompositor {
    async fn ensure_view_model(&self, mut context: CompositionContext) -> anyhow::Result<CompositionContext> {
        let name = match &context.view_model {
            Some(ViewModelRef::Descriptor(name)) => name.clone(),
            _ => return Ok(context),
        };

        let view_model = context
            .container
            .resolve(&name)
            .ok_or_else(|| anyhow!("No view-model registered under '{}'", name))?;

        if context.view.is_none() {
            context.view = context.view_resources.view_for(&name);
        }
        context.view_model = Some(ViewModelRef::Instance(view_model));
        Ok(context)
    }

    async fn compose(&self, context: CompositionContext) -> anyhow::Result<Controller> {
        let context = self.ensure_view_model(context).await?;
        let view_model = context.view_model_instance();

        if let Some(view_model) = &view_model {
            invoke_lifecycle(view_model.as_ref(), LifecycleHook::Activate, &context.model).await?;
        }

        let document = context
            .host
            .owner_document()
            .context("Composition host no longer belongs to a document")?;
        let tag = context.view.as_deref().unwrap_or(DEFAULT_VIEW_TAG);
        let view = document.create_element(tag);
        context.view_slot.add(&view);

        Ok(Controller { view_model, view })
    }
}
