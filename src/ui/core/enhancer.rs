use super::binding::BindingContext;
use super::composition::Container;
use crate::dom::Element;
use async_trait::async_trait;
use std::rc::Rc;

/// The controller behind an enhanced dialog host.
#[async_trait(?Send)]
pub trait DialogHost {
    /// Resolves once the component finished initialising. Independent of
    /// whatever content is being composed into it.
    async fn initialised(&self);

    fn open(&self);

    fn close(&self, action: Option<&str>);

    fn is_open(&self) -> bool;
}

pub struct EnhanceInstruction {
    pub element: Element,
    pub binding_context: Rc<dyn BindingContext>,
}

/// A DOM subtree upgraded into a managed component tree.
pub trait EnhancedView {
    /// Child container of the enhancer's container.
    fn container(&self) -> Rc<Container>;

    /// The first controller's view-model, if it is a dialog.
    fn host(&self) -> Option<Rc<dyn DialogHost>>;

    /// Anchor node of the named content slot.
    fn slot_anchor(&self, key: &str) -> Option<Element>;

    /// Unbinds and tears the component tree down. Safe to call twice.
    fn detached(&self);
}

/// Upgrades raw DOM into components.
pub trait Enhancer {
    fn enhance(&self, instruction: EnhanceInstruction) -> anyhow::Result<Rc<dyn EnhancedView>>;
}
