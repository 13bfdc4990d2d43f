//! Dialog service
//!
//! Opens a modal dialog around caller-supplied content and reports the
//! action the user closed it with. Each call owns its host element, its
//! binding context and its settlement; nothing is shared between calls.
//!
//! The sequence for one call:
//!
//! 1. create the host element with a `closing` trigger binding and append it to the body
//! 2. enhance it and locate the default content slot
//! 3. resolve the view-model and run its `can_activate` gate
//! 4. compose the content while waiting for the dialog to initialise
//! 5. open the dialog foundation
//!
//! The closing event then settles the call, notifies `detached` and removes
//! the host. Any failure before step 5 tears the host down again.

use crate::config::DialogConfig;
use crate::constants::{DEFAULT_SLOT_KEY, DIALOG_CLOSING_EVENT, HANDLE_CLOSING_METHOD, TRIGGER_SUFFIX};
use crate::dom::{Document, Element, Event, WeakElement};
use crate::error::UiError;
use crate::ui::components::dialog::DialogEnhancer;
use crate::ui::core::{
    invoke_lifecycle, is_truthy, BindingContext, CompositionContext, Compositor, Container, DialogHost,
    EnhanceInstruction, EnhancedView, Enhancer, LifecycleHook, Model, RegistryCompositor, Settlement, ViewModel,
    ViewModelRef, ViewResources, ViewSlot,
};
use anyhow::anyhow;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::oneshot;
use uuid::Uuid;

/// What to show in a dialog.
#[derive(Debug, Clone)]
pub struct OverlayRequest {
    pub view_model: Option<ViewModelRef>,
    /// Explicit view; otherwise the view registered for the view-model.
    pub view: Option<String>,
    pub model: Model,
}

impl OverlayRequest {
    pub fn for_instance(view_model: Rc<dyn ViewModel>) -> Self {
        Self {
            view_model: Some(ViewModelRef::Instance(view_model)),
            view: None,
            model: Value::Null,
        }
    }

    pub fn for_descriptor(name: &str) -> Self {
        Self {
            view_model: Some(ViewModelRef::Descriptor(name.to_string())),
            view: None,
            model: Value::Null,
        }
    }

    /// Content without a view-model; the dialog's binding context is used.
    pub fn view_only(view: &str) -> Self {
        Self {
            view_model: None,
            view: Some(view.to_string()),
            model: Value::Null,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_view(mut self, view: &str) -> Self {
        self.view = Some(view.to_string());
        self
    }
}

/// Per-call state reachable from the host's `closing` trigger.
struct DialogBindingContext {
    id: Uuid,
    host: WeakElement,
    settlement: Settlement<Option<String>>,
    view: OnceCell<Rc<dyn EnhancedView>>,
    /// Written once composition finishes, read by the closing handler.
    current_view_model: RefCell<Option<Rc<dyn ViewModel>>>,
}

impl DialogBindingContext {
    fn handle_closing(&self, event: &Event) {
        let action = event
            .detail()
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string);

        if !self.settlement.settle(action.clone()) {
            log::warn!("Dialog {} ignored a repeated closing event", self.id);
            return;
        }
        log::info!("Dialog {} closing with action {:?}", self.id, action);

        let view_model = self.current_view_model.borrow().clone();
        if let Some(view_model) = view_model {
            view_model.detached();
        }
        self.teardown();
    }

    fn teardown(&self) {
        if let Some(view) = self.view.get() {
            view.detached();
        }
        if let Some(host) = self.host.upgrade() {
            host.remove();
        }
    }
}

impl BindingContext for DialogBindingContext {
    fn call(&self, method: &str, event: &Event) -> bool {
        match method {
            HANDLE_CLOSING_METHOD => {
                self.handle_closing(event);
                true
            }
            _ => false,
        }
    }
}

/// A dialog that made it onto the screen.
pub struct OpenDialog {
    id: Uuid,
    host: Element,
    dialog: Rc<dyn DialogHost>,
    context: Rc<DialogBindingContext>,
    closing: oneshot::Receiver<Option<String>>,
}

impl OpenDialog {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn host(&self) -> &Element {
        &self.host
    }

    pub fn is_settled(&self) -> bool {
        self.context.settlement.is_settled()
    }

    /// The composed view-model, if any.
    pub fn view_model(&self) -> Option<Rc<dyn ViewModel>> {
        self.context.current_view_model.borrow().clone()
    }

    /// Asks the content to deactivate, then closes the dialog with `action`.
    ///
    /// Returns `Ok(false)` when `can_deactivate` refused or the dialog had
    /// already settled.
    pub async fn close(&self, action: Option<&str>) -> Result<bool, UiError> {
        if self.is_settled() {
            return Ok(false);
        }

        let argument = action.map_or(Value::Null, |action| Value::String(action.to_string()));
        if let Some(view_model) = self.view_model() {
            let verdict = invoke_lifecycle(view_model.as_ref(), LifecycleHook::CanDeactivate, &argument).await?;
            if !is_truthy(&verdict) {
                log::info!("Dialog {} stays open: deactivation refused", self.id);
                return Ok(false);
            }
            invoke_lifecycle(view_model.as_ref(), LifecycleHook::Deactivate, &argument).await?;
        }

        self.dialog.close(action);
        Ok(self.is_settled())
    }

    /// Waits for the closing action.
    pub async fn closed(self) -> Result<Option<String>, UiError> {
        self.closing.await.map_err(|_| UiError::Abandoned)
    }
}

/// Opens dialogs into a document.
pub struct DialogService {
    document: Document,
    enhancer: Rc<dyn Enhancer>,
    compositor: Rc<dyn Compositor>,
    view_resources: Rc<ViewResources>,
    config: DialogConfig,
}

impl DialogService {
    pub fn new(
        document: Document,
        enhancer: Rc<dyn Enhancer>,
        compositor: Rc<dyn Compositor>,
        view_resources: Rc<ViewResources>,
        config: DialogConfig,
    ) -> Self {
        Self {
            document,
            enhancer,
            compositor,
            view_resources,
            config,
        }
    }

    /// Service using [`DialogEnhancer`] and [`RegistryCompositor`], resolving
    /// view-model names through `container`.
    pub fn with_defaults(document: Document, container: Rc<Container>, config: DialogConfig) -> Self {
        let enhancer = Rc::new(DialogEnhancer::new(config.clone(), container));
        Self::new(
            document,
            enhancer,
            Rc::new(RegistryCompositor::new()),
            Rc::new(ViewResources::new()),
            config,
        )
    }

    pub fn view_resources(&self) -> &Rc<ViewResources> {
        &self.view_resources
    }

    /// Opens a dialog and resolves with the action it was closed with.
    pub async fn open(&self, request: OverlayRequest) -> Result<Option<String>, UiError> {
        self.open_handle(request).await?.closed().await
    }

    /// Opens a dialog and returns once it is visible.
    pub async fn open_handle(&self, request: OverlayRequest) -> Result<OpenDialog, UiError> {
        let id = Uuid::new_v4();
        let host = self.document.create_element(&self.config.host_tag);
        host.set_attribute(
            &format!("{}{}", DIALOG_CLOSING_EVENT, TRIGGER_SUFFIX),
            &format!("{}($event)", HANDLE_CLOSING_METHOD),
        );
        // Attached before anything is composed so the foundation works
        // from a stable position.
        self.document.body().append_child(&host);

        let (settlement, closing) = Settlement::new();
        let context = Rc::new(DialogBindingContext {
            id,
            host: host.downgrade(),
            settlement,
            view: OnceCell::new(),
            current_view_model: RefCell::new(None),
        });
        log::debug!("Opening dialog {} as <{}>", id, host.tag());

        match self.prepare(&host, &context, request).await {
            Ok(dialog) if context.settlement.is_settled() => {
                // Closed while still being prepared: never show it.
                log::info!("Dialog {} settled before it opened", id);
                let view_model = context.current_view_model.borrow().clone();
                if let Some(view_model) = view_model {
                    view_model.detached();
                }
                context.teardown();
                Ok(OpenDialog {
                    id,
                    host,
                    dialog,
                    context,
                    closing,
                })
            }
            Ok(dialog) => {
                dialog.open();
                log::info!("Dialog {} opened", id);
                Ok(OpenDialog {
                    id,
                    host,
                    dialog,
                    context,
                    closing,
                })
            }
            Err(err) => {
                log::warn!("Dialog {} failed to open: {}", id, err);
                context.teardown();
                Err(err)
            }
        }
    }

    async fn prepare(
        &self,
        host: &Element,
        context: &Rc<DialogBindingContext>,
        request: OverlayRequest,
    ) -> Result<Rc<dyn DialogHost>, UiError> {
        let binding_context: Rc<dyn BindingContext> = context.clone();
        let view = self
            .enhancer
            .enhance(EnhanceInstruction {
                element: host.clone(),
                binding_context: Rc::clone(&binding_context),
            })
            .map_err(UiError::Enhancement)?;
        context.view.get_or_init(|| Rc::clone(&view));

        let dialog = view
            .host()
            .ok_or_else(|| UiError::Enhancement(anyhow!("<{}> has no dialog controller", host.tag())))?;
        let anchor = view
            .slot_anchor(DEFAULT_SLOT_KEY)
            .ok_or_else(|| UiError::Enhancement(anyhow!("<{}> has no default content slot", host.tag())))?;
        let slot = Rc::new(ViewSlot::new(anchor));
        slot.attached();

        let OverlayRequest {
            view_model,
            view: view_name,
            model,
        } = request;
        let composition = CompositionContext {
            container: view.container(),
            binding_context: if view_model.is_some() {
                None
            } else {
                Some(binding_context)
            },
            view_resources: Rc::clone(&self.view_resources),
            model: model.clone(),
            view: view_name,
            view_model,
            view_slot: slot,
            host: host.clone(),
        };
        let composition = self.ensure_view_model(composition).await?;

        if let Some(view_model) = composition.view_model_instance() {
            let verdict = invoke_lifecycle(view_model.as_ref(), LifecycleHook::CanActivate, &model).await?;
            if !is_truthy(&verdict) {
                return Err(UiError::OpenRefused);
            }
        }

        let (composed, ()) = tokio::join!(self.compositor.compose(composition), dialog.initialised());
        let controller = composed.map_err(UiError::Composition)?;
        context.current_view_model.replace(controller.view_model);

        Ok(dialog)
    }

    async fn ensure_view_model(&self, composition: CompositionContext) -> Result<CompositionContext, UiError> {
        if matches!(composition.view_model, Some(ViewModelRef::Descriptor(_))) {
            self.compositor
                .ensure_view_model(composition)
                .await
                .map_err(UiError::ViewModelResolution)
        } else {
            Ok(composition)
        }
    }
}
