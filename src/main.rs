use anyhow::Result;
use async_trait::async_trait;
use overlaykit::config::Config;
use overlaykit::constants::{DIALOG_ACTION_ATTRIBUTE, DRAWER_MODAL, DRAWER_ROOT, LIST_ITEM_ACTIVATED_CLASS};
use overlaykit::dom::{Document, Event};
use overlaykit::ui::core::{Container, Model, ViewModel};
use overlaykit::{logger, DialogService, Drawer, OverlayRequest};
use serde_json::{json, Value};
use std::rc::Rc;

/// Asks the user to confirm deleting the item named in the model.
struct ConfirmDelete;

#[async_trait(?Send)]
impl ViewModel for ConfirmDelete {
    async fn can_activate(&self, model: &Model) -> anyhow::Result<Value> {
        Ok(json!(model.get("id").is_some()))
    }

    fn detached(&self) {
        log::info!("Confirmation content detached");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let _logger = logger::init(&config.logging)?;

    let document = Document::new();
    run_drawer(&document)?;
    run_dialog(&document, &config).await?;

    Ok(())
}

fn run_drawer(document: &Document) -> Result<()> {
    let body = document.body();
    let root = document.create_element("aside");
    root.add_class(DRAWER_ROOT);
    root.add_class(DRAWER_MODAL);
    let inbox = document.create_element("a");
    inbox.add_class(LIST_ITEM_ACTIVATED_CLASS);
    root.append_child(&inbox);
    let scrim = document.create_element("div");
    scrim.add_class("mdc-drawer-scrim");
    body.append_child(&root);
    body.append_child(&scrim);

    let drawer = Drawer::new(root.clone())?;
    drawer.set_open(true);
    root.dispatch_event(&Event::transition_end());
    println!(
        "Drawer open: {} (navigation item focused: {})",
        drawer.is_open(),
        document.active_element().as_ref() == Some(&inbox)
    );

    scrim.dispatch_event(&Event::click());
    root.dispatch_event(&Event::transition_end());
    println!("Drawer open after scrim click: {}", drawer.is_open());

    Ok(())
}

async fn run_dialog(document: &Document, config: &Config) -> Result<()> {
    let container = Rc::new(Container::new());
    container.register("confirm-delete", || -> Rc<dyn ViewModel> { Rc::new(ConfirmDelete) });

    let service = DialogService::with_defaults(document.clone(), container, config.dialog.clone());
    service
        .view_resources()
        .register_view("confirm-delete", "confirm-delete-view");

    let request = OverlayRequest::for_descriptor("confirm-delete").with_model(json!({ "id": 42 }));
    let dialog = service.open_handle(request).await?;

    // Simulate the user pressing the dialog's accept button.
    let accept = document.create_element("button");
    accept.set_attribute(DIALOG_ACTION_ATTRIBUTE, "accept");
    if let Some(content) = dialog.host().query_selector(".mdc-dialog__content") {
        content.append_child(&accept);
    }
    accept.dispatch_event(&Event::click());

    let action = dialog.closed().await?;
    println!("Dialog closed with action: {:?}", action);
    println!(
        "Dialog hosts left in document: {}",
        document.query_selector_all(&config.dialog.host_tag).len()
    );

    Ok(())
}
