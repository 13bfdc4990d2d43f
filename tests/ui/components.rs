#[path = "components/dialog.rs"]
mod dialog;


#[path = "components/drawer.rs"]
mod drawer;
