//! Widget components

// Component architecture
pub mod dialog;
pub mod dialog_service;
pub mod drawer;

// Component exports
pub use dialog::{DialogEnhancer, MdcDialog};
pub use dialog_service::{DialogService, OpenDialog, OverlayRequest};
pub use drawer::{Drawer, PanelVariant};
