//! Widget foundations: framework-agnostic state machines driven through
//! adapters of primitive DOM operations.
//!
//! - [`drawer`] - dismissible and modal drawer foundations
//! - [`dialog`] - modal dialog foundation
//! - [`focus_trap`] - focus confinement used by both

pub mod dialog;
pub mod drawer;
pub mod focus_trap;

pub use dialog::{DialogAdapter, DialogFoundation};
pub use drawer::{DismissibleDrawerFoundation, DrawerAdapter, DrawerFoundation, ModalDrawerFoundation};
pub use focus_trap::{FocusOptions, FocusTrap};
