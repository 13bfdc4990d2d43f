//! UI module for overlaykit
//!
//! This module holds the widget components and the framework contracts they
//! are built on.

pub mod components;
pub mod core;

pub use components::{DialogService, Drawer, OpenDialog, OverlayRequest};
