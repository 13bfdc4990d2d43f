//! overlaykit - lifecycle bridge for modal dialogs and drawers
//!
//! This library adapts material-style widget foundations (state machines
//! deciding classes, focus and events) into a host component tree. It
//! provides a dialog service that composes caller content into a modal
//! dialog and reports the closing action, and a drawer component that binds
//! a dismissible or modal drawer foundation to its root element.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Configuration management
//! * [`dom`] - In-memory host document the widgets operate on
//! * [`foundation`] - Drawer and dialog foundations, focus trap
//! * [`ui`] - Components and the framework contracts they rely on
//! * [`logger`] - Logging setup

/// Configuration module for managing settings
pub mod config;

/// Class, event and attribute names
pub mod constants;

/// In-memory document model
pub mod dom;

/// Error types for widget construction and dialog lifecycles
pub mod error;

/// Framework-agnostic widget state machines
pub mod foundation;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Widget components and framework contracts
pub mod ui;

pub use error::UiError;
pub use ui::{DialogService, Drawer, OpenDialog, OverlayRequest};
