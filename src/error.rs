//! Error types for the widget layer.

use crate::constants::{DRAWER_DISMISSIBLE, DRAWER_MODAL};
use crate::ui::core::lifecycle::LifecycleHook;

/// Errors raised while constructing widgets or driving a dialog's lifecycle.
///
/// Collaborator failures arrive as [`anyhow::Error`] and are wrapped so the
/// caller can tell which stage failed.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error(
        "Failed to instantiate drawer. Supported variants are {dismissible} and {modal}.",
        dismissible = DRAWER_DISMISSIBLE,
        modal = DRAWER_MODAL
    )]
    UnsupportedVariant,

    #[error("Dialog cannot be opened: activation was refused")]
    OpenRefused,

    #[error("Failed to enhance dialog host: {0}")]
    Enhancement(anyhow::Error),

    #[error("Failed to resolve view-model: {0}")]
    ViewModelResolution(anyhow::Error),

    #[error("Failed to compose dialog content: {0}")]
    Composition(anyhow::Error),

    #[error("Lifecycle hook {hook} failed: {reason}")]
    Lifecycle { hook: LifecycleHook, reason: anyhow::Error },

    #[error("Dialog was torn down before it settled")]
    Abandoned,
}
