//! Core building blocks shared by the widgets.
//!
//! This module contains the contracts between the widgets and the host
//! component framework: component lifecycle, declarative event bindings,
//! view-model lifecycle hooks, composition and enhancement services, and
//! the one-shot settlement used to report a dialog's outcome.
//!
//! # Module Components
//!
//! - [`binding`] - `*.trigger` attribute bindings and binding contexts
//! - [`component`] - Base component trait (initialise, sync with DOM, destroy)
//! - [`composition`] - Composition context, view slots and the [`Compositor`] service
//! - [`enhancer`] - The [`Enhancer`] service and enhanced views
//! - [`lifecycle`] - View-model hooks and their invocation rules
//! - [`settlement`] - Single-resolution result latch
//!
//! # Architecture
//!
//! 1. **Enhancer** upgrades a raw host element into a component with slots
//! 2. **Compositor** resolves and binds caller content into a slot
//! 3. **Lifecycle** hooks gate activation and deactivation
//! 4. **Settlement** delivers the outcome exactly once

pub mod binding;
pub mod component;
pub mod composition;
pub mod enhancer;
pub mod lifecycle;
pub mod settlement;

pub use binding::{bind_triggers, unbind_triggers, BindingContext, TriggerBinding};
pub use component::Component;
pub use composition::{
    CompositionContext, Compositor, Container, Controller, RegistryCompositor, ViewModelRef, ViewResources, ViewSlot,
};
pub use enhancer::{DialogHost, EnhanceInstruction, EnhancedView, Enhancer};
pub use lifecycle::{invoke_lifecycle, is_truthy, LifecycleHook, Model, ViewModel};
pub use settlement::Settlement;
