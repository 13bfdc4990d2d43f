use crate::error::UiError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Opaque payload handed to a view-model's lifecycle hooks.
pub type Model = Value;

/// The awaitable hooks a [`ViewModel`] may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleHook {
    CanActivate,
    Activate,
    CanDeactivate,
    Deactivate,
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleHook::CanActivate => "can_activate",
            LifecycleHook::Activate => "activate",
            LifecycleHook::CanDeactivate => "can_deactivate",
            LifecycleHook::Deactivate => "deactivate",
        };
        f.write_str(name)
    }
}

/// Content composed into a dialog.
///
/// Every hook is optional. A hook left at its default returns `null`, which
/// the lifecycle treats as approval.
#[async_trait(?Send)]
pub trait ViewModel {
    /// Gate run before the dialog opens. A falsy non-null result refuses.
    async fn can_activate(&self, _model: &Model) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    async fn activate(&self, _model: &Model) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    /// Gate run before a programmatic close; receives the close action.
    async fn can_deactivate(&self, _action: &Value) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    async fn deactivate(&self, _action: &Value) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    /// Called synchronously once the dialog settles, before its host leaves
    /// the document.
    fn detached(&self) {}
}

/// Invokes `hook` on `view_model`, mapping a nullish result to `true`.
pub async fn invoke_lifecycle(view_model: &dyn ViewModel, hook: LifecycleHook, argument: &Value) -> Result<Value, UiError> {
    let result = match hook {
        LifecycleHook::CanActivate => view_model.can_activate(argument).await,
        LifecycleHook::Activate => view_model.activate(argument).await,
        LifecycleHook::CanDeactivate => view_model.can_deactivate(argument).await,
        LifecycleHook::Deactivate => view_model.deactivate(argument).await,
    };

    match result {
        Ok(Value::Null) => Ok(Value::Bool(true)),
        Ok(value) => Ok(value),
        Err(reason) => Err(UiError::Lifecycle { hook, reason }),
    }
}

/// Truthiness of a hook result: `false`, `0`, `""` and `null` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
