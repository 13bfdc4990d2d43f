#[path = "core/composition.rs"]
mod composition;
