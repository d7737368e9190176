pub mod client;
pub mod models;

pub use client::{HttpTaskStore, ServiceConfig, StoreError, TaskStore};
pub use models::{RemoteTask, TaskDraft, TaskPatch};
