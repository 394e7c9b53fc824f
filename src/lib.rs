// TaskPlanner - Task list manager backed by a write-through JSON slot

pub mod config;
pub mod date;
pub mod form;
pub mod models;
pub mod render;
pub mod slot;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use form::{FormMode, Submitted, TaskForm, TaskInput, ValidationError};
pub use models::{DEFAULT_STATUS, DONE, InsertOrder, Task, TaskFields};
pub use slot::{FileSlot, MemorySlot, Slot};
pub use store::TaskStore;
