//! Onboarding tasks: the model and the diagnostic-driven generator.

pub mod generator;
pub mod model;

pub use generator::{generate, generate_for};
pub use model::{CompletedTask, Priority, Task, TaskCategory, TaskStatus};
