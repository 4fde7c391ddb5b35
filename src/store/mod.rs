//! Persistence layer: the `AccountStore` trait with in-memory and JSON-file backends.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::AccountStore;
