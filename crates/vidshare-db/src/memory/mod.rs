//! In-memory backend for local runs and tests

mod store;

pub use store::MemoryStore;
