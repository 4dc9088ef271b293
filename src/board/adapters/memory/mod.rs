//! In-memory adapter implementations for the board ports.

mod store;

pub use store::InMemoryTaskStore;
