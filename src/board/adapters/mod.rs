//! Adapter implementations for the board ports.

pub mod http;
pub mod memory;
pub mod payload;
pub mod retry;

pub use http::HttpTaskStore;
pub use memory::InMemoryTaskStore;
pub use retry::RetryingTaskStore;
