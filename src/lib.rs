//! Taskboard: status board core for a team task tracker.
//!
//! This crate provides the in-memory task board of a project view, the drag
//! gesture that moves a task between status columns, and the optimistic
//! update contract with the external task store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task store
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Column partition, drag gestures, and store reconciliation
//! - [`config`]: Store connection, retry, and view settings

pub mod board;
pub mod config;
