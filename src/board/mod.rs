//! Task board for a single project view.
//!
//! The board partitions a project's tasks into status columns and lets the
//! user move a task between columns by dragging it. Moves are applied to the
//! board immediately and reconciled with the task store once it answers. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Presentation models in [`view`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod view;

#[cfg(test)]
mod tests;
