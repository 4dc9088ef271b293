//! Step definitions for board drag BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
