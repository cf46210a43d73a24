//! Domain-only types that never cross the `shared` DTO boundary.

pub mod content;
pub mod plan;
pub mod tracker;
