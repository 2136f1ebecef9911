//! Shared types and models for the Farm Layout Planner
//!
//! This crate contains the layout engine, the boundary survey geometry and the
//! types shared between the backend, the browser (via WASM), and other
//! components of the system.

pub mod geometry;
pub mod models;
pub mod types;
pub mod validation;

pub use geometry::*;
pub use models::*;
pub use types::*;
pub use validation::*;
