//! HTTP handlers for the Farm Layout Planner

mod farm;
mod health;
mod path;
mod plot;
mod survey;

pub use farm::*;
pub use health::*;
pub use path::*;
pub use plot::*;
pub use survey::*;
