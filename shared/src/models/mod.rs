//! Domain models for the Farm Layout Planner

mod drag;
mod farm;
mod layout;
mod path;
mod plot;
mod survey;

pub use drag::*;
pub use farm::*;
pub use layout::*;
pub use path::*;
pub use plot::*;
pub use survey::*;
