//! Business logic services for the Farm Layout Planner

pub mod farm;
pub mod layout;
pub mod survey;

pub use farm::FarmService;
pub use layout::LayoutService;
pub use survey::SurveyService;
