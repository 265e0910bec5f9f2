pub mod page;
pub mod project;
pub mod rule;
pub mod transition;
pub mod version;
