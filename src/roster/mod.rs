//! Roster management: the student collection, grade assignment,
//! JSON persistence and CSV export.

pub mod export;
pub mod manager;
pub mod store;

pub use manager::Roster;
pub use store::LoadOutcome;
