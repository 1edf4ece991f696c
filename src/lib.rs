//! School roster: student records, grade book, JSON persistence and CSV export.
//!
//! The [`roster::Roster`] owns the students and enforces id uniqueness and the
//! course catalog; the [`menu`] module is the interactive front end.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod records;
pub mod roster;
pub mod version;

pub use catalog::CourseCatalog;
pub use error::{Error, Result};
pub use records::{Describe, Instructor, Person, Student};
pub use roster::{LoadOutcome, Roster};
