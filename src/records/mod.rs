//! School records: the shared person fields and the two concrete shapes
//! built on them.
//!
//! Students carry grades and are owned by the roster; instructors only carry
//! the list of courses they teach.

pub mod instructor;
pub mod person;
pub mod student;

pub use instructor::Instructor;
pub use person::{Describe, Person};
pub use student::{Student, PASS_THRESHOLD};
