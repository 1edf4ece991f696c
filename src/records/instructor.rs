//! Instructor record.

use crate::catalog::CourseCatalog;

use super::person::{Describe, Person};

/// An instructor and the courses they are assigned to teach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    person: Person,
    assigned_courses: Vec<String>,
}

impl Instructor {
    /// Create an instructor assigned to every course in `catalog`.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        id: impl Into<String>,
        catalog: &CourseCatalog,
    ) -> Self {
        Self::with_courses(name, age, id, catalog.iter())
    }

    /// Create an instructor with an explicit course list.
    pub fn with_courses<I, S>(
        name: impl Into<String>,
        age: u32,
        id: impl Into<String>,
        courses: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            person: Person::new(name, age, id),
            assigned_courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn assigned_courses(&self) -> &[String] {
        &self.assigned_courses
    }
}

impl Describe for Instructor {
    fn person(&self) -> &Person {
        &self.person
    }

    fn describe(&self) -> String {
        format!(
            "{} | Teaches: {}",
            self.person,
            self.assigned_courses.join(", ")
        )
    }
}
