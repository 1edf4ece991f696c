//! The fixed course catalog.
//!
//! Grades may only be recorded against one of these courses. The catalog is
//! built once at start-up and handed to the roster and the menu.

use std::fmt;

/// Course names offered by the school, in presentation order.
pub const STANDARD_COURSES: [&str; 3] = ["Mathematics", "Language", "Science"];

/// Course names used by data files from the older Spanish-language tool.
const LEGACY_COURSE_NAMES: [(&str, &str); 3] = [
    ("Matemática", "Mathematics"),
    ("Lenguaje", "Language"),
    ("Ciencia", "Science"),
];

/// Ordered, immutable set of course names eligible for grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: &'static [&'static str],
}

impl CourseCatalog {
    /// The three-course catalog used by the school.
    pub const fn standard() -> Self {
        Self {
            courses: &STANDARD_COURSES,
        }
    }

    /// Whether `course` is part of the catalog (exact, case-sensitive match).
    pub fn contains(&self, course: &str) -> bool {
        self.courses.iter().any(|c| *c == course)
    }

    /// Catalog name for `course`, accepting the legacy Spanish names too.
    pub fn resolve(&self, course: &str) -> Option<&'static str> {
        let name = LEGACY_COURSE_NAMES
            .iter()
            .find(|(legacy, _)| *legacy == course)
            .map_or(course, |(_, name)| *name);
        self.courses.iter().copied().find(|c| *c == name)
    }

    /// Courses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.courses.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for CourseCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.courses.join(", "))
    }
}
