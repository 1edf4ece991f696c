//! Student record with per-course grades.

use std::collections::BTreeMap;

use super::person::{Describe, Person};

/// Minimum average required to pass.
pub const PASS_THRESHOLD: f64 = 11.0;

/// A student and the grades recorded so far.
///
/// The record stores whatever it is given: course names and grade ranges
/// are checked by the roster and the menu before calling [`Student::set_grade`].
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    person: Person,
    grades: BTreeMap<String, f64>,
}

impl Student {
    pub fn new(name: impl Into<String>, age: u32, id: impl Into<String>) -> Self {
        Self {
            person: Person::new(name, age, id),
            grades: BTreeMap::new(),
        }
    }

    pub(crate) fn with_grades(person: Person, grades: BTreeMap<String, f64>) -> Self {
        Self { person, grades }
    }

    pub fn id(&self) -> &str {
        self.person.id()
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub fn age(&self) -> u32 {
        self.person.age
    }

    /// Recorded grades keyed by course name.
    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    /// Insert or overwrite the grade for `course`.
    pub fn set_grade(&mut self, course: impl Into<String>, value: f64) {
        self.grades.insert(course.into(), value);
    }

    /// Arithmetic mean of all grades, 0.0 when none are recorded.
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        self.grades.values().sum::<f64>() / self.grades.len() as f64
    }

    pub fn passed(&self) -> bool {
        self.average() >= PASS_THRESHOLD
    }

    /// Label shown next to the average.
    pub fn status_label(&self) -> &'static str {
        if self.passed() {
            "APPROVED"
        } else {
            "NOT APPROVED"
        }
    }
}

impl Describe for Student {
    fn person(&self) -> &Person {
        &self.person
    }

    fn describe(&self) -> String {
        format!(
            "{} | Average: {:.2} -> {}",
            self.person,
            self.average(),
            self.status_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_empty_is_zero() {
        let student = Student::new("Ana", 20, "A1");
        assert_eq!(student.average(), 0.0);
        assert!(!student.passed());
    }

    #[test]
    fn test_average_is_mean() {
        let mut student = Student::new("Ana", 20, "A1");
        student.set_grade("Mathematics", 15.0);
        student.set_grade("Language", 17.0);
        assert_eq!(student.average(), 16.0);

        student.set_grade("Science", 4.0);
        assert!((student.average() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_grade_overwrites() {
        let mut student = Student::new("Ana", 20, "A1");
        student.set_grade("Mathematics", 5.0);
        student.set_grade("Mathematics", 18.0);
        assert_eq!(student.grades().len(), 1);
        assert_eq!(student.grades()["Mathematics"], 18.0);
    }

    #[test]
    fn test_pass_boundary() {
        let mut student = Student::new("Luis", 17, "L1");
        student.set_grade("Mathematics", 11.0);
        assert!(student.passed());

        student.set_grade("Mathematics", 10.99);
        assert!(!student.passed());
    }

    #[test]
    fn test_describe_includes_average_and_status() {
        let mut student = Student::new("Ana", 20, "A1");
        student.set_grade("Mathematics", 15.0);
        student.set_grade("Language", 17.0);
        assert_eq!(
            student.describe(),
            "Ana (Age: 20, ID: A1) | Average: 16.00 -> APPROVED"
        );

        let empty = Student::new("Bo", 30, "B2");
        assert_eq!(
            empty.describe(),
            "Bo (Age: 30, ID: B2) | Average: 0.00 -> NOT APPROVED"
        );
    }
}
