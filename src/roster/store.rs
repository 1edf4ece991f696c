//! On-disk JSON format for the roster.
//!
//! The file is an array of student entries:
//!
//! ```json
//! [
//!   { "name": "Ana", "age": 20, "id": "A1", "grades": { "Mathematics": 15.0 } }
//! ]
//! ```
//!
//! Files written by the older Spanish-language tool (`nombre`, `edad`, `dni`,
//! `notas`, and course names such as `Matemática`) are read as well.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::records::{Person, Student};

/// Result of [`Roster::load`](super::Roster::load).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the given path; the roster was left alone.
    Missing,
    /// The roster was replaced by the file's contents.
    Loaded { students: usize },
    /// The file could not be parsed; the roster was left alone.
    Rejected { reason: String },
}

/// Entry as written by `save`.
#[derive(Debug, Serialize)]
pub(crate) struct SavedStudent<'a> {
    pub name: &'a str,
    pub age: u32,
    pub id: &'a str,
    pub grades: &'a BTreeMap<String, f64>,
}

impl<'a> From<&'a Student> for SavedStudent<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            name: student.name(),
            age: student.age(),
            id: student.id(),
            grades: student.grades(),
        }
    }
}

/// Entry as read by `load`. Grades stay untyped until [`LoadedStudent::into_student`].
#[derive(Debug, Deserialize)]
pub(crate) struct LoadedStudent {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "edad", deserialize_with = "deserialize_age")]
    pub age: u32,
    #[serde(alias = "dni")]
    pub id: String,
    #[serde(default, alias = "notas")]
    pub grades: BTreeMap<String, Value>,
}

impl LoadedStudent {
    /// Build the student, keeping only grades that coerce to a number and
    /// whose course `resolve` maps to a catalog name.
    pub fn into_student(self, resolve: impl Fn(&str) -> Option<&'static str>) -> Student {
        let mut grades = BTreeMap::new();
        for (course, raw) in self.grades {
            let Some(name) = resolve(&course) else {
                warn!(id = %self.id, course = %course, "Dropping grade for unknown course");
                continue;
            };
            match coerce_grade(&raw) {
                Some(value) => {
                    grades.insert(name.to_string(), value);
                }
                None => warn!(
                    id = %self.id,
                    course = %course,
                    value = %raw,
                    "Dropping non-numeric grade"
                ),
            }
        }
        Student::with_grades(Person::new(self.name, self.age, self.id), grades)
    }
}

/// Parse the whole file. Any structural problem rejects the file as a unit.
pub(crate) fn decode(bytes: &[u8]) -> serde_json::Result<Vec<LoadedStudent>> {
    serde_json::from_slice(bytes)
}

/// JSON numbers and numeric strings become grades; anything else is dropped.
fn coerce_grade(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeField {
    Number(u32),
    Float(f64),
    Text(String),
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match AgeField::deserialize(deserializer)? {
        AgeField::Number(n) => Ok(n),
        AgeField::Float(f) if f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&f) => {
            Ok(f as u32)
        }
        AgeField::Float(f) => Err(de::Error::custom(format!("invalid age '{}'", f))),
        AgeField::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid age '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseCatalog;
    use serde_json::json;

    fn standard(course: &str) -> Option<&'static str> {
        CourseCatalog::standard().resolve(course)
    }

    #[test]
    fn test_coerce_grade() {
        assert_eq!(coerce_grade(&json!(15)), Some(15.0));
        assert_eq!(coerce_grade(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_grade(&json!(" 9.5 ")), Some(9.5));
        assert_eq!(coerce_grade(&json!("abc")), None);
        assert_eq!(coerce_grade(&json!(null)), None);
        assert_eq!(coerce_grade(&json!([1, 2])), None);
        assert_eq!(coerce_grade(&json!(true)), None);
        assert_eq!(coerce_grade(&json!("NaN")), None);
    }

    #[test]
    fn test_decode_legacy_keys() {
        let data =
            br#"[{"nombre": "Ana", "edad": "20", "dni": "A1", "notas": {"Mathematics": 14}}]"#;
        let entries = decode(data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Ana");
        assert_eq!(entries[0].age, 20);
        assert_eq!(entries[0].id, "A1");
    }

    #[test]
    fn test_decode_missing_grades_defaults_empty() {
        let entries = decode(br#"[{"name": "Bo", "age": 30, "id": "B2"}]"#).unwrap();
        let student = entries.into_iter().next().unwrap().into_student(standard);
        assert!(student.grades().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        assert!(decode(b"").is_err());
        assert!(decode(b"{not json").is_err());
        assert!(decode(br#"{"name": "Ana"}"#).is_err());
        assert!(decode(br#"[{"name": "Ana", "age": "old", "id": "A1"}]"#).is_err());
        assert!(decode(br#"[{"name": "Ana", "age": -3, "id": "A1"}]"#).is_err());
    }

    #[test]
    fn test_into_student_drops_bad_grades_only() {
        let entries = decode(
            br#"[{"name": "Ana", "age": 20, "id": "A1",
                  "grades": {"Mathematics": "x", "Language": 17, "History": 12}}]"#,
        )
        .unwrap();
        let student = entries
            .into_iter()
            .next()
            .unwrap()
            .into_student(standard);
        assert_eq!(student.grades().len(), 1);
        assert_eq!(student.grades()["Language"], 17.0);
    }

    #[test]
    fn test_into_student_maps_legacy_course_names() {
        let entries = decode(
            r#"[{"nombre": "Ana", "edad": 20, "dni": "A1",
                 "notas": {"Matemática": 15, "Lenguaje": "17", "Ciencia": "n/a"}}]"#
                .as_bytes(),
        )
        .unwrap();
        let student = entries.into_iter().next().unwrap().into_student(standard);
        assert_eq!(student.grades().len(), 2);
        assert_eq!(student.grades()["Mathematics"], 15.0);
        assert_eq!(student.grades()["Language"], 17.0);
        assert!(!student.grades().contains_key("Matemática"));
    }

    #[test]
    fn test_decode_whole_float_age() {
        let entries = decode(br#"[{"name": "Ana", "age": 20.0, "id": "A1"}]"#).unwrap();
        assert_eq!(entries[0].age, 20);
        assert!(decode(br#"[{"name": "Ana", "age": 20.5, "id": "A1"}]"#).is_err());
        assert!(decode(br#"[{"name": "Ana", "age": -1.0, "id": "A1"}]"#).is_err());
    }
}
