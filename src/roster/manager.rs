//! Roster manager: register, look up, grade, persist and export students.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalog::CourseCatalog;
use crate::error::{Error, Result};
use crate::records::Student;

use super::export;
use super::store::{self, LoadOutcome, SavedStudent};

/// The in-memory student collection, keyed by student id.
#[derive(Debug, Clone)]
pub struct Roster {
    catalog: CourseCatalog,
    students: BTreeMap<String, Student>,
}

impl Roster {
    /// Create an empty roster that accepts grades for the courses in `catalog`.
    pub fn new(catalog: CourseCatalog) -> Self {
        Self {
            catalog,
            students: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.students.contains_key(id)
    }

    // ─────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────

    /// Register a new student. Returns `false` without touching the roster
    /// when `id` is already taken.
    pub fn register(&mut self, name: impl Into<String>, age: u32, id: impl Into<String>) -> bool {
        let id = id.into();
        match self.students.entry(id) {
            Entry::Occupied(entry) => {
                debug!(id = %entry.key(), "Duplicate student id rejected");
                false
            }
            Entry::Vacant(entry) => {
                let student = Student::new(name, age, entry.key().clone());
                debug!(id = %student.id(), name = %student.name(), "Student registered");
                entry.insert(student);
                true
            }
        }
    }

    /// Remove a student. Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.students.remove(id).is_some();
        if removed {
            debug!(id = %id, "Student removed");
        }
        removed
    }

    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    /// Every student, ordered by id.
    pub fn list_all(&self) -> Vec<&Student> {
        self.students.values().collect()
    }

    /// Record a grade. Returns `false` when the student is unknown or the
    /// course is not in the catalog. The value is stored as given.
    pub fn assign_grade(&mut self, id: &str, course: &str, value: f64) -> bool {
        if !self.catalog.contains(course) {
            debug!(id = %id, course = %course, "Grade for unknown course rejected");
            return false;
        }
        match self.students.get_mut(id) {
            Some(student) => {
                student.set_grade(course, value);
                debug!(id = %id, course = %course, value, "Grade assigned");
                true
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────

    /// Write every student to `path` as JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let entries: Vec<SavedStudent<'_>> =
            self.students.values().map(SavedStudent::from).collect();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(path, json).map_err(|e| Error::write(path, e))?;
        info!(path = %path.display(), students = entries.len(), "Roster saved");
        Ok(())
    }

    /// Replace the roster with the contents of `path`.
    ///
    /// A missing file or one that fails to parse leaves the roster as it was.
    /// Within a parsed file, grades that are not numbers or belong to courses
    /// outside the catalog are dropped individually.
    pub fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No roster file to load");
                return Ok(LoadOutcome::Missing);
            }
            Err(e) => return Err(Error::read(path, e)),
        };

        let entries = match store::decode(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Roster file is corrupt or empty, load skipped"
                );
                return Ok(LoadOutcome::Rejected {
                    reason: e.to_string(),
                });
            }
        };

        let catalog = self.catalog;
        self.students.clear();
        for entry in entries {
            let student = entry.into_student(|course| catalog.resolve(course));
            self.students.insert(student.id().to_string(), student);
        }

        info!(path = %path.display(), students = self.students.len(), "Roster loaded");
        Ok(LoadOutcome::Loaded {
            students: self.students.len(),
        })
    }

    /// Write the CSV export to `path`, replacing any existing file.
    pub fn export_table(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::write(path, e))?;
        export::write_table(BufWriter::new(file), self.students.values())
            .map_err(|e| Error::write(path, e))?;
        info!(path = %path.display(), students = self.students.len(), "Roster exported");
        Ok(())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(CourseCatalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn roster_with_ana() -> Roster {
        let mut roster = Roster::default();
        assert!(roster.register("Ana", 20, "A1"));
        roster
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut roster = roster_with_ana();
        assert!(!roster.register("Another Ana", 40, "A1"));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.find("A1").unwrap().name(), "Ana");
    }

    #[test]
    fn test_remove() {
        let mut roster = roster_with_ana();
        assert!(!roster.remove("nope"));
        assert_eq!(roster.len(), 1);

        assert!(roster.remove("A1"));
        assert!(roster.is_empty());
        assert!(roster.find("A1").is_none());

        assert!(roster.register("Ana", 21, "A1"));
        assert_eq!(roster.find("A1").unwrap().age(), 21);
    }

    #[test]
    fn test_assign_grade_example() {
        let mut roster = roster_with_ana();
        assert!(roster.assign_grade("A1", "Mathematics", 15.0));
        assert!(roster.assign_grade("A1", "Language", 17.0));

        let ana = roster.find("A1").unwrap();
        assert_eq!(ana.average(), 16.0);
        assert!(ana.passed());
    }

    #[test]
    fn test_assign_grade_rejects_unknown_course_and_student() {
        let mut roster = roster_with_ana();
        assert!(roster.assign_grade("A1", "Science", 9.0));

        assert!(!roster.assign_grade("A1", "History", 20.0));
        assert!(!roster.assign_grade("A1", "mathematics", 20.0));
        assert!(!roster.assign_grade("Z9", "Science", 20.0));

        let grades = roster.find("A1").unwrap().grades();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades["Science"], 9.0);
    }

    #[test]
    fn test_list_all_returns_every_student() {
        let mut roster = Roster::default();
        roster.register("carla", 19, "C3");
        roster.register("Ana", 20, "A1");
        roster.register("Bruno", 22, "B2");

        let ids: Vec<_> = roster.list_all().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["A1", "B2", "C3"]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");

        let mut roster = roster_with_ana();
        roster.assign_grade("A1", "Mathematics", 15.25);
        roster.assign_grade("A1", "Science", 0.1);
        roster.register("Bo", 30, "B2");
        roster.save(&path).unwrap();

        let mut fresh = Roster::default();
        let outcome = fresh.load(&path).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { students: 2 });
        assert_eq!(fresh.find("A1"), roster.find("A1"));
        assert_eq!(fresh.find("B2"), roster.find("B2"));
    }

    #[test]
    fn test_load_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut roster = roster_with_ana();
        let outcome = roster.load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_load_corrupt_file_keeps_roster() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        fs::write(&path, "[{\"name\": \"Broken\"").unwrap();

        let mut roster = roster_with_ana();
        roster.assign_grade("A1", "Language", 12.0);
        let before = roster.find("A1").cloned();

        let outcome = roster.load(&path).unwrap();
        assert!(matches!(outcome, LoadOutcome::Rejected { .. }));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.find("A1").cloned(), before);
    }

    #[test]
    fn test_load_replaces_roster_and_drops_bad_grades() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        fs::write(
            &path,
            r#"[{"name": "Eva", "age": 18, "id": "E5",
                 "grades": {"Mathematics": "n/a", "Science": "13", "Art": 20}}]"#,
        )
        .unwrap();

        let mut roster = roster_with_ana();
        roster.load(&path).unwrap();

        assert!(roster.find("A1").is_none());
        let eva = roster.find("E5").unwrap();
        assert_eq!(eva.grades().len(), 1);
        assert_eq!(eva.grades()["Science"], 13.0);
    }

    #[test]
    fn test_load_legacy_file_keeps_grades() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        fs::write(
            &path,
            r#"[{"nombre": "Ana", "edad": 20.0, "dni": "A1",
                 "notas": {"Matemática": 15, "Lenguaje": 17}}]"#,
        )
        .unwrap();

        let mut roster = Roster::default();
        let outcome = roster.load(&path).unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { students: 1 });
        let ana = roster.find("A1").unwrap();
        assert_eq!(ana.age(), 20);
        assert_eq!(ana.grades()["Mathematics"], 15.0);
        assert_eq!(ana.grades()["Language"], 17.0);
        assert_eq!(ana.average(), 16.0);
    }

    #[test]
    fn test_load_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut roster = roster_with_ana();
        assert!(roster.load(dir.path()).is_err());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_export_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");

        let mut roster = roster_with_ana();
        roster.assign_grade("A1", "Mathematics", 15.0);
        roster.assign_grade("A1", "Language", 17.0);
        roster.register("Bo", 30, "B2");
        roster.export_table(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ID,Name,Age,Course,Grade,Average",
                "A1,Ana,20,Language,17,16.00",
                "A1,Ana,20,Mathematics,15,16.00",
                "B2,Bo,30,,,0.00",
            ]
        );
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let roster = roster_with_ana();
        let err = roster
            .save(&dir.path().join("no").join("such").join("dir.json"))
            .unwrap_err();
        assert!(matches!(err, Error::IoWrite { .. }));
    }
}
