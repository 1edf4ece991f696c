//! CSV export of the roster.

use std::io::{self, Write};

use crate::records::Student;

/// Header row of the export.
pub const HEADER: [&str; 6] = ["ID", "Name", "Age", "Course", "Grade", "Average"];

/// Write one row per (course, grade) pair, or a single row with empty
/// course and grade for students without grades.
pub fn write_table<'a, W, I>(mut out: W, students: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Student>,
{
    writeln!(out, "{}", HEADER.join(","))?;

    for student in students {
        let id = escape_csv(student.id());
        let name = escape_csv(student.name());
        let average = format!("{:.2}", student.average());

        if student.grades().is_empty() {
            writeln!(out, "{},{},{},,,{}", id, name, student.age(), average)?;
            continue;
        }

        for (course, grade) in student.grades() {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                id,
                name,
                student.age(),
                escape_csv(course),
                grade,
                average
            )?;
        }
    }

    out.flush()
}

/// Escape a string for CSV output
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(students: &[Student]) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, students).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_student_without_grades_gets_one_row() {
        let out = render(&[Student::new("Bo", 30, "B2")]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, vec!["ID,Name,Age,Course,Grade,Average", "B2,Bo,30,,,0.00"]);
    }

    #[test]
    fn test_one_row_per_grade() {
        let mut ana = Student::new("Ana", 20, "A1");
        ana.set_grade("Mathematics", 15.0);
        ana.set_grade("Language", 17.5);

        let out = render(&[ana]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "A1,Ana,20,Language,17.5,16.25");
        assert_eq!(lines[2], "A1,Ana,20,Mathematics,15,16.25");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("Perez, Ana"), "\"Perez, Ana\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
