//! Fields shared by every school record.

use std::fmt;

/// Name, age and identifier common to students and instructors.
///
/// The identifier is fixed at construction; there is no way to change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    id: String,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            id: id.into(),
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Age: {}, ID: {})", self.name, self.age, self.id)
    }
}

/// Human-readable one-line summary of a record.
pub trait Describe {
    /// The shared person fields.
    fn person(&self) -> &Person;

    /// Summary line. The default renders only the shared fields.
    fn describe(&self) -> String {
        self.person().to_string()
    }
}

impl Describe for Person {
    fn person(&self) -> &Person {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_base_fields() {
        let person = Person::new("Ana", 20, "A1");
        assert_eq!(person.describe(), "Ana (Age: 20, ID: A1)");
        assert_eq!(person.id(), "A1");
    }
}
