//! Interactive text menu over a [`Roster`].
//!
//! The menu owns all input validation the roster does not do:
//! age and grade ranges come from
//! [`GradingSettings`](crate::config::GradingSettings), and course names
//! are taken from the roster's catalog rather than typed by the user.

pub mod prompt;

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::RosterConfig;
use crate::error::{Error, Result};
use crate::records::Describe;
use crate::roster::{LoadOutcome, Roster};

pub use prompt::Prompter;

/// File locations and input ranges the menu works with.
#[derive(Debug, Clone)]
pub struct MenuSettings {
    pub data_file: PathBuf,
    pub export_file: PathBuf,
    pub grade_range: RangeInclusive<f64>,
    pub age_range: RangeInclusive<u32>,
}

impl MenuSettings {
    pub fn from_config(config: &RosterConfig) -> Self {
        Self {
            data_file: config.data_file(),
            export_file: config.export_file(),
            grade_range: config.grading.grade_range(),
            age_range: config.grading.age_range(),
        }
    }
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Register,
    AssignGrades,
    ShowStudent,
    ListStudents,
    DeleteStudent,
    Save,
    Load,
    Export,
    Quit,
}

impl MenuOption {
    const ALL: [MenuOption; 9] = [
        MenuOption::Register,
        MenuOption::AssignGrades,
        MenuOption::ShowStudent,
        MenuOption::ListStudents,
        MenuOption::DeleteStudent,
        MenuOption::Save,
        MenuOption::Load,
        MenuOption::Export,
        MenuOption::Quit,
    ];

    /// Map the number typed at the prompt to an option.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let index: usize = choice.trim().parse().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Register => "Register student",
            MenuOption::AssignGrades => "Assign grades to student",
            MenuOption::ShowStudent => "Show student information",
            MenuOption::ListStudents => "List all students",
            MenuOption::DeleteStudent => "Delete student",
            MenuOption::Save => "Save data (JSON)",
            MenuOption::Load => "Load data (JSON)",
            MenuOption::Export => "Export to CSV",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Whether the session should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One interactive session.
pub struct Menu<'a, R, W> {
    roster: &'a mut Roster,
    settings: MenuSettings,
    prompt: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(roster: &'a mut Roster, settings: MenuSettings, input: R, output: W) -> Self {
        Self {
            roster,
            settings,
            prompt: Prompter::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Load the data file if one exists. Silent when there is none.
    pub fn autoload(&mut self) -> Result<()> {
        match self.roster.load(&self.settings.data_file)? {
            LoadOutcome::Missing => {}
            LoadOutcome::Loaded { students } => {
                writeln!(
                    self.prompt.out(),
                    " i Previous data loaded automatically ({} students)",
                    students
                )?;
            }
            LoadOutcome::Rejected { .. } => {
                writeln!(
                    self.prompt.out(),
                    "* Data file {} is corrupt or empty. Starting with an empty roster.",
                    self.settings.data_file.display()
                )?;
            }
        }
        Ok(())
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        info!(students = self.roster.len(), "Menu session started");
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt.line("Select an option: ")? else {
                break;
            };

            let flow = match MenuOption::from_choice(&choice) {
                Some(option) => {
                    debug!(option = ?option, "Menu option selected");
                    self.dispatch(option)?
                }
                None => {
                    writeln!(self.prompt.out(), "* Invalid option.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }
        writeln!(self.prompt.out(), "Goodbye!")?;
        info!(students = self.roster.len(), "Menu session ended");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        let out = self.prompt.out();
        writeln!(out)?;
        writeln!(out, "========== SCHOOL ROSTER ==========")?;
        for (i, option) in MenuOption::ALL.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, option.label())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<Flow> {
        match option {
            MenuOption::Register => self.register(),
            MenuOption::AssignGrades => self.assign_grades(),
            MenuOption::ShowStudent => self.show_student(),
            MenuOption::ListStudents => self.list_students(),
            MenuOption::DeleteStudent => self.delete_student(),
            MenuOption::Save => self.save(),
            MenuOption::Load => self.load(),
            MenuOption::Export => self.export(),
            MenuOption::Quit => Ok(Flow::Quit),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────

    fn register(&mut self) -> Result<Flow> {
        writeln!(self.prompt.out(), "\n--- Register student ---")?;
        let Some(name) = self.prompt.line("Name: ")? else {
            return Ok(Flow::Quit);
        };

        let range = &self.settings.age_range;
        let wide = i64::from(*range.start())..=i64::from(*range.end());
        let Some(age) = self.prompt.number_in("Age: ", &wide)? else {
            return Ok(Flow::Quit);
        };
        let age = u32::try_from(age)
            .map_err(|e| Error::Internal(format!("age out of range: {}", e)))?;

        let Some(id) = self.prompt.line("ID: ")? else {
            return Ok(Flow::Quit);
        };

        if self.roster.register(name, age, id) {
            writeln!(self.prompt.out(), "Student registered.")?;
        } else {
            writeln!(self.prompt.out(), "A student with that ID already exists.")?;
        }
        Ok(Flow::Continue)
    }

    fn assign_grades(&mut self) -> Result<Flow> {
        writeln!(self.prompt.out(), "\n--- Assign grades ---")?;
        let Some(id) = self.prompt.line("Student ID: ")? else {
            return Ok(Flow::Quit);
        };
        if !self.roster.contains(&id) {
            writeln!(self.prompt.out(), "No student with that ID.")?;
            return Ok(Flow::Continue);
        }

        let catalog = *self.roster.catalog();
        let range = self.settings.grade_range.clone();
        self.print_courses()?;
        writeln!(
            self.prompt.out(),
            "Enter grades from {} to {} (leave blank to skip a course)",
            range.start(),
            range.end()
        )?;

        for course in catalog.iter() {
            let Some(answer) = self.prompt.line(&format!("Grade for {}: ", course))? else {
                return Ok(Flow::Quit);
            };
            if answer.is_empty() {
                continue;
            }
            match answer.parse::<f64>() {
                Ok(value) if range.contains(&value) => {
                    self.roster.assign_grade(&id, course, value);
                }
                Ok(_) => writeln!(
                    self.prompt.out(),
                    "* Grade must be between {} and {}. Skipped.",
                    range.start(),
                    range.end()
                )?,
                Err(_) => writeln!(self.prompt.out(), "* Invalid value. Skipped.")?,
            }
        }

        writeln!(self.prompt.out(), "Grades recorded.")?;
        Ok(Flow::Continue)
    }

    fn print_courses(&mut self) -> Result<()> {
        let catalog = *self.roster.catalog();
        let out = self.prompt.out();
        writeln!(out, "\nAvailable courses")?;
        for (i, course) in catalog.iter().enumerate() {
            writeln!(out, " {}. {}", i + 1, course)?;
        }
        Ok(())
    }

    fn show_student(&mut self) -> Result<Flow> {
        writeln!(self.prompt.out(), "\n--- Student information ---")?;
        let Some(id) = self.prompt.line("Student ID: ")? else {
            return Ok(Flow::Quit);
        };

        let out = self.prompt.out();
        let Some(student) = self.roster.find(&id) else {
            writeln!(out, "No student with that ID.")?;
            return Ok(Flow::Continue);
        };

        writeln!(out, "\n{}", student.describe())?;
        if student.grades().is_empty() {
            writeln!(out, "No grades recorded.")?;
        } else {
            writeln!(out, "Grades:")?;
            for (course, grade) in student.grades() {
                writeln!(out, " - {}: {}", course, grade)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn list_students(&mut self) -> Result<Flow> {
        let out = self.prompt.out();
        writeln!(out, "\n--- Student list ---")?;

        let mut students = self.roster.list_all();
        if students.is_empty() {
            writeln!(out, "No students registered.")?;
            return Ok(Flow::Continue);
        }

        students.sort_by_key(|s| s.name().to_lowercase());
        for student in students {
            writeln!(out, "{}", student.describe())?;
        }
        Ok(Flow::Continue)
    }

    fn delete_student(&mut self) -> Result<Flow> {
        writeln!(self.prompt.out(), "\n--- Delete student ---")?;
        let Some(id) = self.prompt.line("Student ID: ")? else {
            return Ok(Flow::Quit);
        };

        if self.roster.remove(&id) {
            writeln!(self.prompt.out(), "Student removed.")?;
        } else {
            writeln!(self.prompt.out(), "No student with that ID.")?;
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<Flow> {
        self.roster.save(&self.settings.data_file)?;
        writeln!(self.prompt.out(), "Data saved to {}", self.settings.data_file.display())?;
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> Result<Flow> {
        let path = self.settings.data_file.display().to_string();
        match self.roster.load(&self.settings.data_file)? {
            LoadOutcome::Missing => {
                writeln!(self.prompt.out(), "No data file at {}; nothing loaded.", path)?;
            }
            LoadOutcome::Loaded { students } => {
                writeln!(self.prompt.out(), "Loaded {} students from {}", students, path)?;
            }
            LoadOutcome::Rejected { .. } => {
                writeln!(
                    self.prompt.out(),
                    "* Data file {} is corrupt or empty. Load skipped.",
                    path
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> Result<Flow> {
        self.roster.export_table(&self.settings.export_file)?;
        writeln!(self.prompt.out(), "Data exported to {}", self.settings.export_file.display())?;
        Ok(Flow::Continue)
    }
}
