//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the school roster.

use clap::{Args, Parser, Subcommand};

/// School Roster - student records and grade book
///
/// Registers students, records their Mathematics, Language and Science
/// grades, keeps the roster in a JSON file and exports it as CSV.
#[derive(Parser, Debug)]
#[command(name = "school-roster")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The selected command, falling back to `run` with default options.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run {
            data: DataArgs::default(),
            export_file: None,
        })
    }
}

/// Options shared by every command that reads the roster data file
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DataArgs {
    /// Path to configuration file
    #[arg(short, long, env = "SCHOOL_ROSTER_CONFIG")]
    pub config: Option<String>,

    /// Roster JSON file (overrides storage.data_file)
    #[arg(short, long)]
    pub data_file: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive menu
    Run {
        #[command(flatten)]
        data: DataArgs,

        /// CSV export file (overrides storage.export_file)
        #[arg(short, long)]
        export_file: Option<String>,
    },

    /// Print every stored student, sorted by name
    List {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Export the stored roster to CSV without opening the menu
    Export {
        #[command(flatten)]
        data: DataArgs,

        /// CSV output file (overrides storage.export_file)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the course catalog
    Courses,

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_about_uses_doc_title() {
        let about = Cli::command().get_about().map(|a| a.to_string());
        assert_eq!(
            about.as_deref(),
            Some("School Roster - student records and grade book")
        );
    }

    #[test]
    fn test_no_command_defaults_to_run() {
        let cli = Cli::parse_from(["school-roster"]);
        assert!(cli.command.is_none());
        assert_eq!(
            cli.resolved_command(),
            Commands::Run {
                data: DataArgs::default(),
                export_file: None
            }
        );
    }

    #[test]
    fn test_run_with_files() {
        let cli = Cli::parse_from([
            "school-roster",
            "run",
            "--data-file",
            "class.json",
            "--export-file",
            "class.csv",
        ]);
        match cli.resolved_command() {
            Commands::Run { data, export_file } => {
                assert_eq!(data.data_file.as_deref(), Some("class.json"));
                assert_eq!(export_file.as_deref(), Some("class.csv"));
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn test_export_output() {
        let cli = Cli::parse_from(["school-roster", "export", "-o", "out.csv"]);
        match cli.resolved_command() {
            Commands::Export { output, data } => {
                assert_eq!(output.as_deref(), Some("out.csv"));
                assert!(data.data_file.is_none());
            }
            other => panic!("Expected Export command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        let cli = Cli::parse_from(["school-roster", "-vv", "courses"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);

        let cli = Cli::parse_from(["school-roster", "--quiet", "list"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["school-roster", "config", "init", "--force"]);
        match cli.resolved_command() {
            Commands::Config {
                subcommand: ConfigSubcommand::Init { path, force },
            } => {
                assert!(path.is_none());
                assert!(force);
            }
            other => panic!("Expected Config Init command, got {:?}", other),
        }
    }
}
