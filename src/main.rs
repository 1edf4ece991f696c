//! School Roster - interactive student records and grade book
//!
//! Entry point for the `school-roster` binary.

use std::io;
use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use school_roster::cli::{Cli, Commands, ConfigSubcommand, DataArgs};
use school_roster::config::{self, RosterConfig};
use school_roster::menu::{Menu, MenuSettings};
use school_roster::records::Describe;
use school_roster::{logging, version, CourseCatalog, Error, LoadOutcome, Result, Roster};

fn main() {
    if let Err(e) = run() {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.resolved_command();

    // Commands that don't need the roster configuration
    match &command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Courses => {
            print_courses(&CourseCatalog::standard());
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        _ => {}
    }

    let (data, export_override) = match &command {
        Commands::Run { data, export_file } => (data, export_file.as_deref()),
        Commands::Export { data, output } => (data, output.as_deref()),
        Commands::List { data } => (data, None),
        Commands::Version | Commands::Courses | Commands::Config { .. } => unreachable!(),
    };
    let config = load_config(data, export_override)?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::BuildInfo::current();
    info!(version = %build.full_version(), "Starting school-roster");

    let mut roster = Roster::new(CourseCatalog::standard());

    match command {
        Commands::Run { .. } => run_menu(&mut roster, &config),
        Commands::List { .. } => {
            load_existing(&mut roster, &config.data_file())?;
            list_students(&roster);
            Ok(())
        }
        Commands::Export { .. } => {
            load_existing(&mut roster, &config.data_file())?;
            let path = config.export_file();
            roster.export_table(&path)?;
            println!("Exported {} students to {}", roster.len(), path.display());
            Ok(())
        }
        Commands::Version | Commands::Courses | Commands::Config { .. } => unreachable!(),
    }
}

fn load_config(data: &DataArgs, export_file: Option<&str>) -> Result<RosterConfig> {
    let mut config = RosterConfig::load(data.config.as_deref())?;
    config.apply_cli_overrides(data.data_file.as_deref(), export_file);
    Ok(config)
}

/// Run the interactive menu on stdin/stdout
fn run_menu(roster: &mut Roster, config: &RosterConfig) -> Result<()> {
    let settings = MenuSettings::from_config(config);
    info!(
        data_file = %settings.data_file.display(),
        export_file = %settings.export_file.display(),
        "Storage paths configured"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(roster, settings, stdin.lock(), stdout.lock());
    menu.autoload()?;
    menu.run()
}

/// Load the data file for the one-shot commands; a corrupt file is an error here
fn load_existing(roster: &mut Roster, path: &Path) -> Result<()> {
    match roster.load(path)? {
        LoadOutcome::Loaded { .. } => Ok(()),
        LoadOutcome::Missing => {
            warn!(path = %path.display(), "No data file, roster is empty");
            Ok(())
        }
        LoadOutcome::Rejected { reason } => Err(Error::Internal(format!(
            "data file {} could not be parsed: {}",
            path.display(),
            reason
        ))),
    }
}

fn list_students(roster: &Roster) {
    let mut students = roster.list_all();
    if students.is_empty() {
        println!("No students registered.");
        return;
    }
    students.sort_by_key(|s| s.name().to_lowercase());
    for student in students {
        println!("{}", student.describe());
    }
}

fn print_courses(catalog: &CourseCatalog) {
    println!("Available courses");
    for (i, course) in catalog.iter().enumerate() {
        println!(" {}. {}", i + 1, course);
    }
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = RosterConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            RosterConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
