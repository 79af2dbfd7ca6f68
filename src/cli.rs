use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Thirteen-month solar calendar and constellation zodiac.
#[derive(Parser)]
#[command(
    name = "solar-calendar",
    version,
    about = "Thirteen-month solar calendar, constellation zodiac and seasonal markers"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Show a date in the solar calendar, its constellation and era.
    Today(DateArgs),
    /// List the thirteen months and the special days.
    Months,
    /// List the 28 dates of one month.
    MonthDates(MonthDatesArgs),
    /// Show the constellation intervals and their transitions in a year.
    Constellations(YearArgs),
    /// Show the equinoxes, solstices and cross-quarter festivals of a year.
    Seasons(YearArgs),
    /// List seasonal events in the coming days.
    Upcoming(UpcomingArgs),
    /// Show the position in the precession Great Year.
    Era(YearArgs),
    /// Draw a Constellation Path reading for a date.
    Reading(DateArgs),
    /// Rename a month and print the resulting table.
    RenameMonth(RenameArgs),
}

/// Arguments for commands that take an optional date.
#[derive(clap::Args)]
pub struct DateArgs {
    /// Date to show (YYYY-MM-DD); defaults to today in UTC.
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for commands that take an optional year.
#[derive(clap::Args)]
pub struct YearArgs {
    /// Gregorian year; defaults to the current year.
    #[arg(short, long, allow_hyphen_values = true)]
    pub year: Option<i32>,
}

/// Arguments for the `month-dates` subcommand.
#[derive(clap::Args)]
pub struct MonthDatesArgs {
    /// Month number (1-13).
    pub month: u8,

    /// Solar year (starting in March); defaults to the current year.
    #[arg(short, long)]
    pub year: Option<i32>,
}

/// Arguments for the `upcoming` subcommand.
#[derive(clap::Args)]
pub struct UpcomingArgs {
    /// Look-ahead window in days; overrides `upcoming_days` from config.
    #[arg(short, long)]
    pub days: Option<u32>,
}

/// Arguments for the `rename-month` subcommand.
#[derive(clap::Args)]
pub struct RenameArgs {
    /// Month number (1-13).
    pub month: u8,

    /// New name.
    pub name: String,
}
