mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use solar_calendar::{CalendarConfig, SolarCalendar};
use tracing::info;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            CalendarConfig::load(path)?
        },
        None => CalendarConfig::default(),
    };
    let mut calendar = SolarCalendar::with_config(config).context("invalid month rename in config")?;

    match cli.command {
        Command::Today(args) => commands::today(&calendar, args),
        Command::Months => {
            commands::months(&calendar);
            Ok(())
        },
        Command::MonthDates(args) => commands::month_dates(&calendar, args),
        Command::Constellations(args) => {
            commands::constellations(&calendar, args);
            Ok(())
        },
        Command::Seasons(args) => commands::seasons(&calendar, args),
        Command::Upcoming(args) => commands::upcoming(&calendar, args),
        Command::Era(args) => {
            commands::era(args);
            Ok(())
        },
        Command::Reading(args) => {
            commands::reading(&calendar, args);
            Ok(())
        },
        Command::RenameMonth(args) => commands::rename_month(&mut calendar, args),
    }
}
