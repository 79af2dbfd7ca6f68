use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use solar_calendar::{
    SOLAR_MONTHS, SeasonalEventProvider, SolarCalendar,
    precession,
    tarot::{self, Marker},
};
use tracing::debug;

use crate::cli::{DateArgs, MonthDatesArgs, RenameArgs, UpcomingArgs, YearArgs};

/// Width of the duration bars in the constellation table.
const BAR_WIDTH: u16 = 20;
/// Transit length that fills a whole bar.
const BAR_FULL_DAYS: u16 = 45;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn instant_for(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.map_or_else(Utc::now, |d| d.and_time(NaiveTime::MIN).and_utc())
}

fn year_or_current(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Utc::now().year())
}

fn marker_label(marker: Marker) -> String {
    match marker {
        Marker::Season(season) => season.label().to_owned(),
        Marker::CrossQuarter(festival) => festival.to_string(),
    }
}

pub fn today<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>, args: DateArgs) -> Result<()> {
    let instant = instant_for(args.date);
    debug!(%instant, "resolving date");

    let position = calendar.month_position(&instant);
    let record = &position.record;
    let constellation = calendar.constellation_on(&instant);
    let card = tarot::card_for(constellation);
    let era = calendar.constellation_era(&instant);

    println!("Gregorian:     {}", instant.format("%A, %B %-d, %Y"));
    println!("Solar month:   {} {}", record.name(), record.symbol());
    println!("Period:        {}", record.span_label());
    println!("Day:           {} of {}", position.day_of_month, record.days());
    println!("Week day:      {}", position.weekday_name());
    println!("Constellation: {constellation} ({}, {})", card.title, card.element);
    println!(
        "Era:           year {} of the Age of {} ({:.2}% through)",
        era.era_year, era.current_age, era.age_percentage
    );

    let specials = calendar
        .special_cards_near(instant)
        .context("failed to compute seasonal events")?;
    for (event, card) in specials {
        println!(
            "Special card:  {} ({}, {})",
            card.title,
            marker_label(event.marker),
            event.timestamp.format(TIMESTAMP_FORMAT)
        );
    }
    Ok(())
}

pub fn months<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>) {
    for record in calendar.months() {
        let number = record.number().map_or_else(|| "  ".to_owned(), |n| format!("{n:>2}"));
        println!("{number} {} {:<24} {}", record.symbol(), record.name(), record.span_label());
    }
}

pub fn month_dates<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>, args: MonthDatesArgs) -> Result<()> {
    let dates = calendar.month_dates(year_or_current(args.year), args.month);
    if dates.is_empty() {
        bail!("month must be between 1 and {SOLAR_MONTHS}, got {}", args.month);
    }
    for (i, date) in dates.iter().enumerate() {
        println!("{:>2}  {}", i + 1, date.format("%a %Y-%m-%d"));
    }
    Ok(())
}

pub fn constellations<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>, args: YearArgs) {
    let table = calendar.constellations();
    for (constellation, interval) in table.iter() {
        let filled = usize::from(interval.duration_days().min(BAR_FULL_DAYS) * BAR_WIDTH / BAR_FULL_DAYS);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(usize::from(BAR_WIDTH) - filled));
        println!(
            "{:<12} {} - {:<12} {bar} {:>2} days",
            constellation.name(),
            interval.start().long_name(),
            interval.end().long_name(),
            interval.duration_days()
        );
    }

    let year = year_or_current(args.year);
    println!();
    println!("Transitions in {year}:");
    for (constellation, date) in table.transitions(year) {
        println!("  {} {constellation}", date.format("%Y-%m-%d"));
    }
}

pub fn seasons<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>, args: YearArgs) -> Result<()> {
    let year = year_or_current(args.year);
    let markers = calendar
        .equinox_solstice_dates(year)
        .with_context(|| format!("failed to compute equinoxes and solstices for {year}"))?;
    for event in markers.events() {
        println!(
            "{:<16} {:<9} {}",
            event.label(),
            event.kind().to_string(),
            event.timestamp.format(TIMESTAMP_FORMAT)
        );
    }

    let festivals = calendar
        .cross_quarter_dates(year)
        .with_context(|| format!("failed to compute cross-quarter dates for {year}"))?;
    println!();
    println!("Cross-quarters ({}):", calendar.config().cross_quarter_mode);
    for festival in festivals {
        println!("  {:<11} {}", festival.festival.to_string(), festival.timestamp.format(TIMESTAMP_FORMAT));
    }
    Ok(())
}

pub fn upcoming<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>, args: UpcomingArgs) -> Result<()> {
    let days = args.days.unwrap_or(calendar.config().upcoming_days);
    let events = calendar
        .upcoming_events(Utc::now(), days)
        .context("failed to compute upcoming events")?;
    if events.is_empty() {
        println!("No seasonal events in the next {days} days.");
    }
    for event in events {
        println!(
            "{}  {}",
            event.timestamp.format(TIMESTAMP_FORMAT),
            marker_label(event.marker)
        );
    }
    Ok(())
}

pub fn era(args: YearArgs) {
    let year = year_or_current(args.year);
    let state = precession::compute(year);
    println!("Era year:        {}", state.era_year);
    println!("Current age:     {}", state.current_age);
    println!("Years into age:  {:.2}", state.years_into_age);
    println!("Years remaining: {:.2}", state.years_remaining);
    println!("Progress:        {:.2}%", state.age_percentage);
    println!("Cycle position:  {} of {}", state.cycle_position, state.cycle_total);
}

pub fn reading<P: SeasonalEventProvider>(calendar: &SolarCalendar<P>, args: DateArgs) {
    let instant = instant_for(args.date);
    let reading = calendar.reading_at(&instant);
    println!("{}", tarot::Reading::spread().name);
    for (position, card) in [("Past", reading.past), ("Present", reading.present), ("Future", reading.future)] {
        println!("  {position:<8} {} ({}, {})", card.title, card.constellation, card.element);
        println!("           {}", card.keywords.join(", "));
        if let Some(tree) = tarot::tree_of_life(card.constellation) {
            println!(
                "           {} {} / {} / {}",
                tree.hebrew_letter, tree.sephirah, tree.planet, tree.traditional_name
            );
        }
    }
}

pub fn rename_month<P: SeasonalEventProvider>(calendar: &mut SolarCalendar<P>, args: RenameArgs) -> Result<()> {
    calendar
        .rename_month(args.month, &args.name)
        .with_context(|| format!("failed to rename month {}", args.month))?;
    months(calendar);
    Ok(())
}
