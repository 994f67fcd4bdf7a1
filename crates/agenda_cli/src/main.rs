//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `agenda_core` linkage.
//! - Print the current month grid and home buckets for a quick sanity check.
//!
//! Uses the database at `INSTAGENDA_DB_PATH` when set, otherwise an
//! in-memory one.

use agenda_core::db::{open_db, open_db_in_memory};
use agenda_core::{month_title, CalendarCell, Event, EventService, SqliteEventRepository};
use chrono::{Datelike, Local};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("agenda_core ping={}", agenda_core::ping());
    println!("agenda_core version={}", agenda_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("agenda_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let conn = match std::env::var("INSTAGENDA_DB_PATH") {
        Ok(path) if !path.trim().is_empty() => open_db(path.trim())?,
        _ => open_db_in_memory()?,
    };
    let events = EventService::new(SqliteEventRepository::try_new(&conn)?)?;
    let now = Local::now().naive_local();
    let today = now.date();

    println!();
    println!("{}", month_title(today));
    println!(" Su Mo Tu We Th Fr Sa");
    let mut line = String::new();
    for (index, day) in events.month_overview(today).iter().enumerate() {
        let label = match day.cell {
            CalendarCell::Blank => "   ".to_string(),
            CalendarCell::Day(date) => {
                let marker = if day.event_types.is_empty() { ' ' } else { '*' };
                format!("{:>2}{marker}", date.day())
            }
        };
        line.push_str(&label);
        if index % 7 == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    let buckets = events.home_buckets(now);
    println!();
    print_bucket("Earlier Today", &buckets.earlier_today);
    print_bucket("Upcoming", &buckets.upcoming);
    print_bucket("Later This Week", &buckets.later_this_week);
    Ok(())
}

fn print_bucket(title: &str, events: &[Event]) {
    println!("{title} ({})", events.len());
    for event in events {
        println!(
            "  {} {}-{} [{}] {}",
            event.start_date,
            event.start_time.format("%H:%M"),
            event.end_time.format("%H:%M"),
            event.event_type,
            event.name
        );
    }
}
