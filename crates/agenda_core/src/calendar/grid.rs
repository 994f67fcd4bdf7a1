//! Month grid and week strip generation.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// One cell of a seven-column, Sunday-first month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Leading placeholder before day 1. Rendered empty, not selectable.
    Blank,
    Day(NaiveDate),
}

impl CalendarCell {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day(date) => Some(date),
        }
    }
}

/// Builds the grid for the month containing `reference`.
///
/// Leading blanks align day 1 under its weekday column; there is no
/// trailing padding, so the last row may be ragged.
pub fn month_grid(reference: NaiveDate) -> Vec<CalendarCell> {
    let first = first_of_month(reference);
    let leading = first.weekday().num_days_from_sunday() as usize;
    let day_count = days_in_month(first.year(), first.month());

    let mut cells = Vec::with_capacity(leading + day_count as usize);
    cells.extend(std::iter::repeat(CalendarCell::Blank).take(leading));
    cells.extend(
        first
            .iter_days()
            .take(day_count as usize)
            .map(CalendarCell::Day),
    );
    cells
}

/// Moves `reference` by `offset` calendar months.
///
/// The day of month is clamped to the target month's length. Results
/// outside chrono's representable range leave `reference` unchanged.
pub fn shift_month(reference: NaiveDate, offset: i32) -> NaiveDate {
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        reference.checked_add_months(months)
    } else {
        reference.checked_sub_months(months)
    };
    shifted.unwrap_or(reference)
}

/// Number of days in `month` of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of chrono's last representable year.
        None => 31,
    }
}

/// The Sunday-first week containing `day`.
pub fn week_of(day: NaiveDate) -> [NaiveDate; 7] {
    let back = i64::from(day.weekday().num_days_from_sunday());
    let sunday = day - Duration::days(back);
    std::array::from_fn(|offset| sunday + Duration::days(offset as i64))
}

/// Header label such as `"March 2025"`; the year has no digit grouping.
pub fn month_title(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
