//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical agenda record rendered by day/week/month views.
//! - Derive the effective start/end instants used by time bucketing.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another event.
//! - `name` is non-empty after trimming.
//! - `end_date`, when set, is not earlier than `start_date`.
//! - Time-of-day fields carry hour/minute precision only.
//! - `end_time` is allowed to be earlier than `start_time` (overnight events).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every event.
pub type EventId = Uuid;

/// Prep/transit buffer in seconds. Advisory metadata only.
pub type TravelTime = u32;

/// Closed category set used for color-coding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EventType {
    Work,
    School,
    Health,
    Sleep,
    Leisure,
    #[default]
    Other,
}

impl EventType {
    /// Every variant in display order.
    pub const ALL: [EventType; 6] = [
        EventType::Work,
        EventType::School,
        EventType::Health,
        EventType::Sleep,
        EventType::Leisure,
        EventType::Other,
    ];

    /// Display/storage name, e.g. `"Work"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::School => "School",
            Self::Health => "Health",
            Self::Sleep => "Sleep",
            Self::Leisure => "Leisure",
            Self::Other => "Other",
        }
    }

    /// Parses a stored name, falling back to `Other` for unknown values.
    pub fn from_name_lossy(value: &str) -> Self {
        value.parse().unwrap_or(Self::Other)
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownNameError::new("event type", value))
    }
}

/// Weekday names as used by recurrence sets.
///
/// Ordered Sunday-first to match the calendar grid columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownNameError::new("weekday", value))
    }
}

/// Weekly recurrence: the set of weekdays on which an event repeats.
///
/// Recurrence has no end condition; it applies from the event start date
/// onward.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recurrence {
    days: BTreeSet<Weekday>,
}

impl Recurrence {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Returns `None` for an empty day set, so "no weekdays selected" and
    /// "not recurring" share one representation.
    pub fn non_empty(days: impl IntoIterator<Item = Weekday>) -> Option<Self> {
        let recurrence = Self::new(days);
        if recurrence.is_empty() {
            None
        } else {
            Some(recurrence)
        }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Weekdays in Sunday-first order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().copied()
    }

    /// Comma-separated storage form, e.g. `"Monday,Wednesday"`.
    pub fn to_storage(&self) -> String {
        self.days
            .iter()
            .map(|day| day.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses the comma-separated storage form.
    pub fn from_storage(value: &str) -> Result<Option<Self>, UnknownNameError> {
        let mut days = BTreeSet::new();
        for part in value.split(',') {
            if part.trim().is_empty() {
                continue;
            }
            days.insert(part.parse::<Weekday>()?);
        }
        Ok(Self::non_empty(days))
    }
}

/// A stored name that does not map onto a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNameError {
    kind: &'static str,
    value: String,
}

impl UnknownNameError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for UnknownNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for UnknownNameError {}

/// Validation errors for event invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    NilId,
    EmptyName,
    EndDateBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "event id must not be nil"),
            Self::EmptyName => write!(f, "event name must not be empty"),
            Self::EndDateBeforeStart { start, end } => {
                write!(f, "end_date ({end}) must be >= start_date ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

/// Canonical agenda record.
///
/// `Event` is a plain value: edits clone, modify and hand the copy to the
/// service `update` call, which is the only path that replaces the stored
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventWire")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub start_date: NaiveDate,
    /// `None` for single-day events.
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub notes: String,
    pub event_type: EventType,
    /// `None` for one-time events.
    pub recurrence: Option<Recurrence>,
    pub travel_time: Option<TravelTime>,
}

impl Event {
    /// Creates a single-day, one-time event with a generated stable ID.
    ///
    /// Seconds are dropped from both times. Optional fields start empty and
    /// `event_type` defaults to `Other`.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date: None,
            start_time: truncate_to_minute(start_time),
            end_time: truncate_to_minute(end_time),
            location: String::new(),
            notes: String::new(),
            event_type: EventType::Other,
            recurrence: None,
            travel_time: None,
        }
    }

    /// Like [`Event::new`] with a caller-provided ID.
    ///
    /// Used by restore/import paths where identity already exists.
    pub fn with_id(
        id: EventId,
        name: impl Into<String>,
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, EventValidationError> {
        if id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        let mut event = Self::new(name, start_date, start_time, end_time);
        event.id = id;
        Ok(event)
    }

    /// Checks every model invariant.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(EventValidationError::EndDateBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// `start_date` combined with the hour/minute of `start_time`.
    pub fn effective_start(&self) -> NaiveDateTime {
        at_minute(self.start_date, self.start_time)
    }

    /// `start_date` combined with the hour/minute of `end_time`.
    ///
    /// Anchored on `start_date` even for multi-day events.
    pub fn effective_end(&self) -> NaiveDateTime {
        at_minute(self.start_date, self.end_time)
    }
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn at_minute(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(truncate_to_minute(time))
}

// Deserialization goes through this shape so decoded events honor
// `Event::validate`.
#[derive(Deserialize)]
struct EventWire {
    id: EventId,
    name: String,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    start_time: NaiveTime,
    end_time: NaiveTime,
    #[serde(default)]
    location: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    event_type: EventType,
    #[serde(default)]
    recurrence: Option<Recurrence>,
    #[serde(default)]
    travel_time: Option<TravelTime>,
}

impl TryFrom<EventWire> for Event {
    type Error = EventValidationError;

    fn try_from(wire: EventWire) -> Result<Self, Self::Error> {
        let event = Event {
            id: wire.id,
            name: wire.name,
            start_date: wire.start_date,
            end_date: wire.end_date,
            start_time: truncate_to_minute(wire.start_time),
            end_time: truncate_to_minute(wire.end_time),
            location: wire.location,
            notes: wire.notes,
            event_type: wire.event_type,
            recurrence: wire.recurrence.filter(|recurrence| !recurrence.is_empty()),
            travel_time: wire.travel_time,
        };
        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::{truncate_to_minute, Event, EventType, Recurrence, Weekday};
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn event_type_parse_is_case_insensitive_and_lossy_falls_back() {
        assert_eq!("leisure".parse::<EventType>().unwrap(), EventType::Leisure);
        assert_eq!(EventType::from_name_lossy("Gardening"), EventType::Other);
    }

    #[test]
    fn recurrence_storage_form_is_sunday_first() {
        let recurrence = Recurrence::new([Weekday::Friday, Weekday::Monday, Weekday::Sunday]);
        assert_eq!(recurrence.to_storage(), "Sunday,Monday,Friday");

        let parsed = Recurrence::from_storage("Monday, friday").unwrap().unwrap();
        assert!(parsed.contains(Weekday::Monday));
        assert!(parsed.contains(Weekday::Friday));
        assert!(!parsed.contains(Weekday::Sunday));
    }

    #[test]
    fn empty_recurrence_normalizes_to_none() {
        assert_eq!(Recurrence::from_storage("").unwrap(), None);
        assert_eq!(Recurrence::non_empty([]), None);
        assert!(Recurrence::from_storage("Funday").is_err());
    }

    #[test]
    fn effective_instants_anchor_on_start_date() {
        let mut event = Event::new("standup", date(2025, 3, 4), time(9, 0), time(9, 15));
        event.end_date = Some(date(2025, 3, 6));

        assert_eq!(
            event.effective_start(),
            date(2025, 3, 4).and_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            event.effective_end(),
            date(2025, 3, 4).and_hms_opt(9, 15, 0).unwrap()
        );
    }

    #[test]
    fn new_truncates_seconds() {
        let event = Event::new(
            "x",
            date(2025, 1, 1),
            NaiveTime::from_hms_opt(8, 30, 59).unwrap(),
            NaiveTime::from_hms_milli_opt(9, 0, 1, 500).unwrap(),
        );
        assert_eq!(event.start_time, time(8, 30));
        assert_eq!(event.end_time, time(9, 0));
        assert_eq!(truncate_to_minute(time(23, 59)), time(23, 59));
    }
}
