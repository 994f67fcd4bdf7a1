//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/list APIs over the `events` table.
//! - Keep SQL and text encodings of dates/times inside this module.
//!
//! # Invariants
//! - Write paths call `Event::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them,
//!   except unknown `event_type` values, which decode as `Other`.
//! - Lists are ordered by `start_date, start_time, id` as chrono values,
//!   not as stored text.

use crate::model::event::{Event, EventId, EventType, Recurrence, TravelTime};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Row};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    start_date,
    end_date,
    start_time,
    end_time,
    location,
    notes,
    event_type,
    recurrence,
    travel_time_secs
FROM events";

/// Store contract for event records.
pub trait EventRepository {
    /// Inserts a new record. Duplicate IDs fail at the storage layer.
    fn insert_event(&self, event: &Event) -> RepoResult<EventId>;
    /// Overwrites every mutable field of the record with the same ID.
    fn update_event(&self, event: &Event) -> RepoResult<()>;
    /// Hard-deletes one record by ID.
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// All records, ascending by start date.
    fn list_events_by_start(&self) -> RepoResult<Vec<Event>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "events")?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn insert_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (
                id,
                name,
                start_date,
                end_date,
                start_time,
                end_time,
                location,
                notes,
                event_type,
                recurrence,
                travel_time_secs
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                event.id.to_string(),
                event.name.as_str(),
                format_date(event.start_date),
                event.end_date.map(format_date),
                format_time(event.start_time),
                format_time(event.end_time),
                event.location.as_str(),
                event.notes.as_str(),
                event.event_type.as_str(),
                event.recurrence.as_ref().map(Recurrence::to_storage),
                event.travel_time,
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &Event) -> RepoResult<()> {
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                name = ?1,
                start_date = ?2,
                end_date = ?3,
                start_time = ?4,
                end_time = ?5,
                location = ?6,
                notes = ?7,
                event_type = ?8,
                recurrence = ?9,
                travel_time_secs = ?10,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?11;",
            params![
                event.name.as_str(),
                format_date(event.start_date),
                event.end_date.map(format_date),
                format_time(event.start_time),
                format_time(event.end_time),
                event.location.as_str(),
                event.notes.as_str(),
                event.event_type.as_str(),
                event.recurrence.as_ref().map(Recurrence::to_storage),
                event.travel_time,
                event.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id));
        }
        Ok(())
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events_by_start(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!("{EVENT_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        // Stored dates only sort as text for years 0..=9999
        // (`+10000-01-01`, `-0001-12-31`).
        events.sort_by_key(|event| (event.start_date, event.start_time, event.id));
        Ok(events)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "events.id")?;

    let start_date = parse_date(&row.get::<_, String>("start_date")?, "events.start_date")?;
    let end_date = match row.get::<_, Option<String>>("end_date")? {
        Some(value) => Some(parse_date(&value, "events.end_date")?),
        None => None,
    };

    let recurrence = match row.get::<_, Option<String>>("recurrence")? {
        Some(value) => Recurrence::from_storage(&value)
            .map_err(|err| RepoError::InvalidData(format!("{err} in events.recurrence")))?,
        None => None,
    };

    let travel_time = match row.get::<_, Option<i64>>("travel_time_secs")? {
        Some(secs) => Some(TravelTime::try_from(secs).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid travel time `{secs}` in events.travel_time_secs"
            ))
        })?),
        None => None,
    };

    let event = Event {
        id,
        name: row.get("name")?,
        start_date,
        end_date,
        start_time: parse_time(&row.get::<_, String>("start_time")?, "events.start_time")?,
        end_time: parse_time(&row.get::<_, String>("end_time")?, "events.end_time")?,
        location: row.get("location")?,
        notes: row.get("notes")?,
        event_type: EventType::from_name_lossy(&row.get::<_, String>("event_type")?),
        recurrence,
        travel_time,
    };
    event.validate()?;
    Ok(event)
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

pub(crate) fn parse_time(value: &str, column: &str) -> RepoResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid time `{value}` in {column}")))
}
