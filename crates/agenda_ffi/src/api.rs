//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Translate between ISO strings on the Dart side and core chrono types.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through envelope `ok`/`message` fields, never by
//!   unwinding.
//! - Every DB-backed call opens its own connection on the configured path.

use crate::config::config;
use crate::palette::color_hex;
use agenda_core::db::open_db;
use agenda_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, month_title,
    ping as ping_inner, Alarm, AlarmService, AppSettings, CalendarCell, Event, EventId,
    EventService, EventServiceError, EventType, Recurrence, SettingsService,
    SqliteAlarmRepository, SqliteEventRepository, SqliteSettingsRepository, Theme, Weekday,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   uses the configured level.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = if level.trim().is_empty() {
        config().log_level.as_str()
    } else {
        level.as_str()
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Event as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDto {
    /// Stable event ID; blank on `event_add` means "generate one".
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    pub end_date: Option<String>,
    /// `HH:MM`.
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub notes: String,
    /// `Work|School|Health|Sleep|Leisure|Other`.
    pub event_type: String,
    /// Weekday names; empty for one-time events.
    pub recurrence: Vec<String>,
    pub travel_time_secs: Option<u32>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// ID of the affected record on success.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub items: Vec<EventDto>,
    pub message: String,
}

impl EventListResponse {
    fn from_result(operation: &str, result: Result<Vec<Event>, String>) -> Self {
        match result {
            Ok(events) => Self {
                ok: true,
                message: format!("{} event(s).", events.len()),
                items: events.iter().map(to_event_dto).collect(),
            },
            Err(err) => Self {
                ok: false,
                items: Vec::new(),
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// One month-grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellDto {
    /// `None` for leading blanks.
    pub date: Option<String>,
    /// Distinct event types on this day, for dots.
    pub event_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonthResponse {
    pub ok: bool,
    /// For example `March 2025`.
    pub title: String,
    /// Leading blanks followed by every day of the month.
    pub cells: Vec<CalendarCellDto>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeBucketsResponse {
    pub ok: bool,
    pub earlier_today: Vec<EventDto>,
    pub upcoming: Vec<EventDto>,
    pub later_this_week: Vec<EventDto>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmDto {
    pub id: String,
    /// `HH:MM`.
    pub time: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmListResponse {
    pub ok: bool,
    pub items: Vec<AlarmDto>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDto {
    pub notifications_enabled: bool,
    /// `light|dark`.
    pub theme: String,
    pub reminder_hour: u8,
    pub has_launched_before: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ok: bool,
    pub settings: Option<SettingsDto>,
    pub message: String,
}

impl SettingsResponse {
    fn from_result(operation: &str, result: Result<AppSettings, String>) -> Self {
        match result {
            Ok(settings) => Self {
                ok: true,
                settings: Some(to_settings_dto(&settings)),
                message: String::new(),
            },
            Err(err) => Self {
                ok: false,
                settings: None,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeColor {
    pub event_type: String,
    /// `#RRGGBB`.
    pub color_hex: String,
}

/// Builds the month grid containing `year-month` with per-day event dots.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Invalid `month` returns `ok=false` with no cells.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(year: i32, month: u32) -> CalendarMonthResponse {
    let Some(reference) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return CalendarMonthResponse {
            ok: false,
            title: String::new(),
            cells: Vec::new(),
            message: format!("calendar_month failed: invalid month {year}-{month}"),
        };
    };

    match with_event_service(|service| Ok(service.month_overview(reference))) {
        Ok(overview) => CalendarMonthResponse {
            ok: true,
            title: month_title(reference),
            cells: overview
                .into_iter()
                .map(|day| CalendarCellDto {
                    date: match day.cell {
                        CalendarCell::Blank => None,
                        CalendarCell::Day(date) => Some(format_date(date)),
                    },
                    event_types: day
                        .event_types
                        .iter()
                        .map(|kind| kind.as_str().to_string())
                        .collect(),
                })
                .collect(),
            message: String::new(),
        },
        Err(err) => CalendarMonthResponse {
            ok: false,
            title: month_title(reference),
            cells: Vec::new(),
            message: format!("calendar_month failed: {err}"),
        },
    }
}

/// Lists every stored event ascending by start date.
#[flutter_rust_bridge::frb(sync)]
pub fn event_list() -> EventListResponse {
    EventListResponse::from_result(
        "event_list",
        with_event_service(|service| Ok(service.list().to_vec())),
    )
}

/// Events occurring on `date` (`YYYY-MM-DD`), recurring ones included.
#[flutter_rust_bridge::frb(sync)]
pub fn events_on_day(date: String) -> EventListResponse {
    let result = parse_date(&date).and_then(|day| {
        with_event_service(|service| Ok(service.events_on(day)))
    });
    EventListResponse::from_result("events_on_day", result)
}

/// Stores a new event. A blank `event.id` gets a generated ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the stored event ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn event_add(event: EventDto) -> ActionResponse {
    let result = from_event_dto(&event, true)
        .and_then(|event| with_event_service(|service| service.add(event)));
    match result {
        Ok(id) => ActionResponse::success("Event added.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("event_add failed: {err}")),
    }
}

/// Replaces the stored event with the same ID.
#[flutter_rust_bridge::frb(sync)]
pub fn event_update(event: EventDto) -> ActionResponse {
    let result = from_event_dto(&event, false).and_then(|event| {
        let id = event.id;
        with_event_service(|service| service.update(event)).map(|()| id)
    });
    match result {
        Ok(id) => ActionResponse::success("Event updated.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("event_update failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(id: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        with_event_service(|service| service.delete(id)).map(|()| id)
    });
    match result {
        Ok(id) => ActionResponse::success("Event deleted.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("event_delete failed: {err}")),
    }
}

/// Home-screen buckets relative to `now` (`YYYY-MM-DDTHH:MM`, local time).
#[flutter_rust_bridge::frb(sync)]
pub fn home_buckets(now: String) -> HomeBucketsResponse {
    let result = parse_date_time(&now)
        .and_then(|now| with_event_service(|service| Ok(service.home_buckets(now))));
    match result {
        Ok(buckets) => HomeBucketsResponse {
            ok: true,
            earlier_today: buckets.earlier_today.iter().map(to_event_dto).collect(),
            upcoming: buckets.upcoming.iter().map(to_event_dto).collect(),
            later_this_week: buckets.later_this_week.iter().map(to_event_dto).collect(),
            message: String::new(),
        },
        Err(err) => HomeBucketsResponse {
            ok: false,
            earlier_today: Vec::new(),
            upcoming: Vec::new(),
            later_this_week: Vec::new(),
            message: format!("home_buckets failed: {err}"),
        },
    }
}

/// Stores an alarm at `time` (`HH:MM`).
#[flutter_rust_bridge::frb(sync)]
pub fn alarm_add(time: String, description: Option<String>) -> ActionResponse {
    let result = parse_time(&time).and_then(|time| {
        with_alarm_service(|service| service.add(time, description))
    });
    match result {
        Ok(alarm) => ActionResponse::success("Alarm added.", alarm.id.to_string()),
        Err(err) => ActionResponse::failure(format!("alarm_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn alarm_list() -> AlarmListResponse {
    match with_alarm_service(|service| service.list()) {
        Ok(alarms) => AlarmListResponse {
            ok: true,
            message: format!("{} alarm(s).", alarms.len()),
            items: alarms.iter().map(to_alarm_dto).collect(),
        },
        Err(err) => AlarmListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("alarm_list failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn alarm_delete(id: String) -> ActionResponse {
    let result = parse_id(&id)
        .and_then(|id| with_alarm_service(|service| service.delete(id)).map(|()| id));
    match result {
        Ok(id) => ActionResponse::success("Alarm deleted.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("alarm_delete failed: {err}")),
    }
}

/// Stored settings, defaults when never saved.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> SettingsResponse {
    SettingsResponse::from_result(
        "settings_get",
        with_settings_service(|service| service.load()),
    )
}

/// Validates and stores `settings`, returning what was stored.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_save(settings: SettingsDto) -> SettingsResponse {
    let result = from_settings_dto(&settings).and_then(|settings| {
        with_settings_service(|service| {
            service.save(&settings)?;
            Ok(settings)
        })
    });
    SettingsResponse::from_result("settings_save", result)
}

/// Restores default preferences; onboarding completion is kept.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_reset() -> SettingsResponse {
    SettingsResponse::from_result(
        "settings_reset",
        with_settings_service(|service| service.reset()),
    )
}

/// Color for every event type, in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn event_type_palette() -> Vec<EventTypeColor> {
    EventType::ALL
        .into_iter()
        .map(|kind| EventTypeColor {
            event_type: kind.as_str().to_string(),
            color_hex: color_hex(kind).to_string(),
        })
        .collect()
}

fn with_event_service<T>(
    f: impl FnOnce(&mut EventService<SqliteEventRepository<'_>>) -> Result<T, EventServiceError>,
) -> Result<T, String> {
    let conn = open_db(&config().db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let repo =
        SqliteEventRepository::try_new(&conn).map_err(|err| format!("repo init failed: {err}"))?;
    let mut service =
        EventService::new(repo).map_err(|err| format!("event load failed: {err}"))?;
    f(&mut service).map_err(|err| err.to_string())
}

fn with_alarm_service<T>(
    f: impl FnOnce(&AlarmService<SqliteAlarmRepository<'_>>) -> agenda_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_db(&config().db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let repo =
        SqliteAlarmRepository::try_new(&conn).map_err(|err| format!("repo init failed: {err}"))?;
    f(&AlarmService::new(repo)).map_err(|err| err.to_string())
}

fn with_settings_service<T>(
    f: impl FnOnce(&SettingsService<SqliteSettingsRepository<'_>>) -> agenda_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_db(&config().db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let repo = SqliteSettingsRepository::try_new(&conn)
        .map_err(|err| format!("repo init failed: {err}"))?;
    f(&SettingsService::new(repo)).map_err(|err| err.to_string())
}

fn to_event_dto(event: &Event) -> EventDto {
    EventDto {
        id: event.id.to_string(),
        name: event.name.clone(),
        start_date: format_date(event.start_date),
        end_date: event.end_date.map(format_date),
        start_time: event.start_time.format(TIME_FORMAT).to_string(),
        end_time: event.end_time.format(TIME_FORMAT).to_string(),
        location: event.location.clone(),
        notes: event.notes.clone(),
        event_type: event.event_type.as_str().to_string(),
        recurrence: event
            .recurrence
            .as_ref()
            .map(|recurrence| {
                recurrence
                    .days()
                    .map(|day| day.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default(),
        travel_time_secs: event.travel_time,
    }
}

fn from_event_dto(dto: &EventDto, allow_new_id: bool) -> Result<Event, String> {
    let id = if allow_new_id && dto.id.trim().is_empty() {
        Uuid::new_v4()
    } else {
        parse_id(&dto.id)?
    };

    let mut event = Event::with_id(
        id,
        dto.name.trim(),
        parse_date(&dto.start_date)?,
        parse_time(&dto.start_time)?,
        parse_time(&dto.end_time)?,
    )
    .map_err(|err| err.to_string())?;

    event.end_date = match dto.end_date.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(parse_date(value)?),
        _ => None,
    };
    event.location = dto.location.trim().to_string();
    event.notes = dto.notes.clone();
    event.event_type = parse_event_type(&dto.event_type);
    let days = dto
        .recurrence
        .iter()
        .map(|name| name.parse::<Weekday>().map_err(|err| err.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    event.recurrence = Recurrence::non_empty(days);
    event.travel_time = dto.travel_time_secs;
    Ok(event)
}

fn parse_event_type(value: &str) -> EventType {
    value.parse().unwrap_or_else(|_| {
        warn!("event=event_type_fallback module=ffi status=ok fallback=Other");
        EventType::Other
    })
}

fn to_alarm_dto(alarm: &Alarm) -> AlarmDto {
    AlarmDto {
        id: alarm.id.to_string(),
        time: alarm.time.format(TIME_FORMAT).to_string(),
        description: alarm.description.clone(),
    }
}

fn to_settings_dto(settings: &AppSettings) -> SettingsDto {
    SettingsDto {
        notifications_enabled: settings.notifications_enabled,
        theme: settings.theme.as_str().to_string(),
        reminder_hour: settings.reminder_hour,
        has_launched_before: settings.has_launched_before,
    }
}

fn from_settings_dto(dto: &SettingsDto) -> Result<AppSettings, String> {
    let theme = Theme::parse(&dto.theme).ok_or_else(|| format!("unknown theme `{}`", dto.theme))?;
    Ok(AppSettings {
        notifications_enabled: dto.notifications_enabled,
        theme,
        reminder_hour: dto.reminder_hour,
        has_launched_before: dto.has_launched_before,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_id(value: &str) -> Result<EventId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{value}`"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{value}`, expected YYYY-MM-DD"))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| format!("invalid time `{value}`, expected HH:MM"))
}

fn parse_date_time(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT)
        .map_err(|_| format!("invalid date-time `{value}`, expected YYYY-MM-DDTHH:MM"))
}
