//! Core domain logic for InstAgenda.
//! This crate is the single source of truth for agenda invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::bucket::{bucket_events, HomeBuckets};
pub use calendar::grid::{
    days_in_month, month_grid, month_title, shift_month, week_of, CalendarCell,
};
pub use calendar::matcher::{event_types_on, events_on, occurs_on};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::alarm::{Alarm, AlarmId};
pub use model::event::{
    Event, EventId, EventType, EventValidationError, Recurrence, TravelTime, Weekday,
};
pub use model::settings::{AppSettings, SettingsValidationError, Theme};
pub use repo::alarm_repo::{AlarmRepository, SqliteAlarmRepository};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::{RepoError, RepoResult};
pub use service::alarm_service::AlarmService;
pub use service::event_service::{
    DayOverview, EventService, EventServiceError, EventSnapshot, SubscriptionId,
};
pub use service::settings_service::SettingsService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
