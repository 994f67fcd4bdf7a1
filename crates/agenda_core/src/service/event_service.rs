//! Event repository facade.
//!
//! # Responsibility
//! - Own the in-memory event list the presentation layer reads from.
//! - Route every add/update/delete through the repository and re-read the
//!   full list after each successful write.
//! - Notify subscribers with an immutable snapshot after each successful
//!   mutation.
//!
//! # Invariants
//! - The cached list is sorted by start date and always equals the last
//!   successful full read from the store.
//! - A failed operation leaves the cache untouched and notifies nobody,
//!   including a write that committed but could not be read back.
//! - `update` is the only path that replaces a stored record.

use crate::calendar::bucket::{bucket_events, HomeBuckets};
use crate::calendar::grid::{month_grid, CalendarCell};
use crate::calendar::matcher::{event_types_on, occurs_on};
use crate::model::event::{Event, EventId, EventType, EventValidationError};
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use chrono::{NaiveDate, NaiveDateTime};
use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Immutable view of the event list at one point in time.
pub type EventSnapshot = Arc<[Event]>;

/// Handle returned by [`EventService::subscribe`].
pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&EventSnapshot)>;

/// Facade error, one variant per failure class callers react to.
#[derive(Debug)]
pub enum EventServiceError {
    /// The event breaks a model invariant; nothing was written.
    Validation(EventValidationError),
    /// No stored event has this ID; nothing was written.
    NotFound(EventId),
    /// The store failed to commit or read back.
    Persistence(RepoError),
}

impl EventServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "event_not_found",
            Self::Persistence(err) => err.code(),
        }
    }
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::Persistence(err) => write!(f, "event store failure: {err}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<EventValidationError> for EventServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Persistence(other),
        }
    }
}

/// One month-grid cell with the distinct event types shown as dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverview {
    pub cell: CalendarCell,
    /// Empty for blank cells.
    pub event_types: Vec<EventType>,
}

/// Observable facade over an [`EventRepository`].
pub struct EventService<R: EventRepository> {
    repo: R,
    events: EventSnapshot,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    next_subscription_id: SubscriptionId,
}

impl<R: EventRepository> EventService<R> {
    /// Creates the facade and loads the current list from the store.
    pub fn new(repo: R) -> Result<Self, EventServiceError> {
        let events = repo.list_events_by_start()?;
        info!(
            "event=event_load module=service status=ok count={}",
            events.len()
        );
        Ok(Self {
            repo,
            events: events.into(),
            subscribers: BTreeMap::new(),
            next_subscription_id: 1,
        })
    }

    /// Current list, ascending by start date.
    pub fn list(&self) -> EventSnapshot {
        Arc::clone(&self.events)
    }

    /// Looks up one event in the cached list.
    pub fn get(&self, id: EventId) -> Option<Event> {
        self.events.iter().find(|event| event.id == id).cloned()
    }

    /// Re-reads the list from the store without notifying subscribers.
    ///
    /// Picks up writes made through other connections, or a write whose
    /// re-read failed.
    pub fn refresh(&mut self) -> Result<EventSnapshot, EventServiceError> {
        self.reload("event_refresh")?;
        Ok(self.list())
    }

    /// Validates and persists a new event.
    ///
    /// On success the list is re-read and subscribers are notified.
    ///
    /// # Errors
    /// A `Persistence` error may also mean the write committed but the
    /// re-read failed. The cache then stays stale and nobody is notified;
    /// call [`EventService::refresh`] before retrying, since a second `add`
    /// of the same event fails on its duplicate ID.
    pub fn add(&mut self, event: Event) -> Result<EventId, EventServiceError> {
        let id = self.mutate("event_add", event.id, |repo| {
            event.validate()?;
            Ok(repo.insert_event(&event)?)
        })?;
        Ok(id)
    }

    /// Replaces every mutable field of the stored event with `event.id`.
    ///
    /// Fails with `NotFound` when no such event exists; the store is left
    /// unchanged. `Persistence` has the same commit-then-re-read caveat as
    /// [`EventService::add`].
    pub fn update(&mut self, event: Event) -> Result<(), EventServiceError> {
        self.mutate("event_update", event.id, |repo| {
            event.validate()?;
            Ok(repo.update_event(&event)?)
        })
    }

    /// Deletes the stored event with `id`.
    ///
    /// `Persistence` has the same commit-then-re-read caveat as
    /// [`EventService::add`].
    pub fn delete(&mut self, id: EventId) -> Result<(), EventServiceError> {
        self.mutate("event_delete", id, |repo| Ok(repo.delete_event(id)?))
    }

    /// Registers a callback invoked with the new snapshot after every
    /// successful mutation. Callbacks run in subscription order.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&EventSnapshot) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.subscribers.insert(id, Box::new(subscriber));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Events occurring on `day`, including recurring ones.
    pub fn events_on(&self, day: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| occurs_on(event, day))
            .cloned()
            .collect()
    }

    /// Distinct event types on `day`, for dot rendering.
    pub fn event_types_on(&self, day: NaiveDate) -> Vec<EventType> {
        event_types_on(&self.events, day)
    }

    /// Home-screen buckets relative to `now`.
    pub fn home_buckets(&self, now: NaiveDateTime) -> HomeBuckets {
        bucket_events(&self.events, now)
    }

    /// Month grid for `reference` with per-day event types.
    pub fn month_overview(&self, reference: NaiveDate) -> Vec<DayOverview> {
        month_grid(reference)
            .into_iter()
            .map(|cell| DayOverview {
                cell,
                event_types: cell
                    .date()
                    .map(|day| self.event_types_on(day))
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn mutate<T>(
        &mut self,
        operation: &'static str,
        event_id: EventId,
        write: impl FnOnce(&R) -> Result<T, EventServiceError>,
    ) -> Result<T, EventServiceError> {
        let value = match write(&self.repo) {
            Ok(value) => value,
            Err(err) => {
                error!(
                    "event={operation} module=service status=error event_id={event_id} error_code={} error={}",
                    err.code(),
                    err
                );
                return Err(err);
            }
        };

        self.reload(operation)?;
        info!(
            "event={operation} module=service status=ok event_id={event_id} count={} subscribers={}",
            self.events.len(),
            self.subscribers.len()
        );
        self.notify();
        Ok(value)
    }

    fn reload(&mut self, operation: &'static str) -> Result<(), EventServiceError> {
        match self.repo.list_events_by_start() {
            Ok(events) => {
                self.events = events.into();
                Ok(())
            }
            Err(err) => {
                let err = EventServiceError::from(err);
                error!(
                    "event={operation} module=service status=error error_code=refresh_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn notify(&mut self) {
        let snapshot = Arc::clone(&self.events);
        for subscriber in self.subscribers.values_mut() {
            subscriber(&snapshot);
        }
    }
}
