//! Alarm use-case service.
//!
//! # Responsibility
//! - Provide add/list/delete entry points for the alarm list.
//! - Delegate persistence to repository implementations.

use crate::model::alarm::{Alarm, AlarmId};
use crate::repo::alarm_repo::AlarmRepository;
use crate::repo::RepoResult;
use chrono::{NaiveDateTime, NaiveTime};
use log::info;

pub struct AlarmService<R: AlarmRepository> {
    repo: R,
}

impl<R: AlarmRepository> AlarmService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and stores an alarm, returning the stored value.
    pub fn add(&self, time: NaiveTime, description: Option<String>) -> RepoResult<Alarm> {
        let alarm = Alarm::new(time, description);
        self.repo.insert_alarm(&alarm)?;
        info!(
            "event=alarm_add module=service status=ok alarm_id={}",
            alarm.id
        );
        Ok(alarm)
    }

    /// Alarms ordered by time of day.
    pub fn list(&self) -> RepoResult<Vec<Alarm>> {
        self.repo.list_alarms()
    }

    pub fn delete(&self, id: AlarmId) -> RepoResult<()> {
        self.repo.delete_alarm(id)?;
        info!("event=alarm_delete module=service status=ok alarm_id={id}");
        Ok(())
    }

    /// The alarm that rings soonest after `now`, with its ring instant.
    pub fn next_alarm(&self, now: NaiveDateTime) -> RepoResult<Option<(Alarm, NaiveDateTime)>> {
        let next = self
            .repo
            .list_alarms()?
            .into_iter()
            .map(|alarm| {
                let at = alarm.next_ring_after(now);
                (alarm, at)
            })
            .min_by_key(|(_, at)| *at);
        Ok(next)
    }
}
