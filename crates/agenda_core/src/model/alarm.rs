//! Alarm domain model.
//!
//! Alarms are a time of day plus an optional label. Delivering them is the
//! platform's job; core only stores them and answers "when does it ring
//! next".

use crate::model::event::truncate_to_minute;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AlarmId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: AlarmId,
    /// Hour/minute precision.
    pub time: NaiveTime,
    /// Optional label; blank input is stored as `None`.
    pub description: Option<String>,
}

impl Alarm {
    /// Creates an alarm with a generated stable ID.
    pub fn new(time: NaiveTime, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: truncate_to_minute(time),
            description: normalize_description(description),
        }
    }

    /// First instant strictly after `now` at which this alarm rings.
    pub fn next_ring_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.time);
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::Alarm;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn next_ring_rolls_over_to_tomorrow_once_passed() {
        let alarm = Alarm::new(NaiveTime::from_hms_opt(7, 0, 0).unwrap(), None);
        let day = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();

        let before = day.and_hms_opt(6, 59, 0).unwrap();
        assert_eq!(alarm.next_ring_after(before), day.and_hms_opt(7, 0, 0).unwrap());

        let exactly = day.and_hms_opt(7, 0, 0).unwrap();
        let next_day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            alarm.next_ring_after(exactly),
            next_day.and_hms_opt(7, 0, 0).unwrap()
        );
    }

    #[test]
    fn blank_description_is_dropped() {
        let alarm = Alarm::new(
            NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            Some("   ".to_string()),
        );
        assert_eq!(alarm.description, None);

        let labelled = Alarm::new(
            NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            Some(" gym ".to_string()),
        );
        assert_eq!(labelled.description.as_deref(), Some("gym"));
    }
}
