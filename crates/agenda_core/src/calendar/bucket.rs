//! Home-screen time buckets.
//!
//! Three filters run independently over the same list:
//! - earlier today: starts today and its effective end is before `now`;
//! - upcoming: starts today and its effective end is after `now`;
//! - later this week: starts on another day, effective start at most six
//!   days past `now`.
//!
//! Events matching none of them are not shown. Bucket order follows input
//! order.

use crate::model::event::Event;
use chrono::{Duration, NaiveDateTime};

/// Days past `now` still considered "this week".
pub const LATER_THIS_WEEK_HORIZON_DAYS: i64 = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeBuckets {
    pub earlier_today: Vec<Event>,
    pub upcoming: Vec<Event>,
    pub later_this_week: Vec<Event>,
}

impl HomeBuckets {
    pub fn is_empty(&self) -> bool {
        self.earlier_today.is_empty() && self.upcoming.is_empty() && self.later_this_week.is_empty()
    }
}

/// Partitions `events` relative to `now`.
pub fn bucket_events(events: &[Event], now: NaiveDateTime) -> HomeBuckets {
    HomeBuckets {
        earlier_today: collect(events, |event| is_earlier_today(event, now)),
        upcoming: collect(events, |event| is_upcoming(event, now)),
        later_this_week: collect(events, |event| is_later_this_week(event, now)),
    }
}

pub fn is_earlier_today(event: &Event, now: NaiveDateTime) -> bool {
    event.start_date == now.date() && event.effective_end() < now
}

pub fn is_upcoming(event: &Event, now: NaiveDateTime) -> bool {
    event.start_date == now.date() && event.effective_end() > now
}

pub fn is_later_this_week(event: &Event, now: NaiveDateTime) -> bool {
    event.start_date != now.date()
        && event.effective_start() <= now + Duration::days(LATER_THIS_WEEK_HORIZON_DAYS)
}

fn collect(events: &[Event], keep: impl Fn(&Event) -> bool) -> Vec<Event> {
    events.iter().filter(|event| keep(event)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::{bucket_events, is_later_this_week};
    use crate::model::event::Event;
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        today().and_hms_opt(h, m, 0).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn running_event_is_upcoming_not_earlier() {
        let event = Event::new("class", today(), time(9, 0), time(10, 0));
        let buckets = bucket_events(std::slice::from_ref(&event), at(9, 30));

        assert_eq!(buckets.upcoming, vec![event]);
        assert!(buckets.earlier_today.is_empty());
        assert!(buckets.later_this_week.is_empty());
    }

    #[test]
    fn finished_event_is_earlier_today() {
        let event = Event::new("class", today(), time(9, 0), time(10, 0));
        let buckets = bucket_events(std::slice::from_ref(&event), at(10, 30));

        assert_eq!(buckets.earlier_today, vec![event]);
        assert!(buckets.upcoming.is_empty());
    }

    #[test]
    fn event_ending_exactly_now_is_in_neither_today_bucket() {
        let event = Event::new("class", today(), time(9, 0), time(10, 0));
        let buckets = bucket_events(&[event], at(10, 0));
        assert!(buckets.is_empty());
    }

    #[test]
    fn horizon_is_six_days() {
        let now = today().and_hms_opt(0, 0, 0).unwrap();
        let in_three = Event::new(
            "dentist",
            today() + Duration::days(3),
            time(14, 0),
            time(15, 0),
        );
        let in_eight = Event::new(
            "trip",
            today() + Duration::days(8),
            time(14, 0),
            time(15, 0),
        );
        let buckets = bucket_events(&[in_three.clone(), in_eight], now);

        assert_eq!(buckets.later_this_week, vec![in_three]);
        assert!(buckets.earlier_today.is_empty());
        assert!(buckets.upcoming.is_empty());
    }

    #[test]
    fn horizon_compares_effective_start_instant() {
        let now = at(12, 0);
        let edge = today() + Duration::days(6);
        let before_edge = Event::new("a", edge, time(11, 59), time(13, 0));
        let on_edge = Event::new("b", edge, time(12, 0), time(13, 0));
        let past_edge = Event::new("c", edge, time(12, 1), time(13, 0));

        assert!(is_later_this_week(&before_edge, now));
        assert!(is_later_this_week(&on_edge, now));
        assert!(!is_later_this_week(&past_edge, now));
    }

    #[test]
    fn bucket_order_follows_input_order() {
        let a = Event::new("a", today(), time(18, 0), time(19, 0));
        let b = Event::new("b", today(), time(11, 0), time(20, 0));
        let buckets = bucket_events(&[a.clone(), b.clone()], at(10, 0));

        assert_eq!(buckets.upcoming, vec![a, b]);
    }

    #[test]
    fn bucketing_is_idempotent() {
        let events = vec![
            Event::new("a", today(), time(8, 0), time(9, 0)),
            Event::new("b", today(), time(13, 0), time(14, 0)),
            Event::new("c", today() + Duration::days(2), time(7, 0), time(8, 0)),
            Event::new("d", today() + Duration::days(30), time(7, 0), time(8, 0)),
        ];
        let now = at(11, 15);

        assert_eq!(bucket_events(&events, now), bucket_events(&events, now));
    }
}
