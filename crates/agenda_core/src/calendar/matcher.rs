//! Day matching for one-time and weekly recurring events.
//!
//! A recurring event matches every day whose weekday is in its recurrence
//! set, starting at `start_date` inclusive. `end_date` does not bound
//! recurrence.

use crate::model::event::{Event, EventType, Weekday};
use chrono::{Datelike, NaiveDate};

/// Returns whether `event` occurs on `day`.
pub fn occurs_on(event: &Event, day: NaiveDate) -> bool {
    match &event.recurrence {
        None => event.start_date == day,
        Some(recurrence) => {
            day >= event.start_date && recurrence.contains(Weekday::from(day.weekday()))
        }
    }
}

/// Events occurring on `day`, in input order.
pub fn events_on(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|event| occurs_on(event, day)).collect()
}

/// Distinct event types present on `day`, in `EventType::ALL` order.
///
/// Deduplicates by type, so two Work events yield one Work dot.
pub fn event_types_on(events: &[Event], day: NaiveDate) -> Vec<EventType> {
    let mut present = [false; EventType::ALL.len()];
    for event in events.iter().filter(|event| occurs_on(event, day)) {
        if let Some(index) = EventType::ALL.iter().position(|kind| *kind == event.event_type) {
            present[index] = true;
        }
    }

    EventType::ALL
        .into_iter()
        .zip(present)
        .filter_map(|(kind, seen)| seen.then_some(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{event_types_on, events_on, occurs_on};
    use crate::model::event::{Event, EventType, Recurrence, Weekday};
    use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(day: NaiveDate) -> Event {
        Event::new(
            "event",
            day,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn one_time_event_matches_only_its_start_date() {
        let start = date(2025, 4, 10);
        let event = event_on(start);

        for offset in -40..40 {
            let day = start + Duration::days(offset);
            assert_eq!(occurs_on(&event, day), offset == 0, "offset {offset}");
        }
    }

    #[test]
    fn one_time_event_ignores_end_date_for_matching() {
        let mut event = event_on(date(2025, 4, 10));
        event.end_date = Some(date(2025, 4, 12));
        assert!(!occurs_on(&event, date(2025, 4, 11)));
    }

    #[test]
    fn monday_recurrence_matches_mondays_on_or_after_start() {
        // 2025-04-09 is a Wednesday.
        let start = date(2025, 4, 9);
        let mut event = event_on(start);
        event.recurrence = Some(Recurrence::new([Weekday::Monday]));

        for offset in -60..400 {
            let day = start + Duration::days(offset);
            let expected = day.weekday() == chrono::Weekday::Mon && day >= start;
            assert_eq!(occurs_on(&event, day), expected, "{day}");
        }
    }

    #[test]
    fn recurrence_includes_start_day_when_weekday_matches() {
        // 2025-04-07 is a Monday.
        let mut event = event_on(date(2025, 4, 7));
        event.recurrence = Some(Recurrence::new([Weekday::Monday, Weekday::Wednesday]));

        assert!(occurs_on(&event, date(2025, 4, 7)));
        assert!(occurs_on(&event, date(2025, 4, 9)));
        assert!(!occurs_on(&event, date(2025, 4, 8)));
        assert!(!occurs_on(&event, date(2025, 3, 31)));
    }

    #[test]
    fn recurrence_is_not_bounded_by_end_date() {
        let mut event = event_on(date(2025, 4, 7));
        event.end_date = Some(date(2025, 4, 8));
        event.recurrence = Some(Recurrence::new([Weekday::Monday]));

        assert!(occurs_on(&event, date(2026, 4, 6)));
    }

    #[test]
    fn events_on_preserves_input_order() {
        let day = date(2025, 4, 10);
        let first = event_on(day);
        let other_day = event_on(date(2025, 4, 11));
        let second = event_on(day);
        let events = vec![first.clone(), other_day, second.clone()];

        let ids: Vec<_> = events_on(&events, day).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn event_types_are_deduplicated_by_type() {
        let day = date(2025, 4, 10);
        let mut work_a = event_on(day);
        work_a.event_type = EventType::Work;
        let mut work_b = event_on(day);
        work_b.event_type = EventType::Work;
        let mut health = event_on(day);
        health.event_type = EventType::Health;
        let mut elsewhere = event_on(date(2025, 4, 11));
        elsewhere.event_type = EventType::Sleep;

        let types = event_types_on(&[health, work_a, elsewhere, work_b], day);
        assert_eq!(types, vec![EventType::Work, EventType::Health]);
        assert!(event_types_on(&[], day).is_empty());
    }
}
