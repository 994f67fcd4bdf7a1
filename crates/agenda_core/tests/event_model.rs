use agenda_core::{Event, EventType, EventValidationError, Recurrence, Weekday};
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn event_new_sets_defaults() {
    let event = Event::new("Lecture", date(2025, 9, 1), time(10, 0), time(11, 30));

    assert!(!event.id.is_nil());
    assert_eq!(event.name, "Lecture");
    assert_eq!(event.end_date, None);
    assert_eq!(event.location, "");
    assert_eq!(event.notes, "");
    assert_eq!(event.event_type, EventType::Other);
    assert_eq!(event.recurrence, None);
    assert_eq!(event.travel_time, None);
    assert!(!event.is_recurring());
    assert!(event.validate().is_ok());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Event::with_id(Uuid::nil(), "x", date(2025, 1, 1), time(9, 0), time(10, 0))
        .unwrap_err();
    assert_eq!(err, EventValidationError::NilId);
}

#[test]
fn validate_rejects_blank_name_and_reversed_dates() {
    let mut event = Event::new("   ", date(2025, 1, 10), time(9, 0), time(10, 0));
    assert_eq!(event.validate().unwrap_err(), EventValidationError::EmptyName);

    event.name = "Trip".to_string();
    event.end_date = Some(date(2025, 1, 9));
    assert_eq!(
        event.validate().unwrap_err(),
        EventValidationError::EndDateBeforeStart {
            start: date(2025, 1, 10),
            end: date(2025, 1, 9),
        }
    );
}

#[test]
fn overnight_times_are_allowed() {
    let mut event = Event::new("Sleep", date(2025, 1, 10), time(22, 30), time(6, 30));
    event.event_type = EventType::Sleep;
    assert!(event.validate().is_ok());
}

#[test]
fn serialization_uses_display_names() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut event = Event::with_id(id, "Gym", date(2025, 2, 3), time(18, 0), time(19, 0)).unwrap();
    event.event_type = EventType::Health;
    event.recurrence = Some(Recurrence::new([Weekday::Wednesday, Weekday::Monday]));
    event.travel_time = Some(900);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["event_type"], "Health");
    assert_eq!(json["recurrence"], serde_json::json!(["Monday", "Wednesday"]));
    assert_eq!(json["start_date"], "2025-02-03");
    assert_eq!(json["travel_time"], 900);

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn deserialize_fills_defaults_and_rejects_invalid_events() {
    let minimal = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Standup",
        "start_date": "2025-02-03",
        "start_time": "09:00:00",
        "end_time": "09:15:00"
    });
    let event: Event = serde_json::from_value(minimal).unwrap();
    assert_eq!(event.event_type, EventType::Other);
    assert_eq!(event.location, "");

    let empty_name = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "",
        "start_date": "2025-02-03",
        "start_time": "09:00:00",
        "end_time": "09:15:00"
    });
    let err = serde_json::from_value::<Event>(empty_name).unwrap_err();
    assert!(
        err.to_string().contains("event name must not be empty"),
        "unexpected error: {err}"
    );
}
