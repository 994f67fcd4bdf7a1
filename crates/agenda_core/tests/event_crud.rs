use agenda_core::db::migrations::latest_version;
use agenda_core::db::open_db_in_memory;
use agenda_core::{
    Event, EventRepository, EventType, Recurrence, RepoError, SqliteEventRepository, Weekday,
};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn event(name: &str, start: NaiveDate) -> Event {
    Event::new(name, start, time(9, 0), time(10, 0))
}

#[test]
fn insert_and_get_roundtrip_preserves_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut original = event("Chem lab", date(2025, 9, 2));
    original.end_date = Some(date(2025, 9, 3));
    original.location = "Hall B".to_string();
    original.notes = "bring goggles".to_string();
    original.event_type = EventType::School;
    original.recurrence = Some(Recurrence::new([Weekday::Tuesday, Weekday::Thursday]));
    original.travel_time = Some(1_200);

    let id = repo.insert_event(&original).unwrap();
    let loaded = repo.get_event(id).unwrap().unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn insert_rejects_invalid_event() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let err = repo.insert_event(&event("  ", date(2025, 1, 1))).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_events_by_start().unwrap().is_empty());
}

#[test]
fn duplicate_id_is_a_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let first = event("a", date(2025, 1, 1));
    repo.insert_event(&first).unwrap();
    let err = repo.insert_event(&first).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn update_overwrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut stored = event("draft", date(2025, 1, 1));
    stored.recurrence = Some(Recurrence::new([Weekday::Monday]));
    stored.travel_time = Some(60);
    repo.insert_event(&stored).unwrap();

    let mut edited = stored.clone();
    edited.name = "final".to_string();
    edited.start_date = date(2025, 2, 1);
    edited.start_time = time(14, 0);
    edited.end_time = time(15, 45);
    edited.event_type = EventType::Work;
    edited.recurrence = None;
    edited.travel_time = None;
    repo.update_event(&edited).unwrap();

    assert_eq!(repo.get_event(stored.id).unwrap().unwrap(), edited);
}

#[test]
fn update_and_delete_unknown_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let missing = event("missing", date(2025, 1, 1));
    let err = repo.update_event(&missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing.id));

    let err = repo.delete_event(missing.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing.id));
}

#[test]
fn delete_removes_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let keep = event("keep", date(2025, 1, 1));
    let drop_me = event("drop", date(2025, 1, 2));
    repo.insert_event(&keep).unwrap();
    repo.insert_event(&drop_me).unwrap();

    repo.delete_event(drop_me.id).unwrap();
    assert!(repo.get_event(drop_me.id).unwrap().is_none());
    assert_eq!(repo.list_events_by_start().unwrap(), vec![keep]);
}

#[test]
fn list_is_sorted_by_start_date_then_time_then_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let late = event("late", date(2025, 12, 31));
    let early = event("early", date(2024, 2, 29));
    let mut same_day_later = event("afternoon", date(2025, 6, 1));
    same_day_later.start_time = time(15, 0);
    let same_day_a = with_fixed_id("00000000-0000-4000-8000-000000000001", date(2025, 6, 1));
    let same_day_b = with_fixed_id("00000000-0000-4000-8000-000000000002", date(2025, 6, 1));

    for item in [&late, &same_day_b, &same_day_later, &early, &same_day_a] {
        repo.insert_event(item).unwrap();
    }

    let ids: Vec<_> = repo
        .list_events_by_start()
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(
        ids,
        vec![early.id, same_day_a.id, same_day_b.id, same_day_later.id, late.id]
    );
}

#[test]
fn list_orders_years_outside_four_digits_by_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let far = event("far", date(10_000, 1, 1));
    let near = event("near", date(2025, 1, 1));
    let ancient = event("ancient", date(-1, 12, 31));
    for item in [&far, &near, &ancient] {
        repo.insert_event(item).unwrap();
    }

    let listed = repo.list_events_by_start().unwrap();
    assert_eq!(listed, vec![ancient, near, far]);
}

#[test]
fn unknown_event_type_decodes_as_other() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let stored = event("legacy", date(2025, 1, 1));
    repo.insert_event(&stored).unwrap();
    conn.execute(
        "UPDATE events SET event_type = 'Gardening' WHERE id = ?1",
        [stored.id.to_string()],
    )
    .unwrap();

    let loaded = repo.get_event(stored.id).unwrap().unwrap();
    assert_eq!(loaded.event_type, EventType::Other);
}

#[test]
fn corrupt_rows_are_rejected_instead_of_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let stored = event("bad", date(2025, 1, 1));
    repo.insert_event(&stored).unwrap();
    conn.execute(
        "UPDATE events SET start_date = '01/02/2025' WHERE id = ?1",
        [stored.id.to_string()],
    )
    .unwrap();

    let err = repo.list_events_by_start().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEventRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_events_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEventRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("events"))
    ));
}

fn with_fixed_id(id: &str, start: NaiveDate) -> Event {
    Event::with_id(
        Uuid::parse_str(id).unwrap(),
        "fixed",
        start,
        time(9, 0),
        time(10, 0),
    )
    .unwrap()
}
