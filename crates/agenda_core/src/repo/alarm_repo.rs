//! Alarm repository contract and SQLite implementation.

use crate::model::alarm::{Alarm, AlarmId};
use crate::repo::event_repo::{format_time, parse_time};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub trait AlarmRepository {
    fn insert_alarm(&self, alarm: &Alarm) -> RepoResult<AlarmId>;
    fn delete_alarm(&self, id: AlarmId) -> RepoResult<()>;
    /// All alarms ordered by time of day, then ID.
    fn list_alarms(&self) -> RepoResult<Vec<Alarm>>;
}

pub struct SqliteAlarmRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAlarmRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "alarms")?;
        Ok(Self { conn })
    }
}

impl AlarmRepository for SqliteAlarmRepository<'_> {
    fn insert_alarm(&self, alarm: &Alarm) -> RepoResult<AlarmId> {
        self.conn.execute(
            "INSERT INTO alarms (id, time, description) VALUES (?1, ?2, ?3);",
            params![
                alarm.id.to_string(),
                format_time(alarm.time),
                alarm.description.as_deref(),
            ],
        )?;
        Ok(alarm.id)
    }

    fn delete_alarm(&self, id: AlarmId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM alarms WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_alarms(&self) -> RepoResult<Vec<Alarm>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, time, description FROM alarms ORDER BY time ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut alarms = Vec::new();
        while let Some(row) = rows.next()? {
            alarms.push(parse_alarm_row(row)?);
        }
        Ok(alarms)
    }
}

fn parse_alarm_row(row: &Row<'_>) -> RepoResult<Alarm> {
    let id_text: String = row.get("id")?;
    Ok(Alarm {
        id: parse_uuid(&id_text, "alarms.id")?,
        time: parse_time(&row.get::<_, String>("time")?, "alarms.time")?,
        description: row.get("description")?,
    })
}
