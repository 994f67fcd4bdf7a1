//! Single-row settings storage.
//!
//! Missing row means "never saved" and reads back as `AppSettings::default()`.

use crate::model::settings::{AppSettings, Theme};
use crate::repo::{bool_to_int, ensure_connection_ready, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection};

const SETTINGS_ROW_ID: i64 = 1;

pub trait SettingsRepository {
    fn load_settings(&self) -> RepoResult<AppSettings>;
    /// Upserts the single settings row.
    fn save_settings(&self, settings: &AppSettings) -> RepoResult<()>;
}

pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "app_settings")?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load_settings(&self) -> RepoResult<AppSettings> {
        let mut stmt = self.conn.prepare(
            "SELECT notifications_enabled, theme, reminder_hour, has_launched_before
             FROM app_settings
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([SETTINGS_ROW_ID])?;
        let Some(row) = rows.next()? else {
            return Ok(AppSettings::default());
        };

        let theme_text: String = row.get("theme")?;
        let theme = Theme::parse(&theme_text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid theme `{theme_text}` in app_settings.theme"))
        })?;
        let reminder_hour = row.get::<_, i64>("reminder_hour")?;
        let reminder_hour = u8::try_from(reminder_hour).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid reminder hour `{reminder_hour}` in app_settings.reminder_hour"
            ))
        })?;

        let settings = AppSettings {
            notifications_enabled: int_to_bool(
                row.get("notifications_enabled")?,
                "app_settings.notifications_enabled",
            )?,
            theme,
            reminder_hour,
            has_launched_before: int_to_bool(
                row.get("has_launched_before")?,
                "app_settings.has_launched_before",
            )?,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn save_settings(&self, settings: &AppSettings) -> RepoResult<()> {
        settings.validate()?;

        self.conn.execute(
            "INSERT INTO app_settings (
                id,
                notifications_enabled,
                theme,
                reminder_hour,
                has_launched_before
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                notifications_enabled = excluded.notifications_enabled,
                theme = excluded.theme,
                reminder_hour = excluded.reminder_hour,
                has_launched_before = excluded.has_launched_before,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                SETTINGS_ROW_ID,
                bool_to_int(settings.notifications_enabled),
                settings.theme.as_str(),
                settings.reminder_hour,
                bool_to_int(settings.has_launched_before),
            ],
        )?;
        Ok(())
    }
}
