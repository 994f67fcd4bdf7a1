//! User preferences and first-launch state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Latest hour accepted by the daily reminder slider.
pub const MAX_REMINDER_HOUR: u8 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub notifications_enabled: bool,
    pub theme: Theme,
    /// Hour of day (0..=24) for the daily reminder.
    pub reminder_hour: u8,
    /// Set once onboarding has been completed.
    pub has_launched_before: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            theme: Theme::Light,
            reminder_hour: 8,
            has_launched_before: false,
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if self.reminder_hour > MAX_REMINDER_HOUR {
            return Err(SettingsValidationError::ReminderHourOutOfRange(
                self.reminder_hour,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsValidationError {
    ReminderHourOutOfRange(u8),
}

impl Display for SettingsValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReminderHourOutOfRange(hour) => {
                write!(f, "reminder_hour {hour} is outside 0..={MAX_REMINDER_HOUR}")
            }
        }
    }
}

impl Error for SettingsValidationError {}
