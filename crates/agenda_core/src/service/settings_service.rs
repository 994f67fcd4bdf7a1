//! Settings and onboarding use-case service.

use crate::model::settings::AppSettings;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::RepoResult;
use log::info;

pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stored settings, or defaults when never saved.
    pub fn load(&self) -> RepoResult<AppSettings> {
        self.repo.load_settings()
    }

    /// Validates and stores `settings`.
    pub fn save(&self, settings: &AppSettings) -> RepoResult<()> {
        self.repo.save_settings(settings)?;
        info!("event=settings_save module=service status=ok");
        Ok(())
    }

    /// Restores default preferences. Onboarding completion is kept so a
    /// reset does not replay the first-launch flow.
    pub fn reset(&self) -> RepoResult<AppSettings> {
        let current = self.repo.load_settings()?;
        let settings = AppSettings {
            has_launched_before: current.has_launched_before,
            ..AppSettings::default()
        };
        self.repo.save_settings(&settings)?;
        info!("event=settings_reset module=service status=ok");
        Ok(settings)
    }

    /// Whether the onboarding flow should be shown.
    pub fn needs_onboarding(&self) -> RepoResult<bool> {
        Ok(!self.repo.load_settings()?.has_launched_before)
    }

    pub fn complete_onboarding(&self) -> RepoResult<()> {
        let mut settings = self.repo.load_settings()?;
        if settings.has_launched_before {
            return Ok(());
        }
        settings.has_launched_before = true;
        self.repo.save_settings(&settings)?;
        info!("event=onboarding_complete module=service status=ok");
        Ok(())
    }
}
