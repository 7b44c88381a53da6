//! Settings persistence.
//!
//! Settings are kept as a one-element collection under the settings key so
//! they share the collection adapter with tasks and schematics.

use crate::model::settings::Settings;
use crate::repo::collection_repo::{CollectionKey, CollectionRepository, RepoResult};
use log::info;

pub struct SettingsService<R: CollectionRepository> {
    repo: R,
    settings: Settings,
}

impl<R: CollectionRepository> SettingsService<R> {
    /// Loads stored settings, falling back to defaults without writing them.
    pub fn open(repo: R) -> RepoResult<Self> {
        let stored: Vec<Settings> = repo.load(CollectionKey::Settings)?;
        let settings = stored.into_iter().next().unwrap_or_default();
        Ok(Self { repo, settings })
    }

    pub fn current(&self) -> Settings {
        self.settings
    }

    pub fn update(&mut self, settings: Settings) -> RepoResult<()> {
        self.repo.save(CollectionKey::Settings, &[settings])?;
        self.settings = settings;
        info!(
            "event=settings_update module=service status=ok dark_mode={}",
            settings.dark_mode
        );
        Ok(())
    }

    /// Flips the theme and returns the new `dark_mode` value.
    pub fn toggle_dark_mode(&mut self) -> RepoResult<bool> {
        let next = Settings {
            dark_mode: !self.settings.dark_mode,
        };
        self.update(next)?;
        Ok(next.dark_mode)
    }
}
