use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{TranslationMode, UserId},
    Result,
};

pub const DEFAULT_DIR: &str = "Data/Users";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Profile {
    mode: Option<String>,
}

/// Per-user preference store: one JSON file per user under `Data/Users`.
///
/// Only the translation-direction preference lives here. Reads and writes
/// happen within a single handler invocation; there is no cross-handler
/// shared state.
#[derive(Clone, Debug)]
pub struct UserStore {
    dir: PathBuf,
}

impl UserStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, user: UserId) -> PathBuf {
        self.dir.join(format!("{}.json", user.0))
    }

    fn read(&self, user: UserId) -> Profile {
        fs::read_to_string(self.path_for(user))
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write(&self, user: UserId, profile: &Profile) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(profile)?;
        fs::write(self.path_for(user), raw)?;
        Ok(())
    }

    /// The user's translation direction, defaulting to standard→slang.
    pub fn mode(&self, user: UserId) -> TranslationMode {
        self.read(user)
            .mode
            .as_deref()
            .and_then(TranslationMode::parse)
            .unwrap_or(TranslationMode::ToZoomer)
    }

    pub fn set_mode(&self, user: UserId, mode: TranslationMode) -> Result<()> {
        let mut profile = self.read(user);
        profile.mode = Some(mode.as_str().to_string());
        self.write(user, &profile)
    }

    /// Sets the default direction only if the user has never chosen one.
    pub fn set_mode_if_absent(&self, user: UserId, mode: TranslationMode) -> Result<()> {
        let profile = self.read(user);
        if profile.mode.is_some() {
            return Ok(());
        }
        self.set_mode(user, mode)
    }
}

impl AsRef<Path> for UserStore {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_store(prefix: &str) -> UserStore {
        let dir = format!(
            "/tmp/{prefix}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );
        UserStore::new(dir)
    }

    #[test]
    fn default_mode_is_to_zoomer() {
        let store = tmp_store("ztb-users-default");
        assert_eq!(store.mode(UserId(1)), TranslationMode::ToZoomer);
    }

    #[test]
    fn set_mode_persists() {
        let store = tmp_store("ztb-users-persist");
        let user = UserId(42);

        store.set_mode(user, TranslationMode::FromZoomer).unwrap();
        assert_eq!(store.mode(user), TranslationMode::FromZoomer);

        let _ = fs::remove_dir_all(store.as_ref());
    }

    #[test]
    fn set_mode_if_absent_does_not_overwrite() {
        let store = tmp_store("ztb-users-absent");
        let user = UserId(7);

        store
            .set_mode_if_absent(user, TranslationMode::ToZoomer)
            .unwrap();
        store.set_mode(user, TranslationMode::FromZoomer).unwrap();
        store
            .set_mode_if_absent(user, TranslationMode::ToZoomer)
            .unwrap();
        assert_eq!(store.mode(user), TranslationMode::FromZoomer);

        let _ = fs::remove_dir_all(store.as_ref());
    }
}
