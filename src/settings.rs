//! Player preferences, persisted in LocalStorage. Scores are never stored.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::model::Mode;

pub const STORAGE_KEY: &str = "cwc_settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Stored settings, or defaults when absent or unreadable.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(Some(s)) => s,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("using default settings: {}", e);
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Option<Self>, GameError> {
        let store = storage()?;
        match store.get_item(STORAGE_KEY)? {
            Some(raw) => Self::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn save(&self) -> Result<(), GameError> {
        let raw = self.to_json()?;
        storage()?.set_item(STORAGE_KEY, &raw)?;
        Ok(())
    }
}

fn storage() -> Result<web_sys::Storage, GameError> {
    let win = crate::util::window()?;
    win.local_storage()?.ok_or(GameError::StorageUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_lowercase_mode_names() {
        let s = Settings::from_json(r#"{"mode":"hard","sound_enabled":false}"#).unwrap();
        assert_eq!(s.mode, Mode::Hard);
        assert!(!s.sound_enabled);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s = Settings::from_json(r#"{"mode":"easy"}"#).unwrap();
        assert_eq!(s, Settings { mode: Mode::Easy, sound_enabled: true });
    }

    #[test]
    fn garbage_is_a_settings_error() {
        assert!(matches!(Settings::from_json("not json"), Err(GameError::Settings(_))));
        assert!(Settings::from_json(r#"{"mode":"extreme"}"#).is_err());
    }

    #[test]
    fn writes_what_it_reads() {
        let s = Settings { mode: Mode::Easy, sound_enabled: false };
        assert_eq!(s.to_json().unwrap(), r#"{"mode":"easy","sound_enabled":false}"#);
    }
}
