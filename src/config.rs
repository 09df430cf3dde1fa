use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::difficulty::Difficulty;
use crate::stats::DEFAULT_STATS_KEY;
use crate::store::{KeyValueStore, StoreError};

/// When the session clock starts counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStart {
    /// As soon as a session is created or reset.
    OnSessionStart,
    /// On the first digit the player enters.
    #[default]
    OnFirstInput,
}

/// Settings the game session itself depends on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub timer_start: TimerStart,
    pub stats_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            timer_start: TimerStart::default(),
            stats_key: DEFAULT_STATS_KEY.to_string(),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }
}

/// Presentation preferences. The session never reads these; a front end
/// loads them from the same store and applies them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
    pub sound: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: Language::En,
            sound: true,
        }
    }
}

const THEME_KEY: &str = "theme";
const LANGUAGE_KEY: &str = "language";
const SOUND_KEY: &str = "sound";

impl Preferences {
    /// Each key falls back to its default independently when absent or unreadable.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            theme: load_parsed(store, THEME_KEY).unwrap_or(defaults.theme),
            language: load_parsed(store, LANGUAGE_KEY).unwrap_or(defaults.language),
            sound: match load_raw(store, SOUND_KEY).as_deref() {
                Some("off") => false,
                Some(_) => true,
                None => defaults.sound,
            },
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.save(THEME_KEY, &self.theme.to_string())?;
        store.save(LANGUAGE_KEY, &self.language.to_string())?;
        store.save(SOUND_KEY, if self.sound { "on" } else { "off" })
    }
}

fn load_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    store.load(key).unwrap_or_else(|e| {
        log::warn!("could not load preference {key:?}: {e}");
        None
    })
}

fn load_parsed<T: FromStr>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = load_raw(store, key)?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        log::warn!("ignoring unknown value {raw:?} for preference {key:?}");
    }
    parsed
}
