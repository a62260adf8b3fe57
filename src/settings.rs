//! Game and display configuration.
//!
//! Settings are read once at startup from a `settings.json` file shaped like
//! the one below and then passed by reference to whatever needs them. Every
//! key is optional.
//!
//! ```json
//! {
//!   "word_size": 5,
//!   "num_guesses": 6,
//!   "word_list_file": "words.txt",
//!   "evaluation_mode": "standard",
//!   "ui": {
//!     "correct_color": "green",
//!     "misplaced_color": "yellow",
//!     "incorrect_color": "darkgray",
//!     "keyboard": { "key_layout": [["Q", "W", "E"], ["ENTER", "BACK"]] }
//!   }
//! }
//! ```

use crate::error::{Result, WordyError};
use crate::evaluator::EvaluationMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
const APP_DIR_NAME: &str = "wordy";
/// Upper bound on `num_guesses`; the board must fit on a terminal.
pub const MAX_NUM_GUESSES: usize = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub word_size: usize,
    pub num_guesses: usize,
    pub word_list_file: Option<PathBuf>,
    pub evaluation_mode: EvaluationMode,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_size: 5,
            num_guesses: 6,
            word_list_file: None,
            evaluation_mode: EvaluationMode::Standard,
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub correct_color: String,
    pub misplaced_color: String,
    pub incorrect_color: String,
    pub guesses: GuessSettings,
    pub keyboard: KeyboardSettings,
    pub messages: MessageSettings,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            correct_color: "green".to_string(),
            misplaced_color: "yellow".to_string(),
            incorrect_color: "darkgray".to_string(),
            guesses: GuessSettings::default(),
            keyboard: KeyboardSettings::default(),
            messages: MessageSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuessSettings {
    pub initial_bg_color: String,
    pub initial_text_color: String,
    pub updated_text_color: String,
    /// Blank columns between letter boxes.
    pub letter_padding: u16,
}

impl Default for GuessSettings {
    fn default() -> Self {
        Self {
            initial_bg_color: "black".to_string(),
            initial_text_color: "white".to_string(),
            updated_text_color: "black".to_string(),
            letter_padding: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyboardSettings {
    pub key_layout: Vec<Vec<String>>,
    pub text_color: String,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        let rows = ["QWERTYUIOP", "ASDFGHJKL"];
        let mut key_layout: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.chars().map(String::from).collect())
            .collect();
        let mut bottom = vec!["ENTER".to_string()];
        bottom.extend("ZXCVBNM".chars().map(String::from));
        bottom.push("BACK".to_string());
        key_layout.push(bottom);

        Self {
            key_layout,
            text_color: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    pub welcome: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            welcome: "It's Wordy time. Let's GO!!!".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json_str(data: &str, source_name: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|source| WordyError::SettingsParse {
            path: source_name.to_string(),
            source,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| WordyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json_str(&data, &path.display().to_string())?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `explicit` if given, otherwise from the first
    /// settings file found by [`default_settings_paths`], otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        for candidate in default_settings_paths() {
            if candidate.is_file() {
                return Self::load_from_file(candidate);
            }
        }
        log::debug!("No settings file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_size == 0 {
            return Err(WordyError::InvalidSettings(
                "word_size must be at least 1".to_string(),
            ));
        }
        if self.num_guesses == 0 {
            return Err(WordyError::InvalidSettings(
                "num_guesses must be at least 1".to_string(),
            ));
        }
        if self.num_guesses > MAX_NUM_GUESSES {
            return Err(WordyError::InvalidSettings(format!(
                "num_guesses must be at most {MAX_NUM_GUESSES}"
            )));
        }
        if self.ui.keyboard.key_layout.iter().all(Vec::is_empty) {
            return Err(WordyError::InvalidSettings(
                "ui.keyboard.key_layout has no keys".to_string(),
            ));
        }
        Ok(())
    }
}

/// `./settings.json`, then `<config dir>/wordy/settings.json`.
pub fn default_settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME));
    }
    paths
}
