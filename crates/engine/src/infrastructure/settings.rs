//! Dialogue pipeline settings.
//!
//! Defaults are compiled in. A JSON file (`PARLEY_SETTINGS_FILE`) may replace
//! them wholesale, and individual `PARLEY_*` variables override single fields
//! on top of that.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::http_backend::DEFAULT_BACKEND_URL;
use super::resilience::DEFAULT_COOLDOWN_SECS;

/// Text returned for any blocked input.
pub const DEFAULT_ABORT_TEXT: &str = "Let's step out of the story for a moment. \
If you are thinking about harming yourself, please reach out to someone you trust \
or a local crisis line right now.";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSettings {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    #[serde(default = "default_backend_timeout_secs")]
    pub backend_timeout_secs: u64,

    /// How long the circuit stays open after the backend degrades.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Recent turns with the same character sent to the generator.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Archivist hints stay scripted while at least this much time remains.
    #[serde(default = "default_hint_min_time_secs")]
    pub hint_min_time_secs: u32,

    #[serde(default = "default_block_list")]
    pub block_list: Vec<String>,

    #[serde(default = "default_abort_text")]
    pub abort_text: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_backend_timeout_secs() -> u64 {
    8
}

fn default_cooldown_secs() -> u64 {
    DEFAULT_COOLDOWN_SECS
}

fn default_history_window() -> usize {
    6
}

fn default_hint_min_time_secs() -> u32 {
    180
}

fn default_block_list() -> Vec<String> {
    [
        "kill myself",
        "killing myself",
        "end my life",
        "suicide",
        "suicidal",
        "self harm",
        "self-harm",
        "hurt myself",
        "want to die",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_abort_text() -> String {
    DEFAULT_ABORT_TEXT.to_string()
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            backend_timeout_secs: default_backend_timeout_secs(),
            cooldown_secs: default_cooldown_secs(),
            history_window: default_history_window(),
            hint_min_time_secs: default_hint_min_time_secs(),
            block_list: default_block_list(),
            abort_text: default_abort_text(),
        }
    }
}

impl DialogueSettings {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match lookup("PARLEY_SETTINGS_FILE") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(url) = lookup("PARLEY_BACKEND_URL") {
            settings.backend_url = url;
        }
        if let Some(raw) = lookup("PARLEY_BACKEND_TIMEOUT_SECS") {
            settings.backend_timeout_secs = parse("PARLEY_BACKEND_TIMEOUT_SECS", raw)?;
        }
        if let Some(raw) = lookup("PARLEY_COOLDOWN_SECS") {
            settings.cooldown_secs = parse("PARLEY_COOLDOWN_SECS", raw)?;
        }
        if let Some(raw) = lookup("PARLEY_HISTORY_WINDOW") {
            settings.history_window = parse("PARLEY_HISTORY_WINDOW", raw)?;
        }
        if let Some(raw) = lookup("PARLEY_HINT_MIN_TIME_SECS") {
            settings.hint_min_time_secs = parse("PARLEY_HINT_MIN_TIME_SECS", raw)?;
        }
        if let Some(raw) = lookup("PARLEY_BLOCK_LIST") {
            settings.block_list = raw
                .split(',')
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(text) = lookup("PARLEY_ABORT_TEXT") {
            settings.abort_text = text;
        }

        Ok(settings)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse { path, source })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|_| SettingsError::Invalid { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let settings = DialogueSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, DialogueSettings::default());
        assert_eq!(settings.cooldown(), Duration::from_secs(30));
        assert!(settings.block_list.iter().any(|t| t == "kill myself"));
    }

    #[test]
    fn env_overrides_fields() {
        let settings = DialogueSettings::from_lookup(lookup(&[
            ("PARLEY_BACKEND_URL", "http://npc.internal:9000"),
            ("PARLEY_COOLDOWN_SECS", " 45 "),
            ("PARLEY_BLOCK_LIST", "alpha, beta,,"),
        ]))
        .unwrap();
        assert_eq!(settings.backend_url, "http://npc.internal:9000");
        assert_eq!(settings.cooldown_secs, 45);
        assert_eq!(settings.block_list, vec!["alpha", "beta"]);
        assert_eq!(settings.history_window, 6);
    }

    #[test]
    fn bad_number_is_reported_with_its_key() {
        let err = DialogueSettings::from_lookup(lookup(&[("PARLEY_HISTORY_WINDOW", "lots")]))
            .unwrap_err();
        match err {
            SettingsError::Invalid { key, value } => {
                assert_eq!(key, "PARLEY_HISTORY_WINDOW");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: DialogueSettings =
            serde_json::from_str(r#"{"cooldown_secs": 5, "block_list": ["x"]}"#).unwrap();
        assert_eq!(settings.cooldown_secs, 5);
        assert_eq!(settings.block_list, vec!["x"]);
        assert_eq!(settings.hint_min_time_secs, 180);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DialogueSettings::from_lookup(lookup(&[(
            "PARLEY_SETTINGS_FILE",
            "/definitely/not/here.json",
        )]))
        .unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
