//! Display options and plugin parameter ingestion
//!
//! The host hands plugin parameters over as plain strings. They are turned
//! into a [`DisplayOptions`] value once at startup, which is then passed by
//! reference to everything that formats or places overlays.
//!
//! # Example
//!
//! ```ignore
//! let params = PluginParameters::from_json(r#"{"showExp": "false"}"#)?;
//! let options = DisplayOptions::from_parameters(&params);
//! assert!(!options.show_exp);
//! assert!(options.show_gold); // absent keys keep their default
//! ```

use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Errors raised while reading plugin parameters
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw plugin parameters, exactly as the host supplies them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PluginParameters {
    values: HashMap<String, String>,
}

impl PluginParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object of string values (`{"showGold": "true"}`)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Reads a boolean flag. Only the literal `"true"` counts as true;
    /// a missing key falls back to `default`.
    fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => value == "true",
            None => default,
        }
    }
}

/// What the overlay shows. Built once, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Declared for a hover-only mode that does not exist yet. Inert.
    pub always_displayed: bool,

    /// One line per troop member
    pub show_enemies: bool,

    /// Per-member exp suffix and the exp total
    pub show_exp: bool,

    /// Gold total
    pub show_gold: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            always_displayed: false,
            show_enemies: true,
            show_exp: true,
            show_gold: true,
        }
    }
}

impl DisplayOptions {
    pub fn from_parameters(params: &PluginParameters) -> Self {
        let defaults = Self::default();
        let options = DisplayOptions {
            always_displayed: params.flag("alwaysDisplayed", defaults.always_displayed),
            show_enemies: params.flag("showEnemies", defaults.show_enemies),
            show_exp: params.flag("showExp", defaults.show_exp),
            show_gold: params.flag("showGold", defaults.show_gold),
        };

        if !options.always_displayed {
            info!("alwaysDisplayed is off but hover-only popups are not implemented; overlays stay visible");
        }

        options
    }

    /// Loads options from a parameter file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params = PluginParameters::from_json(&json)?;
        info!("Loaded display options from {}", path.display());
        Ok(Self::from_parameters(&params))
    }

    /// True when the formatted summary can never contain anything
    pub fn shows_nothing(&self) -> bool {
        !self.show_enemies && !self.show_exp && !self.show_gold
    }
}

/// Fixed window metrics used to size an overlay around its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Height of one text line in pixels
    pub line_height: u32,

    /// Horizontal padding on each side of a text line
    pub text_padding: u32,

    /// Frame padding around the whole content area
    pub standard_padding: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            line_height: 36,
            text_padding: 6,
            standard_padding: 18,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_parameters() {
        let options = DisplayOptions::from_parameters(&PluginParameters::new());
        assert_eq!(options, DisplayOptions::default());
        assert!(!options.always_displayed);
        assert!(options.show_enemies && options.show_exp && options.show_gold);
    }

    #[test]
    fn test_only_literal_true_is_true() {
        let mut params = PluginParameters::new();
        params.set("showEnemies", "TRUE");
        params.set("showExp", "1");
        params.set("showGold", "true");
        params.set("alwaysDisplayed", "yes");

        let options = DisplayOptions::from_parameters(&params);
        assert!(!options.show_enemies);
        assert!(!options.show_exp);
        assert!(options.show_gold);
        assert!(!options.always_displayed);
    }

    #[test]
    fn test_from_json() {
        let params =
            PluginParameters::from_json(r#"{"showEnemies": "false", "alwaysDisplayed": "true"}"#)
                .unwrap();
        let options = DisplayOptions::from_parameters(&params);
        assert!(!options.show_enemies);
        assert!(options.always_displayed);
        assert!(options.show_exp);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            PluginParameters::from_json("[1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_sample_parameters() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/plugins.json");
        let options = DisplayOptions::load(path).unwrap();
        assert_eq!(options, DisplayOptions::default());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            DisplayOptions::load("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_shows_nothing() {
        let options = DisplayOptions {
            show_enemies: false,
            show_exp: false,
            show_gold: false,
            ..Default::default()
        };
        assert!(options.shows_nothing());
        assert!(!DisplayOptions::default().shows_nothing());
    }
}
