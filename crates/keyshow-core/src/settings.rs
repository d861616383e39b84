// Keyshow Options Module
// User-configurable display options, loadable from a TOML file

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// How key events are interpreted before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KeyMode {
    /// Translated with compose-sequence support
    #[serde(alias = "normal")]
    Composed,
    /// Keyboard-layout translated characters
    Translated,
    /// Raw keycaps, every active modifier shown
    Raw,
    /// Bare keysym names, no replacement logic
    Keysyms,
}

/// What pressing BackSpace does to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackspaceMode {
    /// Always show a BackSpace glyph, never erase
    Normal,
    /// Erase the last key unless it moved the caret
    Baked,
    /// Erase through caret motion, stop only at silent keys
    Full,
}

/// Textual style of the modifier prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModsMode {
    /// "Ctrl+", "Alt+", ...
    Normal,
    /// "C-", "M-", ...
    Emacs,
    /// "⌘+", "⌥+", ...
    Mac,
    /// Windows logo glyph for Super
    Win,
    /// Tux glyph for Super
    Tux,
}

/// Display options, provided once at engine construction.
///
/// Loaded from `~/.config/keyshow/options.toml` or built in code; every field
/// has a default matching the stock overlay behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Seconds before the overlay hides; consumed by the window collaborator,
    /// carried here because it lives in the same options file
    pub timeout: f64,
    /// Seconds a key counts as "recent" for the underline
    pub recent_thr: f64,
    /// Repeat count that triggers …N× compression, 0 disables
    pub compr_cnt: usize,
    /// Keysyms to drop entirely
    pub ignore: HashSet<String>,
    pub key_mode: KeyMode,
    pub bak_mode: BackspaceMode,
    pub mods_mode: ModsMode,
    /// Show only modifier chords, swallow plain keys
    pub mods_only: bool,
    /// Let Return grow the transcript vertically instead of resetting
    pub multiline: bool,
    /// Re-attach Shift+ to translated chords
    pub vis_shift: bool,
    /// Show whitespace keys as glyphs instead of literal blanks
    pub vis_space: bool,
    /// Initial display state (stealth toggle flips it at runtime)
    pub enabled: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: 2.5,
            recent_thr: 0.1,
            compr_cnt: 3,
            ignore: HashSet::new(),
            key_mode: KeyMode::Composed,
            bak_mode: BackspaceMode::Baked,
            mods_mode: ModsMode::Normal,
            mods_only: false,
            multiline: false,
            vis_shift: false,
            vis_space: true,
            enabled: true,
        }
    }
}

/// Errors that can occur when loading options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl Options {
    /// Load options from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load options from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, OptionsError> {
        toml::from_str(content).map_err(|e| OptionsError::TomlParse(e.to_string()))
    }

    /// Default options path under the user config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyshow").join("options.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self, OptionsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_match_stock_behavior() {
        let opts = Options::default();
        assert_eq!(opts.key_mode, KeyMode::Composed);
        assert_eq!(opts.bak_mode, BackspaceMode::Baked);
        assert_eq!(opts.mods_mode, ModsMode::Normal);
        assert_eq!(opts.compr_cnt, 3);
        assert!((opts.recent_thr - 0.1).abs() < f64::EPSILON);
        assert!(opts.vis_space);
        assert!(!opts.multiline);
        assert!(opts.enabled);
    }

    #[test]
    fn parses_partial_toml() {
        let opts = Options::from_toml(
            r#"
            key_mode = "raw"
            bak_mode = "full"
            compr_cnt = 0
            multiline = true
            ignore = ["Caps_Lock"]
            "#,
        )
        .unwrap();
        assert_eq!(opts.key_mode, KeyMode::Raw);
        assert_eq!(opts.bak_mode, BackspaceMode::Full);
        assert_eq!(opts.compr_cnt, 0);
        assert!(opts.multiline);
        assert!(opts.ignore.contains("Caps_Lock"));
        // untouched fields keep defaults
        assert_eq!(opts.mods_mode, ModsMode::Normal);
    }

    #[test]
    fn legacy_normal_key_mode_maps_to_composed() {
        let opts = Options::from_toml(r#"key_mode = "normal""#).unwrap();
        assert_eq!(opts.key_mode, KeyMode::Composed);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Options::from_toml(r#"bak_mode = "sideways""#).is_err());
    }

    #[test]
    fn mode_enums_parse_from_str() {
        assert_eq!(KeyMode::from_str("keysyms").unwrap(), KeyMode::Keysyms);
        assert_eq!(ModsMode::from_str("emacs").unwrap(), ModsMode::Emacs);
        assert_eq!(KeyMode::Raw.to_string(), "raw");
    }
}
