//! Application configuration for Interplayer.
//!
//! User config lives at `~/.interplayer/interplayer.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InterplayerError, Result};
use crate::types::{HeaderPolicy, Indent};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "interplayer.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".interplayer";

// ---------------------------------------------------------------------------
// Config structs (matching interplayer.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Walk defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Notation settings.
    #[serde(default)]
    pub notation: NotationConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory the document names resolve against.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Entry-point document name.
    #[serde(default = "default_entry_document")]
    pub entry_document: String,

    /// Sentinel document name — reaching it triggers the final report.
    #[serde(default = "default_sentinel_document")]
    pub sentinel_document: String,

    /// Pacing delay in ms before each scheduled visit.
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            entry_document: default_entry_document(),
            sentinel_document: default_sentinel_document(),
            pace_ms: default_pace_ms(),
        }
    }
}

fn default_root_dir() -> String {
    ".".into()
}
fn default_entry_document() -> String {
    "format.interplay".into()
}
fn default_sentinel_document() -> String {
    "doing.interplay".into()
}
fn default_pace_ms() -> u64 {
    100
}

/// `[notation]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotationConfig {
    /// Trailing suffix that marks a line as a reference to another document.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Leading marker that makes a line a continuation.
    #[serde(default)]
    pub indent: Indent,

    /// How header lines are recognized.
    #[serde(default)]
    pub header_policy: HeaderPolicy,
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            indent: Indent::default(),
            header_policy: HeaderPolicy::default(),
        }
    }
}

fn default_extension() -> String {
    ".interplay".into()
}

// ---------------------------------------------------------------------------
// Walk config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime walk configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Directory the document names resolve against.
    pub root: PathBuf,
    /// Entry-point document name.
    pub entry: String,
    /// Sentinel document name.
    pub sentinel: String,
    /// Pacing delay in ms before each scheduled visit.
    pub pace_ms: u64,
    /// Reference suffix.
    pub extension: String,
    /// Continuation indent marker.
    pub indent: Indent,
    /// Header detection policy.
    pub header_policy: HeaderPolicy,
}

impl From<&AppConfig> for WalkConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            root: PathBuf::from(&config.defaults.root_dir),
            entry: config.defaults.entry_document.clone(),
            sentinel: config.defaults.sentinel_document.clone(),
            pace_ms: config.defaults.pace_ms,
            extension: config.notation.extension.clone(),
            indent: config.notation.indent.clone(),
            header_policy: config.notation.header_policy.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.interplayer/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| InterplayerError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.interplayer/interplayer.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| InterplayerError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        InterplayerError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| InterplayerError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| InterplayerError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| InterplayerError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("entry_document"));
        assert!(toml_str.contains(".interplay"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.entry_document, "format.interplay");
        assert_eq!(parsed.defaults.sentinel_document, "doing.interplay");
        assert_eq!(parsed.defaults.pace_ms, 100);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
root_dir = "/tmp/docs"

[notation]
header_policy = { keyword = "when" }
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.root_dir, "/tmp/docs");
        assert_eq!(config.defaults.entry_document, "format.interplay");
        assert_eq!(config.notation.extension, ".interplay");
        assert_eq!(
            config.notation.header_policy,
            HeaderPolicy::Keyword("when".into())
        );
    }

    #[test]
    fn walk_config_from_app_config() {
        let app = AppConfig::default();
        let walk = WalkConfig::from(&app);
        assert_eq!(walk.entry, "format.interplay");
        assert_eq!(walk.sentinel, "doing.interplay");
        assert_eq!(walk.pace_ms, 100);
        assert_eq!(walk.indent, Indent::Tab);
    }

    #[test]
    fn spaces_indent_from_toml() {
        let toml_str = r#"
[notation]
indent = { spaces = 4 }
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.notation.indent, Indent::Spaces(4));
    }
}
