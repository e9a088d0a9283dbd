//! Application configuration for the docset builder.
//!
//! User config lives at `~/.docsetbuilder/docsetbuilder.toml`.
//! Callers override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocsetError, Result};
use crate::types::FormatRule;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docsetbuilder.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docsetbuilder";

// ---------------------------------------------------------------------------
// Config structs (matching docsetbuilder.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where raw pages are read from.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Anchor marker settings.
    #[serde(default)]
    pub anchors: AnchorConfig,

    /// Formatter rule overrides.
    #[serde(default)]
    pub format: FormatConfig,
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the downloaded HTML pages.
    #[serde(default = "default_storage_root")]
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> String {
    "storage/jigsaw".into()
}

/// `[anchors]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Class the documentation browser scans for.
    #[serde(default = "default_anchor_class")]
    pub class: String,

    /// Prefix of the `name` attribute; the section label is appended.
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            class: default_anchor_class(),
            name_prefix: default_name_prefix(),
        }
    }
}

fn default_anchor_class() -> String {
    "dashAnchor".into()
}
fn default_name_prefix() -> String {
    "//apple_ref/cpp/Section/".into()
}

/// `[format]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Replacement rule table. Empty keeps the docset's built-in rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FormatRule>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docsetbuilder/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DocsetError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docsetbuilder/docsetbuilder.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| DocsetError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| DocsetError::config(format!("failed to parse {}: {e}", path.display())))?;

    validate_anchors(&config.anchors)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default config file into `dir`, creating the directory if needed.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| DocsetError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocsetError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocsetError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject anchor settings the documentation browser would not recognize.
pub fn validate_anchors(anchors: &AnchorConfig) -> Result<()> {
    if anchors.class.trim().is_empty() || anchors.class.contains(char::is_whitespace) {
        return Err(DocsetError::validation(format!(
            "anchor class must be a single non-empty token, got {:?}",
            anchors.class
        )));
    }
    if anchors.name_prefix.is_empty() {
        return Err(DocsetError::validation("anchor name_prefix must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleOp;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("root"));
        assert!(toml_str.contains("dashAnchor"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.storage.root, "storage/jigsaw");
        assert_eq!(parsed.anchors, AnchorConfig::default());
        assert!(parsed.format.rules.is_empty());
    }

    #[test]
    fn config_with_rules() {
        let toml_str = r#"
[storage]
root = "/tmp/jigsaw"

[[format.rules]]
selector = "footer"
op = { kind = "remove" }

[[format.rules]]
selector = "h4"
op = { kind = "set_style", property = "margin-top", value = "2rem" }
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.storage.root, "/tmp/jigsaw");
        assert_eq!(config.format.rules.len(), 2);
        assert_eq!(config.format.rules[0].op, RuleOp::Remove);
        assert_eq!(
            config.format.rules[1].op,
            RuleOp::SetStyle {
                property: "margin-top".into(),
                value: "2rem".into(),
            }
        );
    }

    #[test]
    fn init_and_load_from_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_config_in(dir.path()).expect("init");
        assert!(path.ends_with(CONFIG_FILE_NAME));

        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.anchors.class, "dashAnchor");
    }

    #[test]
    fn load_rejects_bad_anchor_class() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[anchors]\nclass = \"dash anchor\"\n").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, DocsetError::Validation { .. }));
        assert!(err.to_string().contains("anchor class"));
    }

    #[test]
    fn validate_anchors_rejects_empty_prefix() {
        let anchors = AnchorConfig {
            name_prefix: String::new(),
            ..AnchorConfig::default()
        };
        let err = validate_anchors(&anchors).unwrap_err();
        assert!(matches!(err, DocsetError::Validation { .. }));
        assert!(validate_anchors(&AnchorConfig::default()).is_ok());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DocsetError::Io { .. }));
    }
}
