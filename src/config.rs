//! Configuration for cms.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CMS_PREVIEW_CHARS, CMS_CONFIG)
//! 2. Config file (.cms/config.yaml)
//! 3. Defaults (100 character previews ending in "...")
//!
//! Config file discovery:
//! - `CMS_CONFIG` names the file explicitly
//! - Otherwise searches the current directory and parents for .cms/config.yaml
//! - Falls back to ~/.cms/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_PREVIEW_CHARS: usize = 100;
const DEFAULT_ELLIPSIS: &str = "...";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Number of body characters shown in article previews
    pub preview_chars: Option<usize>,
    /// Marker appended after every article preview
    pub ellipsis: Option<String>,
}

/// How content summaries are rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySettings {
    pub preview_chars: usize,
    pub ellipsis: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Display settings
    pub display: DisplaySettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file: explicit override, then current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("CMS_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".cms").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".cms").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve configuration from an optional config file and the preview override
fn resolve(config_file: Option<PathBuf>, preview_override: Option<&str>) -> Result<ResolvedConfig> {
    let mut display = DisplaySettings::default();

    if let Some(ref path) = config_file {
        let config = load_config_file(path)?;
        if let Some(chars) = config.display.preview_chars {
            display.preview_chars = chars;
        }
        if let Some(ellipsis) = config.display.ellipsis {
            display.ellipsis = ellipsis;
        }
    }

    if let Some(raw) = preview_override {
        display.preview_chars = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid CMS_PREVIEW_CHARS: {}", raw))?;
    }

    Ok(ResolvedConfig {
        display,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let preview_override = std::env::var("CMS_PREVIEW_CHARS").ok();
    resolve(find_config_file(), preview_override.as_deref())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let cms_dir = dir.path().join(".cms");
        std::fs::create_dir_all(&cms_dir).unwrap();

        let config_path = cms_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None, None).unwrap();

        assert_eq!(config.display.preview_chars, 100);
        assert_eq!(config.display.ellipsis, "...");
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
display:
  preview_chars: 40
  ellipsis: " …"
"#,
        );

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.display.preview_chars, Some(40));

        let config = resolve(Some(config_path.clone()), None).unwrap();
        assert_eq!(config.display.preview_chars, 40);
        assert_eq!(config.display.ellipsis, " …");
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_partial_display_section_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp, "version: \"1.0\"\ndisplay:\n  preview_chars: 10\n");

        let config = resolve(Some(config_path), None).unwrap();
        assert_eq!(config.display.preview_chars, 10);
        assert_eq!(config.display.ellipsis, "...");
    }

    #[test]
    fn test_env_override_wins() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp, "version: \"1.0\"\ndisplay:\n  preview_chars: 10\n");

        let config = resolve(Some(config_path), Some("25")).unwrap();
        assert_eq!(config.display.preview_chars, 25);
    }

    #[test]
    fn test_invalid_env_override() {
        assert!(resolve(None, Some("lots")).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        assert!(resolve(Some(missing), None).is_err());
    }
}
