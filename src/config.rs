// ⚙️ Configuration - TOML file, every field defaulted
//
// [storage]   backend = "json" | "sql", path = "data.json"
// [omdb]      api_key, base_url, timeout_secs
// [webpage]   template, output, page_title
// [display]   enabled + colour names for the terminal palette

use anyhow::{Context, Result};
use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Picked up from the working directory when no --config is given
pub const DEFAULT_CONFIG_FILE: &str = "movie_catalog.toml";

pub const API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub omdb: OmdbConfig,
    pub webpage: WebpageConfig,
    pub display: DisplayConfig,
}

// ============================================================================
// STORAGE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sql,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Falls back to a per-backend default file name
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => match self.backend {
                StorageBackend::Json => PathBuf::from("data.json"),
                StorageBackend::Sql => PathBuf::from("movies.db"),
            },
        }
    }
}

// ============================================================================
// METADATA LOOKUP
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "http://www.omdbapi.com/".to_string(),
            timeout_secs: 10,
        }
    }
}

// ============================================================================
// WEBPAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebpageConfig {
    pub template: PathBuf,
    pub output: PathBuf,
    pub page_title: String,
}

impl Default for WebpageConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("_static/index_template.html"),
            output: PathBuf::from("index.html"),
            page_title: "My Movie App".to_string(),
        }
    }
}

// ============================================================================
// DISPLAY PALETTE
// ============================================================================

/// Colour names are crossterm names ("red", "dark_green", "magenta", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub enabled: bool,
    pub header: String,
    pub menu: String,
    pub prompt: String,
    pub error: String,
    pub notice: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header: "magenta".to_string(),
            menu: "dark_green".to_string(),
            prompt: "blue".to_string(),
            error: "dark_red".to_string(),
            notice: "yellow".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Menu,
    Prompt,
    Error,
    Notice,
}

impl DisplayConfig {
    /// Palette with colour turned off (tests, dumb terminals)
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn color(&self, tone: Tone) -> Color {
        let name = match tone {
            Tone::Header => &self.header,
            Tone::Menu => &self.menu,
            Tone::Prompt => &self.prompt,
            Tone::Error => &self.error,
            Tone::Notice => &self.notice,
        };
        Color::try_from(name.as_str()).unwrap_or(Color::Reset)
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let styled = text.with(self.color(tone));
        match tone {
            Tone::Header => styled.bold().to_string(),
            _ => styled.to_string(),
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Invalid configuration")?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&contents)
    }

    /// Explicit path must exist; otherwise the default file is optional
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.omdb.api_key = Some(key);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.resolved_path(), PathBuf::from("data.json"));
        assert_eq!(config.webpage.page_title, "My Movie App");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [storage]
            backend = "sql"

            [display]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Sql);
        assert_eq!(config.storage.resolved_path(), PathBuf::from("movies.db"));
        assert!(!config.display.enabled);
        assert_eq!(config.display.error, "dark_red");
        assert_eq!(config.omdb.timeout_secs, 10);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Config::from_toml("[storage]\nbackend = \"csv\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie_catalog.toml");
        fs::write(&path, "[webpage]\npage_title = \"Film Night\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.webpage.page_title, "Film Night");
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_plain_palette_leaves_text_alone() {
        let display = DisplayConfig::plain();
        assert_eq!(display.paint(Tone::Error, "boom"), "boom");
    }

    #[test]
    fn test_enabled_palette_keeps_text() {
        let display = DisplayConfig::default();
        assert!(display.paint(Tone::Header, "Menu").contains("Menu"));
    }

    #[test]
    fn test_unknown_colour_name_falls_back() {
        let display = DisplayConfig {
            error: "chartreuse".to_string(),
            ..DisplayConfig::default()
        };
        assert_eq!(display.color(Tone::Error), Color::Reset);
        assert_eq!(display.color(Tone::Notice), Color::Yellow);
    }
}
