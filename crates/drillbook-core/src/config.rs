//! User configuration.
//!
//! Settings live in `$XDG_CONFIG_HOME/drillbook/config.toml` (or
//! `~/.config/drillbook/config.toml`). The file is layered over the embedded
//! [`DEFAULT_CONFIG`], so it only needs the keys a user wants to change. A
//! missing file is created with the defaults on first run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Written out verbatim when no config file exists yet.
pub const DEFAULT_CONFIG: &str = r#"
[ui]
show_counts        = true
show_last_modified = true
indent             = 2
theme              = "default"

[data]
suffix = "_data.yaml"
"#;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// `[ui]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show `(n)` match counts after group labels.
    pub show_counts: bool,
    /// Show the data file's modification date in the tab bar.
    pub show_last_modified: bool,
    /// Columns of indentation per outline level.
    pub indent: u16,
    /// `default` or `gruvbox`.
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_counts: true,
            show_last_modified: true,
            indent: 2,
            theme: "default".to_string(),
        }
    }
}

/// `[data]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Appended to a page name to find its data file.
    pub suffix: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            suffix: "_data.yaml".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the user's config file, creating it first if it is missing.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        if !path.exists() {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }
        Self::load_from(&path)
    }

    /// Layer the file at `path` over the defaults. A missing file is fine;
    /// a malformed one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Ok(layered(Some(path))?.try_deserialize()?)
    }

    /// The embedded defaults, without touching the filesystem.
    pub fn defaults() -> Self {
        layered(None)
            .and_then(config::Config::try_deserialize::<Self>)
            .expect("embedded default config must be valid")
    }
}

fn layered(user_file: Option<&Path>) -> Result<config::Config, config::ConfigError> {
    let mut builder = config::Config::builder().add_source(config::File::from_str(
        DEFAULT_CONFIG,
        config::FileFormat::Toml,
    ));
    if let Some(path) = user_file {
        builder = builder.add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        );
    }
    builder.build()
}

fn config_path() -> PathBuf {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var_os("HOME")
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
            .join(".config"),
    };
    base.join("drillbook").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_the_rust_defaults() {
        let expected = Config {
            ui: UiConfig::default(),
            data: DataConfig::default(),
        };
        assert_eq!(Config::defaults(), expected);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nshow_counts = false\ntheme = \"gruvbox\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert!(!cfg.ui.show_counts);
        assert_eq!(cfg.ui.theme, "gruvbox");
        assert_eq!(cfg.ui.indent, 2);
        assert_eq!(cfg.data.suffix, "_data.yaml");
    }

    #[test]
    fn missing_file_is_just_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::defaults());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nindent = \"wide\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
