use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::merge::DuplicatePolicy;

/// Configuration for biblioteca.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (BIBLIO_* prefix)
/// 3. Config file (~/.config/biblioteca/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the catalog.
    ///
    /// A `.db`, `.sqlite` or `.sqlite3` extension selects the SQLite backend;
    /// anything else is a comma-separated table file.
    ///
    /// Can be set via:
    /// - CLI: --file /path/to/biblioteca.csv
    /// - ENV: BIBLIO_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/biblioteca.csv"
    /// - Default: ~/.local/share/biblioteca/biblioteca.csv
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Add incoming records even when an identical one is already catalogued.
    ///
    /// Can be set via:
    /// - CLI: --allow-duplicates
    /// - ENV: BIBLIO_ALLOW_DUPLICATES
    /// - Config: allow_duplicates = true
    #[serde(default, deserialize_with = "bool_or_string")]
    pub allow_duplicates: bool,

    /// Logger options, passed to `twyg`.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            allow_duplicates: false,
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/biblioteca/config.toml
    /// Reads environment variables with BIBLIO_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("biblio");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        log::debug!("Loaded configuration: catalog at {}", config.catalog_path.display());
        Ok(config)
    }

    /// Load configuration with a custom catalog path.
    ///
    /// This is used when the --file CLI flag is provided.
    pub fn load_with_catalog_path(catalog_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.catalog_path = catalog_path;
        Ok(config)
    }

    /// The duplicate policy for `add`, with a CLI override on top.
    #[must_use]
    pub fn duplicate_policy(&self, allow_flag: bool) -> DuplicatePolicy {
        DuplicatePolicy::from_allow_flag(allow_flag || self.allow_duplicates)
    }
}

/// Accept `true`, or the string `"true"` that environment variables arrive as.
fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => Ok(flag),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected true or false, got {other:?}"
            ))),
        },
    }
}

/// Get the default catalog path.
///
/// Returns: ~/.local/share/biblioteca/biblioteca.csv (or platform equivalent)
pub fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biblioteca")
        .join("biblioteca.csv")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/biblioteca/config.toml
/// - macOS: ~/Library/Application Support/biblioteca/config.toml
/// - Windows: %APPDATA%\biblioteca\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biblioteca")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Biblioteca Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (BIBLIO_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the catalog
#
# A .db, .sqlite or .sqlite3 extension stores the catalog in SQLite;
# any other extension writes a comma-separated table with a header row.
#
# Can also be set via:
# - CLI: biblioteca --file /custom/path.csv add
# - Environment: BIBLIO_CATALOG_PATH=/custom/path.csv
#
# Default: Platform-specific data directory
#catalog_path = "/path/to/biblioteca.csv"

# Add incoming books even when the same book is already catalogued
#
# Two books are the same when genre, surname, name, title and publisher match
# (ignoring case and accents) and year and volume are equal.
#
# Can also be set via:
# - CLI: biblioteca add --allow-duplicates
# - Environment: BIBLIO_ALLOW_DUPLICATES=true
allow_duplicates = false

# Logging options (see the twyg crate)
#[logging]
#coloured = true
#level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
