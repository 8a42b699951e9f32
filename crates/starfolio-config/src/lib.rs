//! Configuration for the starfolio terminal portfolio.
//!
//! The configuration lives in `config.toml` under the platform config
//! directory. Every field has a default, so a partial file (or no file at
//! all) is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use starfolio_core::{AnimationSpeed, ColorTheme, TimeFormat};
use tracing::debug;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no home directory to place the config file in")]
    NoConfigDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `*.md` posts.
    pub posts_dir: PathBuf,
    pub color_theme: ColorTheme,
    pub time_format: TimeFormat,
    pub animation_speed: AnimationSpeed,
    /// Number of stars in the warp field.
    pub star_count: usize,
    /// Fixed seed for the starfield; random per run when absent.
    pub seed: Option<u64>,
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("blog"),
            color_theme: ColorTheme::default(),
            time_format: TimeFormat::default(),
            animation_speed: AnimationSpeed::default(),
            star_count: 1000,
            seed: None,
            profile: Profile::default(),
        }
    }
}

/// Content of the About page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub highlights: Vec<String>,
    pub closing: String,
    /// City shown next to the local time.
    pub city: String,
    /// Offset of the city's local time from UTC, in hours.
    pub utc_offset_hours: i32,
    /// Birth instant for the age readout, as a quoted RFC 3339 string.
    pub born: Option<DateTime<Utc>>,
    pub footer: String,
    /// Text revealed by the "peek behind the simulation" toggle.
    pub simulation_note: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            headline: "a space enthusiast driven to make an impact in the future world of tech."
                .to_string(),
            highlights: vec![
                "Engineering student".to_string(),
                "On a road to a chess title".to_string(),
            ],
            closing: "One day, I hope to live beyond Earth. Until then, I'm building what might help it happen."
                .to_string(),
            city: "Milan".to_string(),
            utc_offset_hours: 2,
            born: None,
            footer: "MIT License".to_string(),
            simulation_note: "This is what it would look like if a starship were pushed to 90% of \
                the speed of light toward the centre of the Milky Way: relativistic aberration \
                crowds the starlight forward and every star streaks past."
                .to_string(),
        }
    }
}

impl Config {
    /// Platform directories for starfolio, if a home directory exists.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "starfolio", "starfolio")
    }

    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Directory for the log file.
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }
}
