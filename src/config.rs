use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};
use log::debug;
use serde::Deserialize;

use crate::lister::DEFAULT_MAX_RESULTS;

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_VIDEO_FORMAT: &str = "best[height<=720]";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub transcript_dir: Option<PathBuf>,
    pub max_results: Option<usize>,
    pub lang: Option<String>,
    pub video_format: Option<String>,
}

impl FileConfig {
    /// Load config from ~/.config/ytchan/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: FileConfig =
                toml::from_str(&content).wrap_err_with(|| format!("invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(FileConfig::default())
        }
    }
}

/// Values given on the command line; they win over file and environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub max_results: Option<usize>,
    pub lang: Option<String>,
}

/// Fully resolved settings, built once and handed to each component
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_dir: PathBuf,
    pub download_dir: PathBuf,
    pub transcript_dir: PathBuf,
    pub max_results: usize,
    pub lang: String,
    pub video_format: String,
}

impl Config {
    /// Read the config file and the process environment, then apply `overrides`
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let file = FileConfig::load()?;
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Merge file values, environment lookups and CLI overrides (later wins)
    pub fn resolve<F>(file: FileConfig, lookup: F, overrides: &Overrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(api_key) = env("YOUTUBE_API_KEY").or(file.api_key).filter(|k| !k.trim().is_empty()) else {
            bail!(
                "YouTube API key not found\n\nSet YOUTUBE_API_KEY or add api_key to {}",
                config_path().display()
            );
        };

        let base_dir = overrides
            .base_dir
            .clone()
            .or_else(|| env("BASE_DIR").map(PathBuf::from))
            .or(file.base_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let download_dir = env("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .or(file.download_dir)
            .unwrap_or_else(|| PathBuf::from("downloads"));

        let transcript_dir = env("TRANSCRIPT_DIR")
            .map(PathBuf::from)
            .or(file.transcript_dir)
            .unwrap_or_else(|| PathBuf::from("transcripts"));

        let config = Config {
            api_key,
            download_dir: under(&base_dir, download_dir),
            transcript_dir: under(&base_dir, transcript_dir),
            base_dir,
            max_results: overrides.max_results.or(file.max_results).unwrap_or(DEFAULT_MAX_RESULTS),
            lang: overrides
                .lang
                .clone()
                .or(file.lang)
                .unwrap_or_else(|| DEFAULT_LANG.to_string()),
            video_format: file.video_format.unwrap_or_else(|| DEFAULT_VIDEO_FORMAT.to_string()),
        };
        debug!("Using API key: {}", config.masked_api_key());
        Ok(config)
    }

    /// Create the download and transcript directories
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.download_dir, &self.transcript_dir] {
            std::fs::create_dir_all(dir).wrap_err_with(|| format!("could not create directory {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(5).collect();
        format!("{prefix}...")
    }
}

fn under(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { base.join(path) }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytchan")
        .join("config.toml")
}
