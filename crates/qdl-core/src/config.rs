use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::FormatConfig;
use crate::quality::Quality;

/// Retry policy parameters for search queries (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per query (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 1.0 = 1s).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1.0,
            max_delay_secs: 20,
        }
    }
}

/// Web-search endpoint used for catalog discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// JSON search endpoint (SearXNG-compatible: `?q=...&format=json`).
    pub endpoint: String,
    /// Hits requested per query variant.
    pub results_per_query: usize,
    /// Query variants fetched concurrently.
    pub max_workers: usize,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Result language hint sent to the endpoint.
    pub language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8888/search".to_string(),
            results_per_query: 5,
            max_workers: 3,
            timeout_secs: 20,
            language: "en".to_string(),
        }
    }
}

/// Catalog storefront the search hits are expected to point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Registrable domain of the storefront; subdomains are accepted.
    pub domain: String,
    /// Region segment every store URL is rewritten to (e.g. "se-en").
    pub reference_locale: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            domain: "qobuz.com".to_string(),
            reference_locale: "se-en".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/qdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdlConfig {
    /// Root directory the download plan places folders under.
    pub download_dir: PathBuf,
    /// Quality id preselected in the confirm dialog (5, 6, 7 or 27).
    pub default_quality: Quality,
    /// Maximum number of entries shown by the selector.
    pub interactive_limit: usize,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for QdlConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("QDL Downloads"),
            default_quality: Quality::Cd,
            interactive_limit: 20,
            search: SearchConfig::default(),
            catalog: CatalogConfig::default(),
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn format_config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qdl")?;
    Ok(xdg_dirs.place_config_file("format.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Load the naming/format configuration, creating a default file if none exists.
pub fn load_or_init_format() -> Result<FormatConfig> {
    load_or_init_at(&format_config_path()?)
}

/// Reads a TOML document at `path`, writing `T::default()` there first when it is missing.
pub fn load_or_init_at<T>(path: &Path) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    if !path.exists() {
        let default_cfg = T::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: T = toml::from_str(&data)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(cfg)
}
