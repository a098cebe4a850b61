//! Configuration for spud.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SPUD_API_URL, SPUD_USER_AGENT, SPUD_PAGE_SIZE)
//! 2. Config file (SPUD_CONFIG, else <config dir>/spud/config.yaml)
//! 3. Defaults (public Spiget API, page size 5)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::{SortKey, DEFAULT_API_URL};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Directory API root
    pub url: Option<String>,
    /// User-agent sent with every request
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Results requested per query variant
    pub page_size: Option<usize>,
    /// Candidates offered after ranking
    pub max_candidates: Option<usize>,
    pub sort: Option<SortKey>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_url: String,
    pub user_agent: String,
    pub search: SearchSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub page_size: usize,
    pub max_candidates: usize,
    pub sort: SortKey,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 5,
            max_candidates: 10,
            sort: SortKey::Downloads,
        }
    }
}

/// User-agent sent when none is configured
pub fn default_user_agent() -> String {
    format!("Spud/{}", env!("CARGO_PKG_VERSION"))
}

/// Locate the config file: SPUD_CONFIG, else the platform config dir
fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SPUD_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let path = dirs::config_dir()?.join("spud").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file with environment overrides
pub fn resolve_config(
    file: ConfigFile,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let defaults = SearchSettings::default();

    let api_url = env("SPUD_API_URL")
        .or(file.api.url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let user_agent = env("SPUD_USER_AGENT")
        .or(file.api.user_agent)
        .unwrap_or_else(default_user_agent);

    let page_size = match env("SPUD_PAGE_SIZE") {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("SPUD_PAGE_SIZE must be a number, got '{raw}'"))?,
        None => file.search.page_size.unwrap_or(defaults.page_size),
    };

    if page_size == 0 {
        anyhow::bail!("Search page size must be at least 1");
    }

    let max_candidates = file
        .search
        .max_candidates
        .unwrap_or(defaults.max_candidates);
    if max_candidates == 0 {
        anyhow::bail!("Search max_candidates must be at least 1");
    }

    Ok(ResolvedConfig {
        api_url,
        user_agent,
        search: SearchSettings {
            page_size,
            max_candidates,
            sort: file.search.sort.unwrap_or(defaults.sort),
        },
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let file = match config_file {
        Some(ref path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    resolve_config(file, config_file, |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{e:#}")));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
