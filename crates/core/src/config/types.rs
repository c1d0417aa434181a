use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::stats::{default_age_bands, AgeBand, DEFAULT_TOP_N};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Catalog file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Where the catalog document is read from and saved to
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/yoto-content.json")
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of static files for the web UI
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8000
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("web")
}

/// Remote products API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// API base URL (e.g., "https://api.yotoplay.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Storefront region segment of the products path
    #[serde(default = "default_region")]
    pub region: String,
    /// Product collection to fetch
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Value of the Authorization header
    #[serde(default)]
    pub api_key: Option<String>,
    /// Storefront origin sent as Origin/Referer
    #[serde(default = "default_storefront_url")]
    pub storefront_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Fetch and save the catalog at startup when the catalog file is missing
    #[serde(default = "default_fetch_on_startup")]
    pub fetch_on_startup: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            region: default_region(),
            collection: default_collection(),
            api_key: None,
            storefront_url: default_storefront_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            fetch_on_startup: default_fetch_on_startup(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.yotoplay.com".to_string()
}

fn default_region() -> String {
    "uk".to_string()
}

fn default_collection() -> String {
    "library".to_string()
}

fn default_storefront_url() -> String {
    "https://uk.yotoplay.com".to_string()
}

fn default_user_agent() -> String {
    format!("cardshelf/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u32 {
    30
}

fn default_fetch_on_startup() -> bool {
    true
}

/// Statistics configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsConfig {
    /// Labels kept per categorical report
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Overlapping age bands for the age-group report
    #[serde(default = "default_age_bands")]
    pub age_bands: Vec<AgeBand>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            age_bands: default_age_bands(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SanitizedSourceConfig>,
    pub stats: StatsConfig,
}

/// Sanitized source config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourceConfig {
    pub base_url: String,
    pub region: String,
    pub collection: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub fetch_on_startup: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: config.catalog.clone(),
            server: config.server.clone(),
            source: config.source.as_ref().map(|s| SanitizedSourceConfig {
                base_url: s.base_url.clone(),
                region: s.region.clone(),
                collection: s.collection.clone(),
                api_key_configured: s.api_key.as_deref().is_some_and(|k| !k.is_empty()),
                timeout_secs: s.timeout_secs,
                fetch_on_startup: s.fetch_on_startup,
            }),
            stats: config.stats.clone(),
        }
    }
}
