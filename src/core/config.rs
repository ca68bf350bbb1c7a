//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::path::{Path, PathBuf};

use super::error::SiteError;
use super::site::SiteConfig;

/// Embedding domain used when neither `EMBED_DOMAIN` nor `PUBLIC_URL` is set
pub const DEFAULT_EMBED_DOMAIN: &str = "localhost";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file replacing the built-in site config
    /// Example: ./config/site.json
    pub site_config_path: Option<PathBuf>,

    /// Canonical public URL used in meta tags
    /// Example: https://oritechai.com
    pub public_url: Option<String>,

    /// Domain passed to the booking embed
    /// Example: oritechai.com
    pub embed_domain: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            site_config_path: std::env::var("SITE_CONFIG_PATH").ok().map(PathBuf::from),
            public_url: std::env::var("PUBLIC_URL").ok(),
            embed_domain: std::env::var("EMBED_DOMAIN").ok(),
        }
    }

    /// Check if a site config file is configured
    pub fn has_site_config(&self) -> bool {
        self.site_config_path.is_some()
    }

    /// Domain for the booking embed: `EMBED_DOMAIN`, else the host of
    /// `PUBLIC_URL`, else [`DEFAULT_EMBED_DOMAIN`]
    pub fn embed_domain(&self) -> String {
        if let Some(domain) = self.embed_domain.as_deref().filter(|d| !d.is_empty()) {
            return domain.to_string();
        }
        self.public_url
            .as_deref()
            .and_then(host_of)
            .unwrap_or(DEFAULT_EMBED_DOMAIN)
            .to_string()
    }

    /// Site config for this deployment
    ///
    /// Falls back to the built-in default when the file is missing or invalid.
    pub fn load_site(&self) -> SiteConfig {
        let mut site = match &self.site_config_path {
            Some(path) => match load_site_file(path) {
                Ok(site) => {
                    tracing::info!("Site config loaded from {}", path.display());
                    site
                }
                Err(e) => {
                    tracing::error!(
                        "Using built-in site config, {} is unusable: {}",
                        path.display(),
                        e
                    );
                    SiteConfig::default()
                }
            },
            None => SiteConfig::default(),
        };

        if let Some(url) = self.public_url.as_deref().filter(|u| !u.is_empty()) {
            site.seo.canonical_url = url.trim_end_matches('/').to_string();
        }
        site.booking.embed_domain = Some(self.embed_domain());
        site
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Read and validate a site config file
pub fn load_site_file(path: &Path) -> Result<SiteConfig, SiteError> {
    let json = std::fs::read_to_string(path)?;
    SiteConfig::from_json(&json)
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split(':').next()?;
    (!host.is_empty()).then_some(host)
}
