use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;
use url::Url;

use crate::pagination::PageLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("PUBLIC_URL is not a valid URL: {0}")]
    PublicUrl(#[from] url::ParseError),
    #[error("PUBLIC_URL must be able to carry a path (e.g. http://host/api), got {0:?}")]
    PublicUrlNotBase(String),
    #[error("DEFAULT_PAGE_SIZE ({default}) must be between 1 and MAX_PAGE_SIZE ({max})")]
    PageSize { default: u64, max: u64 },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base of the URLs written into the pagination headers.
    pub public_url: Url,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

impl Config {
    /// Default settings serving on port 3000 and linking to `public_url`.
    pub fn new(public_url: Url) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_url,
            default_page_size: 10,
            max_page_size: 100,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let public_url = env::var("PUBLIC_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_URL.to_string());
        let defaults = Self::new(parse_public_url(&public_url)?);

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_var("PORT", defaults.port, "port number")?;
        let default_page_size = parse_var("DEFAULT_PAGE_SIZE", defaults.default_page_size, "page size")?;
        let max_page_size = parse_var("MAX_PAGE_SIZE", defaults.max_page_size, "page size")?;

        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::PageSize {
                default: default_page_size,
                max: max_page_size,
            });
        }

        Ok(Self {
            host,
            port,
            public_url: defaults.public_url,
            default_page_size,
            max_page_size,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_size: self.default_page_size,
            max_size: self.max_page_size,
        }
    }
}

/// Listing URLs are built by appending path segments, so the base must have a path.
fn parse_public_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::PublicUrlNotBase(raw.to_string()));
    }
    Ok(url)
}

fn parse_var<T: FromStr>(name: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
            expected,
        }),
        Err(_) => Ok(default),
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Loads the configuration once; later calls return the cached value.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}
