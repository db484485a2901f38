use crate::domain::error::CatalogError;
use crate::domain::model::{CategoryFormat, Pagination, SortDirection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub pagination: PaginationStyle,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default)]
    pub sort_dir: SortDirection,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub http_proxy: Option<String>,
    #[serde(default)]
    pub category_format: CategoryFormat,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaginationStyle {
    #[default]
    Offset,
    Cursor,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: default_page_size(),
            pagination: PaginationStyle::default(),
            sort_by: default_sort_by(),
            sort_dir: SortDirection::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            http_proxy: None,
            category_format: CategoryFormat::default(),
            theme: default_theme(),
            logging: Logging::default(),
        }
    }
}

impl Config {
    pub fn pagination(&self) -> Pagination {
        match self.pagination {
            PaginationStyle::Offset => Pagination::Offset,
            PaginationStyle::Cursor => Pagination::Cursor {
                sort_by: self.sort_by.clone(),
                sort_dir: self.sort_dir,
            },
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.api_url.trim().is_empty() {
            return Err(CatalogError::Config("api_url must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(CatalogError::Config("page_size must be positive".to_string()));
        }
        Ok(())
    }
}

// Defaults
fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_page_size() -> u32 {
    10
}
fn default_sort_by() -> String {
    "id".to_string()
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_theme() -> String {
    "plain".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("catalog").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, CatalogError> {
    let config = toml::from_str::<Config>(content)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, CatalogError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), CatalogError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| CatalogError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(CatalogError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
