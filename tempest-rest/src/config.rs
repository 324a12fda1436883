//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: TEMPEST_, nested keys separated by `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/tempest/{service_name}/config.toml
//! 4. System directory: /etc/tempest/{service_name}/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{PageParamBinder, RequestPaging};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Default paging parameters for list endpoints
    #[serde(default)]
    pub paging: PagingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Paging parameter names and defaults shared by list endpoints
///
/// Endpoints that need different names or defaults build their own
/// [`RequestPaging`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagingConfig {
    /// Name of the page index parameter
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Name of the page size parameter
    #[serde(default = "default_per_page_param")]
    pub per_page_param: String,

    /// Name of the sort parameter
    #[serde(default = "default_sort_param")]
    pub sort_param: String,

    /// Page index used when the parameter is absent
    #[serde(default = "default_page")]
    pub default_page: i64,

    /// Page size used when the parameter is absent
    #[serde(default = "default_per_page")]
    pub default_per_page: i64,

    /// Sort used when the parameter is absent; there is no built-in value
    #[serde(default)]
    pub default_sort: Option<String>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_param: default_page_param(),
            per_page_param: default_per_page_param(),
            sort_param: default_sort_param(),
            default_page: default_page(),
            default_per_page: default_per_page(),
            default_sort: None,
        }
    }
}

impl PagingConfig {
    /// Parameter configuration for a binder
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] if no non-blank default sort is configured.
    pub fn request_paging(&self) -> Result<RequestPaging> {
        let default_sort = self
            .default_sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::precondition("paging.default_sort must be configured"))?;

        Ok(RequestPaging::new(default_sort)
            .with_page_name(&self.page_param)
            .with_per_page_name(&self.per_page_param)
            .with_sort_name(&self.sort_param)
            .with_default_page(self.default_page.to_string())
            .with_default_per_page(self.default_per_page.to_string()))
    }

    /// A binder reading with this configuration
    ///
    /// # Errors
    ///
    /// See [`request_paging`](Self::request_paging).
    pub fn binder(&self) -> Result<PageParamBinder> {
        self.request_paging().map(PageParamBinder::new)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_param() -> String {
    crate::model::PAGE_PARAM.to_string()
}

fn default_per_page_param() -> String {
    crate::model::PER_PAGE_PARAM.to_string()
}

fn default_sort_param() -> String {
    crate::model::SORT_PARAM.to_string()
}

fn default_page() -> i64 {
    0
}

fn default_per_page() -> i64 {
    10
}

impl Config {
    /// Load configuration from all sources
    ///
    /// The service name is taken from the running binary, falling back to `tempest`.
    pub fn load() -> Result<Self> {
        let service_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "tempest".to_string());

        Self::load_for_service(&service_name)
    }

    /// Load configuration for a specific service name
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut defaults = Config::default();
        defaults.service.name = service_name.to_string();
        let mut figment = Figment::new().merge(Serialized::defaults(defaults));

        // Lowest priority first so later files override earlier ones
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("TEMPEST_").split("__"));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Skips the XDG and system directories. Environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TEMPEST_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// Config file paths for a service, highest priority first
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix("tempest");
        if let Some(path) = xdg_dirs.find_config_file(Path::new(service_name).join("config.toml")) {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc/tempest").join(service_name).join("config.toml"));

        paths
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "tempest".to_string(),
                log_level: default_log_level(),
            },
            paging: PagingConfig::default(),
        }
    }
}
