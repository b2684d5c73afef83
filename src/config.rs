use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::views::StalePolicy;

/// Runtime configuration for the viewer
#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    /// Origin every API path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How the detail view resolves overlapping fetches
    #[serde(default)]
    pub stale_policy: StalePolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stale_policy: StalePolicy::default(),
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ViewerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_VIEWER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_VIEWER__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ViewerConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ViewerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_VIEWER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
