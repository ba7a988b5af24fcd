use crate::core::catalog::Catalog;
use crate::core::currency::CurrencyPair;
use crate::core::product::{InputMode, Product};
use crate::core::valuation::DEFAULT_TOP_N;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_MINDICADOR_URL: &str = "https://mindicador.cl";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MindicadorProviderConfig {
    #[serde(default = "default_mindicador_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_mindicador_url() -> String {
    DEFAULT_MINDICADOR_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for MindicadorProviderConfig {
    fn default() -> Self {
        MindicadorProviderConfig {
            base_url: default_mindicador_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub mindicador: MindicadorProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChartConfig {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    DEFAULT_TOP_N
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig { top: default_top() }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub currency: CurrencyPair,
    pub chart: ChartConfig,
    pub strict_input: bool,
    pub providers: ProvidersConfig,
    /// Products every session starts with.
    pub products: Vec<Product>,
}

impl AppConfig {
    /// Loads the config from the default location, or the defaults if no
    /// config file has been created there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "exportrack", "exportrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn input_mode(&self) -> InputMode {
        if self.strict_input {
            InputMode::Strict
        } else {
            InputMode::Lenient
        }
    }

    /// Builds the starting catalog from the configured products.
    pub fn seed_catalog(&self) -> Result<Catalog> {
        for (i, product) in self.products.iter().enumerate() {
            product
                .validate()
                .with_context(|| format!("Invalid product #{} in config", i + 1))?;
        }
        Ok(self.products.iter().cloned().collect())
    }
}
