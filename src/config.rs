use crate::constants::INVESTORS_TABLE;
use crate::error::{IntelError, Result};
use crate::storage::LoadPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    pub user_agent: String,
    pub feed_timeout_seconds: u64,
    pub detail_timeout_seconds: u64,
    /// Politeness delay slept before every `delay_every`-th detail lookup
    pub delay_ms: u64,
    pub delay_every: usize,
    pub limit: usize,
    /// Optional two-letter state code narrowing the filer search
    pub region: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.sec.gov".to_string(),
            user_agent: "Investor Intelligence Research research@example.com".to_string(),
            feed_timeout_seconds: 30,
            detail_timeout_seconds: 15,
            delay_ms: 100,
            delay_every: 10,
            limit: 50,
            region: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: String,
    pub load_policy: LoadPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: "investor_intel.db".to_string(),
            load_policy: LoadPolicy::Replace,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub sample_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "investor_database.csv".to_string(),
            sample_path: "investor_database_sample.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub table: String,
    pub batch_size: usize,
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            table: INVESTORS_TABLE.to_string(),
            batch_size: 100,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            IntelError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Reads `config.toml` when present, otherwise falls back to defaults.
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }
}

/// Endpoint and access key for the hosted datastore.
#[derive(Debug, Clone)]
pub struct RemoteCredentials {
    pub url: String,
    pub key: String,
}

impl RemoteCredentials {
    /// Reads credentials from the environment, failing before any network
    /// activity when either value is absent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_present = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        let url = first_present(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]);
        let key = first_present(&["SUPABASE_SERVICE_ROLE_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]);

        match (url, key) {
            (Some(url), Some(key)) => Ok(Self { url, key }),
            (None, _) => Err(IntelError::MissingConfig(
                "SUPABASE_URL environment variable not set".to_string(),
            )),
            (_, None) => Err(IntelError::MissingConfig(
                "SUPABASE_SERVICE_ROLE_KEY environment variable not set".to_string(),
            )),
        }
    }
}
