//! Dashboard configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use core_kernel::Currency;
use domain_billing::StoreConfig;
use infra_storage::{JsonFileInvoiceStorage, StorageError, DEFAULT_STORAGE_KEY};

use crate::error::DashboardError;

/// Environment variable prefix, e.g. `INVOICE_DATA_DIR`
pub const ENV_PREFIX: &str = "INVOICE";

/// Dashboard configuration
///
/// Every field has a default, so an empty environment yields
/// [`DashboardConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the invoice document
    pub data_dir: PathBuf,
    /// Storage key; the document is `<data_dir>/<storage_key>.json`
    pub storage_key: String,
    /// ISO code of the book currency
    pub currency: String,
    /// Seconds between status refresh passes; 0 disables the refresher
    pub refresh_interval_secs: u64,
    /// Seed sample invoices into empty storage
    pub seed_samples: bool,
    /// Number of sample invoices to seed
    pub sample_count: usize,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::INR.code().to_string(),
            refresh_interval_secs: 3600,
            seed_samples: true,
            sample_count: 150,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit set of variables
    ///
    /// Keys are full variable names, prefix included.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the store settings
    pub fn store_config(&self) -> Result<StoreConfig, DashboardError> {
        Ok(StoreConfig {
            currency: self.currency.parse()?,
            seed_samples: self.seed_samples,
            sample_count: self.sample_count,
        })
    }

    /// Returns the refresh period, `None` when refreshing is disabled
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    /// Creates the file storage the config points at
    pub fn storage(&self) -> Result<JsonFileInvoiceStorage, StorageError> {
        JsonFileInvoiceStorage::new(&self.data_dir, self.storage_key.as_str())
    }
}
