//! Dashboard error types

use thiserror::Error;

use core_kernel::MoneyError;
use domain_billing::BillingError;
use infra_storage::StorageError;

/// Errors raised while setting up or rendering the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid currency setting: {0}")]
    Currency(#[from] MoneyError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Billing(#[from] BillingError),
}
