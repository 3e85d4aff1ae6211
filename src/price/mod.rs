//! Starting-price resolution
//!
//! The projection engine only ever sees one resolved number. How that number
//! is obtained lives here: a primary provider, a backup provider, and a
//! static last-resort constant.

mod feed;
mod providers;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub use feed::PriceFeed;
pub use providers::{parse_beaver_price, parse_mempool_price, BeaverProvider, MempoolProvider};

/// Primary price endpoint
pub const DEFAULT_PRIMARY_URL: &str = "https://api.prod.beaverbitcoin.com/bitcoin/price";

/// Backup price endpoint
pub const DEFAULT_BACKUP_URL: &str = "https://mempool.space/api/v1/prices";

/// Price used when every provider fails and no earlier price exists
pub const DEFAULT_FALLBACK_PRICE: f64 = 135_000.0;

/// Errors from a single price provider
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("{provider}: request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: unexpected HTTP status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider}: response has no usable `{field}` field")]
    MissingField { provider: &'static str, field: String },

    #[error("{provider}: unusable price {value}")]
    InvalidPrice { provider: &'static str, value: f64 },
}

/// A source of the current asset price in fiat
pub trait PriceProvider: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fetch one price. Implementations return only finite, positive prices.
    fn fetch(&self) -> impl Future<Output = Result<f64, PriceError>> + Send;
}

/// Where a resolved price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOrigin {
    Primary,
    Backup,
    /// All providers failed; the last resolved price was kept
    Previous,
    /// All providers failed and nothing was resolved before
    Fallback,
    /// Supplied directly by the caller
    Manual,
}

/// A resolved starting price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: f64,
    pub origin: PriceOrigin,
}

/// Configuration for the price feed
#[derive(Debug, Clone)]
pub struct PriceFeedConfig {
    pub primary_url: String,
    pub backup_url: String,

    /// Currency key read from the backup response
    pub currency: String,

    /// Per-request HTTP timeout
    pub timeout: Duration,

    /// Last-resort price
    pub fallback_price: f64,

    /// How often callers re-resolve the price
    pub poll_interval: Duration,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            backup_url: DEFAULT_BACKUP_URL.to_string(),
            currency: crate::format::FIAT_CODE.to_string(),
            timeout: Duration::from_secs(10),
            fallback_price: DEFAULT_FALLBACK_PRICE,
            poll_interval: Duration::from_secs(60),
        }
    }
}

/// Accept only finite, positive prices
pub(crate) fn usable(provider: &'static str, value: f64) -> Result<f64, PriceError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PriceError::InvalidPrice { provider, value })
    }
}
