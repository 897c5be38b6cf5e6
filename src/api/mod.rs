//! Data-source boundary for pool records

pub mod raydium;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use raydium::RaydiumApiClient;

/// Client for a pool-listing API
#[async_trait]
pub trait PoolApiClient: Send + Sync {
    /// Fetch the raw pool list for a token mint. Returns the undecoded JSON
    /// body; response-shape validation happens in the aggregation layer.
    async fn fetch_pools_by_mint(&self, mint: &str) -> Result<Value>;

    /// Check API availability
    async fn is_available(&self) -> bool;
}
