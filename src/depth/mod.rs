//! Liquidity depth aggregation for a single token mint

pub mod aggregator;
pub mod filter;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::api::PoolApiClient;

/// One pool record as served by the pools endpoint. Everything here is
/// untrusted until it passes the record filter.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPoolRecord {
    /// Pool price; may arrive as a JSON number or a decimal string
    #[serde(default)]
    pub price: Value,
    /// Total value locked, used as the pool's liquidity magnitude
    #[serde(default)]
    pub tvl: Value,
    /// Pool type tag; only "Concentrated" is treated specially
    #[serde(rename = "type", default)]
    pub pool_type: Option<String>,
}

/// One sample of the depth curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPoint {
    pub price: f64,
    #[serde(rename = "liquidityUSD")]
    pub liquidity_usd: f64,
}

/// Aggregation result for one token
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoolData {
    /// Depth samples, ascending by price, unique at 1e-8 price resolution
    pub liquidity_points: Vec<LiquidityPoint>,
    /// Sum of valid raw tvl values. Deliberately not the sum of per-point
    /// liquidity: concentrated pools redistribute their capital across a
    /// synthetic spread but still count once here.
    pub total_liquidity: f64,
}

/// Fetch every pool quoting `mint` and fold them into a depth curve.
///
/// A response without a `data` array is recovered to the empty result; a
/// failed API call propagates to the caller.
pub async fn fetch_depth(client: &dyn PoolApiClient, mint: &str) -> Result<AggregatedPoolData> {
    info!("Fetching detailed pool data for token: {}", mint);

    let response = client.fetch_pools_by_mint(mint).await?;

    let Some(pools) = response.get("data").and_then(|v| v.as_array()) else {
        error!("Unexpected pools response structure: {}", response);
        return Ok(AggregatedPoolData::default());
    };

    let records: Vec<RawPoolRecord> = pools
        .iter()
        .filter_map(|pool| match serde_json::from_value(pool.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed pool entry: {}", e);
                None
            }
        })
        .collect();

    Ok(aggregator::aggregate_records(&records))
}
