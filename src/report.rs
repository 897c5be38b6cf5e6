use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::depth::{AggregatedPoolData, LiquidityPoint};

/// Final depth-curve report for one token
#[derive(Debug, Serialize, Deserialize)]
pub struct DepthReport {
    pub mint: String,
    pub total_liquidity: f64,
    pub point_count: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub points: Vec<LiquidityPoint>,

    // Metadata
    pub timestamp: DateTime<Utc>,
}

impl DepthReport {
    pub fn new(mint: &str, data: &AggregatedPoolData) -> Self {
        Self {
            mint: mint.to_string(),
            total_liquidity: data.total_liquidity,
            point_count: data.liquidity_points.len(),
            min_price: data.liquidity_points.first().map(|p| p.price),
            max_price: data.liquidity_points.last().map(|p| p.price),
            points: data.liquidity_points.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Log a human-readable summary, truncated to `max_points` rows
    pub fn print_summary(&self, max_points: usize) {
        info!("Token: {}", self.mint);
        info!("Total liquidity: ${:.2}", self.total_liquidity);
        info!("Depth points: {}", self.point_count);
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            info!("Price range: {:.8} .. {:.8}", min, max);
        }

        for point in self.points.iter().take(max_points) {
            info!("  price {:.8}  liquidity ${:.2}", point.price, point.liquidity_usd);
        }
        if self.point_count > max_points {
            info!("  ... {} more points", self.point_count - max_points);
        }
    }
}
