//! Depth Curve - liquidity depth aggregation for Raydium pools

pub mod api;
pub mod app;
pub mod config;
pub mod depth;
pub mod errors;
pub mod report;

// Re-export main types for convenience
pub use api::PoolApiClient;
pub use depth::{AggregatedPoolData, LiquidityPoint, RawPoolRecord};
