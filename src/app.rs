// src/app.rs
use anyhow::Result;
use tracing::{info, warn};

use crate::api::raydium::DEFAULT_BASE_URL;
use crate::api::{PoolApiClient, RaydiumApiClient};
use crate::config::Config;
use crate::depth;
use crate::report::DepthReport;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_POINTS: usize = 50;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub mint: String,
    pub api_url: String,
    pub timeout_ms: u64,
    pub json: bool,
    pub max_points: usize,
}

impl AppCfg {
    pub fn new(mint: String) -> Self {
        Self {
            mint,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            json: false,
            max_points: DEFAULT_MAX_POINTS,
        }
    }

    pub fn from_config(cfg: Config, mint: String) -> Self {
        Self {
            mint,
            api_url: cfg.api.base_url,
            timeout_ms: cfg.api.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            json: false,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("Starting liquidity depth aggregation");
    info!("Configuration: {:?}", app_cfg);

    let client = RaydiumApiClient::new(&app_cfg.api_url, app_cfg.timeout_ms)?;

    // Advisory only; a dead endpoint surfaces as a fetch error below
    if !client.is_available().await {
        warn!("⚠️ Pool API at {} did not answer the availability probe", app_cfg.api_url);
    }

    let data = depth::fetch_depth(&client, &app_cfg.mint).await?;

    let report = DepthReport::new(&app_cfg.mint, &data);
    if app_cfg.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_summary(app_cfg.max_points);
    }

    Ok(())
}
