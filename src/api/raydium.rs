use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::PoolApiClient;
use crate::errors::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api-v3.raydium.io";

/// Raydium v3 pool-list API client
pub struct RaydiumApiClient {
    http_client: Client,
    base_url: String,
}

impl RaydiumApiClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PoolApiClient for RaydiumApiClient {
    async fn fetch_pools_by_mint(&self, mint: &str) -> Result<Value> {
        let url = format!(
            "{}/pools/info/mint?mint1={}&poolType=all&poolSortField=default&sortType=desc&pageSize=100&page=1",
            self.base_url, mint
        );

        info!("🔍 Fetching Raydium pools from: {}", url);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus(response.status().as_u16()).into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

        Ok(body)
    }

    async fn is_available(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/main/version", self.base_url))
            .send()
            .await
        {
            Ok(response) => {
                let available = response.status().is_success();
                if available {
                    info!("✅ Raydium API is available");
                } else {
                    warn!("⚠️ Raydium API returned status: {}", response.status());
                }
                available
            }
            Err(e) => {
                warn!("⚠️ Raydium API is not available: {}", e);
                false
            }
        }
    }
}
