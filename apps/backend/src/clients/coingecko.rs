//! CoinGecko API client — Pro/Demo API with automatic retry on rate-limit.
//!
//! Supports both Pro API (x-cg-pro-api-key) and Demo API (x-cg-demo-api-key).
//! The Demo API also answers unauthenticated requests, so the key is optional.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use whatif_common::traits::MarketSource;
use whatif_common::types::MarketCoin;
use whatif_common::{WhatIfError, WhatIfResult};
use whatif_types::config::CoinGeckoTier;

const PROVIDER: &str = "CoinGecko";
const MAX_RETRIES: u32 = 3;
const RETRY_BASE: Duration = Duration::from_millis(1000);

/// CoinGecko HTTP client with rate-limit handling.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    api_key: Option<String>,
    tier: CoinGeckoTier,
    base_url: String,
    retry_base: Duration,
}

impl CoinGeckoClient {
    pub fn new(api_key: Option<String>, tier: CoinGeckoTier) -> WhatIfResult<Self> {
        let base_url = match tier {
            CoinGeckoTier::Demo => "https://api.coingecko.com/api/v3",
            CoinGeckoTier::Pro => "https://pro-api.coingecko.com/api/v3",
        };
        Self::with_base_url(api_key, tier, base_url)
    }

    /// Client against an explicit base URL (proxies, tests).
    pub fn with_base_url(
        api_key: Option<String>,
        tier: CoinGeckoTier,
        base_url: &str,
    ) -> WhatIfResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WhatIfError::Other(format!("failed to build CoinGecko HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            tier,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_base: RETRY_BASE,
        })
    }

    /// Auth header name.
    fn auth_header(&self) -> &'static str {
        match self.tier {
            CoinGeckoTier::Demo => "x-cg-demo-api-key",
            CoinGeckoTier::Pro => "x-cg-pro-api-key",
        }
    }

    /// Execute a GET request with retry on 429.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> WhatIfResult<T> {
        let mut retries = 0u32;

        loop {
            let mut req = self.http.get(url).query(query);
            if let Some(key) = &self.api_key {
                req = req.header(self.auth_header(), key);
            }
            let resp = req.send().await?;

            if resp.status() == 429 {
                retries += 1;
                if retries > MAX_RETRIES {
                    return Err(WhatIfError::RateLimited(format!(
                        "{PROVIDER} rate limited after {MAX_RETRIES} retries"
                    )));
                }
                let wait = self.retry_base * 2u32.pow(retries - 1);
                warn!(
                    "CoinGecko 429 — retrying in {:?} (attempt {retries}/{MAX_RETRIES})",
                    wait
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(WhatIfError::provider(PROVIDER, format!("API error {status}: {body}")));
            }

            let result: T = resp.json().await?;
            return Ok(result);
        }
    }

    // ── Coins ───────────────────────────────────────────────────

    /// List coins with market data.
    pub async fn coins_markets(
        &self,
        vs_currency: &str,
        order: &str,
        per_page: u32,
        page: u32,
        price_change_percentage: &str,
    ) -> WhatIfResult<Vec<MarketCoin>> {
        let url = format!("{}/coins/markets", self.base_url);
        let pp = per_page.to_string();
        let pg = page.to_string();

        let query = [
            ("vs_currency", vs_currency),
            ("order", order),
            ("per_page", pp.as_str()),
            ("page", pg.as_str()),
            ("sparkline", "false"),
            ("price_change_percentage", price_change_percentage),
        ];

        let coins: Vec<MarketCoin> = self.get(&url, &query).await?;
        debug!(count = coins.len(), "coins/markets");
        Ok(coins)
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn markets(&self, per_page: u32) -> WhatIfResult<Vec<MarketCoin>> {
        self.coins_markets("usd", "market_cap_desc", per_page, 1, "30d")
            .await
    }
}
