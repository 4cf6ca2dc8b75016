//! Gateway API client — used by the CLI to reach the balance and market
//! endpoints served by `whatif-server`.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use whatif_common::traits::AnalysisSource;
use whatif_common::types::{CoinChange, EthPrice, HistoricalBalance, TopCoins};
use whatif_common::{WhatIfError, WhatIfResult};

/// Error body returned by the gateway on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: Option<String>,
}

impl ErrorBody {
    fn into_error(self) -> WhatIfError {
        let details = self.details.unwrap_or_else(|| self.error.clone());
        match self.code.as_str() {
            "INVALID_ADDRESS" => WhatIfError::InvalidAddress(details),
            "INVALID_AMOUNT" => WhatIfError::InvalidAmount(details),
            "NO_BALANCE" => WhatIfError::NoBalance,
            "NOT_CONFIGURED" => WhatIfError::NotConfigured(details),
            "ASSET_NOT_FOUND" => WhatIfError::AssetNotFound(details),
            "RATE_LIMITED" => WhatIfError::RateLimited(details),
            "NETWORK_ERROR" => WhatIfError::Network(details),
            _ => WhatIfError::provider("gateway", details),
        }
    }
}

/// Lightweight client for the eth-whatif gateway.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(api_url: &str, timeout: Duration) -> WhatIfResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WhatIfError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from the on-disk config's `[client]` section.
    pub fn from_config() -> Result<Self> {
        let config = crate::workspace::load_config()?;
        Ok(Self::new(
            &config.client.api_url,
            Duration::from_secs(config.client.timeout_secs),
        )?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON endpoint under `/api`.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> WhatIfResult<T> {
        let url = format!("{}/api{}", self.base_url, path);
        debug!(%url, "gateway request");

        let resp = self.http.get(&url).send().await.map_err(|e| {
            WhatIfError::Network(format!(
                "Failed to reach gateway at {url}. Is whatif-server running? ({e})"
            ))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) if !body.code.is_empty() => body.into_error(),
                _ => WhatIfError::provider("gateway", format!("{status}: {text}")),
            });
        }

        Ok(resp.json::<T>().await?)
    }

    /// Check if the gateway is reachable.
    pub async fn health(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(r) => r.status().is_success(),
            Err(_) => false,
        }
    }

    /// ETH held by `address` one month ago.
    pub async fn balance(&self, address: &str) -> WhatIfResult<f64> {
        self.get(&format!("/balance/{address}")).await
    }

    /// Balance with the block it was read at and how that block was chosen.
    pub async fn balance_details(&self, address: &str) -> WhatIfResult<HistoricalBalance> {
        self.get(&format!("/balance/{address}/details")).await
    }

    pub async fn eth_price(&self) -> WhatIfResult<EthPrice> {
        self.get("/eth-price").await
    }

    pub async fn top_coins(&self) -> WhatIfResult<TopCoins> {
        self.get("/top-coins").await
    }
}

#[async_trait]
impl AnalysisSource for BackendClient {
    async fn balance_month_back(&self, address: &str) -> WhatIfResult<f64> {
        self.balance(address).await
    }

    async fn eth_price(&self) -> WhatIfResult<EthPrice> {
        BackendClient::eth_price(self).await
    }

    async fn top_coins(&self) -> WhatIfResult<Vec<CoinChange>> {
        Ok(BackendClient::top_coins(self).await?.symbol_change_array)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use whatif_common::types::BlockTag;

    use super::*;

    const ADDR: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_balance_is_bare_number() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/balance/{ADDR}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(1.25)))
            .mount(&server)
            .await;

        assert_eq!(client(&server).balance(ADDR).await.unwrap(), 1.25);
    }

    #[tokio::test]
    async fn test_balance_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/balance/{ADDR}/details")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "balance": 0.5,
                "balance_wei": "500000000000000000",
                "blockNumber": 19000000,
                "resolution": "month_ago",
                "timestamp": "2024-02-01T00:00:00.000Z",
                "message": "Balance retrieved successfully"
            })))
            .mount(&server)
            .await;

        let details = client(&server).balance_details(ADDR).await.unwrap();
        assert_eq!(details.block, BlockTag::Number(19_000_000));
        assert_eq!(details.balance, 0.5);
    }

    #[tokio::test]
    async fn test_prices_and_top_coins_via_analysis_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/eth-price"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"cur": 3000.0, "back": 2500.0, "change": 20.0})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/top-coins"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbolChangeArray": [
                    {"name": "Solana", "symbol": "SOL", "price_change_30d": 41.24}
                ]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let source: &dyn AnalysisSource = &client;
        assert_eq!(source.eth_price().await.unwrap().back, 2500.0);
        let coins = source.top_coins().await.unwrap();
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].symbol, "SOL");
    }

    #[tokio::test]
    async fn test_error_body_maps_to_variant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/balance/0x123"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Invalid Ethereum address - Did you copy that right?",
                "code": "INVALID_ADDRESS",
                "details": "0x123"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/eth-price"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": "CoinGecko API not configured",
                "code": "NOT_CONFIGURED",
                "details": "CoinGecko"
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.balance("0x123").await.unwrap_err();
        assert!(matches!(err, WhatIfError::InvalidAddress(ref s) if s == "0x123"));
        let err = client.eth_price().await.unwrap_err();
        assert!(matches!(err, WhatIfError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_plain_text_error_is_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/top-coins"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).top_coins().await.unwrap_err();
        assert!(matches!(err, WhatIfError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;
        assert!(client(&server).health().await);

        let down = BackendClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        assert!(!down.health().await);
        assert!(matches!(
            down.eth_price().await.unwrap_err(),
            WhatIfError::Network(_)
        ));
    }
}
