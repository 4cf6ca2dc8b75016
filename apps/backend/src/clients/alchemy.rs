//! Alchemy client — Ethereum JSON-RPC plus the `alchemy_getAssetTransfers`
//! enhanced API.
//!
//! Rate-limit aware with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use whatif_common::traits::ChainSource;
use whatif_common::types::{parse_hex_u128, parse_hex_u64, BlockHeader, BlockTag};
use whatif_common::{WhatIfError, WhatIfResult};

const PROVIDER: &str = "Alchemy";
const MAX_RETRIES: u32 = 3;
const RETRY_BASE: Duration = Duration::from_millis(1000);

/// Alchemy client bound to one network endpoint.
#[derive(Clone)]
pub struct AlchemyClient {
    http: Client,
    rpc_url: String,
    /// First 429 backoff; doubles on each retry.
    retry_base: Duration,
}

// ── JSON-RPC Types ──────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'a str,
    method: &'a str,
    params: T,
    id: u64,
}

#[derive(Deserialize, Debug)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize, Debug)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// The subset of `eth_getBlockByNumber` we read. Quantities are hex.
#[derive(Deserialize, Debug, Clone)]
pub struct RpcBlock {
    pub number: String,
    pub timestamp: String,
}

impl RpcBlock {
    fn header(&self) -> WhatIfResult<BlockHeader> {
        let number = parse_hex_u64(&self.number)
            .ok_or_else(|| invalid_quantity("block number", &self.number))?;
        let timestamp = parse_hex_u64(&self.timestamp)
            .ok_or_else(|| invalid_quantity("block timestamp", &self.timestamp))?;
        Ok(BlockHeader { number, timestamp })
    }
}

// ── Transfers API Types ─────────────────────────────────────────────

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersParams<'a> {
    pub from_block: &'a str,
    pub from_address: &'a str,
    pub category: &'a [&'a str],
    pub order: &'a str,
    /// Hex-encoded count.
    pub max_count: &'a str,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfer {
    pub block_num: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersResult {
    pub transfers: Vec<AssetTransfer>,
}

fn invalid_quantity(what: &str, raw: &str) -> WhatIfError {
    WhatIfError::provider(PROVIDER, format!("invalid {what} '{raw}'"))
}

impl AlchemyClient {
    /// Client for `https://<network>.g.alchemy.com/v2/<api_key>`.
    pub fn new(api_key: &str, network: &str) -> WhatIfResult<Self> {
        Self::with_rpc_url(&format!("https://{network}.g.alchemy.com/v2/{api_key}"))
    }

    /// Client for an explicit JSON-RPC endpoint.
    pub fn with_rpc_url(rpc_url: &str) -> WhatIfResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WhatIfError::Other(format!("failed to build Alchemy HTTP client: {e}")))?;

        Ok(Self {
            http,
            rpc_url: rpc_url.to_string(),
            retry_base: RETRY_BASE,
        })
    }

    /// Execute a JSON-RPC call with retry on 429.
    async fn rpc_call<P: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: P,
    ) -> WhatIfResult<R> {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };

        let mut retries = 0u32;

        loop {
            let resp = self.http.post(&self.rpc_url).json(&body).send().await?;

            if resp.status() == 429 {
                retries += 1;
                if retries > MAX_RETRIES {
                    return Err(WhatIfError::RateLimited(format!(
                        "{PROVIDER} rate limited after {MAX_RETRIES} retries"
                    )));
                }
                let wait = self.retry_base * 2u32.pow(retries - 1);
                warn!("Alchemy 429 — retrying in {:?} (attempt {retries}/{MAX_RETRIES})", wait);
                tokio::time::sleep(wait).await;
                continue;
            }

            if !resp.status().is_success() {
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                return Err(WhatIfError::provider(PROVIDER, format!("{method} HTTP {status}: {text}")));
            }

            let result: JsonRpcResponse<R> = resp.json().await?;

            if let Some(err) = result.error {
                return Err(WhatIfError::provider(
                    PROVIDER,
                    format!("RPC error {}: {}", err.code, err.message),
                ));
            }

            return result
                .result
                .ok_or_else(|| WhatIfError::provider(PROVIDER, format!("{method} returned null result")));
        }
    }

    // ── Standard JSON-RPC ───────────────────────────────────────

    /// Header fields of a block, without transactions.
    pub async fn block_by_number(&self, block: BlockTag) -> WhatIfResult<RpcBlock> {
        self.rpc_call("eth_getBlockByNumber", (block.to_rpc_param(), false))
            .await
    }

    /// Wei balance at `block`.
    pub async fn get_balance(&self, address: &str, block: BlockTag) -> WhatIfResult<u128> {
        let raw: String = self
            .rpc_call("eth_getBalance", (address, block.to_rpc_param()))
            .await?;
        parse_hex_u128(&raw).ok_or_else(|| invalid_quantity("balance", &raw))
    }

    // ── Transfers API ───────────────────────────────────────────

    pub async fn asset_transfers(
        &self,
        params: &AssetTransfersParams<'_>,
    ) -> WhatIfResult<AssetTransfersResult> {
        self.rpc_call("alchemy_getAssetTransfers", [params]).await
    }
}

#[async_trait]
impl ChainSource for AlchemyClient {
    async fn latest_block(&self) -> WhatIfResult<BlockHeader> {
        self.block_by_number(BlockTag::Latest).await?.header()
    }

    async fn block(&self, number: u64) -> WhatIfResult<BlockHeader> {
        self.block_by_number(BlockTag::Number(number)).await?.header()
    }

    async fn balance_at(&self, address: &str, block: BlockTag) -> WhatIfResult<u128> {
        self.get_balance(address, block).await
    }

    async fn latest_outgoing_transfer_block(&self, address: &str) -> WhatIfResult<Option<u64>> {
        let params = AssetTransfersParams {
            from_block: "0x0",
            from_address: address,
            category: &["external", "internal"],
            order: "desc",
            max_count: "0x1",
        };
        let result = self.asset_transfers(&params).await?;
        debug!(address, count = result.transfers.len(), "outgoing transfers");

        result
            .transfers
            .first()
            .map(|t| parse_hex_u64(&t.block_num).ok_or_else(|| invalid_quantity("blockNum", &t.block_num)))
            .transpose()
    }
}
