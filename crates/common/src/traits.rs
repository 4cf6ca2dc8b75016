//! Provider traits — the seams between the analysis core and the outside world.
//!
//! `ChainSource` and `MarketSource` are implemented by the gateway's
//! Alchemy / CoinGecko clients. `AnalysisSource` is the higher-level view
//! the analyzer consumes; both the gateway (in-process) and the CLI's
//! HTTP client implement it.

use async_trait::async_trait;

use crate::error::WhatIfResult;
use crate::types::*;

/// Read access to an EVM chain.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Current chain head.
    async fn latest_block(&self) -> WhatIfResult<BlockHeader>;

    /// Header of a specific block.
    async fn block(&self, number: u64) -> WhatIfResult<BlockHeader>;

    /// Native balance (wei) of `address` at `block`.
    async fn balance_at(&self, address: &str, block: BlockTag) -> WhatIfResult<u128>;

    /// Block of the most recent external or internal transfer sent from
    /// `address`, if it ever sent one.
    async fn latest_outgoing_transfer_block(&self, address: &str) -> WhatIfResult<Option<u64>>;
}

/// Market listing with 30-day price changes.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// First page of USD markets ordered by market cap, with
    /// `price_change_percentage_30d_in_currency` populated.
    async fn markets(&self, per_page: u32) -> WhatIfResult<Vec<MarketCoin>>;
}

/// Everything the analyzer needs to build a report.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// ETH held by `address` one month ago.
    async fn balance_month_back(&self, address: &str) -> WhatIfResult<f64>;

    async fn eth_price(&self) -> WhatIfResult<EthPrice>;

    /// Best-performing native coins, best first.
    async fn top_coins(&self) -> WhatIfResult<Vec<CoinChange>>;
}
