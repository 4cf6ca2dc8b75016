//! Historical ETH balance — "what did this wallet hold a month ago?"

use alloy::primitives::{utils::format_ether, U256};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use whatif_common::constants::messages;
use whatif_common::traits::ChainSource;
use whatif_common::types::{BalanceResolution, BlockTag, HistoricalBalance};
use whatif_common::{WhatIfError, WhatIfResult};

use crate::dater::{month_ago, BlockDater};

/// Convert wei to ETH.
pub fn wei_to_eth(wei: u128) -> WhatIfResult<f64> {
    let formatted = format_ether(U256::from(wei));
    formatted
        .parse::<f64>()
        .map_err(|e| WhatIfError::Other(format!("cannot parse ether amount '{formatted}': {e}")))
}

/// Resolve the wallet's ETH balance one month before `now`.
///
/// Reads the balance at the first block on or after the month-ago
/// instant. A zero balance there falls back to the block of the wallet's
/// most recent outgoing transfer, and failing that to the chain head.
pub async fn resolve_month_back<C: ChainSource + ?Sized>(
    chain: &C,
    address: &str,
    now: DateTime<Utc>,
) -> WhatIfResult<HistoricalBalance> {
    let target = month_ago(now)?;
    let target_secs = u64::try_from(target.timestamp())
        .map_err(|_| WhatIfError::Other(format!("target instant before epoch: {target}")))?;

    let block = BlockDater::new(chain).block_at(target_secs).await?;
    let month_ago_tag = BlockTag::Number(block.number);
    let initial = chain.balance_at(address, month_ago_tag).await?;

    let (tag, resolution, wei) = if initial > 0 {
        (month_ago_tag, BalanceResolution::MonthAgo, initial)
    } else {
        info!(address, block = block.number, "zero balance a month back, looking up latest transfer");
        let (tag, resolution) = match chain.latest_outgoing_transfer_block(address).await? {
            Some(n) => (BlockTag::Number(n), BalanceResolution::LatestTransfer),
            None => {
                info!(address, "no transfers found, using latest block");
                (BlockTag::Latest, BalanceResolution::Latest)
            }
        };
        let wei = chain.balance_at(address, tag).await?;
        (tag, resolution, wei)
    };

    Ok(HistoricalBalance {
        balance: wei_to_eth(wei)?,
        balance_wei: wei.to_string(),
        block: tag,
        resolution,
        timestamp: target.to_rfc3339_opts(SecondsFormat::Millis, true),
        message: messages::BALANCE_OK.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::dater::tests::FakeChain;

    const ONE_ETH: u128 = 1_000_000_000_000_000_000;
    const ADDR: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    /// 12s blocks starting 2024-01-01T00:00:00Z, ~70 days of chain.
    fn chain() -> (FakeChain, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let chain = FakeChain::regular(500_000, start.timestamp() as u64, 12);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (chain, now)
    }

    fn month_ago_block(now: DateTime<Utc>) -> u64 {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let target = month_ago(now).unwrap();
        ((target.timestamp() - start.timestamp()) as u64).div_ceil(12)
    }

    #[test]
    fn test_wei_to_eth() {
        assert_eq!(wei_to_eth(ONE_ETH).unwrap(), 1.0);
        assert_eq!(wei_to_eth(ONE_ETH * 3 / 2).unwrap(), 1.5);
        assert_eq!(wei_to_eth(0).unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_balance_at_month_ago_block() {
        let (mut chain, now) = chain();
        let block = month_ago_block(now);
        chain.balances.insert(BlockTag::Number(block), 2 * ONE_ETH);

        let result = resolve_month_back(&chain, ADDR, now).await.unwrap();
        assert_eq!(result.balance, 2.0);
        assert_eq!(result.block, BlockTag::Number(block));
        assert_eq!(result.resolution, BalanceResolution::MonthAgo);
        assert_eq!(result.balance_wei, (2 * ONE_ETH).to_string());
        assert_eq!(result.timestamp, "2024-02-01T00:00:00.000Z");
        assert_eq!(result.message, "Balance retrieved successfully");
    }

    #[tokio::test]
    async fn test_zero_balance_falls_back_to_latest_transfer() {
        let (mut chain, now) = chain();
        chain.transfer_block = Some(123_456);
        chain.balances.insert(BlockTag::Number(123_456), ONE_ETH / 4);

        let result = resolve_month_back(&chain, ADDR, now).await.unwrap();
        assert_eq!(result.balance, 0.25);
        assert_eq!(result.block, BlockTag::Number(123_456));
        assert_eq!(result.resolution, BalanceResolution::LatestTransfer);
    }

    #[tokio::test]
    async fn test_no_transfers_falls_back_to_latest() {
        let (mut chain, now) = chain();
        chain.balances.insert(BlockTag::Latest, 7 * ONE_ETH);

        let result = resolve_month_back(&chain, ADDR, now).await.unwrap();
        assert_eq!(result.balance, 7.0);
        assert_eq!(result.block, BlockTag::Latest);
        assert_eq!(result.resolution, BalanceResolution::Latest);
    }

    #[tokio::test]
    async fn test_empty_wallet_reports_zero() {
        let (chain, now) = chain();
        let result = resolve_month_back(&chain, ADDR, now).await.unwrap();
        assert_eq!(result.balance, 0.0);
        assert_eq!(result.resolution, BalanceResolution::Latest);
    }
}
