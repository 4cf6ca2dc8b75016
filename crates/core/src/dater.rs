//! Block dating — map a wall-clock instant to a block height.
//!
//! The search first estimates a height from the chain's recent average
//! block time, walks outward from the estimate with doubling steps until
//! the target instant is bracketed, then bisects the bracket. Block
//! timestamps are assumed non-decreasing in height.

use chrono::{DateTime, Months, Utc};
use tracing::debug;

use whatif_common::traits::ChainSource;
use whatif_common::types::BlockHeader;
use whatif_common::{WhatIfError, WhatIfResult};

/// Blocks sampled behind the head to estimate the average block time.
const AVG_SAMPLE_BLOCKS: u64 = 10_000;

/// Fallback block time (seconds) when the sample is degenerate.
const DEFAULT_BLOCK_TIME_SECS: f64 = 12.0;

/// First step of the bracketing walk, in blocks.
const INITIAL_STEP: u64 = 8;

/// The same wall-clock time one calendar month before `now`.
///
/// Month-end dates clamp: 31 March → 28/29 February.
pub fn month_ago(now: DateTime<Utc>) -> WhatIfResult<DateTime<Utc>> {
    now.checked_sub_months(Months::new(1))
        .ok_or_else(|| WhatIfError::Other(format!("cannot subtract a month from {now}")))
}

/// Finds blocks by timestamp on a `ChainSource`.
pub struct BlockDater<'a, C: ChainSource + ?Sized> {
    chain: &'a C,
}

impl<'a, C: ChainSource + ?Sized> BlockDater<'a, C> {
    pub fn new(chain: &'a C) -> Self {
        Self { chain }
    }

    /// The first block whose timestamp is at or after `target` (unix
    /// seconds). Targets past the head resolve to the head; targets
    /// before genesis resolve to block 0.
    pub async fn block_at(&self, target: u64) -> WhatIfResult<BlockHeader> {
        let head = self.chain.latest_block().await?;
        if target >= head.timestamp || head.number == 0 {
            return Ok(head);
        }

        let block_time = self.average_block_time(&head).await?;
        let behind = ((head.timestamp - target) as f64 / block_time).ceil() as u64;
        let guess = self.chain.block(head.number.saturating_sub(behind)).await?;
        debug!(target, guess = guess.number, block_time, "block dater estimate");

        // Invariant after bracketing: lo.timestamp < target <= hi.timestamp
        let (mut lo, mut hi) = if guess.timestamp >= target {
            let mut hi = guess;
            let mut step = INITIAL_STEP;
            loop {
                if hi.number == 0 {
                    return Ok(hi);
                }
                let probe = self.chain.block(hi.number.saturating_sub(step)).await?;
                if probe.timestamp < target {
                    break (probe, hi);
                }
                hi = probe;
                step = step.saturating_mul(2);
            }
        } else {
            let mut lo = guess;
            let mut step = INITIAL_STEP;
            loop {
                let next = lo.number.saturating_add(step).min(head.number);
                let probe = if next == head.number {
                    head
                } else {
                    self.chain.block(next).await?
                };
                if probe.timestamp >= target {
                    break (lo, probe);
                }
                lo = probe;
                step = step.saturating_mul(2);
            }
        };

        while hi.number - lo.number > 1 {
            let mid = lo.number + (hi.number - lo.number) / 2;
            let probe = self.chain.block(mid).await?;
            if probe.timestamp >= target {
                hi = probe;
            } else {
                lo = probe;
            }
        }

        debug!(target, block = hi.number, timestamp = hi.timestamp, "block dater resolved");
        Ok(hi)
    }

    async fn average_block_time(&self, head: &BlockHeader) -> WhatIfResult<f64> {
        let sample_number = head.number.saturating_sub(AVG_SAMPLE_BLOCKS);
        let sample = self.chain.block(sample_number).await?;
        let blocks = head.number - sample.number;
        if blocks == 0 || head.timestamp <= sample.timestamp {
            return Ok(DEFAULT_BLOCK_TIME_SECS);
        }
        Ok((head.timestamp - sample.timestamp) as f64 / blocks as f64)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;

    use whatif_common::types::BlockTag;

    use super::*;

    /// In-memory chain: block `n` has timestamp `timestamps[n]`.
    pub(crate) struct FakeChain {
        pub timestamps: Vec<u64>,
        pub balances: HashMap<BlockTag, u128>,
        pub transfer_block: Option<u64>,
        pub calls: AtomicUsize,
    }

    impl FakeChain {
        pub fn with_timestamps(timestamps: Vec<u64>) -> Self {
            Self {
                timestamps,
                balances: HashMap::new(),
                transfer_block: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// `len` blocks, `spacing` seconds apart, starting at `start`.
        pub fn regular(len: u64, start: u64, spacing: u64) -> Self {
            Self::with_timestamps((0..len).map(|n| start + n * spacing).collect())
        }

        fn header(&self, number: u64) -> BlockHeader {
            BlockHeader {
                number,
                timestamp: self.timestamps[number as usize],
            }
        }

        pub fn brute_force(&self, target: u64) -> u64 {
            self.timestamps
                .iter()
                .position(|&ts| ts >= target)
                .map(|p| p as u64)
                .unwrap_or(self.timestamps.len() as u64 - 1)
        }
    }

    #[async_trait]
    impl ChainSource for FakeChain {
        async fn latest_block(&self) -> WhatIfResult<BlockHeader> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.header(self.timestamps.len() as u64 - 1))
        }

        async fn block(&self, number: u64) -> WhatIfResult<BlockHeader> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if number as usize >= self.timestamps.len() {
                return Err(WhatIfError::provider("fake", format!("no block {number}")));
            }
            Ok(self.header(number))
        }

        async fn balance_at(&self, _address: &str, block: BlockTag) -> WhatIfResult<u128> {
            Ok(self.balances.get(&block).copied().unwrap_or(0))
        }

        async fn latest_outgoing_transfer_block(&self, _address: &str) -> WhatIfResult<Option<u64>> {
            Ok(self.transfer_block)
        }
    }

    #[tokio::test]
    async fn test_regular_chain_exact_and_between() {
        let chain = FakeChain::regular(50_000, 1_600_000_000, 12);
        let dater = BlockDater::new(&chain);

        // Exactly on block 30_000.
        let exact = 1_600_000_000 + 30_000 * 12;
        assert_eq!(dater.block_at(exact).await.unwrap().number, 30_000);

        // Between 30_000 and 30_001 → the later one.
        assert_eq!(dater.block_at(exact + 5).await.unwrap().number, 30_001);
    }

    #[tokio::test]
    async fn test_irregular_chain_matches_brute_force() {
        // Block times alternate between 1s and 30s, with a long stall.
        let mut ts = Vec::new();
        let mut t = 1_000u64;
        for n in 0..20_000u64 {
            ts.push(t);
            t += if n % 3 == 0 { 30 } else { 1 };
            if n == 12_345 {
                t += 86_400;
            }
        }
        let chain = FakeChain::with_timestamps(ts.clone());
        let dater = BlockDater::new(&chain);

        for target in [1_000, 1_001, 50_000, ts[12_345] + 1, ts[12_346], ts[19_000] - 1] {
            let got = dater.block_at(target).await.unwrap().number;
            assert_eq!(got, chain.brute_force(target), "target {target}");
        }
    }

    #[tokio::test]
    async fn test_future_target_is_head() {
        let chain = FakeChain::regular(100, 0, 12);
        let dater = BlockDater::new(&chain);
        assert_eq!(dater.block_at(10_000_000).await.unwrap().number, 99);
    }

    #[tokio::test]
    async fn test_pre_genesis_target_is_block_zero() {
        let chain = FakeChain::regular(1_000, 1_000_000, 12);
        let dater = BlockDater::new(&chain);
        assert_eq!(dater.block_at(5).await.unwrap().number, 0);
    }

    #[tokio::test]
    async fn test_probe_count_is_logarithmic() {
        let chain = FakeChain::regular(2_000_000, 1_500_000_000, 12);
        let dater = BlockDater::new(&chain);
        let target = 1_500_000_000 + 1_234_567 * 12 + 7;
        assert_eq!(dater.block_at(target).await.unwrap().number, 1_234_568);
        assert!(chain.calls.load(Ordering::SeqCst) < 40);
    }

    #[test]
    fn test_month_ago_is_calendar_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(
            month_ago(now).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
        );
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(
            month_ago(now).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 15, 8, 30, 0).unwrap()
        );
    }
}
