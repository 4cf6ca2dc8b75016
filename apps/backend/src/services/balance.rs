//! Balance service — month-back ETH balance for a wallet.

use chrono::Utc;
use tracing::info;

use whatif_common::traits::ChainSource;
use whatif_common::types::HistoricalBalance;
use whatif_common::WhatIfResult;
use whatif_core::address::normalize_address;
use whatif_core::resolve_month_back;

pub struct BalanceService;

impl BalanceService {
    /// Validate `address` and resolve what it held one month ago.
    pub async fn month_back<C: ChainSource + ?Sized>(
        chain: &C,
        address: &str,
    ) -> WhatIfResult<HistoricalBalance> {
        let address = normalize_address(address)?;
        let result = resolve_month_back(chain, &address, Utc::now()).await?;
        info!(
            %address,
            balance = result.balance,
            block = %result.block,
            resolution = ?result.resolution,
            "month-back balance"
        );
        Ok(result)
    }
}
