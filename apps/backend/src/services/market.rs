//! Market service — ETH price and top native coins from one market listing.

use whatif_common::traits::MarketSource;
use whatif_common::types::{EthPrice, TopCoins};
use whatif_common::WhatIfResult;
use whatif_core::pricing::{eth_price_from_markets, top_native_coins};

pub struct MarketService;

impl MarketService {
    pub async fn eth_price<M: MarketSource + ?Sized>(
        markets: &M,
        per_page: u32,
    ) -> WhatIfResult<EthPrice> {
        let listing = markets.markets(per_page).await?;
        eth_price_from_markets(&listing)
    }

    pub async fn top_coins<M: MarketSource + ?Sized>(
        markets: &M,
        per_page: u32,
        limit: usize,
    ) -> WhatIfResult<TopCoins> {
        let listing = markets.markets(per_page).await?;
        Ok(TopCoins {
            symbol_change_array: top_native_coins(&listing, limit),
        })
    }
}
