//! Price derivations over a market listing.

use std::cmp::Ordering;

use whatif_common::constants::{is_native_coin, ETHEREUM_ID, MISSING_CHANGE_SENTINEL};
use whatif_common::types::{CoinChange, EthPrice, MarketCoin};
use whatif_common::{WhatIfError, WhatIfResult};
use whatif_utils::format::round_dp;

/// Implied price `change_pct` percent ago, given the current price:
/// `current - change% * current / 100`.
pub fn implied_past_price(current: f64, change_pct: f64) -> f64 {
    current - (change_pct * current) / 100.0
}

/// Current ETH price, its 30-day change and implied month-ago price.
pub fn eth_price_from_markets(markets: &[MarketCoin]) -> WhatIfResult<EthPrice> {
    let eth = markets
        .iter()
        .find(|c| c.id == ETHEREUM_ID)
        .ok_or_else(|| WhatIfError::AssetNotFound("ethereum missing from market listing".into()))?;

    let cur = eth
        .current_price
        .ok_or_else(|| WhatIfError::AssetNotFound("ethereum has no current price".into()))?;
    let change = eth
        .price_change_percentage_30d_in_currency
        .ok_or_else(|| WhatIfError::AssetNotFound("ethereum has no 30d price change".into()))?;

    Ok(EthPrice {
        cur,
        back: implied_past_price(cur, change),
        change,
    })
}

/// The `limit` best 30-day performers among allow-listed native coins.
///
/// Symbols are upper-cased and changes rounded to two decimals. Coins
/// whose 30-day change is missing, zero or NaN rank as `-100%`; those with
/// no reported change are then left out of the result.
pub fn top_native_coins(markets: &[MarketCoin], limit: usize) -> Vec<CoinChange> {
    let rank = |c: &MarketCoin| {
        c.price_change_percentage_30d_in_currency
            .filter(|v| *v != 0.0 && !v.is_nan())
            .unwrap_or(MISSING_CHANGE_SENTINEL)
    };

    let mut native: Vec<&MarketCoin> = markets.iter().filter(|c| is_native_coin(&c.id)).collect();
    native.sort_by(|a, b| rank(b).partial_cmp(&rank(a)).unwrap_or(Ordering::Equal));

    native
        .into_iter()
        .take(limit)
        .filter_map(|c| {
            let change = c.price_change_percentage_30d_in_currency?;
            Some(CoinChange {
                name: c.name.clone(),
                symbol: c.symbol.to_uppercase(),
                price_change_30d: round_dp(change, 2),
            })
        })
        .collect()
}
