//! In-process `AnalysisSource` backed by the gateway's own providers.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use whatif_common::traits::AnalysisSource;
use whatif_common::types::{CoinChange, EthPrice, MarketCoin};
use whatif_common::WhatIfResult;
use whatif_core::pricing::{eth_price_from_markets, top_native_coins};

use crate::services::balance::BalanceService;
use crate::state::AppState;

/// One analysis worth of provider access. The market listing is fetched
/// once and shared by `eth_price` and `top_coins`.
pub struct GatewaySource<'a> {
    state: &'a AppState,
    listing: OnceCell<Vec<MarketCoin>>,
}

impl<'a> GatewaySource<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            listing: OnceCell::new(),
        }
    }

    async fn listing(&self) -> WhatIfResult<&[MarketCoin]> {
        let per_page = self.state.config.analysis.markets_per_page;
        self.listing
            .get_or_try_init(|| self.state.markets().markets(per_page))
            .await
            .map(Vec::as_slice)
    }
}

#[async_trait]
impl AnalysisSource for GatewaySource<'_> {
    async fn balance_month_back(&self, address: &str) -> WhatIfResult<f64> {
        let chain = self.state.chain()?;
        Ok(BalanceService::month_back(chain, address).await?.balance)
    }

    async fn eth_price(&self) -> WhatIfResult<EthPrice> {
        eth_price_from_markets(self.listing().await?)
    }

    async fn top_coins(&self) -> WhatIfResult<Vec<CoinChange>> {
        let top_n = self.state.config.analysis.top_n;
        Ok(top_native_coins(self.listing().await?, top_n))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use whatif_common::traits::MarketSource;
    use whatif_core::analysis::{AnalysisInput, Analyzer};
    use whatif_types::config::AppConfig;

    use super::*;

    struct CountingMarkets {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MarketSource for CountingMarkets {
        async fn markets(&self, _per_page: u32) -> WhatIfResult<Vec<MarketCoin>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                MarketCoin {
                    id: "ethereum".into(),
                    symbol: "eth".into(),
                    name: "Ethereum".into(),
                    current_price: Some(3000.0),
                    price_change_percentage_30d_in_currency: Some(10.0),
                },
                MarketCoin {
                    id: "solana".into(),
                    symbol: "sol".into(),
                    name: "Solana".into(),
                    current_price: Some(150.0),
                    price_change_percentage_30d_in_currency: Some(25.0),
                },
            ])
        }
    }

    #[tokio::test]
    async fn test_analysis_fetches_markets_once() {
        let markets = Arc::new(CountingMarkets {
            calls: AtomicUsize::new(0),
        });
        let state = AppState::new(AppConfig::default(), None, markets.clone());

        let report = Analyzer::run(&GatewaySource::new(&state), &AnalysisInput::Manual("1.5".into()))
            .await
            .unwrap();

        assert_eq!(markets.calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.comparisons.len(), 2);
        assert_eq!(report.comparisons[0].symbol, "SOL");
    }
}
