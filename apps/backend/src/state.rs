//! Shared application state for the API server.

use std::sync::Arc;

use tracing::{info, warn};
use whatif_common::traits::{ChainSource, MarketSource};
use whatif_common::{WhatIfError, WhatIfResult};
use whatif_types::config::{AppConfig, CoinGeckoTier};

use crate::clients::alchemy::AlchemyClient;
use crate::clients::coingecko::CoinGeckoClient;

/// API keys read from the environment. Never written to disk.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub alchemy: Option<String>,
    pub coingecko: Option<String>,
}

impl ProviderKeys {
    /// `ALCHEMY_API_KEY` (or legacy `APIKEY`) and `COINGECKO_API_KEY`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        Self {
            alchemy: non_empty("ALCHEMY_API_KEY").or_else(|| non_empty("APIKEY")),
            coingecko: non_empty("COINGECKO_API_KEY"),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }
}

/// Apply `HOST`, `PORT` and `COINGECKO_TIER` overrides to `config`.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("HOST").filter(|h| !h.is_empty()) {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        match port.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!("ignoring invalid PORT '{port}'"),
        }
    }
    if let Some(tier) = lookup("COINGECKO_TIER") {
        match tier.parse::<CoinGeckoTier>() {
            Ok(t) => config.providers.coingecko_tier = t,
            Err(e) => warn!("ignoring COINGECKO_TIER: {e}"),
        }
    }
}

/// Backend application state, shared by all request handlers.
pub struct AppState {
    pub config: AppConfig,
    /// `None` until an Alchemy key is configured.
    pub chain: Option<Arc<dyn ChainSource>>,
    pub markets: Arc<dyn MarketSource>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        chain: Option<Arc<dyn ChainSource>>,
        markets: Arc<dyn MarketSource>,
    ) -> Self {
        Self {
            config,
            chain,
            markets,
        }
    }

    pub fn from_config(config: &AppConfig, keys: &ProviderKeys) -> WhatIfResult<Self> {
        let chain: Option<Arc<dyn ChainSource>> = match &keys.alchemy {
            Some(key) => {
                info!(network = %config.providers.alchemy_network, "Alchemy client enabled");
                Some(Arc::new(AlchemyClient::new(
                    key,
                    &config.providers.alchemy_network,
                )?))
            }
            None => {
                warn!("ALCHEMY_API_KEY not set — balance endpoints will return 503");
                None
            }
        };

        let tier = config.providers.coingecko_tier;
        info!(%tier, keyed = keys.coingecko.is_some(), "CoinGecko client enabled");
        let markets = Arc::new(CoinGeckoClient::new(keys.coingecko.clone(), tier)?);

        Ok(Self::new(config.clone(), chain, markets))
    }

    /// The chain source, or `NotConfigured`.
    pub fn chain(&self) -> WhatIfResult<&dyn ChainSource> {
        self.chain
            .as_deref()
            .ok_or_else(|| WhatIfError::NotConfigured("Alchemy".into()))
    }

    pub fn markets(&self) -> &dyn MarketSource {
        self.markets.as_ref()
    }
}
