use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
//  APP CONFIG — stored at ~/.eth-whatif/config.toml
// ═══════════════════════════════════════════════════════════════════════

/// Top-level configuration stored in `$HOME/.eth-whatif/config.toml`.
///
/// ```toml
/// [general]
/// verbose = false
///
/// [client]
/// api_url = "http://localhost:5000"
/// timeout_secs = 15
///
/// [server]
/// host = "0.0.0.0"
/// port = 5000
/// legacy_routes = true
///
/// [providers]
/// alchemy_network = "eth-mainnet"
/// coingecko_tier = "demo"
///
/// [analysis]
/// top_n = 10
/// markets_per_page = 250
/// ```
///
/// API keys are never written here; the server reads them from the
/// environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub client: ClientConfig,
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose tracing output.
    pub verbose: bool,
}

/// How the CLI reaches the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Also serve every `/api/*` route without the prefix.
    pub legacy_routes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Alchemy network slug, e.g. `eth-mainnet`.
    pub alchemy_network: String,
    pub coingecko_tier: CoinGeckoTier,
}

/// CoinGecko API tier. Selects base URL and auth header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinGeckoTier {
    /// Public / demo API: api.coingecko.com
    Demo,
    /// Paid API: pro-api.coingecko.com
    Pro,
}

impl std::fmt::Display for CoinGeckoTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinGeckoTier::Demo => write!(f, "demo"),
            CoinGeckoTier::Pro => write!(f, "pro"),
        }
    }
}

impl std::str::FromStr for CoinGeckoTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" | "free" => Ok(CoinGeckoTier::Demo),
            "pro" => Ok(CoinGeckoTier::Pro),
            other => Err(format!("unknown CoinGecko tier '{other}' (expected demo or pro)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of coins in the comparison list.
    pub top_n: usize,
    /// Page size requested from `/coins/markets`.
    pub markets_per_page: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("http://localhost:5000"),
            timeout_secs: 15,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
            legacy_routes: true,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            alchemy_network: String::from("eth-mainnet"),
            coingecko_tier: CoinGeckoTier::Demo,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            markets_per_page: 250,
        }
    }
}

impl AppConfig {
    /// Serialize to TOML for writing to disk.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.general.verbose);
        assert_eq!(config.client.api_url, "http://localhost:5000");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.legacy_routes);
        assert_eq!(config.providers.coingecko_tier, CoinGeckoTier::Demo);
        assert_eq!(config.analysis.top_n, 10);
    }

    #[test]
    fn test_config_roundtrip_toml() {
        let mut config = AppConfig::default();
        config.providers.coingecko_tier = CoinGeckoTier::Pro;
        config.server.port = 8080;
        let toml_str = config.to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.providers.coingecko_tier, CoinGeckoTier::Pro);
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn test_legacy_routes_defaults_on_when_missing() {
        let raw = r#"
            [general]
            verbose = true
            [client]
            api_url = "http://example.com"
            timeout_secs = 5
            [server]
            host = "127.0.0.1"
            port = 9000
            [providers]
            alchemy_network = "eth-mainnet"
            coingecko_tier = "demo"
            [analysis]
            top_n = 5
            markets_per_page = 100
        "#;
        let config = AppConfig::from_toml_str(raw).unwrap();
        assert!(config.server.legacy_routes);
        assert_eq!(config.analysis.top_n, 5);
    }

    #[test]
    fn test_missing_sections_and_fields_use_defaults() {
        let raw = r#"
            [server]
            port = 8080
            [providers]
            coingecko_tier = "pro"
        "#;
        let config = AppConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.providers.coingecko_tier, CoinGeckoTier::Pro);
        assert_eq!(config.providers.alchemy_network, "eth-mainnet");
        assert_eq!(config.analysis.markets_per_page, 250);
        assert_eq!(config.client.timeout_secs, 15);
    }

    #[test]
    fn test_tier_from_str() {
        assert_eq!("PRO".parse::<CoinGeckoTier>().unwrap(), CoinGeckoTier::Pro);
        assert_eq!("free".parse::<CoinGeckoTier>().unwrap(), CoinGeckoTier::Demo);
        assert!("enterprise".parse::<CoinGeckoTier>().is_err());
    }
}
