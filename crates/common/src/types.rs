//! Shared data types — provider-agnostic wire shapes.
//!
//! Field names on `EthPrice`, `CoinChange` and `TopCoins` are part of the
//! public HTTP contract and must not be renamed.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Blocks ─────────────────────────────────────────────────────────

/// A block selector for state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Number(u64),
    Latest,
}

impl BlockTag {
    /// JSON-RPC parameter form: `0x1b4` or `latest`.
    pub fn to_rpc_param(&self) -> String {
        match self {
            BlockTag::Number(n) => format!("{n:#x}"),
            BlockTag::Latest => "latest".to_string(),
        }
    }

    pub fn number(&self) -> Option<u64> {
        match self {
            BlockTag::Number(n) => Some(*n),
            BlockTag::Latest => None,
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Number(n) => write!(f, "{n}"),
            BlockTag::Latest => write!(f, "latest"),
        }
    }
}

// Numbers serialize as JSON numbers, `Latest` as the string "latest".
impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockTag::Number(n) => serializer.serialize_u64(*n),
            BlockTag::Latest => serializer.serialize_str("latest"),
        }
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(BlockTag::Number(n)),
            Raw::Str(s) if s == "latest" => Ok(BlockTag::Latest),
            Raw::Str(s) => parse_hex_u64(&s)
                .map(BlockTag::Number)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid block tag: {s}"))),
        }
    }
}

/// Parse a `0x`-prefixed hex quantity (JSON-RPC encoding).
pub fn parse_hex_u64(s: &str) -> Option<u64> {
    let hex = s.strip_prefix("0x")?;
    if hex.is_empty() {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}

/// Parse a `0x`-prefixed hex quantity that may exceed 64 bits (wei balances).
pub fn parse_hex_u128(s: &str) -> Option<u128> {
    let hex = s.strip_prefix("0x")?;
    if hex.is_empty() {
        return None;
    }
    u128::from_str_radix(hex, 16).ok()
}

/// Block number and timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    /// Unix seconds.
    pub timestamp: u64,
}

// ─── Market data ────────────────────────────────────────────────────

/// One row of a market listing with its trailing 30-day change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_30d_in_currency: Option<f64>,
}

/// Current ETH price, implied price 30 days ago, and the 30-day change (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthPrice {
    pub cur: f64,
    pub back: f64,
    pub change: f64,
}

/// A coin's 30-day performance, as served by `/top-coins`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinChange {
    pub name: String,
    pub symbol: String,
    pub price_change_30d: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCoins {
    #[serde(rename = "symbolChangeArray")]
    pub symbol_change_array: Vec<CoinChange>,
}

// ─── Historical balance ─────────────────────────────────────────────

/// Which block the reported balance was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceResolution {
    /// The block closest to one month ago.
    MonthAgo,
    /// The block of the wallet's most recent outgoing transfer.
    LatestTransfer,
    /// The chain head.
    Latest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBalance {
    /// Balance in ETH.
    pub balance: f64,
    /// Balance in wei, decimal string.
    pub balance_wei: String,
    #[serde(rename = "blockNumber")]
    pub block: BlockTag,
    pub resolution: BalanceResolution,
    /// The "one month ago" instant, RFC 3339.
    pub timestamp: String,
    pub message: String,
}
