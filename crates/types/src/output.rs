//! Structured output types for JSON/table rendering.
//!
//! Every data-producing command returns one of these types. They all
//! derive `Serialize` for JSON output; `whatif-utils` implements
//! `TableDisplay` for the human-readable form. The browser UI consumes
//! the same JSON, hence the camelCase field names.

use serde::{Deserialize, Serialize};

// ─── Portfolio ──────────────────────────────────────────────────────

/// What the user held a month ago and what it is worth now.
///
/// ```json
/// {
///   "balance": 2.5,
///   "currentPrice": 3000.0,
///   "monthAgoPrice": 2500.0,
///   "valueMonthAgo": 6250.0,
///   "currentValue": 7500.0,
///   "priceChange": 20.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthData {
    /// ETH held one month ago.
    pub balance: f64,
    pub current_price: f64,
    pub month_ago_price: f64,
    pub value_month_ago: f64,
    pub current_value: f64,
    /// ETH 30-day change, percent.
    pub price_change: f64,
}

// ─── Comparisons ────────────────────────────────────────────────────

/// Colour hint for a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Yellow,
    Red,
}

/// Headline for one comparison row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub tone: Tone,
    pub message: String,
}

/// Holding ETH vs. having switched into `coin` a month ago.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinComparison {
    pub coin: String,
    pub symbol: String,
    /// USD difference between the coin position and the ETH position today.
    pub potential_gain: f64,
    /// The coin's 30-day change, percent.
    pub actual_gain: f64,
    pub price_change: f64,
    pub eth_change: f64,
    pub token_change: f64,
    /// Holding ETH did at least as well as the coin.
    pub eth_winner: bool,
    pub verdict: Verdict,
}

// ─── Analysis ───────────────────────────────────────────────────────

/// How the starting amount was provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum InputSummary {
    Wallet(String),
    Manual(f64),
}

/// Full result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub input: InputSummary,
    pub eth_data: EthData,
    /// Sorted: gainers first (best first), then the rest (worst first).
    pub comparisons: Vec<CoinComparison>,
}

// ─── Doctor ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DoctorOutput {
    pub checks: Vec<DoctorCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorCheck {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl DoctorOutput {
    pub fn all_ok(&self) -> bool {
        self.checks.iter().all(|c| c.ok)
    }
}
