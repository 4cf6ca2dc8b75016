//! One analysis run: starting amount → prices → per-coin comparisons.

use tracing::{debug, info};

use whatif_common::traits::AnalysisSource;
use whatif_common::{WhatIfError, WhatIfResult};
use whatif_types::output::{AnalysisReport, InputSummary};

use crate::address::normalize_address;
use crate::compare::{build_eth_data, compare_all};

/// How the user supplied the starting ETH amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// Look up what this address held a month ago.
    Wallet(String),
    /// A typed-in ETH amount, unparsed.
    Manual(String),
}

/// A validated `AnalysisInput`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidInput {
    /// Checksummed address.
    Wallet(String),
    Manual(f64),
}

impl AnalysisInput {
    /// Apply the form rules: a wallet must be a valid address, a manual
    /// amount must parse to a finite number above zero.
    pub fn validate(&self) -> WhatIfResult<ValidInput> {
        match self {
            AnalysisInput::Wallet(addr) => Ok(ValidInput::Wallet(normalize_address(addr)?)),
            AnalysisInput::Manual(raw) => {
                let trimmed = raw.trim();
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() && v > 0.0 => Ok(ValidInput::Manual(v)),
                    _ => Err(WhatIfError::InvalidAmount(trimmed.to_string())),
                }
            }
        }
    }
}

impl ValidInput {
    fn summary(&self) -> InputSummary {
        match self {
            ValidInput::Wallet(a) => InputSummary::Wallet(a.clone()),
            ValidInput::Manual(v) => InputSummary::Manual(*v),
        }
    }
}

/// Runs analyses against an `AnalysisSource`.
pub struct Analyzer;

impl Analyzer {
    pub async fn run<S: AnalysisSource + ?Sized>(
        source: &S,
        input: &AnalysisInput,
    ) -> WhatIfResult<AnalysisReport> {
        let valid = input.validate()?;

        let balance = match &valid {
            ValidInput::Manual(v) => *v,
            ValidInput::Wallet(addr) => source.balance_month_back(addr).await?,
        };
        if balance <= 0.0 {
            return Err(WhatIfError::NoBalance);
        }
        debug!(balance, "starting amount resolved");

        let (price, coins) = futures::try_join!(source.eth_price(), source.top_coins())?;

        let eth_data = build_eth_data(balance, &price);
        let comparisons = compare_all(&coins, &eth_data);
        info!(
            balance,
            eth_change = price.change,
            coins = comparisons.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            input: valid.summary(),
            eth_data,
            comparisons,
        })
    }
}
