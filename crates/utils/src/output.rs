//! Unified output rendering: JSON or human-readable table.
//!
//! Usage:
//! ```ignore
//! use whatif_utils::output::{OutputFormat, render};
//!
//! let report = analyzer.run(&source, &input).await?;
//! render(format, &report)?;
//! ```

use anyhow::Result;
use serde::Serialize;

use whatif_common::types::{EthPrice, HistoricalBalance, TopCoins};
use whatif_types::output::*;

use crate::format::{format_eth, format_pct, format_usd, truncate_address};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default).
    Table,
    /// Compact JSON (for piping to jq, scripts).
    Json,
    /// Pretty-printed JSON (for reading).
    JsonPretty,
}

/// Types that can render as a human-readable table.
pub trait TableDisplay {
    fn print_table(&self) {
        print!("{}", self.to_table());
    }

    fn to_table(&self) -> String;
}

/// Render structured output — JSON or table depending on format.
pub fn render<T: Serialize + TableDisplay>(format: OutputFormat, data: &T) -> Result<()> {
    match format {
        OutputFormat::Table => {
            data.print_table();
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(data)?;
            println!("{json}");
            Ok(())
        }
        OutputFormat::JsonPretty => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
            Ok(())
        }
    }
}

/// Render just the JSON formats (for values without a table form).
/// Returns true if JSON was rendered, false if table mode was requested.
pub fn render_json_or<T: Serialize>(format: OutputFormat, data: &T) -> Result<bool> {
    match format {
        OutputFormat::Table => Ok(false),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(data)?);
            Ok(true)
        }
        OutputFormat::JsonPretty => {
            println!("{}", serde_json::to_string_pretty(data)?);
            Ok(true)
        }
    }
}

// ─── TableDisplay implementations ───────────────────────────────────

impl TableDisplay for EthData {
    fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str("╔══════════════════════════════════════════════════════════╗\n");
        out.push_str("║  YOUR PORTFOLIO                                          ║\n");
        out.push_str("╠══════════════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Held 1 month ago : {:<37}║\n", format_eth(self.balance)));
        out.push_str(&format!("║  Value back then  : {:<37}║\n", format_usd(self.value_month_ago)));
        out.push_str(&format!("║  Value if held    : {:<37}║\n", format_usd(self.current_value)));
        out.push_str(&format!(
            "║  ETH price        : {:<37}║\n",
            format!("{} → {}", format_usd(self.month_ago_price), format_usd(self.current_price))
        ));
        out.push_str(&format!("║  ETH 30d change   : {:<37}║\n", format_pct(self.price_change)));
        out.push_str("╚══════════════════════════════════════════════════════════╝\n");
        out
    }
}

impl TableDisplay for AnalysisReport {
    fn to_table(&self) -> String {
        let mut out = String::new();
        match &self.input {
            InputSummary::Wallet(address) => {
                out.push_str(&format!("Wallet: {}\n\n", truncate_address(address)))
            }
            InputSummary::Manual(amount) => {
                out.push_str(&format!("Manual entry: {}\n\n", format_eth(*amount)))
            }
        }
        out.push_str(&self.eth_data.to_table());
        out.push('\n');

        if self.comparisons.is_empty() {
            out.push_str("No coins to compare against.\n");
            return out;
        }

        out.push_str("📈 What You Could Have Had\n\n");
        out.push_str(&format!(
            "{:<18} {:<7} {:>10} {:>16}  {}\n",
            "COIN", "SYMBOL", "30d", "vs ETH", "VERDICT"
        ));
        out.push_str(&format!("{}\n", "─".repeat(90)));
        for c in &self.comparisons {
            let marker = match c.verdict.tone {
                Tone::Green => "🟢",
                Tone::Yellow => "🟡",
                Tone::Red => "🔴",
            };
            out.push_str(&format!(
                "{:<18} {:<7} {:>10} {:>16}  {} {}\n",
                c.coin,
                c.symbol,
                format_pct(c.actual_gain),
                format_usd(c.potential_gain),
                marker,
                c.verdict.message,
            ));
        }
        out
    }
}

impl TableDisplay for EthPrice {
    fn to_table(&self) -> String {
        format!(
            "ETH now        : {}\nETH 30d ago    : {}\n30d change     : {}\n",
            format_usd(self.cur),
            format_usd(self.back),
            format_pct(self.change),
        )
    }
}

impl TableDisplay for TopCoins {
    fn to_table(&self) -> String {
        if self.symbol_change_array.is_empty() {
            return "No native coins reported a 30-day change.\n".to_string();
        }
        let mut out = String::new();
        out.push_str(&format!("{:<4} {:<20} {:<8} {:>10}\n", "#", "NAME", "SYMBOL", "30d"));
        out.push_str(&format!("{}\n", "─".repeat(45)));
        for (i, coin) in self.symbol_change_array.iter().enumerate() {
            out.push_str(&format!(
                "{:<4} {:<20} {:<8} {:>10}\n",
                i + 1,
                coin.name,
                coin.symbol,
                format_pct(coin.price_change_30d),
            ));
        }
        out
    }
}

impl TableDisplay for HistoricalBalance {
    fn to_table(&self) -> String {
        format!(
            "Balance     : {}\nBlock       : {}\nResolved by : {:?}\nTarget time : {}\n",
            format_eth(self.balance),
            self.block,
            self.resolution,
            self.timestamp,
        )
    }
}

impl TableDisplay for DoctorOutput {
    fn to_table(&self) -> String {
        let mut out = String::new();
        for check in &self.checks {
            let mark = if check.ok { "✓" } else { "✗" };
            out.push_str(&format!("{mark} {:<12} {}\n", check.name, check.detail));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatif_common::types::CoinChange;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            input: InputSummary::Manual(2.0),
            eth_data: EthData {
                balance: 2.0,
                current_price: 3000.0,
                month_ago_price: 2500.0,
                value_month_ago: 5000.0,
                current_value: 6000.0,
                price_change: 20.0,
            },
            comparisons: vec![CoinComparison {
                coin: "Solana".into(),
                symbol: "SOL".into(),
                potential_gain: 500.0,
                actual_gain: 30.0,
                price_change: 30.0,
                eth_change: 20.0,
                token_change: 30.0,
                eth_winner: false,
                verdict: Verdict {
                    tone: Tone::Yellow,
                    message: "You could have made an extra $500.00!".into(),
                },
            }],
        }
    }

    #[test]
    fn test_report_table_contains_rows() {
        let table = sample_report().to_table();
        assert!(table.contains("Manual entry: 2.0000 ETH"));
        assert!(table.contains("$5,000.00"));
        assert!(table.contains("SOL"));
        assert!(table.contains("+30.00%"));
        assert!(table.contains("You could have made an extra $500.00!"));
    }

    #[test]
    fn test_report_table_empty_comparisons() {
        let mut report = sample_report();
        report.comparisons.clear();
        assert!(report.to_table().contains("No coins to compare against."));
    }

    #[test]
    fn test_top_coins_table_numbering() {
        let top = TopCoins {
            symbol_change_array: vec![
                CoinChange { name: "Sui".into(), symbol: "SUI".into(), price_change_30d: 40.0 },
                CoinChange { name: "Aptos".into(), symbol: "APT".into(), price_change_30d: -2.5 },
            ],
        };
        let table = top.to_table();
        assert!(table.contains("1    Sui"));
        assert!(table.contains("2    Aptos"));
        assert!(table.contains("-2.50%"));
    }

    #[test]
    fn test_render_json_or_table_mode() {
        assert!(!render_json_or(OutputFormat::Table, &sample_report()).unwrap());
    }
}
