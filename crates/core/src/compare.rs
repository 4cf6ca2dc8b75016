//! ETH-vs-coin comparison: what the month-ago ETH value would be worth
//! today had it been switched into each coin instead.

use std::cmp::Ordering;

use whatif_common::types::{CoinChange, EthPrice};
use whatif_types::output::{CoinComparison, EthData, Tone, Verdict};
use whatif_utils::format::format_usd;

/// Potential gain (USD) above which a missed gainer is flagged green.
const GAINER_GREEN_ABOVE: f64 = 1000.0;

/// Potential gain (USD) from which a loser row is flagged red.
const LOSER_RED_FROM: f64 = 3000.0;

pub const RIGHT_CHOICE: &str = "You made the right choice! 🎯";

/// Portfolio snapshot for `balance` ETH held a month ago.
pub fn build_eth_data(balance: f64, price: &EthPrice) -> EthData {
    EthData {
        balance,
        current_price: price.cur,
        month_ago_price: price.back,
        value_month_ago: balance * price.back,
        current_value: balance * price.cur,
        price_change: price.change,
    }
}

/// Compare holding ETH against switching into `coin` a month ago.
pub fn process_coin_comparison(coin: &CoinChange, eth: &EthData) -> CoinComparison {
    let token_change = coin.price_change_30d;
    let initial = eth.value_month_ago;

    let eth_value = initial * (1.0 + eth.price_change / 100.0);
    let token_value = initial * (1.0 + token_change / 100.0);
    let potential_gain = token_value - eth_value;
    let eth_winner = token_change <= eth.price_change;

    CoinComparison {
        coin: coin.name.clone(),
        symbol: coin.symbol.clone(),
        potential_gain,
        actual_gain: token_change,
        price_change: token_change,
        eth_change: eth.price_change,
        token_change,
        eth_winner,
        verdict: verdict(eth_winner, token_change, potential_gain),
    }
}

/// Colour and headline for one row.
pub fn verdict(eth_winner: bool, actual_gain: f64, potential_gain: f64) -> Verdict {
    if eth_winner {
        return Verdict {
            tone: Tone::Green,
            message: RIGHT_CHOICE.to_string(),
        };
    }

    if actual_gain > 0.0 {
        let tone = if potential_gain > GAINER_GREEN_ABOVE {
            Tone::Green
        } else {
            Tone::Yellow
        };
        Verdict {
            tone,
            message: format!("You could have made an extra {}!", format_usd(potential_gain)),
        }
    } else {
        let tone = if potential_gain >= LOSER_RED_FROM {
            Tone::Red
        } else {
            Tone::Yellow
        };
        Verdict {
            tone,
            message: format!("You could have saved {}", format_usd(potential_gain.abs())),
        }
    }
}

/// Gainers (`actual_gain > 0`) first, best first; then the rest, worst first.
/// Ties keep their input order.
pub fn sort_comparisons(rows: &mut [CoinComparison]) {
    rows.sort_by(|a, b| {
        let a_pos = a.actual_gain > 0.0;
        let b_pos = b.actual_gain > 0.0;
        match (a_pos, b_pos) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => b.actual_gain.total_cmp(&a.actual_gain),
            (false, false) => a.actual_gain.total_cmp(&b.actual_gain),
        }
    });
}

/// Process and sort every coin against `eth`.
pub fn compare_all(coins: &[CoinChange], eth: &EthData) -> Vec<CoinComparison> {
    let mut rows: Vec<CoinComparison> = coins
        .iter()
        .map(|c| process_coin_comparison(c, eth))
        .collect();
    sort_comparisons(&mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(symbol: &str, change: f64) -> CoinChange {
        CoinChange {
            name: symbol.to_lowercase(),
            symbol: symbol.into(),
            price_change_30d: change,
        }
    }

    fn eth(value_month_ago: f64, change: f64) -> EthData {
        EthData {
            balance: 1.0,
            current_price: 0.0,
            month_ago_price: value_month_ago,
            value_month_ago,
            current_value: 0.0,
            price_change: change,
        }
    }

    #[test]
    fn test_build_eth_data() {
        let price = EthPrice {
            cur: 3000.0,
            back: 2500.0,
            change: 20.0,
        };
        let data = build_eth_data(2.0, &price);
        assert_eq!(data.value_month_ago, 5000.0);
        assert_eq!(data.current_value, 6000.0);
        assert_eq!(data.month_ago_price, 2500.0);
        assert_eq!(data.price_change, 20.0);
    }

    #[test]
    fn test_missed_gainer() {
        let row = process_coin_comparison(&coin("SOL", 50.0), &eth(10_000.0, 10.0));
        // 15_000 - 11_000
        assert!((row.potential_gain - 4000.0).abs() < 1e-9);
        assert!(!row.eth_winner);
        assert_eq!(row.verdict.tone, Tone::Green);
        assert_eq!(row.verdict.message, "You could have made an extra $4,000.00!");
    }

    #[test]
    fn test_small_missed_gainer_is_yellow() {
        let row = process_coin_comparison(&coin("SUI", 15.0), &eth(10_000.0, 10.0));
        assert!((row.potential_gain - 500.0).abs() < 1e-9);
        assert_eq!(row.verdict.tone, Tone::Yellow);
    }

    #[test]
    fn test_eth_winner() {
        let row = process_coin_comparison(&coin("BTC", 5.0), &eth(10_000.0, 10.0));
        assert!(row.eth_winner);
        assert!(row.potential_gain < 0.0);
        assert_eq!(row.verdict.tone, Tone::Green);
        assert_eq!(row.verdict.message, RIGHT_CHOICE);
    }

    #[test]
    fn test_equal_change_is_eth_winner() {
        let row = process_coin_comparison(&coin("XRP", 10.0), &eth(10_000.0, 10.0));
        assert!(row.eth_winner);
        assert_eq!(row.potential_gain, 0.0);
    }

    #[test]
    fn test_loser_beats_falling_eth() {
        // ETH fell 40%, the coin only fell 5%: switching would have saved money.
        let row = process_coin_comparison(&coin("DOGE", -5.0), &eth(10_000.0, -40.0));
        assert!(!row.eth_winner);
        assert!((row.potential_gain - 3500.0).abs() < 1e-9);
        assert_eq!(row.verdict.tone, Tone::Red);
        assert_eq!(row.verdict.message, "You could have saved $3,500.00");
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(verdict(false, 1.0, 1000.0).tone, Tone::Yellow);
        assert_eq!(verdict(false, 1.0, 1000.01).tone, Tone::Green);
        assert_eq!(verdict(false, -1.0, 2999.99).tone, Tone::Yellow);
        assert_eq!(verdict(false, -1.0, 3000.0).tone, Tone::Red);
        assert_eq!(verdict(false, 0.0, 10.0).message, "You could have saved $10.00");
    }

    #[test]
    fn test_sort_gainers_desc_then_losers_asc() {
        let data = eth(1000.0, 0.0);
        let coins = [
            coin("A", -3.0),
            coin("B", 12.0),
            coin("C", 0.0),
            coin("D", 40.0),
            coin("E", -20.0),
        ];
        let rows = compare_all(&coins, &data);
        let order: Vec<_> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, ["D", "B", "E", "A", "C"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let data = eth(1000.0, 0.0);
        let rows = compare_all(&[coin("X", 5.0), coin("Y", 5.0)], &data);
        assert_eq!(rows[0].symbol, "X");
        assert_eq!(rows[1].symbol, "Y");
    }
}
