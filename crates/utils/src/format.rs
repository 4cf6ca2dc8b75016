//! Formatting utilities — currency, amounts, percentages.

/// Format a USD amount the way a browser's `en-US` currency formatter
/// does: thousands separators, two decimals, sign before the `$`.
///
/// `1234.5` → `$1,234.50`, `-0.25` → `-$0.25`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u128;
    let frac = (cents % 100.0) as u8;
    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

/// ETH amount with four decimals: `10.5` → `10.5000 ETH`.
pub fn format_eth(value: f64) -> String {
    format!("{value:.4} ETH")
}

/// Signed percentage with two decimals: `12.3` → `+12.30%`.
pub fn format_pct(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    format!("{value:+.2}%")
}

/// Round half away from zero to `dp` decimal places.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Truncate an EVM address for display: 0x1234...abcd
pub fn truncate_address(s: &str) -> String {
    if s.len() > 12 && s.is_ascii() {
        format!("{}...{}", &s[..6], &s[s.len() - 4..])
    } else {
        s.to_string()
    }
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
