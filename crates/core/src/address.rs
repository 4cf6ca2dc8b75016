//! Ethereum address validation.
//!
//! Accepts 40 hex characters with an optional `0x` prefix. All-lowercase
//! and all-uppercase inputs are accepted as-is; mixed-case inputs must
//! carry a valid EIP-55 checksum.

use std::str::FromStr;

use alloy::primitives::Address;

use whatif_common::{WhatIfError, WhatIfResult};

/// Is `s` a well-formed Ethereum address?
pub fn is_valid_address(s: &str) -> bool {
    parse_address(s).is_ok()
}

/// Parse and validate an address.
pub fn parse_address(s: &str) -> WhatIfResult<Address> {
    let trimmed = s.trim();
    let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(WhatIfError::InvalidAddress(trimmed.to_string()));
    }

    let prefixed = format!("0x{hex}");
    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(&prefixed, None)
            .map_err(|_| WhatIfError::InvalidAddress(trimmed.to_string()))
    } else {
        Address::from_str(&prefixed).map_err(|_| WhatIfError::InvalidAddress(trimmed.to_string()))
    }
}

/// Validate and return the EIP-55 checksummed form.
pub fn normalize_address(s: &str) -> WhatIfResult<String> {
    Ok(parse_address(s)?.to_checksum(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_accepts_checksummed() {
        assert!(is_valid_address(CHECKSUMMED));
    }

    #[test]
    fn test_accepts_single_case() {
        assert!(is_valid_address(&CHECKSUMMED.to_lowercase()));
        assert!(is_valid_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"));
    }

    #[test]
    fn test_accepts_missing_prefix() {
        assert!(is_valid_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
    }

    #[test]
    fn test_rejects_bad_checksum() {
        // Flip the case of one letter.
        assert!(!is_valid_address("0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("0x1234"));
        assert!(!is_valid_address("0xzzzeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_valid_address("vitalik.eth"));
    }

    #[test]
    fn test_normalize_returns_checksum() {
        let normalized = normalize_address(&CHECKSUMMED.to_lowercase()).unwrap();
        assert_eq!(normalized, CHECKSUMMED);
    }

    #[test]
    fn test_error_variant() {
        let err = parse_address("nope").unwrap_err();
        assert!(matches!(err, WhatIfError::InvalidAddress(s) if s == "nope"));
    }
}
