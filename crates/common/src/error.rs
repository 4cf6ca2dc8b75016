//! Universal error types for eth-whatif.
//!
//! Every error carries:
//! - **code**: machine-readable error code (e.g. `INVALID_ADDRESS`)
//! - **category**: error class (`validation`, `config`, `provider`, `network`, `system`)
//! - **recoverable**: whether retrying or fixing the input can help
//!
//! JSON output format:
//! ```json
//! {
//!   "code": "NO_BALANCE",
//!   "message": "This wallet has no ETH balance! ...",
//!   "category": "validation",
//!   "recoverable": true
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// Error category — determines HTTP status and CLI exit code.
///
/// Exit codes:
/// - `0`: success
/// - `1`: user error (validation, config)
/// - `2`: upstream provider or network error
/// - `3`: system error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Validation,
    Config,
    Provider,
    Network,
    System,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Validation | ErrorCategory::Config => 1,
            ErrorCategory::Provider | ErrorCategory::Network => 2,
            ErrorCategory::System => 3,
        }
    }
}

/// Structured error detail for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub category: ErrorCategory,
    pub recoverable: bool,
}

/// Top-level error type for all eth-whatif operations.
#[derive(Debug, Error)]
pub enum WhatIfError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid Ethereum address: {0}")]
    InvalidAddress(String),

    #[error("Invalid ETH amount: {0}")]
    InvalidAmount(String),

    #[error("Wallet has no ETH balance")]
    NoBalance,

    // ── Config ───────────────────────────────────────────────────────
    #[error("{0} API not configured")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ── Provider ─────────────────────────────────────────────────────
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    // ── Network ──────────────────────────────────────────────────────
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    Network(String),

    // ── System ───────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl WhatIfError {
    /// Shorthand for a provider-side failure.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        WhatIfError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            WhatIfError::InvalidAddress(_) => "INVALID_ADDRESS",
            WhatIfError::InvalidAmount(_) => "INVALID_AMOUNT",
            WhatIfError::NoBalance => "NO_BALANCE",
            WhatIfError::NotConfigured(_) => "NOT_CONFIGURED",
            WhatIfError::Config(_) => "CONFIG_ERROR",
            WhatIfError::Provider { .. } => "PROVIDER_ERROR",
            WhatIfError::AssetNotFound(_) => "ASSET_NOT_FOUND",
            WhatIfError::RateLimited(_) => "RATE_LIMITED",
            WhatIfError::Network(_) => "NETWORK_ERROR",
            WhatIfError::Other(_) => "INTERNAL_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WhatIfError::InvalidAddress(_)
            | WhatIfError::InvalidAmount(_)
            | WhatIfError::NoBalance => ErrorCategory::Validation,
            WhatIfError::NotConfigured(_) | WhatIfError::Config(_) => ErrorCategory::Config,
            WhatIfError::Provider { .. } | WhatIfError::AssetNotFound(_) => {
                ErrorCategory::Provider
            }
            WhatIfError::RateLimited(_) | WhatIfError::Network(_) => ErrorCategory::Network,
            WhatIfError::Other(_) => ErrorCategory::System,
        }
    }

    /// Whether the caller can reasonably retry or correct the request.
    pub fn recoverable(&self) -> bool {
        !matches!(self, WhatIfError::Config(_) | WhatIfError::Other(_))
    }

    /// The message shown to end users. Validation errors use the
    /// friendly form copy; everything else falls back to `Display`.
    pub fn user_message(&self) -> String {
        use crate::constants::messages;
        match self {
            WhatIfError::InvalidAddress(_) => messages::INVALID_ADDRESS.to_string(),
            WhatIfError::InvalidAmount(_) => messages::INVALID_AMOUNT.to_string(),
            WhatIfError::NoBalance => messages::NO_BALANCE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code().to_string(),
            message: self.user_message(),
            category: self.category(),
            recoverable: self.recoverable(),
        }
    }
}

impl From<reqwest::Error> for WhatIfError {
    /// The request URL is dropped: provider keys travel in URL paths.
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.status().map(|s| s.as_u16()) == Some(429) {
            WhatIfError::RateLimited(e.to_string())
        } else if e.is_decode() {
            WhatIfError::provider("upstream", format!("unexpected response body: {e}"))
        } else {
            WhatIfError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WhatIfError {
    fn from(e: serde_json::Error) -> Self {
        WhatIfError::Other(format!("JSON error: {e}"))
    }
}

pub type WhatIfResult<T> = Result<T, WhatIfError>;
