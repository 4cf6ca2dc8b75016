//! Error → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use whatif_common::constants::messages;
use whatif_common::{ErrorCategory, WhatIfError};

/// Handler error: a `WhatIfError` rendered as `{error, code, details}`.
#[derive(Debug)]
pub struct ApiError(pub WhatIfError);

impl From<WhatIfError> for ApiError {
    fn from(e: WhatIfError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    /// Upstream and internal failures are logged in full but only
    /// summarized to clients.
    pub fn public_message(&self) -> String {
        match self.0.category() {
            ErrorCategory::Provider | ErrorCategory::Network | ErrorCategory::System => {
                messages::DEFAULT_ERROR.to_string()
            }
            _ => self.0.user_message(),
        }
    }

    pub fn public_details(&self) -> String {
        match &self.0 {
            WhatIfError::Provider { provider, .. } => format!("{provider} request failed"),
            WhatIfError::RateLimited(_) => "upstream rate limit exceeded".to_string(),
            WhatIfError::Network(_) => "upstream request failed".to_string(),
            WhatIfError::Config(_) | WhatIfError::Other(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match (&self.0, self.0.category()) {
            (_, ErrorCategory::Validation) => StatusCode::BAD_REQUEST,
            (WhatIfError::NotConfigured(_), _) => StatusCode::SERVICE_UNAVAILABLE,
            (_, ErrorCategory::Provider | ErrorCategory::Network) => StatusCode::BAD_GATEWAY,
            (_, ErrorCategory::Config | ErrorCategory::System) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), "{}", self.0);
        } else {
            warn!(code = self.0.code(), "{}", self.0);
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.0.code(),
            "details": self.public_details(),
        });
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
