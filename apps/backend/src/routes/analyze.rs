//! GET /analyze?address=0x…  or  GET /analyze?eth=1.5

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use whatif_common::WhatIfError;
use whatif_core::{AnalysisInput, Analyzer};
use whatif_types::output::AnalysisReport;

use super::error::ApiResult;
use crate::services::gateway::GatewaySource;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    address: Option<String>,
    /// Manual ETH amount; wins over `address` when both are given.
    eth: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", get(analyze))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyzeQuery>,
) -> ApiResult<Json<AnalysisReport>> {
    let input = match (query.address, query.eth) {
        (_, Some(eth)) => AnalysisInput::Manual(eth),
        (Some(address), None) => AnalysisInput::Wallet(address),
        (None, None) => return Err(WhatIfError::InvalidAddress(String::new()).into()),
    };

    let source = GatewaySource::new(&state);
    Ok(Json(Analyzer::run(&source, &input).await?))
}
