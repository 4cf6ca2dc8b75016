//! Balance routes.
//!
//! GET /balance/{address}          — ETH held one month ago, bare number
//! GET /balance/{address}/details  — same, with block and resolution

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use whatif_common::types::HistoricalBalance;

use super::error::ApiResult;
use crate::services::balance::BalanceService;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/balance/{address}", get(balance))
        .route("/balance/{address}/details", get(balance_details))
}

async fn balance(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<f64>> {
    let result = BalanceService::month_back(state.chain()?, &address).await?;
    Ok(Json(result.balance))
}

async fn balance_details(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<HistoricalBalance>> {
    let result = BalanceService::month_back(state.chain()?, &address).await?;
    Ok(Json(result))
}
