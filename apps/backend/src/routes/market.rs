//! Market routes.
//!
//! GET /eth-price  — `{cur, back, change}`
//! GET /top-coins  — `{symbolChangeArray: [...]}`

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use whatif_common::types::{EthPrice, TopCoins};

use super::error::ApiResult;
use crate::services::market::MarketService;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/eth-price", get(eth_price))
        .route("/top-coins", get(top_coins))
}

async fn eth_price(State(state): State<Arc<AppState>>) -> ApiResult<Json<EthPrice>> {
    let per_page = state.config.analysis.markets_per_page;
    Ok(Json(MarketService::eth_price(state.markets(), per_page).await?))
}

async fn top_coins(State(state): State<Arc<AppState>>) -> ApiResult<Json<TopCoins>> {
    let analysis = &state.config.analysis;
    let top = MarketService::top_coins(state.markets(), analysis.markets_per_page, analysis.top_n)
        .await?;
    Ok(Json(top))
}
