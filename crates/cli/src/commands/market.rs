//! `whatif balance | price | top-coins` — raw gateway data.
//!
//! These call the eth-whatif gateway, which proxies to Alchemy and
//! CoinGecko. Requires `whatif-server` to be running.

use anyhow::Result;
use whatif_core::address::normalize_address;
use whatif_utils::format::format_eth;
use whatif_utils::output::{render, render_json_or, OutputFormat};

/// `whatif balance <ADDRESS> [--details]`
pub async fn balance(address: &str, details: bool, fmt: OutputFormat) -> Result<()> {
    let address = normalize_address(address)?;
    let client = super::backend()?;

    if details {
        let data = client.balance_details(&address).await?;
        render(fmt, &data)?;
        return Ok(());
    }

    let eth = client.balance(&address).await?;
    if !render_json_or(fmt, &eth)? {
        println!("{address} held {} one month ago", format_eth(eth));
    }
    Ok(())
}

/// `whatif price`
pub async fn price(fmt: OutputFormat) -> Result<()> {
    let data = super::backend()?.eth_price().await?;
    render(fmt, &data)?;
    Ok(())
}

/// `whatif top-coins`
pub async fn top_coins(fmt: OutputFormat) -> Result<()> {
    let data = super::backend()?.top_coins().await?;
    render(fmt, &data)?;
    Ok(())
}
