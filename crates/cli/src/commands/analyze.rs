//! `whatif analyze` — the full month-back comparison.

use anyhow::Result;
use whatif_common::constants::messages;
use whatif_core::{AnalysisInput, Analyzer};
use whatif_utils::output::{render, OutputFormat};

/// `whatif analyze <ADDRESS>` or `whatif analyze --eth <AMOUNT>`.
pub async fn run(address: Option<String>, eth: Option<String>, fmt: OutputFormat) -> Result<()> {
    let input = match (address, eth) {
        (_, Some(amount)) => AnalysisInput::Manual(amount),
        (Some(address), None) => AnalysisInput::Wallet(address),
        (None, None) => anyhow::bail!("Provide a wallet address or --eth <AMOUNT>"),
    };

    // Fail on bad input before touching the network.
    input.validate()?;

    let client = super::backend()?;
    if fmt == OutputFormat::Table {
        if matches!(input, AnalysisInput::Wallet(_)) {
            eprintln!("✓ {}", messages::VALID_ADDRESS);
        }
        eprintln!("⏳ {}", messages::LOADING);
    }

    let report = Analyzer::run(&client, &input).await?;
    render(fmt, &report)?;
    Ok(())
}
