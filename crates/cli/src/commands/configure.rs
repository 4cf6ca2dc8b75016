use anyhow::{bail, Result};
use whatif_utils::output::{render_json_or, OutputFormat};

/// `whatif configure show` — display current config.
pub fn show(fmt: OutputFormat) -> Result<()> {
    let config = whatif_core::workspace::load_config()?;

    if !render_json_or(fmt, &config)? {
        let path = whatif_core::workspace::config_path()?;
        println!("# {}", path.display());
        print!("{}", config.to_toml_string()?);
        println!();
        println!("Tip: Edit settings with `whatif configure api-url` or `whatif configure verbose`.");
    }
    Ok(())
}

/// `whatif configure api-url <URL>`
pub fn set_api_url(raw: &str) -> Result<()> {
    let url = parse_api_url(raw)?;
    let mut config = whatif_core::workspace::load_config()?;
    config.client.api_url = url.clone();
    whatif_core::workspace::save_config(&config)?;
    println!("✓ api_url = {url}");
    Ok(())
}

/// `whatif configure verbose <true|false>`
pub fn set_verbose(enabled: bool) -> Result<()> {
    let mut config = whatif_core::workspace::load_config()?;
    config.general.verbose = enabled;
    whatif_core::workspace::save_config(&config)?;
    println!("✓ verbose = {enabled}");
    Ok(())
}

fn parse_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("Invalid API URL '{raw}': {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        bail!("Invalid API URL: '{raw}'. Expected http(s)://host[:port]");
    }
    Ok(trimmed.to_string())
}
