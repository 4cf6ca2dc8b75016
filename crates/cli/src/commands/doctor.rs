//! `whatif doctor` — config and gateway health checks.

use std::time::Instant;

use anyhow::Result;
use tracing::debug;
use whatif_core::BackendClient;
use whatif_types::output::{DoctorCheck, DoctorOutput};
use whatif_utils::output::{render, OutputFormat};

pub async fn run(fmt: OutputFormat) -> Result<()> {
    let mut checks = Vec::new();

    // ── Check 1: Config integrity ───────────────────────────────
    let config = whatif_core::workspace::load_config();
    checks.push(match &config {
        Ok(_) => DoctorCheck {
            name: "Config".into(),
            ok: true,
            detail: whatif_core::workspace::config_path()?.display().to_string(),
        },
        Err(e) => DoctorCheck {
            name: "Config".into(),
            ok: false,
            detail: format!("{e:#}"),
        },
    });

    // ── Check 2: Gateway reachability ───────────────────────────
    if let Ok(config) = &config {
        let client = BackendClient::new(
            &config.client.api_url,
            std::time::Duration::from_secs(config.client.timeout_secs),
        )?;
        let start = Instant::now();
        let ok = client.health().await;
        let ms = start.elapsed().as_millis() as u64;
        debug!(url = client.base_url(), ok, ms, "gateway health probe");

        checks.push(DoctorCheck {
            name: "Gateway".into(),
            ok,
            detail: if ok {
                format!("{} ({ms}ms)", client.base_url())
            } else {
                format!("{} unreachable → start it with `whatif-server`", client.base_url())
            },
        });
    }

    let output = DoctorOutput { checks };
    render(fmt, &output)?;

    if fmt == OutputFormat::Table {
        println!();
        if output.all_ok() {
            println!("✓ All systems operational.");
        } else {
            println!("Issues found. Check `whatif configure show`.");
        }
    }
    Ok(())
}
