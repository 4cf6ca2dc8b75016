mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use whatif_common::WhatIfError;
use whatif_utils::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "whatif",
    about = "eth-whatif — what if you had swapped your ETH a month ago?\nCompares holding ETH against the month's best-performing native coins.",
    version,
    propagate_version = true
)]
struct Cli {
    #[arg(long, short = 'o', global = true, default_value = "table")]
    output: CliOutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat { Table, Json, JsonPretty }

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> OutputFormat {
        match f {
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  TOP-LEVEL
// ═══════════════════════════════════════════════════════════════════════

#[derive(Subcommand)]
enum Commands {
    // ── ANALYSIS ────────────────────────────────────────────────

    /// Compare a wallet's month-ago ETH (or a typed-in amount) against the top native coins.
    Analyze {
        /// Wallet address to look up.
        #[arg(required_unless_present = "eth", conflicts_with = "eth")]
        address: Option<String>,
        /// Use this ETH amount instead of a wallet balance.
        #[arg(long)]
        eth: Option<String>,
    },

    // ── MARKET DATA ─────────────────────────────────────────────

    /// ETH balance of a wallet one month ago.
    Balance {
        address: String,
        /// Include the block and how it was chosen.
        #[arg(long)]
        details: bool,
    },

    /// Current ETH price, 30-day change and implied month-ago price.
    Price,

    /// Best 30-day performers among native coins.
    TopCoins,

    // ── SYSTEM ──────────────────────────────────────────────────

    /// Show or change the CLI configuration.
    Configure {
        #[command(subcommand)]
        action: ConfigureAction,
    },

    /// Check config and gateway reachability.
    Doctor,
}

#[derive(Subcommand)]
enum ConfigureAction {
    /// Show current configuration.
    Show,
    /// Set the gateway URL.
    ApiUrl { url: String },
    /// Toggle verbose logging.
    Verbose { enabled: bool },
}

// ═══════════════════════════════════════════════════════════════════════
//  ENTRYPOINT
// ═══════════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let fmt: OutputFormat = cli.output.into();

    let verbose = whatif_core::init_workspace()
        .and_then(|_| whatif_core::workspace::load_config())
        .map(|c| c.general.verbose)
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command, fmt).await {
        std::process::exit(report_error(&e, fmt));
    }
}

async fn run(command: Commands, fmt: OutputFormat) -> Result<()> {
    match command {
        Commands::Analyze { address, eth } => commands::analyze::run(address, eth, fmt).await,

        Commands::Balance { address, details } => {
            commands::market::balance(&address, details, fmt).await
        }
        Commands::Price => commands::market::price(fmt).await,
        Commands::TopCoins => commands::market::top_coins(fmt).await,

        Commands::Configure { action } => match action {
            ConfigureAction::Show => commands::configure::show(fmt),
            ConfigureAction::ApiUrl { url } => commands::configure::set_api_url(&url),
            ConfigureAction::Verbose { enabled } => commands::configure::set_verbose(enabled),
        },

        Commands::Doctor => commands::doctor::run(fmt).await,
    }
}

/// Print the error in the requested format and return the exit code.
fn report_error(e: &anyhow::Error, fmt: OutputFormat) -> i32 {
    let Some(err) = e.downcast_ref::<WhatIfError>() else {
        eprintln!("✗ {e:#}");
        return 1;
    };

    match fmt {
        OutputFormat::Table => {
            eprintln!("✗ {}", err.user_message());
            if err.category() != whatif_common::ErrorCategory::Validation {
                eprintln!("  {err}");
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let detail = serde_json::json!({ "error": err.detail() });
            println!("{detail}");
        }
    }
    err.category().exit_code()
}
