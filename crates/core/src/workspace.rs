use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use whatif_types::config::AppConfig;

/// Dotfolder name under `$HOME`.
const DOTFOLDER: &str = ".eth-whatif";

const CONFIG_FILE: &str = "config.toml";

/// Resolve the root path: `$HOME/.eth-whatif/`.
pub fn root_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DOTFOLDER))
}

/// Path of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(root_dir()?.join(CONFIG_FILE))
}

/// Ensure `$HOME/.eth-whatif/config.toml` exists. Idempotent.
pub fn init_workspace() -> Result<()> {
    init_workspace_at(&root_dir()?)
}

pub fn load_config() -> Result<AppConfig> {
    load_config_at(&root_dir()?)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_at(&root_dir()?, config)
}

/// Create `root` and seed `config.toml` with defaults if absent.
pub fn init_workspace_at(root: &Path) -> Result<()> {
    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create directory: {}", root.display()))?;
        info!("created directory: {}", root.display());
    }

    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        save_config_at(root, &AppConfig::default())?;
        info!("created default config: {}", config_path.display());
    }
    Ok(())
}

/// Load the config under `root`. Missing sections and fields take their
/// defaults. A file that no longer parses (wrong types, invalid TOML) is
/// rewritten with defaults, keeping `client.api_url` and `general.verbose`
/// when they can still be read.
pub fn load_config_at(root: &Path) -> Result<AppConfig> {
    let config_path = root.join(CONFIG_FILE);
    let raw = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    match AppConfig::from_toml_str(&raw) {
        Ok(config) => Ok(config),
        Err(_) => {
            info!("config.toml outdated, migrating to new schema");
            let mut new_config = AppConfig::default();

            if let Ok(old) = raw.parse::<toml::Table>() {
                if let Some(client) = old.get("client").and_then(|v| v.as_table()) {
                    if let Some(url) = client.get("api_url").and_then(|v| v.as_str()) {
                        new_config.client.api_url = url.to_string();
                    }
                }
                if let Some(general) = old.get("general").and_then(|v| v.as_table()) {
                    if let Some(verbose) = general.get("verbose").and_then(|v| v.as_bool()) {
                        new_config.general.verbose = verbose;
                    }
                }
            }

            save_config_at(root, &new_config)?;
            info!("config migrated successfully");
            Ok(new_config)
        }
    }
}

pub fn save_config_at(root: &Path, config: &AppConfig) -> Result<()> {
    let config_path = root.join(CONFIG_FILE);
    let toml_str = config
        .to_toml_string()
        .context("Failed to serialize config")?;
    fs::write(&config_path, &toml_str)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}
