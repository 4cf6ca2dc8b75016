pub mod analyze;
pub mod configure;
pub mod doctor;
pub mod market;

use anyhow::Result;
use whatif_core::BackendClient;

/// Build the gateway client from the on-disk config.
pub(crate) fn backend() -> Result<BackendClient> {
    BackendClient::from_config()
}
