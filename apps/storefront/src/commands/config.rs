//! # Configuration Commands

use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigState;

/// The loaded configuration as TOML. The payment key is redacted.
pub fn get_config(config: &ConfigState) -> Result<String, ApiError> {
    debug!("get_config command");
    toml::to_string_pretty(config.config())
        .map(|s| s.trim_end().to_string())
        .map_err(|e| ApiError::internal(format!("Could not render config: {}", e)))
}
