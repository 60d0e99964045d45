//! TOML configuration loading
//!
//! Parses a station config file into [`StationConfig`]. Missing sections
//! and keys fall back to their defaults; the result is validated before it
//! is returned.

use super::types::{ConfigError, StationConfig};

/// Parse and validate a TOML station config
pub fn parse_config(input: &str) -> Result<StationConfig, ConfigError> {
    let config: StationConfig = ::toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}
