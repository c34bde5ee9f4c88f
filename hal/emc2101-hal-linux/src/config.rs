//! TOML configuration files
//!
//! ```toml
//! dac_mode = false
//! conversion_rate = "hz4"
//! lut_hysteresis = 4
//! minimum_rpm = 500
//! fan_curve = [
//!     { temperature = 30, speed = 16 },
//!     { temperature = 50, speed = 40 },
//!     { temperature = 70, speed = 63 },
//! ]
//! ```
//!
//! Every key is optional; missing keys take the chip's power-on values.

use std::fs;
use std::path::Path;

use emc2101::Emc2101Config;
use thiserror::Error;

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML or a value is out of range
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse a configuration from TOML text
pub fn parse_config(input: &str) -> Result<Emc2101Config, ConfigError> {
    Ok(toml::from_str(input)?)
}

/// Read and parse a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<Emc2101Config, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}
