//! i2c-dev bus
//!
//! `linux-embedded-hal` provides the `embedded-hal` 1.0 I2C implementation;
//! it is wrapped in [`Eh1Bus`] so errors arrive as [`I2cBusError`].

use std::path::{Path, PathBuf};

use emc2101::Emc2101;
use emc2101_hal::{Eh1Bus, I2cBusError};
use linux_embedded_hal::I2cdev;

/// Bus type produced by [`open`]
pub type LinuxI2cBus = Eh1Bus<I2cdev>;

/// Device node for a bus number (`/dev/i2c-<n>`)
pub fn bus_path(bus: u8) -> PathBuf {
    PathBuf::from(format!("/dev/i2c-{}", bus))
}

/// Open `/dev/i2c-<bus>` and bind an EMC2101 driver to it
///
/// Only opens the device file; no transactions happen until the first
/// property access.
pub fn open(bus: u8) -> Result<Emc2101<LinuxI2cBus>, I2cBusError> {
    open_path(bus_path(bus))
}

/// Open an i2c-dev node by path and bind an EMC2101 driver to it
pub fn open_path(path: impl AsRef<Path>) -> Result<Emc2101<LinuxI2cBus>, I2cBusError> {
    let i2c = I2cdev::new(path).map_err(|_| I2cBusError::Unavailable)?;
    Ok(Emc2101::new(Eh1Bus::new(i2c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_path() {
        assert_eq!(bus_path(1), PathBuf::from("/dev/i2c-1"));
        assert_eq!(bus_path(12), PathBuf::from("/dev/i2c-12"));
    }

    #[test]
    fn test_open_missing_bus() {
        let result = open_path("/nonexistent/i2c-bus");
        assert!(matches!(result, Err(I2cBusError::Unavailable)));
    }
}
