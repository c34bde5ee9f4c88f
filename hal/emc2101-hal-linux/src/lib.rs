//! Linux platform support for the EMC2101 driver
//!
//! Opens an i2c-dev character device and hands back a driver bound to it,
//! plus TOML loading for [`emc2101::Emc2101Config`].
//!
//! ```no_run
//! let mut fan = emc2101_hal_linux::open(1).map_err(emc2101::Error::Transport)?;
//! if fan.identify()?.is_supported() {
//!     println!("{:?}", fan.external_temperature()?);
//! }
//! emc2101_hal_linux::close(fan);
//! # Ok::<(), emc2101::Error<emc2101_hal::I2cBusError>>(())
//! ```

#![deny(unsafe_code)]

pub mod bus;
pub mod config;

pub use bus::{bus_path, open, open_path, LinuxI2cBus};
pub use config::{load_config, parse_config, ConfigError};

/// Release the bus and close the device file
pub fn close(device: emc2101::Emc2101<LinuxI2cBus>) {
    drop(device.close());
}
