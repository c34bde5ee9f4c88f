//! EMC2101 fan controller driver
//!
//! Typed access to the SMSC/Microchip EMC2101 (and EMC2101-R) over I2C:
//!
//! - Temperatures (internal diode, external diode with fault decoding)
//! - Configuration and status flags
//! - Fan speed control (direct setting and the 8-point lookup table)
//! - Tachometer (RPM) and alarm limits
//! - Identification registers
//!
//! The driver is layered strictly downward:
//!
//! ```text
//! Emc2101 (domain properties)
//!    └── Registers (byte, bitmask, composite and LUT slot access)
//!          └── Transport (bus bound to address 0x4C)
//!                └── emc2101_hal::I2cBus
//! ```
//!
//! Nothing is cached: every getter and setter is a fresh bus transaction.
//! A handle must have a single owner; read-modify-write and two-register
//! reads are not atomic against another writer on the same device.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod device;
pub mod error;
pub mod fan;
pub mod flags;
pub mod lut;
pub mod registers;
pub mod tach;
pub mod temperature;
pub mod transport;

#[cfg(test)]
mod fake_bus;

pub use config::Emc2101Config;
pub use device::{Emc2101, Identity, Variant};
pub use emc2101_hal::{Eh1Bus, I2cBus, I2cBusError};
pub use error::{Error, OutOfRange};
pub use flags::{ConfigFlag, ConfigFlags, StatusFlags};
pub use lut::{FanLookupTable, LutEntry, LUT_LEN};
pub use registers::Registers;
pub use tach::FanSpeed;
pub use temperature::{ConversionRate, ExternalTemperature, Temperature};
pub use transport::Transport;
