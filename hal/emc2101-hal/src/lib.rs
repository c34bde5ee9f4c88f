//! Bus layer for the EMC2101 driver
//!
//! The driver only ever talks to an [`I2cBus`]. Hosts and microcontrollers
//! plug in underneath, either with their own implementation or through
//! [`Eh1Bus`], which accepts anything implementing `embedded_hal::i2c::I2c`.
//!
//! ```text
//!   emc2101            Emc2101 / Registers / Transport
//!      │
//!   emc2101-hal        I2cBus, I2cBusError, Eh1Bus
//!      │
//!      ├── emc2101-hal-linux   /dev/i2c-N (linux-embedded-hal)
//!      └── any embedded-hal 1.0 I2C peripheral
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{Eh1Bus, I2cBus, I2cBusError};
