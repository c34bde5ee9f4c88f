//! EMC2101 device handle
//!
//! Sensor, configuration and identification properties. Fan control lives
//! in [`crate::fan`] as a second `impl` block on the same handle.

use emc2101_hal::{Eh1Bus, I2cBus};

use crate::error::{Error, OutOfRange};
use crate::flags::{ConfigFlag, ConfigFlags, StatusFlags};
use crate::registers::{reg, Registers};
use crate::temperature::{ConversionRate, ExternalTemperature, Temperature, MAX_LIMIT_DEGREES};
use crate::transport::Transport;

/// SMSC manufacturer ID
pub const MFG_ID_SMSC: u8 = 0x5D;

/// Part ID of the EMC2101
pub const PART_ID_EMC2101: u8 = 0x16;

/// Part ID of the EMC2101-R
pub const PART_ID_EMC2101R: u8 = 0x28;

/// Known part IDs
pub const KNOWN_PART_IDS: [u8; 2] = [PART_ID_EMC2101, PART_ID_EMC2101R];

/// Chip variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    Emc2101,
    Emc2101R,
}

/// Contents of the identification registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    pub manufacturer: u8,
    pub part: u8,
    pub revision: u8,
}

impl Identity {
    /// Variant from the part ID
    pub fn variant(&self) -> Option<Variant> {
        match self.part {
            PART_ID_EMC2101 => Some(Variant::Emc2101),
            PART_ID_EMC2101R => Some(Variant::Emc2101R),
            _ => None,
        }
    }

    /// Manufacturer and part both match a known EMC2101
    pub fn is_supported(&self) -> bool {
        self.manufacturer == MFG_ID_SMSC && self.variant().is_some()
    }
}

/// EMC2101 driver
///
/// Owns the bus until [`Emc2101::close`]. Every method is a live bus
/// transaction; nothing is cached.
#[derive(Debug)]
pub struct Emc2101<B> {
    pub(crate) regs: Registers<B>,
}

impl<T: embedded_hal::i2c::I2c> Emc2101<Eh1Bus<T>> {
    /// Create a driver over an `embedded-hal` 1.0 I2C bus
    pub fn from_i2c(i2c: T) -> Self {
        Self::new(Eh1Bus::new(i2c))
    }
}

impl<B: I2cBus> Emc2101<B> {
    /// Bind a bus to the EMC2101
    ///
    /// No I2C transactions occur here; use [`Emc2101::identify`] to confirm
    /// a chip is present.
    pub fn new(bus: B) -> Self {
        let transport = Transport::new(bus);
        #[cfg(feature = "defmt")]
        defmt::debug!("emc2101: bound at address {=u8:#x}", transport.address());
        Self {
            regs: Registers::new(transport),
        }
    }

    /// Release the bus
    ///
    /// The handle is consumed, so no register access can follow. Dropping
    /// the returned bus closes it on platforms where that applies.
    pub fn close(self) -> B {
        #[cfg(feature = "defmt")]
        defmt::debug!("emc2101: closed");
        self.regs.release()
    }

    /// Raw register access for registers without a typed property
    pub fn registers(&mut self) -> &mut Registers<B> {
        &mut self.regs
    }

    // --- Identification ---

    /// Manufacturer ID register (0x5D for SMSC)
    pub fn manufacturer_id(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::MFG_ID)
    }

    /// Part ID register (0x16 or 0x28)
    pub fn part_id(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::PART_ID)
    }

    /// Silicon revision register
    pub fn revision(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::REVISION)
    }

    /// Read all three identification registers
    pub fn identify(&mut self) -> Result<Identity, Error<B::Error>> {
        Ok(Identity {
            manufacturer: self.manufacturer_id()?,
            part: self.part_id()?,
            revision: self.revision()?,
        })
    }

    // --- Temperatures ---

    /// Internal diode temperature in whole °C
    pub fn internal_temperature(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::INTERNAL_TEMP)
    }

    /// External diode temperature, with diode faults decoded
    pub fn external_temperature(&mut self) -> Result<ExternalTemperature, Error<B::Error>> {
        let raw = self
            .regs
            .read_composite16(reg::EXTERNAL_TEMP_MSB, reg::EXTERNAL_TEMP_LSB)?;
        let reading = ExternalTemperature::from_composite(raw);
        #[cfg(feature = "defmt")]
        if reading.is_fault() {
            defmt::warn!("emc2101: external diode fault {}", reading);
        }
        Ok(reading)
    }

    /// Internal temperature high limit in whole °C
    pub fn internal_high_limit(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::INT_TEMP_HI_LIM)
    }

    /// Set the internal temperature high limit (0..=127 °C)
    pub fn set_internal_high_limit(&mut self, degrees: u8) -> Result<(), Error<B::Error>> {
        OutOfRange::check(degrees.into(), MAX_LIMIT_DEGREES.into())?;
        self.regs.write_register(reg::INT_TEMP_HI_LIM, degrees)
    }

    /// External temperature high limit
    pub fn external_high_limit(&mut self) -> Result<Temperature, Error<B::Error>> {
        self.regs
            .read_composite16(reg::EXT_TEMP_HI_LIM_MSB, reg::EXT_TEMP_HI_LIM_LSB)
            .map(Temperature::from_composite)
    }

    /// Set the external temperature high limit
    pub fn set_external_high_limit(&mut self, limit: Temperature) -> Result<(), Error<B::Error>> {
        self.regs.write_composite16(
            reg::EXT_TEMP_HI_LIM_MSB,
            reg::EXT_TEMP_HI_LIM_LSB,
            limit.to_composite(),
        )
    }

    /// External temperature low limit
    pub fn external_low_limit(&mut self) -> Result<Temperature, Error<B::Error>> {
        self.regs
            .read_composite16(reg::EXT_TEMP_LO_LIM_MSB, reg::EXT_TEMP_LO_LIM_LSB)
            .map(Temperature::from_composite)
    }

    /// Set the external temperature low limit
    pub fn set_external_low_limit(&mut self, limit: Temperature) -> Result<(), Error<B::Error>> {
        self.regs.write_composite16(
            reg::EXT_TEMP_LO_LIM_MSB,
            reg::EXT_TEMP_LO_LIM_LSB,
            limit.to_composite(),
        )
    }

    /// Tcrit limit in whole °C
    pub fn tcrit_limit(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::TCRIT_TEMP)
    }

    /// Set the Tcrit limit (0..=127 °C)
    ///
    /// The chip accepts this once per power cycle unless the Tcrit override
    /// flag is set.
    pub fn set_tcrit_limit(&mut self, degrees: u8) -> Result<(), Error<B::Error>> {
        OutOfRange::check(degrees.into(), MAX_LIMIT_DEGREES.into())?;
        self.regs.write_register(reg::TCRIT_TEMP, degrees)
    }

    /// Tcrit hysteresis in °C
    pub fn tcrit_hysteresis(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::TCRIT_HYST)
    }

    /// Set the Tcrit hysteresis in °C
    pub fn set_tcrit_hysteresis(&mut self, degrees: u8) -> Result<(), Error<B::Error>> {
        self.regs.write_register(reg::TCRIT_HYST, degrees)
    }

    /// Conversion rate
    pub fn conversion_rate(&mut self) -> Result<ConversionRate, Error<B::Error>> {
        self.regs
            .read_register(reg::CONVERT_RATE)
            .map(ConversionRate::from_register)
    }

    /// Set the conversion rate
    pub fn set_conversion_rate(&mut self, rate: ConversionRate) -> Result<(), Error<B::Error>> {
        self.regs.write_register(reg::CONVERT_RATE, rate.bits())
    }

    /// Start a single conversion (useful in standby)
    pub fn trigger_one_shot(&mut self) -> Result<(), Error<B::Error>> {
        self.regs.write_register(reg::ONESHOT, 0)
    }

    // --- Configuration flags ---

    /// Whole configuration register
    pub fn config(&mut self) -> Result<ConfigFlags, Error<B::Error>> {
        self.regs
            .read_register(reg::CONFIG)
            .map(ConfigFlags::from_register)
    }

    /// One configuration flag
    pub fn config_flag(&mut self, flag: ConfigFlag) -> Result<bool, Error<B::Error>> {
        self.regs.read_bit(reg::CONFIG, flag.mask())
    }

    /// Change one configuration flag, leaving the other seven untouched
    pub fn set_config_flag(&mut self, flag: ConfigFlag, enabled: bool) -> Result<(), Error<B::Error>> {
        self.regs.write_masked_bit(reg::CONFIG, flag.mask(), enabled)
    }

    /// DAC (analog) fan output enabled
    pub fn dac_mode_enabled(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::Dac)
    }

    /// Select DAC (true) or PWM (false) fan output
    pub fn set_dac_mode(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::Dac, enabled)
    }

    pub fn standby(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::Standby)
    }

    pub fn set_standby(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::Standby, enabled)
    }

    pub fn fan_standby(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::FanStandby)
    }

    pub fn set_fan_standby(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::FanStandby, enabled)
    }

    pub fn alert_masked(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::AlertMask)
    }

    pub fn set_alert_masked(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::AlertMask, enabled)
    }

    pub fn timeout_disabled(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::DisableTimeout)
    }

    pub fn set_timeout_disabled(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::DisableTimeout, enabled)
    }

    pub fn alt_tach(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::AltTach)
    }

    pub fn set_alt_tach(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::AltTach, enabled)
    }

    pub fn tcrit_override(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::TcritOverride)
    }

    pub fn set_tcrit_override(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::TcritOverride, enabled)
    }

    pub fn alert_queue(&mut self) -> Result<bool, Error<B::Error>> {
        self.config_flag(ConfigFlag::AlertQueue)
    }

    pub fn set_alert_queue(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlag::AlertQueue, enabled)
    }

    // --- Status ---

    /// Read (and thereby clear) the status register
    pub fn status(&mut self) -> Result<StatusFlags, Error<B::Error>> {
        self.regs
            .read_register(reg::STATUS)
            .map(StatusFlags::from_register)
    }

    /// Alert mask register (set bits suppress the matching status bit on ALERT)
    pub fn alert_mask(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::ALERT_MASK)
    }

    pub fn set_alert_mask(&mut self, mask: u8) -> Result<(), Error<B::Error>> {
        self.regs.write_register(reg::ALERT_MASK, mask)
    }
}
