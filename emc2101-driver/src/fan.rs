//! Fan control and tachometer
//!
//! The fan output is driven either directly from FAN_SETTING or, with the
//! lookup table enabled, from the LUT indexed by the external temperature.
//! The chip only accepts LUT and FAN_SETTING writes while the LUT is
//! disabled (PROG set), which is why [`Emc2101::program_fan_curve`] brackets
//! the table write with a disable/enable pair.

use emc2101_hal::I2cBus;

use crate::device::Emc2101;
use crate::error::{Error, OutOfRange};
use crate::lut::{FanLookupTable, LutEntry, LUT_LEN, MAX_LUT_SPEED};
use crate::registers::{fan_config, reg};
use crate::tach::{self, FanSpeed, TACH_MASK};

/// Largest LUT hysteresis (°C)
pub const MAX_LUT_HYSTERESIS: u8 = 0x1F;

/// Largest PWM frequency setting (5-bit)
pub const MAX_PWM_FREQ: u8 = 0x1F;

impl<B: I2cBus> Emc2101<B> {
    // --- Lookup table ---

    /// Read all eight LUT entries in table order
    pub fn fan_lookup_table(&mut self) -> Result<FanLookupTable, Error<B::Error>> {
        let mut table = [LutEntry::default(); LUT_LEN];
        for (index, entry) in table.iter_mut().enumerate() {
            let (temperature, speed) = self.regs.read_lut_slot(index)?;
            *entry = LutEntry::from_registers(temperature, speed);
        }
        Ok(table)
    }

    /// Write entries to LUT slots 0.. in order
    ///
    /// Slots past `entries.len()` keep whatever they held before; write all
    /// eight for a well-defined curve. The LUT must be disabled for the chip
    /// to accept the writes.
    pub fn set_fan_lookup_table(&mut self, entries: &[LutEntry]) -> Result<(), Error<B::Error>> {
        if entries.len() > LUT_LEN {
            return Err(Error::LutTooLong(entries.len()));
        }
        for (index, entry) in entries.iter().enumerate() {
            self.regs
                .write_lut_slot(index, entry.temperature(), entry.speed())?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("emc2101: wrote {=usize} LUT entries", entries.len());
        Ok(())
    }

    /// Disable the LUT, write `entries`, then enable the LUT
    ///
    /// If a write fails the LUT stays disabled and the fan keeps running
    /// from FAN_SETTING.
    pub fn program_fan_curve(&mut self, entries: &[LutEntry]) -> Result<(), Error<B::Error>> {
        if entries.len() > LUT_LEN {
            return Err(Error::LutTooLong(entries.len()));
        }
        self.set_lut_enabled(false)?;
        self.set_fan_lookup_table(entries)?;
        self.set_lut_enabled(true)
    }

    /// Fan output follows the lookup table
    pub fn lut_enabled(&mut self) -> Result<bool, Error<B::Error>> {
        self.regs
            .read_bit(reg::FAN_CONFIG, fan_config::PROG)
            .map(|prog| !prog)
    }

    /// Switch between LUT control (true) and FAN_SETTING (false)
    pub fn set_lut_enabled(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.regs
            .write_masked_bit(reg::FAN_CONFIG, fan_config::PROG, !enabled)
    }

    /// LUT hysteresis in °C
    pub fn lut_hysteresis(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::LUT_HYSTERESIS)
    }

    /// Set the LUT hysteresis (0..=31 °C)
    pub fn set_lut_hysteresis(&mut self, degrees: u8) -> Result<(), Error<B::Error>> {
        OutOfRange::check(degrees.into(), MAX_LUT_HYSTERESIS.into())?;
        self.regs.write_register(reg::LUT_HYSTERESIS, degrees)
    }

    // --- Direct fan control ---

    /// Current fan setting (0..=63)
    pub fn fan_setting(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs
            .read_register(reg::FAN_SETTING)
            .map(|v| v & MAX_LUT_SPEED)
    }

    /// Set the fan setting (0..=63); only effective with the LUT disabled
    pub fn set_fan_setting(&mut self, setting: u8) -> Result<(), Error<B::Error>> {
        OutOfRange::check(setting.into(), MAX_LUT_SPEED.into())?;
        self.regs.write_register(reg::FAN_SETTING, setting)
    }

    /// Fan loop driven from the forced temperature register
    pub fn forced_temperature_enabled(&mut self) -> Result<bool, Error<B::Error>> {
        self.regs.read_bit(reg::FAN_CONFIG, fan_config::FORCE)
    }

    pub fn set_forced_temperature_enabled(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.regs
            .write_masked_bit(reg::FAN_CONFIG, fan_config::FORCE, enabled)
    }

    /// Forced temperature in whole °C
    pub fn forced_temperature(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::TEMP_FORCE)
    }

    /// Set the forced temperature (0..=127 °C)
    pub fn set_forced_temperature(&mut self, degrees: u8) -> Result<(), Error<B::Error>> {
        OutOfRange::check(degrees.into(), crate::lut::MAX_LUT_TEMP.into())?;
        self.regs.write_register(reg::TEMP_FORCE, degrees)
    }

    /// Fan output polarity inverted
    pub fn invert_fan_output(&mut self) -> Result<bool, Error<B::Error>> {
        self.regs.read_bit(reg::FAN_CONFIG, fan_config::POLARITY)
    }

    pub fn set_invert_fan_output(&mut self, inverted: bool) -> Result<(), Error<B::Error>> {
        self.regs
            .write_masked_bit(reg::FAN_CONFIG, fan_config::POLARITY, inverted)
    }

    /// PWM frequency setting (0..=31)
    pub fn pwm_frequency(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs
            .read_register(reg::PWM_FREQ)
            .map(|v| v & MAX_PWM_FREQ)
    }

    pub fn set_pwm_frequency(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        OutOfRange::check(value.into(), MAX_PWM_FREQ.into())?;
        self.regs.write_register(reg::PWM_FREQ, value)
    }

    /// PWM frequency divider
    pub fn pwm_divider(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_register(reg::PWM_FREQ_DIV)
    }

    pub fn set_pwm_divider(&mut self, divider: u8) -> Result<(), Error<B::Error>> {
        self.regs.write_register(reg::PWM_FREQ_DIV, divider)
    }

    // --- Tachometer ---

    /// Raw tach count (13 bits)
    pub fn tach_count(&mut self) -> Result<u16, Error<B::Error>> {
        self.regs
            .read_composite16(reg::TACH_MSB, reg::TACH_LSB)
            .map(|raw| raw & TACH_MASK)
    }

    /// Fan speed, or [`FanSpeed::Stalled`] when the counter saturated
    pub fn fan_speed(&mut self) -> Result<FanSpeed, Error<B::Error>> {
        self.tach_count().map(FanSpeed::from_count)
    }

    /// Fan speed in RPM, `None` when stalled
    pub fn fan_speed_rpm(&mut self) -> Result<Option<u32>, Error<B::Error>> {
        self.fan_speed().map(FanSpeed::rpm)
    }

    /// Tach limit count (TACH alarm fires when the count exceeds it)
    pub fn tach_limit(&mut self) -> Result<u16, Error<B::Error>> {
        self.regs
            .read_composite16(reg::TACH_LIMIT_MSB, reg::TACH_LIMIT_LSB)
            .map(|raw| raw & TACH_MASK)
    }

    /// Set the tach limit from a minimum RPM
    pub fn set_minimum_rpm(&mut self, rpm: u32) -> Result<(), Error<B::Error>> {
        self.regs.write_composite16(
            reg::TACH_LIMIT_MSB,
            reg::TACH_LIMIT_LSB,
            tach::rpm_to_count(rpm),
        )
    }
}
