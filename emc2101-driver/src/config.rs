//! Driver configuration
//!
//! A complete, declarative description of how the chip should be set up.
//! Stored as TOML on hosts (see `emc2101-hal-linux`) and applied in one
//! call with [`Emc2101::apply`].

use emc2101_hal::I2cBus;
use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::device::Emc2101;
use crate::error::Error;
use crate::lut::{LutEntry, LUT_LEN};
use crate::temperature::ConversionRate;

/// Power-on LUT hysteresis (°C)
pub const DEFAULT_LUT_HYSTERESIS: u8 = 4;

/// EMC2101 setup
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Emc2101Config {
    /// DAC (analog) fan output instead of PWM
    pub dac_mode: bool,
    /// Temperature conversion rate
    pub conversion_rate: ConversionRate,
    /// LUT hysteresis in °C
    pub lut_hysteresis: u8,
    /// Fan curve; empty leaves the LUT alone
    pub fan_curve: Vec<LutEntry, LUT_LEN>,
    /// Tach alarm threshold
    pub minimum_rpm: Option<u32>,
    /// Alert mask register
    pub alert_mask: Option<u8>,
    /// Internal temperature high limit in °C
    pub internal_high_limit: Option<u8>,
}

impl Default for Emc2101Config {
    fn default() -> Self {
        Self {
            dac_mode: false,
            conversion_rate: ConversionRate::default(),
            lut_hysteresis: DEFAULT_LUT_HYSTERESIS,
            fan_curve: Vec::new(),
            minimum_rpm: None,
            alert_mask: None,
            internal_high_limit: None,
        }
    }
}

impl Emc2101Config {
    /// Create a config with power-on defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fan curve (entries beyond the LUT size are rejected)
    pub fn with_fan_curve(mut self, entries: &[LutEntry]) -> Result<Self, usize> {
        self.fan_curve = Vec::from_slice(entries).map_err(|_| entries.len())?;
        Ok(self)
    }
}

impl<B: I2cBus> Emc2101<B> {
    /// Write every setting in `config` to the chip
    ///
    /// Settings are written in field order; on error the chip holds the
    /// settings written so far.
    pub fn apply(&mut self, config: &Emc2101Config) -> Result<(), Error<B::Error>> {
        self.set_dac_mode(config.dac_mode)?;
        self.set_conversion_rate(config.conversion_rate)?;
        self.set_lut_hysteresis(config.lut_hysteresis)?;
        if !config.fan_curve.is_empty() {
            self.program_fan_curve(&config.fan_curve)?;
        }
        if let Some(rpm) = config.minimum_rpm {
            self.set_minimum_rpm(rpm)?;
        }
        if let Some(mask) = config.alert_mask {
            self.set_alert_mask(mask)?;
        }
        if let Some(limit) = config.internal_high_limit {
            self.set_internal_high_limit(limit)?;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("emc2101: configuration applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutOfRange;
    use crate::fake_bus::FakeBus;

    #[test]
    fn test_defaults_match_power_on() {
        let config = Emc2101Config::new();
        assert!(!config.dac_mode);
        assert_eq!(config.conversion_rate, ConversionRate::Hz16);
        assert_eq!(config.lut_hysteresis, 4);
        assert!(config.fan_curve.is_empty());
    }

    #[test]
    fn test_with_fan_curve_capacity() {
        let entries = [LutEntry::new(30, 20).unwrap(); 9];
        let config = Emc2101Config::new().with_fan_curve(&entries[..8]).unwrap();
        assert_eq!(config.fan_curve.len(), 8);
        assert_eq!(Emc2101Config::new().with_fan_curve(&entries), Err(9));
    }

    #[test]
    fn test_apply_defaults_leave_lut_alone() {
        let mut bus = FakeBus::emc2101();

        let mut dev = Emc2101::new(&mut bus);
        dev.apply(&Emc2101Config::default()).unwrap();

        assert!(!bus.writes().any(|(reg, _)| (0x50..=0x5F).contains(&reg)));
        assert_eq!(bus.regs[0x04], 0x08);
        assert_eq!(bus.regs[0x4F], 4);
    }

    #[test]
    fn test_apply_full_config() {
        let mut bus = FakeBus::emc2101();
        let curve = [
            LutEntry::new(30, 16).unwrap(),
            LutEntry::new(50, 40).unwrap(),
            LutEntry::new(70, 63).unwrap(),
        ];
        let config = Emc2101Config {
            dac_mode: true,
            conversion_rate: ConversionRate::Hz4,
            lut_hysteresis: 2,
            minimum_rpm: Some(700),
            alert_mask: Some(0x01),
            internal_high_limit: Some(80),
            ..Emc2101Config::default()
        }
        .with_fan_curve(&curve)
        .unwrap();

        let mut dev = Emc2101::new(&mut bus);
        dev.apply(&config).unwrap();
        assert!(dev.dac_mode_enabled().unwrap());
        assert!(dev.lut_enabled().unwrap());
        assert_eq!(&dev.fan_lookup_table().unwrap()[..3], &curve);
        assert_eq!(dev.tach_limit(), Ok(7714));

        assert_eq!(bus.regs[0x04], 0x06);
        assert_eq!(bus.regs[0x4F], 2);
        assert_eq!(bus.regs[0x16], 0x01);
        assert_eq!(bus.regs[0x05], 80);
    }

    #[test]
    fn test_apply_rejects_bad_hysteresis() {
        let mut bus = FakeBus::emc2101();
        let config = Emc2101Config {
            lut_hysteresis: 40,
            ..Emc2101Config::default()
        };

        let mut dev = Emc2101::new(&mut bus);
        assert_eq!(
            dev.apply(&config),
            Err(Error::OutOfRange(OutOfRange { value: 40, max: 31 }))
        );
    }
}
