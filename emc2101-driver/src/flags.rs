//! Configuration and status flag types

use crate::registers::{config, status};

/// One bit of the configuration register (0x03)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigFlag {
    /// Mask the ALERT pin
    AlertMask,
    /// Put the temperature monitor in standby
    Standby,
    /// Stop the fan driver while in standby
    FanStandby,
    /// DAC (analog) fan output instead of PWM
    Dac,
    /// Disable the SMBus timeout
    DisableTimeout,
    /// Use the TACH pin as a second ALERT
    AltTach,
    /// Tcrit limit can be changed
    TcritOverride,
    /// Require consecutive out-of-limit conversions before alerting
    AlertQueue,
}

impl ConfigFlag {
    /// All flags, MSB first
    pub const ALL: [ConfigFlag; 8] = [
        ConfigFlag::AlertMask,
        ConfigFlag::Standby,
        ConfigFlag::FanStandby,
        ConfigFlag::Dac,
        ConfigFlag::DisableTimeout,
        ConfigFlag::AltTach,
        ConfigFlag::TcritOverride,
        ConfigFlag::AlertQueue,
    ];

    /// Bit in the configuration register
    pub const fn mask(self) -> u8 {
        match self {
            ConfigFlag::AlertMask => config::MASK,
            ConfigFlag::Standby => config::STANDBY,
            ConfigFlag::FanStandby => config::FAN_STANDBY,
            ConfigFlag::Dac => config::DAC,
            ConfigFlag::DisableTimeout => config::DIS_TO,
            ConfigFlag::AltTach => config::ALT_TACH,
            ConfigFlag::TcritOverride => config::TCRIT_OVR,
            ConfigFlag::AlertQueue => config::QUEUE,
        }
    }
}

/// Parsed configuration register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigFlags {
    pub alert_masked: bool,
    pub standby: bool,
    pub fan_standby: bool,
    pub dac: bool,
    pub timeout_disabled: bool,
    pub alt_tach: bool,
    pub tcrit_override: bool,
    pub alert_queue: bool,
}

impl ConfigFlags {
    /// Parse from raw register value
    pub fn from_register(value: u8) -> Self {
        Self {
            alert_masked: value & config::MASK != 0,
            standby: value & config::STANDBY != 0,
            fan_standby: value & config::FAN_STANDBY != 0,
            dac: value & config::DAC != 0,
            timeout_disabled: value & config::DIS_TO != 0,
            alt_tach: value & config::ALT_TACH != 0,
            tcrit_override: value & config::TCRIT_OVR != 0,
            alert_queue: value & config::QUEUE != 0,
        }
    }

    /// Raw register value
    pub fn bits(&self) -> u8 {
        ConfigFlag::ALL
            .iter()
            .filter(|flag| self.get(**flag))
            .fold(0, |acc, flag| acc | flag.mask())
    }

    /// Value of one flag
    pub fn get(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::AlertMask => self.alert_masked,
            ConfigFlag::Standby => self.standby,
            ConfigFlag::FanStandby => self.fan_standby,
            ConfigFlag::Dac => self.dac,
            ConfigFlag::DisableTimeout => self.timeout_disabled,
            ConfigFlag::AltTach => self.alt_tach,
            ConfigFlag::TcritOverride => self.tcrit_override,
            ConfigFlag::AlertQueue => self.alert_queue,
        }
    }
}

/// Parsed status register (0x02)
///
/// Alarm bits clear when the register is read, so one read is one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags {
    /// ADC conversion in progress
    pub busy: bool,
    /// Internal temperature above its high limit
    pub internal_high: bool,
    /// EEPROM could not be loaded at power-up
    pub eeprom_error: bool,
    /// External temperature above its high limit
    pub external_high: bool,
    /// External temperature below its low limit
    pub external_low: bool,
    /// External diode open or shorted
    pub diode_fault: bool,
    /// External temperature at or above Tcrit
    pub tcrit: bool,
    /// Tach count above the tach limit (fan too slow)
    pub tach: bool,
}

impl StatusFlags {
    /// Parse from raw register value
    pub fn from_register(value: u8) -> Self {
        Self {
            busy: value & status::BUSY != 0,
            internal_high: value & status::INTHIGH != 0,
            eeprom_error: value & status::EEPROM != 0,
            external_high: value & status::EXTHIGH != 0,
            external_low: value & status::EXTLOW != 0,
            diode_fault: value & status::FAULT != 0,
            tcrit: value & status::TCRIT != 0,
            tach: value & status::TACH != 0,
        }
    }

    /// Raw register value
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        for (set, mask) in [
            (self.busy, status::BUSY),
            (self.internal_high, status::INTHIGH),
            (self.eeprom_error, status::EEPROM),
            (self.external_high, status::EXTHIGH),
            (self.external_low, status::EXTLOW),
            (self.diode_fault, status::FAULT),
            (self.tcrit, status::TCRIT),
            (self.tach, status::TACH),
        ] {
            if set {
                bits |= mask;
            }
        }
        bits
    }

    /// Any condition that asserts ALERT
    pub fn is_alert(&self) -> bool {
        self.bits() & status::ALERT != 0
    }

    /// Check if any fault condition is present
    pub fn has_fault(&self) -> bool {
        self.diode_fault || self.tcrit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_masks_cover_byte() {
        let all = ConfigFlag::ALL.iter().fold(0u8, |acc, f| acc | f.mask());
        assert_eq!(all, 0xFF);
        assert_eq!(ConfigFlag::Dac.mask(), 0x10);
        assert_eq!(ConfigFlag::AlertMask.mask(), 0x80);
        assert_eq!(ConfigFlag::AlertQueue.mask(), 0x01);
    }

    #[test]
    fn test_config_round_trip() {
        for value in 0..=255u8 {
            assert_eq!(ConfigFlags::from_register(value).bits(), value);
        }
        let flags = ConfigFlags::from_register(0x50);
        assert!(flags.standby);
        assert!(flags.dac);
        assert!(flags.get(ConfigFlag::Dac));
        assert!(!flags.get(ConfigFlag::FanStandby));
    }

    #[test]
    fn test_status_round_trip() {
        for value in 0..=255u8 {
            assert_eq!(StatusFlags::from_register(value).bits(), value);
        }
    }

    #[test]
    fn test_alert_excludes_busy_and_eeprom() {
        assert_eq!(status::ALERT, 0x5F);
        assert!(!StatusFlags::from_register(status::BUSY | status::EEPROM).is_alert());
        assert!(StatusFlags::from_register(status::TACH).is_alert());
        assert!(StatusFlags::from_register(status::INTHIGH).is_alert());
    }

    #[test]
    fn test_fault() {
        let flags = StatusFlags::from_register(status::FAULT);
        assert!(flags.diode_fault);
        assert!(flags.has_fault());
        assert!(!StatusFlags::from_register(status::EXTLOW).has_fault());
    }
}
