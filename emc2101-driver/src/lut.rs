//! Fan lookup table
//!
//! The chip holds an 8-point curve mapping external temperature thresholds
//! to fan settings. Each point is a (7-bit temperature, 6-bit speed) pair in
//! two adjacent registers starting at 0x50. The chip walks the table in
//! index order, so entries should be sorted by temperature.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::OutOfRange;
use crate::registers::LUT_SLOT_COUNT;

/// Number of lookup table entries
pub const LUT_LEN: usize = LUT_SLOT_COUNT;

/// Largest LUT temperature (7-bit, °C)
pub const MAX_LUT_TEMP: u8 = 0x7F;

/// Largest LUT / fan setting (6-bit)
pub const MAX_LUT_SPEED: u8 = 0x3F;

/// Full table as read back from the chip
pub type FanLookupTable = [LutEntry; LUT_LEN];

/// One (temperature, speed) point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawLutEntry", into = "RawLutEntry")
)]
pub struct LutEntry {
    temperature: u8,
    speed: u8,
}

impl LutEntry {
    /// Create an entry, rejecting values wider than the register fields
    pub fn new(temperature: u8, speed: u8) -> Result<Self, OutOfRange> {
        OutOfRange::check(temperature.into(), MAX_LUT_TEMP.into())?;
        OutOfRange::check(speed.into(), MAX_LUT_SPEED.into())?;
        Ok(Self { temperature, speed })
    }

    /// Build from register contents, dropping bits outside the fields
    pub(crate) const fn from_registers(temperature: u8, speed: u8) -> Self {
        Self {
            temperature: temperature & MAX_LUT_TEMP,
            speed: speed & MAX_LUT_SPEED,
        }
    }

    /// Threshold in whole °C
    pub const fn temperature(self) -> u8 {
        self.temperature
    }

    /// Fan setting applied at and above the threshold
    pub const fn speed(self) -> u8 {
        self.speed
    }

    /// Speed as a percentage of full scale
    pub fn speed_percent(self) -> u8 {
        (u16::from(self.speed) * 100 / u16::from(MAX_LUT_SPEED)) as u8
    }
}

/// Unvalidated entry, as it appears in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawLutEntry {
    pub temperature: u8,
    pub speed: u8,
}

impl TryFrom<RawLutEntry> for LutEntry {
    type Error = OutOfRange;

    fn try_from(raw: RawLutEntry) -> Result<Self, Self::Error> {
        LutEntry::new(raw.temperature, raw.speed)
    }
}

impl From<LutEntry> for RawLutEntry {
    fn from(entry: LutEntry) -> Self {
        Self {
            temperature: entry.temperature,
            speed: entry.speed,
        }
    }
}

/// Check that thresholds never decrease along the table
pub fn is_monotonic(entries: &[LutEntry]) -> bool {
    entries
        .windows(2)
        .all(|pair| pair[0].temperature <= pair[1].temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_limits() {
        assert!(LutEntry::new(0x7F, 0x3F).is_ok());
        assert_eq!(
            LutEntry::new(0x80, 0),
            Err(OutOfRange {
                value: 0x80,
                max: 0x7F
            })
        );
        assert_eq!(
            LutEntry::new(20, 0x40),
            Err(OutOfRange {
                value: 0x40,
                max: 0x3F
            })
        );
    }

    #[test]
    fn test_from_registers_masks() {
        let entry = LutEntry::from_registers(0xFF, 0xFF);
        assert_eq!(entry.temperature(), 0x7F);
        assert_eq!(entry.speed(), 0x3F);
    }

    #[test]
    fn test_speed_percent() {
        assert_eq!(LutEntry::new(40, 0x3F).unwrap().speed_percent(), 100);
        assert_eq!(LutEntry::new(40, 0).unwrap().speed_percent(), 0);
        assert_eq!(LutEntry::new(40, 0x20).unwrap().speed_percent(), 50);
    }

    #[test]
    fn test_raw_conversion() {
        let raw = RawLutEntry {
            temperature: 30,
            speed: 20,
        };
        let entry = LutEntry::try_from(raw).unwrap();
        assert_eq!(RawLutEntry::from(entry), raw);

        let bad = RawLutEntry {
            temperature: 200,
            speed: 20,
        };
        assert!(LutEntry::try_from(bad).is_err());
    }

    #[test]
    fn test_monotonic() {
        let curve = [
            LutEntry::new(20, 10).unwrap(),
            LutEntry::new(30, 20).unwrap(),
            LutEntry::new(30, 25).unwrap(),
        ];
        assert!(is_monotonic(&curve));
        assert!(!is_monotonic(&[curve[1], curve[0]]));
        assert!(is_monotonic(&[]));
    }
}
