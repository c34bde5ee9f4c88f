//! Temperature values
//!
//! The external diode reading is an 11-bit value in 0.125 °C steps split
//! across two registers: the MSB register holds whole degrees and the top
//! three bits of the LSB register hold the fraction. Two codes in that range
//! are not temperatures but diode faults, so readings are decoded into
//! [`ExternalTemperature`] before anyone sees a number.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// External reading code for an open diode circuit
pub const TEMP_FAULT_OPEN_CIRCUIT: u16 = 0x3F8;

/// External reading code for a shorted diode
pub const TEMP_FAULT_SHORT: u16 = 0x3FF;

/// Width mask of the external temperature code
pub const EXT_TEMP_MASK: u16 = 0x7FF;

/// Highest whole-degree value accepted by the 7-bit limit registers
pub const MAX_LIMIT_DEGREES: u8 = 0x7F;

/// Temperature with 0.125 °C resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    eighths: u16,
}

impl Temperature {
    /// Largest representable temperature (255.875 °C)
    pub const MAX: Self = Self {
        eighths: EXT_TEMP_MASK,
    };

    /// Build from an 11-bit code in 0.125 °C units
    pub const fn from_eighths(eighths: u16) -> Self {
        Self {
            eighths: eighths & EXT_TEMP_MASK,
        }
    }

    /// Build from whole degrees
    pub const fn from_degrees(degrees: u8) -> Self {
        Self {
            eighths: (degrees as u16) << 3,
        }
    }

    /// Build from the `(msb << 8) | lsb` register pair
    pub const fn from_composite(raw: u16) -> Self {
        Self::from_eighths(raw >> 5)
    }

    /// Register pair layout (`msb << 8 | lsb`) of this value
    pub const fn to_composite(self) -> u16 {
        self.eighths << 5
    }

    /// Value in 0.125 °C units
    pub const fn eighths(self) -> u16 {
        self.eighths
    }

    /// Whole degrees, fraction truncated
    pub const fn whole_degrees(self) -> u8 {
        (self.eighths >> 3) as u8
    }

    /// Millidegrees Celsius
    pub const fn millicelsius(self) -> i32 {
        self.eighths as i32 * 125
    }

    /// Fixed-point with 0.1 °C resolution (45.5 °C is 455), truncated
    pub const fn celsius_x10(self) -> i16 {
        (self.eighths as i32 * 10 / 8) as i16
    }

    /// Degrees Celsius
    pub fn celsius(self) -> f32 {
        f32::from(self.eighths) / 8.0
    }
}

/// Decoded external diode reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExternalTemperature {
    /// Valid measurement
    Valid(Temperature),
    /// Diode disconnected
    OpenCircuit,
    /// Diode shorted
    ShortCircuit,
}

impl ExternalTemperature {
    /// Decode an 11-bit external temperature code
    pub const fn decode(code: u16) -> Self {
        match code & EXT_TEMP_MASK {
            TEMP_FAULT_OPEN_CIRCUIT => ExternalTemperature::OpenCircuit,
            TEMP_FAULT_SHORT => ExternalTemperature::ShortCircuit,
            code => ExternalTemperature::Valid(Temperature::from_eighths(code)),
        }
    }

    /// Decode the `(msb << 8) | lsb` register pair
    pub const fn from_composite(raw: u16) -> Self {
        Self::decode(raw >> 5)
    }

    /// The temperature, if the reading is not a fault
    pub const fn temperature(self) -> Option<Temperature> {
        match self {
            ExternalTemperature::Valid(t) => Some(t),
            _ => None,
        }
    }

    /// Reading is a diode fault
    pub const fn is_fault(self) -> bool {
        !matches!(self, ExternalTemperature::Valid(_))
    }
}

/// Temperature conversion rate (register 0x04)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ConversionRate {
    /// One conversion every 16 s
    Hz1_16 = 0x00,
    Hz1_8 = 0x01,
    Hz1_4 = 0x02,
    Hz1_2 = 0x03,
    Hz1 = 0x04,
    Hz2 = 0x05,
    Hz4 = 0x06,
    Hz8 = 0x07,
    /// Power-on default
    #[default]
    Hz16 = 0x08,
    Hz32 = 0x09,
}

impl ConversionRate {
    /// Register value
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Parse a register value (codes above 0x09 all mean 32 Hz)
    pub const fn from_register(value: u8) -> Self {
        match value & 0x0F {
            0x00 => ConversionRate::Hz1_16,
            0x01 => ConversionRate::Hz1_8,
            0x02 => ConversionRate::Hz1_4,
            0x03 => ConversionRate::Hz1_2,
            0x04 => ConversionRate::Hz1,
            0x05 => ConversionRate::Hz2,
            0x06 => ConversionRate::Hz4,
            0x07 => ConversionRate::Hz8,
            0x08 => ConversionRate::Hz16,
            _ => ConversionRate::Hz32,
        }
    }

    /// Conversion period in milliseconds
    pub const fn period_ms(self) -> u32 {
        16_000 >> (self as u32)
    }
}
