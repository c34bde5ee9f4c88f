//! Driver error types

use core::fmt;

/// Errors from EMC2101 operations
///
/// `E` is the bus error type. Bus failures are passed through untouched;
/// the driver never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transaction failed
    Transport(E),
    /// Argument does not fit the register field (no bus traffic happened)
    OutOfRange(OutOfRange),
    /// More lookup table entries than the chip has slots
    LutTooLong(usize),
}

impl<E> From<OutOfRange> for Error<E> {
    fn from(err: OutOfRange) -> Self {
        Error::OutOfRange(err)
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {}", e),
            Error::OutOfRange(e) => fmt::Display::fmt(e, f),
            Error::LutTooLong(len) => write!(
                f,
                "lookup table has {} entries (max {})",
                len,
                crate::lut::LUT_LEN
            ),
        }
    }
}

/// A value that does not fit its register field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange {
    /// Rejected value
    pub value: u32,
    /// Largest accepted value
    pub max: u32,
}

impl OutOfRange {
    /// Check `value <= max`
    pub fn check(value: u32, max: u32) -> Result<(), OutOfRange> {
        if value > max {
            Err(OutOfRange { value, max })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} out of range (max {})", self.value, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emc2101_hal::I2cBusError;
    use std::string::ToString;

    #[test]
    fn test_check() {
        assert_eq!(OutOfRange::check(0x3F, 0x3F), Ok(()));
        assert_eq!(
            OutOfRange::check(0x40, 0x3F),
            Err(OutOfRange {
                value: 0x40,
                max: 0x3F
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err: Error<I2cBusError> = Error::Transport(I2cBusError::AddressNack);
        assert_eq!(err.to_string(), "transport error: no acknowledge on address");

        let err: Error<I2cBusError> = OutOfRange { value: 200, max: 127 }.into();
        assert_eq!(err.to_string(), "value 200 out of range (max 127)");

        let err: Error<I2cBusError> = Error::LutTooLong(9);
        assert_eq!(err.to_string(), "lookup table has 9 entries (max 8)");
    }
}
