//! Tachometer conversion
//!
//! The tach register holds the number of 90 kHz clock periods per fan
//! revolution window. RPM is a fixed divisor over that count; an all-ones
//! count means the counter saturated (fan stopped or not connected).

/// RPM = divisor / tach count (datasheet section 6.14)
pub const FAN_RPM_DIVISOR: u32 = 5_400_000;

/// Width mask of the tach count
pub const TACH_MASK: u16 = 0x1FFF;

/// Count reported when no pulses arrived
pub const TACH_SATURATED: u16 = TACH_MASK;

/// Decoded fan speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FanSpeed {
    /// Revolutions per minute
    Rpm(u32),
    /// Fan stopped, disconnected, or count unusable
    Stalled,
}

impl FanSpeed {
    /// Decode a raw tach count
    pub const fn from_count(count: u16) -> Self {
        match count & TACH_MASK {
            0 | TACH_SATURATED => FanSpeed::Stalled,
            count => FanSpeed::Rpm(FAN_RPM_DIVISOR / count as u32),
        }
    }

    /// RPM, if the fan is turning
    pub const fn rpm(self) -> Option<u32> {
        match self {
            FanSpeed::Rpm(rpm) => Some(rpm),
            FanSpeed::Stalled => None,
        }
    }

    /// Fan is not turning
    pub const fn is_stalled(self) -> bool {
        matches!(self, FanSpeed::Stalled)
    }
}

/// Tach count corresponding to an RPM, clamped to the count range
///
/// Zero RPM maps to the saturated count.
pub const fn rpm_to_count(rpm: u32) -> u16 {
    if rpm == 0 {
        return TACH_SATURATED;
    }
    let count = FAN_RPM_DIVISOR / rpm;
    if count == 0 {
        1
    } else if count > TACH_MASK as u32 {
        TACH_MASK
    } else {
        count as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rpm_conversion() {
        assert_eq!(FanSpeed::from_count(5400), FanSpeed::Rpm(1000));
        assert_eq!(FanSpeed::from_count(2700).rpm(), Some(2000));
        assert_eq!(FanSpeed::from_count(1), FanSpeed::Rpm(FAN_RPM_DIVISOR));
    }

    #[test]
    fn test_stalled() {
        assert!(FanSpeed::from_count(0).is_stalled());
        assert!(FanSpeed::from_count(TACH_SATURATED).is_stalled());
        // Register pair reads 0xFFFF when the counter overflows
        assert!(FanSpeed::from_count(0xFFFF).is_stalled());
        assert_eq!(FanSpeed::Stalled.rpm(), None);
    }

    #[test]
    fn test_rpm_to_count() {
        assert_eq!(rpm_to_count(1000), 5400);
        assert_eq!(rpm_to_count(0), TACH_SATURATED);
        assert_eq!(rpm_to_count(100), TACH_MASK);
        assert_eq!(rpm_to_count(u32::MAX), 1);
    }

    proptest! {
        #[test]
        fn prop_any_count_decodes(count in any::<u16>()) {
            let speed = FanSpeed::from_count(count);
            let masked = count & TACH_MASK;
            prop_assert_eq!(speed.is_stalled(), masked == 0 || masked == TACH_SATURATED);
            if let Some(rpm) = speed.rpm() {
                prop_assert!(rpm >= FAN_RPM_DIVISOR / u32::from(TACH_MASK));
            }
        }
    }
}
