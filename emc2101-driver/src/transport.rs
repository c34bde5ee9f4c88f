//! Transport adapter
//!
//! Binds an [`I2cBus`] to the EMC2101's fixed address and exposes the two
//! byte-level transactions everything else is built from.

use emc2101_hal::I2cBus;

use crate::error::Error;

/// 7-bit I2C address of the EMC2101 (not strappable)
pub const I2C_ADDRESS: u8 = 0x4C;

/// Bus bound to the EMC2101 address
///
/// Owns the bus exclusively until [`Transport::release`].
#[derive(Debug)]
pub struct Transport<B> {
    bus: B,
}

impl<B: I2cBus> Transport<B> {
    /// Bind a bus to the EMC2101 address
    ///
    /// No I2C transactions occur here.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Device address used for every transaction
    pub const fn address(&self) -> u8 {
        I2C_ADDRESS
    }

    /// Read one register (register pointer write + 1 byte read)
    pub fn read_byte(&mut self, reg: u8) -> Result<u8, Error<B::Error>> {
        let mut byte = [0u8; 1];
        self.bus
            .write_read(I2C_ADDRESS, &[reg], &mut byte)
            .map(|_| byte[0])
            .map_err(Error::Transport)
    }

    /// Write one register
    pub fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus
            .write(I2C_ADDRESS, &[reg, value])
            .map_err(Error::Transport)
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_bus::{FakeBus, Op};
    use emc2101_hal::I2cBusError;

    #[test]
    fn test_read_write_byte() {
        let mut bus = FakeBus::new();
        bus.regs[0xFE] = 0x5D;

        let mut transport = Transport::new(&mut bus);
        assert_eq!(transport.read_byte(0xFE), Ok(0x5D));
        transport.write_byte(0x4C, 0x20).unwrap();

        assert_eq!(bus.regs[0x4C], 0x20);
        assert_eq!(bus.ops, vec![Op::Read(0xFE), Op::Write(0x4C, 0x20)]);
    }

    #[test]
    fn test_errors_propagate() {
        let mut bus = FakeBus::new();
        bus.fail_on = Some(0x00);

        let mut transport = Transport::new(&mut bus);
        assert_eq!(
            transport.read_byte(0x00),
            Err(Error::Transport(I2cBusError::DataNack))
        );
    }

    #[test]
    fn test_release_returns_bus() {
        let transport = Transport::new(FakeBus::new());
        assert_eq!(transport.address(), 0x4C);
        let bus = transport.release();
        assert!(bus.ops.is_empty());
    }
}
