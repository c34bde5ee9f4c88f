//! In-memory EMC2101 register file for unit tests

use std::vec::Vec;

use emc2101_hal::{I2cBus, I2cBusError};

use crate::transport::I2C_ADDRESS;

/// One register-level transaction seen on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read(u8),
    Write(u8, u8),
}

/// 256 plain byte registers. No aliasing or read-only emulation; tests
/// look at `ops` to see which addresses the driver used.
pub struct FakeBus {
    pub regs: [u8; 256],
    pub ops: Vec<Op>,
    /// Any transaction touching this register NACKs
    pub fail_on: Option<u8>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            ops: Vec::new(),
            fail_on: None,
        }
    }

    /// Register values as a powered-up EMC2101 reports them
    pub fn emc2101() -> Self {
        let mut bus = Self::new();
        bus.regs[0xFD] = 0x16;
        bus.regs[0xFE] = 0x5D;
        bus.regs[0xFF] = 0x01;
        bus.regs[0x04] = 0x08;
        bus.regs[0x4A] = 0x20;
        bus.regs[0x4F] = 0x04;
        bus
    }

    pub fn writes(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            Op::Write(reg, value) => Some((reg, value)),
            Op::Read(_) => None,
        })
    }

    fn check(&self, address: u8, reg: u8) -> Result<(), I2cBusError> {
        if address != I2C_ADDRESS {
            return Err(I2cBusError::AddressNack);
        }
        if self.fail_on == Some(reg) {
            return Err(I2cBusError::DataNack);
        }
        Ok(())
    }
}

impl I2cBus for FakeBus {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let (&reg, values) = data.split_first().ok_or(I2cBusError::Other)?;
        self.check(address, reg)?;
        for (offset, &value) in values.iter().enumerate() {
            let target = reg.wrapping_add(offset as u8);
            self.regs[target as usize] = value;
            self.ops.push(Op::Write(target, value));
        }
        Ok(())
    }

    fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), Self::Error> {
        // The driver always sets the register pointer first
        Err(I2cBusError::Other)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let &reg = write_data.first().ok_or(I2cBusError::Other)?;
        self.check(address, reg)?;
        for (offset, slot) in read_buf.iter_mut().enumerate() {
            let target = reg.wrapping_add(offset as u8);
            *slot = self.regs[target as usize];
            self.ops.push(Op::Read(target));
        }
        Ok(())
    }
}
