//! EMC2101 register map and register access layer
//!
//! Addresses and bit layouts are fixed by the chip; everything above this
//! module talks in named registers and the primitives on [`Registers`].
//!
//! # Aliases
//!
//! A handful of registers answer at two addresses. [`reg::canonical`] folds
//! every alias onto one address and all bus traffic goes through it, so
//! callers may pass either address and the chip only ever sees one.
//!
//! # Composite values
//!
//! Multi-byte values (external temperature, tach) must be read MSB first:
//! reading the MSB latches the LSB so the pair is consistent.

use emc2101_hal::I2cBus;

use crate::error::{Error, OutOfRange};
use crate::transport::Transport;

/// EMC2101 register addresses
pub mod reg {
    /// Internal diode temperature, whole °C (read-only)
    pub const INTERNAL_TEMP: u8 = 0x00;
    /// External diode temperature, integer part (read-only, read first)
    pub const EXTERNAL_TEMP_MSB: u8 = 0x01;
    /// Status flags (read-only, alarm bits clear on read)
    pub const STATUS: u8 = 0x02;
    /// Configuration flags (alias 0x09)
    pub const CONFIG: u8 = 0x03;
    /// Conversion rate (alias 0x0A)
    pub const CONVERT_RATE: u8 = 0x04;
    /// Internal temperature high limit (alias 0x0B)
    pub const INT_TEMP_HI_LIM: u8 = 0x05;
    /// External temperature high limit, integer part (alias 0x0D)
    pub const EXT_TEMP_HI_LIM_MSB: u8 = 0x07;
    /// External temperature low limit, integer part (alias 0x0E)
    pub const EXT_TEMP_LO_LIM_MSB: u8 = 0x08;
    /// Forced temperature for the fan control loop
    pub const TEMP_FORCE: u8 = 0x0C;
    /// One-shot conversion trigger (any write starts a conversion)
    pub const ONESHOT: u8 = 0x0F;
    /// External diode temperature, fraction (read-only)
    pub const EXTERNAL_TEMP_LSB: u8 = 0x10;
    /// Scratchpad 1
    pub const SCRATCH_1: u8 = 0x11;
    /// Scratchpad 2
    pub const SCRATCH_2: u8 = 0x12;
    /// External temperature high limit, fraction
    pub const EXT_TEMP_HI_LIM_LSB: u8 = 0x13;
    /// External temperature low limit, fraction
    pub const EXT_TEMP_LO_LIM_LSB: u8 = 0x14;
    /// Alert mask
    pub const ALERT_MASK: u8 = 0x16;
    /// External diode ideality factor
    pub const EXT_IDEALITY: u8 = 0x17;
    /// Beta compensation
    pub const EXT_BETACOMP: u8 = 0x18;
    /// Tcrit limit (write-once)
    pub const TCRIT_TEMP: u8 = 0x19;
    /// Tcrit hysteresis
    pub const TCRIT_HYST: u8 = 0x21;
    /// Tach reading, low byte (read-only)
    pub const TACH_LSB: u8 = 0x46;
    /// Tach reading, high byte (read-only)
    pub const TACH_MSB: u8 = 0x47;
    /// Tach limit, low byte
    pub const TACH_LIMIT_LSB: u8 = 0x48;
    /// Tach limit, high byte
    pub const TACH_LIMIT_MSB: u8 = 0x49;
    /// Fan configuration
    pub const FAN_CONFIG: u8 = 0x4A;
    /// Fan spin-up
    pub const FAN_SPINUP: u8 = 0x4B;
    /// Fan setting (direct mode)
    pub const FAN_SETTING: u8 = 0x4C;
    /// PWM frequency
    pub const PWM_FREQ: u8 = 0x4D;
    /// PWM frequency divide
    pub const PWM_FREQ_DIV: u8 = 0x4E;
    /// Lookup table hysteresis
    pub const LUT_HYSTERESIS: u8 = 0x4F;
    /// First lookup table register (slot 0 temperature)
    pub const LUT_BASE: u8 = 0x50;
    /// Averaging filter
    pub const AVG_FILTER: u8 = 0xBF;
    /// Part ID (0x16, or 0x28 for the -R part)
    pub const PART_ID: u8 = 0xFD;
    /// Manufacturer ID (SMSC is 0x5D)
    pub const MFG_ID: u8 = 0xFE;
    /// Silicon revision
    pub const REVISION: u8 = 0xFF;

    /// (alias, canonical) pairs
    pub const ALIASES: [(u8, u8); 5] = [
        (0x09, CONFIG),
        (0x0A, CONVERT_RATE),
        (0x0B, INT_TEMP_HI_LIM),
        (0x0D, EXT_TEMP_HI_LIM_MSB),
        (0x0E, EXT_TEMP_LO_LIM_MSB),
    ];

    /// Fold an alias onto its canonical address
    pub const fn canonical(addr: u8) -> u8 {
        let mut i = 0;
        while i < ALIASES.len() {
            if ALIASES[i].0 == addr {
                return ALIASES[i].1;
            }
            i += 1;
        }
        addr
    }
}

/// Bits in the status register (0x02)
pub mod status {
    pub const BUSY: u8 = 0x80;
    pub const INTHIGH: u8 = 0x40;
    pub const EEPROM: u8 = 0x20;
    pub const EXTHIGH: u8 = 0x10;
    pub const EXTLOW: u8 = 0x08;
    pub const FAULT: u8 = 0x04;
    pub const TCRIT: u8 = 0x02;
    pub const TACH: u8 = 0x01;

    /// Conditions that drive the ALERT pin (everything but BUSY and EEPROM)
    pub const ALERT: u8 = TACH | TCRIT | FAULT | EXTLOW | EXTHIGH | INTHIGH;
}

/// Bits in the configuration register (0x03)
pub mod config {
    pub const MASK: u8 = 0x80;
    pub const STANDBY: u8 = 0x40;
    pub const FAN_STANDBY: u8 = 0x20;
    pub const DAC: u8 = 0x10;
    pub const DIS_TO: u8 = 0x08;
    pub const ALT_TACH: u8 = 0x04;
    pub const TCRIT_OVR: u8 = 0x02;
    pub const QUEUE: u8 = 0x01;
}

/// Bits in the fan configuration register (0x4A)
pub mod fan_config {
    /// Drive the fan from TEMP_FORCE instead of the external diode
    pub const FORCE: u8 = 0x40;
    /// LUT and fan setting writable; fan driven from FAN_SETTING
    pub const PROG: u8 = 0x20;
    /// Invert the PWM/DAC output
    pub const POLARITY: u8 = 0x10;
}

/// Number of lookup table slots
pub const LUT_SLOT_COUNT: usize = 8;

/// (temperature register, speed register) for each LUT slot, in table order
pub const LUT_SLOTS: [(u8, u8); LUT_SLOT_COUNT] = lut_slots();

const fn lut_slots() -> [(u8, u8); LUT_SLOT_COUNT] {
    let mut slots = [(0u8, 0u8); LUT_SLOT_COUNT];
    let mut i = 0;
    while i < LUT_SLOT_COUNT {
        let temp = reg::LUT_BASE + 2 * i as u8;
        slots[i] = (temp, temp + 1);
        i += 1;
    }
    slots
}

/// Register access layer
///
/// Single-byte, bitmask and composite operations on top of the
/// [`Transport`]. No retries and no caching.
#[derive(Debug)]
pub struct Registers<B> {
    transport: Transport<B>,
}

impl<B: I2cBus> Registers<B> {
    /// Wrap a transport
    pub fn new(transport: Transport<B>) -> Self {
        Self { transport }
    }

    /// Read one register
    pub fn read_register(&mut self, addr: u8) -> Result<u8, Error<B::Error>> {
        self.transport.read_byte(reg::canonical(addr))
    }

    /// Write one register
    pub fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.transport.write_byte(reg::canonical(addr), value)
    }

    /// Test whether any bit of `bitmask` is set
    pub fn read_bit(&mut self, addr: u8, bitmask: u8) -> Result<bool, Error<B::Error>> {
        Ok(self.read_register(addr)? & bitmask != 0)
    }

    /// Set or clear exactly the bits in `bitmask`, leaving the others as read
    ///
    /// Read-modify-write; not atomic against another writer.
    pub fn write_masked_bit(
        &mut self,
        addr: u8,
        bitmask: u8,
        enabled: bool,
    ) -> Result<(), Error<B::Error>> {
        let current = self.read_register(addr)?;
        let updated = if enabled {
            current | bitmask
        } else {
            current & !bitmask
        };
        self.write_register(addr, updated)
    }

    /// Read a two-register value, MSB first
    ///
    /// Returns `(msb << 8) | lsb`; the caller masks to the field width.
    pub fn read_composite16(&mut self, msb_addr: u8, lsb_addr: u8) -> Result<u16, Error<B::Error>> {
        let msb = self.read_register(msb_addr)?;
        let lsb = self.read_register(lsb_addr)?;
        Ok((u16::from(msb) << 8) | u16::from(lsb))
    }

    /// Write a two-register value, MSB first
    pub fn write_composite16(
        &mut self,
        msb_addr: u8,
        lsb_addr: u8,
        value: u16,
    ) -> Result<(), Error<B::Error>> {
        let [msb, lsb] = value.to_be_bytes();
        self.write_register(msb_addr, msb)?;
        self.write_register(lsb_addr, lsb)
    }

    /// Read the raw (temperature, speed) bytes of one LUT slot
    pub fn read_lut_slot(&mut self, index: usize) -> Result<(u8, u8), Error<B::Error>> {
        let (temp_addr, speed_addr) = lut_slot(index)?;
        let temp = self.read_register(temp_addr)?;
        let speed = self.read_register(speed_addr)?;
        Ok((temp, speed))
    }

    /// Write the raw (temperature, speed) bytes of one LUT slot
    pub fn write_lut_slot(
        &mut self,
        index: usize,
        temperature: u8,
        speed: u8,
    ) -> Result<(), Error<B::Error>> {
        let (temp_addr, speed_addr) = lut_slot(index)?;
        self.write_register(temp_addr, temperature)?;
        self.write_register(speed_addr, speed)
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.transport.release()
    }
}

fn lut_slot(index: usize) -> Result<(u8, u8), OutOfRange> {
    LUT_SLOTS.get(index).copied().ok_or(OutOfRange {
        value: index as u32,
        max: (LUT_SLOT_COUNT - 1) as u32,
    })
}
