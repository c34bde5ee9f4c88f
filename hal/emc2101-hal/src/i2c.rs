//! I2C bus abstractions
//!
//! The master trait, its error type and the `embedded-hal` 1.0 adapter.

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

/// Blocking I2C master as seen by the driver
///
/// Addresses are 7-bit. The driver uses `write` for register writes and
/// `write_read` (register pointer, repeated start, data) for every read.
pub trait I2cBus {
    /// Bus failure reported to the caller unchanged
    type Error;

    /// Send `data` to `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from `address`
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Send `write_data`, then fill `read_buf` after a repeated start
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }
}

/// Error from I2C operations
///
/// Bus-level failures only. Nothing above the bus retries these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// The bus could not be opened or claimed
    Unavailable,
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK on the address byte (device absent)
    AddressNack,
    /// NACK on a data byte
    DataNack,
    /// Overrun
    Overrun,
    /// Other error (timeouts land here on most platforms)
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => I2cBusError::DataNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::AddressNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I2cBusError::Unavailable => f.write_str("i2c bus unavailable"),
            I2cBusError::Bus => f.write_str("i2c bus error"),
            I2cBusError::ArbitrationLost => f.write_str("i2c arbitration lost"),
            I2cBusError::AddressNack => f.write_str("no acknowledge on address"),
            I2cBusError::DataNack => f.write_str("no acknowledge on data"),
            I2cBusError::Overrun => f.write_str("i2c overrun"),
            I2cBusError::Other => f.write_str("i2c transfer failed"),
        }
    }
}

/// Adapter exposing an `embedded-hal` 1.0 I2C bus as an [`I2cBus`]
///
/// Bus errors are collapsed into [`I2cBusError`] through their
/// [`ErrorKind`], so callers see one error type regardless of platform.
#[derive(Debug)]
pub struct Eh1Bus<T> {
    inner: T,
}

impl<T> Eh1Bus<T> {
    /// Wrap an `embedded-hal` bus
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped bus
    pub fn inner(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap and return the wrapped bus
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cBus for Eh1Bus<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(I2cBusError::from(ErrorKind::Bus), I2cBusError::Bus);
        assert_eq!(
            I2cBusError::from(ErrorKind::ArbitrationLoss),
            I2cBusError::ArbitrationLost
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cBusError::AddressNack
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)),
            I2cBusError::AddressNack
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            I2cBusError::DataNack
        );
        assert_eq!(I2cBusError::from(ErrorKind::Other), I2cBusError::Other);
    }

    #[test]
    fn test_eh1_bus_forwards_transactions() {
        let expectations = [
            I2cTransaction::write(0x4C, vec![0x03, 0x10]),
            I2cTransaction::write_read(0x4C, vec![0xFE], vec![0x5D]),
        ];
        let mut bus = Eh1Bus::new(I2cMock::new(&expectations));

        bus.write(0x4C, &[0x03, 0x10]).unwrap();
        let mut buf = [0u8; 1];
        bus.write_read(0x4C, &[0xFE], &mut buf).unwrap();
        assert_eq!(buf[0], 0x5D);

        bus.into_inner().done();
    }

    #[test]
    fn test_eh1_bus_maps_errors() {
        let expectations = [I2cTransaction::write_read(0x4C, vec![0x00], vec![0x00])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let mut bus = Eh1Bus::new(I2cMock::new(&expectations));

        let mut buf = [0u8; 1];
        let result = bus.write_read(0x4C, &[0x00], &mut buf);
        assert_eq!(result, Err(I2cBusError::AddressNack));

        bus.into_inner().done();
    }

    #[test]
    fn test_mut_ref_is_a_bus() {
        let expectations = [I2cTransaction::write(0x4C, vec![0x0F, 0x00])];
        let mut bus = Eh1Bus::new(I2cMock::new(&expectations));

        fn poke<B: I2cBus>(mut bus: B) -> Result<(), B::Error> {
            bus.write(0x4C, &[0x0F, 0x00])
        }
        poke(&mut bus).unwrap();

        bus.into_inner().done();
    }
}
