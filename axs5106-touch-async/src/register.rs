//! Register access over I2C.

use embedded_hal_async::i2c::{I2c, Operation, SevenBitAddress};

/// Byte-addressed register access to a device.
///
/// A read writes the register address and then reads `buf.len()` bytes as a
/// single transaction. Implementations must either fill the whole buffer or
/// fail with the transport error.
#[allow(async_fn_in_trait)]
pub trait RegisterIo {
    /// Transport error.
    type Error: core::fmt::Debug;

    /// Reads `buf.len()` bytes starting at `register`.
    async fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `payload` starting at `register`.
    async fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), Self::Error>;
}

/// [`RegisterIo`] for a device at a fixed address on an I2C bus.
pub struct I2cRegisters<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType: I2c<SevenBitAddress>> I2cRegisters<I2cType> {
    /// Creates register access for the device at `address`.
    pub fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// The device address.
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Gives back the bus.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType: I2c<SevenBitAddress>> RegisterIo for I2cRegisters<I2cType> {
    type Error = I2cType::Error;

    async fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .await
            .inspect_err(|err| {
                log::warn!("Error reading register {register:#04X}: {err:?}");
            })
    }

    async fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&[register]), Operation::Write(payload)],
            )
            .await
            .inspect_err(|err| {
                log::warn!("Error writing register {register:#04X}: {err:?}");
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::vec;

    #[test]
    fn read_is_a_single_write_read() {
        let expectations = [I2cTransaction::write_read(
            0x63,
            vec![0x08],
            vec![0x01, 0x02, 0x03],
        )];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut registers = I2cRegisters::new(i2c, 0x63);
        let mut buf = [0u8; 3];
        block_on(registers.read(0x08, &mut buf)).unwrap();
        assert_eq!(buf, [0x01, 0x02, 0x03]);

        i2c_clone.done();
    }

    #[test]
    fn write_sends_register_then_payload() {
        let expectations = [
            I2cTransaction::transaction_start(0x63),
            I2cTransaction::write(0x63, vec![0x10]),
            I2cTransaction::write(0x63, vec![0xAA, 0xBB]),
            I2cTransaction::transaction_end(0x63),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut registers = I2cRegisters::new(i2c, 0x63);
        block_on(registers.write(0x10, &[0xAA, 0xBB])).unwrap();

        i2c_clone.done();
    }

    #[test]
    fn bus_errors_are_returned_unchanged() {
        let expectations = [
            I2cTransaction::write_read(0x63, vec![0x01], vec![0; 2]).with_error(ErrorKind::Other),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut registers = I2cRegisters::new(i2c, 0x63);
        let mut buf = [0u8; 2];
        assert_eq!(
            block_on(registers.read(0x01, &mut buf)),
            Err(ErrorKind::Other)
        );

        i2c_clone.done();
    }
}
