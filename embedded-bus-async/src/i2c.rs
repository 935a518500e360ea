use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::{self, I2c, Operation, SevenBitAddress};

/// `Mutex`-based shared bus [`I2c`] implementation.
///
/// This allows for sharing an I2C bus, obtaining multiple [`SharedI2cDevice`]
/// instances that talk to different addresses on the same wires.
///
/// The bus is locked for a whole transaction, so a register address write and
/// the read that follows it are never interleaved with another device's
/// traffic.
pub struct SharedI2cDevice<'a, M: RawMutex, BUS> {
    bus: &'a Mutex<M, BUS>,
}

impl<'a, M: RawMutex, BUS> SharedI2cDevice<'a, M, BUS> {
    /// Create a new [`SharedI2cDevice`].
    pub fn new(bus: &'a Mutex<M, BUS>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, BUS: i2c::ErrorType> i2c::ErrorType for SharedI2cDevice<'_, M, BUS> {
    type Error = BUS::Error;
}

impl<M, BUS> I2c<SevenBitAddress> for SharedI2cDevice<'_, M, BUS>
where
    M: RawMutex,
    BUS: I2c<SevenBitAddress>,
{
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        let result = bus.transaction(address, operations).await;

        if let Err(err) = &result {
            log::warn!("Error communicating with I2C device {address:#04X}: {err:?}");
        }

        result
    }
}
