//! Core implementation of the AXS5106L touch controller driver.

use core::convert::Infallible;
use core::fmt::{self, Debug};

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::frame::{TouchDecoder, TouchFrame, TouchPoints, FRAME_SIZE};
use crate::register::{I2cRegisters, RegisterIo};
use crate::rotation::{DisplayExtent, Rotation};

/// Default I2C address of the AXS5106L.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x63;

// Register map
pub const REG_CHIP_ID: u8 = 0x08;
pub const REG_TOUCH_DATA: u8 = 0x01;

/// Length of the chip-ID register.
pub const CHIP_ID_SIZE: usize = 3;

const RESET_LOW_MS: u32 = 200;
const RESET_SETTLE_MS: u32 = 300;

/// Errors returned by [`TouchController`] operations that touch both the bus
/// and the reset pin.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Error<I2cErr, PinErr> {
    /// The bus transfer failed.
    I2c(I2cErr),
    /// Driving the reset pin failed.
    Reset(PinErr),
}

impl<I2cErr: Debug, PinErr: Debug> Debug for Error<I2cErr, PinErr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(err) => write!(f, "I2c({err:?})"),
            Self::Reset(err) => write!(f, "Reset({err:?})"),
        }
    }
}

/// Placeholder reset pin for boards where the reset line is not wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReset;

impl ErrorType for NoReset {
    type Error = Infallible;
}

impl OutputPin for NoReset {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Settings fixed for the lifetime of a [`TouchController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchConfig {
    /// I2C address of the controller.
    pub address: SevenBitAddress,
    /// Orientation applied to every touch point.
    pub rotation: Rotation,
    /// Display size used to mirror coordinates.
    pub extent: DisplayExtent,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_I2C_ADDRESS,
            rotation: Rotation::Identity,
            extent: DisplayExtent::unknown(),
        }
    }
}

impl TouchConfig {
    pub fn with_address(mut self, address: SevenBitAddress) -> Self {
        self.address = address;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_extent(mut self, extent: DisplayExtent) -> Self {
        self.extent = extent;
        self
    }

    /// Shorthand for an extent with both dimensions known.
    pub fn with_size(self, width: u16, height: u16) -> Self {
        self.with_extent(DisplayExtent::new(width, height))
    }
}

/// A controller for the AXS5106L touch interface.
pub struct TouchController<Regs, Rst = NoReset> {
    regs: Regs,
    rst: Option<Rst>,
    config: TouchConfig,
    decoder: TouchDecoder,
}

impl<I2cType: I2c<SevenBitAddress>> TouchController<I2cRegisters<I2cType>, NoReset> {
    /// Creates a controller on an I2C bus, without a reset pin.
    pub fn new(i2c: I2cType, config: TouchConfig) -> Self {
        Self::from_registers(I2cRegisters::new(i2c, config.address), None, config)
    }
}

impl<I2cType: I2c<SevenBitAddress>, Rst: OutputPin> TouchController<I2cRegisters<I2cType>, Rst> {
    /// Creates a controller on an I2C bus with a reset pin, which is pulsed
    /// by [`TouchController::init`].
    pub fn with_reset(i2c: I2cType, rst: Rst, config: TouchConfig) -> Self {
        Self::from_registers(I2cRegisters::new(i2c, config.address), Some(rst), config)
    }
}

impl<Regs: RegisterIo, Rst: OutputPin> TouchController<Regs, Rst> {
    /// Creates a controller over any register transport.
    ///
    /// `config.address` is not used here; the transport is already bound to
    /// its device.
    pub fn from_registers(regs: Regs, rst: Option<Rst>, config: TouchConfig) -> Self {
        Self {
            regs,
            rst,
            config,
            decoder: TouchDecoder::new(config.rotation, config.extent),
        }
    }

    /// Initializes the touch controller.
    ///
    /// Pulses the reset pin if there is one, then reads the chip ID to check
    /// that the device answers. An all-zero ID is only logged.
    pub async fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<[u8; CHIP_ID_SIZE], Error<Regs::Error, Rst::Error>> {
        self.reset(delay).await.map_err(Error::Reset)?;

        let chip_id = self.read_chip_id().await.map_err(Error::I2c)?;
        log::debug!(
            "Chip ID: {:02X} {:02X} {:02X}",
            chip_id[0],
            chip_id[1],
            chip_id[2]
        );
        if chip_id.iter().all(|&b| b == 0) {
            log::warn!("All zeros read from the chip ID register.");
        }

        Ok(chip_id)
    }

    /// Drives the reset pin low, then high, waiting for the controller to
    /// come back up. Does nothing without a reset pin.
    pub async fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Rst::Error> {
        if let Some(rst) = &mut self.rst {
            rst.set_low()?;
            delay.delay_ms(RESET_LOW_MS).await;
            rst.set_high()?;
            delay.delay_ms(RESET_SETTLE_MS).await;
        }
        Ok(())
    }

    /// Reads the 3-byte chip ID.
    pub async fn read_chip_id(&mut self) -> Result<[u8; CHIP_ID_SIZE], Regs::Error> {
        let mut chip_id = [0u8; CHIP_ID_SIZE];
        self.regs.read(REG_CHIP_ID, &mut chip_id).await?;
        Ok(chip_id)
    }

    /// Reads the raw touch-data frame.
    pub async fn read_frame(&mut self) -> Result<TouchFrame, Regs::Error> {
        let mut data = [0u8; FRAME_SIZE];
        self.regs.read(REG_TOUCH_DATA, &mut data).await?;
        Ok(TouchFrame::new(data))
    }

    /// Returns the number of touches the controller reports, as is.
    ///
    /// This may exceed the number of points [`TouchController::touch_points`]
    /// returns.
    pub async fn touch_count(&mut self) -> Result<u8, Regs::Error> {
        Ok(self.read_frame().await?.touch_count())
    }

    /// Reads the current touch points, in display coordinates.
    pub async fn touch_points(&mut self) -> Result<TouchPoints, Regs::Error> {
        let frame = self.read_frame().await?;
        log::trace!("Touch count: {}", frame.touch_count());
        Ok(self.decoder.decode(&frame))
    }

    /// The decoder used for [`TouchController::touch_points`].
    pub fn decoder(&self) -> &TouchDecoder {
        &self.decoder
    }

    /// The settings this controller was created with.
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Gives back the register transport and the reset pin.
    pub fn release(self) -> (Regs, Option<Rst>) {
        (self.regs, self.rst)
    }
}
