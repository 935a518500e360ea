//! An asynchronous, `no_std` driver for the AXS5106L capacitive touch controller.
//!
//! This driver provides a `TouchController` to interact with the AXS5106L over
//! I2C. It reads the controller's touch-data register, decodes up to five
//! touch points and maps them to display coordinates for one of eight
//! mounting orientations.
//!
//! # Usage
//!
//! To use this driver, you need an I2C peripheral implementation that satisfies the
//! `embedded-hal-async::i2c::I2c` trait, an optional reset pin and a delay
//! source implementing `embedded-hal-async::delay::DelayNs`.
//!
//! ```no_run
//! # use embedded_hal_async::{delay::DelayNs, i2c::I2c};
//! use axs5106_touch_async::{Rotation, TouchConfig, TouchController};
//!
//! async fn read_touch<I: I2c, D: DelayNs>(i2c: I, mut delay: D) {
//!     let config = TouchConfig::default()
//!         .with_rotation(Rotation::Rotate90)
//!         .with_size(172, 320);
//!     let mut touch_controller = TouchController::new(i2c, config);
//!     if touch_controller.init(&mut delay).await.is_err() {
//!         log::warn!("Error initializing touch controller.");
//!         return;
//!     }
//!
//!     loop {
//!         match touch_controller.touch_points().await {
//!             Ok(points) => {
//!                 for point in &points {
//!                     log::info!("Touch {}: ({}, {})", point.id, point.x, point.y);
//!                 }
//!             }
//!             Err(err) => log::warn!("Error reading touches: {err:?}"),
//!         }
//!         delay.delay_ms(20).await;
//!     }
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod frame;
pub mod register;
pub mod rotation;
pub mod touch;

pub use frame::{TouchDecoder, TouchFrame, TouchPoint, TouchPoints, MAX_TOUCH_POINTS};
pub use register::{I2cRegisters, RegisterIo};
pub use rotation::{DisplayExtent, Rotation};
pub use touch::{Error, NoReset, TouchConfig, TouchController, DEFAULT_I2C_ADDRESS};
