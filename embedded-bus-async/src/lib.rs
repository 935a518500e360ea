#![no_std]
#![doc = "Asynchronous shared I2C bus for embedded-hal-async drivers."]

// Note: This mirrors the mutex-based device in embassy-embedded-hal, without
// pulling its dependency tree into driver crates.
//
// For the official Embassy implementation, see:
// - https://github.com/embassy-rs/embassy/tree/main/embassy-embedded-hal/src/shared_bus

#[cfg(test)]
extern crate std;

pub mod i2c;

pub use i2c::SharedI2cDevice;
