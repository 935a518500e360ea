//! Orientation transforms applied to raw touch coordinates.

use core::num::NonZeroU16;

/// The eight mounting orientations supported by the driver.
///
/// Each variant maps a raw sensor coordinate `(x, y)` to a display
/// coordinate. `w` and `h` are the display width and height; an axis whose
/// dimension is unknown is passed through unmirrored.
///
/// The variant names describe the intended orientation only loosely. The
/// mapping listed on each variant is what the driver actually computes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// `(x, y)`
    #[default]
    Identity = 0,
    /// `(w-1-x, y)`
    FlipX = 1,
    /// `(x, h-1-y)`
    FlipY = 2,
    /// `(w-1-x, h-1-y)`
    Rotate180 = 3,
    /// `(h-1-y, x)`
    Rotate90 = 4,
    /// `(y, x)`
    SwapAxes = 5,
    /// `(w-1-y, h-1-x)`
    Rotate270 = 6,
    /// `(w-1-y, x)`
    Rotate270FlipX = 7,
}

impl From<u8> for Rotation {
    /// Unknown mode numbers fall back to [`Rotation::Identity`].
    fn from(value: u8) -> Self {
        match value {
            0 => Rotation::Identity,
            1 => Rotation::FlipX,
            2 => Rotation::FlipY,
            3 => Rotation::Rotate180,
            4 => Rotation::Rotate90,
            5 => Rotation::SwapAxes,
            6 => Rotation::Rotate270,
            7 => Rotation::Rotate270FlipX,
            other => {
                log::warn!("Unknown rotation mode {other}, using identity.");
                Rotation::Identity
            }
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation as u8
    }
}

impl Rotation {
    /// Maps a raw coordinate pair through this orientation.
    pub fn apply(self, x: u16, y: u16, extent: DisplayExtent) -> (u16, u16) {
        let DisplayExtent { width, height } = extent;
        match self {
            Rotation::Identity => (x, y),
            Rotation::FlipX => (mirror(x, width), y),
            Rotation::FlipY => (x, mirror(y, height)),
            Rotation::Rotate180 => (mirror(x, width), mirror(y, height)),
            Rotation::Rotate90 => (mirror(y, height), x),
            Rotation::SwapAxes => (y, x),
            Rotation::Rotate270 => (mirror(y, width), mirror(x, height)),
            Rotation::Rotate270FlipX => (mirror(y, width), x),
        }
    }
}

/// Returns `dimension - 1 - value`, or `value` when the dimension is unknown.
///
/// Values past the edge of the display saturate at 0.
fn mirror(value: u16, dimension: Option<NonZeroU16>) -> u16 {
    match dimension {
        Some(dimension) => (dimension.get() - 1).saturating_sub(value),
        None => value,
    }
}

/// Physical display size in pixels, used to mirror coordinates.
///
/// Either dimension may be unknown, in which case transforms depending on it
/// leave that axis unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayExtent {
    /// Display width, if known.
    pub width: Option<NonZeroU16>,
    /// Display height, if known.
    pub height: Option<NonZeroU16>,
}

impl DisplayExtent {
    /// Creates an extent with both dimensions known.
    ///
    /// A dimension of 0 is treated as unknown.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: NonZeroU16::new(width),
            height: NonZeroU16::new(height),
        }
    }

    /// An extent with neither dimension known.
    pub const fn unknown() -> Self {
        Self {
            width: None,
            height: None,
        }
    }

    /// Sets the width. 0 clears it.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = NonZeroU16::new(width);
        self
    }

    /// Sets the height. 0 clears it.
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = NonZeroU16::new(height);
        self
    }
}
