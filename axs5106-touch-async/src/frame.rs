//! Decoding of the raw touch-data frame.

use heapless::Vec;

use crate::rotation::{DisplayExtent, Rotation};

/// Size of the touch-data frame in bytes.
pub const FRAME_SIZE: usize = 14;

/// Maximum number of simultaneous touch points the controller reports.
pub const MAX_TOUCH_POINTS: usize = 5;

const COUNT_OFFSET: usize = 1;
const POINTS_OFFSET: usize = 2;
const POINT_RECORD_SIZE: usize = 6;

/// A single decoded contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    /// Display x-coordinate after rotation.
    pub x: u16,
    /// Display y-coordinate after rotation.
    pub y: u16,
    /// Index of the point within its frame. Not stable across frames.
    pub id: u8,
}

/// The touch points of one frame.
pub type TouchPoints = Vec<TouchPoint, MAX_TOUCH_POINTS>;

/// The raw contents of the touch-data register.
///
/// Byte 1 holds the touch count. Each point record is 6 bytes starting at
/// byte 2: a 12-bit X in the low nibble of byte 0 and byte 1, a 12-bit Y in
/// the low nibble of byte 2 and byte 3. Bytes 4 and 5 are not used.
///
/// Only the first two records fit in the 14-byte frame; later records read
/// as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchFrame([u8; FRAME_SIZE]);

impl TouchFrame {
    /// Wraps a raw frame.
    pub const fn new(bytes: [u8; FRAME_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the frame.
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    /// The touch count as reported by the controller, not clamped.
    pub fn touch_count(&self) -> u8 {
        self.0[COUNT_OFFSET]
    }

    /// Number of point records that will be decoded.
    pub fn point_count(&self) -> usize {
        usize::from(self.touch_count()).min(MAX_TOUCH_POINTS)
    }

    /// The 12-bit raw coordinates of point `index`.
    pub fn raw_point(&self, index: usize) -> (u16, u16) {
        let offset = POINTS_OFFSET + index * POINT_RECORD_SIZE;
        let x = ((self.byte(offset) as u16 & 0x0F) << 8) | self.byte(offset + 1) as u16;
        let y = ((self.byte(offset + 2) as u16 & 0x0F) << 8) | self.byte(offset + 3) as u16;
        (x, y)
    }

    fn byte(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl From<[u8; FRAME_SIZE]> for TouchFrame {
    fn from(bytes: [u8; FRAME_SIZE]) -> Self {
        Self(bytes)
    }
}

/// Turns raw frames into oriented touch points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchDecoder {
    rotation: Rotation,
    extent: DisplayExtent,
}

impl TouchDecoder {
    /// Creates a decoder with a fixed orientation.
    pub const fn new(rotation: Rotation, extent: DisplayExtent) -> Self {
        Self { rotation, extent }
    }

    /// The orientation applied to every point.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The display size used for mirroring.
    pub fn extent(&self) -> DisplayExtent {
        self.extent
    }

    /// Maps raw sensor coordinates to display coordinates.
    pub fn rotate(&self, raw_x: u16, raw_y: u16) -> (u16, u16) {
        self.rotation.apply(raw_x, raw_y, self.extent)
    }

    /// Decodes every reported point of `frame`, in record order.
    ///
    /// A count above [`MAX_TOUCH_POINTS`] is clamped. A zero count yields an
    /// empty list whatever the rest of the frame holds.
    pub fn decode(&self, frame: &TouchFrame) -> TouchPoints {
        let mut points = TouchPoints::new();
        for index in 0..frame.point_count() {
            let (raw_x, raw_y) = frame.raw_point(index);
            let (x, y) = self.rotate(raw_x, raw_y);
            log::trace!("Touch {index}: raw ({raw_x}, {raw_y}) -> ({x}, {y})");
            // point_count() never exceeds the capacity
            let _ = points.push(TouchPoint {
                x,
                y,
                id: index as u8,
            });
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_count(count: u8, fill: u8) -> TouchFrame {
        let mut bytes = [fill; FRAME_SIZE];
        bytes[COUNT_OFFSET] = count;
        TouchFrame::new(bytes)
    }

    #[test]
    fn zero_count_decodes_to_nothing() {
        let decoder = TouchDecoder::default();
        for fill in [0x00, 0x5A, 0xFF] {
            assert!(decoder.decode(&frame_with_count(0, fill)).is_empty());
        }
    }

    #[test]
    fn raw_coordinates_ignore_high_nibble() {
        let frame = TouchFrame::new([
            0x00, 0x01, 0xF1, 0x2C, 0xA0, 0x96, 0, 0, 0, 0, 0, 0, 0, 0,
        ]);
        assert_eq!(frame.raw_point(0), (0x12C, 0x096));

        let saturated = frame_with_count(1, 0xFF);
        assert_eq!(saturated.raw_point(0), (4095, 4095));
    }

    #[test]
    fn count_is_clamped_to_five() {
        let decoder = TouchDecoder::default();
        let points = decoder.decode(&frame_with_count(200, 0xFF));
        assert_eq!(points.len(), MAX_TOUCH_POINTS);
        for (index, point) in points.iter().enumerate() {
            assert_eq!(point.id, index as u8);
        }
    }

    #[test]
    fn records_past_the_frame_read_as_zero() {
        let frame = frame_with_count(5, 0xFF);
        assert_eq!(frame.raw_point(1), (4095, 4095));
        assert_eq!(frame.raw_point(2), (0, 0));
        assert_eq!(frame.raw_point(4), (0, 0));
    }

    #[test]
    fn decodes_two_points() {
        let frame = TouchFrame::new([
            0x00, 0x02, 0x01, 0x2C, 0x00, 0x96, 0, 0, 0x00, 0x64, 0x00, 0x32, 0, 0,
        ]);
        let points = TouchDecoder::default().decode(&frame);
        assert_eq!(
            points.as_slice(),
            &[
                TouchPoint { x: 300, y: 150, id: 0 },
                TouchPoint { x: 100, y: 50, id: 1 },
            ]
        );
    }

    #[test]
    fn decode_applies_rotation() {
        let frame = TouchFrame::new([
            0x00, 0x01, 0x00, 0x0A, 0x00, 0x32, 0, 0, 0, 0, 0, 0, 0, 0,
        ]);
        let decoder = TouchDecoder::new(Rotation::FlipX, DisplayExtent::new(240, 320));
        assert_eq!(decoder.rotate(10, 50), (229, 50));
        assert_eq!(
            decoder.decode(&frame).as_slice(),
            &[TouchPoint { x: 229, y: 50, id: 0 }]
        );
    }

    #[test]
    fn touch_count_is_not_clamped() {
        assert_eq!(frame_with_count(200, 0).touch_count(), 200);
        assert_eq!(frame_with_count(200, 0).point_count(), 5);
    }
}
