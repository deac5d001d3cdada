use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::config::ClipMode;
use crate::error::MatrixError;

/// Rows per chip, and therefore rows of the whole grid.
pub const ROWS: usize = 8;
/// Columns per chip.
pub const CHIP_WIDTH: usize = 8;

/// Bitmap of the whole chain: 8 rows by `8 * chips` columns.
///
/// ```text
///            chip 0     chip 1          chip n-1
///  row 0  | bytes[0] | bytes[1] | ... | bytes[n-1]  |
///  row 1  | bytes[n] | ...                          |
///  ...
///  row 7  | ...                       | bytes[8n-1] |
/// ```
///
/// Inside a byte, bit 7 is the leftmost column of the chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    chips: usize,
    clip: ClipMode,
    pub(crate) bytes: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(chips: usize) -> Result<Self, MatrixError> {
        Self::with_clip_mode(chips, ClipMode::Exact)
    }

    pub fn with_clip_mode(chips: usize, clip: ClipMode) -> Result<Self, MatrixError> {
        if chips == 0 {
            return Err(MatrixError::InvalidConfiguration);
        }
        Ok(Self {
            chips,
            clip,
            bytes: vec![0u8; ROWS * chips],
        })
    }

    pub fn chips(&self) -> usize {
        self.chips
    }

    pub fn clip_mode(&self) -> ClipMode {
        self.clip
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        CHIP_WIDTH * self.chips
    }

    pub fn height(&self) -> usize {
        ROWS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw access to the bitmap; the length stays fixed.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The byte of `chip` that holds `row`.
    pub fn row_byte(&self, chip: usize, row: usize) -> Option<u8> {
        if chip >= self.chips || row >= ROWS {
            return None;
        }
        Some(self.bytes[chip + self.chips * row])
    }

    /// Byte index and bit mask of pixel (x, y), if it is inside the clipped grid.
    fn locate(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        if y >= ROWS || !self.clip.accepts(x, self.chips) {
            return None;
        }
        // both clip modes keep x below 8 * chips
        let chip = x / CHIP_WIDTH;
        let mask = 1u8 << (7 - (x % CHIP_WIDTH));
        Some((chip + self.chips * y, mask))
    }

    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.bytes[index] |= mask;
        }
    }

    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.bytes[index] &= !mask;
        }
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if on {
            self.set_pixel(x, y);
        } else {
            self.clear_pixel(x, y);
        }
    }

    /// Pixel state; anything outside the grid reads as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.locate(x, y)
            .is_some_and(|(index, mask)| self.bytes[index] & mask != 0)
    }

    pub fn clear_all(&mut self) {
        self.bytes.fill(0);
    }

    /// Rows of a single chip, top row first.
    pub fn chip_rows(&self, chip: usize) -> Option<[u8; ROWS]> {
        if chip >= self.chips {
            return None;
        }
        let mut rows = [0u8; ROWS];
        for (row, value) in rows.iter_mut().enumerate() {
            *value = self.bytes[chip + self.chips * row];
        }
        Some(rows)
    }

    /// Overwrites the rows of one chip. Ignored for chips outside the chain.
    pub fn set_chip_rows(&mut self, chip: usize, rows: &[u8; ROWS]) {
        if chip >= self.chips {
            return;
        }
        for (row, value) in rows.iter().enumerate() {
            self.bytes[chip + self.chips * row] = *value;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, ROWS as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            self.set(x, y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.bytes.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::{Point, Primitive};
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
    use embedded_graphics::Drawable;

    fn every_pixel(frame: &FrameBuffer) -> impl Iterator<Item = (usize, usize)> {
        let width = frame.width();
        (0..ROWS).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    #[test]
    fn zero_chips_is_rejected() {
        assert_eq!(FrameBuffer::new(0), Err(MatrixError::InvalidConfiguration));
    }

    #[test]
    fn buffer_is_sized_by_chip_count() {
        for chips in 1..=6 {
            let frame = FrameBuffer::new(chips).unwrap();
            assert_eq!(frame.as_bytes().len(), 8 * chips);
            assert_eq!(frame.width(), 8 * chips);
        }
    }

    #[test]
    fn clear_all_turns_everything_off() {
        for chips in 1..=4 {
            let mut frame = FrameBuffer::new(chips).unwrap();
            frame.as_mut_bytes().fill(0xA5);
            frame.clear_all();
            assert!(every_pixel(&frame).all(|(x, y)| !frame.pixel(x, y)));
        }
    }

    #[test]
    fn set_then_clear_touches_only_the_target() {
        let mut frame = FrameBuffer::new(3).unwrap();
        for (i, byte) in frame.as_mut_bytes().iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37);
        }
        let points: Vec<_> = every_pixel(&frame).collect();
        for (x, y) in points {
            let before = frame.clone();
            let was_on = frame.pixel(x, y);
            frame.set_pixel(x, y);
            assert!(frame.pixel(x, y));
            frame.clear_pixel(x, y);
            assert!(!frame.pixel(x, y));
            if was_on {
                frame.set_pixel(x, y);
            }
            assert_eq!(frame, before, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn addressing_is_bijective() {
        let mut frame = FrameBuffer::new(3).unwrap();
        let points: Vec<_> = every_pixel(&frame).collect();
        for (x, y) in points {
            frame.clear_all();
            frame.set_pixel(x, y);
            let lit: u32 = frame.as_bytes().iter().map(|b| b.count_ones()).sum();
            assert_eq!(lit, 1);
            assert!(frame.pixel(x, y));
        }
    }

    #[test]
    fn chip_boundary_lands_in_separate_bytes() {
        let mut frame = FrameBuffer::new(2).unwrap();
        frame.set_pixel(8, 0);
        assert_eq!(frame.as_bytes()[1], 0b1000_0000);
        assert_eq!(frame.as_bytes()[0], 0);
        frame.set_pixel(7, 0);
        assert_eq!(frame.as_bytes()[0], 0b0000_0001);
        assert_eq!(frame.as_bytes()[1], 0b1000_0000);
    }

    #[test]
    fn rows_are_strided_by_chip_count() {
        let mut frame = FrameBuffer::new(2).unwrap();
        frame.set_pixel(9, 3);
        assert_eq!(frame.as_bytes()[1 + 2 * 3], 0b0100_0000);
        assert_eq!(frame.row_byte(1, 3), Some(0b0100_0000));
        assert_eq!(frame.row_byte(2, 0), None);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut frame = FrameBuffer::new(2).unwrap();
        frame.set_pixel(16, 0);
        frame.set_pixel(0, 8);
        frame.set_pixel(usize::MAX, usize::MAX);
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
        assert!(!frame.pixel(16, 0));
    }

    #[test]
    fn legacy_clipping_hides_the_last_columns() {
        let mut frame = FrameBuffer::with_clip_mode(2, ClipMode::Legacy).unwrap();
        frame.set_pixel(14, 0);
        frame.set_pixel(15, 0);
        assert_eq!(frame.row_byte(1, 0), Some(0b0000_0010));
    }

    #[test]
    fn chip_rows_round_trip() {
        let mut frame = FrameBuffer::new(3).unwrap();
        let rows = [1, 2, 3, 4, 5, 6, 7, 8];
        frame.set_chip_rows(1, &rows);
        assert_eq!(frame.chip_rows(1), Some(rows));
        assert_eq!(frame.chip_rows(0), Some([0; 8]));
        assert_eq!(frame.as_bytes()[1 + 3 * 7], 8);
        frame.set_chip_rows(3, &[0xFF; 8]);
        assert_eq!(frame.chip_rows(3), None);
    }

    #[test]
    fn draws_embedded_graphics_primitives() {
        let mut frame = FrameBuffer::new(2).unwrap();
        assert_eq!(frame.size(), Size::new(16, 8));

        Line::new(Point::new(0, 0), Point::new(15, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.row_byte(0, 0), Some(0xFF));
        assert_eq!(frame.row_byte(1, 0), Some(0xFF));

        Rectangle::new(Point::new(-2, 6), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.row_byte(0, 6), Some(0b1100_0000));
        assert_eq!(frame.row_byte(0, 7), Some(0b1100_0000));

        DrawTarget::clear(&mut frame, BinaryColor::Off).unwrap();
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
    }
}
