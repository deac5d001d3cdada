//! One-pixel horizontal scrolling of the framebuffer.
//!
//! Bits carry between neighbouring chips of the same row but never into the
//! next row. Pixels pushed past an edge are lost and blank columns enter from
//! the opposite edge.

use crate::framebuffer::FrameBuffer;

impl FrameBuffer {
    /// Moves every pixel one column to the right.
    pub fn shift_right(&mut self) {
        let chips = self.chips();
        for i in (0..self.bytes.len()).rev() {
            // the left neighbour has not been shifted yet
            let carry = i % chips != 0 && self.bytes[i - 1] & 0x01 != 0;
            self.bytes[i] >>= 1;
            if carry {
                self.bytes[i] |= 0x80;
            }
        }
    }

    /// Moves every pixel one column to the left.
    pub fn shift_left(&mut self) {
        let chips = self.chips();
        for i in 0..self.bytes.len() {
            let carry = (i + 1) % chips != 0 && self.bytes[i + 1] & 0x80 != 0;
            self.bytes[i] <<= 1;
            if carry {
                self.bytes[i] |= 0x01;
            }
        }
    }
}
