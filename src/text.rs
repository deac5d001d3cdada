use crate::error::MatrixError;
use crate::font::Font;
use crate::framebuffer::{FrameBuffer, ROWS};

impl FrameBuffer {
    /// Draws `code` with its left edge at column `x` and returns the glyph width.
    ///
    /// The glyph replaces whatever was under its footprint. Columns past the
    /// right edge are dropped by the pixel bound check.
    pub fn write_char<F>(&mut self, font: &F, code: char, x: usize) -> Result<usize, MatrixError>
    where
        F: Font + ?Sized,
    {
        let glyph = font.glyph(code).ok_or(MatrixError::GlyphNotFound(code))?;
        for column in 0..glyph.width() {
            let px = x.saturating_add(column);
            for row in 0..ROWS {
                self.set(px, row, glyph.is_lit(column, row));
            }
        }
        Ok(glyph.width())
    }

    /// Draws `text` left to right starting at column `x`, one blank column
    /// between glyphs. Stops at the first character that would start past the
    /// right edge.
    ///
    /// Returns how many columns were advanced. A missing glyph aborts the call;
    /// characters before it stay drawn.
    pub fn write_str<F>(&mut self, font: &F, text: &str, x: usize) -> Result<usize, MatrixError>
    where
        F: Font + ?Sized,
    {
        let width = self.width();
        let mut offset = 0;
        for code in text.chars() {
            if x.saturating_add(offset) > width {
                break;
            }
            let advance = self.write_char(font, code, x + offset)?;
            offset += advance + 1;
        }
        Ok(offset)
    }
}
