use embedded_hal::digital::v2::OutputPin;
use log::debug;

use crate::bus::ShiftOut;
use crate::chain::Chain;
use crate::config::Config;
use crate::error::{ChainError, MatrixError};
use crate::font::{Ascii5x8, Font};
use crate::framebuffer::{FrameBuffer, ROWS};
use crate::register::Register;

/// Result of an operation that talks to the chain.
pub type DisplayResult<BUS, CS> =
    Result<(), ChainError<<BUS as ShiftOut>::Error, <CS as OutputPin>::Error>>;

/// A chain of LED matrix modules seen as one 8 x `8 * chips` pixel grid.
///
/// Drawing only touches the framebuffer; nothing reaches the modules until
/// [`refresh_display`](Matrix::refresh_display) or
/// [`refresh_row`](Matrix::refresh_row) is called.
#[derive(Debug)]
pub struct Matrix<BUS, CS, F = Ascii5x8> {
    chain: Chain<BUS, CS>,
    frame: FrameBuffer,
    font: F,
    intensity: Option<u8>,
}

impl<BUS, CS> Matrix<BUS, CS, Ascii5x8> {
    /// Matrix of `chips` modules with exact clipping and the built-in font.
    pub fn new(bus: BUS, strobe: CS, chips: usize) -> Result<Self, MatrixError> {
        Self::with_config(bus, strobe, Config::new(chips), Ascii5x8)
    }
}

impl<BUS, CS, F> Matrix<BUS, CS, F> {
    pub fn with_config(bus: BUS, strobe: CS, config: Config, font: F) -> Result<Self, MatrixError> {
        let frame = FrameBuffer::with_clip_mode(config.chips, config.clip)?;
        let chain = Chain::new(bus, strobe, config.chips)?;
        Ok(Self {
            chain,
            frame,
            font,
            intensity: config.intensity,
        })
    }

    pub fn chips(&self) -> usize {
        self.frame.chips()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn set_pixel(&mut self, x: usize, y: usize) {
        self.frame.set_pixel(x, y);
    }

    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        self.frame.clear_pixel(x, y);
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame.pixel(x, y)
    }

    pub fn clear_all(&mut self) {
        self.frame.clear_all();
    }

    pub fn shift_left(&mut self) {
        self.frame.shift_left();
    }

    pub fn shift_right(&mut self) {
        self.frame.shift_right();
    }

    /// Replaces the framebuffer rows of one module, bit 7 being its leftmost column.
    pub fn write_chip_rows(&mut self, chip: usize, rows: &[u8; ROWS]) {
        self.frame.set_chip_rows(chip, rows);
    }

    pub fn chip_rows(&self, chip: usize) -> Option<[u8; ROWS]> {
        self.frame.chip_rows(chip)
    }

    /// Hands back the bus and strobe line.
    pub fn release(self) -> (BUS, CS) {
        self.chain.release()
    }
}

impl<BUS, CS, F: Font> Matrix<BUS, CS, F> {
    pub fn write_char(&mut self, code: char, x: usize) -> Result<usize, MatrixError> {
        self.frame.write_char(&self.font, code, x)
    }

    pub fn write_str(&mut self, text: &str, x: usize) -> Result<usize, MatrixError> {
        self.frame.write_str(&self.font, text, x)
    }
}

impl<BUS, CS, F> Matrix<BUS, CS, F>
where
    BUS: ShiftOut,
    CS: OutputPin,
{
    /// Brings every module out of shutdown and test mode with blank digits,
    /// then applies the configured brightness.
    pub fn init(&mut self) -> DisplayResult<BUS, CS> {
        self.chain.init()?;
        if let Some(level) = self.intensity {
            self.chain.set_intensity(level)?;
        }
        Ok(())
    }

    pub fn refresh_row(&mut self, row: usize) -> DisplayResult<BUS, CS> {
        self.chain.refresh_row(&self.frame, row)
    }

    pub fn refresh_display(&mut self) -> DisplayResult<BUS, CS> {
        self.chain.refresh(&self.frame)
    }

    /// Blanks the framebuffer and pushes it out.
    pub fn clear_display(&mut self) -> DisplayResult<BUS, CS> {
        self.frame.clear_all();
        self.refresh_display()
    }

    /// Brightness 0..=15 for every module. Other values are ignored.
    pub fn set_brightness(&mut self, level: u8) -> DisplayResult<BUS, CS> {
        self.chain.set_intensity(level)
    }

    pub fn set_chip_brightness(&mut self, chip: usize, level: u8) -> DisplayResult<BUS, CS> {
        self.chain.set_chip_intensity(chip, level)
    }

    pub fn power_on(&mut self) -> DisplayResult<BUS, CS> {
        debug!("power on");
        self.chain.broadcast(Register::Shutdown, 0x01)
    }

    pub fn power_off(&mut self) -> DisplayResult<BUS, CS> {
        debug!("power off");
        self.chain.broadcast(Register::Shutdown, 0x00)
    }

    /// Lights every LED regardless of the digit registers while enabled.
    pub fn set_test_mode(&mut self, enabled: bool) -> DisplayResult<BUS, CS> {
        debug!("test mode {}", enabled);
        self.chain.broadcast(Register::DisplayTest, u8::from(enabled))
    }

    pub fn send_all(&mut self, register: Register, data: u8) -> DisplayResult<BUS, CS> {
        self.chain.broadcast(register, data)
    }

    /// Writes a register on one module; chips outside the chain are ignored.
    pub fn send_to(&mut self, chip: usize, register: Register, data: u8) -> DisplayResult<BUS, CS> {
        self.chain.addressed(chip, register, data)
    }
}
