//! Packet protocol of the daisy chain.
//!
//! The chips form one long shift register. Every packet is 16 bits, register
//! address first, and each chip keeps the last 16 bits that passed through it.
//! A rising edge on the strobe line commits what every chip holds. Chip 0 is
//! the one wired to the host, so the packet shifted last ends up there.

use embedded_hal::digital::v2::OutputPin;
use log::{debug, trace};

use crate::bus::{BitOrder, ShiftOut};
use crate::display::DisplayResult;
use crate::error::{ChainError, MatrixError};
use crate::framebuffer::{FrameBuffer, ROWS};
use crate::register::{Register, MAX_INTENSITY, SCAN_ALL_DIGITS};

#[derive(Debug)]
pub(crate) struct Chain<BUS, CS> {
    bus: BUS,
    strobe: CS,
    chips: usize,
}

impl<BUS, CS> Chain<BUS, CS> {
    pub(crate) fn new(bus: BUS, strobe: CS, chips: usize) -> Result<Self, MatrixError> {
        if chips == 0 {
            return Err(MatrixError::InvalidConfiguration);
        }
        Ok(Self { bus, strobe, chips })
    }

    pub(crate) fn release(self) -> (BUS, CS) {
        (self.bus, self.strobe)
    }
}

impl<BUS, CS> Chain<BUS, CS>
where
    BUS: ShiftOut,
    CS: OutputPin,
{
    fn packet(&mut self, register: u8, data: u8, data_order: BitOrder) -> DisplayResult<BUS, CS> {
        self.strobe.set_low().map_err(ChainError::Strobe)?;
        self.bus
            .shift_out(register, BitOrder::MsbFirst)
            .map_err(ChainError::Bus)?;
        self.bus.shift_out(data, data_order).map_err(ChainError::Bus)
    }

    fn no_op(&mut self) -> DisplayResult<BUS, CS> {
        self.packet(Register::NoOp.addr(), 0x00, BitOrder::MsbFirst)
    }

    /// Rising edge on the strobe line.
    fn latch(&mut self) -> DisplayResult<BUS, CS> {
        self.strobe.set_low().map_err(ChainError::Strobe)?;
        self.strobe.set_high().map_err(ChainError::Strobe)
    }

    /// Writes the same register on every chip.
    pub(crate) fn broadcast(&mut self, register: Register, data: u8) -> DisplayResult<BUS, CS> {
        for _ in 0..self.chips {
            self.packet(register.addr(), data, BitOrder::MsbFirst)?;
        }
        self.latch()
    }

    /// Writes a register on chip `chip` only; the others receive no-ops.
    pub(crate) fn addressed(&mut self, chip: usize, register: Register, data: u8) -> DisplayResult<BUS, CS> {
        if chip >= self.chips {
            debug!("chip {} is not part of a {} chip chain", chip, self.chips);
            return Ok(());
        }
        trace!("chip {}: {:?} <- {:#04x}", chip, register, data);
        for _ in 0..self.chips - chip - 1 {
            self.no_op()?;
        }
        self.packet(register.addr(), data, BitOrder::MsbFirst)?;
        for _ in 0..chip {
            self.no_op()?;
        }
        self.latch()
    }

    /// Sends one framebuffer row to every chip. Pixel bytes go out LSB first,
    /// matching how the matrix columns are wired to the segment lines.
    pub(crate) fn refresh_row(&mut self, frame: &FrameBuffer, row: usize) -> DisplayResult<BUS, CS> {
        let Some(register) = Register::digit(row) else {
            return Ok(());
        };
        trace!("refresh row {}", row);
        for chip in (0..self.chips).rev() {
            let data = frame.row_byte(chip, row).unwrap_or(0);
            self.packet(register.addr(), data, BitOrder::LsbFirst)?;
        }
        self.latch()
    }

    pub(crate) fn refresh(&mut self, frame: &FrameBuffer) -> DisplayResult<BUS, CS> {
        for row in 0..ROWS {
            self.refresh_row(frame, row)?;
        }
        Ok(())
    }

    /// Sets the brightness of the whole chain; levels above 15 are ignored.
    pub(crate) fn set_intensity(&mut self, level: u8) -> DisplayResult<BUS, CS> {
        if level > MAX_INTENSITY {
            debug!("ignoring intensity {}", level);
            return Ok(());
        }
        self.broadcast(Register::Intensity, level)
    }

    pub(crate) fn set_chip_intensity(&mut self, chip: usize, level: u8) -> DisplayResult<BUS, CS> {
        if level > MAX_INTENSITY {
            debug!("ignoring intensity {} for chip {}", level, chip);
            return Ok(());
        }
        self.addressed(chip, Register::Intensity, level)
    }

    /// Leaves test mode, powers the chips up, scans all eight digits and
    /// blanks every digit register.
    pub(crate) fn init(&mut self) -> DisplayResult<BUS, CS> {
        debug!("init chain of {} chips", self.chips);
        self.strobe.set_high().map_err(ChainError::Strobe)?;
        self.broadcast(Register::DisplayTest, 0x00)?;
        self.broadcast(Register::Shutdown, 0x01)?;
        self.broadcast(Register::ScanLimit, SCAN_ALL_DIGITS)?;
        for digit in Register::DIGITS {
            self.broadcast(digit, 0x00)?;
        }
        Ok(())
    }
}
