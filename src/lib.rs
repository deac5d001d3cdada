//! Driver for a daisy chain of MAX7219 LED dot-matrix modules.
//!
//! The chain is presented as a single grid, 8 pixels high and 8 pixels wide per
//! module. Drawing goes into an in-memory [`FrameBuffer`]; refreshing pushes it
//! to the modules row by row.
//!
//! ```rust, ignore
//! use matrix_chain::{BitBangBus, Matrix};
//!
//! let bus = BitBangBus::new(din, clk)?;
//! let mut matrix = Matrix::new(bus, cs, 4)?;
//! matrix.init()?;
//! matrix.set_brightness(2)?;
//! matrix.write_str("Hi!", 4)?;
//! loop {
//!     matrix.shift_right();
//!     matrix.refresh_display()?;
//!     delay.delay_ms(75u32);
//! }
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod bus;
mod chain;
mod config;
mod display;
mod error;
mod font;
mod framebuffer;
mod register;
mod shift;
mod text;

pub use bus::{BitBangBus, BitOrder, ShiftOut, SpiBus};
pub use config::{ClipMode, Config};
pub use display::{DisplayResult, Matrix};
pub use error::{ChainError, MatrixError};
pub use font::{Ascii5x8, Font, Glyph};
pub use framebuffer::{FrameBuffer, CHIP_WIDTH, ROWS};
pub use register::{Register, MAX_INTENSITY, SCAN_ALL_DIGITS};
