//! Software model of a daisy chain of MAX7219 chips.
//!
//! Every chip is a 16-bit shift register whose top bit feeds the next chip.
//! Bits enter chip 0 on a rising clock edge (pins) or eight at a time, MSB
//! first (SPI). A rising edge on the strobe line copies each chip's shift
//! register into its register file unless the address is a no-op.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

#[derive(Debug)]
struct State {
    shift: Vec<u16>,
    registers: Vec<[u8; 16]>,
    data: bool,
    clock: bool,
    strobe: bool,
    bits: usize,
    latches: usize,
}

impl State {
    fn shift_in(&mut self, bit: bool) {
        let mut carry = u16::from(bit);
        for word in self.shift.iter_mut() {
            let out = *word >> 15;
            *word = (*word << 1) | carry;
            carry = out;
        }
        self.bits += 1;
    }

    fn latch(&mut self) {
        for (word, registers) in self.shift.iter().zip(self.registers.iter_mut()) {
            let address = usize::from(*word >> 8) & 0x0F;
            if address != 0 {
                registers[address] = (*word & 0xFF) as u8;
            }
        }
        self.latches += 1;
    }
}

#[derive(Debug, Clone)]
pub struct SimChain {
    state: Rc<RefCell<State>>,
}

impl SimChain {
    pub fn new(chips: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                shift: vec![0; chips],
                registers: vec![[0; 16]; chips],
                data: false,
                clock: false,
                strobe: true,
                bits: 0,
                latches: 0,
            })),
        }
    }

    pub fn data_pin(&self) -> SimPin {
        SimPin {
            state: self.state.clone(),
            line: Line::Data,
        }
    }

    pub fn clock_pin(&self) -> SimPin {
        SimPin {
            state: self.state.clone(),
            line: Line::Clock,
        }
    }

    pub fn strobe_pin(&self) -> SimPin {
        SimPin {
            state: self.state.clone(),
            line: Line::Strobe,
        }
    }

    pub fn spi(&self) -> SimSpi {
        SimSpi {
            state: self.state.clone(),
        }
    }

    /// Latched value of `register` on chip `chip`.
    pub fn register(&self, chip: usize, register: u8) -> u8 {
        self.state.borrow().registers[chip][usize::from(register)]
    }

    /// Digit registers 1..=8 of one chip.
    pub fn digits(&self, chip: usize) -> [u8; 8] {
        let state = self.state.borrow();
        let mut digits = [0; 8];
        digits.copy_from_slice(&state.registers[chip][1..=8]);
        digits
    }

    /// Complete 16-bit packets clocked in so far.
    pub fn packets(&self) -> usize {
        self.state.borrow().bits / 16
    }

    pub fn latches(&self) -> usize {
        self.state.borrow().latches
    }

    pub fn preset(&self, register: u8, value: u8) {
        for registers in self.state.borrow_mut().registers.iter_mut() {
            registers[usize::from(register)] = value;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Line {
    Data,
    Clock,
    Strobe,
}

#[derive(Debug)]
pub struct SimPin {
    state: Rc<RefCell<State>>,
    line: Line,
}

impl OutputPin for SimPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        match self.line {
            Line::Data => state.data = false,
            Line::Clock => state.clock = false,
            Line::Strobe => state.strobe = false,
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        match self.line {
            Line::Data => state.data = true,
            Line::Clock => {
                if !state.clock {
                    let bit = state.data;
                    state.shift_in(bit);
                }
                state.clock = true;
            }
            Line::Strobe => {
                if !state.strobe {
                    state.latch();
                }
                state.strobe = true;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct SimSpi {
    state: Rc<RefCell<State>>,
}

impl Write<u8> for SimSpi {
    type Error = Infallible;

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        for word in words {
            for bit in (0..8).rev() {
                state.shift_in(word & (1u8 << bit) != 0);
            }
        }
        Ok(())
    }
}
