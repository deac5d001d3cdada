//! Byte transports for the chain's data and clock lines.
//!
//! [`BitBangBus`] toggles two GPIO lines in software, [`SpiBus`] hands bytes to
//! a hardware SPI peripheral. Both put the same bits on the wire.

use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Clocks single bytes out to the first chip of the chain.
pub trait ShiftOut {
    type Error;

    fn shift_out(&mut self, byte: u8, order: BitOrder) -> Result<(), Self::Error>;
}

impl<T: ShiftOut + ?Sized> ShiftOut for &mut T {
    type Error = T::Error;

    fn shift_out(&mut self, byte: u8, order: BitOrder) -> Result<(), Self::Error> {
        (**self).shift_out(byte, order)
    }
}

/// Software clocked transport. Data is sampled by the chips on the rising
/// clock edge and the clock idles low.
#[derive(Debug)]
pub struct BitBangBus<DIN, CLK> {
    data: DIN,
    clock: CLK,
}

impl<DIN, CLK> BitBangBus<DIN, CLK>
where
    DIN: OutputPin,
    CLK: OutputPin<Error = DIN::Error>,
{
    pub fn new(data: DIN, mut clock: CLK) -> Result<Self, DIN::Error> {
        clock.set_low()?;
        Ok(Self { data, clock })
    }
}

impl<DIN, CLK> BitBangBus<DIN, CLK> {
    pub fn release(self) -> (DIN, CLK) {
        (self.data, self.clock)
    }
}

impl<DIN, CLK> ShiftOut for BitBangBus<DIN, CLK>
where
    DIN: OutputPin,
    CLK: OutputPin<Error = DIN::Error>,
{
    type Error = DIN::Error;

    fn shift_out(&mut self, byte: u8, order: BitOrder) -> Result<(), Self::Error> {
        let mut bits = match order {
            BitOrder::MsbFirst => byte,
            BitOrder::LsbFirst => byte.reverse_bits(),
        };
        for _ in 0..8 {
            if bits & 0x80 == 0x80 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            bits <<= 1;
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        Ok(())
    }
}

/// Hardware clocked transport over an SPI peripheral configured for mode 0,
/// most significant bit first.
#[derive(Debug)]
pub struct SpiBus<SPI> {
    spi: SPI,
}

impl<SPI> SpiBus<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: Write<u8>> ShiftOut for SpiBus<SPI> {
    type Error = SPI::Error;

    fn shift_out(&mut self, byte: u8, order: BitOrder) -> Result<(), Self::Error> {
        // the peripheral only speaks MSB first
        let word = match order {
            BitOrder::MsbFirst => byte,
            BitOrder::LsbFirst => byte.reverse_bits(),
        };
        self.spi.write(&[word])
    }
}
