/// Register addresses of a single chip. The address travels in the upper
/// byte of every 16-bit packet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

/// Highest value the intensity register accepts.
pub const MAX_INTENSITY: u8 = 0x0F;

/// Scan limit value that enables all eight digits.
pub const SCAN_ALL_DIGITS: u8 = 0x07;

impl Register {
    pub const DIGITS: [Register; 8] = [
        Register::Digit0,
        Register::Digit1,
        Register::Digit2,
        Register::Digit3,
        Register::Digit4,
        Register::Digit5,
        Register::Digit6,
        Register::Digit7,
    ];

    pub fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register holding framebuffer row `row`.
    pub fn digit(row: usize) -> Option<Register> {
        Self::DIGITS.get(row).copied()
    }

    pub fn is_digit(self) -> bool {
        matches!(
            self,
            Register::Digit0
                | Register::Digit1
                | Register::Digit2
                | Register::Digit3
                | Register::Digit4
                | Register::Digit5
                | Register::Digit6
                | Register::Digit7
        )
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register.addr()
    }
}
