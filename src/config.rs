/// How pixel writes past the right edge are clipped.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClipMode {
    /// Every column `x < 8 * chips` is addressable.
    #[default]
    Exact,
    /// Columns past `7 * chips` are dropped, as the old Arduino library did.
    /// For chains longer than one chip this hides the right edge of most modules.
    Legacy,
}

impl ClipMode {
    pub fn accepts(self, x: usize, chips: usize) -> bool {
        match self {
            ClipMode::Exact => x < 8 * chips,
            ClipMode::Legacy => x <= 7 * chips,
        }
    }
}

/// Construction parameters for a [`Matrix`](crate::Matrix).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub chips: usize,
    pub clip: ClipMode,
    /// Brightness broadcast at the end of `init`, if any.
    pub intensity: Option<u8>,
}

impl Config {
    pub fn new(chips: usize) -> Self {
        Self {
            chips,
            clip: ClipMode::Exact,
            intensity: None,
        }
    }

    pub fn clip_mode(mut self, clip: ClipMode) -> Self {
        self.clip = clip;
        self
    }

    pub fn intensity(mut self, level: u8) -> Self {
        self.intensity = Some(level);
        self
    }
}
