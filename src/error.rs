use thiserror::Error;

/// Failures that come from how the matrix is configured or what is drawn on it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError {
    #[error("a chain needs at least one chip")]
    InvalidConfiguration,
    #[error("no glyph for character {0:?}")]
    GlyphNotFound(char),
}

/// Failures reported by the hardware collaborators while talking to the chain.
#[derive(Debug, Error)]
pub enum ChainError<B, P> {
    #[error("bus transfer failed: {0:?}")]
    Bus(B),
    #[error("strobe line failed: {0:?}")]
    Strobe(P),
}
