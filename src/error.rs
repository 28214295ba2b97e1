//! Error type for tripcode hash parsing.
//!
//! Decoding is the only fallible operation in this crate. Both variants are
//! the same condition from the host's point of view (a malformed hash line);
//! they only differ in the detail they carry for diagnostics.

/// A tripcode hash line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Fewer significant characters than a tripcode needs.
    #[error("Malformed tripcode hash: expected {expected} characters, got {actual}")]
    Length { expected: usize, actual: usize },

    /// A byte outside the crypt alphabet inside the hash window.
    #[error("Malformed tripcode hash: invalid character {byte:#04x} at position {position}")]
    InvalidSymbol { position: usize, byte: u8 },
}
