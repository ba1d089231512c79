use thiserror::Error;

use crate::analyze::histogram::Score;

#[derive(Error, Debug)]
pub enum ToolsError {
    #[error("Hex Decoding Error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Base64 Decoding Error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Length Mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },

    #[error("Input Too Short: keylength {keylength} needs {needed} bytes, got {actual}")]
    InputTooShort {
        keylength: usize,
        needed: usize,
        actual: usize,
    },

    #[error("Index Out Of Range: index {index} in histogram of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid Keylength Range: {min}..={max}")]
    InvalidKeyLengthRange { min: usize, max: usize },

    #[error("Empty Key")]
    EmptyKey,

    #[error("Empty Input")]
    EmptyInput,
}

pub type ToolsResult<T> = Result<T, ToolsError>;

/// Raised alongside a best-effort single-byte result whose score misses the English threshold.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("score {score:.2} is below the english threshold {threshold:.2}")]
pub struct LowConfidence {
    pub score: Score,
    pub threshold: Score,
}

/// Raised alongside a repeating-key attempt where at least half the streams look non-english.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{failures} out of {keylength} blocks look non-english")]
pub struct UnreliableKeyLength {
    pub keylength: usize,
    pub failures: usize,
}
