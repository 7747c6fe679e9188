use thiserror::Error;

pub type Result<T> = std::result::Result<T, GolombError>;

#[derive(Debug, Error)]
pub enum GolombError {
    #[error("validation error: {0}")]
    Validation(String),

    /// The source ran dry while a code-word's payload was still incomplete.
    #[error("truncated stream: end of input inside a code-word")]
    TruncatedStream,

    /// A zero run longer than the output width can represent. The count is
    /// the number of zeros observed when decoding gave up.
    #[error("zero run of {zeros} bits does not fit the output width")]
    ZeroOverflow { zeros: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
