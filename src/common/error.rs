use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Invalid arguments
    #[error("empty data")]
    EmptyData,
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid error correction level")]
    InvalidECLevel,
    #[error("invalid character")]
    InvalidChar,
    #[error("invalid masking pattern")]
    InvalidMaskingPattern,
    #[error("value {value} does not fit in {size} bits")]
    InvalidBitWidth { value: u64, size: usize },

    // Stubbed features
    #[error("mode is not supported by the encoder")]
    UnsupportedMode,
    #[error("micro qr versions are not supported")]
    UnsupportedVersion,

    // Capacity
    #[error("data too long")]
    DataTooLong,
    #[error("capacity overflow: {required} bits needed, {available} bits available")]
    CapacityOverflow { required: usize, available: usize },
}

pub type QRResult<T> = Result<T, QRError>;
