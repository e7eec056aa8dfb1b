/// Result type returned by the format decoders.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Every way a CIFF or CAFF byte stream can be rejected.
///
/// All variants are terminal: a decode that returns one of these has discarded
/// whatever it had built so far.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A 4-byte format tag did not match.
    #[error("malformed magic: expected {expected:?}, found {found:?}")]
    MalformedMagic {
        /// The tag the format requires.
        expected: &'static str,
        /// The bytes actually present (lossy text).
        found: String,
    },

    /// A declared size disagrees with the size implied by other fields.
    #[error("size mismatch in {field}: declared {declared}, expected {actual}")]
    SizeMismatch {
        /// Name of the declared size field.
        field: &'static str,
        /// Value stored in the stream.
        declared: u64,
        /// Value implied by the rest of the record.
        actual: u64,
    },

    /// The stream (or the enclosing block) ended before a field was complete.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Absolute offset of the failed read.
        offset: usize,
        /// Bytes the read required.
        needed: u64,
        /// Bytes left before the enclosing end.
        available: usize,
    },

    /// Bytes were left over where the structure should have ended.
    #[error("unexpected trailing data at offset {offset}: {remaining} bytes left")]
    UnexpectedTrailingData {
        /// Absolute offset where the structure ended.
        offset: usize,
        /// Bytes left unread.
        remaining: usize,
    },

    /// A numeric field is outside its permitted range.
    #[error("invalid value {value} for field {field}")]
    InvalidFieldRange {
        /// Field name, e.g. `"month"`.
        field: &'static str,
        /// Offending value.
        value: u64,
    },

    /// A CAFF block carried a tag this position does not accept.
    #[error("unknown block tag {tag:#04x}")]
    UnknownBlockTag {
        /// The raw tag byte.
        tag: u8,
    },

    /// The input decoded but contained no image to hand over.
    #[error("no image available")]
    NoImageAvailable,
}

/// Convenience result type used by the crate's outer layers.
pub type CaffResult<T> = Result<T, CaffError>;

/// Top-level error taxonomy for decoding plus raster export.
#[derive(thiserror::Error, Debug)]
pub enum CaffError {
    /// The input bytes were rejected by a decoder.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The decoded image cannot be handed to the raster encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaffError {
    /// Build a [`CaffError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaffError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
