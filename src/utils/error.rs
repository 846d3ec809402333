//! Error types for the transform service.
//!
//! Provides a small error taxonomy using `thiserror`. Everything a caller can
//! trigger (bad image bytes, unknown operation name) is recoverable and maps
//! to a 400 at the transport layer; `InvalidBuffer` is a programming
//! invariant that a conforming decoder never produces.

use thiserror::Error;

/// Main error type for the transform engine.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The requested operation name is not in the registry.
    #[error("Unknown operation: {name}")]
    UnknownOperation {
        /// The name the caller supplied
        name: String,
        /// Sorted list of registered operation names
        allowed: Vec<&'static str>,
    },

    /// The input bytes could not be decoded as an image.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The transformed buffer could not be encoded to PNG.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Pixel data length does not match `width * height * 4`.
    ///
    /// This should never occur given a conforming decoder; it indicates a bug
    /// rather than bad caller input.
    #[error("Invalid pixel buffer: {actual} bytes for {width}x{height} (expected {expected})")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Convenience result type for engine operations.
pub type TransformResult<T> = Result<T, TransformError>;

// Helper methods for error creation
impl TransformError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }
}
