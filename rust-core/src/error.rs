//! Error types for sample decoding and spectral analysis

use thiserror::Error;

/// Failure while turning an encoded sample block into samples.
///
/// Each variant names the decoding stage that rejected the input.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid zlib stream: {0}")]
    Inflate(#[source] std::io::Error),

    #[error("Decompressed buffer has odd length {len}; samples are 2 bytes wide")]
    TrailingByte { len: usize },
}

/// Structurally invalid arguments passed to the analysis pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("Sample sequence is empty")]
    EmptySamples,

    #[error("Sample rate must be positive and finite (got {0})")]
    InvalidSampleRate(f64),

    #[error("Invalid frequency band: fmin={fmin}, fmax={fmax}")]
    InvalidBand { fmin: f64, fmax: f64 },

    #[error("Spectrum is empty")]
    EmptySpectrum,
}
