//! Waveform preprocessing: windowing and zero-padding
//!
//! Applies a taper to the time-domain record to reduce spectral leakage,
//! then pads it with trailing zeros up to a power-of-two FFT size.

use super::windows::{generate_window, WindowType};
use crate::error::InvalidInputError;

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Apply window in-place
pub fn apply_window_inplace(signal: &mut [f64], window_type: WindowType) {
    let window = generate_window(window_type, signal.len());

    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Padded length for a record of `len` samples: 2^ceil(log2(len))
///
/// Returns `len` itself when it is already a power of two.
pub fn padded_length(len: usize) -> Result<usize, InvalidInputError> {
    if len == 0 {
        return Err(InvalidInputError::EmptySamples);
    }
    Ok(len.next_power_of_two())
}

/// Extend `signal` with trailing zeros up to the next power of two
pub fn zero_pad(signal: &[f64]) -> Result<Vec<f64>, InvalidInputError> {
    let target = padded_length(signal.len())?;

    let mut padded = Vec::with_capacity(target);
    padded.extend_from_slice(signal);
    padded.resize(target, 0.0);
    Ok(padded)
}

/// Window with `window_type`, then zero-pad to a power of two
pub fn preprocess_with(
    signal: &[f64],
    window_type: WindowType,
) -> Result<Vec<f64>, InvalidInputError> {
    let target = padded_length(signal.len())?;

    let mut prepared = Vec::with_capacity(target);
    prepared.extend_from_slice(signal);
    apply_window_inplace(&mut prepared, window_type);
    prepared.resize(target, 0.0);
    Ok(prepared)
}

/// Prepare a raw waveform for FFT analysis
///
/// Multiplies by a symmetric Hann window of the record length and pads the
/// result to the next power of two.
pub fn preprocess_waveform(signal: &[f64]) -> Result<Vec<f64>, InvalidInputError> {
    preprocess_with(signal, WindowType::Hann)
}
