//! T8 Spectrum - vibration record decoding and spectral analysis
//! 
//! Decodes the compressed sample blocks served by T8 monitoring units and
//! recomputes spectra from raw waveforms for comparison with the unit's own.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod client;
pub mod decoder;
pub mod error;
pub mod output;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use client::{T8Client, Waveform};
pub use decoder::{decode_samples, decode_scaled, scale_samples};
pub use error::{DecodeError, InvalidInputError};
pub use spectrum::{
    calculate_spectrum, compare_spectra, preprocess_waveform, FrequencyBand, ReferenceSpectrum,
    Spectrum, SpectrumAnalyzer, WindowType,
};
