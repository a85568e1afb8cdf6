//! Spectral analysis with FFT

pub mod windows;
pub mod windowing;
pub mod fft;
pub mod analysis;
pub mod compare;

pub use windows::{WindowType, generate_window};
pub use windowing::{apply_window, padded_length, preprocess_waveform, preprocess_with, zero_pad};
pub use fft::{FftEngine, fft_frequencies};
pub use analysis::{AnalyzerConfig, FrequencyBand, Spectrum, SpectrumAnalyzer, calculate_spectrum};
pub use compare::{ReferenceSpectrum, SpectrumComparison, compare_spectra, linspace};
