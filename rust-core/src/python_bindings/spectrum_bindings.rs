//! Python bindings for spectrum analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};

use crate::error::InvalidInputError;
use crate::spectrum::{self, AnalyzerConfig, FrequencyBand, SpectrumAnalyzer, WindowType};

fn to_py_err(err: InvalidInputError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn window_from_name(name: &str) -> PyResult<WindowType> {
    WindowType::from_name(name)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown window type '{name}'")))
}

/// Apply a Hann window and zero-pad to the next power of two
///
/// Args:
///     waveform: Input signal as numpy array
///
/// Returns:
///     Preprocessed signal as numpy array
#[pyfunction]
pub fn preprocess_waveform<'py>(
    py: Python<'py>,
    waveform: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyArray1<f64>> {
    let prepared = spectrum::preprocess_waveform(waveform.as_slice()?).map_err(to_py_err)?;
    Ok(PyArray1::from_vec(py, prepared))
}

/// Compute the band-limited RMS magnitude spectrum
///
/// Args:
///     waveform: Input signal (typically preprocessed)
///     sample_rate: Sample rate in Hz
///     fmin: Lower band edge in Hz
///     fmax: Upper band edge in Hz
///
/// Returns:
///     Tuple of (magnitudes, frequencies) numpy arrays
#[pyfunction]
pub fn calculate_spectrum<'py>(
    py: Python<'py>,
    waveform: PyReadonlyArray1<f64>,
    sample_rate: f64,
    fmin: f64,
    fmax: f64,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let band = FrequencyBand::new(fmin, fmax).map_err(to_py_err)?;
    let result = spectrum::calculate_spectrum(waveform.as_slice()?, sample_rate, band)
        .map_err(to_py_err)?;

    let (magnitudes, frequencies) = result.into_parts();
    Ok((PyArray1::from_vec(py, magnitudes), PyArray1::from_vec(py, frequencies)))
}

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     fmin: Lower band edge in Hz
    ///     fmax: Upper band edge in Hz
    ///     window: Window name ("hann", "hamming", "blackman", "rectangular")
    #[new]
    #[pyo3(signature = (sample_rate, fmin=0.0, fmax=1000.0, window="hann"))]
    fn new(sample_rate: f64, fmin: f64, fmax: f64, window: &str) -> PyResult<Self> {
        let config = AnalyzerConfig {
            sample_rate,
            band: FrequencyBand::new(fmin, fmax).map_err(to_py_err)?,
            window_type: window_from_name(window)?,
        };

        Ok(Self {
            analyzer: SpectrumAnalyzer::new(config).map_err(to_py_err)?,
        })
    }

    /// Window, pad and analyze a raw waveform
    ///
    /// Returns:
    ///     Tuple of (magnitudes, frequencies) numpy arrays
    fn analyze<'py>(
        &self,
        py: Python<'py>,
        waveform: PyReadonlyArray1<f64>,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let result = self.analyzer.analyze(waveform.as_slice()?).map_err(to_py_err)?;

        let (magnitudes, frequencies) = result.into_parts();
        Ok((PyArray1::from_vec(py, magnitudes), PyArray1::from_vec(py, frequencies)))
    }

    /// Get current sample rate
    fn get_sample_rate(&self) -> f64 {
        self.analyzer.config().sample_rate
    }

    /// Get current band as (fmin, fmax)
    fn get_band(&self) -> (f64, f64) {
        let band = self.analyzer.config().band;
        (band.fmin(), band.fmax())
    }
}
