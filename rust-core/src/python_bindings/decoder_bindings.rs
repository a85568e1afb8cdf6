//! Python bindings for the sample decoder

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::PyArray1;

use crate::decoder;

/// Decode a base64/zlib sample block into raw samples
///
/// Args:
///     encoded: Base64 text as returned in the `data` field
///     factor: Scale factor applied to every sample (default: 1.0)
///
/// Returns:
///     Samples as numpy array
#[pyfunction]
#[pyo3(signature = (encoded, factor=1.0))]
pub fn decode_samples<'py>(
    py: Python<'py>,
    encoded: &str,
    factor: f64,
) -> PyResult<&'py PyArray1<f64>> {
    let samples = decoder::decode_scaled(encoded, factor)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyArray1::from_vec(py, samples))
}
