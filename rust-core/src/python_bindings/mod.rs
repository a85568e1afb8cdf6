//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod decoder_bindings;
mod spectrum_bindings;

/// Python module definition
#[pymodule]
fn t8_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(decoder_bindings::decode_samples, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::preprocess_waveform, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::calculate_spectrum, m)?)?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    Ok(())
}
