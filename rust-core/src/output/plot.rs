//! SVG charts of waves and spectra

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::client::Waveform;
use crate::spectrum::{FrequencyBand, ReferenceSpectrum, Spectrum};

const CHART_SIZE: (u32, u32) = (1200, 600);

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Nothing to plot")]
    NoData,

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}

fn ensure_parent(path: &Path) -> Result<(), PlotError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| PlotError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Axis range covering `values` with a 5% margin; flat data gets a unit span
fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let margin = (hi - lo) * 0.05;
    (lo - margin)..(hi + margin)
}

fn band_range(band: FrequencyBand) -> Range<f64> {
    if band.fmin() < band.fmax() {
        band.fmin()..band.fmax()
    } else {
        (band.fmin() - 1.0)..(band.fmax() + 1.0)
    }
}

/// Spectrum points sorted by frequency
fn sorted_points(spectrum: &Spectrum) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = spectrum.iter().collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

/// Amplitude over time, with the time axis `0..duration`
pub fn plot_waveform<P: AsRef<Path>>(path: P, waveform: &Waveform) -> Result<(), PlotError> {
    if waveform.samples.is_empty() {
        return Err(PlotError::NoData);
    }
    if !(waveform.sample_rate.is_finite() && waveform.sample_rate > 0.0) {
        return Err(PlotError::InvalidSampleRate(waveform.sample_rate));
    }
    let path = path.as_ref();
    ensure_parent(path)?;

    let step = 1.0 / waveform.sample_rate;
    let points: Vec<(f64, f64)> = waveform
        .samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 * step, s))
        .collect();
    let duration = waveform.duration().max(step);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Waveform", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..duration, value_range(waveform.samples.iter().copied()))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Time [s]")
        .y_desc("Amplitude")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    tracing::debug!(path = %path.display(), "wrote wave chart");
    Ok(())
}

/// Magnitudes over `band`
///
/// `frequencies` and `magnitudes` are parallel; points outside the band are
/// dropped.
pub fn plot_spectrum<P: AsRef<Path>>(
    path: P,
    frequencies: &[f64],
    magnitudes: &[f64],
    band: FrequencyBand,
) -> Result<(), PlotError> {
    let points: Vec<(f64, f64)> = frequencies
        .iter()
        .copied()
        .zip(magnitudes.iter().copied())
        .filter(|&(f, _)| band.contains(f))
        .collect();
    if points.is_empty() {
        return Err(PlotError::NoData);
    }
    let path = path.as_ref();
    ensure_parent(path)?;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Spectrum", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(band_range(band), value_range(points.iter().map(|p| p.1)))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Frequency [Hz]")
        .y_desc("Magnitude")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    tracing::debug!(path = %path.display(), "wrote spectrum chart");
    Ok(())
}

/// Reference and computed spectra overlaid over `band`
pub fn plot_spectrum_comparison<P: AsRef<Path>>(
    path: P,
    reference: &ReferenceSpectrum,
    computed: &Spectrum,
    band: FrequencyBand,
) -> Result<(), PlotError> {
    let reference_points: Vec<(f64, f64)> = reference
        .frequencies()
        .into_iter()
        .zip(reference.magnitudes.iter().copied())
        .filter(|&(f, _)| band.contains(f))
        .collect();
    let computed_points: Vec<(f64, f64)> = sorted_points(computed)
        .into_iter()
        .filter(|&(f, _)| band.contains(f))
        .collect();
    if reference_points.is_empty() && computed_points.is_empty() {
        return Err(PlotError::NoData);
    }
    let path = path.as_ref();
    ensure_parent(path)?;

    let y_range = value_range(
        reference_points
            .iter()
            .chain(computed_points.iter())
            .map(|p| p.1),
    );

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("T8 vs computed spectrum", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(band_range(band), y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Frequency [Hz]")
        .y_desc("Magnitude")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(reference_points, &BLUE))
        .map_err(render_err)?
        .label("T8 spectrum")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(computed_points, &RED))
        .map_err(render_err)?
        .label("Computed spectrum")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    tracing::debug!(path = %path.display(), "wrote comparison chart");
    Ok(())
}
