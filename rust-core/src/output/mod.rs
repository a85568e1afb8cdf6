//! File output for fetched and computed data

pub mod csv;
pub mod plot;

pub use self::csv::{save_array_to_csv, save_spectrum_to_csv, CsvError};
pub use self::plot::{plot_spectrum, plot_spectrum_comparison, plot_waveform, PlotError};
