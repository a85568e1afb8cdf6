//! CSV export of decoded records and computed spectra

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use thiserror::Error;

use crate::spectrum::Spectrum;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Write(#[from] csv::Error),

    #[error("Failed to flush CSV: {0}")]
    Flush(#[from] std::io::Error),
}

fn ensure_parent(path: &Path) -> Result<(), CsvError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| CsvError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write a single column of values with a header row
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn save_array_to_csv<P: AsRef<Path>>(
    path: P,
    values: &[f64],
    column_name: &str,
) -> Result<(), CsvError> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record([column_name])?;
    for value in values {
        writer.write_record([value.to_string()])?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = values.len(), "wrote CSV");
    Ok(())
}

/// Write a spectrum as `frequency,magnitude` rows
pub fn save_spectrum_to_csv<P: AsRef<Path>>(path: P, spectrum: &Spectrum) -> Result<(), CsvError> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(["frequency", "magnitude"])?;
    for (frequency, magnitude) in spectrum.iter() {
        writer.write_record([frequency.to_string(), magnitude.to_string()])?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = spectrum.len(), "wrote spectrum CSV");
    Ok(())
}
