//! JSON payloads returned by the T8 REST API

use serde::Deserialize;

use super::timestamp::timestamp_to_iso_string;
use super::ClientError;
use crate::decoder::decode_scaled;
use crate::error::DecodeError;
use crate::spectrum::ReferenceSpectrum;

/// Listing of waves or spectra
#[derive(Debug, Deserialize)]
pub struct ItemList {
    #[serde(rename = "_items")]
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub struct Item {
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}

impl ItemList {
    /// ISO timestamps of the listed records
    ///
    /// The timestamp is the last path segment of each self link; records
    /// stamped 0 are placeholders and are skipped.
    pub fn timestamps(&self) -> Result<Vec<String>, ClientError> {
        let mut timestamps = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let link = &item.links.self_link;
            let timestamp: i64 = link
                .rsplit('/')
                .next()
                .and_then(|segment| segment.parse().ok())
                .ok_or_else(|| ClientError::InvalidLink(link.clone()))?;

            if timestamp != 0 {
                timestamps.push(timestamp_to_iso_string(timestamp)?);
            }
        }
        Ok(timestamps)
    }
}

/// Scaled time-domain record
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f64>,
    pub sample_rate: f64,
}

impl Waveform {
    /// Record length in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }
}

/// Single wave record
#[derive(Debug, Deserialize)]
pub struct WaveResponse {
    pub data: String,
    pub factor: f64,
    pub sample_rate: f64,
}

impl WaveResponse {
    pub fn into_waveform(self) -> Result<Waveform, DecodeError> {
        Ok(Waveform {
            samples: decode_scaled(&self.data, self.factor)?,
            sample_rate: self.sample_rate,
        })
    }
}

/// Single spectrum record
#[derive(Debug, Deserialize)]
pub struct SpectrumResponse {
    pub data: String,
    pub factor: f64,
    #[serde(default)]
    pub min_freq: f64,
    pub max_freq: f64,
}

impl SpectrumResponse {
    pub fn into_reference(self) -> Result<ReferenceSpectrum, DecodeError> {
        Ok(ReferenceSpectrum {
            magnitudes: decode_scaled(&self.data, self.factor)?,
            fmin: self.min_freq,
            fmax: self.max_freq,
        })
    }
}
