//! T8 REST client: request parameters, timestamps and record retrieval

pub mod params;
pub mod response;
pub mod rest;
pub mod timestamp;

use thiserror::Error;

use crate::error::DecodeError;

pub use params::{parse_combined_tag, Credentials, ParamsError, PmodeParams, PmodeTimeParams, RecordKind};
pub use response::Waveform;
pub use rest::{ClientConfig, T8Client};
pub use timestamp::{iso_string_to_timestamp, parse_time, timestamp_to_iso_string};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to get {context}: {body}")]
    Status {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("Request failed: {0}")]
    Transport(Box<ureq::Error>),

    #[error("Invalid response body: {0}")]
    Body(#[source] std::io::Error),

    #[error("Unexpected record link '{0}'")]
    InvalidLink(String),

    #[error("Failed to decode record data: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Params(#[from] ParamsError),
}
