//! Blocking HTTP client for the T8 REST API

use std::time::Duration;

use base64::engine::general_purpose;
use base64::Engine;
use serde::de::DeserializeOwned;

use super::params::{Credentials, PmodeParams, PmodeTimeParams, RecordKind};
use super::response::{ItemList, SpectrumResponse, WaveResponse, Waveform};
use super::ClientError;
use crate::spectrum::ReferenceSpectrum;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout
    pub timeout: Duration,

    /// URL scheme; the units only serve HTTPS
    pub scheme: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            scheme: "https".to_string(),
        }
    }
}

/// T8 REST client
///
/// One request per call; failures are returned to the caller as-is.
pub struct T8Client {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl T8Client {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { agent, config }
    }

    /// Timestamps of all stored waves
    pub fn list_waves(&self, params: &PmodeParams) -> Result<Vec<String>, ClientError> {
        let url = params.url(&self.config.scheme, RecordKind::Waves);
        let list: ItemList = self.get_json(&url, &params.credentials, "waveform")?;
        list.timestamps()
    }

    /// Timestamps of all stored spectra
    pub fn list_spectra(&self, params: &PmodeParams) -> Result<Vec<String>, ClientError> {
        let url = params.url(&self.config.scheme, RecordKind::Spectra);
        let list: ItemList = self.get_json(&url, &params.credentials, "spectra list")?;
        list.timestamps()
    }

    /// Scaled waveform and its sample rate
    pub fn get_wave(&self, params: &PmodeTimeParams) -> Result<Waveform, ClientError> {
        let url = params.url(&self.config.scheme, RecordKind::Waves);
        let response: WaveResponse = self.get_json(&url, params.credentials(), "waveform")?;
        Ok(response.into_waveform()?)
    }

    /// Scaled spectrum with its band edges
    pub fn get_spectrum(&self, params: &PmodeTimeParams) -> Result<ReferenceSpectrum, ClientError> {
        let url = params.url(&self.config.scheme, RecordKind::Spectra);
        let response: SpectrumResponse = self.get_json(&url, params.credentials(), "spectra")?;
        Ok(response.into_reference()?)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credentials: &Credentials,
        context: &'static str,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");

        let result = self
            .agent
            .get(url)
            .set("Authorization", &basic_auth(credentials))
            .call();

        match result {
            Ok(response) if response.status() == 200 => {
                response.into_json().map_err(ClientError::Body)
            }
            Ok(response) => {
                let status = response.status();
                let body = read_error_body(response, url);
                Err(ClientError::Status {
                    context,
                    status,
                    body,
                })
            }
            Err(ureq::Error::Status(status, response)) => {
                tracing::debug!(%url, status, "request rejected");
                let body = read_error_body(response, url);
                Err(ClientError::Status {
                    context,
                    status,
                    body,
                })
            }
            Err(err) => Err(ClientError::Transport(Box::new(err))),
        }
    }
}

impl Default for T8Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

/// Body of a rejected request, empty when it cannot be read
fn read_error_body(response: ureq::Response, url: &str) -> String {
    response.into_string().unwrap_or_else(|err| {
        tracing::debug!(%url, error = %err, "failed to read error body");
        String::new()
    })
}

/// `Authorization` header value for HTTP basic auth
fn basic_auth(credentials: &Credentials) -> String {
    let token = general_purpose::STANDARD.encode(format!(
        "{}:{}",
        credentials.user, credentials.password
    ));
    format!("Basic {token}")
}
