//! Request parameters for the T8 REST API
//!
//! Every endpoint is addressed by host + unit id, then a machine / point /
//! processing-mode triple and, for single records, a Unix timestamp.

use thiserror::Error;

use super::timestamp::parse_time;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("Point must be in the format 'M1:P1:PM1' (got '{0}')")]
    CombinedTag(String),

    #[error("Missing {0} tag")]
    MissingTag(&'static str),

    #[error("Unrecognized time '{0}'")]
    InvalidTime(String),

    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Kind of record served by the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Waves,
    Spectra,
}

impl RecordKind {
    fn path(&self) -> &'static str {
        match self {
            RecordKind::Waves => "waves",
            RecordKind::Spectra => "spectra",
        }
    }
}

/// Host and authentication
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub host: String,
    pub id: String,
    pub user: String,
    pub password: String,
}

/// Machine / point / processing-mode selection
#[derive(Debug, Clone, PartialEq)]
pub struct PmodeParams {
    pub credentials: Credentials,
    pub machine: String,
    pub point: String,
    pub pmode: String,
}

impl PmodeParams {
    pub fn new(
        credentials: Credentials,
        machine: impl Into<String>,
        point: impl Into<String>,
        pmode: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            machine: machine.into(),
            point: point.into(),
            pmode: pmode.into(),
        }
    }

    /// Build from optional tags, where `point` may be a combined `M:P:PM` tag
    ///
    /// A combined tag overrides `machine` and `pmode`.
    pub fn from_tags(
        credentials: Credentials,
        machine: Option<&str>,
        point: Option<&str>,
        pmode: Option<&str>,
    ) -> Result<Self, ParamsError> {
        if let Some(combined) = point.filter(|p| p.contains(':')) {
            let (machine, point, pmode) = parse_combined_tag(combined)?;
            return Ok(Self::new(credentials, machine, point, pmode));
        }

        let machine = machine.ok_or(ParamsError::MissingTag("machine"))?;
        let point = point.ok_or(ParamsError::MissingTag("point"))?;
        let pmode = pmode.ok_or(ParamsError::MissingTag("pmode"))?;
        Ok(Self::new(credentials, machine, point, pmode))
    }

    /// Listing URL: `{scheme}://{host}/{id}/rest/{kind}/{machine}/{point}/{pmode}`
    pub fn url(&self, scheme: &str, kind: RecordKind) -> String {
        format!(
            "{}://{}/{}/rest/{}/{}/{}/{}",
            scheme,
            self.credentials.host,
            self.credentials.id,
            kind.path(),
            self.machine,
            self.point,
            self.pmode
        )
    }
}

/// Selection of a single record by timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct PmodeTimeParams {
    pub pmode: PmodeParams,
    pub time: i64,
}

impl PmodeTimeParams {
    pub fn new(pmode: PmodeParams, time: i64) -> Self {
        Self { pmode, time }
    }

    /// Build from a time given as ISO string or Unix timestamp
    pub fn parse(pmode: PmodeParams, time: &str) -> Result<Self, ParamsError> {
        Ok(Self::new(pmode, parse_time(time)?))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.pmode.credentials
    }

    /// Record URL: the listing URL followed by `/{time}`
    pub fn url(&self, scheme: &str, kind: RecordKind) -> String {
        format!("{}/{}", self.pmode.url(scheme, kind), self.time)
    }
}

/// Split a combined `machine:point:pmode` tag
pub fn parse_combined_tag(tag: &str) -> Result<(String, String, String), ParamsError> {
    let parts: Vec<&str> = tag.split(':').collect();
    match parts.as_slice() {
        [machine, point, pmode] => Ok((
            machine.to_string(),
            point.to_string(),
            pmode.to_string(),
        )),
        _ => Err(ParamsError::CombinedTag(tag.to_string())),
    }
}
