//! Conversions between Unix timestamps and the ISO strings the T8 uses

use chrono::{DateTime, NaiveDateTime, Utc};

use super::params::ParamsError;

/// Format used for timestamps in listings and file names
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive layouts accepted on input, all interpreted as UTC
const NAIVE_FORMATS: [&str; 3] = [ISO_FORMAT, "%Y-%m-%d %H:%M:%S", "%d-%m-%Y %H:%M:%S"];

/// Render a Unix timestamp as `YYYY-MM-DDTHH:MM:SS` (UTC)
pub fn timestamp_to_iso_string(timestamp: i64) -> Result<String, ParamsError> {
    let time = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .ok_or(ParamsError::TimestampOutOfRange(timestamp))?;
    Ok(time.format(ISO_FORMAT).to_string())
}

/// Parse an ISO-8601 string into a Unix timestamp
///
/// Strings with an explicit offset (`Z`, `+02:00`) honour it; naive
/// strings are taken as UTC.
pub fn iso_string_to_timestamp(text: &str) -> Result<i64, ParamsError> {
    let text = text.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Ok(time.timestamp());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc().timestamp())
        .ok_or_else(|| ParamsError::InvalidTime(text.to_string()))
}

/// Accept either a raw Unix timestamp or an ISO string
pub fn parse_time(text: &str) -> Result<i64, ParamsError> {
    match text.trim().parse::<i64>() {
        Ok(timestamp) => Ok(timestamp),
        Err(_) => iso_string_to_timestamp(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_iso_string() {
        assert_eq!(
            timestamp_to_iso_string(1555007154).unwrap(),
            "2019-04-11T18:25:54"
        );
    }

    #[test]
    fn test_iso_string_to_timestamp() {
        assert_eq!(
            iso_string_to_timestamp("2019-04-11T18:25:54").unwrap(),
            1555007154
        );
    }

    #[test]
    fn test_explicit_offset() {
        assert_eq!(
            iso_string_to_timestamp("2019-04-11T20:25:54+02:00").unwrap(),
            1555007154
        );
        assert_eq!(
            iso_string_to_timestamp("2019-04-11T18:25:54Z").unwrap(),
            1555007154
        );
    }

    #[test]
    fn test_alternate_layouts() {
        assert_eq!(
            iso_string_to_timestamp("11-04-2019 18:25:54").unwrap(),
            1555007154
        );
        assert_eq!(parse_time("1554907724").unwrap(), 1554907724);
        assert_eq!(parse_time("2019-04-10T14:48:44").unwrap(), 1554907724);
    }

    #[test]
    fn test_invalid_time() {
        assert!(matches!(
            iso_string_to_timestamp("yesterday"),
            Err(ParamsError::InvalidTime(_))
        ));
    }
}
