//! Decoder for T8 "zint" sample blocks
//!
//! The T8 service ships waveforms and spectra as zlib-compressed,
//! base64-encoded little-endian `i16` samples. Scaling by the record's
//! `factor` is a separate step.

use std::io::{Cursor, Read};

use base64::engine::general_purpose;
use base64::Engine;
use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;

use crate::error::DecodeError;

/// Width of one encoded sample in bytes
const SAMPLE_WIDTH: usize = 2;

/// Decode an encoded block into raw (unscaled) samples
///
/// # Arguments
/// * `encoded` - Base64 text of a zlib stream holding little-endian `i16` values
///
/// # Returns
/// One `f64` per encoded integer, in acquisition order. An empty string
/// yields an empty vector without touching the decoders.
pub fn decode_samples(encoded: &str) -> Result<Vec<f64>, DecodeError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    let compressed = general_purpose::STANDARD.decode(encoded)?;

    let mut decompressor = ZlibDecoder::new(&compressed[..]);
    let mut raw = Vec::new();
    decompressor
        .read_to_end(&mut raw)
        .map_err(DecodeError::Inflate)?;

    if raw.len() % SAMPLE_WIDTH != 0 {
        return Err(DecodeError::TrailingByte { len: raw.len() });
    }

    let mut cursor = Cursor::new(&raw);
    let mut samples = Vec::with_capacity(raw.len() / SAMPLE_WIDTH);
    while let Ok(value) = cursor.read_i16::<LittleEndian>() {
        samples.push(f64::from(value));
    }

    tracing::trace!(bytes = raw.len(), samples = samples.len(), "decoded sample block");
    Ok(samples)
}

/// Multiply samples by the record's scale factor
pub fn scale_samples(samples: &[f64], factor: f64) -> Vec<f64> {
    samples.iter().map(|&s| s * factor).collect()
}

/// Decode a block and apply its scale factor in one step
pub fn decode_scaled(encoded: &str, factor: f64) -> Result<Vec<f64>, DecodeError> {
    let raw = decode_samples(encoded)?;
    Ok(scale_samples(&raw, factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    const KNOWN_BLOCK: &str = "eJxjZPj//389QwMAEP4D/g==";

    fn encode(bytes: &[u8]) -> String {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        general_purpose::STANDARD.encode(encoder.finish().unwrap())
    }

    fn encode_i16(values: &[i16]) -> String {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        encode(&bytes)
    }

    #[test]
    fn test_round_trip_extremes() {
        let values = [1i16, -1, 32767, -32768];
        let decoded = decode_samples(&encode_i16(&values)).unwrap();

        assert_eq!(decoded, vec![1.0, -1.0, 32767.0, -32768.0]);
    }

    #[test]
    fn test_known_block() {
        let decoded = decode_samples(KNOWN_BLOCK).unwrap();
        assert_eq!(decoded, vec![1.0, -1.0, 32767.0, -32768.0]);

        let scaled = decode_scaled(KNOWN_BLOCK, 2.0).unwrap();
        assert_eq!(scaled, vec![2.0, -2.0, 65534.0, -65536.0]);
    }

    #[test]
    fn test_empty_string() {
        let decoded = decode_samples("").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_samples("invalid_base64").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn test_invalid_zlib() {
        // Valid base64, but "hello world" is not a zlib stream
        let text = general_purpose::STANDARD.encode(b"hello world");
        let err = decode_samples(&text).unwrap_err();
        assert!(matches!(err, DecodeError::Inflate(_)));
    }

    #[test]
    fn test_odd_length_buffer_rejected() {
        let err = decode_samples(&encode(&[0x01, 0x00, 0xff])).unwrap_err();
        assert!(matches!(err, DecodeError::TrailingByte { len: 3 }));
    }

    #[test]
    fn test_compressed_empty_buffer() {
        let decoded = decode_samples(&encode(&[])).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let values: Vec<i16> = (-500..500).map(|v| v * 37).collect();
        let decoded = decode_samples(&encode_i16(&values)).unwrap();

        assert_eq!(decoded.len(), values.len());
        for (d, v) in decoded.iter().zip(values.iter()) {
            assert_eq!(*d, f64::from(*v));
        }
    }
}
