//! End-to-end tests: encoded block -> samples -> spectrum

use std::f64::consts::PI;
use std::io::Write;

use base64::engine::general_purpose;
use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use t8_spectrum::spectrum::{padded_length, zero_pad, AnalyzerConfig};
use t8_spectrum::{
    calculate_spectrum, compare_spectra, decode_samples, preprocess_waveform, scale_samples,
    FrequencyBand, InvalidInputError, ReferenceSpectrum, SpectrumAnalyzer, WindowType,
};

/// Encode samples the way the T8 does
fn encode_block(values: &[i16]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&bytes).unwrap();
    general_purpose::STANDARD.encode(encoder.finish().unwrap())
}

#[test]
fn known_block_decodes_and_scales() {
    let raw = decode_samples("eJxjZPj//389QwMAEP4D/g==").unwrap();
    assert_eq!(raw, vec![1.0, -1.0, 32767.0, -32768.0]);
    assert_eq!(scale_samples(&raw, 2.0), vec![2.0, -2.0, 65534.0, -65536.0]);
}

#[test]
fn padding_lengths() {
    assert_eq!(padded_length(5).unwrap(), 8);
    assert_eq!(padded_length(1024).unwrap(), 1024);
    assert_eq!(padded_length(0), Err(InvalidInputError::EmptySamples));
    assert_eq!(zero_pad(&[0.5; 1024]).unwrap().len(), 1024);
}

#[test]
fn zeros_yield_zero_spectrum() {
    let band = FrequencyBand::new(0.0, 500.0).unwrap();
    let spectrum = calculate_spectrum(&[0.0; 4], 1000.0, band).unwrap();

    assert_eq!(spectrum.frequencies(), &[0.0, 250.0]);
    assert!(spectrum.magnitudes().iter().all(|&m| m == 0.0));
}

#[test]
fn encoded_tone_recovers_frequency() {
    // 2560 Hz acquisition of a 160 Hz tone, quantized to i16
    let sample_rate = 2560.0;
    let factor = 1.0 / 1000.0;
    let values: Vec<i16> = (0..2000)
        .map(|n| (8000.0 * (2.0 * PI * 160.0 * n as f64 / sample_rate).sin()).round() as i16)
        .collect();

    let samples = scale_samples(&decode_samples(&encode_block(&values)).unwrap(), factor);
    assert_eq!(samples.len(), 2000);

    let prepared = preprocess_waveform(&samples).unwrap();
    assert_eq!(prepared.len(), 2048);

    let band = FrequencyBand::new(0.0, 1000.0).unwrap();
    let spectrum = calculate_spectrum(&prepared, sample_rate, band).unwrap();

    let (peak_freq, peak_mag) = spectrum.peak().unwrap();
    assert!((peak_freq - 160.0).abs() <= 1.25);

    // Amplitude 8 has RMS ≈ 5.66; the 2√2/N detector offsets the Hann gain,
    // less the 2000/2048 padding loss
    assert!(peak_mag > 5.0 && peak_mag < 6.0, "peak magnitude {peak_mag}");
}

#[test]
fn analyzer_matches_manual_pipeline() {
    let sample_rate = 1000.0;
    let signal: Vec<f64> = (0..700)
        .map(|n| (2.0 * PI * 60.0 * n as f64 / sample_rate).sin())
        .collect();
    let band = FrequencyBand::new(10.0, 400.0).unwrap();

    let manual = calculate_spectrum(&preprocess_waveform(&signal).unwrap(), sample_rate, band).unwrap();

    let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        sample_rate,
        band,
        window_type: WindowType::Hann,
    })
    .unwrap();
    let automatic = analyzer.analyze(&signal).unwrap();

    assert_eq!(manual, automatic);
}

#[test]
fn band_beyond_nyquist_is_empty() {
    let signal: Vec<f64> = (0..1024).map(|n| (n as f64 * 0.05).cos()).collect();
    let band = FrequencyBand::new(1e9, 2e9).unwrap();

    let spectrum = calculate_spectrum(&signal, 48000.0, band).unwrap();
    assert!(spectrum.is_empty());
}

#[test]
fn repeated_analysis_is_bit_identical() {
    let values: Vec<i16> = (0..4096).map(|n| ((n * 7919) % 20000 - 10000) as i16).collect();
    let samples = decode_samples(&encode_block(&values)).unwrap();
    let prepared = preprocess_waveform(&samples).unwrap();
    let band = FrequencyBand::new(0.0, 5000.0).unwrap();

    let first = calculate_spectrum(&prepared, 10240.0, band).unwrap();
    let second = calculate_spectrum(&prepared, 10240.0, band).unwrap();

    let bits = |s: &[f64]| s.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.magnitudes()), bits(second.magnitudes()));
    assert_eq!(bits(first.frequencies()), bits(second.frequencies()));
}

#[test]
fn reference_comparison_reports_peaks() {
    let sample_rate = 1024.0;
    let signal: Vec<f64> = (0..1024)
        .map(|n| (2.0 * PI * 64.0 * n as f64 / sample_rate).sin())
        .collect();
    let band = FrequencyBand::new(0.0, 200.0).unwrap();
    let computed = calculate_spectrum(&preprocess_waveform(&signal).unwrap(), sample_rate, band).unwrap();

    // Reference on a coarser 2 Hz grid over the same band
    let reference = ReferenceSpectrum {
        magnitudes: (0..101).map(|i| if i == 32 { 1.0 } else { 0.0 }).collect(),
        fmin: 0.0,
        fmax: 200.0,
    };

    let comparison = compare_spectra(&reference, &computed).unwrap();
    assert_eq!(comparison.compared_points, 101);
    assert_eq!(comparison.reference_peak, (64.0, 1.0));
    assert_eq!(comparison.computed_peak.0, 64.0);
}
