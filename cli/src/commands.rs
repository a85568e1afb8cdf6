//! Subcommand implementations

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use t8_spectrum::client::{Credentials, PmodeParams, PmodeTimeParams, T8Client};
use t8_spectrum::output::{
    plot_spectrum, plot_spectrum_comparison, plot_waveform, save_array_to_csv,
    save_spectrum_to_csv,
};
use t8_spectrum::spectrum::{
    compare_spectra, AnalyzerConfig, FrequencyBand, SpectrumAnalyzer, WindowType,
};

use crate::{Cli, Command, PmodeArgs};

/// Directory that receives CSV exports
const OUTPUT_DIR: &str = "output";

pub fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials {
        host: cli.host,
        id: cli.id,
        user: cli.user,
        password: cli.password,
    };
    let client = T8Client::default();

    match cli.command {
        Command::ListWaves { tags } => {
            let params = pmode_params(credentials, &tags)?;
            for wave in client.list_waves(&params)? {
                println!("{wave}");
            }
        }

        Command::ListSpectra { tags } => {
            let params = pmode_params(credentials, &tags)?;
            for spectrum in client.list_spectra(&params)? {
                println!("{spectrum}");
            }
        }

        Command::GetWave { tags, time } => {
            let params = time_params(credentials, &tags, &time)?;
            let waveform = client.get_wave(&params)?;

            for sample in &waveform.samples {
                println!("{sample}");
            }

            let path = output_path("wave", &params, &time, "csv");
            save_array_to_csv(&path, &waveform.samples, "Samples")
                .with_context(|| format!("saving {}", path.display()))?;
            tracing::info!(path = %path.display(), "saved wave");
        }

        Command::GetSpectrum { tags, time } => {
            let params = time_params(credentials, &tags, &time)?;
            let reference = client.get_spectrum(&params)?;

            for sample in &reference.magnitudes {
                println!("{sample}");
            }

            let path = output_path("spectrum", &params, &time, "csv");
            save_array_to_csv(&path, &reference.magnitudes, "Samples")
                .with_context(|| format!("saving {}", path.display()))?;
            tracing::info!(path = %path.display(), "saved spectrum");
        }

        Command::PlotWave { tags, time } => {
            let params = time_params(credentials, &tags, &time)?;
            let waveform = client.get_wave(&params)?;

            let path = output_path("wave", &params, &time, "svg");
            plot_waveform(&path, &waveform)
                .with_context(|| format!("plotting {}", path.display()))?;
            println!("{}", path.display());
        }

        Command::PlotSpectrum {
            tags,
            time,
            fmin,
            fmax,
        } => {
            let params = time_params(credentials, &tags, &time)?;
            let reference = client.get_spectrum(&params)?;
            let band = band_or_default(reference.band()?, fmin, fmax)?;

            let path = output_path("spectrum", &params, &time, "svg");
            plot_spectrum(&path, &reference.frequencies(), &reference.magnitudes, band)
                .with_context(|| format!("plotting {}", path.display()))?;
            println!("{}", path.display());
        }

        Command::Compare {
            tags,
            time,
            fmin,
            fmax,
            window,
            plot,
        } => {
            let params = time_params(credentials, &tags, &time)?;
            let waveform = client.get_wave(&params).context("fetching wave")?;
            let reference = client.get_spectrum(&params).context("fetching spectrum")?;

            let band = band_or_default(reference.band()?, fmin, fmax)?;
            let window_type = WindowType::from_name(&window)
                .ok_or_else(|| anyhow!("unknown window type '{window}'"))?;

            let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
                sample_rate: waveform.sample_rate,
                band,
                window_type,
            })?;
            let computed = analyzer.analyze(&waveform.samples)?;
            let comparison = compare_spectra(&reference, &computed)?;

            println!(
                "wave: {} samples at {} Hz ({:.3} s)",
                waveform.samples.len(),
                waveform.sample_rate,
                waveform.duration()
            );
            println!(
                "reference: {} bins over {}..{} Hz, peak {:.3} at {:.2} Hz",
                reference.magnitudes.len(),
                reference.fmin,
                reference.fmax,
                comparison.reference_peak.1,
                comparison.reference_peak.0
            );
            println!(
                "computed: {} bins over {}..{} Hz, peak {:.3} at {:.2} Hz",
                computed.len(),
                band.fmin(),
                band.fmax(),
                comparison.computed_peak.1,
                comparison.computed_peak.0
            );
            println!(
                "difference: rms {:.4}, max {:.4} over {} points",
                comparison.rms_difference, comparison.max_difference, comparison.compared_points
            );

            let path = output_path("computed_spectrum", &params, &time, "csv");
            save_spectrum_to_csv(&path, &computed)
                .with_context(|| format!("saving {}", path.display()))?;
            tracing::info!(path = %path.display(), "saved computed spectrum");

            if plot {
                let path = output_path("comparison", &params, &time, "svg");
                plot_spectrum_comparison(&path, &reference, &computed, band)
                    .with_context(|| format!("plotting {}", path.display()))?;
                println!("chart: {}", path.display());
            }
        }
    }

    Ok(())
}

fn pmode_params(credentials: Credentials, tags: &PmodeArgs) -> Result<PmodeParams> {
    Ok(PmodeParams::from_tags(
        credentials,
        tags.machine.as_deref(),
        tags.point.as_deref(),
        tags.pmode.as_deref(),
    )?)
}

fn time_params(credentials: Credentials, tags: &PmodeArgs, time: &str) -> Result<PmodeTimeParams> {
    let pmode = pmode_params(credentials, tags)?;
    Ok(PmodeTimeParams::parse(pmode, time)?)
}

/// Record band with optional overrides for either edge
fn band_or_default(
    record: FrequencyBand,
    fmin: Option<f64>,
    fmax: Option<f64>,
) -> Result<FrequencyBand> {
    Ok(FrequencyBand::new(
        fmin.unwrap_or(record.fmin()),
        fmax.unwrap_or(record.fmax()),
    )?)
}

/// `output/{prefix}_{machine}_{point}_{pmode}_{time}.{extension}`
fn output_path(prefix: &str, params: &PmodeTimeParams, time: &str, extension: &str) -> PathBuf {
    let pmode = &params.pmode;
    let file_name = format!(
        "{}_{}_{}_{}_{}.{}",
        prefix,
        pmode.machine,
        pmode.point,
        pmode.pmode,
        time.replace(':', "-"),
        extension
    );
    PathBuf::from(OUTPUT_DIR).join(file_name)
}
