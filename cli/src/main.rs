//! Command line interface for T8 monitoring units
//!
//! Lists, downloads and analyzes wave and spectrum records.

mod commands;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "t8-client", version, about = "Fetch and analyze T8 vibration records")]
struct Cli {
    /// Host name of the T8 unit
    #[arg(short = 'H', long, env = "T8_CLIENT_HOST")]
    host: String,

    /// Unit id (first path segment of the API)
    #[arg(short = 'i', long, env = "T8_CLIENT_ID")]
    id: String,

    /// Username for authentication
    #[arg(short = 'u', long, env = "T8_CLIENT_USER")]
    user: String,

    /// Password for authentication
    #[arg(short = 'P', long, env = "T8_CLIENT_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

/// Machine / point / processing-mode selection
#[derive(Args, Debug, Clone)]
struct PmodeArgs {
    /// Machine tag
    #[arg(short = 'M', long)]
    machine: Option<String>,

    /// Point tag, or combined tag in the format M1:P1:PM1
    #[arg(short = 'p', long)]
    point: Option<String>,

    /// Processing mode tag
    #[arg(short = 'm', long)]
    pmode: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all the waves for a machine, point and processing mode as dates
    ListWaves {
        #[command(flatten)]
        tags: PmodeArgs,
    },

    /// List all the spectra for a machine, point and processing mode as dates
    ListSpectra {
        #[command(flatten)]
        tags: PmodeArgs,
    },

    /// Print a wave and save it as CSV
    GetWave {
        #[command(flatten)]
        tags: PmodeArgs,

        /// Time of the wave (ISO 8601 or Unix timestamp)
        #[arg(short = 't', long)]
        time: String,
    },

    /// Print a spectrum and save it as CSV
    GetSpectrum {
        #[command(flatten)]
        tags: PmodeArgs,

        /// Time of the spectrum (ISO 8601 or Unix timestamp)
        #[arg(short = 't', long)]
        time: String,
    },

    /// Plot a wave and save the chart as SVG
    PlotWave {
        #[command(flatten)]
        tags: PmodeArgs,

        /// Time of the wave (ISO 8601 or Unix timestamp)
        #[arg(short = 't', long)]
        time: String,
    },

    /// Plot a spectrum and save the chart as SVG
    PlotSpectrum {
        #[command(flatten)]
        tags: PmodeArgs,

        /// Time of the spectrum (ISO 8601 or Unix timestamp)
        #[arg(short = 't', long)]
        time: String,

        /// Lower edge of the plotted range in Hz (default: the spectrum's)
        #[arg(long)]
        fmin: Option<f64>,

        /// Upper edge of the plotted range in Hz (default: the spectrum's)
        #[arg(long)]
        fmax: Option<f64>,
    },

    /// Compute a spectrum from the wave and compare it with the unit's
    Compare {
        #[command(flatten)]
        tags: PmodeArgs,

        /// Time of the records (ISO 8601 or Unix timestamp)
        #[arg(short = 't', long)]
        time: String,

        /// Lower band edge in Hz (default: the reference spectrum's)
        #[arg(long)]
        fmin: Option<f64>,

        /// Upper band edge in Hz (default: the reference spectrum's)
        #[arg(long)]
        fmax: Option<f64>,

        /// Window applied before the FFT
        #[arg(long, default_value = "hann")]
        window: String,

        /// Also save a chart of both spectra as SVG
        #[arg(long)]
        plot: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the environment
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
