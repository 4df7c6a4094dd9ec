//! Quadratic chirp sweep through a peaking filter.
//!
//! Synthesizes a 10000-sample quadratic chirp (0 to 2500 Hz over the
//! nominal window), runs it through a peaking EQ centered at the requested
//! frequency, and prints whitespace-separated `time value` lines to
//! stdout, one per sample.

use std::f64::consts::TAU;
use std::process;

use clap::Parser;

use biquad_eq::{DesignParams, Filter, FilterType, FilterWidth, design};

#[derive(Parser, Debug)]
#[command(
    name = "sweep",
    about = "Filter a quadratic chirp through a peaking EQ and print time/value pairs"
)]
struct Cli {
    /// Center frequency of the peaking filter, as a fraction of the
    /// sample rate (must be in (0, 0.5))
    freq: f64,

    /// Q factor of the peaking filter
    #[arg(long, default_value_t = 1.0)]
    q: f64,

    /// Gain of the peaking filter in dB
    #[arg(long, default_value_t = 10.0)]
    gain: f64,

    /// Number of chirp samples to synthesize
    #[arg(long, default_value_t = 10_000)]
    samples: usize,
}

fn main() {
    let cli = Cli::parse();

    let params = DesignParams::new(cli.freq, FilterWidth::Q(cli.q), cli.gain);
    let coeffs = match design(FilterType::Peak, &params) {
        Ok(coeffs) => coeffs,
        Err(err) => {
            eprintln!("sweep: {err}");
            process::exit(1);
        }
    };

    let n = cli.samples as f64;
    let mut filter = Filter::new(coeffs);
    for i in 0..cli.samples {
        let t = i as f64 / n;
        let x = (0.5 * 0.5 * n * TAU * t * t).sin();
        let y = filter.process(x);
        println!("{} {}", i as f64 / 2.0, y);
    }
}
