//! Baseline generator.
//!
//! Sweeps the default latitudes at sunset on the default date and writes the crescent
//! visibility document used as reference by other implementations.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin crescent-baseline --features jpl-download
//!
//! # Local kernel and custom output path
//! CRESCENT_EPHEM=/data/de421.bsp CRESCENT_OUTPUT=out/baseline.json \
//!   cargo run --release --bin crescent-baseline
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: tracing filter (default: info)
//! - `CRESCENT_EPHEM`: ephemeris source, `naif:DE421` or a `.bsp` path
//! - `CRESCENT_OUTPUT`: output JSON path
//! - `CRESCENT_UT1`: set to `jpl` to load the JPL UT1 table (default: UT1 = UTC)

use std::env;

use camino::Utf8PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crescent::almanac::Almanac;
use crescent::crescent_errors::CrescentError;
use crescent::env_state::CrescentEnv;
use crescent::sweep::output::SweepDocument;
use crescent::sweep::SweepConfig;
#[cfg(not(feature = "progress"))]
use crescent::sweep::{SweepOutcome, SweepPoint};

const RULE_WIDTH: usize = 60;

fn config_from_env() -> SweepConfig {
    let mut config = SweepConfig::default();
    if let Ok(source) = env::var("CRESCENT_EPHEM") {
        config.ephemeris_source = source;
    }
    if let Ok(path) = env::var("CRESCENT_OUTPUT") {
        config.output_path = Utf8PathBuf::from(path);
    }
    config
}

#[cfg(not(feature = "progress"))]
fn point_line(point: &SweepPoint) -> String {
    let status = match &point.outcome {
        SweepOutcome::Success(evening) => format!(
            "Moon alt={:.2}°, Odeh={}",
            evening.sample.moon_altitude_deg, evening.odeh.class_code
        ),
        SweepOutcome::NoSunset => "No sunset (polar)".to_string(),
    };
    format!("  Calculating lat={:+3}°... {status}", point.latitude)
}

#[cfg(feature = "progress")]
fn run(config: &SweepConfig, almanac: &Almanac) -> Result<SweepDocument, CrescentError> {
    use crescent::sweep::progress::SweepProgress;

    let mut progress = SweepProgress::new(config.latitudes().len());
    let result = config.run_with(almanac, |point| progress.point_done(point))?;
    progress.finish();
    Ok(SweepDocument::from(&result))
}

#[cfg(not(feature = "progress"))]
fn run(config: &SweepConfig, almanac: &Almanac) -> Result<SweepDocument, CrescentError> {
    let result = config.run_with(almanac, |point| println!("{}", point_line(point)))?;
    Ok(SweepDocument::from(&result))
}

fn generate(config: &SweepConfig) -> Result<usize, CrescentError> {
    let almanac = Almanac::new(&config.ephemeris_source)?.with_env(CrescentEnv::from_env());

    println!(
        "Generating baseline for {} points...",
        config.latitudes().len()
    );
    println!("Date: {}", config.date);
    println!("Longitude: {}°E", config.longitude);
    println!("{}", "-".repeat(RULE_WIDTH));

    let document = run(config, &almanac)?;
    document.write(&config.output_path)?;

    println!("{}", "-".repeat(RULE_WIDTH));
    println!("Saved to: {}", config.output_path);
    println!("Total points: {}", document.points.len());
    Ok(document.points.len())
}

fn main() -> Result<(), CrescentError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = config_from_env();
    info!(source = %config.ephemeris_source, output = %config.output_path, "baseline run");

    match generate(&config) {
        Ok(points) => {
            info!(points, "baseline written");
            Ok(())
        }
        Err(err) => {
            error!(%err, "baseline generation failed");
            Err(err)
        }
    }
}
