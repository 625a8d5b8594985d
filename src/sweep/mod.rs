//! # Latitude sweep
//!
//! Evaluates crescent visibility at sunset for a list of latitudes along one meridian on
//! one civil date.
//!
//! For each latitude, in input order:
//!
//! 1. search the first sunset in `[noon UTC − 12 h, noon UTC + 36 h]`,
//! 2. without a sunset (polar day or night) record [`SweepOutcome::NoSunset`] and move on,
//! 3. otherwise [`observe`] the sky at sunset, derive the [`CrescentGeometry`] and apply
//!    the Yallop and Odeh criteria.
//!
//! Failures of the ephemeris service (e.g. an epoch outside the kernel) abort the sweep.
//! Values are kept at full precision; rounding happens in [`output`].
//!
//! ## See also
//! ------------
//! * [`output::SweepDocument`] – JSON form of a [`SweepResult`].
//! * [`compare::compare_documents`] – Check a document against a reference one.
pub mod compare;
pub mod output;
#[cfg(feature = "progress")]
pub mod progress;

use camino::Utf8PathBuf;
use hifitime::{Duration, Epoch};
use itertools::{Itertools, MinMaxResult};
use tracing::{debug, info};

use crate::almanac::{Body, EphemerisService};
use crate::constants::Degree;
use crate::criteria::{odeh, yallop, ClassificationResult};
use crate::crescent_errors::CrescentError;
use crate::geometry::{observe, CrescentGeometry, ObservationSample};
use crate::observers::Observer;
use crate::time::CalendarDate;

pub const DEFAULT_DESCRIPTION: &str = "Baseline reference data for prototype comparison";

/// Hours before the noon anchor where the sunset search starts.
const SEARCH_BEFORE_NOON_HOURS: f64 = 12.0;
/// Hours after the noon anchor where the sunset search ends.
const SEARCH_AFTER_NOON_HOURS: f64 = 36.0;

/// Parameters of a baseline run.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub date: CalendarDate,
    pub longitude: Degree,
    pub lat_min: i32,
    pub lat_max: i32,
    pub lat_step: i32,
    /// Ephemeris source, `naif:DE421` or a path to a `.bsp` kernel.
    pub ephemeris_source: String,
    pub output_path: Utf8PathBuf,
    pub description: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            date: CalendarDate {
                year: 2026,
                month: 2,
                day: 18,
            },
            longitude: 30.0,
            lat_min: -60,
            lat_max: 60,
            lat_step: 5,
            ephemeris_source: "naif:DE421".to_string(),
            output_path: Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("baseline.json"),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl SweepConfig {
    /// Latitudes from `lat_min` to `lat_max` inclusive, every `lat_step` degrees.
    /// A non-positive step yields `lat_min` alone.
    pub fn latitudes(&self) -> Vec<i32> {
        if self.lat_step <= 0 {
            return vec![self.lat_min];
        }
        (self.lat_min..=self.lat_max)
            .step_by(self.lat_step as usize)
            .collect()
    }

    /// Run the sweep described by this configuration.
    pub fn run<S>(&self, service: &S) -> Result<SweepResult, CrescentError>
    where
        S: EphemerisService + ?Sized,
    {
        self.run_with(service, |_| {})
    }

    /// Same as [`SweepConfig::run`], calling `on_point` after each latitude.
    pub fn run_with<S, F>(&self, service: &S, on_point: F) -> Result<SweepResult, CrescentError>
    where
        S: EphemerisService + ?Sized,
        F: FnMut(&SweepPoint),
    {
        let mut result =
            run_sweep_with(&self.date, self.longitude, &self.latitudes(), service, on_point)?;
        result.meta.lat_step = self.lat_step;
        result.meta.description = self.description.clone();
        Ok(result)
    }
}

/// Everything observed at sunset for one latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct CrescentEvening {
    pub sunset: Epoch,
    pub sample: ObservationSample,
    pub geometry: CrescentGeometry,
    pub yallop: ClassificationResult,
    pub odeh: ClassificationResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepOutcome {
    Success(Box<CrescentEvening>),
    /// The Sun does not set in the search window.
    NoSunset,
}

/// One latitude of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub latitude: i32,
    pub longitude: Degree,
    pub outcome: SweepOutcome,
}

impl SweepPoint {
    /// `"no_sunset"` for a point without sunset, `None` for a computed one.
    pub fn error_code(&self) -> Option<&'static str> {
        match self.outcome {
            SweepOutcome::Success(_) => None,
            SweepOutcome::NoSunset => Some("no_sunset"),
        }
    }

    pub fn evening(&self) -> Option<&CrescentEvening> {
        match &self.outcome {
            SweepOutcome::Success(evening) => Some(evening),
            SweepOutcome::NoSunset => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepMeta {
    pub date: CalendarDate,
    pub longitude: Degree,
    pub lat_range: [i32; 2],
    pub lat_step: i32,
    pub generated_with: String,
    pub description: String,
}

/// Ordered sweep points with their run metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub meta: SweepMeta,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn no_sunset_count(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.outcome == SweepOutcome::NoSunset)
            .count()
    }
}

/// Sweep `latitudes` along `longitude` on `date`.
///
/// Arguments
/// -----------------
/// * `date`: civil date; the search window is anchored at 12:00 UTC on that date.
/// * `longitude`: degrees east.
/// * `latitudes`: degrees, processed and reported in this order.
/// * `service`: source of apparent places, illumination and setting events.
///
/// Return
/// ----------
/// * The [`SweepResult`], with one point per latitude.
///
/// Errors
/// ----------
/// * [`CrescentError::InvalidObserver`] for a latitude outside `[-90, 90]` or a longitude
///   outside `[-180, 180]`.
/// * Any ephemeris service failure.
pub fn run_sweep<S>(
    date: &CalendarDate,
    longitude: Degree,
    latitudes: &[i32],
    service: &S,
) -> Result<SweepResult, CrescentError>
where
    S: EphemerisService + ?Sized,
{
    run_sweep_with(date, longitude, latitudes, service, |_| {})
}

/// [`run_sweep`] with a callback invoked after each point, e.g. to report progress.
pub fn run_sweep_with<S, F>(
    date: &CalendarDate,
    longitude: Degree,
    latitudes: &[i32],
    service: &S,
    mut on_point: F,
) -> Result<SweepResult, CrescentError>
where
    S: EphemerisService + ?Sized,
    F: FnMut(&SweepPoint),
{
    let noon = date.noon_utc()?;
    info!(%date, longitude, points = latitudes.len(), "starting latitude sweep");

    let mut points = Vec::with_capacity(latitudes.len());
    for &latitude in latitudes {
        let point = evaluate_latitude(&noon, latitude, longitude, service)?;
        on_point(&point);
        points.push(point);
    }

    let lat_range = match latitudes.iter().minmax() {
        MinMaxResult::NoElements => [0, 0],
        MinMaxResult::OneElement(lat) => [*lat, *lat],
        MinMaxResult::MinMax(min, max) => [*min, *max],
    };
    let lat_step = match latitudes {
        [first, second, ..] => (second - first).abs(),
        _ => 0,
    };

    let result = SweepResult {
        meta: SweepMeta {
            date: *date,
            longitude,
            lat_range,
            lat_step,
            generated_with: service.provenance(),
            description: DEFAULT_DESCRIPTION.to_string(),
        },
        points,
    };
    info!(
        points = result.points.len(),
        no_sunset = result.no_sunset_count(),
        "latitude sweep done"
    );
    Ok(result)
}

fn evaluate_latitude<S>(
    noon: &Epoch,
    latitude: i32,
    longitude: Degree,
    service: &S,
) -> Result<SweepPoint, CrescentError>
where
    S: EphemerisService + ?Sized,
{
    let observer = Observer::new(latitude as f64, longitude, 0.0)?;
    let start = *noon - Duration::from_seconds(SEARCH_BEFORE_NOON_HOURS * 3600.0);
    let end = *noon + Duration::from_seconds(SEARCH_AFTER_NOON_HOURS * 3600.0);

    let sunsets = service.find_settings(&observer, Body::Sun, &start, &end)?;
    let Some(sunset) = sunsets.first().copied() else {
        debug!(latitude, "no sunset in the search window");
        return Ok(SweepPoint {
            latitude,
            longitude,
            outcome: SweepOutcome::NoSunset,
        });
    };

    let evening = crescent_evening(&observer, sunset, service)?;
    debug!(
        latitude,
        moon_alt = evening.sample.moon_altitude_deg,
        odeh = %evening.odeh.class_code,
        "crescent evaluated"
    );

    Ok(SweepPoint {
        latitude,
        longitude,
        outcome: SweepOutcome::Success(Box::new(evening)),
    })
}

/// Geometry and classification at one sunset instant.
pub fn crescent_evening<S>(
    observer: &Observer,
    sunset: Epoch,
    service: &S,
) -> Result<CrescentEvening, CrescentError>
where
    S: EphemerisService + ?Sized,
{
    let sample = observe(observer, &sunset, service)?;
    let geometry = CrescentGeometry::from_sample(&sample);

    let yallop = yallop(
        geometry.arc_of_light_deg,
        geometry.arc_of_vision_deg,
        geometry.crescent_semiwidth_arcmin,
    );
    let odeh = odeh(geometry.arc_of_vision_deg, geometry.crescent_semiwidth_arcmin);

    Ok(CrescentEvening {
        sunset,
        sample,
        geometry,
        yallop,
        odeh,
    })
}
