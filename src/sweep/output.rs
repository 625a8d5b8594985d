//! JSON form of a sweep.
//!
//! ```json
//! {
//!   "meta": { "date": "2026-02-18", "longitude": 30.0, "lat_range": [-60, 60],
//!             "lat_step": 5, "generated_with": "crescent + DE421",
//!             "description": "..." },
//!   "points": [
//!     { "lat": 0, "lon": 30.0, "sunset_jd": 2461090.17, "sunset_iso": "2026-02-18T16:06:44Z",
//!       "sun_alt": -0.8333, ..., "odeh_v": 3.1, "odeh_zone": "B" },
//!     { "lat": 85, "lon": 30.0, "error": "no_sunset" }
//!   ]
//! }
//! ```
//!
//! Angles, distances and scores are rounded to 4 decimals, the illuminated fraction to 6.
//! The sunset Julian date (TT) is written at full precision.
use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{SweepOutcome, SweepPoint, SweepResult};
use crate::crescent_errors::CrescentError;
use crate::time::{jd_tt, utc_iso};

/// Decimals kept for angles, distances and criterion scores.
pub const ANGLE_DECIMALS: i32 = 4;
/// Decimals kept for the illuminated fraction.
pub const ILLUMINATION_DECIMALS: i32 = 6;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn round_angle(value: f64) -> f64 {
    round_to(value, ANGLE_DECIMALS)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRecord {
    pub date: String,
    pub longitude: f64,
    pub lat_range: [i32; 2],
    pub lat_step: i32,
    pub generated_with: String,
    pub description: String,
}

/// A latitude where the crescent geometry was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRecord {
    pub lat: i32,
    pub lon: f64,
    pub sunset_jd: f64,
    pub sunset_iso: String,
    pub sun_alt: f64,
    pub sun_az: f64,
    pub moon_alt: f64,
    pub moon_az: f64,
    pub elongation: f64,
    pub arcv: f64,
    pub moon_dist_km: f64,
    pub w_prime: f64,
    pub illumination: f64,
    pub yallop_q: f64,
    pub yallop_class: char,
    pub odeh_v: f64,
    pub odeh_zone: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointError {
    NoSunset,
}

/// A latitude skipped because the Sun does not set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorRecord {
    pub lat: i32,
    pub lon: f64,
    pub error: PointError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointRecord {
    Success(Box<SuccessRecord>),
    Error(ErrorRecord),
}

impl PointRecord {
    pub fn lat(&self) -> i32 {
        match self {
            PointRecord::Success(record) => record.lat,
            PointRecord::Error(record) => record.lat,
        }
    }
}

impl From<&SweepPoint> for PointRecord {
    fn from(point: &SweepPoint) -> Self {
        let evening = match &point.outcome {
            SweepOutcome::Success(evening) => evening,
            SweepOutcome::NoSunset => {
                return PointRecord::Error(ErrorRecord {
                    lat: point.latitude,
                    lon: point.longitude,
                    error: PointError::NoSunset,
                })
            }
        };
        let sample = &evening.sample;
        let geometry = &evening.geometry;

        PointRecord::Success(Box::new(SuccessRecord {
            lat: point.latitude,
            lon: point.longitude,
            sunset_jd: jd_tt(&evening.sunset),
            sunset_iso: utc_iso(&evening.sunset),
            sun_alt: round_angle(sample.sun_altitude_deg),
            sun_az: round_angle(sample.sun_azimuth_deg),
            moon_alt: round_angle(sample.moon_altitude_deg),
            moon_az: round_angle(sample.moon_azimuth_deg),
            elongation: round_angle(geometry.arc_of_light_deg),
            arcv: round_angle(geometry.arc_of_vision_deg),
            moon_dist_km: round_angle(sample.moon_distance_km),
            w_prime: round_angle(geometry.crescent_semiwidth_arcmin),
            illumination: round_to(sample.illuminated_fraction, ILLUMINATION_DECIMALS),
            yallop_q: round_angle(evening.yallop.score),
            yallop_class: evening.yallop.class_code,
            odeh_v: round_angle(evening.odeh.score),
            odeh_zone: evening.odeh.class_code,
        }))
    }
}

/// Serializable sweep, also the format read back for comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDocument {
    pub meta: MetaRecord,
    pub points: Vec<PointRecord>,
}

impl From<&SweepResult> for SweepDocument {
    fn from(result: &SweepResult) -> Self {
        let meta = &result.meta;
        SweepDocument {
            meta: MetaRecord {
                date: meta.date.to_string(),
                longitude: meta.longitude,
                lat_range: meta.lat_range,
                lat_step: meta.lat_step,
                generated_with: meta.generated_with.clone(),
                description: meta.description.clone(),
            },
            points: result.points.iter().map(PointRecord::from).collect(),
        }
    }
}

impl SweepDocument {
    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, CrescentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CrescentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the document, creating missing parent directories.
    pub fn write(&self, path: &Utf8Path) -> Result<(), CrescentError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        info!(%path, points = self.points.len(), "sweep document written");
        Ok(())
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, CrescentError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
