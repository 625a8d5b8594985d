//! Comparison of a sweep document against a reference one.
//!
//! Points are matched by latitude. Each numeric field is checked against an absolute
//! tolerance; classes are compared exactly.
use std::collections::HashMap;
use std::fmt;

use super::output::{PointRecord, SuccessRecord, SweepDocument};

/// Absolute tolerances used by [`compare_documents`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareTolerance {
    /// Degrees, for altitudes, azimuths, elongation and arc of vision.
    pub angle_deg: f64,
    /// Seconds, for the sunset instant.
    pub sunset_seconds: f64,
    pub moon_distance_km: f64,
    /// Arcminutes.
    pub w_prime_arcmin: f64,
    pub illumination: f64,
    /// Yallop `q` and Odeh `V`.
    pub score: f64,
}

impl Default for CompareTolerance {
    fn default() -> Self {
        CompareTolerance {
            angle_deg: 0.01,
            sunset_seconds: 5.0,
            moon_distance_km: 1.0,
            w_prime_arcmin: 0.001,
            illumination: 1e-4,
            score: 0.01,
        }
    }
}

/// A discrepancy found at one latitude.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// Numeric field outside tolerance.
    Value {
        lat: i32,
        field: &'static str,
        candidate: f64,
        reference: f64,
    },
    /// Yallop class or Odeh zone differs.
    Class {
        lat: i32,
        field: &'static str,
        candidate: char,
        reference: char,
    },
    /// One side has a sunset and the other does not.
    Status { lat: i32, candidate_has_sunset: bool },
    /// Latitude present in the reference only.
    MissingPoint { lat: i32 },
    /// Latitude present in the candidate only.
    ExtraPoint { lat: i32 },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Value {
                lat,
                field,
                candidate,
                reference,
            } => write!(
                f,
                "lat={lat:+}: {field} {candidate} vs {reference} (Δ={:.6})",
                candidate - reference
            ),
            Mismatch::Class {
                lat,
                field,
                candidate,
                reference,
            } => write!(f, "lat={lat:+}: {field} {candidate} vs {reference}"),
            Mismatch::Status {
                lat,
                candidate_has_sunset,
            } => {
                let (candidate, reference) = if *candidate_has_sunset {
                    ("sunset", "no_sunset")
                } else {
                    ("no_sunset", "sunset")
                };
                write!(f, "lat={lat:+}: {candidate} vs {reference}")
            }
            Mismatch::MissingPoint { lat } => write!(f, "lat={lat:+}: missing from candidate"),
            Mismatch::ExtraPoint { lat } => write!(f, "lat={lat:+}: not in reference"),
        }
    }
}

/// Outcome of [`compare_documents`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonReport {
    /// Latitudes present on both sides.
    pub compared: usize,
    /// Latitudes with a sunset on both sides whose classes agree.
    pub class_agreements: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ComparisonReport {
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} points compared, {} class agreements, {} mismatches",
            self.compared,
            self.class_agreements,
            self.mismatches.len()
        )?;
        for mismatch in &self.mismatches {
            writeln!(f, "  {mismatch}")?;
        }
        Ok(())
    }
}

/// Compare `candidate` against `reference`, point by point.
///
/// Points are matched by latitude and reported in the reference order, followed by the
/// latitudes found only in the candidate.
pub fn compare_documents(
    candidate: &SweepDocument,
    reference: &SweepDocument,
    tolerance: &CompareTolerance,
) -> ComparisonReport {
    let by_lat: HashMap<i32, &PointRecord> = candidate
        .points
        .iter()
        .map(|point| (point.lat(), point))
        .collect();

    let mut report = ComparisonReport::default();

    for reference_point in &reference.points {
        let lat = reference_point.lat();
        let Some(candidate_point) = by_lat.get(&lat) else {
            report.mismatches.push(Mismatch::MissingPoint { lat });
            continue;
        };
        report.compared += 1;

        match (candidate_point, reference_point) {
            (PointRecord::Success(c), PointRecord::Success(r)) => {
                let before = report.mismatches.len();
                compare_success(c, r, tolerance, &mut report.mismatches);
                let class_mismatch = report.mismatches[before..]
                    .iter()
                    .any(|m| matches!(m, Mismatch::Class { .. }));
                if !class_mismatch {
                    report.class_agreements += 1;
                }
            }
            (PointRecord::Error(_), PointRecord::Error(_)) => {}
            (PointRecord::Success(_), PointRecord::Error(_)) => {
                report.mismatches.push(Mismatch::Status {
                    lat,
                    candidate_has_sunset: true,
                })
            }
            (PointRecord::Error(_), PointRecord::Success(_)) => {
                report.mismatches.push(Mismatch::Status {
                    lat,
                    candidate_has_sunset: false,
                })
            }
        }
    }

    let reference_lats: Vec<i32> = reference.points.iter().map(PointRecord::lat).collect();
    report.mismatches.extend(
        candidate
            .points
            .iter()
            .map(PointRecord::lat)
            .filter(|lat| !reference_lats.contains(lat))
            .map(|lat| Mismatch::ExtraPoint { lat }),
    );

    report
}

fn compare_success(
    candidate: &SuccessRecord,
    reference: &SuccessRecord,
    tolerance: &CompareTolerance,
    mismatches: &mut Vec<Mismatch>,
) {
    let lat = reference.lat;
    let sunset_days = tolerance.sunset_seconds / crate::constants::SECONDS_PER_DAY;

    let values = [
        ("sunset_jd", candidate.sunset_jd, reference.sunset_jd, sunset_days),
        ("sun_alt", candidate.sun_alt, reference.sun_alt, tolerance.angle_deg),
        ("sun_az", candidate.sun_az, reference.sun_az, tolerance.angle_deg),
        ("moon_alt", candidate.moon_alt, reference.moon_alt, tolerance.angle_deg),
        ("moon_az", candidate.moon_az, reference.moon_az, tolerance.angle_deg),
        (
            "elongation",
            candidate.elongation,
            reference.elongation,
            tolerance.angle_deg,
        ),
        ("arcv", candidate.arcv, reference.arcv, tolerance.angle_deg),
        (
            "moon_dist_km",
            candidate.moon_dist_km,
            reference.moon_dist_km,
            tolerance.moon_distance_km,
        ),
        (
            "w_prime",
            candidate.w_prime,
            reference.w_prime,
            tolerance.w_prime_arcmin,
        ),
        (
            "illumination",
            candidate.illumination,
            reference.illumination,
            tolerance.illumination,
        ),
        ("yallop_q", candidate.yallop_q, reference.yallop_q, tolerance.score),
        ("odeh_v", candidate.odeh_v, reference.odeh_v, tolerance.score),
    ];

    for (field, c, r, tol) in values {
        let delta = if field.ends_with("_az") {
            azimuth_difference(c, r)
        } else {
            (c - r).abs()
        };
        if delta.is_nan() || delta > tol {
            mismatches.push(Mismatch::Value {
                lat,
                field,
                candidate: c,
                reference: r,
            });
        }
    }

    let classes = [
        ("yallop_class", candidate.yallop_class, reference.yallop_class),
        ("odeh_zone", candidate.odeh_zone, reference.odeh_zone),
    ];
    for (field, c, r) in classes {
        if c != r {
            mismatches.push(Mismatch::Class {
                lat,
                field,
                candidate: c,
                reference: r,
            });
        }
    }
}

/// Absolute difference of two azimuths across the 0/360 wrap.
fn azimuth_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
