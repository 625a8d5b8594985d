//! Odeh's `V` test.
//!
//! ```text
//! V = ARCV − (−0.1018·W′³ + 0.7319·W′² − 6.3226·W′ + 7.1651)
//! ```
use std::fmt;

use super::ClassificationResult;
use crate::constants::{ArcMin, Degree};

pub const CRITERION_NAME: &str = "odeh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OdehZone {
    A,
    B,
    C,
    D,
}

/// Lower bounds (inclusive) of each zone, highest first. Anything below the last one is `D`.
const THRESHOLDS: [(f64, OdehZone); 3] = [
    (5.65, OdehZone::A),
    (2.00, OdehZone::B),
    (-0.96, OdehZone::C),
];

impl OdehZone {
    /// Zone of a `V` score; a value equal to a threshold belongs to the zone above it.
    pub fn from_v(v: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(threshold, _)| v >= *threshold)
            .map_or(OdehZone::D, |(_, zone)| *zone)
    }

    pub fn code(&self) -> char {
        match self {
            OdehZone::A => 'A',
            OdehZone::B => 'B',
            OdehZone::C => 'C',
            OdehZone::D => 'D',
        }
    }

    /// Zones `A` and `B` share a label: `A` is visible without effort, `B` under
    /// perfect conditions.
    pub fn label(&self) -> &'static str {
        match self {
            OdehZone::A | OdehZone::B => "naked_eye",
            OdehZone::C => "optical_aid",
            OdehZone::D => "not_visible",
        }
    }
}

impl fmt::Display for OdehZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Odeh's `V` score.
pub fn odeh_v(arc_of_vision: Degree, crescent_width: ArcMin) -> f64 {
    let w = crescent_width;
    let curve = -0.1018 * w * w * w + 0.7319 * w * w - 6.3226 * w + 7.1651;
    arc_of_vision - curve
}

/// Classify an observation with Odeh's criterion.
pub fn odeh(arc_of_vision: Degree, crescent_width: ArcMin) -> ClassificationResult {
    let v = odeh_v(arc_of_vision, crescent_width);
    let zone = OdehZone::from_v(v);
    ClassificationResult {
        criterion_name: CRITERION_NAME,
        score: v,
        class_code: zone.code(),
        visibility_label: zone.label(),
    }
}
