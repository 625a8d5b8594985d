//! Yallop's `q` test.
//!
//! ```text
//! f(W′) = 11.8371 − 6.3226·W′ + 0.7319·W′² − 0.1018·W′³
//! q     = (ARCV − f(W′)) / 10
//! ```
use std::fmt;

use super::ClassificationResult;
use crate::constants::{ArcMin, Degree};

pub const CRITERION_NAME: &str = "yallop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YallopClass {
    A,
    B,
    C,
    D,
    E,
    F,
}

/// Lower bounds (exclusive) of each class, highest first. Anything below the last one is `F`.
const THRESHOLDS: [(f64, YallopClass); 5] = [
    (0.216, YallopClass::A),
    (-0.014, YallopClass::B),
    (-0.160, YallopClass::C),
    (-0.232, YallopClass::D),
    (-0.293, YallopClass::E),
];

impl YallopClass {
    /// Class of a `q` score; a value equal to a threshold belongs to the class below it.
    pub fn from_q(q: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(threshold, _)| q > *threshold)
            .map_or(YallopClass::F, |(_, class)| *class)
    }

    pub fn code(&self) -> char {
        match self {
            YallopClass::A => 'A',
            YallopClass::B => 'B',
            YallopClass::C => 'C',
            YallopClass::D => 'D',
            YallopClass::E => 'E',
            YallopClass::F => 'F',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YallopClass::A => "naked_eye_easy",
            YallopClass::B => "naked_eye_perfect",
            YallopClass::C => "mixed_optical_helpful",
            YallopClass::D => "optical_required",
            YallopClass::E => "not_visible_telescope",
            YallopClass::F => "not_visible",
        }
    }
}

impl fmt::Display for YallopClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Yallop's `q` score.
pub fn yallop_q(arc_of_vision: Degree, crescent_width: ArcMin) -> f64 {
    let w = crescent_width;
    let f = 11.8371 - 6.3226 * w + 0.7319 * w * w - 0.1018 * w * w * w;
    (arc_of_vision - f) / 10.0
}

/// Classify an observation with Yallop's criterion.
///
/// The arc of light is part of the call signature of the criterion but does not
/// enter `q`, which only depends on ARCV and W′.
pub fn yallop(
    _arc_of_light: Degree,
    arc_of_vision: Degree,
    crescent_width: ArcMin,
) -> ClassificationResult {
    let q = yallop_q(arc_of_vision, crescent_width);
    let class = YallopClass::from_q(q);
    ClassificationResult {
        criterion_name: CRITERION_NAME,
        score: q,
        class_code: class.code(),
        visibility_label: class.label(),
    }
}
