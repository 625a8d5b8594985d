//! # Young crescent visibility criteria
//!
//! Two empirical criteria map the arc of vision (ARCV) and the topocentric crescent
//! width (W′) to a score and a visibility class:
//!
//! * [`yallop`] – Yallop (1997), score `q`, classes `A`..`F`.
//! * [`odeh`] – Odeh (2004), score `V`, zones `A`..`D`.
//!
//! Both are total functions: every real score falls in exactly one class, found by
//! scanning an ordered threshold table from the highest threshold down.
use std::fmt;

use serde::Serialize;

pub mod odeh;
pub mod yallop;

pub use odeh::{odeh, OdehZone};
pub use yallop::{yallop, YallopClass};

/// Outcome of one criterion for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub criterion_name: &'static str,
    pub score: f64,
    pub class_code: char,
    pub visibility_label: &'static str,
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:+.4} {} ({})",
            self.criterion_name, self.score, self.class_code, self.visibility_label
        )
    }
}
