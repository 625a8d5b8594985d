//! JPL planetary ephemerides read from NAIF SPK kernels.
//!
//! [`JPLEphem`] answers one question: where are the Sun, the Earth and the
//! Moon relative to the Solar System Barycenter at a given instant. Earth and
//! Moon are chained through the Earth-Moon barycenter as stored in DE4xx
//! kernels:
//!
//! ```text
//! Earth = EMB(3 wrt 0) + Earth(399 wrt 3)
//! Moon  = EMB(3 wrt 0) + Moon(301 wrt 3)
//! Sun   = Sun(10 wrt 0)
//! ```
use hifitime::Epoch;
use nalgebra::Vector3;
use tracing::info;

use crate::crescent_errors::CrescentError;
use download_jpl_file::EphemFileSource;
use naif::{
    naif_data::{InterpResult, NaifData},
    naif_ids::NaifIds,
};

pub mod download_jpl_file;
pub mod naif;

#[derive(Debug, Clone)]
pub struct JPLEphem {
    label: String,
    naif: NaifData,
}

impl JPLEphem {
    /// Resolve the source (cache, download or local path) and load the kernel.
    pub fn new(file_source: &EphemFileSource) -> Result<Self, CrescentError> {
        let file_path = file_source.get_ephemeris_file()?;
        let naif = NaifData::read_naif_file(&file_path)?;
        let label = naif
            .version()
            .map(str::to_string)
            .unwrap_or_else(|| file_source.label());
        info!(source = %file_source, version = %label, "JPL ephemeris ready");
        Ok(JPLEphem { label, naif })
    }

    /// Wrap an already decoded kernel.
    pub fn from_naif(naif: NaifData, label: impl Into<String>) -> Self {
        JPLEphem {
            label: label.into(),
            naif,
        }
    }

    /// Ephemeris name, e.g. `DE421`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn naif_data(&self) -> &NaifData {
        &self.naif
    }

    /// Barycentric (ICRF, km and km/s) state of `body` at ET seconds from J2000.
    pub fn barycentric_state_et(
        &self,
        body: NaifIds,
        et_seconds: f64,
    ) -> Result<InterpResult, CrescentError> {
        let ssb = NaifIds::SolarSystemBarycenter;
        let emb = NaifIds::EarthMoonBarycenter;
        match body {
            NaifIds::SolarSystemBarycenter => Ok(InterpResult {
                position: Vector3::zeros(),
                velocity: Vector3::zeros(),
            }),
            NaifIds::Sun | NaifIds::EarthMoonBarycenter => {
                self.naif.ephemeris(body, ssb, et_seconds)
            }
            NaifIds::Earth | NaifIds::Moon => Ok(self.naif.ephemeris(emb, ssb, et_seconds)?
                + self.naif.ephemeris(body, emb, et_seconds)?),
        }
    }

    /// Barycentric state of `body` at `epoch`.
    pub fn barycentric_state(
        &self,
        body: NaifIds,
        epoch: &Epoch,
    ) -> Result<InterpResult, CrescentError> {
        self.barycentric_state_et(body, epoch.to_et_seconds())
    }
}
