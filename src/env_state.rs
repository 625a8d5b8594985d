//! # Crescent environment state
//!
//! This module defines [`CrescentEnv`], the **shared environment object** handed to
//! the ephemeris service. It owns the Earth orientation data needed to turn a UTC
//! instant into the UT1 time scale that drives sidereal time.
//!
//! ## Overview
//!
//! - [`CrescentEnv::new`] works offline and approximates UT1 by UTC
//!   (|UT1 − UTC| < 0.9 s, i.e. an Earth rotation error below 14″).
//! - [`CrescentEnv::with_jpl_ut1`] downloads JPL's `latest_eop2.long` file through
//!   [`hifitime::ut1::Ut1Provider`] for exact UT1.
//!
//! ## Structure
//!
//! ```text
//! CrescentEnv
//! └── ut1_provider (Option<hifitime::Ut1Provider>)
//! ```
//!
//! ## See also
//!
//! - [`hifitime::ut1::Ut1Provider`] – Manages Earth orientation and UT1 corrections.
use hifitime::{ut1::Ut1Provider, Epoch};
use tracing::{info, warn};

use crate::constants::MJD;
use crate::crescent_errors::CrescentError;

/// This object is passed to the ephemeris service to provide the
/// Earth orientation state of the library.
#[derive(Debug, Clone, Default)]
pub struct CrescentEnv {
    pub ut1_provider: Option<Ut1Provider>,
}

impl CrescentEnv {
    /// Offline environment, UT1 is approximated by UTC.
    pub fn new() -> Self {
        CrescentEnv { ut1_provider: None }
    }

    /// Environment backed by the JPL Earth orientation parameters.
    ///
    /// Return
    /// ------
    /// * The environment, or [`CrescentError::Ut1ProviderError`] when the download fails.
    pub fn with_jpl_ut1() -> Result<Self, CrescentError> {
        let provider = Ut1Provider::download_from_jpl("latest_eop2.long")
            .map_err(|e| CrescentError::Ut1ProviderError(e.to_string()))?;
        info!("UT1 provider loaded from JPL latest_eop2.long");
        Ok(CrescentEnv {
            ut1_provider: Some(provider),
        })
    }

    /// Environment selected by the `CRESCENT_UT1` variable: `jpl` downloads the
    /// JPL data, anything else (or unset) stays offline. A failed download is
    /// logged and falls back to the offline environment.
    pub fn from_env() -> Self {
        match std::env::var("CRESCENT_UT1").as_deref() {
            Ok("jpl") => CrescentEnv::with_jpl_ut1().unwrap_or_else(|err| {
                warn!("{err}, falling back to UT1 = UTC");
                CrescentEnv::new()
            }),
            _ => CrescentEnv::new(),
        }
    }

    /// Modified Julian Date of `epoch` in the UT1 time scale.
    pub fn mjd_ut1(&self, epoch: &Epoch) -> MJD {
        match &self.ut1_provider {
            Some(provider) => epoch.to_ut1(provider).to_mjd_tai_days(),
            None => epoch.to_mjd_utc_days(),
        }
    }
}
