//! # Almanac: topocentric apparent places of the Sun and the Moon
//!
//! This module defines the [`EphemerisService`] seam used by the crescent pipeline and
//! its kernel-backed implementation [`Almanac`].
//!
//! ## Apparent place
//!
//! For an [`Observer`] and an instant, [`Almanac`] computes:
//!
//! 1. the observer barycentric state: Earth from the JPL kernel plus the body-fixed site
//!    position and rotational velocity rotated to the GCRS with
//!    `(R3(GAST) · N · P)ᵀ` (IAU 1976 precession, IAU 1980 nutation),
//! 2. the light-time corrected position of the target,
//! 3. stellar aberration from the observer barycentric velocity,
//! 4. the altitude/azimuth of the resulting direction in the local horizon frame
//!    (no refraction).
//!
//! Setting events are zero crossings of `altitude − h₀` with `h₀ = −0.8333°`.
//!
//! ## Lazy loading
//!
//! The kernel is opened on first use through a [`OnceCell`] and reused afterwards.
//!
//! ## See also
//! ------------
//! * [`JPLEphem`] – Barycentric states from NAIF SPK kernels.
//! * [`CrescentEnv`] – UT1 provider driving the Earth rotation angle.
//! * [`crate::geometry::observe`] – Consumer of the service.
pub mod apparent;
pub mod settings;

use std::fmt;

use hifitime::{Duration, Epoch};
use nalgebra::{Matrix3, Vector3};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::constants::{Degree, Kilometer, SUN_SETTING_ALTITUDE};
use crate::crescent_errors::CrescentError;
use crate::earth_orientation::celestial_to_terrestrial;
use crate::env_state::CrescentEnv;
use crate::jpl_ephem::download_jpl_file::EphemFileSource;
use crate::jpl_ephem::naif::naif_ids::NaifIds;
use crate::jpl_ephem::JPLEphem;
use crate::observers::Observer;
use apparent::{correct_aberration, light_time_correct, separation};
use settings::{find_descending_crossings, SEARCH_STEP_MINUTES};

/// Bodies whose apparent place can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl From<Body> for NaifIds {
    fn from(body: Body) -> Self {
        match body {
            Body::Sun => NaifIds::Sun,
            Body::Moon => NaifIds::Moon,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Sun => write!(f, "Sun"),
            Body::Moon => write!(f, "Moon"),
        }
    }
}

/// Topocentric apparent place of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPlace {
    /// Altitude above the horizon, degrees (no refraction).
    pub altitude: Degree,
    /// Azimuth from north through east, degrees in `[0, 360)`.
    pub azimuth: Degree,
    /// Light-time corrected observer-to-body distance, km.
    pub distance_km: Kilometer,
    /// Apparent direction, unit vector with GCRS axes.
    pub direction: Vector3<f64>,
}

impl ApparentPlace {
    /// Angular distance to another apparent place, degrees in `[0, 180]`.
    pub fn separation_from(&self, other: &ApparentPlace) -> Degree {
        separation(&self.direction, &other.direction)
    }
}

/// Source of the astronomical quantities consumed by the crescent pipeline.
pub trait EphemerisService {
    /// Topocentric apparent place of `body` seen by `observer` at `instant`.
    fn apparent(
        &self,
        observer: &Observer,
        body: Body,
        instant: &Epoch,
    ) -> Result<ApparentPlace, CrescentError>;

    /// Angular separation between two apparent places, degrees.
    fn separation(&self, a: &ApparentPlace, b: &ApparentPlace) -> Degree {
        a.separation_from(b)
    }

    /// Geocentric illuminated fraction of the Moon's disk, in `[0, 1]`.
    fn fraction_illuminated(&self, instant: &Epoch) -> Result<f64, CrescentError>;

    /// Setting events of `body` for `observer` within `[start, end]`, in chronological
    /// order. Empty when the body does not set in the window (polar day or night).
    fn find_settings(
        &self,
        observer: &Observer,
        body: Body,
        start: &Epoch,
        end: &Epoch,
    ) -> Result<Vec<Epoch>, CrescentError>;

    /// Short description of the data behind the service, e.g. `crescent + DE421`.
    fn provenance(&self) -> String;
}

/// Observer barycentric state and the celestial-to-terrestrial rotation at one instant.
#[derive(Debug, Clone, Copy)]
struct ObserverState {
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    celestial_to_terrestrial: Matrix3<f64>,
}

/// Kernel-backed [`EphemerisService`].
#[derive(Debug, Clone)]
pub struct Almanac {
    env_state: CrescentEnv,
    jpl_source: Option<EphemFileSource>,
    jpl_ephem: OnceCell<JPLEphem>,
}

impl Almanac {
    /// Create an almanac for the given ephemeris source (`naif:DE421` or a path).
    /// The kernel itself is opened on first use.
    pub fn new(jpl_file: &str) -> Result<Self, CrescentError> {
        Ok(Almanac {
            env_state: CrescentEnv::new(),
            jpl_source: Some(jpl_file.try_into()?),
            jpl_ephem: OnceCell::new(),
        })
    }

    /// Almanac over an already loaded ephemeris.
    pub fn from_ephem(jpl_ephem: JPLEphem) -> Self {
        Almanac {
            env_state: CrescentEnv::new(),
            jpl_source: None,
            jpl_ephem: OnceCell::with_value(jpl_ephem),
        }
    }

    /// Replace the Earth orientation environment.
    pub fn with_env(mut self, env_state: CrescentEnv) -> Self {
        self.env_state = env_state;
        self
    }

    pub fn env_state(&self) -> &CrescentEnv {
        &self.env_state
    }

    pub fn get_jpl_ephem(&self) -> Result<&JPLEphem, CrescentError> {
        self.jpl_ephem.get_or_try_init(|| match &self.jpl_source {
            Some(source) => JPLEphem::new(source),
            None => Err(CrescentError::JPLFileNotFound(
                "no ephemeris source configured".to_string(),
            )),
        })
    }

    fn observer_state(
        &self,
        ephem: &JPLEphem,
        observer: &Observer,
        epoch: &Epoch,
    ) -> Result<ObserverState, CrescentError> {
        let mjd_tt = epoch.to_mjd_tt_days();
        let mjd_ut1 = self.env_state.mjd_ut1(epoch);
        let (c2t, _) = celestial_to_terrestrial(mjd_ut1, mjd_tt);
        let t2c = c2t.transpose();

        let earth = ephem.barycentric_state(NaifIds::Earth, epoch)?;

        Ok(ObserverState {
            position: earth.position + t2c * observer.body_fixed_coord(),
            velocity: earth.velocity + t2c * observer.body_fixed_velocity(),
            celestial_to_terrestrial: c2t,
        })
    }
}

impl EphemerisService for Almanac {
    fn apparent(
        &self,
        observer: &Observer,
        body: Body,
        instant: &Epoch,
    ) -> Result<ApparentPlace, CrescentError> {
        let ephem = self.get_jpl_ephem()?;
        let state = self.observer_state(ephem, observer, instant)?;
        let target = NaifIds::from(body);

        let (astrometric, _) =
            light_time_correct(&state.position, instant.to_et_seconds(), |et| {
                Ok(ephem.barycentric_state_et(target, et)?.position)
            })?;

        let direction = correct_aberration(&astrometric, &state.velocity).normalize();
        let (altitude, azimuth) = observer.altaz(&(state.celestial_to_terrestrial * direction));

        Ok(ApparentPlace {
            altitude,
            azimuth,
            distance_km: astrometric.norm(),
            direction,
        })
    }

    fn fraction_illuminated(&self, instant: &Epoch) -> Result<f64, CrescentError> {
        let ephem = self.get_jpl_ephem()?;
        let et = instant.to_et_seconds();

        let earth = ephem.barycentric_state_et(NaifIds::Earth, et)?.position;
        let (earth_to_moon, tau) = light_time_correct(&earth, et, |t| {
            Ok(ephem.barycentric_state_et(NaifIds::Moon, t)?.position)
        })?;

        // Sunlight leaving the Sun towards the Moon as it was when its light left for Earth
        let moon = earth + earth_to_moon;
        let (moon_to_sun, _) = light_time_correct(&moon, et - tau, |t| {
            Ok(ephem.barycentric_state_et(NaifIds::Sun, t)?.position)
        })?;

        let phase_angle = separation(&(-earth_to_moon), &moon_to_sun).to_radians();
        Ok(0.5 * (1.0 + phase_angle.cos()))
    }

    fn find_settings(
        &self,
        observer: &Observer,
        body: Body,
        start: &Epoch,
        end: &Epoch,
    ) -> Result<Vec<Epoch>, CrescentError> {
        // Topocentric altitudes: the mean semidiameters of both discs are close to 16'
        let step = Duration::from_seconds(SEARCH_STEP_MINUTES * 60.0);
        let events = find_descending_crossings(start, end, step, |t| {
            Ok(self.apparent(observer, body, t)?.altitude - SUN_SETTING_ALTITUDE)
        })?;
        debug!(%observer, %body, count = events.len(), "setting events");
        Ok(events)
    }

    fn provenance(&self) -> String {
        let label = match (self.jpl_ephem.get(), &self.jpl_source) {
            (Some(ephem), _) => ephem.label().to_string(),
            (None, Some(source)) => source.label(),
            (None, None) => "unknown ephemeris".to_string(),
        };
        format!("crescent + {label}")
    }
}
