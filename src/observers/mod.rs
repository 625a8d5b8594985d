//! # Ground-based observers
//!
//! An [`Observer`] is a geodetic site on the WGS84 ellipsoid. This module turns it into
//! the quantities needed by the apparent-place computation:
//!
//! * its **body-fixed** (terrestrial) position and rotational velocity,
//! * its **local horizon frame** (geodetic zenith, north, east),
//! * the projection of a terrestrial direction on that frame as **altitude/azimuth**.
//!
//! ## Conventions
//!
//! * Latitude in degrees, north positive, in `[-90, 90]`.
//! * Longitude in degrees, east positive, in `[-180, 180]`.
//! * Elevation above the ellipsoid in **meters**.
//! * Altitude 0° is the horizon, 90° the zenith; azimuth runs over `[0, 360)` from north
//!   through east.
//!
//! ## See also
//! ------------
//! * [`geodetic_to_parallax`] – Geodetic latitude/elevation → (ρ·cosφ, ρ·sinφ).
//! * [`crate::earth_orientation::celestial_to_terrestrial`] – Rotation bringing celestial
//!   vectors into the frame used by [`Observer::altaz`].
use std::fmt;

use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::constants::{
    Degree, Kilometer, Meter, EARTH_ROTATION_RATE, WGS84_FLATTENING, WGS84_MAJOR_AXIS,
};
use crate::crescent_errors::CrescentError;

/// Geodetic observing site.
///
/// Coordinates are validated at construction and stored as [`NotNan`] so that an
/// observer can be hashed and compared.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Observer {
    /// Geodetic latitude in **degrees**, north positive.
    pub latitude: NotNan<f64>,

    /// Longitude in **degrees** east of Greenwich.
    pub longitude: NotNan<f64>,

    /// Height above the WGS84 ellipsoid in **meters**.
    pub elevation: NotNan<f64>,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: geodetic latitude in **degrees**, within `[-90, 90]`.
    /// * `longitude`: longitude in **degrees** east, within `[-180, 180]`.
    /// * `elevation`: height above the ellipsoid in **meters**.
    ///
    /// Return
    /// ----------
    /// * The validated [`Observer`].
    ///
    /// Errors
    /// ----------
    /// * [`CrescentError::InvalidObserver`] if a coordinate is NaN or out of range.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        elevation: Meter,
    ) -> Result<Observer, CrescentError> {
        let not_nan = |value: f64, what: &str| {
            NotNan::new(value).map_err(|_| CrescentError::InvalidObserver(format!("{what} is NaN")))
        };

        let latitude = not_nan(latitude, "latitude")?;
        let longitude = not_nan(longitude, "longitude")?;
        let elevation = not_nan(elevation, "elevation")?;

        if !(-90.0..=90.0).contains(&latitude.into_inner()) {
            return Err(CrescentError::InvalidObserver(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude.into_inner()) {
            return Err(CrescentError::InvalidObserver(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }

        Ok(Observer {
            latitude,
            longitude,
            elevation,
            name: None,
        })
    }

    /// Attach a site name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Body-fixed (terrestrial) position of the site in **km**.
    ///
    /// The x axis points to the Greenwich meridian on the equator, z to the north pole.
    pub fn body_fixed_coord(&self) -> Vector3<Kilometer> {
        let (rho_cos_phi, rho_sin_phi) =
            geodetic_to_parallax(self.latitude.into_inner(), self.elevation.into_inner());
        let lon = self.longitude.to_radians();

        Vector3::new(
            WGS84_MAJOR_AXIS * rho_cos_phi * lon.cos(),
            WGS84_MAJOR_AXIS * rho_cos_phi * lon.sin(),
            WGS84_MAJOR_AXIS * rho_sin_phi,
        )
    }

    /// Velocity of the site due to Earth rotation, in **km/s**, in the true-of-date
    /// equatorial frame aligned with the body-fixed frame at the same instant.
    pub fn body_fixed_velocity(&self) -> Vector3<f64> {
        let omega = Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE);
        omega.cross(&self.body_fixed_coord())
    }

    /// Local geodetic horizon frame `(up, north, east)` as body-fixed unit vectors.
    pub fn local_frame(&self) -> LocalFrame {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        LocalFrame {
            up: Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
            north: Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            east: Vector3::new(-sin_lon, cos_lon, 0.0),
        }
    }

    /// Altitude and azimuth (degrees) of a body-fixed direction.
    ///
    /// The direction need not be normalised. Azimuth is measured from north towards
    /// east and lies in `[0, 360)`.
    ///
    /// See also
    /// ------------
    /// * [`Observer::local_frame`]
    pub fn altaz(&self, direction: &Vector3<f64>) -> (Degree, Degree) {
        let frame = self.local_frame();
        let u = direction.normalize();

        let altitude = u.dot(&frame.up).clamp(-1.0, 1.0).asin().to_degrees();
        let azimuth = u
            .dot(&frame.east)
            .atan2(u.dot(&frame.north))
            .to_degrees()
            .rem_euclid(360.0);

        // rem_euclid may round a tiny negative angle up to exactly 360
        let azimuth = if azimuth >= 360.0 { 0.0 } else { azimuth };
        (altitude, azimuth)
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name} ")?;
        }
        write!(
            f,
            "(lat {:+.4}°, lon {:+.4}°, {:.1} m)",
            self.latitude.into_inner(),
            self.longitude.into_inner(),
            self.elevation.into_inner()
        )
    }
}

/// Unit vectors of the local horizon frame, body-fixed components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub up: Vector3<f64>,
    pub north: Vector3<f64>,
    pub east: Vector3<f64>,
}

/// Convert geodetic latitude (radians) and height (meters) into normalized parallax
/// coordinates on the WGS84 ellipsoid.
///
/// Returns
/// -------
/// A tuple `(rho_cos_phi, rho_sin_phi)` in units of the equatorial radius:
/// * `rho_cos_phi`: distance of the site from the rotation axis.
/// * `rho_sin_phi`: distance of the site from the equatorial plane (signed).
pub fn lat_alt_to_parallax(lat: f64, height: Meter) -> (f64, f64) {
    let axis_ratio = 1.0 - WGS84_FLATTENING;
    let height = height / 1000.0 / WGS84_MAJOR_AXIS;

    // Parametric latitude u: a·cos(u) is the ellipsoid radius of curvature times cos(lat)
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + height * lat.sin();
    let rho_cos_phi = u.cos() + height * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Convert geodetic latitude (in degrees) and height (in meters) into normalized
/// parallax coordinates.
///
/// See also
/// --------
/// * [`lat_alt_to_parallax`] – Same conversion with the latitude in radians.
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}
