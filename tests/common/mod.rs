#![allow(dead_code)]

use camino::Utf8PathBuf;
use hifitime::{Duration, Epoch};
use nalgebra::Vector3;

use crescent::almanac::settings::{find_descending_crossings, SEARCH_STEP_MINUTES};
use crescent::almanac::{ApparentPlace, Body, EphemerisService};
use crescent::constants::SUN_SETTING_ALTITUDE;
use crescent::crescent_errors::CrescentError;
use crescent::observers::Observer;
use crescent::time::CalendarDate;

/// Latitude from which the mock Sun never sets.
pub const MOCK_POLAR_LATITUDE: f64 = 80.0;

/// Deterministic sky for driving the sweep without a kernel.
///
/// * The Sun follows `(90 − |φ|)·cos(H) − 5` with `H = 15·hours since noon UTC + λ`,
///   and stays 10° up for `|φ| ≥ 80°`.
/// * The Moon sits `8 + φ/10` degrees above the Sun, at azimuth 265°.
/// * `fail_at_latitude` makes every request at that latitude fail as if the epoch
///   were outside the kernel.
pub struct MockSky {
    pub noon: Epoch,
    pub fail_at_latitude: Option<f64>,
}

impl MockSky {
    pub fn new(date: &CalendarDate) -> Self {
        MockSky {
            noon: date.noon_utc().unwrap(),
            fail_at_latitude: None,
        }
    }

    pub fn failing_at(date: &CalendarDate, latitude: f64) -> Self {
        MockSky {
            fail_at_latitude: Some(latitude),
            ..MockSky::new(date)
        }
    }

    fn sun_altitude(&self, observer: &Observer, instant: &Epoch) -> f64 {
        let latitude = observer.latitude.into_inner();
        if latitude.abs() >= MOCK_POLAR_LATITUDE {
            return 10.0;
        }
        let hours = (*instant - self.noon).to_seconds() / 3600.0;
        let hour_angle = 15.0 * hours + observer.longitude.into_inner();
        (90.0 - latitude.abs()) * hour_angle.to_radians().cos() - 5.0
    }
}

fn place(altitude: f64, azimuth: f64, distance_km: f64) -> ApparentPlace {
    let (alt, az) = (altitude.to_radians(), azimuth.to_radians());
    ApparentPlace {
        altitude,
        azimuth,
        distance_km,
        direction: Vector3::new(alt.cos() * az.cos(), alt.cos() * az.sin(), alt.sin()),
    }
}

impl EphemerisService for MockSky {
    fn apparent(
        &self,
        observer: &Observer,
        body: Body,
        instant: &Epoch,
    ) -> Result<ApparentPlace, CrescentError> {
        let latitude = observer.latitude.into_inner();
        if self.fail_at_latitude == Some(latitude) {
            return Err(CrescentError::EphemerisOutOfRange {
                target: 301,
                center: 3,
                et_seconds: instant.to_et_seconds(),
            });
        }

        let sun_altitude = self.sun_altitude(observer, instant);
        Ok(match body {
            Body::Sun => place(sun_altitude, 270.0 - latitude / 10.0, 1.496e8),
            Body::Moon => place(
                sun_altitude + 8.0 + latitude / 10.0,
                265.0,
                380_000.0 + 100.0 * latitude,
            ),
        })
    }

    fn fraction_illuminated(&self, _instant: &Epoch) -> Result<f64, CrescentError> {
        Ok(0.01)
    }

    fn find_settings(
        &self,
        observer: &Observer,
        body: Body,
        start: &Epoch,
        end: &Epoch,
    ) -> Result<Vec<Epoch>, CrescentError> {
        find_descending_crossings(
            start,
            end,
            Duration::from_seconds(SEARCH_STEP_MINUTES * 60.0),
            |t| Ok(self.apparent(observer, body, t)?.altitude - SUN_SETTING_ALTITUDE),
        )
    }

    fn provenance(&self) -> String {
        "mock sky".to_string()
    }
}

pub fn sweep_date() -> CalendarDate {
    CalendarDate::new(2026, 2, 18).unwrap()
}

/// Fresh path under the system temporary directory.
pub fn temp_json_path(name: &str) -> Utf8PathBuf {
    let dir = std::env::temp_dir().join(format!("crescent-test-{}", std::process::id()));
    Utf8PathBuf::from_path_buf(dir.join(name)).unwrap()
}
