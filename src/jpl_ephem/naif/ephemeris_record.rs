//! Ephemeris record decoding and Chebyshev interpolation.
//!
//! An SPK type 2 record holds, as little-endian `f64`:
//! 1. `mid` (ET seconds from J2000 TDB),
//! 2. `radius` (seconds, half the record span),
//! 3. `ncoeff` Chebyshev coefficients for X (km),
//! 4. `ncoeff` for Y (km),
//! 5. `ncoeff` for Z (km).
//!
//! The normalized time is `τ = (et - mid) / radius`, clamped to `[-1, 1]`.
//! Position uses `T_n(τ)`; velocity uses `T'_n(τ)` scaled by `dτ/dt = 1/radius`.
use std::fmt;

use hifitime::{Duration, Epoch};
use nalgebra::Vector3;
use nom::{multi::count, number::complete::le_f64, IResult, Parser};

/// One SPK ephemeris record (midpoint, half-width, and Chebyshev coefficients).
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    /// Midpoint of the record time span (ET seconds from J2000 TDB).
    pub mid: f64,
    /// Half-width of the record interval (seconds).
    pub radius: f64,
    /// Chebyshev coefficients for X (km).
    pub x: Vec<f64>,
    /// Chebyshev coefficients for Y (km).
    pub y: Vec<f64>,
    /// Chebyshev coefficients for Z (km).
    pub z: Vec<f64>,
}

impl EphemerisRecord {
    /// Decode one record laid out as `mid, radius, X[ncoeff], Y[ncoeff], Z[ncoeff]`.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: byte slice positioned at the start of the record.
    /// * `ncoeff`: number of Chebyshev coefficients per axis, `(rsize - 2) / 3`.
    pub fn parse(input: &[u8], ncoeff: usize) -> IResult<&[u8], Self> {
        let (input, (mid, radius)) = (le_f64, le_f64).parse(input)?;
        let (input, (x, y, z)) = (
            count(le_f64, ncoeff),
            count(le_f64, ncoeff),
            count(le_f64, ncoeff),
        )
            .parse(input)?;
        Ok((
            input,
            EphemerisRecord {
                mid,
                radius,
                x,
                y,
                z,
            },
        ))
    }

    /// Interpolate Cartesian **position** (km) and **velocity** (km/s) at an ET epoch.
    pub fn interpolate(&self, ephem_time: f64) -> (Vector3<f64>, Vector3<f64>) {
        let tau = ((ephem_time - self.mid) / self.radius).clamp(-1.0, 1.0);
        let n = self.x.len();

        // T_0 = 1, T_1 = τ, T_n = 2τ T_{n-1} - T_{n-2}
        // T'_0 = 0, T'_1 = 1, T'_n = 2τ T'_{n-1} + 2 T_{n-1} - T'_{n-2}
        let mut poly = vec![0.0; n];
        let mut deriv = vec![0.0; n];
        if n > 0 {
            poly[0] = 1.0;
        }
        if n > 1 {
            poly[1] = tau;
            deriv[1] = 1.0;
        }
        for k in 2..n {
            poly[k] = 2.0 * tau * poly[k - 1] - poly[k - 2];
            deriv[k] = 2.0 * tau * deriv[k - 1] + 2.0 * poly[k - 1] - deriv[k - 2];
        }

        let series = |coeffs: &[f64], basis: &[f64]| -> f64 {
            coeffs.iter().zip(basis).map(|(c, b)| c * b).sum()
        };

        let position = Vector3::new(
            series(&self.x, &poly),
            series(&self.y, &poly),
            series(&self.z, &poly),
        );
        let velocity = Vector3::new(
            series(&self.x, &deriv),
            series(&self.y, &deriv),
            series(&self.z, &deriv),
        ) / self.radius;

        (position, velocity)
    }
}

impl fmt::Display for EphemerisRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mid = Epoch::from_et_seconds(self.mid);
        let radius = Duration::from_seconds(self.radius);
        writeln!(f, "Ephemeris record centred on {mid} (radius {radius})")?;
        for (axis, coeffs) in [("X", &self.x), ("Y", &self.y), ("Z", &self.z)] {
            let formatted: Vec<String> = coeffs.iter().map(|c| format!("{c:.6e}")).collect();
            writeln!(f, "  {axis}: [{}]", formatted.join(", "))?;
        }
        Ok(())
    }
}
