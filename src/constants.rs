//! # Constants and type definitions for Crescent
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (WGS84, speed of light, Earth rotation)
//! - Unit conversions (degrees ↔ radians, arcseconds, days ↔ seconds)
//! - Crescent model constants (Earth radius used for the lunar parallax, lunar semidiameter ratio)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// WGS84 equatorial radius in kilometers
pub const WGS84_MAJOR_AXIS: f64 = 6378.137;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// Nominal Earth rotation rate (rad/s) with respect to the true equinox
pub const EARTH_ROTATION_RATE: f64 = 7.292115e-5;

// -------------------------------------------------------------------------------------------------
// Crescent model
// -------------------------------------------------------------------------------------------------

/// Earth radius (km) used to derive the lunar horizontal parallax
pub const EARTH_MEAN_RADIUS: f64 = 6378.137;

/// Ratio between the Moon's geocentric semidiameter and its horizontal parallax
pub const MOON_SEMIDIAMETER_RATIO: f64 = 0.27245;

/// Apparent altitude of the Sun's centre at sunset/sunrise (refraction + semidiameter), degrees
pub const SUN_SETTING_ALTITUDE: f64 = -0.8333;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in arcminutes
pub type ArcMin = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
