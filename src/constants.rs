//! Physical and calendrical constants shared across the crate

/// Seconds per day
pub const DAY_S: f64 = 86_400.0;

/// Two pi
pub const TAU: f64 = 2.0 * std::f64::consts::PI;

/// Astronomical Unit in kilometers (IAU 2012 exact definition)
pub const AU_KM: f64 = 149_597_870.700;

/// Julian date of the J2000.0 epoch (2000-01-01 12:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
