//! Low-precision analytic Sun and Moon positions
//!
//! A data-free [`Ephemeris`] built from truncated mean-element series
//! (Meeus, *Astronomical Algorithms*, chapters 25 and 47): the solar
//! equation of center and the principal lunar longitude, latitude, and
//! distance terms. Geometric ecliptic-of-date positions; no nutation,
//! aberration, or Delta-T correction.
//!
//! Accuracy is roughly 0.01 degrees for the Sun and 0.2 degrees for the
//! Moon near the present, degrading slowly over the millennia the mean
//! elements were fitted for. That places quarter-phase transitions within
//! about half an hour and season transitions within a few hours: enough
//! for calendar questions, nowhere near enough for occultations or
//! eclipses. Inject a real ephemeris-backed provider when that matters.

use nalgebra::Vector3;

use super::{Body, Ephemeris};
use crate::constants::{AU_KM, J2000_JD, JULIAN_CENTURY_DAYS};
use crate::errors::{Error, Result};

/// Supported Julian date range, roughly the years -2000 to +9000
const COVERAGE_START_JD: f64 = 990_557.5;
const COVERAGE_END_JD: f64 = 5_008_294.5;

/// Mean lunar distance in kilometers, the constant term of the series
const MOON_DISTANCE_KM: f64 = 385_000.56;

/// Lunar longitude series: (coefficient in degrees, D, M, M', F multiples)
const MOON_LON_TERMS: &[(f64, i8, i8, i8, i8)] = &[
    (6.288774, 0, 0, 1, 0),
    (1.274027, 2, 0, -1, 0),
    (0.658314, 2, 0, 0, 0),
    (0.213618, 0, 0, 2, 0),
    (-0.185116, 0, 1, 0, 0),
    (-0.114332, 0, 0, 0, 2),
    (0.058793, 2, 0, -2, 0),
    (0.057066, 2, -1, -1, 0),
    (0.053322, 2, 0, 1, 0),
    (0.045758, 2, -1, 0, 0),
    (-0.040923, 0, 1, -1, 0),
    (-0.034720, 1, 0, 0, 0),
    (-0.030383, 0, 1, 1, 0),
    (0.015327, 2, 0, 0, -2),
    (-0.012528, 0, 0, 1, 2),
    (0.010980, 0, 0, 1, -2),
];

/// Lunar latitude series: (coefficient in degrees, D, M, M', F multiples)
const MOON_LAT_TERMS: &[(f64, i8, i8, i8, i8)] = &[
    (5.128122, 0, 0, 0, 1),
    (0.280602, 0, 0, 1, 1),
    (0.277693, 0, 0, 1, -1),
    (0.173237, 2, 0, 0, -1),
    (0.055413, 2, 0, -1, 1),
    (0.046271, 2, 0, -1, -1),
];

/// Lunar distance series: (coefficient in kilometers, D, M, M', F multiples)
const MOON_DIST_TERMS: &[(f64, i8, i8, i8, i8)] = &[
    (-20_905.355, 0, 0, 1, 0),
    (-3_699.111, 2, 0, -1, 0),
    (-2_955.968, 2, 0, 0, 0),
    (-569.925, 0, 0, 2, 0),
];

/// The built-in data-free provider
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn position(&mut self, body: Body, jd: f64) -> Result<Vector3<f64>> {
        if !(COVERAGE_START_JD..=COVERAGE_END_JD).contains(&jd) {
            return Err(Error::OutOfRange {
                jd,
                start_jd: COVERAGE_START_JD,
                end_jd: COVERAGE_END_JD,
            });
        }
        let t = (jd - J2000_JD) / JULIAN_CENTURY_DAYS;
        Ok(match body {
            Body::Sun => sun_position(t),
            Body::Moon => moon_position(t),
        })
    }

    fn coverage(&self) -> (f64, f64) {
        (COVERAGE_START_JD, COVERAGE_END_JD)
    }
}

/// Evaluate a polynomial in `t` with coefficients from constant term up
fn polynomial(t: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// Geocentric ecliptic Sun position in AU at Julian centuries `t` past J2000
fn sun_position(t: f64) -> Vector3<f64> {
    let l0 = polynomial(t, &[280.46646, 36_000.76983, 0.000_303_2]);
    let m_deg = polynomial(t, &[357.52911, 35_999.050_29, -0.000_153_7]);
    let e = polynomial(t, &[0.016_708_634, -0.000_042_037, -0.000_000_126_7]);
    let m = m_deg.to_radians();

    // Equation of center, degrees
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let lon = (l0 + c).rem_euclid(360.0).to_radians();
    let nu = m + c.to_radians();
    let r = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    Vector3::new(r * lon.cos(), r * lon.sin(), 0.0)
}

/// Geocentric ecliptic Moon position in AU at Julian centuries `t` past J2000
fn moon_position(t: f64) -> Vector3<f64> {
    // Mean elements, degrees (Meeus 47.1-47.5)
    let lp = polynomial(
        t,
        &[
            218.316_447_7,
            481_267.881_234_21,
            -0.001_578_6,
            1.0 / 538_841.0,
            -1.0 / 65_194_000.0,
        ],
    );
    let d = polynomial(
        t,
        &[
            297.850_192_1,
            445_267.111_403_4,
            -0.001_881_9,
            1.0 / 545_868.0,
            -1.0 / 113_065_000.0,
        ],
    );
    let m = polynomial(
        t,
        &[357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0],
    );
    let mp = polynomial(
        t,
        &[
            134.963_396_4,
            477_198.867_505_5,
            0.008_741_4,
            1.0 / 69_699.0,
            -1.0 / 14_712_000.0,
        ],
    );
    let f = polynomial(
        t,
        &[
            93.272_095_0,
            483_202.017_523_3,
            -0.003_653_9,
            -1.0 / 3_526_000.0,
            1.0 / 863_310_000.0,
        ],
    );

    // Eccentricity correction for terms involving the solar anomaly
    let e_factor = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let series = |terms: &[(f64, i8, i8, i8, i8)]| -> f64 {
        terms
            .iter()
            .map(|&(coeff, td, tm, tmp, tf)| {
                let arg = (f64::from(td) * d
                    + f64::from(tm) * m
                    + f64::from(tmp) * mp
                    + f64::from(tf) * f)
                    .to_radians();
                coeff * e_factor.powi(i32::from(tm.abs())) * arg.sin()
            })
            .sum()
    };
    let cosine_series = |terms: &[(f64, i8, i8, i8, i8)]| -> f64 {
        terms
            .iter()
            .map(|&(coeff, td, tm, tmp, tf)| {
                let arg = (f64::from(td) * d
                    + f64::from(tm) * m
                    + f64::from(tmp) * mp
                    + f64::from(tf) * f)
                    .to_radians();
                coeff * e_factor.powi(i32::from(tm.abs())) * arg.cos()
            })
            .sum()
    };

    let lon = (lp + series(MOON_LON_TERMS)).rem_euclid(360.0).to_radians();
    let lat = series(MOON_LAT_TERMS).to_radians();
    let r = (MOON_DISTANCE_KM + cosine_series(MOON_DIST_TERMS)) / AU_KM;

    Vector3::new(
        r * lat.cos() * lon.cos(),
        r * lat.cos() * lon.sin(),
        r * lat.sin(),
    )
}
