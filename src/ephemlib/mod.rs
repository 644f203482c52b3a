//! The ephemeris provider abstraction
//!
//! The event-finding layers never read ephemeris data themselves: they
//! query an injected [`Ephemeris`], which maps a body and a Julian date to
//! a geocentric position. Production deployments back this trait with a
//! full planetary ephemeris; tests and casual use rely on the built-in
//! low-precision [`analytic::AnalyticEphemeris`], which needs no data
//! files at all.
//!
//! Providers must be deterministic: the same body and time always yield
//! the same position. Failures are likewise deterministic (a time outside
//! coverage stays outside coverage), so callers never retry.

pub mod analytic;

use nalgebra::Vector3;

use crate::constants::TAU;
use crate::errors::Result;

/// Bodies a provider can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// Get the body's name
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
        }
    }
}

/// Source of deterministic geocentric body positions
pub trait Ephemeris {
    /// Geocentric ecliptic-of-date position of `body` at the given Julian
    /// date, in AU
    ///
    /// Must fail with [`Error::OutOfRange`](crate::Error::OutOfRange) for
    /// times outside [`coverage`](Ephemeris::coverage), so callers can tell
    /// a coverage gap from any other provider failure.
    fn position(&mut self, body: Body, jd: f64) -> Result<Vector3<f64>>;

    /// The Julian date range this provider supports, as (start, end)
    fn coverage(&self) -> (f64, f64);
}

/// Ecliptic longitude of a body in radians [0, 2*PI)
pub fn ecliptic_longitude<E>(eph: &mut E, body: Body, jd: f64) -> Result<f64>
where
    E: Ephemeris + ?Sized,
{
    let p = eph.position(body, jd)?;
    Ok(p.y.atan2(p.x).rem_euclid(TAU))
}
