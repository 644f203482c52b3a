//! Error types shared across the crate

use thiserror::Error;

/// Main error type for event location and ephemeris queries
#[derive(Error, Debug)]
pub enum Error {
    /// A time falls outside the range the ephemeris provider covers
    #[error("JD {jd} is outside ephemeris coverage ({start_jd}..{end_jd})")]
    OutOfRange { jd: f64, start_jd: f64, end_jd: f64 },

    /// An interval whose end precedes its start
    #[error("interval end JD {end_jd} precedes start JD {start_jd}")]
    InvalidInterval { start_jd: f64, end_jd: f64 },

    /// A sampling step that is zero, negative, or non-finite
    #[error("sampling step must be positive and finite, got {0} days")]
    InvalidStep(f64),

    /// A refinement tolerance that is zero, negative, or non-finite
    #[error("refinement tolerance must be positive and finite, got {0} days")]
    InvalidTolerance(f64),

    /// The consistency check found events the requested step had missed
    #[error("step of {step_days} days is too coarse: half-resolution sampling found different events")]
    ResolutionTooCoarse { step_days: f64 },

    /// An ephemeris provider failed for a reason other than coverage
    #[error("ephemeris provider error: {0}")]
    Provider(String),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
