//! Discrete astronomical event location over an injected ephemeris
//!
//! `lunation` finds the instants at which a piecewise-constant function of
//! time changes value (moon-phase quarters, season boundaries) and
//! composes those searches into lunisolar calendar answers, such as the
//! Gregorian date of a lunar new year.
//!
//! # Layers
//!
//! - [`searchlib`] — the generic discrete event locator over any
//!   [`StepFunction`](searchlib::StepFunction)
//! - [`ephemlib`] — the [`Ephemeris`](ephemlib::Ephemeris) provider trait
//!   plus a data-free analytic Sun/Moon implementation
//! - [`almanac`] — step-function builders (seasons, moon phases) on top of
//!   a provider
//! - [`lunisolar`] — the domain composition: second new moon after the
//!   winter solstice
//! - [`timelib`] — instants, intervals, and Gregorian calendar conversion
//!
//! # Example
//!
//! ```
//! use lunation::ephemlib::analytic::AnalyticEphemeris;
//! use lunation::lunisolar;
//!
//! let mut eph = AnalyticEphemeris::new();
//! let t = lunisolar::lunar_new_year(&mut eph, 2025)?.expect("event in window");
//! assert_eq!(t.calendar().date(), (2025, 1, 29));
//! # Ok::<(), lunation::Error>(())
//! ```

pub mod almanac;
pub mod constants;
pub mod ephemlib;
pub mod errors;
pub mod lunisolar;
pub mod searchlib;
pub mod timelib;

pub use errors::{Error, Result};
pub use searchlib::{find_discrete, Event};
pub use timelib::{Interval, Time};
