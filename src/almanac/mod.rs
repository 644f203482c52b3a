//! Step functions for celestial events
//!
//! Builders that turn an [`Ephemeris`] into the piecewise-constant
//! functions [`find_discrete`](crate::searchlib::find_discrete) searches:
//! the season index from the Sun's ecliptic longitude quadrant, and the
//! moon-phase index from the Moon-Sun elongation quadrant.
//!
//! # Example
//!
//! ```
//! use lunation::almanac::{self, SEASON_NAMES};
//! use lunation::ephemlib::analytic::AnalyticEphemeris;
//! use lunation::searchlib::{find_discrete, TOLERANCE_DEFAULT};
//! use lunation::timelib::{Interval, Time};
//!
//! let mut eph = AnalyticEphemeris::new();
//! let span = Interval::new(
//!     Time::from_calendar(2005, 1, 1),
//!     Time::from_calendar(2006, 1, 1),
//! )?;
//! let mut f = almanac::seasons(&mut eph);
//! let events = find_discrete(&mut f, &span, almanac::SEASONS_STEP_DAYS, TOLERANCE_DEFAULT)?;
//! for event in &events {
//!     println!("{}: {}", event.time, SEASON_NAMES[event.value as usize]);
//! }
//! # Ok::<(), lunation::Error>(())
//! ```

use crate::constants::TAU;
use crate::ephemlib::{ecliptic_longitude, Body, Ephemeris};
use crate::errors::Result;

/// Human-readable season names indexed by season number 0..3
pub const SEASON_NAMES: &[&str] = &[
    "Vernal Equinox",
    "Summer Solstice",
    "Autumnal Equinox",
    "Winter Solstice",
];

/// Human-readable moon phase names indexed by phase number 0..3
pub const MOON_PHASE_NAMES: &[&str] = &["New Moon", "First Quarter", "Full Moon", "Last Quarter"];

/// Season index announcing the winter solstice
pub const WINTER_SOLSTICE: i64 = 3;

/// Moon-phase index announcing the new moon
pub const NEW_MOON: i64 = 0;

/// Sampling step for [`seasons`]
///
/// Season transitions are about 91 days apart, so anything below that
/// works; 30 days keeps the initial scan cheap with a wide margin.
pub const SEASONS_STEP_DAYS: f64 = 30.0;

/// Sampling step for [`moon_phases`]
///
/// Quarter transitions come at least ~6 days apart. One day leaves a wide
/// margin; a step near 7 days can straddle a whole quarter and miss it.
pub const MOON_PHASES_STEP_DAYS: f64 = 1.0;

/// Ecliptic longitude of the Sun at each Julian date, radians [0, 2*PI)
pub fn sun_ecliptic_longitude<E>(eph: &mut E, jd: &[f64]) -> Result<Vec<f64>>
where
    E: Ephemeris + ?Sized,
{
    jd.iter()
        .map(|&t| ecliptic_longitude(eph, Body::Sun, t))
        .collect()
}

/// Ecliptic longitude of the Moon at each Julian date, radians [0, 2*PI)
pub fn moon_ecliptic_longitude<E>(eph: &mut E, jd: &[f64]) -> Result<Vec<f64>>
where
    E: Ephemeris + ?Sized,
{
    jd.iter()
        .map(|&t| ecliptic_longitude(eph, Body::Moon, t))
        .collect()
}

/// The continuous moon phase angle (0..360 degrees) at each Julian date
///
/// The phase angle is the Moon-Sun ecliptic longitude difference:
/// 0 = new moon, 90 = first quarter, 180 = full moon, 270 = last quarter.
pub fn moon_phase_angle<E>(eph: &mut E, jd: &[f64]) -> Result<Vec<f64>>
where
    E: Ephemeris + ?Sized,
{
    jd.iter()
        .map(|&t| {
            let sun = ecliptic_longitude(eph, Body::Sun, t)?;
            let moon = ecliptic_longitude(eph, Body::Moon, t)?;
            Ok((moon - sun).rem_euclid(TAU).to_degrees())
        })
        .collect()
}

/// Step function mapping time to the season index 0..3
///
/// - 0 = Vernal Equinox quadrant (Sun at 0..90 degrees ecliptic longitude)
/// - 1 = Summer Solstice quadrant (90..180)
/// - 2 = Autumnal Equinox quadrant (180..270)
/// - 3 = Winter Solstice quadrant (270..360)
///
/// Each transition into a quadrant is the equinox or solstice of that
/// name. Search with a step of at most [`SEASONS_STEP_DAYS`].
pub fn seasons<E>(eph: &mut E) -> impl FnMut(&[f64]) -> Result<Vec<i64>> + '_
where
    E: Ephemeris + ?Sized,
{
    move |jd: &[f64]| {
        let lons = sun_ecliptic_longitude(eph, jd)?;
        Ok(lons
            .iter()
            .map(|&lon| (lon / (TAU / 4.0)).floor() as i64 % 4)
            .collect())
    }
}

/// Step function mapping time to the moon phase index 0..3
///
/// - 0 = New Moon quadrant (elongation 0..90 degrees)
/// - 1 = First Quarter quadrant (90..180)
/// - 2 = Full Moon quadrant (180..270)
/// - 3 = Last Quarter quadrant (270..360)
///
/// Each transition into a quadrant is the instant of the named phase.
/// Search with a step of at most [`MOON_PHASES_STEP_DAYS`].
pub fn moon_phases<E>(eph: &mut E) -> impl FnMut(&[f64]) -> Result<Vec<i64>> + '_
where
    E: Ephemeris + ?Sized,
{
    move |jd: &[f64]| {
        let angles = moon_phase_angle(eph, jd)?;
        Ok(angles
            .iter()
            .map(|&deg| (deg / 90.0).floor() as i64 % 4)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemlib::analytic::AnalyticEphemeris;
    use crate::searchlib::{find_discrete, TOLERANCE_DEFAULT};
    use crate::timelib::{Interval, Time};

    fn year_span(year: i32) -> Interval {
        Interval::new(
            Time::from_calendar(year, 1, 1),
            Time::from_calendar(year + 1, 1, 1),
        )
        .unwrap()
    }

    // --- Sun ecliptic longitude ---

    #[test]
    fn test_sun_ecliptic_longitude_increases() {
        let mut eph = AnalyticEphemeris::new();
        let jds: Vec<f64> = (0..10).map(|i| 2_451_545.0 + f64::from(i) * 30.0).collect();
        let lons = sun_ecliptic_longitude(&mut eph, &jds).unwrap();

        for i in 1..lons.len() {
            let diff = (lons[i] - lons[i - 1]).rem_euclid(TAU);
            assert!(
                diff > 0.0 && diff < TAU / 2.0,
                "Sun longitude should increase: diff = {diff:.4} rad at step {i}"
            );
        }
    }

    // --- Seasons ---

    #[test]
    fn test_seasons_produces_four_events_in_year() {
        let mut eph = AnalyticEphemeris::new();
        let mut f = seasons(&mut eph);
        let events =
            find_discrete(&mut f, &year_span(2005), SEASONS_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        assert_eq!(
            events.len(),
            4,
            "should find 4 seasonal transitions in a year, got {}",
            events.len()
        );
        let season_vals: Vec<i64> = events.iter().map(|e| e.value).collect();
        for wanted in 0..4 {
            assert!(season_vals.contains(&wanted), "missing season {wanted}");
        }
    }

    #[test]
    fn test_vernal_equinox_near_march_20() {
        let mut eph = AnalyticEphemeris::new();
        let mut f = seasons(&mut eph);
        let events =
            find_discrete(&mut f, &year_span(2005), SEASONS_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        let ve = events.iter().find(|e| e.value == 0).expect("no vernal equinox");
        let march_20 = Time::from_calendar(2005, 3, 20).julian_date();
        let diff_days = (ve.time.julian_date() - march_20).abs();
        assert!(
            diff_days < 1.5,
            "vernal equinox should be near March 20, diff = {diff_days:.2} days"
        );
    }

    #[test]
    fn test_winter_solstice_near_december_21() {
        let mut eph = AnalyticEphemeris::new();
        let mut f = seasons(&mut eph);
        let events =
            find_discrete(&mut f, &year_span(2005), SEASONS_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        let ws = events
            .iter()
            .find(|e| e.value == WINTER_SOLSTICE)
            .expect("no winter solstice");
        let dec_21 = Time::from_calendar(2005, 12, 21).julian_date();
        let diff_days = (ws.time.julian_date() - dec_21).abs();
        assert!(
            diff_days < 1.5,
            "winter solstice should be near December 21, diff = {diff_days:.2} days"
        );
    }

    // --- Moon phases ---

    #[test]
    fn test_moon_phase_angle_range() {
        let mut eph = AnalyticEphemeris::new();
        let jds: Vec<f64> = (0..30).map(|i| 2_453_371.0 + f64::from(i)).collect();
        let angles = moon_phase_angle(&mut eph, &jds).unwrap();

        for &angle in &angles {
            assert!(
                (0.0..360.0).contains(&angle),
                "phase angle should be in [0, 360), got {angle}"
            );
        }
    }

    #[test]
    fn test_moon_phases_about_four_per_month() {
        let mut eph = AnalyticEphemeris::new();
        let span = Interval::new(
            Time::from_calendar(2005, 1, 1),
            Time::from_calendar(2005, 2, 1),
        )
        .unwrap();
        let mut f = moon_phases(&mut eph);
        let events =
            find_discrete(&mut f, &span, MOON_PHASES_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        assert!(
            (3..=5).contains(&events.len()),
            "should find 3-5 phase transitions per month, got {}",
            events.len()
        );
    }

    #[test]
    fn test_moon_phases_finds_all_types_in_two_months() {
        let mut eph = AnalyticEphemeris::new();
        let span = Interval::new(
            Time::from_calendar(2005, 1, 1),
            Time::from_calendar(2005, 3, 1),
        )
        .unwrap();
        let mut f = moon_phases(&mut eph);
        let events =
            find_discrete(&mut f, &span, MOON_PHASES_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        let phase_vals: Vec<i64> = events.iter().map(|e| e.value).collect();
        for wanted in 0..4 {
            assert!(
                phase_vals.contains(&wanted),
                "missing {}",
                MOON_PHASE_NAMES[wanted as usize]
            );
        }
    }

    #[test]
    fn test_new_moon_january_2024_against_published_time() {
        // NASA: New Moon 2024-Jan-11 ~11:57 UTC. The analytic provider is
        // low-precision, so allow a generous few hours either side.
        let mut eph = AnalyticEphemeris::new();
        let span = Interval::new(
            Time::from_calendar(2024, 1, 1),
            Time::from_calendar(2024, 1, 20),
        )
        .unwrap();
        let mut f = moon_phases(&mut eph);
        let events =
            find_discrete(&mut f, &span, MOON_PHASES_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        let new_moon = events
            .iter()
            .find(|e| e.value == NEW_MOON)
            .expect("no new moon in window");
        let published = Time::from_calendar_hms(2024, 1, 11, 11, 57, 0.0).julian_date();
        let diff_hours = (new_moon.time.julian_date() - published).abs() * 24.0;
        assert!(
            diff_hours < 4.0,
            "new moon off by {diff_hours:.1} h, got {}",
            new_moon.time
        );
    }

    #[test]
    fn test_full_moon_january_2024_against_published_time() {
        // NASA: Full Moon 2024-Jan-25 ~17:54 UTC
        let mut eph = AnalyticEphemeris::new();
        let span = Interval::new(
            Time::from_calendar(2024, 1, 15),
            Time::from_calendar(2024, 2, 1),
        )
        .unwrap();
        let mut f = moon_phases(&mut eph);
        let events =
            find_discrete(&mut f, &span, MOON_PHASES_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        let full_moon = events
            .iter()
            .find(|e| e.value == 2)
            .expect("no full moon in window");
        let published = Time::from_calendar_hms(2024, 1, 25, 17, 54, 0.0).julian_date();
        let diff_hours = (full_moon.time.julian_date() - published).abs() * 24.0;
        assert!(
            diff_hours < 4.0,
            "full moon off by {diff_hours:.1} h, got {}",
            full_moon.time
        );
    }

    #[test]
    fn test_phase_events_alternate_upward() {
        let mut eph = AnalyticEphemeris::new();
        let span = Interval::new(
            Time::from_calendar(2005, 1, 1),
            Time::from_calendar(2005, 4, 1),
        )
        .unwrap();
        let mut f = moon_phases(&mut eph);
        let events =
            find_discrete(&mut f, &span, MOON_PHASES_STEP_DAYS, TOLERANCE_DEFAULT).unwrap();

        for w in events.windows(2) {
            assert_eq!(
                (w[0].value + 1) % 4,
                w[1].value,
                "phases should cycle in order, got {} then {}",
                w[0].value,
                w[1].value
            );
        }
    }

    // --- Name tables ---

    #[test]
    fn test_name_tables() {
        assert_eq!(SEASON_NAMES.len(), 4);
        assert_eq!(SEASON_NAMES[WINTER_SOLSTICE as usize], "Winter Solstice");
        assert_eq!(MOON_PHASE_NAMES.len(), 4);
        assert_eq!(MOON_PHASE_NAMES[NEW_MOON as usize], "New Moon");
    }
}
