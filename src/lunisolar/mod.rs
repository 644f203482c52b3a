//! Lunisolar calendar queries composed from event searches
//!
//! Thin filtering and selection over [`find_discrete`]: locate the winter
//! solstice, locate new moons, and combine the two into the lunisolar
//! new-year rule, the second new moon after the winter solstice. This is
//! the composition the crate exists for; the generic machinery lives in
//! [`crate::searchlib`] and [`crate::almanac`].

use log::debug;

use crate::almanac::{self, MOON_PHASES_STEP_DAYS, NEW_MOON, SEASONS_STEP_DAYS, WINTER_SOLSTICE};
use crate::ephemlib::Ephemeris;
use crate::errors::Result;
use crate::searchlib::{find_discrete, Event, TOLERANCE_DEFAULT};
use crate::timelib::{Interval, Time};

/// The first winter solstice within the interval, if any
pub fn winter_solstice<E>(eph: &mut E, span: &Interval) -> Result<Option<Event>>
where
    E: Ephemeris + ?Sized,
{
    let mut f = almanac::seasons(eph);
    let events = find_discrete(&mut f, span, SEASONS_STEP_DAYS, TOLERANCE_DEFAULT)?;
    Ok(events.into_iter().find(|e| e.value == WINTER_SOLSTICE))
}

/// All new moons within the interval, in chronological order
pub fn new_moons<E>(eph: &mut E, span: &Interval) -> Result<Vec<Event>>
where
    E: Ephemeris + ?Sized,
{
    let mut f = almanac::moon_phases(eph);
    let events = find_discrete(&mut f, span, MOON_PHASES_STEP_DAYS, TOLERANCE_DEFAULT)?;
    Ok(events.into_iter().filter(|e| e.value == NEW_MOON).collect())
}

/// The search window for a given year's lunisolar new year: from December 1
/// of the preceding year through March 1
///
/// Wide enough to hold the preceding winter solstice and the two following
/// new moons for every possible alignment.
pub fn new_year_window(year: i32) -> Result<Interval> {
    Interval::new(
        Time::from_calendar(year - 1, 12, 1),
        Time::from_calendar(year, 3, 1),
    )
}

/// The instant of the lunisolar new year for the given Gregorian year:
/// the second new moon after the preceding winter solstice
///
/// Returns `Ok(None)` when the window holds no solstice or fewer than two
/// new moons after it; that is an empty search result, not an error. The result
/// converts to calendar form in UTC; an event within hours of midnight
/// lands on a different calendar date in other zones.
pub fn lunar_new_year<E>(eph: &mut E, year: i32) -> Result<Option<Time>>
where
    E: Ephemeris + ?Sized,
{
    let span = new_year_window(year)?;

    let Some(solstice) = winter_solstice(eph, &span)? else {
        return Ok(None);
    };
    debug!("winter solstice preceding {year}: {}", solstice.time);

    let moons = new_moons(eph, &span)?;
    let mut after_solstice = moons.into_iter().filter(|e| e.time > solstice.time);
    let _first = after_solstice.next();
    Ok(after_solstice.next().map(|e| e.time))
}
