//! When does the lunar new year fall in the year 4989?
//!
//! Locates the winter solstice and the following new moons with the
//! built-in analytic ephemeris, then applies the second-new-moon rule.
//!
//! Usage: cargo run --example lunar_new_year [year]

use lunation::almanac::{MOON_PHASE_NAMES, NEW_MOON, SEASON_NAMES, WINTER_SOLSTICE};
use lunation::ephemlib::analytic::AnalyticEphemeris;
use lunation::lunisolar;

fn main() -> lunation::Result<()> {
    env_logger::init();

    let year: i32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4989);

    let mut eph = AnalyticEphemeris::new();
    let span = lunisolar::new_year_window(year)?;
    println!(
        "Searching {} .. {} (all times UTC)\n",
        span.start(),
        span.end()
    );

    match lunisolar::winter_solstice(&mut eph, &span)? {
        Some(event) => println!(
            "{:<16} {}",
            SEASON_NAMES[WINTER_SOLSTICE as usize],
            event.time
        ),
        None => println!("No winter solstice in the window"),
    }

    for event in lunisolar::new_moons(&mut eph, &span)? {
        println!("{:<16} {}", MOON_PHASE_NAMES[NEW_MOON as usize], event.time);
    }

    match lunisolar::lunar_new_year(&mut eph, year)? {
        Some(t) => {
            let cal = t.calendar();
            println!(
                "\nLunar new year {year}: {:04}-{:02}-{:02} (event at {})",
                cal.year, cal.month, cal.day, t
            );
        }
        None => println!("\nNo lunar new year found in the window"),
    }

    Ok(())
}
