//! Tab-separated dump of a computed year.

use std::io::{self, Write};

use chrono::NaiveDateTime;

use crate::year::RiseSetYear;

/// Placeholder for an event that does not happen on a day.
const NO_EVENT: &str = "-";

/// Writes the location, DST metadata, bands and one row per day.
///
/// Times are local `HH:MM`; polar days and nights show [`NO_EVENT`] in
/// place of the missing times and name the regime in the last column.
///
/// # Errors
/// Propagates write failures.
pub fn write_calculations<W: Write>(writer: &mut W, year: &RiseSetYear) -> io::Result<()> {
    let location = year.location();
    writeln!(writer, "Location\t{location}\t{}", location.point())?;
    writeln!(writer, "Time zone\t{}", location.timezone())?;
    writeln!(writer, "Year\t{}", year.year())?;
    match (year.dst_start(), year.dst_end()) {
        (Some(start), Some(end)) => writeln!(writer, "DST\t{start}\t{end}")?,
        _ => writeln!(writer, "DST\t{NO_EVENT}\t{NO_EVENT}")?,
    }
    writeln!(writer)?;

    writeln!(writer, "Band\tStart\tEnd\tRegime")?;
    for (index, band) in year.bands().iter().enumerate() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            index + 1,
            band.start(),
            band.end(),
            band.regime()
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "Date\tSunrise\tSunset\tTwilight Rise\tTwilight Set\tRegime")?;
    for (rise_set, twilight) in year.rise_sets().iter().zip(year.twilights()) {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            rise_set.date(),
            time(rise_set.sunrise()),
            time(rise_set.sunset()),
            time(twilight.sunrise()),
            time(twilight.sunset()),
            rise_set.regime(),
        )?;
    }
    writer.flush()
}

fn time(event: Option<NaiveDateTime>) -> String {
    event.map_or_else(|| NO_EVENT.to_owned(), |t| t.format("%H:%M").to_string())
}
