//! UTC offset lookup for time zone identifiers.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::angle::Longitude;
use crate::{Error, Result};

/// Resolves the UTC offset of a time zone at an instant.
///
/// Implementations must be pure: the same `(timezone, instant)` always gives
/// the same offset.
pub trait TimezoneOffsetLookup: Sync {
    /// Gets the offset from UTC in minutes (east positive) in effect at `instant`.
    ///
    /// # Errors
    /// Returns `UnknownTimezone` if the identifier cannot be resolved.
    fn offset_at(&self, timezone: &str, instant: DateTime<Utc>) -> Result<i32>;
}

/// Offsets from the IANA time zone database compiled into `chrono-tz`.
///
/// # Example
/// ```
/// # use daylight_chart::tz::{TimezoneOffsetLookup, ZoneOffsets};
/// use chrono::{TimeZone, Utc};
///
/// let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
/// assert_eq!(ZoneOffsets.offset_at("Europe/London", summer).unwrap(), 60);
/// assert!(ZoneOffsets.offset_at("Mars/Olympus_Mons", summer).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneOffsets;

impl ZoneOffsets {
    /// Resolves an IANA identifier.
    ///
    /// # Errors
    /// Returns `UnknownTimezone` if the identifier is not in the database.
    pub fn resolve(timezone: &str) -> Result<Tz> {
        timezone
            .parse::<Tz>()
            .map_err(|_| Error::unknown_timezone(timezone))
    }
}

impl TimezoneOffsetLookup for ZoneOffsets {
    fn offset_at(&self, timezone: &str, instant: DateTime<Utc>) -> Result<i32> {
        let zone = Self::resolve(timezone)?;
        let offset = zone.offset_from_utc_datetime(&instant.naive_utc()).fix();
        Ok(offset.local_minus_utc() / 60)
    }
}

/// A constant offset that ignores the time zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsets {
    minutes: i32,
}

impl FixedOffsets {
    /// Creates a lookup that always answers `minutes`.
    #[must_use]
    pub const fn new(minutes: i32) -> Self {
        Self { minutes }
    }

    /// Local mean time for a meridian: four minutes per degree of longitude.
    #[must_use]
    pub fn local_mean_time(longitude: Longitude) -> Self {
        Self::new((longitude.degrees() * 4.0).round() as i32)
    }
}

impl TimezoneOffsetLookup for FixedOffsets {
    fn offset_at(&self, _timezone: &str, _instant: DateTime<Utc>) -> Result<i32> {
        Ok(self.minutes)
    }
}

/// Which clock the year's local times are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeZoneOption {
    /// Civil time of the location's time zone, daylight saving included.
    #[default]
    ZoneTime,
    /// Local mean solar time of the location's meridian; never daylight saving.
    LocalMeanTime,
}

/// The UTC instant of 12:00 local time on `date`.
///
/// Offsets change in the small hours, so local noon is on the settled side
/// of any transition made that day.
///
/// # Errors
/// Returns `InvalidYear` if that instant falls outside the calendar range,
/// and propagates lookup failures.
pub fn local_noon(
    lookup: &dyn TimezoneOffsetLookup,
    timezone: &str,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, i32)> {
    let noon: NaiveDateTime = date.and_time(NaiveTime::MIN) + Duration::hours(12);
    let first_guess = lookup.offset_at(timezone, noon.and_utc())?;
    let instant = noon
        .checked_sub_signed(Duration::minutes(i64::from(first_guess)))
        .ok_or(Error::InvalidYear { year: date.year() })?
        .and_utc();
    let offset = lookup.offset_at(timezone, instant)?;
    Ok((instant, offset))
}
