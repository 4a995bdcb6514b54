//! Daylight-saving transition detection.
//!
//! Offsets are sampled once per day at local noon. Zones shift their clocks
//! in the small hours, so the first date whose noon offset differs from the
//! day before is the transition date.

use chrono::{Datelike, NaiveDate};
use log::{trace, warn};

use crate::tz::{local_noon, TimezoneOffsetLookup};
use crate::{Error, Result};

/// Daylight-saving metadata for one time zone and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DstSchedule {
    uses_dst: bool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    standard_offset_minutes: i32,
    daylight_offset_minutes: Option<i32>,
}

impl DstSchedule {
    /// A schedule without daylight saving at a fixed offset.
    #[must_use]
    pub const fn fixed(offset_minutes: i32) -> Self {
        Self {
            uses_dst: false,
            start: None,
            end: None,
            standard_offset_minutes: offset_minutes,
            daylight_offset_minutes: None,
        }
    }

    /// Derives the schedule from chronological `(date, offset)` pairs covering `year`.
    ///
    /// `start` is the first date whose offset differs from January 1's and
    /// `end` the first later date on which it reverts. In the southern
    /// hemisphere January is already on daylight time, so `start` is then the
    /// date daylight saving *ends*; use the per-day offsets to tell the sides
    /// apart.
    ///
    /// # Errors
    /// Returns `AmbiguousDstSchedule` for more than two offset changes, or for
    /// two changes that do not return to the January offset.
    pub fn from_daily_offsets(
        timezone: &str,
        year: i32,
        offsets: &[(NaiveDate, i32)],
    ) -> Result<Self> {
        let Some(&(_, january)) = offsets.first() else {
            return Ok(Self::fixed(0));
        };

        let transitions: Vec<NaiveDate> = offsets
            .windows(2)
            .filter(|pair| pair[0].1 != pair[1].1)
            .map(|pair| pair[1].0)
            .collect();
        for date in &transitions {
            trace!("{timezone}: UTC offset changes on {date}");
        }

        let standard = offsets.iter().map(|&(_, offset)| offset).min().unwrap_or(january);
        let daylight = offsets.iter().map(|&(_, offset)| offset).max().unwrap_or(january);
        let december = offsets.last().map_or(january, |&(_, offset)| offset);

        match transitions.as_slice() {
            [] => Ok(Self::fixed(january)),
            [date] => {
                warn!(
                    "{timezone}: single UTC offset change on {date} in {year}, \
                     treating as a permanent change rather than daylight saving"
                );
                Ok(Self::fixed(standard))
            }
            [start, end] if december == january => Ok(Self {
                uses_dst: true,
                start: Some(*start),
                end: Some(*end),
                standard_offset_minutes: standard,
                daylight_offset_minutes: Some(daylight),
            }),
            _ => Err(Error::AmbiguousDstSchedule {
                timezone: timezone.to_owned(),
                year,
                transitions: transitions.len(),
            }),
        }
    }

    /// Whether the zone observes daylight saving in this year.
    #[must_use]
    pub const fn uses_dst(&self) -> bool {
        self.uses_dst
    }

    /// First transition date, present exactly when [`uses_dst`](Self::uses_dst).
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Second transition date, present exactly when [`uses_dst`](Self::uses_dst).
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// The lowest offset of the year, in minutes east of UTC.
    #[must_use]
    pub const fn standard_offset_minutes(&self) -> i32 {
        self.standard_offset_minutes
    }

    /// The daylight-saving offset, if the zone uses one.
    #[must_use]
    pub const fn daylight_offset_minutes(&self) -> Option<i32> {
        self.daylight_offset_minutes
    }

    /// Whether a day with this offset is on daylight-saving time.
    #[must_use]
    pub const fn is_daylight_offset(&self, offset_minutes: i32) -> bool {
        self.uses_dst && offset_minutes > self.standard_offset_minutes
    }
}

/// Scans a year of daily UTC offsets for a time zone.
#[derive(Clone, Copy)]
pub struct DstBoundaryDetector<'a> {
    lookup: &'a dyn TimezoneOffsetLookup,
}

impl<'a> DstBoundaryDetector<'a> {
    /// Creates a detector over an offset lookup.
    #[must_use]
    pub fn new(lookup: &'a dyn TimezoneOffsetLookup) -> Self {
        Self { lookup }
    }

    /// The offset in effect at local noon on every day of `year`.
    ///
    /// # Errors
    /// Returns `InvalidYear` if the year is outside the calendar range, or
    /// propagates lookup failures such as `UnknownTimezone`.
    pub fn daily_offsets(&self, timezone: &str, year: i32) -> Result<Vec<(NaiveDate, i32)>> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidYear { year })?;
        first
            .iter_days()
            .take_while(|date| date.year() == year)
            .map(|date| local_noon(self.lookup, timezone, date).map(|(_, offset)| (date, offset)))
            .collect()
    }

    /// Finds the daylight-saving transitions of `year`.
    ///
    /// # Errors
    /// See [`daily_offsets`](Self::daily_offsets) and
    /// [`DstSchedule::from_daily_offsets`].
    ///
    /// # Example
    /// ```
    /// # use daylight_chart::{DstBoundaryDetector, ZoneOffsets};
    /// use chrono::NaiveDate;
    ///
    /// let schedule = DstBoundaryDetector::new(&ZoneOffsets).detect("Europe/Paris", 2024).unwrap();
    /// assert!(schedule.uses_dst());
    /// assert_eq!(schedule.start(), NaiveDate::from_ymd_opt(2024, 3, 31));
    /// assert_eq!(schedule.end(), NaiveDate::from_ymd_opt(2024, 10, 27));
    /// ```
    pub fn detect(&self, timezone: &str, year: i32) -> Result<DstSchedule> {
        let offsets = self.daily_offsets(timezone, year)?;
        DstSchedule::from_daily_offsets(timezone, year, &offsets)
    }
}

impl core::fmt::Debug for DstBoundaryDetector<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DstBoundaryDetector").finish_non_exhaustive()
    }
}
