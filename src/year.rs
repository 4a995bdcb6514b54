//! A full year of sunrise, sunset and twilight for one location.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::almanac::{DailySample, DailySampleSource};
use crate::bands::{DaylightBand, DaylightBandBuilder};
use crate::dst::{DstBoundaryDetector, DstSchedule};
use crate::location::Location;
use crate::types::{Horizon, RiseSet, RiseSetSample, TwilightSample};
use crate::tz::{FixedOffsets, TimeZoneOption, TimezoneOffsetLookup};
use crate::{Error, Result};

/// Settings for building a [`RiseSetYear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearOptions {
    time_zone: TimeZoneOption,
    parallel: bool,
}

impl Default for YearOptions {
    fn default() -> Self {
        Self {
            time_zone: TimeZoneOption::ZoneTime,
            parallel: true,
        }
    }
}

impl YearOptions {
    /// Selects the clock local times are expressed in.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: TimeZoneOption) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Enables or disables sampling days on the rayon thread pool.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Gets the selected clock.
    #[must_use]
    pub const fn time_zone(&self) -> TimeZoneOption {
        self.time_zone
    }

    /// Whether days are sampled in parallel.
    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }
}

/// Sunrise, sunset, twilight, daylight bands and DST metadata for one
/// location and year.
///
/// Built only by [`YearAggregator::build`] and immutable afterwards. Every
/// sequence holds exactly one entry per calendar day, in date order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiseSetYear {
    location: Location,
    year: i32,
    time_zone: TimeZoneOption,
    twilight_horizon: Horizon,
    dst: DstSchedule,
    rise_sets: Vec<RiseSetSample>,
    twilights: Vec<TwilightSample>,
    bands: Vec<DaylightBand>,
    twilight_bands: Vec<DaylightBand>,
}

impl RiseSetYear {
    /// Gets the location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Gets the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Gets the clock the local times are expressed in.
    #[must_use]
    pub const fn time_zone(&self) -> TimeZoneOption {
        self.time_zone
    }

    /// Gets the horizon the twilight sequence refers to.
    #[must_use]
    pub const fn twilight_horizon(&self) -> Horizon {
        self.twilight_horizon
    }

    /// Number of days in the year.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rise_sets.len()
    }

    /// Always false for a built year; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rise_sets.is_empty()
    }

    /// Sunrise and sunset in local civil time, daylight saving applied.
    #[must_use]
    pub fn rise_sets(&self) -> &[RiseSetSample] {
        &self.rise_sets
    }

    /// Sunrise and sunset in standard time all year round.
    ///
    /// Days on daylight-saving time are shifted back by the difference between
    /// their offset and the standard offset; other days are unchanged.
    #[must_use]
    pub fn rise_sets_without_dst(&self) -> Vec<RiseSetSample> {
        let standard = self.dst.standard_offset_minutes();
        self.rise_sets
            .iter()
            .map(|sample| sample.without_daylight_savings(standard))
            .collect()
    }

    /// Twilight begin and end in local civil time.
    #[must_use]
    pub fn twilights(&self) -> &[TwilightSample] {
        &self.twilights
    }

    /// The rise/set sample of `date`, if it lies in this year.
    #[must_use]
    pub fn rise_set_on(&self, date: NaiveDate) -> Option<&RiseSetSample> {
        self.day_index(date).and_then(|index| self.rise_sets.get(index))
    }

    /// The twilight sample of `date`, if it lies in this year.
    #[must_use]
    pub fn twilight_on(&self, date: NaiveDate) -> Option<&TwilightSample> {
        self.day_index(date).and_then(|index| self.twilights.get(index))
    }

    /// Daylight bands over the rise/set sequence.
    #[must_use]
    pub fn bands(&self) -> &[DaylightBand] {
        &self.bands
    }

    /// Daylight bands over the twilight sequence.
    #[must_use]
    pub fn twilight_bands(&self) -> &[DaylightBand] {
        &self.twilight_bands
    }

    /// Gets the daylight-saving schedule.
    #[must_use]
    pub const fn dst_schedule(&self) -> &DstSchedule {
        &self.dst
    }

    /// Whether the location's clock observes daylight saving this year.
    #[must_use]
    pub const fn uses_dst(&self) -> bool {
        self.dst.uses_dst()
    }

    /// First daylight-saving transition date.
    #[must_use]
    pub const fn dst_start(&self) -> Option<NaiveDate> {
        self.dst.start()
    }

    /// Second daylight-saving transition date.
    #[must_use]
    pub const fn dst_end(&self) -> Option<NaiveDate> {
        self.dst.end()
    }

    fn day_index(&self, date: NaiveDate) -> Option<usize> {
        (date.year() == self.year).then(|| date.ordinal0() as usize)
    }
}

/// Drives a [`DailySampleSource`] across a year and assembles a [`RiseSetYear`].
///
/// # Example
/// ```
/// # use daylight_chart::{Location, SolarAlmanac, YearAggregator, ZoneOffsets};
/// let location = Location::new("Aberdeen", "GB", "Europe/London", "+5710-00204/".parse().unwrap()).unwrap();
/// let almanac = SolarAlmanac::default();
///
/// let year = YearAggregator::new(&almanac, &ZoneOffsets).build(&location, 2024).unwrap();
/// assert_eq!(year.rise_sets().len(), 366);
/// assert!(year.uses_dst());
/// ```
#[derive(Clone, Copy)]
pub struct YearAggregator<'a> {
    source: &'a dyn DailySampleSource,
    lookup: &'a dyn TimezoneOffsetLookup,
    options: YearOptions,
}

impl<'a> YearAggregator<'a> {
    /// Creates an aggregator with default options.
    #[must_use]
    pub fn new(source: &'a dyn DailySampleSource, lookup: &'a dyn TimezoneOffsetLookup) -> Self {
        Self {
            source,
            lookup,
            options: YearOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub const fn with_options(mut self, options: YearOptions) -> Self {
        self.options = options;
        self
    }

    /// Gets the options.
    #[must_use]
    pub const fn options(&self) -> YearOptions {
        self.options
    }

    /// Builds the year for `location`.
    ///
    /// The offset lookup is scanned once for the year, then the sample
    /// source is called once per calendar day with that day's offset. Either
    /// every day succeeds or nothing is returned.
    ///
    /// # Errors
    /// - `InvalidYear` if the year's days or local times fall outside the calendar range
    /// - `SampleUnavailable` with the earliest failing date if the source fails
    /// - `UnknownTimezone` or `AmbiguousDstSchedule` from DST detection
    pub fn build(&self, location: &Location, year: i32) -> Result<RiseSetYear> {
        let local_mean_time;
        let lookup: &dyn TimezoneOffsetLookup = match self.options.time_zone {
            TimeZoneOption::ZoneTime => self.lookup,
            TimeZoneOption::LocalMeanTime => {
                local_mean_time = FixedOffsets::local_mean_time(location.point().longitude());
                &local_mean_time
            }
        };
        let offsets = DstBoundaryDetector::new(lookup).daily_offsets(location.timezone(), year)?;
        let dst = DstSchedule::from_daily_offsets(location.timezone(), year, &offsets)?;
        debug!("Building {} days for {location} in {year}", offsets.len());

        let mut samples = self.sample_days(location, &offsets)?;
        samples.sort_by_key(|&(date, _)| date);

        let mut builder = YearBuilder::with_capacity(offsets.len());
        for ((date, sample), &(_, offset)) in samples.into_iter().zip(&offsets) {
            builder.push(date, offset, dst.is_daylight_offset(offset), sample)?;
        }
        let year_data = builder.finish(location, year, self, dst);

        debug!(
            "Built {} days and {} bands for {location} in {year}",
            year_data.len(),
            year_data.bands().len()
        );
        Ok(year_data)
    }

    fn sample_one(
        &self,
        location: &Location,
        date: NaiveDate,
        offset: i32,
    ) -> Result<(NaiveDate, DailySample)> {
        self.source
            .sample_on_clock(location, date, offset)
            .map(|sample| (date, sample))
            .map_err(|error| match error {
                Error::SampleUnavailable { .. } => error,
                other => Error::sample_unavailable(date, other.to_string()),
            })
    }

    /// Samples every day; on failure the error of the earliest date wins.
    fn sample_days(
        &self,
        location: &Location,
        offsets: &[(NaiveDate, i32)],
    ) -> Result<Vec<(NaiveDate, DailySample)>> {
        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                let results: Vec<Result<(NaiveDate, DailySample)>> = offsets
                    .par_iter()
                    .map(|&(date, offset)| self.sample_one(location, date, offset))
                    .collect();
                return results.into_iter().collect();
            }
        }
        offsets
            .iter()
            .map(|&(date, offset)| self.sample_one(location, date, offset))
            .collect()
    }
}

impl core::fmt::Debug for YearAggregator<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("YearAggregator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Accumulates localised days before freezing them into a [`RiseSetYear`].
struct YearBuilder {
    rise_sets: Vec<RiseSetSample>,
    twilights: Vec<TwilightSample>,
}

impl YearBuilder {
    fn with_capacity(days: usize) -> Self {
        Self {
            rise_sets: Vec::with_capacity(days),
            twilights: Vec::with_capacity(days),
        }
    }

    fn push(&mut self, date: NaiveDate, offset: i32, in_dst: bool, sample: DailySample) -> Result<()> {
        let rise_set = localise(sample.rise_set, offset, date)?;
        let twilight = localise(sample.twilight, offset, date)?;
        self.rise_sets.push(RiseSetSample::new(date, offset, in_dst, rise_set));
        self.twilights.push(RiseSetSample::new(date, offset, in_dst, twilight));
        Ok(())
    }

    fn finish(
        self,
        location: &Location,
        year: i32,
        aggregator: &YearAggregator<'_>,
        dst: DstSchedule,
    ) -> RiseSetYear {
        let bands = DaylightBandBuilder::build(&self.rise_sets);
        let twilight_bands = DaylightBandBuilder::build(&self.twilights);
        RiseSetYear {
            location: location.clone(),
            year,
            time_zone: aggregator.options.time_zone,
            twilight_horizon: aggregator.source.twilight_horizon(),
            dst,
            rise_sets: self.rise_sets,
            twilights: self.twilights,
            bands,
            twilight_bands,
        }
    }
}

/// Moves UTC events onto the local clock; polar markers pass through.
fn localise(
    events: RiseSet<DateTime<Utc>>,
    offset_minutes: i32,
    date: NaiveDate,
) -> Result<RiseSet<NaiveDateTime>> {
    let offset = Duration::minutes(i64::from(offset_minutes));
    events.try_map(|instant| {
        instant
            .naive_utc()
            .checked_add_signed(offset)
            .ok_or(Error::InvalidYear { year: date.year() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DaylightRegime;
    use chrono::{NaiveTime, TimeZone};

    /// Sunrise 06:00 UTC and sunset 18:00 UTC every day.
    struct Equinoctial;

    impl DailySampleSource for Equinoctial {
        fn sample(&self, _location: &Location, date: NaiveDate) -> Result<DailySample> {
            let at = |hour| date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour);
            Ok(DailySample {
                rise_set: RiseSet::Regular {
                    sunrise: at(6),
                    sunset: at(18),
                },
                twilight: RiseSet::Regular {
                    sunrise: at(5),
                    sunset: at(19),
                },
            })
        }
    }

    fn location() -> Location {
        Location::new("Null Island", "XX", "Etc/UTC", "+00+000/".parse().unwrap()).unwrap()
    }

    #[test]
    fn test_localise_uses_offset_and_keeps_markers() {
        let sunrise = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let events = RiseSet::Regular {
            sunrise,
            sunset: sunrise + Duration::hours(10),
        };
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let local = localise(events, 60, day).unwrap();
        assert_eq!(
            local.sunrise().copied(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 30, 0)
        );
        assert_eq!(localise(RiseSet::AllDaylight, 60, day), Ok(RiseSet::AllDaylight));
    }

    #[test]
    fn test_build_fixed_offset_year() {
        let year = YearAggregator::new(&Equinoctial, &FixedOffsets::new(120))
            .with_options(YearOptions::default().with_parallel(false))
            .build(&location(), 2023)
            .unwrap();

        assert_eq!(year.len(), 365);
        assert!(!year.is_empty());
        assert!(!year.uses_dst());
        assert_eq!(year.dst_start(), None);
        assert_eq!(year.twilight_horizon(), Horizon::CivilTwilight);

        let first = &year.rise_sets()[0];
        assert_eq!(first.sunrise().map(|t| t.time()), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(first.sunset().map(|t| t.time()), NaiveTime::from_hms_opt(20, 0, 0));
        assert_eq!(year.twilights()[0].sunrise().map(|t| t.time()), NaiveTime::from_hms_opt(7, 0, 0));

        assert_eq!(year.bands().len(), 1);
        assert_eq!(year.bands()[0].regime(), DaylightRegime::Normal);
        assert_eq!(year.twilight_bands().len(), 1);
    }

    #[test]
    fn test_day_lookup() {
        let year = YearAggregator::new(&Equinoctial, &FixedOffsets::new(0))
            .build(&location(), 2024)
            .unwrap();
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        assert_eq!(year.rise_set_on(leap_day).map(RiseSetSample::date), Some(leap_day));
        assert_eq!(year.twilight_on(leap_day).map(RiseSetSample::date), Some(leap_day));
        assert!(year.rise_set_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).is_none());
    }

    #[test]
    fn test_local_mean_time_ignores_zone() {
        let location = Location::new("Meridian", "XX", "Not/A_Zone", "+00+01500/".parse().unwrap()).unwrap();
        let year = YearAggregator::new(&Equinoctial, &FixedOffsets::new(0))
            .with_options(YearOptions::default().with_time_zone(TimeZoneOption::LocalMeanTime))
            .build(&location, 2023)
            .unwrap();

        assert_eq!(year.time_zone(), TimeZoneOption::LocalMeanTime);
        assert_eq!(year.rise_sets()[0].utc_offset_minutes(), 60);
        assert!(!year.uses_dst());
    }

    #[test]
    fn test_invalid_year() {
        let offsets = FixedOffsets::new(0);
        let aggregator = YearAggregator::new(&Equinoctial, &offsets);
        assert_eq!(
            aggregator.build(&location(), 1_000_000).unwrap_err(),
            Error::InvalidYear { year: 1_000_000 }
        );
    }

    #[test]
    fn test_years_at_calendar_edges() {
        let first = NaiveDate::MIN.year();
        let last = NaiveDate::MAX.year();
        let sequential = YearOptions::default().with_parallel(false);

        // Local noon on January 1 lies before the first representable instant
        let east = FixedOffsets::new(780);
        let result = YearAggregator::new(&Equinoctial, &east)
            .with_options(sequential)
            .build(&location(), first);
        assert_eq!(result.unwrap_err(), Error::InvalidYear { year: first });

        // Sunset on December 31 lands on the clock after the last representable day
        let result = YearAggregator::new(&Equinoctial, &east)
            .with_options(sequential)
            .build(&location(), last);
        assert_eq!(result.unwrap_err(), Error::InvalidYear { year: last });

        let west = FixedOffsets::new(-600);
        assert_eq!(
            YearAggregator::new(&Equinoctial, &west).build(&location(), first).unwrap_err(),
            Error::InvalidYear { year: first }
        );
    }

    #[test]
    fn test_options_builder() {
        let options = YearOptions::default()
            .with_parallel(false)
            .with_time_zone(TimeZoneOption::LocalMeanTime);
        assert!(!options.parallel());
        assert_eq!(options.time_zone(), TimeZoneOption::LocalMeanTime);
        assert!(YearOptions::default().parallel());
    }
}
