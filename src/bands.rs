//! Merging days of equal daylight regime into bands.

use chrono::NaiveDate;

use crate::types::{DaylightRegime, RiseSetSample};

/// A maximal run of consecutive days sharing one daylight regime.
///
/// Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DaylightBand {
    start: NaiveDate,
    end: NaiveDate,
    regime: DaylightRegime,
}

impl DaylightBand {
    /// First day of the band.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the band.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// The regime shared by every day of the band.
    #[must_use]
    pub const fn regime(&self) -> DaylightRegime {
        self.regime
    }

    /// Number of days in the band.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` lies within the band.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Builds the band partition of a chronological sequence of days.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaylightBandBuilder;

impl DaylightBandBuilder {
    /// Merges consecutive days of equal regime in one pass.
    ///
    /// The input must be in chronological order with one sample per day; the
    /// result then partitions the same days without gaps or overlaps. A flip
    /// straight from polar day to polar night is kept as two abutting bands.
    ///
    /// # Example
    /// ```
    /// # use daylight_chart::{DaylightBandBuilder, DaylightRegime, RiseSet, RiseSetSample};
    /// use chrono::NaiveDate;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
    /// let samples = [
    ///     RiseSetSample::new(day(1), 60, false, RiseSet::AllDaylight),
    ///     RiseSetSample::new(day(2), 60, false, RiseSet::AllDaylight),
    ///     RiseSetSample::new(day(3), 60, false, RiseSet::AllNight),
    /// ];
    ///
    /// let bands = DaylightBandBuilder::build(&samples);
    /// assert_eq!(bands.len(), 2);
    /// assert_eq!(bands[0].regime(), DaylightRegime::AllDaylight);
    /// assert_eq!(bands[1].start(), day(3));
    /// ```
    #[must_use]
    pub fn build(samples: &[RiseSetSample]) -> Vec<DaylightBand> {
        let mut bands: Vec<DaylightBand> = Vec::new();
        for sample in samples {
            let regime = sample.regime();
            match bands.last_mut() {
                Some(band) if band.regime == regime => band.end = sample.date(),
                _ => bands.push(DaylightBand {
                    start: sample.date(),
                    end: sample.date(),
                    regime,
                }),
            }
        }
        bands
    }
}
