//! Core data types for daylight calculations.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use core::fmt;

use crate::{Error, Result};

/// Solar elevation that marks the start and end of a day's light.
///
/// [`SunriseSunset`](Self::SunriseSunset) drives the rise/set sequence of a
/// year. One of the twilight variants, chosen per
/// [`SolarAlmanac`](crate::SolarAlmanac), drives the twilight sequence and its
/// bands, and is recorded in [`RiseSetYear::twilight_horizon`](crate::RiseSetYear::twilight_horizon).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Horizon {
    /// Upper limb on the refracted horizon; the chart's sunrise and sunset.
    SunriseSunset,
    /// Sun 6° down. The default twilight of a year.
    CivilTwilight,
    /// Sun 12° down.
    NauticalTwilight,
    /// Sun 18° down; the sky is fully dark below it.
    AstronomicalTwilight,
    /// Any other elevation in degrees, built through [`Horizon::custom`].
    Custom(f64),
}

impl Horizon {
    /// Elevation of the sun's centre in degrees; negative below the horizon.
    #[must_use]
    pub const fn elevation_angle(&self) -> f64 {
        match self {
            Self::SunriseSunset => -0.83337, // 34' refraction plus 16' semi-diameter
            Self::CivilTwilight => -6.0,
            Self::NauticalTwilight => -12.0,
            Self::AstronomicalTwilight => -18.0,
            Self::Custom(angle) => *angle,
        }
    }

    /// A twilight line at an arbitrary elevation, for charts that shade
    /// something other than the civil, nautical or astronomical limits.
    ///
    /// # Errors
    /// Returns `InvalidElevationAngle` outside -90 to +90 degrees.
    pub fn custom(elevation_degrees: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&elevation_degrees) {
            return Err(Error::invalid_elevation_angle(elevation_degrees));
        }
        Ok(Self::Custom(elevation_degrees))
    }
}

/// Daylight regime of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DaylightRegime {
    /// The sun rises and sets.
    Normal,
    /// Polar day: the sun stays above the horizon.
    AllDaylight,
    /// Polar night: the sun stays below the horizon.
    AllNight,
}

impl fmt::Display for DaylightRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::AllDaylight => "all daylight",
            Self::AllNight => "all night",
        })
    }
}

/// Rise and set events of one day.
///
/// Polar day and polar night are distinct variants, so a missing sunset is
/// never confused with a missing sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiseSet<T> {
    /// Regular day with distinct rise and set times
    Regular {
        /// Time of sunrise (or start of twilight)
        sunrise: T,
        /// Time of sunset (or end of twilight)
        sunset: T,
    },
    /// Polar day - sun remains above the specified horizon all day
    AllDaylight,
    /// Polar night - sun remains below the specified horizon all day
    AllNight,
}

impl<T> RiseSet<T> {
    /// Checks if this represents a regular day with sunrise and sunset.
    pub const fn is_regular_day(&self) -> bool {
        matches!(self, Self::Regular { .. })
    }

    /// Checks if this represents a polar day (sun never sets).
    pub const fn is_polar_day(&self) -> bool {
        matches!(self, Self::AllDaylight)
    }

    /// Checks if this represents a polar night (sun never rises).
    pub const fn is_polar_night(&self) -> bool {
        matches!(self, Self::AllNight)
    }

    /// Gets sunrise time if this is a regular day.
    pub const fn sunrise(&self) -> Option<&T> {
        if let Self::Regular { sunrise, .. } = self {
            Some(sunrise)
        } else {
            None
        }
    }

    /// Gets sunset time if this is a regular day.
    pub const fn sunset(&self) -> Option<&T> {
        if let Self::Regular { sunset, .. } = self {
            Some(sunset)
        } else {
            None
        }
    }

    /// Classifies the day.
    pub const fn regime(&self) -> DaylightRegime {
        match self {
            Self::Regular { .. } => DaylightRegime::Normal,
            Self::AllDaylight => DaylightRegime::AllDaylight,
            Self::AllNight => DaylightRegime::AllNight,
        }
    }

    /// Converts the event times, leaving polar markers untouched.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> RiseSet<U> {
        match self {
            Self::Regular { sunrise, sunset } => RiseSet::Regular {
                sunrise: f(sunrise),
                sunset: f(sunset),
            },
            Self::AllDaylight => RiseSet::AllDaylight,
            Self::AllNight => RiseSet::AllNight,
        }
    }

    /// Converts the event times with a fallible function.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(T) -> core::result::Result<U, E>,
    ) -> core::result::Result<RiseSet<U>, E> {
        Ok(match self {
            Self::Regular { sunrise, sunset } => RiseSet::Regular {
                sunrise: f(sunrise)?,
                sunset: f(sunset)?,
            },
            Self::AllDaylight => RiseSet::AllDaylight,
            Self::AllNight => RiseSet::AllNight,
        })
    }
}

/// Rise/set (or twilight) events of one calendar day in local civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiseSetSample {
    date: NaiveDate,
    utc_offset_minutes: i32,
    in_daylight_savings: bool,
    events: RiseSet<NaiveDateTime>,
}

impl RiseSetSample {
    /// Creates a sample for `date` whose event times are already local.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        utc_offset_minutes: i32,
        in_daylight_savings: bool,
        events: RiseSet<NaiveDateTime>,
    ) -> Self {
        Self {
            date,
            utc_offset_minutes,
            in_daylight_savings,
            events,
        }
    }

    /// Gets the calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Gets the UTC offset in minutes used to localise this day's events.
    #[must_use]
    pub const fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// Whether the offset for this day includes a daylight-saving shift.
    #[must_use]
    pub const fn is_in_daylight_savings(&self) -> bool {
        self.in_daylight_savings
    }

    /// Gets the rise/set events.
    #[must_use]
    pub const fn events(&self) -> RiseSet<NaiveDateTime> {
        self.events
    }

    /// Gets the local sunrise time, if the sun rises.
    #[must_use]
    pub const fn sunrise(&self) -> Option<NaiveDateTime> {
        match self.events {
            RiseSet::Regular { sunrise, .. } => Some(sunrise),
            _ => None,
        }
    }

    /// Gets the local sunset time, if the sun sets.
    #[must_use]
    pub const fn sunset(&self) -> Option<NaiveDateTime> {
        match self.events {
            RiseSet::Regular { sunset, .. } => Some(sunset),
            _ => None,
        }
    }

    /// Classifies the day.
    #[must_use]
    pub const fn regime(&self) -> DaylightRegime {
        self.events.regime()
    }

    /// Returns this day expressed in standard time, without any daylight-saving shift.
    #[must_use]
    pub fn without_daylight_savings(&self, standard_offset_minutes: i32) -> Self {
        if !self.in_daylight_savings {
            return *self;
        }
        let shift = Duration::minutes(i64::from(
            standard_offset_minutes - self.utc_offset_minutes,
        ));
        Self {
            date: self.date,
            utc_offset_minutes: standard_offset_minutes,
            in_daylight_savings: false,
            events: self.events.map(|time| time + shift),
        }
    }
}

/// Twilight begin and end of one day; same shape as a rise/set sample.
pub type TwilightSample = RiseSetSample;

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_horizon_elevation_angles() {
        assert_eq!(Horizon::SunriseSunset.elevation_angle(), -0.83337);
        assert_eq!(Horizon::CivilTwilight.elevation_angle(), -6.0);
        assert_eq!(Horizon::NauticalTwilight.elevation_angle(), -12.0);
        assert_eq!(Horizon::AstronomicalTwilight.elevation_angle(), -18.0);

        let custom = Horizon::custom(-3.0).unwrap();
        assert_eq!(custom.elevation_angle(), -3.0);

        assert!(Horizon::custom(-95.0).is_err());
        assert!(Horizon::custom(95.0).is_err());
    }

    #[test]
    fn test_rise_set_regular_day() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 21).unwrap();
        let result = RiseSet::Regular {
            sunrise: at(date, 5, 30),
            sunset: at(date, 18, 30),
        };

        assert!(result.is_regular_day());
        assert!(!result.is_polar_day());
        assert!(!result.is_polar_night());
        assert_eq!(result.regime(), DaylightRegime::Normal);
        assert_eq!(result.sunrise(), Some(&at(date, 5, 30)));
        assert_eq!(result.sunset(), Some(&at(date, 18, 30)));
    }

    #[test]
    fn test_rise_set_polar_markers_are_distinct() {
        let day: RiseSet<NaiveDateTime> = RiseSet::AllDaylight;
        let night: RiseSet<NaiveDateTime> = RiseSet::AllNight;

        assert_ne!(day, night);
        assert!(day.is_polar_day());
        assert!(night.is_polar_night());
        assert_eq!(day.regime(), DaylightRegime::AllDaylight);
        assert_eq!(night.regime(), DaylightRegime::AllNight);
        assert_eq!(day.sunrise(), None);
        assert_eq!(night.sunset(), None);
    }

    #[test]
    fn test_map_leaves_polar_markers_alone() {
        let night: RiseSet<i32> = RiseSet::AllNight;
        assert_eq!(night.map(|v| v + 1), RiseSet::AllNight);

        let regular = RiseSet::Regular {
            sunrise: 1,
            sunset: 2,
        };
        assert_eq!(
            regular.map(|v| v * 10),
            RiseSet::Regular {
                sunrise: 10,
                sunset: 20
            }
        );
    }

    #[test]
    fn test_try_map_stops_at_first_error() {
        let regular = RiseSet::Regular {
            sunrise: 5_u8,
            sunset: 250,
        };
        assert_eq!(regular.try_map(|v| v.checked_add(3).ok_or(v)), Err(250));
        assert_eq!(
            regular.try_map(|v| v.checked_sub(5).ok_or(v)),
            Ok(RiseSet::Regular {
                sunrise: 0,
                sunset: 245
            })
        );
        let day: RiseSet<u8> = RiseSet::AllDaylight;
        assert_eq!(day.try_map(|v| Err::<u8, u8>(v)), Ok(RiseSet::AllDaylight));
    }

    #[test]
    fn test_without_daylight_savings_shifts_by_offset_delta() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let summer = RiseSetSample::new(
            date,
            120,
            true,
            RiseSet::Regular {
                sunrise: at(date, 5, 0),
                sunset: at(date, 21, 30),
            },
        );

        let standard = summer.without_daylight_savings(60);
        assert_eq!(standard.sunrise(), Some(at(date, 4, 0)));
        assert_eq!(standard.sunset(), Some(at(date, 20, 30)));
        assert_eq!(standard.utc_offset_minutes(), 60);
        assert!(!standard.is_in_daylight_savings());

        let polar = RiseSetSample::new(date, 120, true, RiseSet::AllDaylight);
        assert_eq!(polar.without_daylight_savings(60).events(), RiseSet::AllDaylight);

        let winter = RiseSetSample::new(date, 60, false, RiseSet::AllNight);
        assert_eq!(winter.without_daylight_savings(60), winter);
    }
}
