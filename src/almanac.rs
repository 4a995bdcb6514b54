//! Daily sunrise, sunset and twilight events.
//!
//! [`SolarAlmanac`] uses the low-order solar coordinates of Grena, 'Five new
//! algorithms for the computation of sun position from 2010 to 2110', Solar
//! Energy 86 (2012), algorithm no. 3, and solves the hour-angle equation for
//! the requested horizon. Accuracy is about a minute of time away from the
//! polar circles, which is the resolution a chart of the year needs.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::location::Location;
use crate::math::{wrap_radians, PI};
use crate::types::{Horizon, RiseSet};
use crate::tz::{local_noon, FixedOffsets, TimezoneOffsetLookup, ZoneOffsets};
use crate::{Error, Result};

/// 2060-01-01T00:00:00Z, the zero of the algorithm's day count.
const EPOCH_UNIX_SECONDS: i64 = 2_840_140_800;

const SECONDS_PER_DAY: f64 = 86_400.0;

const MINUTES_PER_DAY: f64 = 1_440.0;

/// Approximate ΔT (TT − UT) in seconds, fixed for the algorithm's range.
const DELTA_T_SECONDS: f64 = 69.0;

/// Newton steps for transit and for each of rise and set.
const REFINEMENT_STEPS: usize = 3;

/// Rise/set and twilight events of one day, as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySample {
    /// Sunrise and sunset.
    pub rise_set: RiseSet<DateTime<Utc>>,
    /// Start and end of twilight.
    pub twilight: RiseSet<DateTime<Utc>>,
}

/// Produces the daily events for a location.
///
/// Implementations must be pure so that days can be sampled in any order
/// and on any thread.
pub trait DailySampleSource: Sync {
    /// Computes the events of `date` at `location`.
    ///
    /// # Errors
    /// Returns an error if the events cannot be computed for this date.
    fn sample(&self, location: &Location, date: NaiveDate) -> Result<DailySample>;

    /// Computes the events of `date` as a day on a clock `utc_offset_minutes`
    /// east of UTC.
    ///
    /// [`YearAggregator`](crate::YearAggregator) calls this with the offset it
    /// localises the day with, so a source can keep every event on its civil
    /// date. The default ignores the offset.
    ///
    /// # Errors
    /// Returns an error if the events cannot be computed for this date.
    fn sample_on_clock(
        &self,
        location: &Location,
        date: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<DailySample> {
        let _ = utc_offset_minutes;
        self.sample(location, date)
    }

    /// The horizon that [`DailySample::twilight`] refers to.
    fn twilight_horizon(&self) -> Horizon {
        Horizon::CivilTwilight
    }
}

/// Sunrise, sunset and twilight from an analytic solar model.
///
/// # Example
/// ```
/// # use daylight_chart::{DailySampleSource, Location, SolarAlmanac};
/// use chrono::NaiveDate;
///
/// let tromso = Location::new("Tromsø", "NO", "Europe/Oslo", "+6940+01857/".parse().unwrap()).unwrap();
/// let midsummer = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
///
/// let sample = SolarAlmanac::default().sample(&tromso, midsummer).unwrap();
/// assert!(sample.rise_set.is_polar_day());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAlmanac {
    sunrise: Horizon,
    twilight: Horizon,
}

impl Default for SolarAlmanac {
    fn default() -> Self {
        Self::new(Horizon::CivilTwilight)
    }
}

impl SolarAlmanac {
    /// Creates an almanac reporting standard sunrise/sunset and the given twilight.
    #[must_use]
    pub const fn new(twilight: Horizon) -> Self {
        Self {
            sunrise: Horizon::SunriseSunset,
            twilight,
        }
    }

    /// Computes the events of one day for a single horizon.
    ///
    /// The solar day is the one whose transit lies nearest to 12:00 on `date`
    /// for a clock `utc_offset_minutes` east of UTC. Far from the zone's
    /// meridian (Kiritimati keeps UTC+14 at 157°W) this differs from the day
    /// around local mean noon.
    ///
    /// # Errors
    /// Returns `SampleUnavailable` if the computation does not converge.
    pub fn rise_set(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
        utc_offset_minutes: i32,
        horizon: Horizon,
    ) -> Result<RiseSet<DateTime<Utc>>> {
        let phi = latitude.to_radians();
        let lambda = longitude.to_radians();
        let h0 = horizon.elevation_angle().to_radians();

        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let start = days_since_epoch(midnight) + 0.5 - f64::from(utc_offset_minutes) / MINUTES_PER_DAY;

        let mut transit = start;
        for _ in 0..REFINEMENT_STEPS {
            transit -= SunCoordinates::at(transit, lambda).hour_angle / (2.0 * PI);
        }

        let declination = SunCoordinates::at(transit, lambda).declination;
        let cos_h0 = cos_hour_angle(phi, declination, h0);
        if cos_h0.is_nan() {
            return Err(Error::sample_unavailable(
                date,
                "hour angle is not a number",
            ));
        }
        if cos_h0 < -1.0 {
            return Ok(RiseSet::AllDaylight);
        }
        if cos_h0 > 1.0 {
            return Ok(RiseSet::AllNight);
        }

        let half_arc = cos_h0.acos() / (2.0 * PI);
        let sunrise = refine_event(transit - half_arc, phi, lambda, h0, -1.0);
        let sunset = refine_event(transit + half_arc, phi, lambda, h0, 1.0);

        Ok(RiseSet::Regular {
            sunrise: instant_from_days(sunrise, date)?,
            sunset: instant_from_days(sunset, date)?,
        })
    }
}

impl DailySampleSource for SolarAlmanac {
    /// Anchors the day on the location's zone, or on local mean time when the
    /// zone cannot be resolved.
    fn sample(&self, location: &Location, date: NaiveDate) -> Result<DailySample> {
        let offset = local_noon(&ZoneOffsets, location.timezone(), date)
            .map(|(_, offset)| offset)
            .or_else(|_| {
                FixedOffsets::local_mean_time(location.point().longitude())
                    .offset_at(location.timezone(), date.and_time(NaiveTime::MIN).and_utc())
            })?;
        self.sample_on_clock(location, date, offset)
    }

    fn sample_on_clock(
        &self,
        location: &Location,
        date: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<DailySample> {
        let point = location.point();
        let latitude = point.latitude().degrees();
        let longitude = point.longitude().degrees();
        Ok(DailySample {
            rise_set: self.rise_set(latitude, longitude, date, utc_offset_minutes, self.sunrise)?,
            twilight: self.rise_set(latitude, longitude, date, utc_offset_minutes, self.twilight)?,
        })
    }

    fn twilight_horizon(&self) -> Horizon {
        self.twilight
    }
}

/// Apparent solar coordinates at a moment, in radians.
struct SunCoordinates {
    declination: f64,
    /// Local hour angle, wrapped to [-π, π).
    hour_angle: f64,
}

impl SunCoordinates {
    fn at(t: f64, longitude: f64) -> Self {
        let t_e = t + DELTA_T_SECONDS / SECONDS_PER_DAY;
        let omega_at_e = 0.0172019715 * t_e;

        let lambda = -1.388803
            + 1.720279216e-2 * t_e
            + 3.3366e-2 * (omega_at_e - 0.06172).sin()
            + 3.53e-4 * (2.0 * omega_at_e - 0.1163).sin();
        let epsilon = 4.089567e-1 - 6.19e-9 * t_e;

        let (s_lambda, c_lambda) = lambda.sin_cos();
        let (s_epsilon, c_epsilon) = epsilon.sin_cos();

        let mut alpha = (s_lambda * c_epsilon).atan2(c_lambda);
        if alpha < 0.0 {
            alpha += 2.0 * PI;
        }
        let declination = (s_lambda * s_epsilon).asin();
        let hour_angle = wrap_radians(1.7528311 + 6.300388099 * t + longitude - alpha);

        Self {
            declination,
            hour_angle,
        }
    }
}

/// Cosine of the hour angle at which the sun crosses elevation `h0`.
///
/// Below -1 the sun never descends to `h0`; above +1 it never reaches it.
fn cos_hour_angle(phi: f64, declination: f64, h0: f64) -> f64 {
    (h0.sin() - phi.sin() * declination.sin()) / (phi.cos() * declination.cos())
}

/// Newton steps towards the crossing with hour angle `sign * H0`.
fn refine_event(mut t: f64, phi: f64, lambda: f64, h0: f64, sign: f64) -> f64 {
    for _ in 0..REFINEMENT_STEPS {
        let sun = SunCoordinates::at(t, lambda);
        let target = sign * cos_hour_angle(phi, sun.declination, h0).clamp(-1.0, 1.0).acos();
        t += wrap_radians(target - sun.hour_angle) / (2.0 * PI);
    }
    t
}

fn days_since_epoch(instant: DateTime<Utc>) -> f64 {
    (instant.timestamp() - EPOCH_UNIX_SECONDS) as f64 / SECONDS_PER_DAY
}

fn instant_from_days(t: f64, date: NaiveDate) -> Result<DateTime<Utc>> {
    let seconds = (t * SECONDS_PER_DAY).round();
    if !seconds.is_finite() {
        return Err(Error::sample_unavailable(date, "event time is not finite"));
    }
    DateTime::from_timestamp(EPOCH_UNIX_SECONDS + seconds as i64, 0)
        .ok_or_else(|| Error::sample_unavailable(date, "event time is out of range"))
}
