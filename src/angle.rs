//! Angles, latitudes, longitudes and point locations.
//!
//! An [`Angle`] stores signed decimal degrees and exposes a sexagesimal view
//! (degrees, minutes, seconds) at arc-second resolution with the sign carried
//! once, never on the individual components.

use core::fmt;
use core::str::FromStr;

use crate::error::{check_latitude, check_longitude};
use crate::math::{sexagesimal_combine, sexagesimal_split, SECONDS_PER_UNIT};
use crate::{iso6709, Error, Result};

/// Arc-seconds in a half circle; the magnitude limit for longitudes.
const MAX_LONGITUDE_ARC_SECONDS: i64 = 180 * 3600;

/// Arc-seconds in a quarter circle; the magnitude limit for latitudes.
const MAX_LATITUDE_ARC_SECONDS: i64 = 90 * 3600;

/// Unsigned sexagesimal components of an angle.
///
/// Always satisfies `minutes < 60` and `seconds < 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SexagesimalParts {
    /// Whole degrees.
    pub degrees: u32,
    /// Whole minutes of arc (0 to 59).
    pub minutes: u32,
    /// Whole seconds of arc (0 to 59), rounded.
    pub seconds: u32,
}

/// A signed angle in decimal degrees.
///
/// # Example
/// ```
/// # use daylight_chart::Angle;
/// let angle = Angle::from_degrees(-48.603_388_9);
/// let parts = angle.parts();
/// assert!(angle.is_negative());
/// assert_eq!((parts.degrees, parts.minutes, parts.seconds), (48, 36, 12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// Creates an angle from decimal degrees.
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    /// Creates an angle from a sign and sexagesimal components.
    ///
    /// Minutes and seconds may carry a fraction but must lie in `[0, 60)`.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfRange` for minutes or seconds outside `[0, 60)`.
    pub fn from_sexagesimal(negative: bool, degrees: u32, minutes: f64, seconds: f64) -> Result<Self> {
        for component in [minutes, seconds] {
            if !(0.0..60.0).contains(&component) {
                return Err(Error::out_of_range(component, 60.0));
            }
        }
        let magnitude = sexagesimal_combine(f64::from(degrees), minutes, seconds);
        Ok(Self::from_degrees(if negative { -magnitude } else { magnitude }))
    }

    /// Gets the value in decimal degrees.
    #[must_use]
    pub const fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Gets the unsigned degree, minute and second components.
    #[must_use]
    pub fn parts(&self) -> SexagesimalParts {
        let (degrees, minutes, seconds) = sexagesimal_split(self.degrees);
        SexagesimalParts {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Whether the angle is negative at arc-second resolution.
    ///
    /// Values that round to zero are never negative, so `-0.0` formats as `+`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.to_arc_seconds() < 0
    }

    /// Gets the signed value rounded to whole arc-seconds.
    #[must_use]
    pub fn to_arc_seconds(&self) -> i64 {
        (self.degrees * SECONDS_PER_UNIT).round() as i64
    }

    /// Formats the magnitude as `d° m'` with `s"` appended when non-zero.
    fn fmt_magnitude(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        write!(f, "{}° {}'", parts.degrees, parts.minutes)?;
        if parts.seconds > 0 {
            write!(f, " {}\"", parts.seconds)?;
        }
        Ok(())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        self.fmt_magnitude(f)
    }
}

/// A latitude, constrained to [-90°, +90°].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Latitude(Angle);

impl Latitude {
    /// Creates a latitude from decimal degrees.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfRange` if the value is outside -90° to +90°.
    pub fn new(degrees: f64) -> Result<Self> {
        Self::from_angle(Angle::from_degrees(degrees))
    }

    /// Creates a latitude from an angle.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfRange` if the angle is outside -90° to +90°.
    pub fn from_angle(angle: Angle) -> Result<Self> {
        check_latitude(angle.degrees())?;
        if angle.to_arc_seconds().abs() > MAX_LATITUDE_ARC_SECONDS {
            return Err(Error::out_of_range(angle.degrees(), 90.0));
        }
        Ok(Self(angle))
    }

    /// Gets the underlying angle.
    #[must_use]
    pub const fn angle(&self) -> Angle {
        self.0
    }

    /// Gets the value in decimal degrees.
    #[must_use]
    pub const fn degrees(&self) -> f64 {
        self.0.degrees()
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_magnitude(f)?;
        f.write_str(if self.0.is_negative() { " S" } else { " N" })
    }
}

impl FromStr for Latitude {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        iso6709::parse_latitude(s)
    }
}

impl TryFrom<f64> for Latitude {
    type Error = Error;

    fn try_from(degrees: f64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<Latitude> for f64 {
    fn from(latitude: Latitude) -> Self {
        latitude.degrees()
    }
}

/// A longitude, constrained to [-180°, +180°].
///
/// The 180th meridian is always stored as -180° (west), following ISO 6709.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Longitude(Angle);

impl Longitude {
    /// Creates a longitude from decimal degrees.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfRange` if the value is outside -180° to +180°.
    pub fn new(degrees: f64) -> Result<Self> {
        Self::from_angle(Angle::from_degrees(degrees))
    }

    /// Creates a longitude from an angle.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfRange` if the angle is outside -180° to +180°.
    pub fn from_angle(angle: Angle) -> Result<Self> {
        check_longitude(angle.degrees())?;
        let arc_seconds = angle.to_arc_seconds().abs();
        if arc_seconds > MAX_LONGITUDE_ARC_SECONDS {
            return Err(Error::out_of_range(angle.degrees(), 180.0));
        }
        if arc_seconds == MAX_LONGITUDE_ARC_SECONDS {
            return Ok(Self(Angle::from_degrees(-180.0)));
        }
        Ok(Self(angle))
    }

    /// Gets the underlying angle.
    #[must_use]
    pub const fn angle(&self) -> Angle {
        self.0
    }

    /// Gets the value in decimal degrees.
    #[must_use]
    pub const fn degrees(&self) -> f64 {
        self.0.degrees()
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_magnitude(f)?;
        f.write_str(if self.0.is_negative() { " W" } else { " E" })
    }
}

impl FromStr for Longitude {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        iso6709::parse_longitude(s)
    }
}

impl TryFrom<f64> for Longitude {
    type Error = Error;

    fn try_from(degrees: f64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<Longitude> for f64 {
    fn from(longitude: Longitude) -> Self {
        longitude.degrees()
    }
}

/// A point on the globe with an optional altitude in meters.
///
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointLocation {
    latitude: Latitude,
    longitude: Longitude,
    altitude: Option<i32>,
}

impl PointLocation {
    /// Creates a point location without altitude.
    #[must_use]
    pub const fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Creates a point location from decimal degrees.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfRange` if either coordinate is outside its domain.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self::new(Latitude::new(latitude)?, Longitude::new(longitude)?))
    }

    /// Returns a copy of this point with the given altitude in meters.
    #[must_use]
    pub const fn with_altitude(self, altitude: i32) -> Self {
        Self {
            altitude: Some(altitude),
            ..self
        }
    }

    /// Gets the latitude.
    #[must_use]
    pub const fn latitude(&self) -> Latitude {
        self.latitude
    }

    /// Gets the longitude.
    #[must_use]
    pub const fn longitude(&self) -> Longitude {
        self.longitude
    }

    /// Gets the altitude in meters, if one was given.
    #[must_use]
    pub const fn altitude(&self) -> Option<i32> {
        self.altitude
    }
}

impl fmt::Display for PointLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, ", {altitude} m")?;
        }
        Ok(())
    }
}

impl FromStr for PointLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        iso6709::parse_point_location(s)
    }
}
