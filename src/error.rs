//! Error types for the daylight chart library.

use chrono::NaiveDate;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while parsing locations or building a year of daylight data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed ISO 6709 text (bad sign, digit grouping or terminator).
    #[error("invalid coordinate format {input:?}: {reason}")]
    InvalidCoordinateFormat {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A coordinate component exceeds its domain.
    #[error("coordinate value {value} is out of range (limit {limit})")]
    CoordinateOutOfRange {
        /// The offending value (degrees, minutes or seconds).
        value: f64,
        /// The limit that was exceeded.
        limit: f64,
    },
    /// The daily sample source could not produce events for a date.
    #[error("no sunrise/sunset sample available for {date}: {reason}")]
    SampleUnavailable {
        /// The calendar date that failed.
        date: NaiveDate,
        /// Description of the underlying failure.
        reason: String,
    },
    /// More UTC-offset transitions than a regular daylight-saving schedule.
    #[error("ambiguous daylight saving schedule for {timezone} in {year}: {transitions} offset changes")]
    AmbiguousDstSchedule {
        /// Time zone identifier.
        timezone: String,
        /// Calendar year that was scanned.
        year: i32,
        /// Number of offset changes found.
        transitions: usize,
    },
    /// The offset lookup does not know the time zone identifier.
    #[error("unknown time zone {timezone:?}")]
    UnknownTimezone {
        /// The identifier that could not be resolved.
        timezone: String,
    },
    /// Invalid elevation angle for a custom horizon.
    #[error("invalid elevation angle {value}° (must be between -90° and +90°)")]
    InvalidElevationAngle {
        /// The invalid elevation angle value provided.
        value: f64,
    },
    /// The year cannot be represented on the calendar.
    #[error("invalid year {year}")]
    InvalidYear {
        /// The year requested.
        year: i32,
    },
    /// A location was constructed with missing fields.
    #[error("invalid location: {reason}")]
    InvalidLocation {
        /// Which field was rejected.
        reason: &'static str,
    },
}

impl Error {
    /// Creates an invalid coordinate format error.
    #[must_use]
    pub fn invalid_format(input: &str, reason: &'static str) -> Self {
        Self::InvalidCoordinateFormat {
            input: input.to_owned(),
            reason,
        }
    }

    /// Creates a coordinate out of range error.
    #[must_use]
    pub const fn out_of_range(value: f64, limit: f64) -> Self {
        Self::CoordinateOutOfRange { value, limit }
    }

    /// Creates a sample unavailable error.
    #[must_use]
    pub fn sample_unavailable(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self::SampleUnavailable {
            date,
            reason: reason.into(),
        }
    }

    /// Creates an unknown time zone error.
    #[must_use]
    pub fn unknown_timezone(timezone: &str) -> Self {
        Self::UnknownTimezone {
            timezone: timezone.to_owned(),
        }
    }

    /// Creates an invalid elevation angle error.
    #[must_use]
    pub const fn invalid_elevation_angle(value: f64) -> Self {
        Self::InvalidElevationAngle { value }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `CoordinateOutOfRange` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::out_of_range(latitude, 90.0));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `CoordinateOutOfRange` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::out_of_range(longitude, 180.0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_validation() {
        assert!(check_latitude(0.0).is_ok());
        assert!(check_latitude(90.0).is_ok());
        assert!(check_latitude(-90.0).is_ok());
        assert!(check_latitude(45.5).is_ok());

        assert!(check_latitude(91.0).is_err());
        assert!(check_latitude(-91.0).is_err());
        assert!(check_latitude(f64::NAN).is_err());
        assert!(check_latitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_longitude_validation() {
        assert!(check_longitude(0.0).is_ok());
        assert!(check_longitude(180.0).is_ok());
        assert!(check_longitude(-180.0).is_ok());
        assert!(check_longitude(122.5).is_ok());

        assert!(check_longitude(181.0).is_err());
        assert!(check_longitude(-181.0).is_err());
        assert!(check_longitude(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_format("+57x0", "non-digit in degree field");
        assert_eq!(
            err.to_string(),
            "invalid coordinate format \"+57x0\": non-digit in degree field"
        );

        let err = Error::out_of_range(95.0, 90.0);
        assert_eq!(
            err.to_string(),
            "coordinate value 95 is out of range (limit 90)"
        );

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = Error::sample_unavailable(date, "unmodeled location");
        assert_eq!(
            err.to_string(),
            "no sunrise/sunset sample available for 2024-03-01: unmodeled location"
        );

        let err = Error::unknown_timezone("Mars/Olympus_Mons");
        assert_eq!(err.to_string(), "unknown time zone \"Mars/Olympus_Mons\"");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}
