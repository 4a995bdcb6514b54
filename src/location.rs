//! Named places with a time zone and a point location.

use core::fmt;

use crate::angle::PointLocation;
use crate::{Error, Result};

/// A named place on the globe.
///
/// Owned by the caller; the aggregation engine only borrows it.
///
/// # Example
/// ```
/// # use daylight_chart::Location;
/// let aberdeen = Location::new("Aberdeen", "GB", "Europe/London", "+5710-00204/".parse().unwrap()).unwrap();
/// assert_eq!(aberdeen.to_string(), "Aberdeen, GB");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    name: String,
    country_code: String,
    timezone: String,
    point: PointLocation,
}

impl Location {
    /// Creates a location.
    ///
    /// The name is trimmed; the country code is upper-cased.
    ///
    /// # Errors
    /// Returns `InvalidLocation` if the name or time zone identifier is blank,
    /// or the country code is not two ASCII letters.
    pub fn new(
        name: &str,
        country_code: &str,
        timezone: &str,
        point: PointLocation,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidLocation {
                reason: "name must not be blank",
            });
        }
        let country_code = country_code.trim();
        if country_code.len() != 2 || !country_code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(Error::InvalidLocation {
                reason: "country code must be two ASCII letters",
            });
        }
        let timezone = timezone.trim();
        if timezone.is_empty() {
            return Err(Error::InvalidLocation {
                reason: "time zone must not be blank",
            });
        }
        Ok(Self {
            name: name.to_owned(),
            country_code: country_code.to_ascii_uppercase(),
            timezone: timezone.to_owned(),
            point,
        })
    }

    /// Gets the place name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the ISO 3166 alpha-2 country code.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Gets the IANA time zone identifier.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Gets the point location.
    #[must_use]
    pub const fn point(&self) -> &PointLocation {
        &self.point
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> PointLocation {
        PointLocation::from_degrees(40.7, -74.0).unwrap()
    }

    #[test]
    fn test_new_normalises_fields() {
        let location = Location::new("  New York ", "us", "America/New_York", point()).unwrap();
        assert_eq!(location.name(), "New York");
        assert_eq!(location.country_code(), "US");
        assert_eq!(location.timezone(), "America/New_York");
        assert_eq!(location.point(), &point());
        assert_eq!(location.to_string(), "New York, US");
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        assert!(Location::new(" ", "US", "America/New_York", point()).is_err());
        assert!(Location::new("New York", "USA", "America/New_York", point()).is_err());
        assert!(Location::new("New York", "U1", "America/New_York", point()).is_err());
        assert!(matches!(
            Location::new("New York", "US", "", point()),
            Err(Error::InvalidLocation { .. })
        ));
    }
}
