//! # Daylight Chart
//!
//! Year-long sunrise, sunset and twilight tables for a location, with
//! daylight-saving boundaries and daylight bands ready for charting.
//!
//! This library provides:
//! - **ISO 6709 point locations**: a fixed-width `±DDMMSS±DDDMMSS[±alt]/` codec
//!   with exact sign and padding rules, plus a compact form
//! - **DST detection**: the transition dates of a time zone in a year, from
//!   daily offsets in the IANA database (`chrono-tz`)
//! - **Year aggregation**: one local-time sample per day for sunrise/sunset and
//!   twilight, all-or-nothing, sampled in parallel
//! - **Daylight bands**: runs of normal days, polar day and polar night that
//!   partition the year
//!
//! ## Feature Flags
//!
//! - `parallel` (default): sample the days of a year on the `rayon` pool
//! - `serde`: `Serialize`/`Deserialize` for the public value types
//!
//! ## References
//!
//! - ISO 6709:1983, Standard representation of latitude, longitude and altitude
//!   for geographic point locations.
//! - Grena, R. (2012). Five new algorithms for the computation of sun position from 2010 to 2110.
//!   Solar Energy, 86(5), 1323-1337. DOI: <http://dx.doi.org/10.1016/j.solener.2012.01.024>
//!
//! ## Quick Start
//!
//! ### Point locations
//! ```rust
//! use daylight_chart::{iso6709, PointLocation};
//!
//! let aberdeen: PointLocation = "+5710-00204/".parse().unwrap();
//! assert_eq!(aberdeen.latitude().to_string(), "57° 10' N");
//! assert_eq!(iso6709::format_point_location(&aberdeen), "+571000-0020400/");
//! assert_eq!(iso6709::format_point_location_compact(&aberdeen), "+5710-00204/");
//! ```
//!
//! ### A year of daylight
//! ```rust
//! use daylight_chart::{DaylightRegime, Location, SolarAlmanac, YearAggregator, ZoneOffsets};
//!
//! let location = Location::new("New York", "US", "America/New_York", "+4043-07400/".parse().unwrap()).unwrap();
//! let almanac = SolarAlmanac::default();
//! let year = YearAggregator::new(&almanac, &ZoneOffsets).build(&location, 2024).unwrap();
//!
//! assert_eq!(year.rise_sets().len(), 366);
//! assert_eq!(year.bands().len(), 1);
//! assert_eq!(year.bands()[0].regime(), DaylightRegime::Normal);
//! println!("DST from {:?} to {:?}", year.dst_start(), year.dst_end());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of converted values in tests
)]

// Public API exports
pub use crate::almanac::{DailySample, DailySampleSource, SolarAlmanac};
pub use crate::angle::{Angle, Latitude, Longitude, PointLocation, SexagesimalParts};
pub use crate::bands::{DaylightBand, DaylightBandBuilder};
pub use crate::dst::{DstBoundaryDetector, DstSchedule};
pub use crate::error::{Error, Result};
pub use crate::location::Location;
pub use crate::types::{DaylightRegime, Horizon, RiseSet, RiseSetSample, TwilightSample};
pub use crate::tz::{FixedOffsets, TimeZoneOption, TimezoneOffsetLookup, ZoneOffsets};
pub use crate::year::{RiseSetYear, YearAggregator, YearOptions};

// Coordinate modules
pub mod angle;
pub mod iso6709;
pub mod location;

// Calculation modules
pub mod almanac;
pub mod bands;
pub mod dst;
pub mod tz;
pub mod year;

// Core modules
pub mod error;
pub mod types;

// Output
pub mod report;

// Internal modules
mod math;
