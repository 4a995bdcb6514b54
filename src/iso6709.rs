//! ISO 6709 fixed-width point location text.
//!
//! Latitude fields are `±DD[MM[SS]][.f]`, longitude fields `±DDD[MM[SS]][.f]`,
//! where the optional fraction belongs to the last component present. A full
//! point location is `latitude longitude [±altitude] /`, e.g. `+5710-00204/`
//! or `+401213-0750015+120/`.
//!
//! Formatting always emits the explicit sign and the full seconds precision:
//! 7 characters for a latitude, 8 for a longitude.
//!
//! # Example
//! ```
//! use daylight_chart::iso6709;
//!
//! let point = iso6709::parse_point_location("+5710-00204/").unwrap();
//! assert_eq!(iso6709::format_point_location(&point), "+571000-0020400/");
//! assert_eq!(iso6709::format_point_location_compact(&point), "+5710-00204/");
//! ```

use crate::angle::{Angle, Latitude, Longitude, PointLocation};
use crate::{Error, Result};

/// Width of a formatted latitude field, sign included.
pub const LATITUDE_FIELD_WIDTH: usize = 7;

/// Width of a formatted longitude field, sign included.
pub const LONGITUDE_FIELD_WIDTH: usize = 8;

/// Terminator of a point location record.
const TERMINATOR: char = '/';

/// Which coordinate a field encodes; fixes the number of degree digits.
#[derive(Debug, Clone, Copy)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    const fn degree_digits(self) -> usize {
        match self {
            Self::Latitude => 2,
            Self::Longitude => 3,
        }
    }
}

/// How many sexagesimal components to emit.
#[derive(Debug, Clone, Copy)]
enum Precision {
    Seconds,
    Shortest,
}

/// A signed run of digits with an optional fraction, as lexed from the input.
#[derive(Debug)]
struct Field<'a> {
    negative: bool,
    signed: bool,
    integer: &'a str,
    fraction: Option<&'a str>,
}

/// Parses a latitude field such as `+4036`, `-483612.20` or `5710`.
///
/// An unsigned field is taken as positive.
///
/// # Errors
/// Returns `InvalidCoordinateFormat` for malformed text and
/// `CoordinateOutOfRange` for values beyond ±90° or components of 60 or more.
pub fn parse_latitude(text: &str) -> Result<Latitude> {
    let input = text.trim();
    let (field, rest) = lex_field(input, input)?;
    if !rest.is_empty() {
        return Err(Error::invalid_format(input, "trailing characters after latitude"));
    }
    Latitude::from_angle(field_to_angle(input, &field, Axis::Latitude)?)
}

/// Parses a longitude field such as `-00204`, `+0483612.20` or `07500`.
///
/// An unsigned field is taken as positive.
///
/// # Errors
/// Returns `InvalidCoordinateFormat` for malformed text and
/// `CoordinateOutOfRange` for values beyond ±180° or components of 60 or more.
pub fn parse_longitude(text: &str) -> Result<Longitude> {
    let input = text.trim();
    let (field, rest) = lex_field(input, input)?;
    if !rest.is_empty() {
        return Err(Error::invalid_format(input, "trailing characters after longitude"));
    }
    Longitude::from_angle(field_to_angle(input, &field, Axis::Longitude)?)
}

/// Parses a full point location record terminated by `/`.
///
/// The longitude must carry an explicit sign, since the sign is what
/// separates it from the latitude digits. An altitude in meters may follow
/// the longitude; a fractional altitude is rounded to the nearest meter.
///
/// # Errors
/// Returns `InvalidCoordinateFormat` for malformed text and
/// `CoordinateOutOfRange` for values outside the coordinate domains.
pub fn parse_point_location(text: &str) -> Result<PointLocation> {
    let input = text.trim();

    let (latitude_field, rest) = lex_field(input, input)?;
    let latitude = Latitude::from_angle(field_to_angle(input, &latitude_field, Axis::Latitude)?)?;

    let (longitude_field, rest) = lex_field(input, rest)?;
    if !longitude_field.signed {
        return Err(Error::invalid_format(input, "longitude must be signed"));
    }
    let longitude =
        Longitude::from_angle(field_to_angle(input, &longitude_field, Axis::Longitude)?)?;

    let mut point = PointLocation::new(latitude, longitude);
    let mut rest = rest;
    if rest.starts_with(['+', '-']) {
        let (altitude_field, after) = lex_field(input, rest)?;
        point = point.with_altitude(field_to_altitude(input, &altitude_field)?);
        rest = after;
    }

    match rest.strip_prefix(TERMINATOR) {
        Some("") => Ok(point),
        Some(_) => Err(Error::invalid_format(input, "trailing characters after terminator")),
        None if rest.is_empty() => Err(Error::invalid_format(input, "missing '/' terminator")),
        None => Err(Error::invalid_format(input, "unexpected character in point location")),
    }
}

/// Formats a latitude as a 7-character `±DDMMSS` field.
#[must_use]
pub fn format_latitude(latitude: &Latitude) -> String {
    format_field(latitude.angle(), Axis::Latitude, Precision::Seconds)
}

/// Formats a longitude as an 8-character `±DDDMMSS` field.
#[must_use]
pub fn format_longitude(longitude: &Longitude) -> String {
    format_field(longitude.angle(), Axis::Longitude, Precision::Seconds)
}

/// Formats a point location in canonical fixed-width form, e.g. `+571000-0020400/`.
#[must_use]
pub fn format_point_location(point: &PointLocation) -> String {
    format_point(point, Precision::Seconds)
}

/// Formats a point location using the shortest lossless precision per field.
///
/// Seconds are dropped when zero, and minutes too when both are zero, so
/// `+5710-00204/` formats back to itself.
#[must_use]
pub fn format_point_location_compact(point: &PointLocation) -> String {
    format_point(point, Precision::Shortest)
}

fn format_point(point: &PointLocation, precision: Precision) -> String {
    let mut text = format_field(point.latitude().angle(), Axis::Latitude, precision);
    text.push_str(&format_field(
        point.longitude().angle(),
        Axis::Longitude,
        precision,
    ));
    if let Some(altitude) = point.altitude() {
        text.push_str(&format!("{altitude:+}"));
    }
    text.push(TERMINATOR);
    text
}

fn format_field(angle: Angle, axis: Axis, precision: Precision) -> String {
    let sign = if angle.is_negative() { '-' } else { '+' };
    let parts = angle.parts();
    let digits = axis.degree_digits();
    let (value, width) = match precision {
        Precision::Shortest if parts.minutes == 0 && parts.seconds == 0 => (parts.degrees, digits),
        Precision::Shortest if parts.seconds == 0 => {
            (parts.degrees * 100 + parts.minutes, digits + 2)
        }
        Precision::Seconds | Precision::Shortest => (
            parts.degrees * 10_000 + parts.minutes * 100 + parts.seconds,
            digits + 4,
        ),
    };
    format!("{sign}{value:0width$}")
}

/// Lexes `[±]digits[.digits]` from the front of `text`, returning the rest.
fn lex_field<'a>(input: &str, text: &'a str) -> Result<(Field<'a>, &'a str)> {
    let (negative, signed, body) = match text.as_bytes().first() {
        Some(b'+') => (false, true, &text[1..]),
        Some(b'-') => (true, true, &text[1..]),
        _ => (false, false, text),
    };

    let integer_len = body.bytes().take_while(u8::is_ascii_digit).count();
    if integer_len == 0 {
        return Err(Error::invalid_format(input, "expected digits"));
    }
    let (integer, mut rest) = body.split_at(integer_len);

    let mut fraction = None;
    if let Some(after_point) = rest.strip_prefix('.') {
        let fraction_len = after_point.bytes().take_while(u8::is_ascii_digit).count();
        if fraction_len == 0 {
            return Err(Error::invalid_format(input, "expected digits after decimal point"));
        }
        fraction = Some(&after_point[..fraction_len]);
        rest = &after_point[fraction_len..];
    }

    Ok((
        Field {
            negative,
            signed,
            integer,
            fraction,
        },
        rest,
    ))
}

/// Splits the digit run into degree, minute and second groups.
fn field_to_angle(input: &str, field: &Field<'_>, axis: Axis) -> Result<Angle> {
    let digits = axis.degree_digits();
    let groups = match field.integer.len() {
        n if n == digits => 1,
        n if n == digits + 2 => 2,
        n if n == digits + 4 => 3,
        _ => return Err(Error::invalid_format(input, "bad degree/minute/second digit grouping")),
    };

    let integer = field.integer;
    let degrees = parse_digits(input, &integer[..digits])?;
    let mut components = [f64::from(degrees), 0.0, 0.0];
    for group in 1..groups {
        let start = digits + (group - 1) * 2;
        components[group] = f64::from(parse_digits(input, &integer[start..start + 2])?);
    }
    if let Some(fraction) = field.fraction {
        components[groups - 1] += parse_fraction(input, fraction)?;
    }

    let magnitude = components[0];
    // The fraction of a degree-only field can be handed over as minutes
    let (whole_degrees, minutes, seconds) = if groups == 1 {
        let whole = magnitude.trunc();
        (whole, (magnitude - whole) * 60.0, 0.0)
    } else {
        (magnitude, components[1], components[2])
    };

    Angle::from_sexagesimal(field.negative, whole_degrees as u32, minutes, seconds)
}

fn field_to_altitude(input: &str, field: &Field<'_>) -> Result<i32> {
    let magnitude: f64 = match field.fraction {
        Some(fraction) => format!("{}.{}", field.integer, fraction).parse(),
        None => field.integer.parse(),
    }
    .map_err(|_| Error::invalid_format(input, "malformed altitude"))?;
    let altitude = if field.negative { -magnitude } else { magnitude }.round();
    if altitude.abs() > f64::from(i32::MAX) {
        return Err(Error::out_of_range(altitude, f64::from(i32::MAX)));
    }
    Ok(altitude as i32)
}

fn parse_digits(input: &str, digits: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| Error::invalid_format(input, "malformed digit group"))
}

fn parse_fraction(input: &str, fraction: &str) -> Result<f64> {
    format!("0.{fraction}")
        .parse()
        .map_err(|_| Error::invalid_format(input, "malformed fraction"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::SexagesimalParts;

    fn parts(degrees: u32, minutes: u32, seconds: u32) -> SexagesimalParts {
        SexagesimalParts {
            degrees,
            minutes,
            seconds,
        }
    }

    #[test]
    fn test_parse_latitude_groupings() {
        let latitude = parse_latitude("+483612.20").unwrap();
        assert_eq!(latitude.angle().parts(), parts(48, 36, 12));
        assert!(!latitude.angle().is_negative());

        let latitude = parse_latitude("-483612.20").unwrap();
        assert_eq!(latitude.angle().parts(), parts(48, 36, 12));
        assert!(latitude.angle().is_negative());

        let latitude = parse_latitude("-003612.20").unwrap();
        assert_eq!(latitude.angle().parts(), parts(0, 36, 12));
        assert!(latitude.angle().is_negative());

        let latitude = parse_latitude("5710").unwrap();
        assert_eq!(latitude.angle().parts(), parts(57, 10, 0));
        assert!(!latitude.angle().is_negative());
    }

    #[test]
    fn test_parse_longitude_groupings() {
        let longitude = parse_longitude("+0483612.20").unwrap();
        assert_eq!(longitude.angle().parts(), parts(48, 36, 12));

        let longitude = parse_longitude("-0003612.20").unwrap();
        assert_eq!(longitude.angle().parts(), parts(0, 36, 12));
        assert!(longitude.angle().is_negative());

        let longitude = parse_longitude("-075").unwrap();
        assert_eq!(longitude.degrees(), -75.0);
    }

    #[test]
    fn test_parse_point_location_degrees_only() {
        let point = parse_point_location("+40-075/").unwrap();
        assert_eq!(point.latitude().angle().parts(), parts(40, 0, 0));
        assert_eq!(point.longitude().angle().parts(), parts(75, 0, 0));
        assert!(point.longitude().angle().is_negative());
        assert_eq!(point.altitude(), None);
        assert_eq!(format_point_location(&point), "+400000-0750000/");
    }

    #[test]
    fn test_parse_point_location_decimal_degrees() {
        let point = parse_point_location("+40.20361-075.00417/").unwrap();
        assert_eq!(point.latitude().angle().parts(), parts(40, 12, 13));
        assert_eq!(point.longitude().angle().parts(), parts(75, 0, 15));
        assert_eq!(format_point_location(&point), "+401213-0750015/");
    }

    #[test]
    fn test_parse_point_location_decimal_minutes() {
        let point = parse_point_location("+4012.22-07500.25/").unwrap();
        assert_eq!(point.latitude().angle().parts(), parts(40, 12, 13));
        assert_eq!(point.longitude().angle().parts(), parts(75, 0, 15));
        assert_eq!(format_point_location(&point), "+401213-0750015/");
    }

    #[test]
    fn test_parse_point_location_with_altitude() {
        let point = parse_point_location("+401213-0750015+120/").unwrap();
        assert_eq!(point.altitude(), Some(120));
        assert_eq!(format_point_location(&point), "+401213-0750015+120/");

        let point = parse_point_location("+401213-0750015-15.4/").unwrap();
        assert_eq!(point.altitude(), Some(-15));
        assert_eq!(format_point_location(&point), "+401213-0750015-15/");
    }

    #[test]
    fn test_aberdeen_example() {
        let point = parse_point_location("+5710-00204/").unwrap();
        assert_eq!(point.latitude().angle().parts(), parts(57, 10, 0));
        assert!(!point.latitude().angle().is_negative());
        assert_eq!(point.longitude().angle().parts(), parts(2, 4, 0));
        assert!(point.longitude().angle().is_negative());

        assert_eq!(format_point_location_compact(&point), "+5710-00204/");
        assert_eq!(format_point_location(&point), "+571000-0020400/");
    }

    #[test]
    fn test_format_fixed_width() {
        let latitude = Latitude::new(0.0).unwrap();
        assert_eq!(format_latitude(&latitude), "+000000");

        let latitude = Latitude::new(-90.0).unwrap();
        assert_eq!(format_latitude(&latitude), "-900000");

        let longitude = Longitude::new(180.0).unwrap();
        assert_eq!(format_longitude(&longitude), "-1800000");

        let longitude = Longitude::new(-0.5).unwrap();
        assert_eq!(format_longitude(&longitude), "-0003000");
        assert_eq!(format_longitude(&longitude).len(), LONGITUDE_FIELD_WIDTH);
    }

    #[test]
    fn test_malformed_input() {
        for text in [
            "+5-00204/",
            "+57100-00204/",
            "+5710-0204/",
            "+5710-00204",
            "+5710-00204/x",
            "+5710 -00204/",
            "+5710.-00204/",
            "+5710+00204x/",
            "",
            "+",
            "+5710/",
        ] {
            assert!(
                matches!(
                    parse_point_location(text),
                    Err(Error::InvalidCoordinateFormat { .. })
                ),
                "expected format error for {text:?}"
            );
        }
    }

    #[test]
    fn test_unsigned_longitude_in_point_is_rejected() {
        assert!(matches!(
            parse_point_location("+571000204/"),
            Err(Error::InvalidCoordinateFormat { .. })
        ));
    }

    #[test]
    fn test_out_of_range_input() {
        for text in ["+9100-00000/", "+4060-00000/", "+401260-00000/", "+40-18100/"] {
            assert!(
                matches!(
                    parse_point_location(text),
                    Err(Error::CoordinateOutOfRange { .. })
                ),
                "expected range error for {text:?}"
            );
        }
        assert!(parse_latitude("+900001").is_err());
        assert!(parse_longitude("+1800000").is_ok());
    }
}
