//! Mathematical utilities shared by the codec and the solar almanac.

/// Mathematical constants
pub const PI: f64 = core::f64::consts::PI;

/// Arc-seconds (or seconds of time) per unit.
pub const SECONDS_PER_UNIT: f64 = 3600.0;

/// Wraps an angle in radians to the range [-π, π).
pub fn wrap_radians(radians: f64) -> f64 {
    let mut wrapped = (radians + PI) % (2.0 * PI) - PI;
    if wrapped < -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

/// Splits a non-negative value into whole units, minutes and seconds.
///
/// Rounds to the nearest second and carries into minutes and units, so
/// `57.999_999` becomes `(58, 0, 0)` rather than `(57, 59, 60)`.
pub fn sexagesimal_split(value: f64) -> (u32, u32, u32) {
    let total_seconds = (value.abs() * SECONDS_PER_UNIT).round() as u64;
    let units = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    (units as u32, minutes as u32, seconds as u32)
}

/// Combines units, minutes and seconds (any of which may be fractional).
pub fn sexagesimal_combine(units: f64, minutes: f64, seconds: f64) -> f64 {
    units + minutes / 60.0 + seconds / SECONDS_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_wrap_radians() {
        assert!((wrap_radians(0.0)).abs() < EPSILON);
        assert!((wrap_radians(2.0 * PI)).abs() < EPSILON);
        assert!((wrap_radians(1.5 * PI) + 0.5 * PI).abs() < EPSILON);
        assert!((wrap_radians(-1.5 * PI) - 0.5 * PI).abs() < EPSILON);
        assert!((wrap_radians(-7.0 * PI) + PI).abs() < EPSILON);
    }

    #[test]
    fn test_sexagesimal_split() {
        assert_eq!(sexagesimal_split(0.0), (0, 0, 0));
        assert_eq!(sexagesimal_split(48.603_388_9), (48, 36, 12));
        assert_eq!(sexagesimal_split(-48.603_388_9), (48, 36, 12));
        assert_eq!(sexagesimal_split(57.0 + 10.0 / 60.0), (57, 10, 0));
        // Rounding carries all the way into the units field
        assert_eq!(sexagesimal_split(57.999_999_9), (58, 0, 0));
        // Nearest second, not truncation
        assert_eq!(sexagesimal_split(40.203_61), (40, 12, 13));
    }

    #[test]
    fn test_sexagesimal_combine() {
        assert!((sexagesimal_combine(48.0, 36.0, 12.0) - 48.603_333_333).abs() < 1e-8);
        assert!((sexagesimal_combine(40.0, 12.22, 0.0) - 40.203_666_667).abs() < 1e-8);
        assert_eq!(sexagesimal_combine(2.0, 4.0, 0.0), 2.0 + 4.0 / 60.0);
    }
}
