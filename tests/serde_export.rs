//! JSON export of computed years and value types.

use daylight_chart::{
    DaylightRegime, Horizon, Latitude, Location, PointLocation, SolarAlmanac, YearAggregator,
    ZoneOffsets,
};

#[test]
fn point_location_serialises_as_degrees() {
    let point: PointLocation = "+5710-00204+65/".parse().unwrap();
    let json = serde_json::to_value(point).unwrap();

    assert!((json["latitude"].as_f64().unwrap() - 57.166_666_7).abs() < 1e-6);
    assert!((json["longitude"].as_f64().unwrap() + 2.066_666_7).abs() < 1e-6);
    assert_eq!(json["altitude"], 65);

    let back: PointLocation = serde_json::from_value(json).unwrap();
    assert_eq!(back, point);
}

#[test]
fn out_of_range_latitude_is_rejected() {
    assert!(serde_json::from_str::<Latitude>("91.0").is_err());
    assert!(serde_json::from_str::<Latitude>("-45.5").is_ok());
}

#[test]
fn year_exports_samples_bands_and_dst() {
    let location = Location::new("Aberdeen", "GB", "Europe/London", "+5710-00204/".parse().unwrap()).unwrap();
    let almanac = SolarAlmanac::new(Horizon::NauticalTwilight);
    let year = YearAggregator::new(&almanac, &ZoneOffsets).build(&location, 2024).unwrap();

    let json = serde_json::to_value(&year).unwrap();
    assert_eq!(json["year"], 2024);
    assert_eq!(json["location"]["name"], "Aberdeen");
    assert_eq!(json["twilight_horizon"], "NauticalTwilight");
    assert_eq!(json["rise_sets"].as_array().unwrap().len(), 366);
    assert_eq!(json["twilights"].as_array().unwrap().len(), 366);
    assert_eq!(json["dst"]["uses_dst"], true);
    assert_eq!(json["dst"]["start"], "2024-03-31");
    assert_eq!(json["dst"]["end"], "2024-10-27");
    assert_eq!(json["bands"][0]["start"], "2024-01-01");

    let regime: DaylightRegime = serde_json::from_value(json["bands"][0]["regime"].clone()).unwrap();
    assert_eq!(regime, DaylightRegime::Normal);

    // Nautical twilight never ends around midsummer at 57°N
    assert_eq!(
        json["twilights"][172]["events"],
        serde_json::Value::String("AllDaylight".to_owned())
    );
}
