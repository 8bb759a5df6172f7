//! Gazetteer record parsing from tab-delimited GeoNames lines
//!
//! This module turns one raw `cities500.txt` line into a typed [`GeoRecord`].
//! Parsing is a pure function from line to record-or-failure: a short line or
//! an unparsable numeric field fails the whole record, never producing a
//! partially populated one. The pipeline driver counts and skips failures.

use crate::app::models::GeoRecord;
use crate::constants::{GAZETTEER_FIELD_COUNT, gazetteer_fields as f};
use crate::{Error, Result};

/// Parse one tab-separated gazetteer line into a [`GeoRecord`].
///
/// `line_number` is only used for diagnostics in the returned error.
///
/// Field handling:
/// - exactly 19 positional fields are required; fewer is a failure
/// - an empty population field defaults to 0, negative populations fail
/// - an empty or unparsable elevation field becomes `None` (unknown)
/// - an unparsable coordinate fails the record
pub fn parse_line(line: &str, line_number: usize) -> Result<GeoRecord> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();

    if fields.len() < GAZETTEER_FIELD_COUNT {
        return Err(Error::malformed_record(
            line_number,
            format!(
                "expected {} fields, found {}",
                GAZETTEER_FIELD_COUNT,
                fields.len()
            ),
        ));
    }

    let geonameid: i64 = fields[f::GEONAMEID].trim().parse().map_err(|_| {
        Error::malformed_record(
            line_number,
            format!("invalid geonameid '{}'", fields[f::GEONAMEID]),
        )
    })?;

    let latitude: f64 = fields[f::LATITUDE].trim().parse().map_err(|_| {
        Error::malformed_record(
            line_number,
            format!("invalid latitude '{}'", fields[f::LATITUDE]),
        )
    })?;

    let longitude: f64 = fields[f::LONGITUDE].trim().parse().map_err(|_| {
        Error::malformed_record(
            line_number,
            format!("invalid longitude '{}'", fields[f::LONGITUDE]),
        )
    })?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::malformed_record(
            line_number,
            format!("latitude {} out of range [-90, 90]", latitude),
        ));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::malformed_record(
            line_number,
            format!("longitude {} out of range [-180, 180]", longitude),
        ));
    }

    let population_field = fields[f::POPULATION].trim();
    let population: i64 = if population_field.is_empty() {
        0
    } else {
        population_field.parse().map_err(|_| {
            Error::malformed_record(
                line_number,
                format!("invalid population '{}'", population_field),
            )
        })?
    };

    if population < 0 {
        return Err(Error::malformed_record(
            line_number,
            format!("negative population {}", population),
        ));
    }

    // Elevation is frequently absent in GeoNames data; unknown is not an error
    let elevation: Option<i32> = fields[f::ELEVATION].trim().parse().ok();

    Ok(GeoRecord {
        geonameid,
        name: fields[f::NAME].to_string(),
        asciiname: fields[f::ASCIINAME].to_string(),
        latitude,
        longitude,
        country_code: fields[f::COUNTRY_CODE].to_string(),
        population,
        elevation,
        alternate_names: fields[f::ALTERNATE_NAMES].to_string(),
        feature_class: fields[f::FEATURE_CLASS].to_string(),
        feature_code: fields[f::FEATURE_CODE].to_string(),
        cc2: fields[f::CC2].to_string(),
        admin1_code: fields[f::ADMIN1_CODE].to_string(),
        admin2_code: fields[f::ADMIN2_CODE].to_string(),
        admin3_code: fields[f::ADMIN3_CODE].to_string(),
        admin4_code: fields[f::ADMIN4_CODE].to_string(),
        dem: fields[f::DEM].to_string(),
        timezone: fields[f::TIMEZONE].to_string(),
        modification_date: fields[f::MODIFICATION_DATE].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> String {
        [
            "683506",        // geonameid
            "Bucharest",     // name
            "Bucharest",     // asciiname
            "Bucuresti",     // alternatenames
            "44.43225",      // latitude
            "26.10626",      // longitude
            "P",             // feature class
            "PPLC",          // feature code
            "RO",            // country code
            "",              // cc2
            "10",            // admin1
            "",              // admin2
            "",              // admin3
            "",              // admin4
            "1877155",       // population
            "",              // elevation
            "71",            // dem
            "Europe/Bucharest",
            "2023-10-12",
        ]
        .join("\t")
    }

    fn with_field(index: usize, value: &str) -> String {
        let mut fields: Vec<String> = sample_line().split('\t').map(String::from).collect();
        fields[index] = value.to_string();
        fields.join("\t")
    }

    #[test]
    fn test_parse_valid_line() {
        let record = parse_line(&sample_line(), 1).unwrap();

        assert_eq!(record.geonameid, 683506);
        assert_eq!(record.name, "Bucharest");
        assert_eq!(record.country_code, "RO");
        assert_eq!(record.latitude, 44.43225);
        assert_eq!(record.longitude, 26.10626);
        assert_eq!(record.population, 1_877_155);
        assert_eq!(record.elevation, None);
        assert_eq!(record.timezone, "Europe/Bucharest");
    }

    #[test]
    fn test_parse_short_line_fails() {
        let result = parse_line("683506\tBucharest\t44.43\t26.10", 7);
        match result.unwrap_err() {
            Error::MalformedRecord { line, message } => {
                assert_eq!(line, 7);
                assert!(message.contains("expected 19 fields"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_population_defaults_to_zero() {
        let record = parse_line(&with_field(14, ""), 1).unwrap();
        assert_eq!(record.population, 0);
    }

    #[test]
    fn test_negative_population_fails() {
        assert!(parse_line(&with_field(14, "-5"), 1).is_err());
    }

    #[test]
    fn test_unparsable_coordinate_fails() {
        assert!(parse_line(&with_field(4, "north-ish"), 1).is_err());
        assert!(parse_line(&with_field(5, ""), 1).is_err());
    }

    #[test]
    fn test_out_of_range_coordinates_fail() {
        assert!(parse_line(&with_field(4, "91.0"), 1).is_err());
        assert!(parse_line(&with_field(4, "-90.5"), 1).is_err());
        assert!(parse_line(&with_field(5, "180.5"), 1).is_err());
    }

    #[test]
    fn test_known_elevation_preserved() {
        let record = parse_line(&with_field(15, "846"), 1).unwrap();
        assert_eq!(record.elevation, Some(846));
    }

    #[test]
    fn test_unparsable_elevation_is_unknown() {
        let record = parse_line(&with_field(15, "n/a"), 1).unwrap();
        assert_eq!(record.elevation, None);
    }
}
