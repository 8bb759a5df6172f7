//! Integration tests for the full filtering pipeline
//!
//! These tests drive the library end to end with synthetic fixture files:
//! boundary loading, gazetteer filtering, rule application, CSV output,
//! round-trip re-analysis, and statistics serialization.

use gazetteer_processor::app::services::aggregator::Statistics;
use gazetteer_processor::app::services::boundary::Polygon;
use gazetteer_processor::app::services::csv_writer;
use gazetteer_processor::app::services::filter_pipeline::{FilterPipeline, NullObserver};
use gazetteer_processor::config::PipelineConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build one 19-field GeoNames line
fn gazetteer_line(
    id: i64,
    name: &str,
    lat: f64,
    lon: f64,
    country: &str,
    population: &str,
    elevation: &str,
) -> String {
    format!(
        "{id}\t{name}\t{name}\t\t{lat}\t{lon}\tP\tPPL\t{country}\t\t\t\t\t\t{population}\t{elevation}\t100\tEurope/Bucharest\t2023-10-12"
    )
}

/// Write the unit-square boundary and a small gazetteer into a temp dir
fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let boundary = dir.path().join("border.txt");
    fs::write(&boundary, "0.0, 0.0\n0.0, 10.0\n10.0, 10.0\n10.0, 0.0\n").unwrap();

    let cities = dir.path().join("cities.txt");
    let lines = [
        // Inside, plain acceptance
        gazetteer_line(1, "Alpha", 5.0, 5.0, "AA", "100", ""),
        gazetteer_line(2, "Beta", 6.0, 6.0, "AA", "300", "250"),
        // Outside the square
        gazetteer_line(3, "Faraway", 15.0, 15.0, "AA", "9999", ""),
        // Boundary corner, classified as inside
        gazetteer_line(4, "Corner", 0.0, 0.0, "BB", "2000", ""),
        // Romanian sector inside the square: name exclusion beats everything
        gazetteer_line(5, "Sector 3", 5.0, 5.0, "RO", "50000", ""),
        // Matches both name rule and floor rule: counted under the name rule
        gazetteer_line(6, "Sector 9", 5.0, 5.0, "RO", "500", ""),
        // Below the RO/HU floor
        gazetteer_line(7, "Kisfalu", 5.0, 5.0, "HU", "800", ""),
        // Adjustment-eligible: 200000 * 0.85 = 170000
        gazetteer_line(8, "Cluj", 5.0, 5.0, "RO", "200000", "360"),
        // At the ceiling: unmodified
        gazetteer_line(9, "Bucuresti", 5.0, 5.0, "RO", "300000", ""),
        // Malformed: too few fields
        "12345\tBroken\t44.0".to_string(),
        // Malformed: unparsable coordinate
        gazetteer_line(11, "BadCoord", f64::NAN, 5.0, "AA", "100", "")
            .replace("NaN", "not-a-number"),
    ];
    fs::write(&cities, lines.join("\n")).unwrap();

    (boundary, cities)
}

fn run_pipeline(dir: &TempDir) -> gazetteer_processor::app::services::filter_pipeline::FilterResult {
    let (boundary, cities) = write_fixtures(dir);
    let polygon = Polygon::load(&boundary).unwrap();
    let pipeline = FilterPipeline::new(polygon, PipelineConfig::default());
    pipeline.run_file(&cities, &NullObserver).unwrap()
}

#[test]
fn test_end_to_end_counts() {
    let dir = TempDir::new().unwrap();
    let result = run_pipeline(&dir);

    assert_eq!(result.stats.processed, 11);
    assert_eq!(result.stats.malformed, 2);
    assert_eq!(result.stats.excluded_geometry, 1);
    assert_eq!(result.stats.excluded_name, 2);
    assert_eq!(result.stats.excluded_population_floor, 1);
    assert_eq!(result.stats.accepted, 5);
    assert_eq!(result.records.len(), 5);
}

#[test]
fn test_every_accepted_record_is_inside_the_polygon() {
    let dir = TempDir::new().unwrap();
    let (boundary, _) = write_fixtures(&dir);
    let polygon = Polygon::load(&boundary).unwrap();

    let result = run_pipeline(&dir);
    for record in &result.records {
        assert!(
            polygon.contains(record.longitude, record.latitude),
            "accepted record '{}' lies outside the boundary",
            record.name
        );
    }
}

#[test]
fn test_rule_effects_on_accepted_records() {
    let dir = TempDir::new().unwrap();
    let result = run_pipeline(&dir);

    // No excluded name survives anywhere
    assert!(!result.records.iter().any(|r| r.name.contains("Sector")));

    let cluj = result.records.iter().find(|r| r.name == "Cluj").unwrap();
    assert_eq!(cluj.population, 170_000);

    let bucuresti = result
        .records
        .iter()
        .find(|r| r.name == "Bucuresti")
        .unwrap();
    assert_eq!(bucuresti.population, 300_000);

    // Boundary record accepted
    assert!(result.records.iter().any(|r| r.name == "Corner"));
}

#[test]
fn test_csv_round_trip_and_reanalysis() {
    let dir = TempDir::new().unwrap();
    let result = run_pipeline(&dir);

    let output = dir.path().join("filtered.csv");
    csv_writer::write_combined(&result.records, &output).unwrap();

    let reloaded = csv_writer::read_records(&output).unwrap();
    assert_eq!(reloaded.len(), result.records.len());

    // Populations and coordinates survive the round trip exactly
    for record in &result.records {
        let twin = reloaded
            .iter()
            .find(|r| r.geonameid == record.geonameid)
            .unwrap();
        assert_eq!(twin.population, record.population);
        assert_eq!(twin.latitude, record.latitude);
        assert_eq!(twin.longitude, record.longitude);
        assert_eq!(twin.elevation, record.elevation);
    }

    // Statistics computed from the reloaded set match the original set
    let direct = Statistics::compute(&result.records);
    let reanalyzed = Statistics::compute(&reloaded);
    assert_eq!(direct, reanalyzed);
}

#[test]
fn test_statistics_shape_and_values() {
    let dir = TempDir::new().unwrap();
    let result = run_pipeline(&dir);
    let stats = Statistics::compute(&result.records);

    assert_eq!(stats.total_cities, 5);
    // AA: 100 + 300, BB: 2000, RO: 170000 + 300000
    assert_eq!(stats.total_population, 472_400);

    let aa = &stats.countries["AA"];
    assert_eq!(aa.city_count, 2);
    assert_eq!(aa.avg_population, 200);
    assert_eq!(aa.median_population, 200);
    assert_eq!(aa.max_population, 300);
    assert_eq!(aa.min_population, 100);
    assert_eq!(aa.largest_city, "Beta");

    let ro = &stats.countries["RO"];
    assert_eq!(ro.city_count, 2);
    assert_eq!(ro.largest_city, "Bucuresti");
    assert_eq!(ro.max_elevation, 360);

    assert_eq!(stats.overall.cities_over_100k, 2);
    assert_eq!(stats.overall.cities_over_50k, 2);
    assert_eq!(stats.overall.cities_over_10k, 2);

    // The document serializes losslessly
    let json = stats.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_cities"], 5);
    assert_eq!(value["countries"]["RO"]["largest_city"], "Bucuresti");
    assert!(value["overall"]["avg_population"].is_i64());
}

#[test]
fn test_per_country_outputs() {
    let dir = TempDir::new().unwrap();
    let result = run_pipeline(&dir);

    let out_dir = dir.path().join("by-country");
    let written = csv_writer::write_by_country(&result.records, &out_dir, "cities").unwrap();

    assert_eq!(written.len(), 3); // AA, BB, RO
    let ro = csv_writer::read_records(&written["RO"]).unwrap();
    let order: Vec<&str> = ro.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["Bucuresti", "Cluj"]);
}

#[test]
fn test_empty_result_set_still_produces_statistics() {
    let dir = TempDir::new().unwrap();
    let boundary = dir.path().join("border.txt");
    fs::write(&boundary, "0.0 0.0\n0.0 1.0\n1.0 1.0\n1.0 0.0\n").unwrap();

    let cities = dir.path().join("cities.txt");
    fs::write(
        &cities,
        gazetteer_line(1, "Elsewhere", 50.0, 50.0, "AA", "100", ""),
    )
    .unwrap();

    let polygon = Polygon::load(&boundary).unwrap();
    let pipeline = FilterPipeline::new(polygon, PipelineConfig::default());
    let result = pipeline.run_file(&cities, &NullObserver).unwrap();

    assert_eq!(result.stats.accepted, 0);
    assert_eq!(result.stats.excluded_geometry, 1);

    let stats = Statistics::compute(&result.records);
    assert_eq!(stats.total_cities, 0);
    assert_eq!(stats.overall.median_population, 0);
    assert!(stats.to_json_pretty().is_ok());
}

#[test]
fn test_structured_boundary_document() {
    let dir = TempDir::new().unwrap();
    let boundary = dir.path().join("border.json");
    fs::write(
        &boundary,
        r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[0.0,10.0],[10.0,10.0],[10.0,0.0],[0.0,0.0]]]}"#,
    )
    .unwrap();

    let cities = dir.path().join("cities.txt");
    fs::write(
        &cities,
        [
            gazetteer_line(1, "Inside", 5.0, 5.0, "AA", "100", ""),
            gazetteer_line(2, "Outside", 15.0, 15.0, "AA", "100", ""),
        ]
        .join("\n"),
    )
    .unwrap();

    let polygon = Polygon::load(&boundary).unwrap();
    assert_eq!(polygon.vertex_count(), 4);

    let pipeline = FilterPipeline::new(polygon, PipelineConfig::default());
    let result = pipeline.run_file(&cities, &NullObserver).unwrap();
    assert_eq!(result.stats.accepted, 1);
}
