//! Application constants for the gazetteer processor
//!
//! This module contains the GeoNames record layout, default rule thresholds,
//! and reporting constants used throughout the application.

// =============================================================================
// GeoNames Record Layout
// =============================================================================

/// Required number of tab-separated fields per gazetteer line
pub const GAZETTEER_FIELD_COUNT: usize = 19;

/// Positional field indices within a gazetteer line
pub mod gazetteer_fields {
    pub const GEONAMEID: usize = 0;
    pub const NAME: usize = 1;
    pub const ASCIINAME: usize = 2;
    pub const ALTERNATE_NAMES: usize = 3;
    pub const LATITUDE: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const FEATURE_CLASS: usize = 6;
    pub const FEATURE_CODE: usize = 7;
    pub const COUNTRY_CODE: usize = 8;
    pub const CC2: usize = 9;
    pub const ADMIN1_CODE: usize = 10;
    pub const ADMIN2_CODE: usize = 11;
    pub const ADMIN3_CODE: usize = 12;
    pub const ADMIN4_CODE: usize = 13;
    pub const POPULATION: usize = 14;
    pub const ELEVATION: usize = 15;
    pub const DEM: usize = 16;
    pub const TIMEZONE: usize = 17;
    pub const MODIFICATION_DATE: usize = 18;
}

// =============================================================================
// Default Rule Thresholds
// =============================================================================

/// Categories prone to administrative-subdivision records (name exclusion rule)
pub const DEFAULT_NAME_EXCLUSION_CATEGORIES: &[&str] = &["RO"];

/// Forbidden name substring for the name-exclusion rule (matched case-insensitively)
pub const DEFAULT_FORBIDDEN_SUBSTRING: &str = "sector";

/// Categories subject to the minimum-population rule
pub const DEFAULT_POPULATION_FLOOR_CATEGORIES: &[&str] = &["RO", "HU"];

/// Minimum population for categories in the floor set
pub const DEFAULT_POPULATION_FLOOR: i64 = 1000;

/// Categories subject to the population-adjustment rule
pub const DEFAULT_ADJUSTMENT_CATEGORIES: &[&str] = &["RO", "HU"];

/// Population ceiling below which the adjustment applies
pub const DEFAULT_ADJUSTMENT_CEILING: i64 = 300_000;

/// Multiplicative adjustment factor (result truncated toward zero)
pub const DEFAULT_ADJUSTMENT_FACTOR: f64 = 0.85;

// =============================================================================
// Reporting Constants
// =============================================================================

/// How many processed lines between progress observer notifications
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Population thresholds for the overall bucket counts (counted independently)
pub const POPULATION_BUCKETS: &[i64] = &[100_000, 50_000, 10_000];

/// Number of top-population cities listed in the human report
pub const REPORT_TOP_CITIES: usize = 20;

// =============================================================================
// Output Schema
// =============================================================================

/// Column order for combined and per-category CSV outputs
pub const OUTPUT_COLUMNS: &[&str] = &[
    "geonameid",
    "name",
    "asciiname",
    "country_code",
    "latitude",
    "longitude",
    "population",
    "elevation",
];
