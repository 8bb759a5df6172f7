//! Core data structures for gazetteer processing.
//!
//! Defines the fixed-shape gazetteer record, rule outcomes, and exclusion
//! reasons used throughout the library.

use serde::{Deserialize, Serialize};

/// One candidate city record parsed from a gazetteer line.
///
/// Coordinates are WGS84-like degrees; no datum transform is applied.
/// Elevation is modeled as an explicit unknown (`None`) rather than a
/// sentinel zero so elevation aggregates stay correct. The auxiliary fields
/// are carried through verbatim and never computed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// GeoNames identifier
    pub geonameid: i64,
    /// Primary (UTF-8) place name
    pub name: String,
    /// ASCII transliteration of the name
    pub asciiname: String,
    /// Latitude in degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180]
    pub longitude: f64,
    /// Category code used for grouping (ISO country code in GeoNames data)
    pub country_code: String,
    /// Population count, never negative; empty input field parses as 0
    pub population: i64,
    /// Elevation in meters, `None` when absent or unparsable
    pub elevation: Option<i32>,
    /// Auxiliary fields passed through untouched
    pub alternate_names: String,
    pub feature_class: String,
    pub feature_code: String,
    pub cc2: String,
    pub admin1_code: String,
    pub admin2_code: String,
    pub admin3_code: String,
    pub admin4_code: String,
    pub dem: String,
    pub timezone: String,
    pub modification_date: String,
}

impl GeoRecord {
    /// The record's coordinate as an (longitude, latitude) pair,
    /// matching polygon vertex order
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

/// Reason a record was excluded by the rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Name contained the forbidden substring in a designated category
    NameExclusion,
    /// Population below the configured floor in a designated category
    BelowPopulationFloor,
}

impl ExclusionReason {
    /// Stable machine-readable name for counters and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::NameExclusion => "name_exclusion",
            ExclusionReason::BelowPopulationFloor => "below_population_floor",
        }
    }
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of filtering one candidate record.
///
/// A record is never both excluded and present in aggregation: only
/// `Accepted` records reach the collected result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Record retained, possibly with an adjusted population
    Accepted,
    /// Record fell outside the boundary polygon
    ExcludedGeometry,
    /// Record excluded by a named rule
    ExcludedByRule(ExclusionReason),
}

impl RuleOutcome {
    /// Whether the record survives into the accepted set
    pub fn is_accepted(&self) -> bool {
        matches!(self, RuleOutcome::Accepted)
    }
}
