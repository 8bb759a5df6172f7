//! Descriptive statistics over the accepted-record set
//!
//! Aggregation is a pure function of the accepted records: it runs once
//! after filtering completes, never incrementally, and running it twice on
//! the same input yields identical output. Category groups use a `BTreeMap`
//! so JSON serialization is deterministic.
//!
//! Elevation aggregates only consider records with a known, positive
//! elevation; records with unknown elevation still count toward population
//! aggregates. Empty inputs yield all-zero statistics, never a panic.

use crate::app::models::GeoRecord;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder largest-city name for an empty group
const NO_CITY: &str = "N/A";

/// Per-category descriptive statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStats {
    pub city_count: usize,
    pub total_population: i64,
    /// Integer-truncated mean population
    pub avg_population: i64,
    /// Median population; even-sized groups take the truncated mean of the
    /// two middle values
    pub median_population: i64,
    pub max_population: i64,
    pub min_population: i64,
    /// Truncated mean over known, positive elevations; 0 when none
    pub avg_elevation: i64,
    /// Maximum known positive elevation; 0 when none
    pub max_elevation: i64,
    /// Name of the highest-population member, first-encountered on ties
    pub largest_city: String,
}

/// Statistics across all accepted records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub avg_population: i64,
    pub median_population: i64,
    pub avg_elevation: i64,
    pub max_elevation: i64,
    /// Threshold counts follow [`crate::constants::POPULATION_BUCKETS`] and are
    /// independent: a record above 100k counts in all three
    pub cities_over_100k: usize,
    pub cities_over_50k: usize,
    pub cities_over_10k: usize,
}

/// The complete statistics document.
///
/// Serializes losslessly to JSON with numbers as numbers; percentage shares
/// are deliberately absent and computed at report-render time instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_cities: usize,
    pub total_population: i64,
    pub countries: BTreeMap<String, CountryStats>,
    pub overall: OverallStats,
}

impl Statistics {
    /// Compute statistics from the accepted-record set.
    ///
    /// Pure: the input is not modified and repeated calls yield identical
    /// results. An empty input yields an all-zero document.
    pub fn compute(records: &[GeoRecord]) -> Self {
        let mut by_country: BTreeMap<&str, Vec<&GeoRecord>> = BTreeMap::new();
        for record in records {
            by_country
                .entry(record.country_code.as_str())
                .or_default()
                .push(record);
        }

        let countries = by_country
            .into_iter()
            .map(|(country, group)| (country.to_string(), country_stats(&group)))
            .collect();

        let all: Vec<&GeoRecord> = records.iter().collect();
        let populations: Vec<i64> = all.iter().map(|r| r.population).collect();

        Self {
            total_cities: records.len(),
            total_population: populations.iter().sum(),
            countries,
            overall: OverallStats {
                avg_population: truncated_mean(&populations),
                median_population: median(&populations),
                avg_elevation: truncated_mean(&known_elevations(&all)),
                max_elevation: known_elevations(&all).iter().copied().max().unwrap_or(0),
                cities_over_100k: count_over(&populations, 100_000),
                cities_over_50k: count_over(&populations, 50_000),
                cities_over_10k: count_over(&populations, 10_000),
            },
        }
    }

    /// Serialize the statistics document to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn country_stats(group: &[&GeoRecord]) -> CountryStats {
    let populations: Vec<i64> = group.iter().map(|r| r.population).collect();
    let elevations = known_elevations(group);

    let largest_city = group
        .iter()
        .fold(None::<&GeoRecord>, |best, record| match best {
            Some(best) if best.population >= record.population => Some(best),
            _ => Some(record),
        })
        .map(|r| r.name.clone())
        .unwrap_or_else(|| NO_CITY.to_string());

    CountryStats {
        city_count: group.len(),
        total_population: populations.iter().sum(),
        avg_population: truncated_mean(&populations),
        median_population: median(&populations),
        max_population: populations.iter().copied().max().unwrap_or(0),
        min_population: populations.iter().copied().min().unwrap_or(0),
        avg_elevation: truncated_mean(&elevations),
        max_elevation: elevations.iter().copied().max().unwrap_or(0),
        largest_city,
    }
}

/// Elevations eligible for elevation aggregates: known and positive
fn known_elevations(records: &[&GeoRecord]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.elevation)
        .filter(|&e| e > 0)
        .map(i64::from)
        .collect()
}

/// Integer-truncated mean; 0 for an empty slice
fn truncated_mean(values: &[i64]) -> i64 {
    if values.is_empty() {
        0
    } else {
        values.iter().sum::<i64>() / values.len() as i64
    }
}

/// Median with the truncated mean of the two middle values for even sizes;
/// 0 for an empty slice
fn median(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2
    }
}

fn count_over(populations: &[i64], threshold: i64) -> usize {
    populations.iter().filter(|&&p| p > threshold).count()
}
