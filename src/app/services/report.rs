//! Human-readable statistics report rendering
//!
//! Renders the statistics document as deterministic plain text: an overall
//! block, a top-cities table, then one block per category sorted by
//! descending total population (category code breaks ties). Percentage
//! shares are computed here, at render time, from the integer aggregates so
//! the statistics document itself carries no rounded values.

use crate::app::models::GeoRecord;
use crate::app::services::aggregator::Statistics;
use crate::constants::REPORT_TOP_CITIES;
use std::fmt::Write as _;

const WIDE_RULE: &str =
    "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Render the full plain-text report.
///
/// `records` supplies the top-cities table; it must be the same accepted
/// set the statistics were computed from.
pub fn render(stats: &Statistics, records: &[GeoRecord]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{WIDE_RULE}");
    let _ = writeln!(out, "GAZETTEER REGION STATISTICS REPORT");
    let _ = writeln!(out, "{WIDE_RULE}");
    let _ = writeln!(out);

    render_overall(&mut out, stats);
    render_top_cities(&mut out, records);
    render_countries(&mut out, stats);

    let _ = writeln!(out, "{WIDE_RULE}");
    out
}

fn render_overall(out: &mut String, stats: &Statistics) {
    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(out, "OVERALL STATISTICS");
    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(out, "Total Cities:              {}", stats.total_cities);
    let _ = writeln!(out, "Total Population:          {}", stats.total_population);
    let _ = writeln!(out, "Average Population:        {}", stats.overall.avg_population);
    let _ = writeln!(out, "Median Population:         {}", stats.overall.median_population);
    let _ = writeln!(out, "Average Elevation:         {} meters", stats.overall.avg_elevation);
    let _ = writeln!(out, "Maximum Elevation:         {} meters", stats.overall.max_elevation);
    let _ = writeln!(out, "Cities > 100K population:  {}", stats.overall.cities_over_100k);
    let _ = writeln!(out, "Cities > 50K population:   {}", stats.overall.cities_over_50k);
    let _ = writeln!(out, "Cities > 10K population:   {}", stats.overall.cities_over_10k);
    let _ = writeln!(out);
}

fn render_top_cities(out: &mut String, records: &[GeoRecord]) {
    if records.is_empty() {
        return;
    }

    let mut sorted: Vec<&GeoRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.population.cmp(&a.population));

    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(out, "TOP CITIES BY POPULATION");
    let _ = writeln!(out, "{THIN_RULE}");
    for (i, city) in sorted.iter().take(REPORT_TOP_CITIES).enumerate() {
        let _ = writeln!(
            out,
            "{:2}. {:30} ({}) - Pop: {}",
            i + 1,
            city.name,
            city.country_code,
            city.population
        );
    }
    let _ = writeln!(out);
}

fn render_countries(out: &mut String, stats: &Statistics) {
    let _ = writeln!(out, "{THIN_RULE}");
    let _ = writeln!(out, "STATISTICS BY COUNTRY");
    let _ = writeln!(out, "{THIN_RULE}");

    // Descending total population; category code breaks ties so the
    // ordering is total
    let mut countries: Vec<_> = stats.countries.iter().collect();
    countries.sort_by(|(code_a, a), (code_b, b)| {
        b.total_population
            .cmp(&a.total_population)
            .then_with(|| code_a.cmp(code_b))
    });

    for (code, country) in countries {
        let pct_cities = percentage(country.city_count as i64, stats.total_cities as i64);
        let pct_population = percentage(country.total_population, stats.total_population);

        let _ = writeln!(out);
        let _ = writeln!(out, "Country: {code}");
        let _ = writeln!(out, "  Number of Cities:        {}", country.city_count);
        let _ = writeln!(out, "  Total Population:        {}", country.total_population);
        let _ = writeln!(out, "  Average Population:      {}", country.avg_population);
        let _ = writeln!(out, "  Median Population:       {}", country.median_population);
        let _ = writeln!(out, "  Max Population:          {}", country.max_population);
        let _ = writeln!(out, "  Min Population:          {}", country.min_population);
        let _ = writeln!(out, "  Average Elevation:       {} meters", country.avg_elevation);
        let _ = writeln!(out, "  Max Elevation:           {} meters", country.max_elevation);
        let _ = writeln!(out, "  Largest City:            {}", country.largest_city);
        let _ = writeln!(out, "  % of Total Cities:       {pct_cities:.1}%");
        let _ = writeln!(out, "  % of Total Population:   {pct_population:.1}%");
    }
    let _ = writeln!(out);
}

fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
