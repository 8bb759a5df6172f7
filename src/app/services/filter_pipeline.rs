//! Filtering pipeline driver
//!
//! Composes the record parser, containment test and rule engine into a
//! single synchronous pass: parse → geometric filter → rule engine →
//! collect. Malformed lines are counted and skipped, never fatal; the
//! accepted collection has one writer (the driver) and is handed to the
//! aggregator as an immutable slice afterwards.
//!
//! Progress is reported through the [`ProgressObserver`] trait so the core
//! has no console dependency and stays independently testable.

use crate::app::models::{ExclusionReason, GeoRecord, RuleOutcome};
use crate::app::services::boundary::Polygon;
use crate::app::services::gazetteer_parser::parse_line;
use crate::app::services::rule_engine::RuleEngine;
use crate::config::PipelineConfig;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Observer for pipeline progress and completion.
///
/// Implementations must not assume any particular call frequency beyond
/// "every `progress_interval` processed lines, then once at the end".
pub trait ProgressObserver {
    /// Called periodically during the filtering pass
    fn on_progress(&self, processed: usize, accepted: usize);

    /// Called once after the last line has been processed
    fn on_complete(&self, stats: &FilterStats);
}

/// Observer that discards all notifications
#[derive(Debug, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&self, _processed: usize, _accepted: usize) {}
    fn on_complete(&self, _stats: &FilterStats) {}
}

/// Counters for one filtering pass.
///
/// Every counter is reported even when zero. A record lands in exactly one
/// bucket: malformed, excluded_geometry, one of the rule counters, or
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Total input lines seen
    pub processed: usize,
    /// Lines that failed record parsing
    pub malformed: usize,
    /// Records outside the boundary polygon
    pub excluded_geometry: usize,
    /// Records excluded by the name rule
    pub excluded_name: usize,
    /// Records excluded by the population floor rule
    pub excluded_population_floor: usize,
    /// Records retained for aggregation
    pub accepted: usize,
}

impl FilterStats {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Filtering summary: {} lines processed | {} malformed | \
             {} outside boundary | {} name-excluded | {} below floor | {} accepted",
            self.processed,
            self.malformed,
            self.excluded_geometry,
            self.excluded_name,
            self.excluded_population_floor,
            self.accepted
        )
    }
}

/// Result of one filtering pass
#[derive(Debug)]
pub struct FilterResult {
    /// Accepted records, in input order with possibly adjusted populations
    pub records: Vec<GeoRecord>,
    /// Counters for the pass
    pub stats: FilterStats,
}

/// The filtering pipeline: polygon containment plus the rule engine
pub struct FilterPipeline {
    polygon: Polygon,
    engine: RuleEngine,
    config: PipelineConfig,
}

impl FilterPipeline {
    /// Create a pipeline over a loaded polygon and configuration
    pub fn new(polygon: Polygon, config: PipelineConfig) -> Self {
        let engine = RuleEngine::from_config(&config.rules);
        Self {
            polygon,
            engine,
            config,
        }
    }

    /// The polygon this pipeline filters against
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Run the filtering pass over a gazetteer file
    pub fn run_file(&self, path: &Path, observer: &dyn ProgressObserver) -> Result<FilterResult> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let file = File::open(path)
            .map_err(|e| Error::io(format!("failed to open '{}'", path.display()), e))?;
        info!("Processing gazetteer file '{}'", path.display());
        self.run(BufReader::new(file), observer)
    }

    /// Run the filtering pass over any line-oriented reader.
    ///
    /// One pass, strictly left to right: each line is parsed, containment
    /// tested and rule-filtered before the next line is read. Unreadable
    /// lines (invalid UTF-8) count as malformed.
    pub fn run(
        &self,
        reader: impl BufRead,
        observer: &dyn ProgressObserver,
    ) -> Result<FilterResult> {
        let mut stats = FilterStats::default();
        let mut records: Vec<GeoRecord> = Vec::new();
        let bbox = self.polygon.bounding_box();

        for line in reader.lines() {
            stats.processed += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    debug!("Skipping unreadable line {}: {}", stats.processed, e);
                    stats.malformed += 1;
                    continue;
                }
            };

            let mut record = match parse_line(&line, stats.processed) {
                Ok(record) => record,
                Err(e) => {
                    debug!("Skipping line: {}", e);
                    stats.malformed += 1;
                    continue;
                }
            };

            // The bounding box is a pure pre-filter; the even-odd test
            // still decides every accept, so results match the plain test.
            let (lon, lat) = record.lon_lat();
            if !bbox.contains(lon, lat) || !self.polygon.contains(lon, lat) {
                stats.excluded_geometry += 1;
                self.report_progress(&stats, records.len(), observer);
                continue;
            }

            match self.engine.apply(&mut record) {
                RuleOutcome::Accepted => {
                    records.push(record);
                    stats.accepted += 1;
                }
                RuleOutcome::ExcludedByRule(ExclusionReason::NameExclusion) => {
                    stats.excluded_name += 1;
                }
                RuleOutcome::ExcludedByRule(ExclusionReason::BelowPopulationFloor) => {
                    stats.excluded_population_floor += 1;
                }
                // The containment test above owns the geometry bucket;
                // the engine never reports it.
                RuleOutcome::ExcludedGeometry => {
                    stats.excluded_geometry += 1;
                }
            }

            self.report_progress(&stats, records.len(), observer);
        }

        info!("{}", stats.summary());
        observer.on_complete(&stats);

        Ok(FilterResult { records, stats })
    }

    fn report_progress(&self, stats: &FilterStats, accepted: usize, observer: &dyn ProgressObserver) {
        if self.config.progress_interval > 0 && stats.processed % self.config.progress_interval == 0
        {
            observer.on_progress(stats.processed, accepted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use std::io::Cursor;
    use std::sync::Mutex;

    fn gazetteer_line(
        id: i64,
        name: &str,
        lat: f64,
        lon: f64,
        country: &str,
        population: i64,
    ) -> String {
        format!(
            "{id}\t{name}\t{name}\t\t{lat}\t{lon}\tP\tPPL\t{country}\t\t\t\t\t\t{population}\t\t100\tEurope/Bucharest\t2023-10-12"
        )
    }

    fn square_pipeline() -> FilterPipeline {
        let polygon = Polygon::new(
            vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)],
            "test",
        )
        .unwrap();
        FilterPipeline::new(polygon, PipelineConfig::default())
    }

    #[test]
    fn test_geometry_filter() {
        let input = [
            gazetteer_line(1, "Inside", 5.0, 5.0, "AA", 100),
            gazetteer_line(2, "Outside", 15.0, 15.0, "AA", 100),
            gazetteer_line(3, "OnCorner", 0.0, 0.0, "AA", 100),
        ]
        .join("\n");

        let result = square_pipeline()
            .run(Cursor::new(input), &NullObserver)
            .unwrap();

        assert_eq!(result.stats.processed, 3);
        assert_eq!(result.stats.excluded_geometry, 1);
        assert_eq!(result.stats.accepted, 2);
        // Boundary point classified as inside
        assert!(result.records.iter().any(|r| r.name == "OnCorner"));
        // Every accepted record satisfies the containment test
        let pipeline = square_pipeline();
        for record in &result.records {
            let (lon, lat) = record.lon_lat();
            assert!(pipeline.polygon().contains(lon, lat));
        }
    }

    #[test]
    fn test_malformed_lines_skipped_and_counted() {
        let input = format!(
            "{}\nnot a record\n{}",
            gazetteer_line(1, "Inside", 5.0, 5.0, "AA", 100),
            gazetteer_line(2, "AlsoInside", 6.0, 6.0, "AA", 100),
        );

        let result = square_pipeline()
            .run(Cursor::new(input), &NullObserver)
            .unwrap();

        assert_eq!(result.stats.processed, 3);
        assert_eq!(result.stats.malformed, 1);
        assert_eq!(result.stats.accepted, 2);
    }

    #[test]
    fn test_rule_counters() {
        let input = [
            gazetteer_line(1, "Sector 3", 5.0, 5.0, "RO", 50_000),
            gazetteer_line(2, "Kisfalu", 5.0, 5.0, "HU", 800),
            gazetteer_line(3, "Cluj-Napoca", 5.0, 5.0, "RO", 200_000),
        ]
        .join("\n");

        let result = square_pipeline()
            .run(Cursor::new(input), &NullObserver)
            .unwrap();

        assert_eq!(result.stats.excluded_name, 1);
        assert_eq!(result.stats.excluded_population_floor, 1);
        assert_eq!(result.stats.accepted, 1);
        // Adjustment applied to the accepted record
        assert_eq!(result.records[0].population, 170_000);
    }

    #[test]
    fn test_empty_input_reports_zero_counts() {
        let result = square_pipeline()
            .run(Cursor::new(String::new()), &NullObserver)
            .unwrap();

        assert_eq!(result.stats, FilterStats::default());
        assert!(result.records.is_empty());
    }

    struct RecordingObserver {
        calls: Mutex<Vec<(usize, usize)>>,
        completed: Mutex<Option<FilterStats>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_progress(&self, processed: usize, accepted: usize) {
            self.calls.lock().unwrap().push((processed, accepted));
        }
        fn on_complete(&self, stats: &FilterStats) {
            *self.completed.lock().unwrap() = Some(stats.clone());
        }
    }

    #[test]
    fn test_observer_notifications() {
        let polygon = Polygon::new(
            vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)],
            "test",
        )
        .unwrap();
        let config = PipelineConfig::default()
            .with_rules(RuleConfig::default())
            .with_progress_interval(2);
        let pipeline = FilterPipeline::new(polygon, config);

        let input = (1..=5)
            .map(|i| gazetteer_line(i, "Town", 5.0, 5.0, "AA", 100))
            .collect::<Vec<_>>()
            .join("\n");

        let observer = RecordingObserver {
            calls: Mutex::new(Vec::new()),
            completed: Mutex::new(None),
        };
        let result = pipeline.run(Cursor::new(input), &observer).unwrap();

        let calls = observer.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(2, 2), (4, 4)]);

        let completed = observer.completed.lock().unwrap();
        assert_eq!(completed.as_ref().unwrap(), &result.stats);
    }
}
