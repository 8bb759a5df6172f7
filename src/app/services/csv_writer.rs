//! Tabular CSV output and re-loading
//!
//! Writes the combined accepted-record file (sorted by category ascending,
//! then population descending), one file per category (population
//! descending), and reads the combined schema back for standalone analysis.
//! Output columns follow the fixed schema in [`crate::constants::OUTPUT_COLUMNS`];
//! unknown elevation serializes as an empty field and reads back as unknown.

use crate::app::models::GeoRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One row of the tabular output schema
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OutputRow {
    geonameid: i64,
    name: String,
    asciiname: String,
    country_code: String,
    latitude: f64,
    longitude: f64,
    population: i64,
    elevation: Option<i32>,
}

impl From<&GeoRecord> for OutputRow {
    fn from(record: &GeoRecord) -> Self {
        Self {
            geonameid: record.geonameid,
            name: record.name.clone(),
            asciiname: record.asciiname.clone(),
            country_code: record.country_code.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            population: record.population,
            elevation: record.elevation,
        }
    }
}

impl OutputRow {
    /// Rebuild a record from the output schema; auxiliary gazetteer fields
    /// are not part of the schema and come back empty.
    fn into_record(self) -> GeoRecord {
        GeoRecord {
            geonameid: self.geonameid,
            name: self.name,
            asciiname: self.asciiname,
            latitude: self.latitude,
            longitude: self.longitude,
            country_code: self.country_code,
            population: self.population,
            elevation: self.elevation,
            alternate_names: String::new(),
            feature_class: String::new(),
            feature_code: String::new(),
            cc2: String::new(),
            admin1_code: String::new(),
            admin2_code: String::new(),
            admin3_code: String::new(),
            admin4_code: String::new(),
            dem: String::new(),
            timezone: String::new(),
            modification_date: String::new(),
        }
    }
}

/// Write the combined CSV: all accepted records, header row, sorted by
/// category code ascending then population descending.
pub fn write_combined(records: &[GeoRecord], path: &Path) -> Result<()> {
    let mut sorted: Vec<&GeoRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        a.country_code
            .cmp(&b.country_code)
            .then_with(|| b.population.cmp(&a.population))
    });

    write_rows(&sorted, path)?;
    info!("Saved {} records to '{}'", sorted.len(), path.display());
    Ok(())
}

/// Write one CSV file per distinct category, sorted by population
/// descending, named `<stem>_<CODE>.csv` inside `dir`.
///
/// Returns the written paths keyed by category code.
pub fn write_by_country(
    records: &[GeoRecord],
    dir: &Path,
    stem: &str,
) -> Result<BTreeMap<String, PathBuf>> {
    fs::create_dir_all(dir)
        .map_err(|e| Error::io(format!("failed to create directory '{}'", dir.display()), e))?;

    let mut by_country: BTreeMap<&str, Vec<&GeoRecord>> = BTreeMap::new();
    for record in records {
        by_country
            .entry(record.country_code.as_str())
            .or_default()
            .push(record);
    }

    let mut written = BTreeMap::new();
    for (country, mut group) in by_country {
        group.sort_by(|a, b| b.population.cmp(&a.population));

        let path = dir.join(format!("{stem}_{country}.csv"));
        write_rows(&group, &path)?;
        debug!(
            "Saved {} records for {} to '{}'",
            group.len(),
            country,
            path.display()
        );
        written.insert(country.to_string(), path);
    }

    info!("Saved {} per-country files to '{}'", written.len(), dir.display());
    Ok(written)
}

fn write_rows(records: &[&GeoRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        Error::csv_output(
            path.display().to_string(),
            "failed to create output file",
            Some(e),
        )
    })?;

    for record in records {
        writer.serialize(OutputRow::from(*record)).map_err(|e| {
            Error::csv_output(path.display().to_string(), "failed to write row", Some(e))
        })?;
    }

    writer.flush().map_err(|e| {
        Error::io(format!("failed to flush '{}'", path.display()), e)
    })?;
    Ok(())
}

/// Read records back from the tabular output schema.
///
/// Rows that fail deserialization (missing columns, unparsable numbers) are
/// skipped with a warning, mirroring the per-record recovery policy of the
/// filtering pass. An empty elevation field reads back as unknown.
pub fn read_records(path: &Path) -> Result<Vec<GeoRecord>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        Error::csv_output(path.display().to_string(), "failed to open input", Some(e))
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in reader.deserialize::<OutputRow>().enumerate() {
        match row {
            Ok(row) => records.push(row.into_record()),
            Err(e) => {
                warn!("Skipping row {} of '{}': {}", index + 1, path.display(), e);
                skipped += 1;
            }
        }
    }

    info!(
        "Loaded {} records from '{}' ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );
    Ok(records)
}
