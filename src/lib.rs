//! Gazetteer Processor Library
//!
//! A Rust library for filtering GeoNames gazetteer cities against a boundary
//! polygon and computing per-country statistics.
//!
//! This library provides tools for:
//! - Parsing tab-delimited GeoNames `cities500.txt` records
//! - Loading boundary polygons from GeoJSON-style documents or loose coordinate text
//! - Point-in-polygon containment testing (even-odd rule, boundary treated as inside)
//! - Ordered, configuration-driven inclusion/exclusion/adjustment rules
//! - Per-country and overall descriptive statistics
//! - CSV, JSON and plain-text report output

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod boundary;
        pub mod csv_writer;
        pub mod filter_pipeline;
        pub mod gazetteer_parser;
        pub mod report;
        pub mod rule_engine;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ExclusionReason, GeoRecord, RuleOutcome};
pub use app::services::boundary::Polygon;
pub use config::RuleConfig;

/// Result type alias for the gazetteer processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for gazetteer processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A gazetteer line did not parse as a complete record
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// Boundary input yielded no usable coordinates
    #[error("Empty polygon: no usable coordinates found in '{file}'")]
    EmptyPolygon { file: String },

    /// Boundary input yielded fewer than three vertices
    #[error("Invalid polygon in '{file}': {vertices} vertices, at least 3 required")]
    InvalidPolygon { file: String, vertices: usize },

    /// CSV reading or writing error
    #[error("CSV error in '{file}': {message}")]
    CsvOutput {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Statistics serialization error
    #[error("Statistics serialization error: {message}")]
    StatsSerialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a malformed record error for a given input line
    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create an empty polygon error
    pub fn empty_polygon(file: impl Into<String>) -> Self {
        Self::EmptyPolygon { file: file.into() }
    }

    /// Create an invalid polygon error
    pub fn invalid_polygon(file: impl Into<String>, vertices: usize) -> Self {
        Self::InvalidPolygon {
            file: file.into(),
            vertices,
        }
    }

    /// Create a CSV error with context
    pub fn csv_output(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvOutput {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a statistics serialization error
    pub fn stats_serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::StatsSerialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvOutput {
            file: "unknown".to_string(),
            message: "CSV operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::StatsSerialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
