//! Ordered region-specific rules for geometry-accepted records
//!
//! The engine applies a fixed, ordered list of rules to each record that
//! passed the containment test. Exclusion rules short-circuit: once a record
//! is excluded, later rules never run, so a record matching more than one
//! rule is counted under the first reason only. The population adjustment is
//! the only field mutation and happens in place on records that are
//! ultimately retained.
//!
//! Rules are plain tagged variants built from [`RuleConfig`]; category sets
//! and thresholds are configuration, not logic, so other regions can reuse
//! the engine unchanged.

use crate::app::models::{ExclusionReason, GeoRecord, RuleOutcome};
use crate::config::RuleConfig;
use std::collections::HashSet;
use tracing::debug;

/// One inclusion/exclusion/adjustment rule
#[derive(Debug, Clone)]
pub enum Rule {
    /// Exclude records whose name contains a forbidden substring
    /// (case-insensitive) in a designated category set
    NameExclusion {
        categories: HashSet<String>,
        /// Stored lowercased; matched against the lowercased record name
        forbidden_substring: String,
    },
    /// Exclude records below a population floor in a designated category set
    PopulationFloor {
        categories: HashSet<String>,
        min_population: i64,
    },
    /// Scale the population of records below a ceiling in a designated
    /// category set, truncating toward zero
    PopulationAdjustment {
        categories: HashSet<String>,
        ceiling: i64,
        factor: f64,
    },
}

impl Rule {
    /// Apply the rule to a record.
    ///
    /// Returns `Some(reason)` when the rule excludes the record; `None`
    /// means the record survives this rule (possibly adjusted).
    fn apply(&self, record: &mut GeoRecord) -> Option<ExclusionReason> {
        match self {
            Rule::NameExclusion {
                categories,
                forbidden_substring,
            } => {
                if categories.contains(&record.country_code)
                    && record.name.to_lowercase().contains(forbidden_substring)
                {
                    debug!(
                        "Record {} '{}' excluded: name contains '{}'",
                        record.geonameid, record.name, forbidden_substring
                    );
                    return Some(ExclusionReason::NameExclusion);
                }
                None
            }
            Rule::PopulationFloor {
                categories,
                min_population,
            } => {
                if categories.contains(&record.country_code)
                    && record.population < *min_population
                {
                    debug!(
                        "Record {} '{}' excluded: population {} below floor {}",
                        record.geonameid, record.name, record.population, min_population
                    );
                    return Some(ExclusionReason::BelowPopulationFloor);
                }
                None
            }
            Rule::PopulationAdjustment {
                categories,
                ceiling,
                factor,
            } => {
                if categories.contains(&record.country_code) && record.population < *ceiling {
                    record.population = (record.population as f64 * factor) as i64;
                }
                None
            }
        }
    }
}

/// Ordered rule engine built from a [`RuleConfig`]
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Build the standard three-rule sequence from configuration.
    ///
    /// Order matters and is part of the contract: name exclusion, then
    /// population floor, then population adjustment.
    pub fn from_config(config: &RuleConfig) -> Self {
        let rules = vec![
            Rule::NameExclusion {
                categories: config.name_exclusion.categories.clone(),
                forbidden_substring: config.name_exclusion.forbidden_substring.to_lowercase(),
            },
            Rule::PopulationFloor {
                categories: config.population_floor.categories.clone(),
                min_population: config.population_floor.min_population,
            },
            Rule::PopulationAdjustment {
                categories: config.population_adjustment.categories.clone(),
                ceiling: config.population_adjustment.ceiling,
                factor: config.population_adjustment.factor,
            },
        ];
        Self { rules }
    }

    /// Apply the rule sequence to one geometry-accepted record.
    ///
    /// The record is only mutated when it survives to an adjustment rule;
    /// excluded records are returned untouched apart from the outcome.
    pub fn apply(&self, record: &mut GeoRecord) -> RuleOutcome {
        for rule in &self.rules {
            if let Some(reason) = rule.apply(record) {
                return RuleOutcome::ExcludedByRule(reason);
            }
        }
        RuleOutcome::Accepted
    }

    /// Number of configured rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
