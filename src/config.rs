//! Configuration management for the filtering pipeline.
//!
//! Provides configuration structures for the rule engine thresholds and
//! pipeline behavior, with defaults matching the Dacia-region ruleset the
//! tool was originally built for. All category sets and thresholds are
//! plain data so the same engine supports other boundaries and regions.

use crate::constants::{
    DEFAULT_ADJUSTMENT_CATEGORIES, DEFAULT_ADJUSTMENT_CEILING, DEFAULT_ADJUSTMENT_FACTOR,
    DEFAULT_FORBIDDEN_SUBSTRING, DEFAULT_NAME_EXCLUSION_CATEGORIES, DEFAULT_POPULATION_FLOOR,
    DEFAULT_POPULATION_FLOOR_CATEGORIES, PROGRESS_INTERVAL,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the name-based exclusion rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameExclusionConfig {
    /// Category codes the rule applies to
    pub categories: HashSet<String>,

    /// Substring that triggers exclusion, matched case-insensitively
    pub forbidden_substring: String,
}

/// Configuration for the minimum-population exclusion rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationFloorConfig {
    /// Category codes the rule applies to
    pub categories: HashSet<String>,

    /// Records below this population are excluded
    pub min_population: i64,
}

/// Configuration for the population-adjustment rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationAdjustmentConfig {
    /// Category codes the rule applies to
    pub categories: HashSet<String>,

    /// Adjustment only applies below this population
    pub ceiling: i64,

    /// Multiplicative factor, result truncated toward zero
    pub factor: f64,
}

/// Complete rule-engine configuration
///
/// Rules are applied in declaration order: name exclusion, then population
/// floor, then population adjustment. The first excluding rule wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name_exclusion: NameExclusionConfig,
    pub population_floor: PopulationFloorConfig,
    pub population_adjustment: PopulationAdjustmentConfig,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            name_exclusion: NameExclusionConfig {
                categories: to_set(DEFAULT_NAME_EXCLUSION_CATEGORIES),
                forbidden_substring: DEFAULT_FORBIDDEN_SUBSTRING.to_string(),
            },
            population_floor: PopulationFloorConfig {
                categories: to_set(DEFAULT_POPULATION_FLOOR_CATEGORIES),
                min_population: DEFAULT_POPULATION_FLOOR,
            },
            population_adjustment: PopulationAdjustmentConfig {
                categories: to_set(DEFAULT_ADJUSTMENT_CATEGORIES),
                ceiling: DEFAULT_ADJUSTMENT_CEILING,
                factor: DEFAULT_ADJUSTMENT_FACTOR,
            },
        }
    }
}

impl RuleConfig {
    /// Replace the name-exclusion category set
    pub fn with_name_exclusion_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.name_exclusion.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the forbidden name substring
    pub fn with_forbidden_substring(mut self, substring: impl Into<String>) -> Self {
        self.name_exclusion.forbidden_substring = substring.into();
        self
    }

    /// Replace the population floor threshold
    pub fn with_population_floor(mut self, min_population: i64) -> Self {
        self.population_floor.min_population = min_population;
        self
    }

    /// Replace the adjustment ceiling and factor
    pub fn with_adjustment(mut self, ceiling: i64, factor: f64) -> Self {
        self.population_adjustment.ceiling = ceiling;
        self.population_adjustment.factor = factor;
        self
    }
}

/// Configuration for pipeline-level behavior
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Rule-engine thresholds and category sets
    pub rules: RuleConfig,

    /// Lines between progress observer notifications
    pub progress_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl PipelineConfig {
    /// Create pipeline configuration with a custom ruleset
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Create pipeline configuration with a custom progress interval
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

fn to_set(categories: &[&str]) -> HashSet<String> {
    categories.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_config_matches_dacia_ruleset() {
        let config = RuleConfig::default();

        assert!(config.name_exclusion.categories.contains("RO"));
        assert_eq!(config.name_exclusion.forbidden_substring, "sector");
        assert!(config.population_floor.categories.contains("HU"));
        assert_eq!(config.population_floor.min_population, 1000);
        assert_eq!(config.population_adjustment.ceiling, 300_000);
        assert_eq!(config.population_adjustment.factor, 0.85);
    }

    #[test]
    fn test_builder_methods() {
        let config = RuleConfig::default()
            .with_name_exclusion_categories(["FR"])
            .with_forbidden_substring("arrondissement")
            .with_population_floor(500)
            .with_adjustment(100_000, 0.9);

        assert!(config.name_exclusion.categories.contains("FR"));
        assert!(!config.name_exclusion.categories.contains("RO"));
        assert_eq!(config.name_exclusion.forbidden_substring, "arrondissement");
        assert_eq!(config.population_floor.min_population, 500);
        assert_eq!(config.population_adjustment.ceiling, 100_000);
        assert_eq!(config.population_adjustment.factor, 0.9);
    }
}
