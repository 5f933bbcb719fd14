//! Configuration options for game analysis.
//!
//! This module provides the configuration struct that controls tolerances,
//! random payoff generation and output precision.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::nash::mixed::DEFAULT_TOLERANCE;

/// Configuration for a [`StrategicGame`](crate::nash::game::StrategicGame).
///
/// # Example
/// ```
/// use bimatrix_nash::nash::AnalysisConfig;
///
/// let config = AnalysisConfig::default().with_seed(42);
/// assert_eq!(config.tolerance, 1e-6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Tolerance on the probability sum when validating mixed strategies.
    pub tolerance: f64,

    /// Default lower bound (inclusive) for random payoffs.
    pub lower_limit: i64,

    /// Default upper bound (inclusive) for random payoffs.
    pub upper_limit: i64,

    /// Decimal places used when rendering probabilities.
    pub precision: usize,

    /// Random seed for reproducibility.
    ///
    /// If set, random payoffs and beliefs are reproducible. If `None`, the
    /// generator is seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            lower_limit: -99,
            upper_limit: 99,
            precision: 3,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a new AnalysisConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `NASH_TOLERANCE`, `NASH_PRECISION` and
    /// `NASH_SEED` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("NASH_TOLERANCE") {
            config.tolerance = parse_env("NASH_TOLERANCE", &raw)?;
        }
        if let Some(raw) = lookup("NASH_PRECISION") {
            config.precision = parse_env("NASH_PRECISION", &raw)?;
        }
        if let Some(raw) = lookup("NASH_SEED") {
            config.seed = Some(parse_env("NASH_SEED", &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Builder method: set the probability tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: set the random payoff range.
    pub fn with_limits(mut self, lower: i64, upper: i64) -> Self {
        self.lower_limit = lower;
        self.upper_limit = upper;
        self
    }

    /// Builder method: set rendering precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Random number generator honoring `seed`.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }

        if self.lower_limit > self.upper_limit {
            return Err(ConfigError::InvalidLimits(self.lower_limit, self.upper_limit));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv(key, raw.to_string()))
}

/// Errors that can occur when validating analysis configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tolerance is negative or not finite.
    InvalidTolerance(f64),
    /// Lower random limit exceeds the upper one.
    InvalidLimits(i64, i64),
    /// Environment variable could not be parsed.
    InvalidEnv(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTolerance(val) => {
                write!(f, "Tolerance {} must be finite and non-negative", val)
            }
            ConfigError::InvalidLimits(lower, upper) => {
                write!(f, "Lower limit {} exceeds upper limit {}", lower, upper)
            }
            ConfigError::InvalidEnv(key, raw) => {
                write!(f, "Could not parse {}={:?}", key, raw)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!((config.lower_limit, config.upper_limit), (-99, 99));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(AnalysisConfig::default().with_limits(5, 1).validate().is_err());
        assert!(AnalysisConfig::default().with_tolerance(-1.0).validate().is_err());
        assert!(AnalysisConfig::default().with_tolerance(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AnalysisConfig::from_lookup(lookup(&[
            ("NASH_TOLERANCE", "0.001"),
            ("NASH_PRECISION", "5"),
            ("NASH_SEED", "17"),
        ]))
        .unwrap();

        assert_eq!(config.tolerance, 0.001);
        assert_eq!(config.precision, 5);
        assert_eq!(config.seed, Some(17));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = AnalysisConfig::from_lookup(lookup(&[("NASH_PRECISION", "many")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnv("NASH_PRECISION", _))));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = AnalysisConfig::default().with_seed(9);
        let mut first = config.rng();
        let mut second = config.rng();
        let a: Vec<u64> = (0..5).map(|_| first.gen()).collect();
        let b: Vec<u64> = (0..5).map(|_| second.gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AnalysisConfig::default().with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
