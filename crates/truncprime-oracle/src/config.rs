//! Oracle configuration.
//!
//! Values come from an optional TOML file and can be overridden by the
//! caller before the oracle is built:
//!
//! ```toml
//! max_cumulative_error = 1e-12
//! opportunity_floor = 100
//! seed = 42
//! ```

use crate::error::OracleError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default ceiling on the lifetime probability of a false "prime".
pub const DEFAULT_MAX_CUMULATIVE_ERROR: f64 = 1e-12;

/// Default lower bound on the opportunity count used to split the budget.
pub const DEFAULT_OPPORTUNITY_FLOOR: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    /// Ceiling on total false-"prime" probability over the oracle's lifetime.
    pub max_cumulative_error: f64,

    /// The budget is split as if at least this many randomized calls have
    /// already succeeded, keeping early allowances conservative.
    pub opportunity_floor: u64,

    /// Seed for randomized witnesses. `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            max_cumulative_error: DEFAULT_MAX_CUMULATIVE_ERROR,
            opportunity_floor: DEFAULT_OPPORTUNITY_FLOOR,
            seed: None,
        }
    }
}

impl OracleConfig {
    pub fn with_max_cumulative_error(max_cumulative_error: f64) -> Self {
        Self {
            max_cumulative_error,
            ..Self::default()
        }
    }

    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| OracleError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| OracleError::ParseToml {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values under which the budget bound is meaningless.
    pub fn validate(&self) -> Result<(), OracleError> {
        let max = self.max_cumulative_error;
        if !max.is_finite() || max <= 0.0 || max > 1.0 {
            return Err(OracleError::InvalidConfig(format!(
                "max_cumulative_error must be in (0, 1], got {max}"
            )));
        }
        if self.opportunity_floor == 0 {
            return Err(OracleError::InvalidConfig(
                "opportunity_floor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OracleConfig::default();
        assert_eq!(config.max_cumulative_error, 1e-12);
        assert_eq!(config.opportunity_floor, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_ceiling() {
        for bad in [0.0, -1e-9, 1.5, f64::NAN, f64::INFINITY] {
            let config = OracleConfig::with_max_cumulative_error(bad);
            assert!(
                matches!(config.validate(), Err(OracleError::InvalidConfig(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn rejects_zero_floor() {
        let config = OracleConfig {
            opportunity_floor: 0,
            ..OracleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(OracleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parses_partial_toml() {
        let config: OracleConfig = toml::from_str("seed = 7\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_cumulative_error, DEFAULT_MAX_CUMULATIVE_ERROR);
        assert_eq!(config.opportunity_floor, DEFAULT_OPPORTUNITY_FLOOR);
    }

    #[test]
    fn rejects_unknown_keys() {
        let parsed: Result<OracleConfig, _> = toml::from_str("max_error = 1e-6\n");
        assert!(parsed.is_err());
    }
}
