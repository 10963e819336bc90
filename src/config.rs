//! Configuration for the qubit reuse analysis.

use crate::error::{ResizeError, ResizeResult};
use serde::{Deserialize, Serialize};

/// Default cap on the number of alternative plans reported.
pub const DEFAULT_PLAN_LIMIT: usize = 1024;

/// Tuning knobs for [`QubitReuseAnalysis`](crate::transpiler::QubitReuseAnalysis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Drop single-qubit gates before building the graphs.
    ///
    /// When disabled, a single-qubit gate reaching the builders is reported
    /// as a malformed gate.
    pub filter_single_qubit_gates: bool,
    /// Maximum number of equally good plans to enumerate.
    pub plan_limit: usize,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            filter_single_qubit_gates: true,
            plan_limit: DEFAULT_PLAN_LIMIT,
        }
    }
}

impl ResizeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the single-qubit gate filter.
    #[must_use]
    pub fn with_single_qubit_filter(mut self, enabled: bool) -> Self {
        self.filter_single_qubit_gates = enabled;
        self
    }

    /// Set the maximum number of plans to enumerate.
    #[must_use]
    pub fn with_plan_limit(mut self, limit: usize) -> Self {
        self.plan_limit = limit;
        self
    }

    /// Loads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(input: &str) -> ResizeResult<Self> {
        let config: Self =
            serde_json::from_str(input).map_err(|e| ResizeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> ResizeResult<()> {
        if self.plan_limit == 0 {
            return Err(ResizeError::Config(
                "plan_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResizeConfig::default();
        assert!(config.filter_single_qubit_gates);
        assert_eq!(config.plan_limit, DEFAULT_PLAN_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ResizeConfig::from_json(r#"{ "plan_limit": 8 }"#).unwrap();
        assert_eq!(config.plan_limit, 8);
        assert!(config.filter_single_qubit_gates);
    }

    #[test]
    fn test_zero_plan_limit_rejected() {
        let err = ResizeConfig::from_json(r#"{ "plan_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ResizeError::Config(_)));
        assert!(ResizeConfig::new().with_plan_limit(0).validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ResizeConfig::from_json("{ plan_limit"),
            Err(ResizeError::Config(_))
        ));
    }
}
