//! # Analysis Configuration
//!
//! Every tunable used by aggregation, attribution and validation, all
//! defaulted. Loading from files or flags is the embedding application's job.
//!
//! ```rust
//! use ice_core::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! let strict = AnalysisConfig::strict();
//! assert!(strict.tolerances.toi_tolerance_seconds < config.tolerances.toi_tolerance_seconds);
//! ```

mod grouping_config;
mod tolerance_config;

pub use grouping_config::GroupingConfig;
pub use tolerance_config::ToleranceConfig;

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub tolerances: ToleranceConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
}

impl AnalysisConfig {
    /// Exact agreement expected between sources.
    pub fn strict() -> Self {
        let mut cfg = Self::default();
        cfg.tolerances.toi_tolerance_seconds = 1;
        cfg.tolerances.shift_tolerance_seconds = 3;
        cfg.tolerances.event_attribution_fuzzy_window_seconds = 0;
        cfg.tolerances.cross_source_time_tolerance_seconds = 0;
        cfg
    }

    /// Noisy upstream feeds (older seasons, partial reports).
    pub fn lenient() -> Self {
        let mut cfg = Self::default();
        cfg.tolerances.toi_tolerance_seconds = 15;
        cfg.tolerances.shift_tolerance_seconds = 30;
        cfg.tolerances.event_attribution_fuzzy_window_seconds = 5;
        cfg.tolerances.cross_source_time_tolerance_seconds = 3;
        cfg.grouping.min_matchup_toi_seconds = 30;
        cfg
    }

    /// Parse a (possibly partial) JSON object over the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::malformed("config", e.to_string()))
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.tolerances.event_attribution_fuzzy_window_seconds, 2);
        assert_eq!(cfg.grouping.min_line_combination_players, 3);
        assert_eq!(cfg.grouping.max_line_combination_players, 5);
        assert_eq!(cfg.grouping.min_matchup_toi_seconds, 60);
        assert_eq!(cfg.grouping.period_length_seconds, 1200);
    }

    #[test]
    fn test_presets_are_ordered() {
        let strict = AnalysisConfig::strict();
        let default = AnalysisConfig::default();
        let lenient = AnalysisConfig::lenient();

        assert!(strict.tolerances.toi_tolerance_seconds < default.tolerances.toi_tolerance_seconds);
        assert!(lenient.tolerances.toi_tolerance_seconds > default.tolerances.toi_tolerance_seconds);
        assert!(
            lenient.tolerances.event_attribution_fuzzy_window_seconds
                > strict.tolerances.event_attribution_fuzzy_window_seconds
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = AnalysisConfig::from_json_str(r#"{"tolerances": {"toi_tolerance_seconds": 9}}"#)
            .unwrap();
        assert_eq!(cfg.tolerances.toi_tolerance_seconds, 9);
        assert_eq!(cfg.tolerances.shift_tolerance_seconds, 10);
        assert_eq!(cfg.grouping, GroupingConfig::default());
    }

    #[test]
    fn test_bad_json_is_malformed_input() {
        let err = AnalysisConfig::from_json_str("{not json").unwrap_err();
        assert!(err.is_recoverable());
    }
}
