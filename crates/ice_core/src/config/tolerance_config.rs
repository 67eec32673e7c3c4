//! Tolerance Configuration

use serde::{Deserialize, Serialize};

/// How far two independent measurements may drift before a check fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Snapshot TOI vs shift-log TOI, inclusive (default: 5)
    pub toi_tolerance_seconds: u32,
    /// Derived TOI vs secondary report TOI, inclusive (default: 10)
    pub shift_tolerance_seconds: u32,
    /// Max distance between an event and its snapshot second (default: 2)
    pub event_attribution_fuzzy_window_seconds: u32,
    /// Clock drift allowed when pairing cross-source events (default: 1)
    pub cross_source_time_tolerance_seconds: u32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            toi_tolerance_seconds: 5,
            shift_tolerance_seconds: 10,
            event_attribution_fuzzy_window_seconds: 2,
            cross_source_time_tolerance_seconds: 1,
        }
    }
}
