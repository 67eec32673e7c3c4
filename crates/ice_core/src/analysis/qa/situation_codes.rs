//! Stored situation code vs the code recomputed from on-ice counts.

use serde_json::json;

use super::result::{Severity, ValidationResult, ValidationSource};
use crate::models::Snapshot;

pub const RULE_SITUATION_CODE: &str = "situation_code";

/// One ERROR per mismatching row, or a single passing summary when every row
/// agrees. No rows, no results.
pub fn validate_situation_codes(snapshots: &[Snapshot]) -> Vec<ValidationResult> {
    let mismatches: Vec<ValidationResult> = snapshots
        .iter()
        .filter_map(|s| {
            let expected = s.expected_situation_code();
            (expected != s.situation_code).then(|| {
                ValidationResult::fail(
                    RULE_SITUATION_CODE,
                    ValidationSource::Snapshots,
                    Severity::Error,
                    format!("stored={}, expected={}", s.situation_code, expected),
                )
                .with_entity(format!("{}:{}", s.game_id, s.game_second))
                .with_details(json!({
                    "stored": s.situation_code,
                    "expected": expected,
                    "home_skaters": s.home_skater_ids.len(),
                    "away_skaters": s.away_skater_ids.len(),
                    "home_empty_net": s.home_empty_net,
                    "away_empty_net": s.away_empty_net,
                }))
            })
        })
        .collect();

    if !mismatches.is_empty() || snapshots.is_empty() {
        return mismatches;
    }

    vec![ValidationResult::pass(
        RULE_SITUATION_CODE,
        ValidationSource::Snapshots,
        format!("{} rows consistent", snapshots.len()),
    )
    .with_details(json!({ "rows": snapshots.len() }))]
}
