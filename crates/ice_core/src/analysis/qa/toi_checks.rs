//! Time-on-ice cross-checks against the shift log and the secondary report.

use fxhash::FxHashMap;
use serde_json::json;

use super::result::{Severity, ValidationResult, ValidationSource};
use crate::models::{GameAggregation, PlayerId, SecondaryReport, ShiftTotal};

pub const RULE_SHIFT_TOI: &str = "shift_toi";
pub const RULE_HTML_TOI: &str = "html_report_toi";
pub const RULE_HTML_AVAILABLE: &str = "html_report_available";
pub const RULE_SHIFT_COUNT: &str = "shift_count";

fn derived_toi(derived: &[GameAggregation]) -> FxHashMap<PlayerId, u32> {
    let mut map: FxHashMap<PlayerId, u32> = FxHashMap::default();
    for agg in derived {
        *map.entry(agg.player_id).or_default() += agg.toi_seconds;
    }
    map
}

/// Per shift-log player, derived TOI vs logged TOI. A player the snapshots
/// never saw counts as zero derived seconds.
pub fn validate_shift_totals(
    derived: &[GameAggregation],
    totals: &[ShiftTotal],
    tolerance_seconds: u32,
) -> Vec<ValidationResult> {
    let toi = derived_toi(derived);

    let mut totals: Vec<&ShiftTotal> = totals.iter().collect();
    totals.sort_by_key(|t| t.player_id);

    totals
        .into_iter()
        .map(|total| {
            let snapshot_toi = toi.get(&total.player_id).copied().unwrap_or(0);
            let difference = snapshot_toi as i64 - total.total_seconds as i64;
            let passed = difference.unsigned_abs() <= tolerance_seconds as u64;

            ValidationResult::check(
                RULE_SHIFT_TOI,
                ValidationSource::ShiftLog,
                passed,
                Severity::Warning,
                format!(
                    "derived={}s, shift_log={}s (diff={:+}, tol={})",
                    snapshot_toi, total.total_seconds, difference, tolerance_seconds
                ),
            )
            .with_entity(total.player_id)
            .with_details(json!({
                "team_id": total.team_id,
                "snapshot_toi": snapshot_toi,
                "shift_log_toi": total.total_seconds,
                "difference": difference,
                "tolerance": tolerance_seconds,
            }))
        })
        .collect()
}

/// Derived TOI vs the secondary report, players matched by id. Players
/// present on only one side are skipped.
pub fn compare_to_html_reports(
    derived: &[GameAggregation],
    report: Option<&SecondaryReport>,
    shift_tolerance_seconds: u32,
) -> Vec<ValidationResult> {
    let Some(report) = report else {
        return vec![ValidationResult::fail(
            RULE_HTML_AVAILABLE,
            ValidationSource::HtmlReport,
            Severity::Info,
            "secondary report not available",
        )];
    };

    let toi = derived_toi(derived);
    let mut players: Vec<_> = report.players.iter().collect();
    players.sort_by_key(|p| p.player_id);

    players
        .into_iter()
        .filter_map(|player| {
            let snapshot_toi = *toi.get(&player.player_id)?;
            let difference = snapshot_toi as i64 - player.toi_seconds as i64;
            let passed = difference.unsigned_abs() <= shift_tolerance_seconds as u64;

            Some(
                ValidationResult::check(
                    RULE_HTML_TOI,
                    ValidationSource::HtmlReport,
                    passed,
                    Severity::Warning,
                    format!(
                        "derived={}s, report={}s (diff={:+}, tol={})",
                        snapshot_toi, player.toi_seconds, difference, shift_tolerance_seconds
                    ),
                )
                .with_entity(player.player_id)
                .with_details(json!({
                    "snapshot_toi": snapshot_toi,
                    "report_toi": player.toi_seconds,
                    "difference": difference,
                    "tolerance": shift_tolerance_seconds,
                })),
            )
        })
        .collect()
}

/// Shift counts of the official log vs the secondary report.
pub fn compare_shift_counts(totals: &[ShiftTotal], report: &SecondaryReport) -> Vec<ValidationResult> {
    let logged: FxHashMap<PlayerId, u32> =
        totals.iter().map(|t| (t.player_id, t.shift_count)).collect();

    let mut players: Vec<_> = report.players.iter().collect();
    players.sort_by_key(|p| p.player_id);

    players
        .into_iter()
        .filter_map(|player| {
            let log_count = *logged.get(&player.player_id)?;
            Some(
                ValidationResult::check(
                    RULE_SHIFT_COUNT,
                    ValidationSource::HtmlReport,
                    log_count == player.shift_count,
                    Severity::Warning,
                    format!("shift_log={}, report={}", log_count, player.shift_count),
                )
                .with_entity(player.player_id)
                .with_details(json!({
                    "shift_log_count": log_count,
                    "report_count": player.shift_count,
                })),
            )
        })
        .collect()
}
