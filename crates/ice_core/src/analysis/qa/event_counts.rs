//! Play-by-play event counts vs box score totals.
//!
//! Goal totals are critical (ERROR); shots, hits and blocks carry scorer
//! ambiguity upstream and fail as WARNING.

use serde_json::json;
use tracing::warn;

use super::result::{Severity, ValidationResult, ValidationSource};
use crate::error::{CoreError, Diagnostic};
use crate::gateway::TeamLookup;
use crate::models::{Event, EventType, TeamBoxTotals, TeamId};

pub const RULE_GOALS: &str = "event_count_goals";
pub const RULE_SHOTS: &str = "event_count_shots";
pub const RULE_HITS: &str = "event_count_hits";
pub const RULE_BLOCKS: &str = "event_count_blocks";

/// Counts derived from events for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamEventCounts {
    pub goals: u32,
    /// Shots on goal plus goals
    pub shots: u32,
    pub hits: u32,
    pub blocks: u32,
}

impl TeamEventCounts {
    pub fn from_events(events: &[Event], team_id: TeamId) -> Self {
        let mut counts = Self::default();
        for event in events.iter().filter(|e| e.team_id == Some(team_id)) {
            if event.event_type.is_goal() {
                counts.goals += 1;
            }
            if event.event_type.is_shot() {
                counts.shots += 1;
            }
            match event.event_type {
                EventType::Hit => counts.hits += 1,
                EventType::BlockedShot => counts.blocks += 1,
                _ => {}
            }
        }
        counts
    }
}

fn count_check(
    rule_name: &str,
    severity: Severity,
    abbrev: &str,
    derived: u32,
    official: u32,
) -> ValidationResult {
    let difference = derived as i64 - official as i64;
    ValidationResult::check(
        rule_name,
        ValidationSource::BoxScore,
        difference == 0,
        severity,
        format!("events={}, box_score={} (diff={:+})", derived, official, difference),
    )
    .with_entity(abbrev)
    .with_details(json!({
        "derived": derived,
        "box_score": official,
        "difference": difference,
    }))
}

/// Per-team goals, shots, hits and blocks. Missing box totals emit nothing;
/// an unknown team abbreviation is skipped with a diagnostic.
pub fn validate_event_counts(
    events: &[Event],
    box_totals: Option<&[TeamBoxTotals]>,
    teams: &dyn TeamLookup,
) -> (Vec<ValidationResult>, Vec<Diagnostic>) {
    let mut results = Vec::new();
    let mut diagnostics = Vec::new();

    let Some(box_totals) = box_totals else {
        return (results, diagnostics);
    };

    for line in box_totals {
        let Some(team_id) = teams.team_id(&line.team_abbrev) else {
            warn!(team = %line.team_abbrev, "unknown team abbreviation in box score");
            let err = CoreError::malformed("box score", format!("unknown team '{}'", line.team_abbrev));
            diagnostics.push(Diagnostic::from_error(line.team_abbrev.clone(), &err));
            continue;
        };

        let derived = TeamEventCounts::from_events(events, team_id);
        let abbrev = line.team_abbrev.as_str();
        results.push(count_check(RULE_GOALS, Severity::Error, abbrev, derived.goals, line.goals));
        results.push(count_check(RULE_SHOTS, Severity::Warning, abbrev, derived.shots, line.shots));
        results.push(count_check(RULE_HITS, Severity::Warning, abbrev, derived.hits, line.hits));
        results.push(count_check(RULE_BLOCKS, Severity::Warning, abbrev, derived.blocks, line.blocks));
    }

    (results, diagnostics)
}
