//! Position-wise pairing of event lists reported by two sources.
//!
//! Both lists are sorted by (period, time) and zipped; the shorter list
//! bounds the pairing. Entries sharing a timestamp are tie-broken by
//! normalized name so simultaneous events pair the same way regardless of
//! source order. A length difference is reported separately as INFO.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::names::normalize_name;
use super::result::{Severity, ValidationResult, ValidationSource};
use crate::models::{CrossSourceEvents, Event, EventRole, EventType, TimedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSourceKind {
    Goals,
    Assists,
    Penalties,
    Shots,
    Faceoffs,
}

impl CrossSourceKind {
    pub const ALL: [CrossSourceKind; 5] = [
        CrossSourceKind::Goals,
        CrossSourceKind::Assists,
        CrossSourceKind::Penalties,
        CrossSourceKind::Shots,
        CrossSourceKind::Faceoffs,
    ];

    pub fn rule_name(self) -> &'static str {
        match self {
            CrossSourceKind::Goals => "cross_source_goals",
            CrossSourceKind::Assists => "cross_source_assists",
            CrossSourceKind::Penalties => "cross_source_penalties",
            CrossSourceKind::Shots => "cross_source_shots",
            CrossSourceKind::Faceoffs => "cross_source_faceoffs",
        }
    }

    pub fn count_rule_name(self) -> &'static str {
        match self {
            CrossSourceKind::Goals => "cross_source_goals_count",
            CrossSourceKind::Assists => "cross_source_assists_count",
            CrossSourceKind::Penalties => "cross_source_penalties_count",
            CrossSourceKind::Shots => "cross_source_shots_count",
            CrossSourceKind::Faceoffs => "cross_source_faceoffs_count",
        }
    }
}

impl CrossSourceEvents {
    pub fn entries(&self, kind: CrossSourceKind) -> &[TimedEntry] {
        match kind {
            CrossSourceKind::Goals => &self.goals,
            CrossSourceKind::Assists => &self.assists,
            CrossSourceKind::Penalties => &self.penalties,
            CrossSourceKind::Shots => &self.shots,
            CrossSourceKind::Faceoffs => &self.faceoffs,
        }
    }

    /// Lists as play-by-play tells them. Players without a name are left out.
    pub fn from_events(events: &[Event]) -> Self {
        let mut out = Self::default();

        for event in events {
            let entry = |role: EventRole| {
                event.players_with(role).filter_map(move |p| {
                    p.name.as_deref().map(|name| TimedEntry::new(event.period, event.period_second, name))
                })
            };

            match event.event_type {
                EventType::Goal => {
                    out.goals.extend(entry(EventRole::Scorer));
                    out.assists.extend(entry(EventRole::Assist));
                    out.shots.extend(entry(EventRole::Scorer));
                }
                EventType::ShotOnGoal => out.shots.extend(entry(EventRole::Shooter)),
                EventType::Penalty => out.penalties.extend(entry(EventRole::CommittedBy)),
                EventType::Faceoff => out.faceoffs.extend(entry(EventRole::Winner)),
                _ => {}
            }
        }
        out
    }
}

/// Order by (period, time); normalized name only breaks same-timestamp ties.
fn sorted(entries: &[TimedEntry]) -> Vec<(&TimedEntry, String)> {
    let mut keyed: Vec<(&TimedEntry, String)> =
        entries.iter().map(|e| (e, normalize_name(&e.player_name))).collect();
    keyed.sort_by(|(a, an), (b, bn)| {
        (a.period, a.time_seconds, an).cmp(&(b.period, b.time_seconds, bn))
    });
    keyed
}

/// Pair `derived` with `reported` position by position.
pub fn compare_timed_entries(
    kind: CrossSourceKind,
    derived: &[TimedEntry],
    reported: &[TimedEntry],
    time_tolerance_seconds: u32,
) -> Vec<ValidationResult> {
    let left = sorted(derived);
    let right = sorted(reported);
    let mut results = Vec::new();

    for (index, ((a, a_name), (b, b_name))) in left.iter().zip(right.iter()).enumerate() {
        let period_ok = a.period == b.period;
        let time_diff = a.time_seconds.abs_diff(b.time_seconds);
        let time_ok = time_diff <= time_tolerance_seconds;
        let name_ok = a_name == b_name;

        let mut failed = Vec::new();
        if !period_ok {
            failed.push("period");
        }
        if !time_ok {
            failed.push("time");
        }
        if !name_ok {
            failed.push("player");
        }

        let message = if failed.is_empty() {
            format!("P{} {}s {}", a.period, a.time_seconds, a.player_name)
        } else {
            format!(
                "{} mismatch: P{} {}s {} vs P{} {}s {}",
                failed.join("/"),
                a.period,
                a.time_seconds,
                a.player_name,
                b.period,
                b.time_seconds,
                b.player_name
            )
        };

        results.push(
            ValidationResult::check(
                kind.rule_name(),
                ValidationSource::HtmlReport,
                failed.is_empty(),
                Severity::Warning,
                message,
            )
            .with_entity(index)
            .with_details(json!({
                "period_match": period_ok,
                "time_difference": time_diff,
                "player_match": name_ok,
            })),
        );
    }

    if left.len() != right.len() {
        results.push(
            ValidationResult::fail(
                kind.count_rule_name(),
                ValidationSource::HtmlReport,
                Severity::Info,
                format!("derived={}, report={}", left.len(), right.len()),
            )
            .with_details(json!({ "derived": left.len(), "report": right.len() })),
        );
    }

    results
}

/// Every list kind, in `CrossSourceKind::ALL` order.
pub fn compare_cross_source_events(
    derived: &CrossSourceEvents,
    reported: &CrossSourceEvents,
    time_tolerance_seconds: u32,
) -> Vec<ValidationResult> {
    CrossSourceKind::ALL
        .iter()
        .flat_map(|&kind| {
            compare_timed_entries(kind, derived.entries(kind), reported.entries(kind), time_tolerance_seconds)
        })
        .collect()
}
