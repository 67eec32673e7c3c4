//! Fuzzy event-to-snapshot attribution.
//!
//! ## Algorithm
//! For each event, scan snapshot seconds in
//! `[game_second - window, game_second + window]` and keep the one with the
//! smallest absolute offset. Candidates are visited in ascending order and
//! only a strictly smaller offset replaces the best, so ties resolve to the
//! earlier second.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::models::{Event, EventAttribution, GoaliePair, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionOutcome {
    pub attributions: Vec<EventAttribution>,
    /// One `NoMatchingSnapshot` entry per event left unattributed
    pub unattributed: Vec<Diagnostic>,
}

impl AttributionOutcome {
    pub fn exact_count(&self) -> usize {
        self.attributions.iter().filter(|a| a.is_exact).count()
    }
}

/// Pin each event to its nearest snapshot second within `fuzzy_window`.
pub fn attribute_to_snapshots(
    events: &[Event],
    snapshot_seconds: &BTreeSet<u32>,
    fuzzy_window: u32,
) -> AttributionOutcome {
    let mut outcome = AttributionOutcome::default();

    for event in events {
        let target = event.game_second;
        let lo = target.saturating_sub(fuzzy_window);
        let hi = target.saturating_add(fuzzy_window);

        let mut best: Option<(u32, u32)> = None; // (distance, second)
        for &second in snapshot_seconds.range(lo..=hi) {
            let distance = second.abs_diff(target);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, second));
            }
        }

        match best {
            Some((_, second)) => {
                let offset = second as i64 - target as i64;
                outcome.attributions.push(EventAttribution {
                    event: event.clone(),
                    snapshot_second: second,
                    offset: offset as i32,
                    is_exact: offset == 0,
                });
            }
            None => {
                warn!(event_id = event.event_id, game_second = target, "no matching snapshot");
                outcome.unattributed.push(Diagnostic::new(
                    DiagnosticKind::NoMatchingSnapshot,
                    event.event_id.to_string(),
                    format!(
                        "no matching snapshot within ±{}s of game second {} ({} event)",
                        fuzzy_window, target, event.event_type
                    ),
                ));
            }
        }
    }

    outcome
}

/// Defending goalie per game second, from shot-attempt events.
///
/// A shot by the home team is stopped by the away goalie and vice versa.
/// Events without a goalie or an owning team are ignored.
pub fn goalie_map(
    events: &[Event],
    home_team_id: TeamId,
    away_team_id: TeamId,
) -> BTreeMap<u32, GoaliePair> {
    let mut map: BTreeMap<u32, GoaliePair> = BTreeMap::new();

    for event in events.iter().filter(|e| e.event_type.is_shot_attempt()) {
        let (Some(goalie), Some(team)) = (event.goalie_id, event.team_id) else {
            continue;
        };
        let entry = map.entry(event.game_second).or_default();
        if team == home_team_id {
            entry.away_goalie_id = Some(goalie);
        } else if team == away_team_id {
            entry.home_goalie_id = Some(goalie);
        }
    }

    map.retain(|_, pair| pair.home_goalie_id.is_some() || pair.away_goalie_id.is_some());
    map
}

/// Snapshot seconds carrying a stoppage-class event.
pub fn stoppage_seconds(attributions: &[EventAttribution]) -> BTreeSet<u32> {
    attributions
        .iter()
        .filter(|a| a.event.event_type.is_stoppage())
        .map(|a| a.snapshot_second)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;

    fn event(id: u64, event_type: &str, second: u32) -> Event {
        Event {
            event_id: id,
            game_id: 1,
            event_type: EventType::from(event_type),
            period: 1,
            period_second: second,
            game_second: second,
            team_id: None,
            players: vec![],
            goalie_id: None,
            zone: None,
        }
    }

    fn shot(id: u64, event_type: &str, second: u32, team: u32, goalie: u32) -> Event {
        Event { team_id: Some(team), goalie_id: Some(goalie), ..event(id, event_type, second) }
    }

    fn seconds(list: &[u32]) -> BTreeSet<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_exact_match() {
        let out = attribute_to_snapshots(&[event(1, "hit", 90)], &seconds(&[88, 90, 91]), 2);
        assert_eq!(out.attributions.len(), 1);
        let a = &out.attributions[0];
        assert_eq!((a.snapshot_second, a.offset, a.is_exact), (90, 0, true));
        assert_eq!(out.exact_count(), 1);
    }

    #[test]
    fn test_fuzzy_match() {
        let out = attribute_to_snapshots(&[event(1, "hit", 90)], &seconds(&[91, 100]), 2);
        let a = &out.attributions[0];
        assert_eq!((a.snapshot_second, a.offset, a.is_exact), (91, 1, false));
    }

    #[test]
    fn test_fuzzy_match_before_event_has_negative_offset() {
        let out = attribute_to_snapshots(&[event(1, "hit", 90)], &seconds(&[88]), 2);
        assert_eq!(out.attributions[0].offset, -2);
    }

    #[test]
    fn test_outside_window_is_unattributed() {
        let out = attribute_to_snapshots(&[event(7, "hit", 90)], &seconds(&[100]), 2);
        assert!(out.attributions.is_empty());
        assert_eq!(out.unattributed.len(), 1);
        assert_eq!(out.unattributed[0].kind, DiagnosticKind::NoMatchingSnapshot);
        assert_eq!(out.unattributed[0].entity_id, "7");
        assert!(out.unattributed[0].message.contains("no matching snapshot"));
    }

    #[test]
    fn test_tie_prefers_earlier_second() {
        let out = attribute_to_snapshots(&[event(1, "hit", 90)], &seconds(&[89, 91]), 2);
        assert_eq!(out.attributions[0].snapshot_second, 89);
        assert_eq!(out.attributions[0].offset, -1);
    }

    #[test]
    fn test_window_near_zero() {
        let out = attribute_to_snapshots(&[event(1, "period-start", 0)], &seconds(&[1]), 2);
        assert_eq!(out.attributions[0].snapshot_second, 1);
    }

    #[test]
    fn test_zero_window_requires_exact() {
        let out = attribute_to_snapshots(&[event(1, "hit", 90)], &seconds(&[91]), 0);
        assert!(out.attributions.is_empty());
    }

    #[test]
    fn test_goalie_map() {
        let events = vec![
            shot(1, "shot-on-goal", 100, 10, 31),
            shot(2, "missed-shot", 100, 6, 30),
            shot(3, "goal", 250, 6, 30),
            shot(4, "hit", 300, 10, 31),
            event(5, "blocked-shot", 400),
        ];
        let map = goalie_map(&events, 10, 6);

        assert_eq!(map.len(), 2);
        assert_eq!(map[&100], GoaliePair { home_goalie_id: Some(30), away_goalie_id: Some(31) });
        assert_eq!(map[&250], GoaliePair { home_goalie_id: Some(30), away_goalie_id: None });
    }

    #[test]
    fn test_goalie_map_unknown_team_ignored() {
        let map = goalie_map(&[shot(1, "shot-on-goal", 5, 99, 31)], 10, 6);
        assert!(map.is_empty());
    }

    #[test]
    fn test_stoppage_seconds() {
        let events = vec![
            event(1, "faceoff", 10),
            event(2, "stoppage", 55),
            event(3, "tv-timeout", 56),
            event(4, "period-end", 1200),
            event(5, "goal", 700),
        ];
        let snaps = seconds(&[10, 54, 56, 700, 1199]);
        let out = attribute_to_snapshots(&events, &snaps, 2);
        assert_eq!(stoppage_seconds(&out.attributions), seconds(&[54, 56, 1199]));
    }
}
