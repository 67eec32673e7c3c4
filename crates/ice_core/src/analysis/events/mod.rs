//! # Event Attribution Module
//!
//! Maps discretely-timed play-by-play events onto the per-second timeline.
//!
//! - `clock` - "MM:SS" parsing, elapsed/remaining conventions, game_second
//! - `classify` - closed goal/shot/penalty/faceoff/stoppage predicates
//! - `attribution` - fuzzy attribution, goalie map, stoppage seconds

pub mod attribution;
pub mod classify;
pub mod clock;

pub use attribution::{attribute_to_snapshots, goalie_map, stoppage_seconds, AttributionOutcome};
pub use clock::{game_second, normalize_events, parse_clock, period_second};

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::Diagnostic;
use crate::models::{
    Event, EventAttribution, GoaliePair, RawEvent, Snapshot, TeamId, TimeConvention,
    REGULATION_PERIOD_SECONDS,
};

/// Attribution bound to one source's clock convention and tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventAttributor {
    pub convention: TimeConvention,
    pub fuzzy_window: u32,
    pub period_length: u32,
}

impl Default for EventAttributor {
    fn default() -> Self {
        Self {
            convention: TimeConvention::Elapsed,
            fuzzy_window: 2,
            period_length: REGULATION_PERIOD_SECONDS,
        }
    }
}

impl EventAttributor {
    pub fn new(convention: TimeConvention, config: &AnalysisConfig) -> Self {
        Self {
            convention,
            fuzzy_window: config.tolerances.event_attribution_fuzzy_window_seconds,
            period_length: config.grouping.period_length_seconds,
        }
    }

    pub fn normalize(&self, raws: Vec<RawEvent>) -> (Vec<Event>, Vec<Diagnostic>) {
        normalize_events(raws, self.convention, self.period_length)
    }

    pub fn attribute(&self, events: &[Event], snapshot_seconds: &BTreeSet<u32>) -> AttributionOutcome {
        let outcome = attribute_to_snapshots(events, snapshot_seconds, self.fuzzy_window);
        debug!(
            events = events.len(),
            attributed = outcome.attributions.len(),
            exact = outcome.exact_count(),
            "attributed events"
        );
        outcome
    }

    /// Attribute against the seconds present in `snapshots` for each event's game.
    pub fn attribute_to_rows(&self, events: &[Event], snapshots: &[Snapshot]) -> AttributionOutcome {
        let mut seconds_by_game: BTreeMap<u64, BTreeSet<u32>> = BTreeMap::new();
        for s in snapshots {
            seconds_by_game.entry(s.game_id).or_default().insert(s.game_second);
        }

        let empty = BTreeSet::new();
        let mut outcome = AttributionOutcome::default();
        for event in events {
            let seconds = seconds_by_game.get(&event.game_id).unwrap_or(&empty);
            let single = self.attribute(std::slice::from_ref(event), seconds);
            outcome.attributions.extend(single.attributions);
            outcome.unattributed.extend(single.unattributed);
        }
        outcome
    }

    pub fn goalie_map(&self, events: &[Event], home_team_id: TeamId, away_team_id: TeamId) -> BTreeMap<u32, GoaliePair> {
        goalie_map(events, home_team_id, away_team_id)
    }

    pub fn stoppage_seconds(&self, attributions: &[EventAttribution]) -> BTreeSet<u32> {
        stoppage_seconds(attributions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;

    fn raw(id: u64, game_id: u64, clock: &str) -> RawEvent {
        RawEvent {
            event_id: id,
            game_id,
            event_type: EventType::Stoppage,
            period: 1,
            time_in_period: clock.to_string(),
            team_id: None,
            players: vec![],
            goalie_id: None,
            zone: None,
        }
    }

    #[test]
    fn test_from_config() {
        let attributor = EventAttributor::new(TimeConvention::Remaining, &AnalysisConfig::lenient());
        assert_eq!(attributor.fuzzy_window, 5);
        assert_eq!(attributor.period_length, 1200);
        assert_eq!(attributor.convention, TimeConvention::Remaining);
    }

    #[test]
    fn test_remaining_convention_pipeline() {
        let attributor = EventAttributor { convention: TimeConvention::Remaining, ..Default::default() };
        let (events, diags) = attributor.normalize(vec![raw(1, 1, "18:30"), raw(2, 1, "xx")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(events[0].game_second, 90);

        let snaps: Vec<Snapshot> = (85..95).map(|s| Snapshot::at(1, s)).collect();
        let outcome = attributor.attribute_to_rows(&events, &snaps);
        assert_eq!(outcome.attributions[0].snapshot_second, 90);
        assert_eq!(attributor.stoppage_seconds(&outcome.attributions), BTreeSet::from([90]));
    }

    #[test]
    fn test_attribute_to_rows_keeps_games_apart() {
        let attributor = EventAttributor::default();
        let (events, _) = attributor.normalize(vec![raw(1, 1, "01:30"), raw(2, 2, "01:30")]);
        let snaps = vec![Snapshot::at(1, 90)];
        let outcome = attributor.attribute_to_rows(&events, &snaps);

        assert_eq!(outcome.attributions.len(), 1);
        assert_eq!(outcome.attributions[0].event.game_id, 1);
        assert_eq!(outcome.unattributed.len(), 1);
        assert_eq!(outcome.unattributed[0].entity_id, "2");
    }
}
