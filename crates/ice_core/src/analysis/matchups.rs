//! # Matchup Analyzer
//!
//! Shared ice time between skater pairs: teammates share a side, opponents
//! sit on opposite sides. Goalies are not part of matchups; their presence
//! is near-constant and would swamp every ranking.
//!
//! Zone matchups only count seconds that an event in the requested zone was
//! attributed to, using the same fuzzy second correlation as
//! [`crate::analysis::events`].

use fxhash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::analysis::events::attribute_to_snapshots;
use crate::config::{AnalysisConfig, GroupingConfig};
use crate::error::{CoreError, Result};
use crate::gateway::SnapshotSource;
use crate::models::aggregates::bump;
use crate::models::{
    Event, GameId, Matchup, MatchupType, PlayerId, SituationBreakdown, Snapshot,
    SnapshotFilter, Zone,
};

/// Co-occurrence of two players in one relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedIce {
    pub toi_seconds: u32,
    pub game_count: u32,
    pub situations: SituationBreakdown,
}

/// Both relationships for a pair. A traded player can have both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceTimeTogether {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub teammate: SharedIce,
    pub opponent: SharedIce,
}

impl IceTimeTogether {
    pub fn total_seconds(&self) -> u32 {
        self.teammate.toi_seconds + self.opponent.toi_seconds
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMatchups {
    pub player_id: PlayerId,
    pub teammates: Vec<Matchup>,
    pub opponents: Vec<Matchup>,
}

#[derive(Default)]
struct PairAcc {
    toi: u32,
    games: FxHashSet<GameId>,
    situations: SituationBreakdown,
}

impl PairAcc {
    fn add(&mut self, snapshot: &Snapshot) {
        self.toi += 1;
        self.games.insert(snapshot.game_id);
        bump(&mut self.situations, &snapshot.situation_code, 1);
    }

    fn into_shared(self) -> SharedIce {
        SharedIce {
            toi_seconds: self.toi,
            game_count: self.games.len() as u32,
            situations: self.situations,
        }
    }
}

/// Pairwise shared-ice-time queries.
#[derive(Debug, Clone)]
pub struct MatchupAnalyzer {
    filter: SnapshotFilter,
    /// Pairs below this shared TOI are dropped from player matchups
    min_toi_seconds: u32,
    /// Pairs kept by `game_matchup_summary`
    summary_limit: usize,
}

impl Default for MatchupAnalyzer {
    fn default() -> Self {
        let grouping = GroupingConfig::default();
        Self {
            filter: SnapshotFilter::default(),
            min_toi_seconds: grouping.min_matchup_toi_seconds,
            summary_limit: grouping.matchup_summary_limit,
        }
    }
}

impl MatchupAnalyzer {
    /// `filter` restricts rows (game, season, situation, empty net,
    /// stoppage); its player allowlist is not used here.
    pub fn new(filter: SnapshotFilter, min_toi_seconds: u32) -> Self {
        Self { filter, min_toi_seconds, ..Self::default() }
    }

    /// Thresholds from `config.grouping`.
    pub fn from_config(filter: SnapshotFilter, config: &AnalysisConfig) -> Self {
        Self {
            filter,
            min_toi_seconds: config.grouping.min_matchup_toi_seconds,
            summary_limit: config.grouping.matchup_summary_limit,
        }
    }

    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_limit = limit;
        self
    }

    pub fn min_toi_seconds(&self) -> u32 {
        self.min_toi_seconds
    }

    pub fn summary_limit(&self) -> usize {
        self.summary_limit
    }

    /// Seconds both players were on the ice as skaters, split by relationship.
    /// Symmetric in its arguments.
    pub fn ice_time_together(
        &self,
        snapshots: &[Snapshot],
        player1_id: PlayerId,
        player2_id: PlayerId,
    ) -> IceTimeTogether {
        let mut teammate = PairAcc::default();
        let mut opponent = PairAcc::default();

        if player1_id != player2_id {
            for snapshot in snapshots.iter().filter(|s| self.filter.matches_row(s)) {
                let (Some(a), Some(b)) =
                    (snapshot.skater_side(player1_id), snapshot.skater_side(player2_id))
                else {
                    continue;
                };
                if a == b {
                    teammate.add(snapshot);
                } else {
                    opponent.add(snapshot);
                }
            }
        }

        IceTimeTogether {
            player1_id,
            player2_id,
            teammate: teammate.into_shared(),
            opponent: opponent.into_shared(),
        }
    }

    /// Everyone `player_id` shared the ice with, entries below the minimum
    /// TOI dropped, each list ordered by TOI descending.
    pub fn player_matchups(&self, snapshots: &[Snapshot], player_id: PlayerId) -> PlayerMatchups {
        let rows: Vec<&Snapshot> = snapshots.iter().filter(|s| self.filter.matches_row(s)).collect();
        self.collect_matchups(&rows, player_id, None)
    }

    /// Like [`Self::player_matchups`] but only over seconds an event in `zone`
    /// (from `player_id`'s perspective) was attributed to.
    pub fn zone_matchups(
        &self,
        snapshots: &[Snapshot],
        events: &[Event],
        player_id: PlayerId,
        zone: Zone,
        fuzzy_window: u32,
    ) -> PlayerMatchups {
        let rows: FxHashMap<(GameId, u32), &Snapshot> = snapshots
            .iter()
            .filter(|s| self.filter.matches_row(s))
            .map(|s| ((s.game_id, s.game_second), s))
            .collect();

        let mut seconds_by_game: FxHashMap<GameId, BTreeSet<u32>> = FxHashMap::default();
        for (game_id, second) in rows.keys() {
            seconds_by_game.entry(*game_id).or_default().insert(*second);
        }

        let mut zone_rows: BTreeSet<(GameId, u32)> = BTreeSet::new();
        for (game_id, seconds) in &seconds_by_game {
            let game_events: Vec<Event> = events
                .iter()
                .filter(|e| e.game_id == *game_id && e.zone.is_some() && e.team_id.is_some())
                .cloned()
                .collect();
            let outcome = attribute_to_snapshots(&game_events, seconds, fuzzy_window);

            for attribution in &outcome.attributions {
                let Some(snapshot) = rows.get(&(*game_id, attribution.snapshot_second)) else {
                    continue;
                };
                let Some(side) = snapshot.skater_side(player_id) else {
                    continue;
                };
                let (Some(event_zone), Some(event_team)) =
                    (attribution.event.zone, attribution.event.team_id)
                else {
                    continue;
                };
                if event_zone.for_team(event_team, snapshot.team_id(side)) == zone {
                    zone_rows.insert((*game_id, attribution.snapshot_second));
                }
            }
        }

        debug!(player_id, ?zone, seconds = zone_rows.len(), "zone matchup seconds");
        let selected: Vec<&Snapshot> = zone_rows.iter().filter_map(|k| rows.get(k).copied()).collect();
        self.collect_matchups(&selected, player_id, Some(zone))
    }

    /// Top `summary_limit` home-vs-away skater pairs for one game by shared
    /// TOI.
    pub fn game_matchup_summary(
        &self,
        source: &dyn SnapshotSource,
        game_id: GameId,
    ) -> Result<Vec<Matchup>> {
        if !source.contains_game(game_id) {
            return Err(CoreError::game_not_found(game_id));
        }
        let mut filter = self.filter.clone();
        filter.game_ids = Some(BTreeSet::from([game_id]));
        filter.player_ids = None;
        let snapshots = source.snapshots(&filter)?;

        let mut pairs: FxHashMap<(PlayerId, PlayerId), PairAcc> = FxHashMap::default();
        for snapshot in snapshots.iter().filter(|s| filter.matches_row(s)) {
            for &home in &snapshot.home_skater_ids {
                for &away in &snapshot.away_skater_ids {
                    pairs.entry((home, away)).or_default().add(snapshot);
                }
            }
        }

        let mut out: Vec<Matchup> = pairs
            .into_iter()
            .map(|((home, away), acc)| to_matchup(home, away, MatchupType::Opponent, acc, None))
            .collect();
        sort_matchups(&mut out);
        out.truncate(self.summary_limit);
        Ok(out)
    }

    fn collect_matchups(
        &self,
        rows: &[&Snapshot],
        player_id: PlayerId,
        zone: Option<Zone>,
    ) -> PlayerMatchups {
        let mut teammates: FxHashMap<PlayerId, PairAcc> = FxHashMap::default();
        let mut opponents: FxHashMap<PlayerId, PairAcc> = FxHashMap::default();

        for snapshot in rows {
            let Some(side) = snapshot.skater_side(player_id) else {
                continue;
            };
            for &other in snapshot.skaters(side) {
                if other != player_id {
                    teammates.entry(other).or_default().add(snapshot);
                }
            }
            for &other in snapshot.skaters(side.opposite()) {
                opponents.entry(other).or_default().add(snapshot);
            }
        }

        let finish = |acc: FxHashMap<PlayerId, PairAcc>, kind: MatchupType| {
            let mut list: Vec<Matchup> = acc
                .into_iter()
                .filter(|(_, a)| a.toi >= self.min_toi_seconds)
                .map(|(other, a)| to_matchup(player_id, other, kind, a, zone))
                .collect();
            sort_matchups(&mut list);
            list
        };

        PlayerMatchups {
            player_id,
            teammates: finish(teammates, MatchupType::Teammate),
            opponents: finish(opponents, MatchupType::Opponent),
        }
    }
}

fn to_matchup(
    player1_id: PlayerId,
    player2_id: PlayerId,
    matchup_type: MatchupType,
    acc: PairAcc,
    zone: Option<Zone>,
) -> Matchup {
    let shared = acc.into_shared();
    Matchup {
        player1_id,
        player2_id,
        matchup_type,
        toi_seconds: shared.toi_seconds,
        game_count: shared.game_count,
        situations: shared.situations,
        zone,
    }
}

fn sort_matchups(list: &mut [Matchup]) {
    list.sort_by(|a, b| {
        b.toi_seconds
            .cmp(&a.toi_seconds)
            .then(a.player1_id.cmp(&b.player1_id))
            .then(a.player2_id.cmp(&b.player2_id))
    });
}

// ============================================================================
// Tests
// ============================================================================
