//! Derived time-on-ice entities. Computed per call, never persisted here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::event::Zone;
use super::snapshot::{GameId, PlayerId, Role, SeasonId, TeamId};

/// Seconds per situation code, e.g. {"5v5": 35, "5v4": 11}.
pub type SituationBreakdown = BTreeMap<String, u32>;

/// A maximal run of on-ice seconds with no gap larger than one second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Player on the ice
    pub player_id: PlayerId,
    /// Game the shift was played in
    pub game_id: GameId,
    /// Season of the game
    pub season_id: SeasonId,
    /// Team the player was on
    pub team_id: TeamId,
    /// Skater or goalie
    pub role: Role,
    /// 1-based, in start_second order per (player, game)
    pub shift_number: u32,
    /// Period of the first second
    pub period: u8,
    /// First game second on the ice
    pub start_second: u32,
    /// Last game second on the ice, inclusive
    pub end_second: u32,
    /// Counted seconds in the shift
    pub toi_seconds: u32,
    /// toi_seconds split by situation code
    pub situations: SituationBreakdown,
}

/// One player's TOI within one period of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAggregation {
    /// Player the totals belong to
    pub player_id: PlayerId,
    /// Game the period belongs to
    pub game_id: GameId,
    /// Period number, 1-based
    pub period: u8,
    /// Seconds on the ice in the period
    pub toi_seconds: u32,
    /// Distinct shifts touching the period
    pub shift_count: u32,
    /// toi_seconds split by situation code
    pub situations: SituationBreakdown,
}

/// One player's TOI over one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAggregation {
    /// Player the totals belong to
    pub player_id: PlayerId,
    /// Game aggregated
    pub game_id: GameId,
    /// Season of the game
    pub season_id: SeasonId,
    /// Team the player dressed for
    pub team_id: TeamId,
    /// Seconds on the ice in the game
    pub toi_seconds: u32,
    /// Distinct shifts in the game
    pub shift_count: u32,
    /// toi_seconds split by situation code
    pub situations: SituationBreakdown,
}

/// One player's TOI over one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAggregation {
    /// Player the totals belong to
    pub player_id: PlayerId,
    /// Season aggregated
    pub season_id: SeasonId,
    /// Seconds on the ice across all games
    pub toi_seconds: u32,
    /// Shifts across all games
    pub shift_count: u32,
    /// Distinct games played
    pub game_count: u32,
    /// toi_seconds / game_count, 0 when no games
    pub avg_toi_per_game: f64,
    /// toi_seconds split by situation code
    pub situations: SituationBreakdown,
}

/// A same-team on-ice set and how long it was together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCombination {
    /// Team the set skated for
    pub team_id: TeamId,
    /// Skater ids, sorted ascending
    pub player_ids: Vec<PlayerId>,
    /// Seconds this exact set was on the ice
    pub toi_together: u32,
    /// Distinct games the set appeared in
    pub game_count: u32,
    /// toi_together split by situation code
    pub situations: SituationBreakdown,
}

/// Whether a pair shared a side or faced each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupType {
    Teammate,
    Opponent,
}

/// Shared ice time of a skater pair in one relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    /// Player the query was made for (home player in game summaries)
    pub player1_id: PlayerId,
    /// The other player of the pair
    pub player2_id: PlayerId,
    /// Teammate or opponent
    pub matchup_type: MatchupType,
    /// Seconds both were on the ice as skaters
    pub toi_seconds: u32,
    /// Distinct games the pair shared ice in
    pub game_count: u32,
    /// toi_seconds split by situation code
    pub situations: SituationBreakdown,
    /// Zone filter applied, `None` for all-zone matchups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
}

/// Add `seconds` to the `code` bucket.
#[inline]
pub(crate) fn bump(breakdown: &mut SituationBreakdown, code: &str, seconds: u32) {
    if let Some(total) = breakdown.get_mut(code) {
        *total += seconds;
    } else {
        breakdown.insert(code.to_string(), seconds);
    }
}

/// Fold `other` into `into`.
pub(crate) fn merge(into: &mut SituationBreakdown, other: &SituationBreakdown) {
    for (code, seconds) in other {
        bump(into, code, *seconds);
    }
}
