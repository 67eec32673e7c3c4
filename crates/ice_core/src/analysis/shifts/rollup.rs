//! Period, game and season rollups.
//!
//! TOI is summed; shift_count is the number of distinct shifts, never a sum
//! of per-situation rows.

use fxhash::{FxHashMap, FxHashSet};

use super::segment::NumberedSecond;
use crate::models::aggregates::{bump, merge};
use crate::models::{
    GameAggregation, GameId, PeriodAggregation, PlayerId, SeasonAggregation, SeasonId, Shift,
    SituationBreakdown,
};

pub(crate) fn period_aggregations(seconds: &[NumberedSecond<'_>]) -> Vec<PeriodAggregation> {
    #[derive(Default)]
    struct Acc {
        toi: u32,
        shifts: FxHashSet<u32>,
        situations: SituationBreakdown,
    }

    let mut acc: FxHashMap<(GameId, PlayerId, u8), Acc> = FxHashMap::default();
    for s in seconds {
        let c = &s.contribution;
        let entry = acc.entry((c.game_id, c.player_id, c.period)).or_default();
        entry.toi += 1;
        entry.shifts.insert(s.shift_number);
        bump(&mut entry.situations, c.situation, 1);
    }

    let mut out: Vec<PeriodAggregation> = acc
        .into_iter()
        .map(|((game_id, player_id, period), a)| PeriodAggregation {
            player_id,
            game_id,
            period,
            toi_seconds: a.toi,
            shift_count: a.shifts.len() as u32,
            situations: a.situations,
        })
        .collect();
    out.sort_by_key(|p| (p.game_id, p.player_id, p.period));
    out
}

pub(crate) fn game_aggregations(shifts: &[Shift]) -> Vec<GameAggregation> {
    let mut acc: FxHashMap<(GameId, PlayerId), GameAggregation> = FxHashMap::default();
    for shift in shifts {
        let entry = acc.entry((shift.game_id, shift.player_id)).or_insert_with(|| GameAggregation {
            player_id: shift.player_id,
            game_id: shift.game_id,
            season_id: shift.season_id,
            team_id: shift.team_id,
            toi_seconds: 0,
            shift_count: 0,
            situations: SituationBreakdown::new(),
        });
        entry.toi_seconds += shift.toi_seconds;
        entry.shift_count += 1;
        merge(&mut entry.situations, &shift.situations);
    }

    let mut out: Vec<GameAggregation> = acc.into_values().collect();
    out.sort_by_key(|g| (g.game_id, g.player_id));
    out
}

pub(crate) fn season_aggregations(games: &[GameAggregation]) -> Vec<SeasonAggregation> {
    #[derive(Default)]
    struct Acc {
        toi: u32,
        shifts: u32,
        games: FxHashSet<GameId>,
        situations: SituationBreakdown,
    }

    let mut acc: FxHashMap<(SeasonId, PlayerId), Acc> = FxHashMap::default();
    for game in games {
        let entry = acc.entry((game.season_id, game.player_id)).or_default();
        entry.toi += game.toi_seconds;
        entry.shifts += game.shift_count;
        entry.games.insert(game.game_id);
        merge(&mut entry.situations, &game.situations);
    }

    let mut out: Vec<SeasonAggregation> = acc
        .into_iter()
        .map(|((season_id, player_id), a)| {
            let game_count = a.games.len() as u32;
            let avg_toi_per_game = if game_count > 0 {
                a.toi as f64 / game_count as f64
            } else {
                0.0
            };
            SeasonAggregation {
                player_id,
                season_id,
                toi_seconds: a.toi,
                shift_count: a.shifts,
                game_count,
                avg_toi_per_game,
                situations: a.situations,
            }
        })
        .collect();
    out.sort_by_key(|s| (s.season_id, s.player_id));
    out
}
