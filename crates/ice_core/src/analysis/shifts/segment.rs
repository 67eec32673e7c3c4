//! # Shift Segmentation
//!
//! ## Algorithm
//! 1. Expand filtered snapshot rows into per-player second contributions
//! 2. Group by (player, game), stable-sort by second, drop duplicate seconds
//! 3. Linear scan: a new shift starts at the first second or whenever
//!    `current - previous > 1`
//! 4. Each second is tallied into its shift's situation breakdown

use fxhash::FxHashMap;

use crate::models::aggregates::bump;
use crate::models::{GameId, PlayerId, Role, SeasonId, Shift, SituationBreakdown, Snapshot, SnapshotFilter, TeamId};

/// One player on the ice for one counted second.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Contribution<'a> {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub role: Role,
    pub game_id: GameId,
    pub season_id: SeasonId,
    pub period: u8,
    pub second: u32,
    pub situation: &'a str,
}

/// A contribution tagged with the shift it landed in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberedSecond<'a> {
    pub contribution: Contribution<'a>,
    pub shift_number: u32,
}

pub(crate) struct Segmentation<'a> {
    pub shifts: Vec<Shift>,
    pub seconds: Vec<NumberedSecond<'a>>,
}

pub(crate) fn collect_contributions<'a>(
    snapshots: &'a [Snapshot],
    filter: &SnapshotFilter,
) -> Vec<Contribution<'a>> {
    let mut out = Vec::new();
    for snapshot in snapshots.iter().filter(|s| filter.matches_row(s)) {
        for on_ice in snapshot.on_ice().filter(|o| filter.matches_player(o.player_id)) {
            out.push(Contribution {
                player_id: on_ice.player_id,
                team_id: on_ice.team_id,
                role: on_ice.role,
                game_id: snapshot.game_id,
                season_id: snapshot.season_id,
                period: snapshot.period,
                second: snapshot.game_second,
                situation: snapshot.situation_code.as_str(),
            });
        }
    }
    out
}

/// Split contributions into shifts. Output is ordered by
/// (game_id, player_id, shift_number) whatever the input order.
pub(crate) fn segment(contributions: Vec<Contribution<'_>>) -> Segmentation<'_> {
    let mut by_player: FxHashMap<(GameId, PlayerId), Vec<Contribution<'_>>> = FxHashMap::default();
    for c in contributions {
        by_player.entry((c.game_id, c.player_id)).or_default().push(c);
    }

    let mut keys: Vec<(GameId, PlayerId)> = by_player.keys().copied().collect();
    keys.sort_unstable();

    let mut shifts = Vec::new();
    let mut seconds = Vec::new();

    for key in keys {
        let Some(mut run) = by_player.remove(&key) else {
            continue;
        };
        run.sort_by_key(|c| c.second);
        run.dedup_by_key(|c| c.second);

        let mut current: Option<ShiftBuilder> = None;
        let mut shift_number = 0u32;

        for c in run {
            let extends = current
                .as_ref()
                .is_some_and(|b| c.second.saturating_sub(b.end_second) <= 1);
            if !extends {
                if let Some(done) = current.take() {
                    shifts.push(done.build());
                }
                shift_number += 1;
                current = Some(ShiftBuilder::start(&c, shift_number));
            }
            if let Some(builder) = current.as_mut() {
                builder.add(&c);
            }
            seconds.push(NumberedSecond { contribution: c, shift_number });
        }

        if let Some(done) = current.take() {
            shifts.push(done.build());
        }
    }

    Segmentation { shifts, seconds }
}

/// Internal struct for building shifts.
struct ShiftBuilder {
    player_id: PlayerId,
    game_id: GameId,
    season_id: SeasonId,
    team_id: TeamId,
    role: Role,
    shift_number: u32,
    period: u8,
    start_second: u32,
    end_second: u32,
    toi_seconds: u32,
    situations: SituationBreakdown,
}

impl ShiftBuilder {
    fn start(c: &Contribution<'_>, shift_number: u32) -> Self {
        Self {
            player_id: c.player_id,
            game_id: c.game_id,
            season_id: c.season_id,
            team_id: c.team_id,
            role: c.role,
            shift_number,
            period: c.period,
            start_second: c.second,
            end_second: c.second,
            toi_seconds: 0,
            situations: SituationBreakdown::new(),
        }
    }

    fn add(&mut self, c: &Contribution<'_>) {
        self.end_second = c.second;
        self.toi_seconds += 1;
        bump(&mut self.situations, c.situation, 1);
    }

    fn build(self) -> Shift {
        Shift {
            player_id: self.player_id,
            game_id: self.game_id,
            season_id: self.season_id,
            team_id: self.team_id,
            role: self.role,
            shift_number: self.shift_number,
            period: self.period,
            start_second: self.start_second,
            end_second: self.end_second,
            toi_seconds: self.toi_seconds,
            situations: self.situations,
        }
    }
}
