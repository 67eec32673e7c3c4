//! Line combinations: same-team skater sets grouped by sorted id tuple.

use fxhash::{FxHashMap, FxHashSet};

use crate::config::GroupingConfig;
use crate::models::aggregates::bump;
use crate::models::{GameId, LineCombination, PlayerId, Side, SituationBreakdown, Snapshot, SnapshotFilter, TeamId};

#[derive(Default)]
struct Acc {
    toi: u32,
    games: FxHashSet<GameId>,
    situations: SituationBreakdown,
}

/// Group on-ice skater sets by (team, sorted ids). Sets outside
/// [min_players, max_players] are ignored and groups below
/// `min_line_combination_toi_seconds` dropped. When the filter carries a
/// player allowlist only sets containing one of those players are kept.
///
/// Ordered by toi_together descending, then team and ids ascending.
pub(crate) fn line_combinations(
    snapshots: &[Snapshot],
    filter: &SnapshotFilter,
    grouping: &GroupingConfig,
) -> Vec<LineCombination> {
    let size_range = grouping.min_line_combination_players..=grouping.max_line_combination_players;
    let mut acc: FxHashMap<(TeamId, Vec<PlayerId>), Acc> = FxHashMap::default();

    for snapshot in snapshots.iter().filter(|s| filter.matches_row(s)) {
        for side in [Side::Home, Side::Away] {
            let skaters = snapshot.skaters(side);
            if !size_range.contains(&skaters.len()) {
                continue;
            }
            if filter.player_ids.is_some() && !skaters.iter().any(|&p| filter.matches_player(p)) {
                continue;
            }
            // BTreeSet iteration is already ascending
            let ids: Vec<PlayerId> = skaters.iter().copied().collect();
            let entry = acc.entry((snapshot.team_id(side), ids)).or_default();
            entry.toi += 1;
            entry.games.insert(snapshot.game_id);
            bump(&mut entry.situations, &snapshot.situation_code, 1);
        }
    }

    let mut out: Vec<LineCombination> = acc
        .into_iter()
        .filter(|(_, a)| a.toi >= grouping.min_line_combination_toi_seconds)
        .map(|((team_id, player_ids), a)| LineCombination {
            team_id,
            player_ids,
            toi_together: a.toi,
            game_count: a.games.len() as u32,
            situations: a.situations,
        })
        .collect();

    out.sort_by(|a, b| {
        b.toi_together
            .cmp(&a.toi_together)
            .then(a.team_id.cmp(&b.team_id))
            .then_with(|| a.player_ids.cmp(&b.player_ids))
    });
    out
}
