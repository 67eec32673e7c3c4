//! Row and player filters shared by the gateway and the aggregators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::snapshot::{GameId, PlayerId, SeasonId, Snapshot};

/// Which snapshot seconds count. Stoppage seconds are excluded unless the
/// caller opts back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotFilter {
    pub game_ids: Option<BTreeSet<GameId>>,
    pub season_id: Option<SeasonId>,
    pub player_ids: Option<BTreeSet<PlayerId>>,
    pub situation_codes: Option<BTreeSet<String>>,
    pub exclude_empty_net: bool,
    pub exclude_stoppage: bool,
}

impl Default for SnapshotFilter {
    fn default() -> Self {
        Self {
            game_ids: None,
            season_id: None,
            player_ids: None,
            situation_codes: None,
            exclude_empty_net: false,
            exclude_stoppage: true,
        }
    }
}

impl SnapshotFilter {
    pub fn for_game(game_id: GameId) -> Self {
        Self { game_ids: Some(BTreeSet::from([game_id])), ..Self::default() }
    }

    pub fn for_season(season_id: SeasonId) -> Self {
        Self { season_id: Some(season_id), ..Self::default() }
    }

    pub fn with_games(mut self, game_ids: impl IntoIterator<Item = GameId>) -> Self {
        self.game_ids = Some(game_ids.into_iter().collect());
        self
    }

    pub fn with_players(mut self, player_ids: impl IntoIterator<Item = PlayerId>) -> Self {
        self.player_ids = Some(player_ids.into_iter().collect());
        self
    }

    pub fn with_situations<S: Into<String>>(mut self, codes: impl IntoIterator<Item = S>) -> Self {
        self.situation_codes = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn excluding_empty_net(mut self) -> Self {
        self.exclude_empty_net = true;
        self
    }

    pub fn including_stoppages(mut self) -> Self {
        self.exclude_stoppage = false;
        self
    }

    /// Row-level predicate (everything except the player allowlist).
    pub fn matches_row(&self, snapshot: &Snapshot) -> bool {
        if let Some(games) = &self.game_ids {
            if !games.contains(&snapshot.game_id) {
                return false;
            }
        }
        if let Some(season) = self.season_id {
            if snapshot.season_id != season {
                return false;
            }
        }
        if let Some(codes) = &self.situation_codes {
            if !codes.contains(&snapshot.situation_code) {
                return false;
            }
        }
        if self.exclude_empty_net && snapshot.is_empty_net() {
            return false;
        }
        if self.exclude_stoppage && snapshot.is_stoppage {
            return false;
        }
        true
    }

    #[inline]
    pub fn matches_player(&self, player_id: PlayerId) -> bool {
        self.player_ids.as_ref().map_or(true, |ids| ids.contains(&player_id))
    }
}
