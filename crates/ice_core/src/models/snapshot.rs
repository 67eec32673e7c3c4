//! Per-second game state.
//!
//! One `Snapshot` per (game_id, game_second). Rows are read-only inputs
//! supplied by the snapshot gateway; every derived entity in this crate is
//! computed from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::analysis::situation::calculate_situation_code;

pub type PlayerId = u32;
pub type TeamId = u32;
pub type GameId = u64;
pub type SeasonId = u32;

/// Regulation period length in seconds.
pub const REGULATION_PERIOD_SECONDS: u32 = 1200;

/// Home or away bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Position class of an on-ice player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Skater,
    Goalie,
}

/// One player present on the ice during a snapshot second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnIce {
    pub player_id: PlayerId,
    /// Team of the side the player is on
    pub team_id: TeamId,
    pub side: Side,
    pub role: Role,
}

/// One discretized second of game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Game this second belongs to
    pub game_id: GameId,
    /// Season of the game, e.g. 20242025
    pub season_id: SeasonId,
    /// Seconds since puck drop, `(period - 1) * period_length + period_second`
    pub game_second: u32,
    /// Period number, 1-based
    pub period: u8,
    /// Stored strength code, e.g. "5v5", "EN6v5"
    pub situation_code: String,
    /// Home team id
    pub home_team_id: TeamId,
    /// Away team id
    pub away_team_id: TeamId,
    /// Home skaters on the ice, extra attacker included
    pub home_skater_ids: BTreeSet<PlayerId>,
    /// Away skaters on the ice, extra attacker included
    pub away_skater_ids: BTreeSet<PlayerId>,
    /// Home goalie in net, `None` when pulled
    pub home_goalie_id: Option<PlayerId>,
    /// Away goalie in net, `None` when pulled
    pub away_goalie_id: Option<PlayerId>,
    /// Clock stopped during this second
    #[serde(default)]
    pub is_stoppage: bool,
    /// Home net empty
    #[serde(default)]
    pub home_empty_net: bool,
    /// Away net empty
    #[serde(default)]
    pub away_empty_net: bool,
}

impl Snapshot {
    /// Empty 5v5 row for `game_second`, assuming regulation-length periods.
    /// Use [`Self::at_with_period_length`] for other period lengths.
    pub fn at(game_id: GameId, game_second: u32) -> Self {
        Self::at_with_period_length(game_id, game_second, REGULATION_PERIOD_SECONDS)
    }

    /// Empty 5v5 row for `game_second`, period derived from `period_length`.
    pub fn at_with_period_length(game_id: GameId, game_second: u32, period_length: u32) -> Self {
        Self {
            game_id,
            season_id: 0,
            game_second,
            period: (game_second / period_length.max(1) + 1).min(u8::MAX as u32) as u8,
            situation_code: "5v5".to_string(),
            home_team_id: 0,
            away_team_id: 0,
            home_skater_ids: BTreeSet::new(),
            away_skater_ids: BTreeSet::new(),
            home_goalie_id: None,
            away_goalie_id: None,
            is_stoppage: false,
            home_empty_net: false,
            away_empty_net: false,
        }
    }

    pub fn with_season(mut self, season_id: SeasonId) -> Self {
        self.season_id = season_id;
        self
    }

    pub fn with_teams(mut self, home_team_id: TeamId, away_team_id: TeamId) -> Self {
        self.home_team_id = home_team_id;
        self.away_team_id = away_team_id;
        self
    }

    pub fn with_home(mut self, skaters: &[PlayerId], goalie: Option<PlayerId>) -> Self {
        self.home_skater_ids = skaters.iter().copied().collect();
        self.home_goalie_id = goalie;
        self
    }

    pub fn with_away(mut self, skaters: &[PlayerId], goalie: Option<PlayerId>) -> Self {
        self.away_skater_ids = skaters.iter().copied().collect();
        self.away_goalie_id = goalie;
        self
    }

    pub fn with_situation(mut self, code: &str) -> Self {
        self.situation_code = code.to_string();
        self
    }

    pub fn with_empty_net(mut self, home: bool, away: bool) -> Self {
        self.home_empty_net = home;
        self.away_empty_net = away;
        self
    }

    pub fn with_stoppage(mut self, is_stoppage: bool) -> Self {
        self.is_stoppage = is_stoppage;
        self
    }

    #[inline]
    pub fn is_empty_net(&self) -> bool {
        self.home_empty_net || self.away_empty_net
    }

    pub fn skaters(&self, side: Side) -> &BTreeSet<PlayerId> {
        match side {
            Side::Home => &self.home_skater_ids,
            Side::Away => &self.away_skater_ids,
        }
    }

    pub fn goalie(&self, side: Side) -> Option<PlayerId> {
        match side {
            Side::Home => self.home_goalie_id,
            Side::Away => self.away_goalie_id,
        }
    }

    pub fn team_id(&self, side: Side) -> TeamId {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    /// Side and role of `player_id`, if on the ice this second.
    pub fn locate(&self, player_id: PlayerId) -> Option<(Side, Role)> {
        [Side::Home, Side::Away].into_iter().find_map(|side| {
            if self.skaters(side).contains(&player_id) {
                Some((side, Role::Skater))
            } else if self.goalie(side) == Some(player_id) {
                Some((side, Role::Goalie))
            } else {
                None
            }
        })
    }

    /// Side of `player_id` if on the ice as a skater.
    pub fn skater_side(&self, player_id: PlayerId) -> Option<Side> {
        match self.locate(player_id) {
            Some((side, Role::Skater)) => Some(side),
            _ => None,
        }
    }

    /// Everyone on the ice: home skaters, home goalie, away skaters, away goalie.
    pub fn on_ice(&self) -> impl Iterator<Item = OnIce> + '_ {
        [Side::Home, Side::Away].into_iter().flat_map(move |side| {
            let team_id = self.team_id(side);
            let skaters = self.skaters(side).iter().map(move |&player_id| OnIce {
                player_id,
                team_id,
                side,
                role: Role::Skater,
            });
            let goalie = self.goalie(side).map(|player_id| OnIce {
                player_id,
                team_id,
                side,
                role: Role::Goalie,
            });
            skaters.chain(goalie)
        })
    }

    /// Strength code implied by the on-ice sets.
    ///
    /// A side whose net is empty carries its extra attacker in the skater
    /// set, so its base strength is one less than the set size.
    pub fn expected_situation_code(&self) -> String {
        let base = |side: Side, empty: bool| {
            let count = self.skaters(side).len() as u32;
            if empty {
                count.saturating_sub(1)
            } else {
                count
            }
        };
        calculate_situation_code(
            base(Side::Home, self.home_empty_net),
            base(Side::Away, self.away_empty_net),
            self.home_empty_net,
            self.away_empty_net,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_on_five() -> Snapshot {
        Snapshot::at(2023020001, 1250)
            .with_teams(10, 6)
            .with_home(&[1, 2, 3, 4, 5], Some(30))
            .with_away(&[11, 12, 13, 14, 15], Some(31))
    }

    #[test]
    fn test_period_from_game_second() {
        assert_eq!(Snapshot::at(1, 0).period, 1);
        assert_eq!(Snapshot::at(1, 1199).period, 1);
        assert_eq!(Snapshot::at(1, 1200).period, 2);
    }

    #[test]
    fn test_period_from_custom_length() {
        assert_eq!(Snapshot::at_with_period_length(1, 599, 600).period, 1);
        assert_eq!(Snapshot::at_with_period_length(1, 600, 600).period, 2);
        assert_eq!(Snapshot::at_with_period_length(1, 1500, 600).period, 3);
        assert_eq!(Snapshot::at_with_period_length(1, 5, 0).period, 6);
        assert_eq!(Snapshot::at(1, 3600).period, 4);
    }

    #[test]
    fn test_locate() {
        let snap = five_on_five();
        assert_eq!(snap.locate(3), Some((Side::Home, Role::Skater)));
        assert_eq!(snap.locate(31), Some((Side::Away, Role::Goalie)));
        assert_eq!(snap.locate(99), None);
        assert_eq!(snap.skater_side(30), None);
        assert_eq!(snap.skater_side(12), Some(Side::Away));
    }

    #[test]
    fn test_on_ice_order_and_teams() {
        let snap = five_on_five();
        let all: Vec<OnIce> = snap.on_ice().collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0].player_id, 1);
        assert_eq!(all[5].role, Role::Goalie);
        assert_eq!(all[5].team_id, 10);
        assert_eq!(all[6].side, Side::Away);
        assert_eq!(all[11].player_id, 31);
    }

    #[test]
    fn test_expected_situation_code() {
        assert_eq!(five_on_five().expected_situation_code(), "5v5");

        let pp = five_on_five().with_away(&[11, 12, 13, 14], Some(31));
        assert_eq!(pp.expected_situation_code(), "5v4");

        let pulled = five_on_five()
            .with_home(&[1, 2, 3, 4, 5, 6], None)
            .with_empty_net(true, false);
        assert_eq!(pulled.expected_situation_code(), "EN6v5");

        let away_pulled = five_on_five()
            .with_away(&[11, 12, 13, 14, 15, 16], None)
            .with_empty_net(false, true);
        assert_eq!(away_pulled.expected_situation_code(), "5v6EN");
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Home.opposite(), Side::Away);
        assert_eq!(Side::Away.opposite().opposite(), Side::Away);
    }
}
