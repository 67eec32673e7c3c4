//! Discretely-timed play-by-play events.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::snapshot::{GameId, PlayerId, TeamId};

/// Play-by-play event type. Upstream tags are kebab-case strings; anything
/// outside the known set is kept verbatim in `Other` and classifies as
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Goal,
    ShotOnGoal,
    MissedShot,
    BlockedShot,
    Hit,
    Giveaway,
    Takeaway,
    Faceoff,
    Penalty,
    DelayedPenalty,
    Stoppage,
    PeriodStart,
    PeriodEnd,
    GameEnd,
    TvTimeout,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Goal => "goal",
            EventType::ShotOnGoal => "shot-on-goal",
            EventType::MissedShot => "missed-shot",
            EventType::BlockedShot => "blocked-shot",
            EventType::Hit => "hit",
            EventType::Giveaway => "giveaway",
            EventType::Takeaway => "takeaway",
            EventType::Faceoff => "faceoff",
            EventType::Penalty => "penalty",
            EventType::DelayedPenalty => "delayed-penalty",
            EventType::Stoppage => "stoppage",
            EventType::PeriodStart => "period-start",
            EventType::PeriodEnd => "period-end",
            EventType::GameEnd => "game-end",
            EventType::TvTimeout => "tv-timeout",
            EventType::Other(tag) => tag,
        }
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "goal" => EventType::Goal,
            "shot-on-goal" | "shot" => EventType::ShotOnGoal,
            "missed-shot" | "miss" => EventType::MissedShot,
            "blocked-shot" | "block" => EventType::BlockedShot,
            "hit" => EventType::Hit,
            "giveaway" => EventType::Giveaway,
            "takeaway" => EventType::Takeaway,
            "faceoff" => EventType::Faceoff,
            "penalty" => EventType::Penalty,
            "delayed-penalty" => EventType::DelayedPenalty,
            "stoppage" => EventType::Stoppage,
            "period-start" => EventType::PeriodStart,
            "period-end" => EventType::PeriodEnd,
            "game-end" => EventType::GameEnd,
            "tv-timeout" => EventType::TvTimeout,
            _ => EventType::Other(tag.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        EventType::from(tag.as_str())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a player did in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRole {
    Scorer,
    Assist,
    Shooter,
    Goalie,
    Blocker,
    Hitter,
    Hittee,
    Winner,
    Loser,
    CommittedBy,
    DrawnBy,
    ServedBy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPlayer {
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: EventRole,
}

impl EventPlayer {
    pub fn new(player_id: PlayerId, role: EventRole) -> Self {
        Self { player_id, name: None, role }
    }

    pub fn named(player_id: PlayerId, name: &str, role: EventRole) -> Self {
        Self { player_id, name: Some(name.to_string()), role }
    }
}

/// Rink zone, relative to the team that owns the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "O")]
    Offensive,
    #[serde(rename = "D")]
    Defensive,
    #[serde(rename = "N")]
    Neutral,
}

impl Zone {
    /// Re-express a zone recorded from `event_team`'s perspective as seen by
    /// `viewer_team`.
    pub fn for_team(self, event_team: TeamId, viewer_team: TeamId) -> Self {
        if event_team == viewer_team {
            return self;
        }
        match self {
            Zone::Offensive => Zone::Defensive,
            Zone::Defensive => Zone::Offensive,
            Zone::Neutral => Zone::Neutral,
        }
    }
}

/// Whether an upstream clock counts up or down within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeConvention {
    #[default]
    Elapsed,
    Remaining,
}

/// Event as delivered upstream, clock still a "MM:SS" string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub event_id: u64,
    pub game_id: GameId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub period: u8,
    pub time_in_period: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub players: Vec<EventPlayer>,
    #[serde(default)]
    pub goalie_id: Option<PlayerId>,
    #[serde(default)]
    pub zone: Option<Zone>,
}

/// Event with its clock resolved onto the game timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: u64,
    pub game_id: GameId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub period: u8,
    /// Seconds elapsed in the period
    pub period_second: u32,
    pub game_second: u32,
    pub team_id: Option<TeamId>,
    pub players: Vec<EventPlayer>,
    pub goalie_id: Option<PlayerId>,
    pub zone: Option<Zone>,
}

impl Event {
    /// First player holding `role`.
    pub fn player_with(&self, role: EventRole) -> Option<&EventPlayer> {
        self.players.iter().find(|p| p.role == role)
    }

    pub fn players_with(&self, role: EventRole) -> impl Iterator<Item = &EventPlayer> {
        self.players.iter().filter(move |p| p.role == role)
    }
}

/// An event pinned to a snapshot second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribution {
    pub event: Event,
    pub snapshot_second: u32,
    /// `snapshot_second - event.game_second`
    pub offset: i32,
    pub is_exact: bool,
}

/// Goalies defending each net at a given second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoaliePair {
    pub home_goalie_id: Option<PlayerId>,
    pub away_goalie_id: Option<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_tags() {
        assert_eq!(EventType::from("shot-on-goal"), EventType::ShotOnGoal);
        assert_eq!(EventType::from("BLOCKED_SHOT"), EventType::BlockedShot);
        assert_eq!(EventType::from("miss"), EventType::MissedShot);
        assert_eq!(EventType::from("tv-timeout"), EventType::TvTimeout);
        assert_eq!(
            EventType::from("shootout-complete"),
            EventType::Other("shootout-complete".to_string())
        );
        assert_eq!(EventType::DelayedPenalty.as_str(), "delayed-penalty");
    }

    #[test]
    fn test_event_type_serde() {
        let json = serde_json::to_string(&EventType::PeriodEnd).unwrap();
        assert_eq!(json, "\"period-end\"");
        let back: EventType = serde_json::from_str("\"faceoff\"").unwrap();
        assert_eq!(back, EventType::Faceoff);
    }

    #[test]
    fn test_zone_for_team() {
        assert_eq!(Zone::Offensive.for_team(10, 10), Zone::Offensive);
        assert_eq!(Zone::Offensive.for_team(10, 6), Zone::Defensive);
        assert_eq!(Zone::Defensive.for_team(10, 6), Zone::Offensive);
        assert_eq!(Zone::Neutral.for_team(10, 6), Zone::Neutral);
    }

    #[test]
    fn test_raw_event_deserialize() {
        let raw: RawEvent = serde_json::from_str(
            r#"{"event_id": 51, "game_id": 2023020001, "type": "hit", "period": 2,
                "time_in_period": "04:13", "team_id": 10, "zone": "N",
                "players": [{"player_id": 8478402, "role": "hitter"}]}"#,
        )
        .unwrap();
        assert_eq!(raw.event_type, EventType::Hit);
        assert_eq!(raw.zone, Some(Zone::Neutral));
        assert_eq!(raw.players[0].role, EventRole::Hitter);
        assert!(raw.goalie_id.is_none());
    }
}
