//! Independently sourced totals used as ground truth for cross-checks.

use serde::{Deserialize, Serialize};

use super::snapshot::{GameId, PlayerId, TeamId};

/// Authoritative per-player line from the official shift log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTotal {
    /// Player the line belongs to
    pub player_id: PlayerId,
    /// Team the player dressed for
    pub team_id: TeamId,
    /// Logged time on ice in seconds
    pub total_seconds: u32,
    /// Logged number of shifts
    pub shift_count: u32,
}

/// Per-team box score line. Teams are keyed by abbreviation upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBoxTotals {
    /// Team abbreviation as printed in the box score, e.g. "TOR"
    pub team_abbrev: String,
    /// Goals scored
    pub goals: u32,
    /// Shots on goal, goals included
    pub shots: u32,
    /// Hits delivered
    pub hits: u32,
    /// Opponent shots blocked
    pub blocks: u32,
}

/// Player line from the secondary (HTML) time-on-ice report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPlayerToi {
    /// Player the line belongs to
    pub player_id: PlayerId,
    /// Team abbreviation when the report prints one
    #[serde(default)]
    pub team_abbrev: Option<String>,
    /// Reported time on ice in seconds
    pub toi_seconds: u32,
    /// Reported number of shifts
    pub shift_count: u32,
}

/// One row of a cross-source event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEntry {
    /// Period number, 1-based
    pub period: u8,
    /// Seconds elapsed in the period
    pub time_seconds: u32,
    /// Player name as the source prints it
    pub player_name: String,
}

impl TimedEntry {
    pub fn new(period: u8, time_seconds: u32, player_name: &str) -> Self {
        Self { period, time_seconds, player_name: player_name.to_string() }
    }
}

/// Event lists one source reports, for position-wise pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSourceEvents {
    /// One entry per goal, keyed on the scorer
    pub goals: Vec<TimedEntry>,
    /// One entry per credited assist
    pub assists: Vec<TimedEntry>,
    /// One entry per penalty, keyed on the offender
    pub penalties: Vec<TimedEntry>,
    /// One entry per shot on goal, goals included
    pub shots: Vec<TimedEntry>,
    /// One entry per faceoff, keyed on the winner
    pub faceoffs: Vec<TimedEntry>,
}

/// The optional independent report for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryReport {
    /// Game the report covers
    pub game_id: GameId,
    /// Per-player TOI lines
    #[serde(default)]
    pub players: Vec<ReportPlayerToi>,
    /// Event lists for cross-source pairing
    #[serde(default)]
    pub events: CrossSourceEvents,
}
