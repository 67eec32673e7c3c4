//! Grouping Configuration

use serde::{Deserialize, Serialize};

use crate::models::REGULATION_PERIOD_SECONDS;

/// Thresholds for line combinations, matchups and period arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupingConfig {
    /// Smallest on-ice set treated as a line (default: 3)
    pub min_line_combination_players: usize,
    /// Largest on-ice set treated as a line (default: 5)
    pub max_line_combination_players: usize,
    /// Lines below this shared TOI are dropped (default: 60)
    pub min_line_combination_toi_seconds: u32,
    /// Matchups below this shared TOI are line-change noise (default: 60)
    pub min_matchup_toi_seconds: u32,
    /// Regulation period length used for game_second (default: 1200)
    pub period_length_seconds: u32,
    /// Pairs kept in a game matchup summary (default: 10)
    pub matchup_summary_limit: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_line_combination_players: 3,
            max_line_combination_players: 5,
            min_line_combination_toi_seconds: 60,
            min_matchup_toi_seconds: 60,
            period_length_seconds: REGULATION_PERIOD_SECONDS,
            matchup_summary_limit: 10,
        }
    }
}
