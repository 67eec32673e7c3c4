//! # Shift Aggregator
//!
//! Segments per-second on-ice presence into shifts and rolls them up to
//! period, game and season granularity. Also groups line combinations.
//!
//! - `segment` - gap-scan segmentation into `Shift`s
//! - `rollup` - period/game/season aggregation
//! - `lines` - same-team line combinations
//!
//! Pure aggregation: empty input gives empty output, never an error.

mod lines;
mod rollup;
mod segment;

use tracing::debug;

use crate::config::GroupingConfig;
use crate::models::{
    GameAggregation, LineCombination, PeriodAggregation, SeasonAggregation, Shift, Snapshot,
    SnapshotFilter,
};

/// Shift and TOI derivation over a slice of snapshot rows.
#[derive(Debug, Clone, Default)]
pub struct ShiftAggregator {
    filter: SnapshotFilter,
    grouping: GroupingConfig,
}

impl ShiftAggregator {
    pub fn new(filter: SnapshotFilter) -> Self {
        Self { filter, grouping: GroupingConfig::default() }
    }

    pub fn with_grouping(mut self, grouping: GroupingConfig) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn filter(&self) -> &SnapshotFilter {
        &self.filter
    }

    /// All shifts, ordered by (game_id, player_id, shift_number).
    pub fn shifts(&self, snapshots: &[Snapshot]) -> Vec<Shift> {
        let contributions = segment::collect_contributions(snapshots, &self.filter);
        let seg = segment::segment(contributions);
        debug!(rows = snapshots.len(), shifts = seg.shifts.len(), "segmented shifts");
        seg.shifts
    }

    pub fn period_aggregations(&self, snapshots: &[Snapshot]) -> Vec<PeriodAggregation> {
        let contributions = segment::collect_contributions(snapshots, &self.filter);
        let seg = segment::segment(contributions);
        rollup::period_aggregations(&seg.seconds)
    }

    pub fn game_aggregations(&self, snapshots: &[Snapshot]) -> Vec<GameAggregation> {
        rollup::game_aggregations(&self.shifts(snapshots))
    }

    pub fn season_aggregations(&self, snapshots: &[Snapshot]) -> Vec<SeasonAggregation> {
        rollup::season_aggregations(&self.game_aggregations(snapshots))
    }

    pub fn line_combinations(&self, snapshots: &[Snapshot]) -> Vec<LineCombination> {
        lines::line_combinations(snapshots, &self.filter, &self.grouping)
    }
}

// ============================================================================
// Tests
// ============================================================================
