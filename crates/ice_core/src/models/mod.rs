pub mod aggregates;
pub mod event;
pub mod filter;
pub mod snapshot;
pub mod totals;

pub use aggregates::{
    GameAggregation, LineCombination, Matchup, MatchupType, PeriodAggregation,
    SeasonAggregation, Shift, SituationBreakdown,
};
pub use event::{
    Event, EventAttribution, EventPlayer, EventRole, EventType, GoaliePair, RawEvent,
    TimeConvention, Zone,
};
pub use filter::SnapshotFilter;
pub use snapshot::{
    GameId, OnIce, PlayerId, Role, SeasonId, Side, Snapshot, TeamId, REGULATION_PERIOD_SECONDS,
};
pub use totals::{
    CrossSourceEvents, ReportPlayerToi, SecondaryReport, ShiftTotal, TeamBoxTotals, TimedEntry,
};
