//! Collaborator seams.
//!
//! Fetching, scraping and persistence live outside this crate. The core only
//! sees these traits; `InMemoryGateway` backs tests and callers that have
//! already loaded their data.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::models::{
    GameId, RawEvent, SecondaryReport, ShiftTotal, Snapshot, SnapshotFilter, TeamBoxTotals, TeamId,
    TimeConvention,
};

/// Per-second game state, filterable.
pub trait SnapshotSource: Send + Sync {
    fn contains_game(&self, game_id: GameId) -> bool;

    /// Rows matching `filter`, ordered by (game_id, game_second).
    fn snapshots(&self, filter: &SnapshotFilter) -> Result<Vec<Snapshot>>;
}

/// Play-by-play events for one game.
pub trait EventSource: Send + Sync {
    fn events(&self, game_id: GameId) -> Result<Vec<RawEvent>>;

    /// Clock convention of `time_in_period` in this source.
    fn time_convention(&self) -> TimeConvention;
}

/// Authoritative shift logs and box scores.
pub trait TotalsSource: Send + Sync {
    fn shift_totals(&self, game_id: GameId) -> Result<Vec<ShiftTotal>>;

    /// `None` when the box score was never captured.
    fn box_totals(&self, game_id: GameId) -> Result<Option<Vec<TeamBoxTotals>>>;
}

/// Optional independent report.
pub trait SecondaryReportSource: Send + Sync {
    fn report(&self, game_id: GameId) -> Result<Option<SecondaryReport>>;
}

/// Team abbreviation to id.
pub trait TeamLookup: Send + Sync {
    fn team_id(&self, abbrev: &str) -> Option<TeamId>;
}

/// Borrowed bundle of every collaborator a full validation needs.
#[derive(Clone, Copy)]
pub struct GameSources<'a> {
    pub snapshots: &'a dyn SnapshotSource,
    pub events: &'a dyn EventSource,
    pub totals: &'a dyn TotalsSource,
    pub reports: &'a dyn SecondaryReportSource,
    pub teams: &'a dyn TeamLookup,
}

impl<'a> GameSources<'a> {
    /// All data sources from one gateway, teams from `teams`.
    pub fn from_gateway<G>(gateway: &'a G, teams: &'a dyn TeamLookup) -> Self
    where
        G: SnapshotSource + EventSource + TotalsSource + SecondaryReportSource,
    {
        Self { snapshots: gateway, events: gateway, totals: gateway, reports: gateway, teams }
    }
}

// ============================================================================
// Static team lookup
// ============================================================================

static NHL_TEAMS: Lazy<FxHashMap<&'static str, TeamId>> = Lazy::new(|| {
    [
        ("NJD", 1), ("NYI", 2), ("NYR", 3), ("PHI", 4), ("PIT", 5), ("BOS", 6),
        ("BUF", 7), ("MTL", 8), ("OTT", 9), ("TOR", 10), ("CAR", 12), ("FLA", 13),
        ("TBL", 14), ("WSH", 15), ("CHI", 16), ("DET", 17), ("NSH", 18), ("STL", 19),
        ("CGY", 20), ("COL", 21), ("EDM", 22), ("VAN", 23), ("ANA", 24), ("DAL", 25),
        ("LAK", 26), ("SJS", 28), ("CBJ", 29), ("MIN", 30), ("WPG", 52), ("ARI", 53),
        ("VGK", 54), ("SEA", 55), ("UTA", 59),
    ]
    .into_iter()
    .collect()
});

/// Fixed abbreviation table. Case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct StaticTeamLookup {
    teams: FxHashMap<String, TeamId>,
}

impl StaticTeamLookup {
    pub fn from_pairs<'s>(pairs: impl IntoIterator<Item = (&'s str, TeamId)>) -> Self {
        Self {
            teams: pairs.into_iter().map(|(abbrev, id)| (abbrev.to_ascii_uppercase(), id)).collect(),
        }
    }

    /// Current league table.
    pub fn nhl() -> Self {
        Self::from_pairs(NHL_TEAMS.iter().map(|(abbrev, id)| (*abbrev, *id)))
    }
}

impl TeamLookup for StaticTeamLookup {
    fn team_id(&self, abbrev: &str) -> Option<TeamId> {
        self.teams.get(&abbrev.trim().to_ascii_uppercase()).copied()
    }
}

// ============================================================================
// In-memory gateway
// ============================================================================

/// Everything already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    snapshots: Vec<Snapshot>,
    events: FxHashMap<GameId, Vec<RawEvent>>,
    convention: TimeConvention,
    shift_totals: FxHashMap<GameId, Vec<ShiftTotal>>,
    box_totals: FxHashMap<GameId, Vec<TeamBoxTotals>>,
    reports: FxHashMap<GameId, SecondaryReport>,
}

impl InMemoryGateway {
    pub fn with_snapshots(mut self, snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        self.snapshots.extend(snapshots);
        self.snapshots.sort_by_key(|s| (s.game_id, s.game_second));
        self
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = RawEvent>) -> Self {
        for event in events {
            self.events.entry(event.game_id).or_default().push(event);
        }
        self
    }

    pub fn with_time_convention(mut self, convention: TimeConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_shift_totals(mut self, game_id: GameId, totals: Vec<ShiftTotal>) -> Self {
        self.shift_totals.insert(game_id, totals);
        self
    }

    pub fn with_box_totals(mut self, game_id: GameId, totals: Vec<TeamBoxTotals>) -> Self {
        self.box_totals.insert(game_id, totals);
        self
    }

    pub fn with_report(mut self, report: SecondaryReport) -> Self {
        self.reports.insert(report.game_id, report);
        self
    }
}

impl SnapshotSource for InMemoryGateway {
    fn contains_game(&self, game_id: GameId) -> bool {
        self.snapshots.iter().any(|s| s.game_id == game_id)
    }

    fn snapshots(&self, filter: &SnapshotFilter) -> Result<Vec<Snapshot>> {
        Ok(self.snapshots.iter().filter(|s| filter.matches_row(s)).cloned().collect())
    }
}

impl EventSource for InMemoryGateway {
    fn events(&self, game_id: GameId) -> Result<Vec<RawEvent>> {
        Ok(self.events.get(&game_id).cloned().unwrap_or_default())
    }

    fn time_convention(&self) -> TimeConvention {
        self.convention
    }
}

impl TotalsSource for InMemoryGateway {
    fn shift_totals(&self, game_id: GameId) -> Result<Vec<ShiftTotal>> {
        Ok(self.shift_totals.get(&game_id).cloned().unwrap_or_default())
    }

    fn box_totals(&self, game_id: GameId) -> Result<Option<Vec<TeamBoxTotals>>> {
        Ok(self.box_totals.get(&game_id).cloned())
    }
}

impl SecondaryReportSource for InMemoryGateway {
    fn report(&self, game_id: GameId) -> Result<Option<SecondaryReport>> {
        Ok(self.reports.get(&game_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nhl_lookup() {
        let teams = StaticTeamLookup::nhl();
        assert_eq!(teams.team_id("TOR"), Some(10));
        assert_eq!(teams.team_id("edm"), Some(22));
        assert_eq!(teams.team_id(" SEA "), Some(55));
        assert_eq!(teams.team_id("XYZ"), None);
    }

    #[test]
    fn test_fixture_lookup() {
        let teams = StaticTeamLookup::from_pairs([("home", 1), ("AWY", 2)]);
        assert_eq!(teams.team_id("HOME"), Some(1));
        assert_eq!(teams.team_id("TOR"), None);
    }

    #[test]
    fn test_in_memory_snapshots_sorted_and_filtered() {
        let gateway = InMemoryGateway::default().with_snapshots(vec![
            Snapshot::at(2, 5),
            Snapshot::at(1, 9).with_stoppage(true),
            Snapshot::at(1, 3),
        ]);
        assert!(gateway.contains_game(1));
        assert!(!gateway.contains_game(3));

        let rows = gateway.snapshots(&SnapshotFilter::for_game(1).including_stoppages()).unwrap();
        assert_eq!(rows.iter().map(|s| s.game_second).collect::<Vec<_>>(), vec![3, 9]);

        let rows = gateway.snapshots(&SnapshotFilter::default()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_in_memory_optional_sources() {
        let gateway = InMemoryGateway::default();
        assert!(gateway.box_totals(1).unwrap().is_none());
        assert!(gateway.report(1).unwrap().is_none());
        assert!(gateway.shift_totals(1).unwrap().is_empty());
        assert!(gateway.events(1).unwrap().is_empty());
        assert_eq!(gateway.time_convention(), TimeConvention::Elapsed);
    }
}
