//! Full per-game validation across every data source.

use rayon::prelude::*;
use tracing::{debug, info};

use super::cross_source::compare_cross_source_events;
use super::event_counts::validate_event_counts;
use super::result::{ValidationReport, ValidationResult};
use super::situation_codes::validate_situation_codes;
use super::toi_checks::{compare_shift_counts, compare_to_html_reports, validate_shift_totals};
use crate::analysis::events::EventAttributor;
use crate::analysis::shifts::ShiftAggregator;
use crate::config::AnalysisConfig;
use crate::error::{CoreError, Diagnostic, Result};
use crate::gateway::{GameSources, TeamLookup};
use crate::models::{
    CrossSourceEvents, Event, GameAggregation, GameId, SecondaryReport, ShiftTotal, Snapshot,
    SnapshotFilter, TeamBoxTotals,
};

/// Checks derived data against independent sources using one tolerance set.
#[derive(Debug, Clone, Default)]
pub struct CrossSourceValidator {
    config: AnalysisConfig,
}

impl CrossSourceValidator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn validate_shift_totals(
        &self,
        derived: &[GameAggregation],
        totals: &[ShiftTotal],
    ) -> Vec<ValidationResult> {
        validate_shift_totals(derived, totals, self.config.tolerances.toi_tolerance_seconds)
    }

    pub fn validate_situation_codes(&self, snapshots: &[Snapshot]) -> Vec<ValidationResult> {
        validate_situation_codes(snapshots)
    }

    pub fn validate_event_counts(
        &self,
        events: &[Event],
        box_totals: Option<&[TeamBoxTotals]>,
        teams: &dyn TeamLookup,
    ) -> (Vec<ValidationResult>, Vec<Diagnostic>) {
        validate_event_counts(events, box_totals, teams)
    }

    pub fn compare_to_html_reports(
        &self,
        derived: &[GameAggregation],
        report: Option<&SecondaryReport>,
    ) -> Vec<ValidationResult> {
        compare_to_html_reports(derived, report, self.config.tolerances.shift_tolerance_seconds)
    }

    pub fn compare_cross_source_events(
        &self,
        derived: &CrossSourceEvents,
        reported: &CrossSourceEvents,
    ) -> Vec<ValidationResult> {
        compare_cross_source_events(
            derived,
            reported,
            self.config.tolerances.cross_source_time_tolerance_seconds,
        )
    }

    /// Run every check for one game.
    ///
    /// Fails only when the game has no snapshot rows or a source errors.
    /// Unparseable events and unattributable events land in
    /// `ValidationReport::diagnostics`.
    pub fn validate_game(&self, sources: &GameSources<'_>, game_id: GameId) -> Result<ValidationReport> {
        if !sources.snapshots.contains_game(game_id) {
            return Err(CoreError::game_not_found(game_id));
        }

        let mut report = ValidationReport::new(game_id);

        let snapshots =
            sources.snapshots.snapshots(&SnapshotFilter::for_game(game_id).including_stoppages())?;
        report.extend(self.validate_situation_codes(&snapshots));

        let derived = ShiftAggregator::new(SnapshotFilter::for_game(game_id)).game_aggregations(&snapshots);
        let totals = sources.totals.shift_totals(game_id)?;
        report.extend(self.validate_shift_totals(&derived, &totals));

        let attributor = EventAttributor::new(sources.events.time_convention(), &self.config);
        let (events, malformed) = attributor.normalize(sources.events.events(game_id)?);
        report.diagnostics.extend(malformed);

        let box_totals = sources.totals.box_totals(game_id)?;
        let (counts, unknown_teams) =
            self.validate_event_counts(&events, box_totals.as_deref(), sources.teams);
        report.extend(counts);
        report.diagnostics.extend(unknown_teams);

        let outcome = attributor.attribute_to_rows(&events, &snapshots);
        debug!(
            game_id,
            exact = outcome.exact_count(),
            unattributed = outcome.unattributed.len(),
            "attributed events"
        );
        report.diagnostics.extend(outcome.unattributed);

        let secondary = sources.reports.report(game_id)?;
        report.extend(self.compare_to_html_reports(&derived, secondary.as_ref()));
        if let Some(secondary) = &secondary {
            report.extend(compare_shift_counts(&totals, secondary));
            let from_events = CrossSourceEvents::from_events(&events);
            report.extend(self.compare_cross_source_events(&from_events, &secondary.events));
        }

        let summary = report.summary();
        info!(
            game_id,
            checks = summary.total_checks,
            errors = summary.errors,
            warnings = summary.warnings,
            diagnostics = report.diagnostics.len(),
            "validated game"
        );
        Ok(report)
    }

    /// `validate_game` over many games in parallel. Output order follows
    /// `game_ids`.
    pub fn validate_games(
        &self,
        sources: &GameSources<'_>,
        game_ids: &[GameId],
    ) -> Vec<Result<ValidationReport>> {
        game_ids.par_iter().map(|&game_id| self.validate_game(sources, game_id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::qa::result::Severity;
    use crate::gateway::{InMemoryGateway, StaticTeamLookup};
    use crate::models::{EventPlayer, EventRole, EventType, RawEvent, ReportPlayerToi, TimedEntry};

    const GAME: GameId = 2024020500;

    fn rows(seconds: std::ops::Range<u32>) -> Vec<Snapshot> {
        seconds
            .map(|s| {
                Snapshot::at(GAME, s)
                    .with_teams(10, 6)
                    .with_home(&[1, 2, 3, 4, 5], Some(30))
                    .with_away(&[11, 12, 13, 14, 15], Some(31))
            })
            .collect()
    }

    fn goal(id: u64, clock: &str) -> RawEvent {
        RawEvent {
            event_id: id,
            game_id: GAME,
            event_type: EventType::Goal,
            period: 1,
            time_in_period: clock.to_string(),
            team_id: Some(10),
            players: vec![EventPlayer::named(1, "Mitch Marner", EventRole::Scorer)],
            goalie_id: Some(31),
            zone: None,
        }
    }

    fn totals(secs: u32) -> Vec<ShiftTotal> {
        (1..=5).map(|p| ShiftTotal { player_id: p, team_id: 10, total_seconds: secs, shift_count: 1 }).collect()
    }

    fn teams() -> StaticTeamLookup {
        StaticTeamLookup::from_pairs([("TOR", 10), ("BOS", 6)])
    }

    #[test]
    fn test_unknown_game_not_found() {
        let gateway = InMemoryGateway::default();
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);
        let err = CrossSourceValidator::default().validate_game(&sources, 1).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn test_clean_game_is_valid() {
        let gateway = InMemoryGateway::default()
            .with_snapshots(rows(0..100))
            .with_events(vec![goal(1, "00:50")])
            .with_shift_totals(GAME, totals(100))
            .with_box_totals(
                GAME,
                vec![TeamBoxTotals { team_abbrev: "TOR".into(), goals: 1, shots: 1, hits: 0, blocks: 0 }],
            );
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let report = CrossSourceValidator::default().validate_game(&sources, GAME).unwrap();
        assert!(report.is_valid());
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.by_rule("shift_toi").count(), 5);
        assert_eq!(report.by_rule("event_count_goals").count(), 1);
        // absent secondary report is informational only
        let html: Vec<_> = report.by_rule("html_report_available").collect();
        assert_eq!(html.len(), 1);
        assert_eq!(html[0].severity, Severity::Info);
    }

    #[test]
    fn test_situation_mismatch_invalidates() {
        let mut snaps = rows(0..10);
        snaps[4].situation_code = "5v4".to_string();
        let gateway = InMemoryGateway::default().with_snapshots(snaps).with_shift_totals(GAME, totals(10));
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let report = CrossSourceValidator::default().validate_game(&sources, GAME).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.summary().errors, 1);
    }

    #[test]
    fn test_toi_drift_only_warns() {
        let gateway = InMemoryGateway::default().with_snapshots(rows(0..100)).with_shift_totals(GAME, totals(120));
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let report = CrossSourceValidator::default().validate_game(&sources, GAME).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.summary().warnings, 5);
    }

    #[test]
    fn test_stoppage_rows_checked_but_not_counted() {
        let mut snaps = rows(0..100);
        for s in snaps.iter_mut().skip(90) {
            s.is_stoppage = true;
        }
        let gateway = InMemoryGateway::default().with_snapshots(snaps).with_shift_totals(GAME, totals(90));
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let report = CrossSourceValidator::default().validate_game(&sources, GAME).unwrap();
        assert!(report.by_rule("shift_toi").all(|r| r.passed));
        let codes: Vec<_> = report.by_rule("situation_code").collect();
        assert_eq!(codes[0].details["rows"], 100);
    }

    #[test]
    fn test_diagnostics_collected() {
        let gateway = InMemoryGateway::default()
            .with_snapshots(rows(0..100))
            .with_events(vec![goal(1, "bad"), goal(2, "10:00")]);
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let report = CrossSourceValidator::default().validate_game(&sources, GAME).unwrap();
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[0].entity_id, "1");
        assert_eq!(report.diagnostics[1].entity_id, "2");
    }

    #[test]
    fn test_secondary_report_checks() {
        let secondary = SecondaryReport {
            game_id: GAME,
            players: vec![
                ReportPlayerToi { player_id: 1, team_abbrev: None, toi_seconds: 100, shift_count: 1 },
                ReportPlayerToi { player_id: 2, team_abbrev: None, toi_seconds: 130, shift_count: 2 },
            ],
            events: CrossSourceEvents {
                goals: vec![TimedEntry::new(1, 51, "Mitchell Marner")],
                ..Default::default()
            },
        };
        let gateway = InMemoryGateway::default()
            .with_snapshots(rows(0..100))
            .with_events(vec![goal(1, "00:50")])
            .with_shift_totals(GAME, totals(100))
            .with_report(secondary);
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let report = CrossSourceValidator::default().validate_game(&sources, GAME).unwrap();
        let toi: Vec<_> = report.by_rule("html_report_toi").collect();
        assert_eq!(toi.len(), 2);
        assert!(toi[0].passed);
        assert!(!toi[1].passed);
        assert_eq!(report.by_rule("shift_count").filter(|r| !r.passed).count(), 1);
        assert!(report.by_rule("cross_source_goals").all(|r| r.passed));
        assert!(report.is_valid());
    }

    #[test]
    fn test_validate_games_keeps_order() {
        let gateway = InMemoryGateway::default().with_snapshots(rows(0..10));
        let teams = teams();
        let sources = GameSources::from_gateway(&gateway, &teams);

        let reports = CrossSourceValidator::default().validate_games(&sources, &[GAME, 7, GAME]);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].as_ref().unwrap().game_id, GAME);
        assert!(reports[1].is_err());
        assert!(reports[2].is_ok());
    }
}
