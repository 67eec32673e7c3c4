//! # ice_core - Per-Second Hockey Time-on-Ice Analytics
//!
//! Derives shifts, time on ice, line combinations and head-to-head matchups
//! from a per-second on-ice timeline, attributes play-by-play events to that
//! timeline, and cross-checks the results against independently sourced
//! shift logs, box scores and secondary reports.
//!
//! ## Features
//! - Deterministic output (same rows = same result, ordering included)
//! - Pure derivations; data access goes through the `gateway` traits
//! - Severity-tagged validation reports with skipped-record diagnostics

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Complex types are sometimes necessary for generic APIs
#![allow(clippy::type_complexity)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;

pub use error::{CoreError, Diagnostic, DiagnosticKind, Result};

// Re-export the four derivation/validation entry points
pub use analysis::events::EventAttributor;
pub use analysis::matchups::MatchupAnalyzer;
pub use analysis::qa::{CrossSourceValidator, Severity, ValidationReport, ValidationResult};
pub use analysis::shifts::ShiftAggregator;
pub use analysis::situation::calculate_situation_code;

pub use config::AnalysisConfig;
pub use gateway::{GameSources, InMemoryGateway, StaticTeamLookup};
pub use models::{Snapshot, SnapshotFilter};
