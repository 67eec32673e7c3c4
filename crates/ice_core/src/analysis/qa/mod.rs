//! # QA (Cross-Source Validation) Module
//!
//! Compares derived TOI, situation codes and event counts against
//! independently sourced totals.
//!
//! - `result` - severity-tagged results and the per-game report
//! - `toi_checks` - shift-log and secondary-report TOI comparisons
//! - `situation_codes` - stored vs recomputed strength codes
//! - `event_counts` - play-by-play counts vs box score
//! - `cross_source` - position-wise pairing of event lists
//! - `names` - player-name normalization
//! - `validator` - `CrossSourceValidator`, the per-game orchestration

pub mod cross_source;
pub mod event_counts;
pub mod names;
pub mod result;
pub mod situation_codes;
pub mod toi_checks;
pub mod validator;

pub use cross_source::{compare_cross_source_events, compare_timed_entries, CrossSourceKind};
pub use event_counts::{validate_event_counts, TeamEventCounts};
pub use names::{names_match, normalize_name};
pub use result::{ReportSummary, Severity, ValidationReport, ValidationResult, ValidationSource};
pub use situation_codes::validate_situation_codes;
pub use toi_checks::{compare_shift_counts, compare_to_html_reports, validate_shift_totals};
pub use validator::CrossSourceValidator;
