//! Validation results and the per-game report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Diagnostic;
use crate::models::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// Which independent measurement a check compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSource {
    /// Internal consistency of snapshot rows
    Snapshots,
    /// Official shift log
    ShiftLog,
    /// Box score totals
    BoxScore,
    /// Secondary HTML report
    HtmlReport,
}

/// Outcome of one check. Passing checks carry `Severity::Info`; failing
/// checks carry the rule's severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule_name: String,
    pub source: ValidationSource,
    pub passed: bool,
    pub severity: Severity,
    pub message: String,
    pub details: serde_json::Value,
    pub entity_id: Option<String>,
}

impl ValidationResult {
    pub fn pass(rule_name: &str, source: ValidationSource, message: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            source,
            passed: true,
            severity: Severity::Info,
            message: message.into(),
            details: serde_json::Value::Null,
            entity_id: None,
        }
    }

    pub fn fail(
        rule_name: &str,
        source: ValidationSource,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            source,
            passed: false,
            severity,
            message: message.into(),
            details: serde_json::Value::Null,
            entity_id: None,
        }
    }

    /// Pass, or fail at `severity`.
    pub fn check(
        rule_name: &str,
        source: ValidationSource,
        passed: bool,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        if passed {
            Self::pass(rule_name, source, message)
        } else {
            Self::fail(rule_name, source, severity, message)
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_entity(mut self, entity_id: impl ToString) -> Self {
        self.entity_id = Some(entity_id.to_string());
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        !self.passed && self.severity == Severity::Error
    }
}

/// Counts over a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    /// Percentage of passing checks (0-100), 100 when nothing was checked
    pub pass_rate: f64,
}

/// Every check run for one game plus skipped-record diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub game_id: GameId,
    pub results: Vec<ValidationResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new(game_id: GameId) -> Self {
        Self { game_id, results: Vec::new(), diagnostics: Vec::new() }
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = ValidationResult>) {
        self.results.extend(results);
    }

    /// False iff at least one failing ERROR-severity result exists.
    pub fn is_valid(&self) -> bool {
        !self.results.iter().any(ValidationResult::is_error)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn by_rule<'a>(&'a self, rule_name: &'a str) -> impl Iterator<Item = &'a ValidationResult> {
        self.results.iter().filter(move |r| r.rule_name == rule_name)
    }

    pub fn summary(&self) -> ReportSummary {
        let total_checks = self.results.len();
        let passed = self.results.iter().filter(|r| r.passed).count();
        let count = |sev: Severity| self.failures().filter(|r| r.severity == sev).count();

        ReportSummary {
            total_checks,
            passed,
            failed: total_checks - passed,
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            pass_rate: if total_checks == 0 {
                100.0
            } else {
                100.0 * passed as f64 / total_checks as f64
            },
        }
    }

    /// Human-readable failure list, errors first.
    pub fn failure_lines(&self) -> Vec<String> {
        let mut failures: Vec<&ValidationResult> = self.failures().collect();
        failures.sort_by_key(|r| r.severity);
        failures
            .into_iter()
            .map(|r| match &r.entity_id {
                Some(id) => format!("[{}] {} ({}): {}", r.severity, r.rule_name, id, r.message),
                None => format!("[{}] {}: {}", r.severity, r.rule_name, r.message),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(results: Vec<ValidationResult>) -> ValidationReport {
        let mut r = ValidationReport::new(1);
        r.extend(results);
        r
    }

    #[test]
    fn test_pass_carries_info() {
        let r = ValidationResult::check("x", ValidationSource::ShiftLog, true, Severity::Error, "ok");
        assert!(r.passed);
        assert_eq!(r.severity, Severity::Info);
        assert!(!r.is_error());
    }

    #[test]
    fn test_only_errors_invalidate() {
        let warn = ValidationResult::fail("toi", ValidationSource::ShiftLog, Severity::Warning, "off");
        let info = ValidationResult::fail("html", ValidationSource::HtmlReport, Severity::Info, "none");
        assert!(report(vec![warn.clone(), info.clone()]).is_valid());

        let err = ValidationResult::fail("code", ValidationSource::Snapshots, Severity::Error, "bad");
        assert!(!report(vec![warn, info, err]).is_valid());
    }

    #[test]
    fn test_summary() {
        let r = report(vec![
            ValidationResult::pass("a", ValidationSource::ShiftLog, "ok"),
            ValidationResult::pass("a", ValidationSource::ShiftLog, "ok"),
            ValidationResult::fail("b", ValidationSource::ShiftLog, Severity::Warning, "w"),
            ValidationResult::fail("c", ValidationSource::Snapshots, Severity::Error, "e"),
        ]);
        let s = r.summary();
        assert_eq!(s.total_checks, 4);
        assert_eq!(s.passed, 2);
        assert_eq!(s.failed, 2);
        assert_eq!(s.warnings, 1);
        assert_eq!(s.errors, 1);
        assert_eq!(s.infos, 0);
        assert!((s.pass_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let s = ValidationReport::new(1).summary();
        assert_eq!(s.total_checks, 0);
        assert_eq!(s.pass_rate, 100.0);
    }

    #[test]
    fn test_failure_lines_errors_first() {
        let r = report(vec![
            ValidationResult::fail("b", ValidationSource::ShiftLog, Severity::Warning, "w").with_entity(7),
            ValidationResult::fail("c", ValidationSource::Snapshots, Severity::Error, "e"),
        ]);
        let lines = r.failure_lines();
        assert_eq!(lines[0], "[ERROR] c: e");
        assert_eq!(lines[1], "[WARNING] b (7): w");
    }

    #[test]
    fn test_serializes_snake_case() {
        let r = ValidationResult::fail("b", ValidationSource::HtmlReport, Severity::Warning, "w");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["source"], "html_report");
    }
}
