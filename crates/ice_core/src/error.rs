use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Run-level failures. Data disagreements are never errors; they are
/// reported as validation results instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Malformed {record}: {reason}")]
    MalformedInput { record: String, reason: String },

    #[error("Gateway error: {0}")]
    Gateway(String),
}

impl CoreError {
    pub fn game_not_found(game_id: u64) -> Self {
        CoreError::NotFound { entity: "game", id: game_id.to_string() }
    }

    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::MalformedInput { record: record.into(), reason: reason.into() }
    }

    /// Whether the run can continue by skipping the offending record.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::MalformedInput { .. } => true,
            CoreError::NotFound { .. } => false,
            CoreError::Gateway(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Kind of a per-record diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Record could not be parsed and was skipped
    MalformedInput,
    /// Event had no snapshot second inside the fuzzy window
    NoMatchingSnapshot,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagnosticKind::MalformedInput => write!(f, "malformed input"),
            DiagnosticKind::NoMatchingSnapshot => write!(f, "no matching snapshot"),
        }
    }
}

/// A skipped or unmatched record, kept so nothing is dropped silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub entity_id: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, entity_id: entity_id.into(), message: message.into() }
    }

    pub fn from_error(entity_id: impl Into<String>, err: &CoreError) -> Self {
        Self::new(DiagnosticKind::MalformedInput, entity_id, err.to_string())
    }
}
