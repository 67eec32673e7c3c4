//! # Analysis Module
//!
//! Derivations over the per-second snapshot timeline and their validation.
//!
//! ## Submodules
//!
//! - `situation` - strength-state codes
//! - `shifts` - shift segmentation, TOI rollups, line combinations
//! - `matchups` - shared ice time between player pairs
//! - `events` - clock normalization and event-to-snapshot attribution
//! - `qa` - cross-source validation (shift log, box score, secondary report)

pub mod events;
pub mod matchups;
pub mod qa;
pub mod shifts;
pub mod situation;
