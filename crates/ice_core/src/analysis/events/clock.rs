//! Period clock parsing and game_second derivation.
//!
//! game_second = (period - 1) * period_length + period_second, where
//! period_second is seconds *elapsed*. Sources that publish time remaining
//! are converted first; mixing the two shifts every event by a constant.

use tracing::warn;

use crate::error::{CoreError, Diagnostic, Result};
use crate::models::{Event, RawEvent, TimeConvention};

/// Parse "MM:SS" (or "M:SS") into seconds.
pub fn parse_clock(clock: &str) -> Result<u32> {
    let trimmed = clock.trim();
    let (minutes, seconds) = trimmed
        .split_once(':')
        .ok_or_else(|| CoreError::malformed("clock", format!("missing ':' in '{}'", clock)))?;

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(minutes) {
        return Err(CoreError::malformed("clock", format!("bad minutes in '{}'", clock)));
    }
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| CoreError::malformed("clock", format!("bad minutes in '{}'", clock)))?;
    if seconds.len() != 2 || !digits(seconds) {
        return Err(CoreError::malformed("clock", format!("bad seconds in '{}'", clock)));
    }
    let seconds: u32 = seconds
        .parse()
        .map_err(|_| CoreError::malformed("clock", format!("bad seconds in '{}'", clock)))?;
    if seconds >= 60 {
        return Err(CoreError::malformed("clock", format!("seconds out of range in '{}'", clock)));
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| CoreError::malformed("clock", format!("clock out of range in '{}'", clock)))
}

/// Seconds elapsed in the period for a clock read under `convention`.
pub fn period_second(clock_seconds: u32, convention: TimeConvention, period_length: u32) -> Result<u32> {
    if clock_seconds > period_length {
        return Err(CoreError::malformed(
            "clock",
            format!("{}s exceeds period length {}s", clock_seconds, period_length),
        ));
    }
    Ok(match convention {
        TimeConvention::Elapsed => clock_seconds,
        TimeConvention::Remaining => period_length - clock_seconds,
    })
}

#[inline]
pub fn game_second(period: u8, period_second: u32, period_length: u32) -> u32 {
    (period.max(1) as u32 - 1)
        .saturating_mul(period_length)
        .saturating_add(period_second)
}

impl Event {
    /// Resolve a raw event's clock under its source's convention.
    pub fn from_raw(raw: RawEvent, convention: TimeConvention, period_length: u32) -> Result<Self> {
        if raw.period == 0 {
            return Err(CoreError::malformed(format!("event {}", raw.event_id), "period 0"));
        }
        let clock = parse_clock(&raw.time_in_period).map_err(|e| match e {
            CoreError::MalformedInput { reason, .. } => {
                CoreError::malformed(format!("event {}", raw.event_id), reason)
            }
            other => other,
        })?;
        let period_second = period_second(clock, convention, period_length)
            .map_err(|e| CoreError::malformed(format!("event {}", raw.event_id), e.to_string()))?;

        Ok(Event {
            event_id: raw.event_id,
            game_id: raw.game_id,
            event_type: raw.event_type,
            period: raw.period,
            period_second,
            game_second: game_second(raw.period, period_second, period_length),
            team_id: raw.team_id,
            players: raw.players,
            goalie_id: raw.goalie_id,
            zone: raw.zone,
        })
    }
}

/// Resolve a batch. Malformed records are skipped with a diagnostic; the
/// rest are returned ordered by (game_second, event_id).
pub fn normalize_events(
    raws: Vec<RawEvent>,
    convention: TimeConvention,
    period_length: u32,
) -> (Vec<Event>, Vec<Diagnostic>) {
    let mut events = Vec::with_capacity(raws.len());
    let mut diagnostics = Vec::new();

    for raw in raws {
        let event_id = raw.event_id;
        match Event::from_raw(raw, convention, period_length) {
            Ok(event) => events.push(event),
            Err(err) => {
                warn!(event_id, error = %err, "skipping malformed event");
                diagnostics.push(Diagnostic::from_error(event_id.to_string(), &err));
            }
        }
    }

    events.sort_by_key(|e| (e.game_second, e.event_id));
    (events, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use crate::models::EventType;

    fn raw(id: u64, period: u8, clock: &str) -> RawEvent {
        RawEvent {
            event_id: id,
            game_id: 1,
            event_type: EventType::Faceoff,
            period,
            time_in_period: clock.to_string(),
            team_id: Some(10),
            players: vec![],
            goalie_id: None,
            zone: None,
        }
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("1:30").unwrap(), 90);
        assert_eq!(parse_clock(" 19:59 ").unwrap(), 1199);
        assert_eq!(parse_clock("20:00").unwrap(), 1200);
    }

    #[test]
    fn test_parse_clock_malformed() {
        for bad in ["", "1230", "1:3", "a:30", "1:60", "1:3x", "-1:00", "+1:00", "1:+5", "99999999:00"] {
            let err = parse_clock(bad).unwrap_err();
            assert!(err.is_recoverable(), "{} should be malformed", bad);
        }
    }

    #[test]
    fn test_period_second_conventions() {
        assert_eq!(period_second(90, TimeConvention::Elapsed, 1200).unwrap(), 90);
        assert_eq!(period_second(90, TimeConvention::Remaining, 1200).unwrap(), 1110);
        assert_eq!(period_second(1200, TimeConvention::Remaining, 1200).unwrap(), 0);
        assert!(period_second(1201, TimeConvention::Elapsed, 1200).is_err());
    }

    #[test]
    fn test_game_second() {
        assert_eq!(game_second(1, 90, 1200), 90);
        assert_eq!(game_second(2, 0, 1200), 1200);
        assert_eq!(game_second(3, 615, 1200), 3015);
    }

    #[test]
    fn test_from_raw_conventions_agree() {
        let elapsed = Event::from_raw(raw(1, 2, "05:00"), TimeConvention::Elapsed, 1200).unwrap();
        let remaining = Event::from_raw(raw(1, 2, "15:00"), TimeConvention::Remaining, 1200).unwrap();
        assert_eq!(elapsed.game_second, 1500);
        assert_eq!(elapsed.game_second, remaining.game_second);
        assert_eq!(elapsed.period_second, 300);
    }

    #[test]
    fn test_normalize_skips_malformed() {
        let raws = vec![raw(3, 1, "02:00"), raw(1, 1, "bad"), raw(2, 1, "01:00"), raw(4, 0, "00:10")];
        let (events, diags) = normalize_events(raws, TimeConvention::Elapsed, 1200);

        assert_eq!(events.iter().map(|e| e.event_id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.kind == DiagnosticKind::MalformedInput));
        assert_eq!(diags[0].entity_id, "1");
        assert!(diags[0].message.contains("event 1"));
    }

    #[test]
    fn test_normalize_skips_overflowing_clock() {
        let raws = vec![raw(1, 1, "99999999:00"), raw(2, 1, "01:00")];
        let (events, diags) = normalize_events(raws, TimeConvention::Elapsed, 1200);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id, 2);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].entity_id, "1");
        assert_eq!(diags[0].kind, DiagnosticKind::MalformedInput);
    }
}
