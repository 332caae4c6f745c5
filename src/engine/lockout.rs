//! Lockout evaluation
//!
//! A player is locked once the reference time reaches their lockout
//! timestamp. Players without a timestamp are never locked.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::catalog::Player;
use crate::common::errors::{Result, TradeError};
use crate::common::traits::{Clock, SystemClock};

/// Whether `player` is locked at `reference_time`
pub fn is_locked(player: &Player, reference_time: DateTime<Utc>) -> bool {
    player
        .lockout
        .is_some_and(|lockout| reference_time >= lockout)
}

/// Parse an RFC 3339 timestamp or an HTML `datetime-local` value
///
/// Values without an offset are interpreted at `offset`.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| TradeError::InvalidRequest(format!("ambiguous datetime '{raw}'")));
        }
    }

    Err(TradeError::InvalidRequest(format!("invalid datetime '{raw}'")))
}

/// Decides lockout against either a simulated time or the clock
#[derive(Clone)]
pub struct LockoutEvaluator {
    clock: Arc<dyn Clock>,
}

impl Default for LockoutEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl LockoutEvaluator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// The simulated time when given, otherwise now
    pub fn reference_time(&self, simulated: Option<DateTime<Utc>>) -> DateTime<Utc> {
        simulated.unwrap_or_else(|| self.clock.now())
    }

    pub fn is_locked(&self, player: &Player, simulated: Option<DateTime<Utc>>) -> bool {
        is_locked(player, self.reference_time(simulated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::MockClock;
    use crate::common::types::Position;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 9, 0, 0).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_locked_at_and_after_lockout() {
        let player = Player::new("A", Position::Hlf, 500_000).with_lockout(t0());
        assert!(!is_locked(&player, t0() - Duration::seconds(1)));
        assert!(is_locked(&player, t0()));
        assert!(is_locked(&player, t0() + Duration::days(3)));
    }

    #[test]
    fn test_no_lockout_never_locked() {
        let player = Player::new("A", Position::Hlf, 500_000);
        assert!(!is_locked(&player, t0() + Duration::days(36_500)));
    }

    #[test]
    fn test_monotonic_in_reference_time() {
        let player = Player::new("A", Position::Mid, 1).with_lockout(t0());
        let mut was_locked = false;
        for minutes in -120..120 {
            let locked = is_locked(&player, t0() + Duration::minutes(minutes));
            assert!(locked || !was_locked, "lockout went backwards at {minutes}");
            was_locked = locked;
        }
    }

    #[test]
    fn test_evaluator_prefers_simulated_time() {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(t0() + Duration::hours(1));
        let evaluator = LockoutEvaluator::new(Arc::new(clock));
        let player = Player::new("A", Position::Hlf, 1).with_lockout(t0());

        assert!(evaluator.is_locked(&player, None));
        assert!(!evaluator.is_locked(&player, Some(t0() - Duration::hours(1))));
    }

    #[test]
    fn test_parse_rfc3339_and_local_formats() {
        assert_eq!(parse_timestamp("2024-03-07T19:00:00+10:00", utc()).unwrap(), t0());
        assert_eq!(parse_timestamp("2024-03-07T09:00", utc()).unwrap(), t0());
        let aest = FixedOffset::east_opt(10 * 3600).unwrap();
        assert_eq!(parse_timestamp("2024-03-07T19:00:00", aest).unwrap(), t0());
        assert!(matches!(
            parse_timestamp("next tuesday", utc()),
            Err(TradeError::InvalidRequest(_))
        ));
    }
}
