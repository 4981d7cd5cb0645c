//! Fixed-window gate based on the time of the last recorded attempt.

use chrono::{DateTime, Duration, Utc};

/// Upper bound on a configured window (one year).
const MAX_WINDOW_SECS: u64 = 365 * 24 * 3600;

/// Outcome of a window check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// Rejects a new attempt while the previous one is younger than the window.
#[derive(Debug, Clone, Copy)]
pub struct RateWindow {
    window: Duration,
}

impl RateWindow {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            window: Duration::seconds(i64::try_from(secs.min(MAX_WINDOW_SECS)).unwrap_or(0)),
        }
    }

    /// Oldest timestamp that still falls inside the window at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    pub fn check(&self, last_attempt: Option<DateTime<Utc>>, now: DateTime<Utc>) -> RateDecision {
        match last_attempt {
            Some(last) if last > self.cutoff(now) => {
                let remaining = (last + self.window - now).num_seconds();
                RateDecision::Limited {
                    retry_after_secs: remaining.max(1) as u64,
                }
            }
            _ => RateDecision::Allowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_previous_attempt_allowed() {
        let w = RateWindow::from_secs(600);
        assert_eq!(w.check(None, Utc::now()), RateDecision::Allowed);
    }

    #[test]
    fn test_recent_attempt_limited() {
        let w = RateWindow::from_secs(600);
        let now = Utc::now();
        let decision = w.check(Some(now - Duration::minutes(4)), now);
        assert_eq!(
            decision,
            RateDecision::Limited {
                retry_after_secs: 360
            }
        );
    }

    #[test]
    fn test_old_attempt_allowed() {
        let w = RateWindow::from_secs(600);
        let now = Utc::now();
        assert_eq!(
            w.check(Some(now - Duration::minutes(11)), now),
            RateDecision::Allowed
        );
    }

    #[test]
    fn test_boundary_exactly_window_old_allowed() {
        let w = RateWindow::from_secs(600);
        let now = Utc::now();
        assert_eq!(
            w.check(Some(now - Duration::seconds(600)), now),
            RateDecision::Allowed
        );
    }

    #[test]
    fn test_retry_after_at_least_one_second() {
        let w = RateWindow::from_secs(600);
        let now = Utc::now();
        let last = now - Duration::seconds(600) + Duration::milliseconds(200);
        assert_eq!(
            w.check(Some(last), now),
            RateDecision::Limited {
                retry_after_secs: 1
            }
        );
    }

    #[test]
    fn test_cutoff() {
        let w = RateWindow::from_secs(60);
        let now = Utc::now();
        assert_eq!(w.cutoff(now), now - Duration::seconds(60));
    }
}
