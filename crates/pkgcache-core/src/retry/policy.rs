use std::time::Duration;

use crate::config::RetryConfig;

use super::error::ErrorKind;

/// Used when the configured base delay is not a representable duration.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(250);

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    GiveUp,
    RetryAfter(Duration),
}

/// Exponential backoff: `base_delay * 2^(attempt - 1)`, capped at `max_delay`,
/// for at most `max_attempts` attempts per URL.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per URL, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::try_from_secs_f64(cfg.base_delay_secs.max(0.0))
                .unwrap_or_else(|_| DEFAULT_BASE_DELAY),
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt + 1`. `attempt` is 1-based.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts || !kind.is_transient() {
            RetryDecision::GiveUp
        } else {
            RetryDecision::RetryAfter(self.backoff(attempt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.base_delay, Duration::from_millis(250));
        assert_eq!(p.max_delay, Duration::from_secs(30));
    }

    #[test]
    fn backoff_doubles_until_cap() {
        let p = RetryPolicy {
            max_attempts: 20,
            ..RetryPolicy::default()
        };
        assert_eq!(p.backoff(1), Duration::from_millis(250));
        assert_eq!(p.backoff(2), Duration::from_millis(500));
        assert_eq!(p.backoff(3), Duration::from_secs(1));
        assert_eq!(p.backoff(12), Duration::from_secs(30));
        assert_eq!(p.backoff(100), Duration::from_secs(30));
    }

    #[test]
    fn permanent_errors_give_up_immediately() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Permanent), RetryDecision::GiveUp);
        assert_eq!(
            p.decide(1, ErrorKind::Throttled),
            RetryDecision::RetryAfter(Duration::from_millis(250))
        );
    }

    #[test]
    fn stops_at_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(p.decide(2, ErrorKind::Timeout), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(3, ErrorKind::Timeout), RetryDecision::GiveUp);
    }

    #[test]
    fn unrepresentable_base_delay_falls_back() {
        for secs in [f64::INFINITY, 1e300] {
            let cfg = RetryConfig {
                base_delay_secs: secs,
                ..RetryConfig::default()
            };
            assert_eq!(RetryPolicy::from(&cfg).base_delay, DEFAULT_BASE_DELAY);
        }
        let cfg = RetryConfig {
            base_delay_secs: -1.0,
            ..RetryConfig::default()
        };
        assert_eq!(RetryPolicy::from(&cfg).base_delay, Duration::ZERO);
    }

    #[test]
    fn from_config_clamps_attempts() {
        let cfg = RetryConfig {
            max_attempts: 0,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        };
        let p = RetryPolicy::from(&cfg);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.base_delay, Duration::from_millis(500));
        assert_eq!(p.decide(1, ErrorKind::Connection), RetryDecision::GiveUp);
    }
}
