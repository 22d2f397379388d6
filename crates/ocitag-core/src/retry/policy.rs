use rand::Rng;
use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; propagate the failure.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy with jitter, an attempt limit, and an
/// optional elapsed-time budget.
///
/// The defaults are geared towards long-running CI pipelines rather than a
/// high-throughput service: waiting a few minutes on a flaky registry is
/// much better than failing the whole pipeline. Ignoring jitter, the
/// default wait sequence is
///
/// ```text
/// [1, 2, 4, 8, 16, 32, 64, 120, 120] seconds
/// sum = 367s = 6m7s
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first. `None` = unbounded.
    pub attempts: Option<u32>,
    /// Elapsed-time budget measured from the first attempt. A retry is
    /// abandoned when the next attempt could not even start within the
    /// budget. `None` = unbounded.
    pub timeout: Option<Duration>,
    /// Wait before the second attempt.
    pub wait_initial: Duration,
    /// Upper bound on any single wait, before jitter.
    pub wait_max: Duration,
    /// Upper bound of the uniform random jitter added to each wait.
    pub wait_jitter: Duration,
    /// Exponential growth factor.
    pub wait_exp_base: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: Some(10),
            timeout: None,
            wait_initial: Duration::from_secs(1),
            wait_max: Duration::from_secs(120),
            wait_jitter: Duration::from_secs(1),
            wait_exp_base: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Backoff before attempt `attempt + 1`, without jitter.
    ///
    /// `attempt` is 1-based (1 = first attempt). The value is
    /// `min(wait_max, wait_initial * base^(attempt-1))`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = self
            .wait_exp_base
            .powi(attempt.saturating_sub(1).min(i32::MAX as u32) as i32);
        let raw = self.wait_initial.as_secs_f64() * exp;
        Duration::from_secs_f64(raw.min(self.wait_max.as_secs_f64()))
    }

    /// Decide whether to retry after a failed `attempt`, given the time
    /// elapsed since the first attempt. Jitter is redrawn on every call.
    pub fn decide(&self, attempt: u32, elapsed: Duration) -> RetryDecision {
        if let Some(max) = self.attempts {
            if attempt >= max {
                return RetryDecision::NoRetry;
            }
        }

        let wait = self.backoff(attempt) + self.jitter();
        if let Some(budget) = self.timeout {
            if elapsed + wait >= budget {
                return RetryDecision::NoRetry;
            }
        }
        RetryDecision::RetryAfter(wait)
    }

    fn jitter(&self) -> Duration {
        if self.wait_jitter.is_zero() {
            return Duration::ZERO;
        }
        rand::thread_rng().gen_range(Duration::ZERO..self.wait_jitter)
    }

    /// Policy with no jitter (deterministic waits). Mainly for tests and
    /// for callers that coordinate their own spreading.
    pub fn without_jitter(self) -> Self {
        Self {
            wait_jitter: Duration::ZERO,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_without_jitter() {
        let p = RetryPolicy::default().without_jitter();
        let waits: Vec<f64> = (1..=9).map(|n| p.backoff(n).as_secs_f64()).collect();
        assert_eq!(
            waits,
            vec![1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 120.0, 120.0]
        );
    }

    #[test]
    fn respects_attempt_limit() {
        let p = RetryPolicy::default().without_jitter();
        assert!(matches!(
            p.decide(9, Duration::ZERO),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(10, Duration::ZERO), RetryDecision::NoRetry);
        assert_eq!(p.decide(11, Duration::ZERO), RetryDecision::NoRetry);
    }

    #[test]
    fn unbounded_attempts_cap_at_wait_max() {
        let mut p = RetryPolicy::default().without_jitter();
        p.attempts = None;
        match p.decide(1000, Duration::ZERO) {
            RetryDecision::RetryAfter(d) => assert_eq!(d, p.wait_max),
            other => panic!("expected retry, got {other:?}"),
        }
    }

    #[test]
    fn timeout_budget_stops_retrying() {
        let mut p = RetryPolicy::default().without_jitter();
        p.timeout = Some(Duration::from_secs(10));
        // Next wait would be 1s; 9.5s elapsed + 1s > 10s budget.
        assert_eq!(
            p.decide(1, Duration::from_secs_f64(9.5)),
            RetryDecision::NoRetry
        );
        // Plenty of budget left.
        assert!(matches!(
            p.decide(1, Duration::from_secs(1)),
            RetryDecision::RetryAfter(_)
        ));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let p = RetryPolicy::default();
        for _ in 0..100 {
            match p.decide(1, Duration::ZERO) {
                RetryDecision::RetryAfter(d) => {
                    assert!(d >= Duration::from_secs(1));
                    assert!(d < Duration::from_secs(2));
                }
                other => panic!("expected retry, got {other:?}"),
            }
        }
    }
}
