//! Retry loop: run an operation until success or the policy says stop.

use std::fmt::Display;
use std::time::Instant;

use super::policy::{RetryDecision, RetryPolicy};

/// Runs `op` until it succeeds, the failure is classified non-retriable,
/// or the policy's attempt/timeout budget is exhausted. The most recent
/// failure is returned unchanged, never wrapped.
///
/// `classify` must be a pure predicate: `true` means the failure is
/// transient and worth retrying. A non-retriable failure propagates
/// immediately, without any sleep, even on the first attempt.
///
/// Each call is an independent retry session with its own attempt counter
/// and start time.
pub fn run_with_retry<T, E, F, C>(policy: &RetryPolicy, classify: C, mut op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Result<T, E>,
    C: Fn(&E) -> bool,
{
    let start = Instant::now();
    let mut attempt = 1u32;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if !classify(&e) => return Err(e),
            Err(e) => match policy.decide(attempt, start.elapsed()) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(wait) => {
                    tracing::warn!(
                        "attempt {attempt} failed, retrying in {:.3} seconds: {e}",
                        wait.as_secs_f64()
                    );
                    std::thread::sleep(wait);
                    attempt += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Policy that never sleeps, so the tests run instantly.
    fn instant_policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts: Some(attempts),
            wait_initial: Duration::ZERO,
            wait_jitter: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    #[test]
    fn returns_first_success() {
        let mut calls = 0;
        let result: Result<i32, String> = run_with_retry(&instant_policy(10), |_| true, || {
            calls += 1;
            Ok(42)
        });
        assert_eq!(result, Ok(42));
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let result: Result<i32, String> = run_with_retry(&instant_policy(10), |_| true, || {
            calls += 1;
            if calls < 4 {
                Err(format!("failure {calls}"))
            } else {
                Ok(7)
            }
        });
        assert_eq!(result, Ok(7));
        assert_eq!(calls, 4);
    }

    #[test]
    fn exhaustion_returns_the_last_failure() {
        let mut calls = 0;
        let result: Result<(), String> = run_with_retry(&instant_policy(3), |_| true, || {
            calls += 1;
            Err(format!("failure {calls}"))
        });
        assert_eq!(calls, 3);
        assert_eq!(result, Err("failure 3".to_string()));
    }

    #[test]
    fn non_retriable_failure_propagates_immediately() {
        let mut calls = 0;
        let start = Instant::now();
        let result: Result<(), String> = run_with_retry(
            &RetryPolicy::default(),
            |e: &String| e != "fatal",
            || {
                calls += 1;
                Err("fatal".to_string())
            },
        );
        assert_eq!(calls, 1);
        assert_eq!(result, Err("fatal".to_string()));
        // No backoff sleep happened (default initial wait is 1s).
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn sessions_are_independent() {
        let policy = instant_policy(2);
        for _ in 0..3 {
            let mut calls = 0;
            let result: Result<(), String> = run_with_retry(&policy, |_| true, || {
                calls += 1;
                Err("nope".to_string())
            });
            assert_eq!(calls, 2);
            assert!(result.is_err());
        }
    }
}
