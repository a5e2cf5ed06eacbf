use std::time::Duration;

use super::RetryPolicy;
use crate::core::error::ConfigError;

#[test]
fn test_default_policy_is_three_attempts_one_second_apart() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert!(policy.validate().is_ok());
    assert_eq!(policy.backoff_duration_for_retry(0), Duration::from_secs(1));
    assert_eq!(policy.backoff_duration_for_retry(1), Duration::from_secs(1));
}

#[test]
fn test_validate_rejects_zero_attempts_and_inverted_bounds() {
    let zero = RetryPolicy::fixed(0, 10);
    assert_eq!(
        zero.validate(),
        Err(ConfigError::InvalidRetryPolicy {
            reason: "max_attempts must be >= 1".to_string(),
        })
    );

    let inverted = RetryPolicy {
        max_attempts: 2,
        initial_backoff_ms: 500,
        max_backoff_ms: 100,
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::InvalidRetryPolicy { .. })
    ));
}

#[test]
fn test_exponential_backoff_is_capped() {
    let policy = RetryPolicy {
        max_attempts: 5,
        initial_backoff_ms: 100,
        max_backoff_ms: 350,
    };

    assert_eq!(policy.backoff_duration_for_retry(0), Duration::from_millis(100));
    assert_eq!(policy.backoff_duration_for_retry(1), Duration::from_millis(200));
    assert_eq!(policy.backoff_duration_for_retry(2), Duration::from_millis(350));
    assert_eq!(policy.backoff_duration_for_retry(70), Duration::from_millis(350));
}

#[test]
fn test_has_attempts_after() {
    let policy = RetryPolicy::fixed(3, 0);
    assert!(policy.has_attempts_after(1));
    assert!(policy.has_attempts_after(2));
    assert!(!policy.has_attempts_after(3));
}

#[tokio::test]
async fn test_zero_delay_does_not_sleep() {
    let policy = RetryPolicy::fixed(3, 0);
    let started = std::time::Instant::now();
    policy.sleep_before_retry(1).await;
    assert!(started.elapsed() < Duration::from_millis(50));
}
