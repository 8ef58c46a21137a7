use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use triage_notify::error::NotifyError;
use triage_notify::retry::RetryPolicy;
use triage_notify::sns::is_retryable_code;

fn transient(message: &str) -> NotifyError {
    NotifyError::Publish {
        message: message.to_string(),
        retryable: true,
    }
}

fn permanent(message: &str) -> NotifyError {
    NotifyError::Publish {
        message: message.to_string(),
        retryable: false,
    }
}

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(200),
    }
}

#[test]
fn backoff_doubles() {
    let p = policy(5);
    assert_eq!(p.delay_after(1), Duration::from_millis(200));
    assert_eq!(p.delay_after(2), Duration::from_millis(400));
    assert_eq!(p.delay_after(3), Duration::from_millis(800));
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_failures() {
    let calls = AtomicU32::new(0);
    let result = policy(3)
        .run(|| async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(transient("throttled"))
            } else {
                Ok(n)
            }
        })
        .await;

    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_attempts() {
    let calls = AtomicU32::new(0);
    let result: Result<(), _> = policy(3)
        .run(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(transient("connection reset"))
        })
        .await;

    match result {
        Err(NotifyError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(last.to_string().contains("connection reset"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn first_success_makes_one_call() {
    let calls = AtomicU32::new(0);
    let result = policy(3)
        .run(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, NotifyError>("msg-1")
        })
        .await;
    assert_eq!(result.unwrap(), "msg-1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn permanent_errors_are_not_retried() {
    let calls = AtomicU32::new(0);
    let started = tokio::time::Instant::now();
    let result: Result<(), _> = policy(3)
        .run(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(permanent("Invalid parameter: TopicArn"))
        })
        .await;

    match result {
        Err(e @ NotifyError::Publish { .. }) => {
            assert!(!e.is_retryable());
            assert!(e.to_string().contains("Invalid parameter"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[test]
fn only_transient_service_codes_are_retryable() {
    assert!(is_retryable_code(None));
    assert!(is_retryable_code(Some("Throttling")));
    assert!(is_retryable_code(Some("InternalError")));
    assert!(!is_retryable_code(Some("InvalidParameter")));
    assert!(!is_retryable_code(Some("NotFound")));
    assert!(!is_retryable_code(Some("AuthorizationError")));
    assert!(!is_retryable_code(Some("")));
}
