//! 限流器与访问门卫的组合流程测试
//!
//! 模拟请求层的写前检查：先过时段门卫，再过限流器。

use application::{
    ApplicationError, ClientIdentity, Clock, ManualClock, SlidingWindowRateLimiter, TimeWindowGate,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

/// 请求层的写前检查：HTTP 状态映射由外层负责，这里只关心错误分类
fn guard_request(
    gate: &TimeWindowGate,
    limiter: &SlidingWindowRateLimiter,
    identity: &ClientIdentity,
    clock: &dyn Clock,
) -> Result<(), ApplicationError> {
    let now = clock.now();
    gate.check_datetime(now)?;
    limiter.check_request(identity, now)?;
    Ok(())
}

fn workday_morning() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap()
}

#[test]
fn test_five_requests_pass_sixth_rejected_with_retry_after() {
    let config = config::AppConfig::default();
    let gate = TimeWindowGate::from_config(&config.access_window).unwrap();
    let limiter = SlidingWindowRateLimiter::from_config(&config.rate_limit);
    let clock = ManualClock::new(workday_morning());
    let identity = ClientIdentity::Ip("203.0.113.7".parse().unwrap());

    for i in 0..5 {
        assert!(
            guard_request(&gate, &limiter, &identity, &clock).is_ok(),
            "request {} should pass",
            i + 1
        );
        clock.advance_secs(1);
    }

    match guard_request(&gate, &limiter, &identity, &clock) {
        Err(ApplicationError::RateLimited { retry_after_secs }) => {
            assert!(retry_after_secs > 0);
            assert!(retry_after_secs <= 60);
        }
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[test]
fn test_request_accepted_after_window_elapses() {
    let limiter = SlidingWindowRateLimiter::new(5, 60);
    let clock = ManualClock::new(workday_morning());
    let identity = ClientIdentity::User(Uuid::new_v4());

    for _ in 0..5 {
        limiter.check_request(&identity, clock.now()).unwrap();
    }
    assert!(limiter.check_request(&identity, clock.now()).is_err());

    // 最老请求滑出窗口后恢复放行
    clock.advance_secs(61);
    assert!(limiter.check_request(&identity, clock.now()).is_ok());
}

#[test]
fn test_gate_rejection_is_terminal_rate_limit_is_retryable() {
    let config = config::AppConfig::default();
    let gate = TimeWindowGate::from_config(&config.access_window).unwrap();
    let limiter = SlidingWindowRateLimiter::new(1, 60);
    let identity = ClientIdentity::User(Uuid::new_v4());

    // 时段外：终态错误
    let night = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap());
    let err = guard_request(&gate, &limiter, &identity, &night).unwrap_err();
    assert!(matches!(err, ApplicationError::AccessDenied(_)));
    assert!(!err.is_retryable());

    // 限流：可重试错误
    let day = ManualClock::new(workday_morning());
    guard_request(&gate, &limiter, &identity, &day).unwrap();
    let err = guard_request(&gate, &limiter, &identity, &day).unwrap_err();
    assert!(err.is_retryable());
}

#[test]
fn test_gate_boundaries_inclusive_in_flow() {
    let gate = TimeWindowGate::default();
    let limiter = SlidingWindowRateLimiter::default();
    let identity = ClientIdentity::User(Uuid::new_v4());

    let at_start = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap());
    assert!(guard_request(&gate, &limiter, &identity, &at_start).is_ok());

    let at_end = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap());
    assert!(guard_request(&gate, &limiter, &identity, &at_end).is_ok());

    let before = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 8, 59, 59).unwrap());
    assert!(guard_request(&gate, &limiter, &identity, &before).is_err());

    let after = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 1).unwrap());
    assert!(guard_request(&gate, &limiter, &identity, &after).is_err());
}
