use super::*;

#[test]
fn test_guard_detects_cycle() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::with_profile(RecursionProfile::MemberLookup);
    assert!(guard.enter(1).is_entered());
    assert!(guard.enter(1).is_cycle());
    assert!(guard.is_visiting(&1));
    guard.leave(1);
    assert!(!guard.is_visiting(&1));
    assert_eq!(guard.depth(), 0);
}

#[test]
fn test_guard_depth_limit_is_sticky() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(2, 100);
    assert!(guard.enter(1).is_entered());
    assert!(guard.enter(2).is_entered());
    assert_eq!(guard.enter(3), RecursionResult::DepthExceeded);
    guard.leave(2);
    guard.leave(1);
    assert!(guard.is_exceeded());
    guard.reset();
    assert!(!guard.is_exceeded());
}

#[test]
fn test_guard_iteration_budget() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::with_profile(RecursionProfile::Custom {
        max_depth: 10,
        max_iterations: 2,
    });
    assert!(guard.scope(1, || ()).is_ok());
    assert!(guard.scope(2, || ()).is_ok());
    assert_eq!(guard.scope(3, || ()), Err(RecursionResult::IterationExceeded));
}

#[test]
fn test_depth_counter() {
    let mut counter = DepthCounter::new(1);
    assert!(counter.enter());
    assert!(!counter.enter());
    assert!(counter.is_exceeded());
    counter.leave();
    assert_eq!(counter.depth(), 0);
}

#[test]
fn test_profiles_read_limits() {
    assert_eq!(
        RecursionProfile::Specialization.max_depth(),
        crate::limits::MAX_SPECIALIZATION_DEPTH
    );
    assert_eq!(RecursionProfile::Formatting.max_depth(), crate::limits::MAX_FORMAT_DEPTH);
}
