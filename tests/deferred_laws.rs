//! Property-based tests for deferred-value laws.
//!
//! This module verifies, over arbitrary payloads:
//!
//! - **Settlement laws**: setup fulfillment/rejection/failure are observable
//!   before any subscriber runs; the first settlement wins
//! - **Chaining law**: a handler's `Ok`/`Err` outcome settles the child
//! - **Passthrough law**: a handler-less subscription forwards kind + value
//! - **Propagation law**: rejection skips fulfillment-only stages unchanged

use deferral::deferred::{Deferred, State};
use deferral::scheduler::TaskQueue;
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// Settlement laws
// =============================================================================

proptest! {
    /// Fulfilling from the setup routine is observable immediately, before
    /// any subscription exists or any queue turn has run.
    #[test]
    fn prop_setup_fulfillment_is_observable(value in any::<i32>()) {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(queue, move |fulfill, _reject| {
            fulfill.settle(value);
            Ok(())
        });

        prop_assert_eq!(deferred.state(), State::Fulfilled);
        prop_assert_eq!(deferred.value(), Some(value));
    }
}

proptest! {
    #[test]
    fn prop_setup_rejection_is_observable(reason in any::<i32>()) {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(queue, move |_fulfill, reject| {
            reject.settle(reason);
            Ok(())
        });

        prop_assert_eq!(deferred.state(), State::Rejected);
        prop_assert_eq!(deferred.value(), Some(reason));
    }
}

proptest! {
    /// A setup routine that fails rejects the instance with the returned
    /// value.
    #[test]
    fn prop_failing_setup_rejects(reason in any::<i32>()) {
        let queue = TaskQueue::new();
        let deferred: Deferred<i32> = Deferred::new(queue, move |_fulfill, _reject| Err(reason));

        prop_assert_eq!(deferred.settlement(), Some(Err(reason)));
    }
}

proptest! {
    /// First settlement wins: later calls on either handle are no-ops.
    #[test]
    fn prop_first_settlement_wins(first in any::<i32>(), second in any::<i32>()) {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(queue, move |fulfill, reject| {
            fulfill.settle(first);
            reject.settle(second);
            fulfill.settle(second);
            Ok(())
        });

        prop_assert_eq!(deferred.settlement(), Some(Ok(first)));
    }
}

// =============================================================================
// Chaining law
// =============================================================================

proptest! {
    /// A fulfillment handler returning `Ok(w)` yields a child fulfilled
    /// with `w`; returning `Err(w)` yields a child rejected with `w`.
    #[test]
    fn prop_handler_outcome_settles_the_child(
        start in any::<i32>(),
        next in any::<i32>(),
        fail in any::<bool>(),
    ) {
        let queue = TaskQueue::new();
        let child = Deferred::fulfilled(queue.clone(), start)
            .then(move |_| if fail { Err(next) } else { Ok(next) });

        queue.run_until_idle();
        let expected = if fail { Err(next) } else { Ok(next) };
        prop_assert_eq!(child.settlement(), Some(expected));
    }
}

// =============================================================================
// Passthrough law
// =============================================================================

proptest! {
    /// A subscription with no handlers forwards the parent's settlement
    /// unchanged, kind and value both.
    #[test]
    fn prop_bare_subscription_forwards_settlement(value in any::<i32>(), rejected in any::<bool>()) {
        let queue = TaskQueue::new();
        let parent = if rejected {
            Deferred::rejected(queue.clone(), value)
        } else {
            Deferred::fulfilled(queue.clone(), value)
        };
        let child = parent.subscribe(None, None);

        queue.run_until_idle();
        prop_assert_eq!(child.settlement(), parent.settlement());
    }
}

// =============================================================================
// Propagation law
// =============================================================================

proptest! {
    /// Rejection propagates through a stage that only supplied a
    /// fulfillment handler, without invoking it.
    #[test]
    fn prop_rejection_skips_fulfillment_handlers(reason in any::<i32>()) {
        let queue = TaskQueue::new();
        let invoked = Rc::new(Cell::new(false));
        let flag = Rc::clone(&invoked);

        let child = Deferred::rejected(queue.clone(), reason).then(move |value| {
            flag.set(true);
            Ok(value)
        });

        queue.run_until_idle();
        prop_assert!(!invoked.get());
        prop_assert_eq!(child.settlement(), Some(Err(reason)));
    }
}
