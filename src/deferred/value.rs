//! The deferred value itself: construction, settlement, and chaining.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use static_assertions::assert_not_impl_any;

use super::state::{Slot, State};
use super::subscription::{Handler, Subscription};
use crate::scheduler::Schedule;

/// A deferred value: the eventual result of an operation that may settle
/// later, either fulfilled or rejected.
///
/// `Deferred<T>` is a cheaply cloneable handle; clones observe the same
/// underlying entity. The payload type `T` serves both the fulfillment value
/// and the rejection reason, and must be `Clone` because one settlement fans
/// out to every subscriber.
///
/// Settlement is monotonic: the first call to a settlement handle wins and
/// every later attempt is a no-op. Subscriber callbacks never run inside the
/// call that registered them or inside the call that settled their parent;
/// there is always at least one queue hop in between.
///
/// # Thread Safety
///
/// This type is NOT thread-safe, deliberately: the model is single-threaded
/// cooperative scheduling, and each instance is only ever settled from its
/// own setup routine or its own parent's notification task.
///
/// # Examples
///
/// ```rust
/// use deferral::deferred::{Deferred, State};
/// use deferral::scheduler::TaskQueue;
///
/// let queue = TaskQueue::new();
/// let deferred = Deferred::new(queue.clone(), |fulfill, _reject| {
///     fulfill.settle("ready");
///     Ok(())
/// });
///
/// assert_eq!(deferred.state(), State::Fulfilled);
/// assert_eq!(deferred.value(), Some("ready"));
/// ```
pub struct Deferred<T> {
    slot: Rc<RefCell<Slot<T>>>,
    scheduler: Rc<dyn Schedule>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

/// The fulfillment side of a deferred value's settlement pair.
///
/// Handed to the setup routine by [`Deferred::new`]. Cloneable and
/// capturable, so a producer can settle the instance long after construction
/// returned. Settling an already-settled instance is a no-op.
pub struct Fulfill<T> {
    slot: Rc<RefCell<Slot<T>>>,
    scheduler: Rc<dyn Schedule>,
}

impl<T> Clone for Fulfill<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<T: Clone + 'static> Fulfill<T> {
    /// Fulfills the bound instance with `value`, if it is still pending.
    ///
    /// Drains the recorded subscriptions into the scheduler, in registration
    /// order. No-op once the instance has settled.
    pub fn settle(&self, value: T) {
        settle(&self.slot, &self.scheduler, Ok(value));
    }
}

/// The rejection side of a deferred value's settlement pair.
///
/// Symmetric to [`Fulfill`]: cloneable, capturable, idempotent.
pub struct Reject<T> {
    slot: Rc<RefCell<Slot<T>>>,
    scheduler: Rc<dyn Schedule>,
}

impl<T> Clone for Reject<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<T: Clone + 'static> Reject<T> {
    /// Rejects the bound instance with `reason`, if it is still pending.
    ///
    /// No-op once the instance has settled.
    pub fn settle(&self, reason: T) {
        settle(&self.slot, &self.scheduler, Err(reason));
    }
}

impl<T: Clone + 'static> Deferred<T> {
    /// Creates a pending deferred value and runs `setup` synchronously,
    /// exactly once, with the two settlement handles bound to it.
    ///
    /// `setup` may settle the instance immediately, stash a handle for later
    /// settlement, or return `Err(reason)`, which rejects the instance with
    /// `reason` provided it has not already settled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferral::deferred::{Deferred, State};
    /// use deferral::scheduler::TaskQueue;
    ///
    /// let queue = TaskQueue::new();
    ///
    /// // Settled synchronously by the setup routine.
    /// let fulfilled = Deferred::new(queue.clone(), |fulfill, _reject| {
    ///     fulfill.settle(10);
    ///     Ok(())
    /// });
    /// assert_eq!(fulfilled.value(), Some(10));
    ///
    /// // A failing setup routine rejects the instance.
    /// let rejected: Deferred<i32> = Deferred::new(queue.clone(), |_fulfill, _reject| Err(7));
    /// assert_eq!(rejected.state(), State::Rejected);
    /// ```
    pub fn new<S, F>(scheduler: S, setup: F) -> Self
    where
        S: Schedule + 'static,
        F: FnOnce(Fulfill<T>, Reject<T>) -> Result<(), T>,
    {
        let deferred = Self::unsettled(Rc::new(scheduler));
        let fulfill = Fulfill {
            slot: Rc::clone(&deferred.slot),
            scheduler: Rc::clone(&deferred.scheduler),
        };
        let reject = Reject {
            slot: Rc::clone(&deferred.slot),
            scheduler: Rc::clone(&deferred.scheduler),
        };
        let boundary = reject.clone();
        if let Err(reason) = setup(fulfill, reject) {
            // First settlement wins; a failure after settling is ignored.
            boundary.settle(reason);
        }
        deferred
    }

    /// Creates an already-fulfilled deferred value.
    pub fn fulfilled<S: Schedule + 'static>(scheduler: S, value: T) -> Self {
        Self::new(scheduler, move |fulfill, _reject| {
            fulfill.settle(value);
            Ok(())
        })
    }

    /// Creates an already-rejected deferred value.
    pub fn rejected<S: Schedule + 'static>(scheduler: S, reason: T) -> Self {
        Self::new(scheduler, move |_fulfill, reject| {
            reject.settle(reason);
            Ok(())
        })
    }

    /// Registers interest in this value's settlement and returns the child
    /// deferred value the subscription will settle.
    ///
    /// The child is returned immediately and synchronously, whatever the
    /// parent's current state. If the parent is still pending the
    /// subscription is recorded; if it already settled, the notification is
    /// submitted to the scheduler right away. The handlers themselves never
    /// run inside this call.
    ///
    /// When the parent fulfills, `on_fulfilled` runs with the payload and
    /// its outcome settles the child; a missing `on_fulfilled` fulfills the
    /// child with the parent's payload unchanged. Rejection is symmetric
    /// with `on_rejected`. `subscribe(None, None)` is therefore an identity
    /// link in a chain.
    ///
    /// Each call creates an independent child; siblings are notified in
    /// registration order and one sibling's handler outcome never affects
    /// another's.
    pub fn subscribe(
        &self,
        on_fulfilled: Option<Handler<T>>,
        on_rejected: Option<Handler<T>>,
    ) -> Self {
        let child = Self::unsettled(Rc::clone(&self.scheduler));
        let subscription = Subscription::new(on_fulfilled, on_rejected, child.clone());
        let late = self.slot.borrow_mut().register(subscription);
        if let Some((subscription, settled)) = late {
            self.scheduler
                .enqueue(Box::new(move || subscription.notify(settled)));
        }
        child
    }

    /// Chains a fulfillment handler; rejection propagates to the child
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferral::deferred::Deferred;
    /// use deferral::scheduler::TaskQueue;
    ///
    /// let queue = TaskQueue::new();
    /// let child = Deferred::fulfilled(queue.clone(), 10)
    ///     .then(|value| Ok(value + 5))
    ///     .then(|value| Ok(value * 2));
    ///
    /// queue.run_until_idle();
    /// assert_eq!(child.value(), Some(30));
    /// ```
    pub fn then<F>(&self, on_fulfilled: F) -> Self
    where
        F: FnOnce(T) -> Result<T, T> + 'static,
    {
        self.subscribe(Some(Box::new(on_fulfilled)), None)
    }

    /// Chains a combined fulfillment/rejection handler pair, as in mixed
    /// chains where one stage handles both outcomes.
    pub fn then_catch<F, G>(&self, on_fulfilled: F, on_rejected: G) -> Self
    where
        F: FnOnce(T) -> Result<T, T> + 'static,
        G: FnOnce(T) -> Result<T, T> + 'static,
    {
        self.subscribe(Some(Box::new(on_fulfilled)), Some(Box::new(on_rejected)))
    }

    /// Chains a rejection handler; fulfillment passes through to the child
    /// unchanged.
    ///
    /// A handler that returns `Ok` heals the chain back to fulfilled;
    /// returning `Err` re-rejects the child, enabling catch-chains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferral::deferred::Deferred;
    /// use deferral::scheduler::TaskQueue;
    ///
    /// let queue = TaskQueue::new();
    /// let healed = Deferred::rejected(queue.clone(), 10).catch(|reason| Ok(reason * 2));
    ///
    /// queue.run_until_idle();
    /// assert_eq!(healed.settlement(), Some(Ok(20)));
    /// ```
    pub fn catch<G>(&self, on_rejected: G) -> Self
    where
        G: FnOnce(T) -> Result<T, T> + 'static,
    {
        self.subscribe(None, Some(Box::new(on_rejected)))
    }

    /// Returns the current lifecycle state. Observable at any time.
    #[inline]
    pub fn state(&self) -> State {
        self.slot.borrow().state()
    }

    /// Returns a clone of the settled payload, or `None` while pending.
    ///
    /// Whether the payload is a fulfillment value or a rejection reason is
    /// determined by [`state`](Self::state).
    pub fn value(&self) -> Option<T> {
        self.settlement().map(|settled| match settled {
            Ok(value) | Err(value) => value,
        })
    }

    /// Returns the settled outcome — `Ok` for fulfillment, `Err` for
    /// rejection — or `None` while pending.
    pub fn settlement(&self) -> Option<Result<T, T>> {
        self.slot.borrow().settlement()
    }

    /// Settles this instance from a handler outcome. Used by the
    /// notification unit of work, which plays the role of the setup routine
    /// for chained children.
    pub(crate) fn complete(&self, settled: Result<T, T>) {
        settle(&self.slot, &self.scheduler, settled);
    }

    fn unsettled(scheduler: Rc<dyn Schedule>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot::new())),
            scheduler,
        }
    }
}

/// The single settlement path: transitions the slot out of `Pending` and
/// drains the recorded subscriptions into the scheduler, in registration
/// order. No-op when the slot already settled.
fn settle<T: Clone + 'static>(
    slot: &Rc<RefCell<Slot<T>>>,
    scheduler: &Rc<dyn Schedule>,
    settled: Result<T, T>,
) {
    let observers = {
        let mut slot = slot.borrow_mut();
        if !slot.state().is_pending() {
            return;
        }
        let next = match &settled {
            Ok(value) => Slot::Fulfilled(value.clone()),
            Err(reason) => Slot::Rejected(reason.clone()),
        };
        match std::mem::replace(&mut *slot, next) {
            Slot::Pending(observers) => observers,
            // Pending was checked under the same borrow.
            Slot::Fulfilled(_) | Slot::Rejected(_) => unreachable!(),
        }
    };
    // The borrow is released before any task is submitted.
    for subscription in observers {
        let settled = settled.clone();
        scheduler.enqueue(Box::new(move || subscription.notify(settled)));
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.slot.borrow() {
            Slot::Pending(_) => formatter.debug_tuple("Deferred").field(&"<pending>").finish(),
            Slot::Fulfilled(value) => formatter
                .debug_tuple("Deferred")
                .field(&State::Fulfilled)
                .field(value)
                .finish(),
            Slot::Rejected(reason) => formatter
                .debug_tuple("Deferred")
                .field(&State::Rejected)
                .field(reason)
                .finish(),
        }
    }
}

// The single-threaded cooperative model is part of the API contract.
assert_not_impl_any!(Deferred<i32>: Send, Sync);
assert_not_impl_any!(Fulfill<i32>: Send, Sync);
