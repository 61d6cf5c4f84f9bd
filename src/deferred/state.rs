//! Settlement state: the observable lifecycle and its internal
//! representation.

use smallvec::SmallVec;

use super::subscription::Subscription;

/// The observable lifecycle state of a deferred value.
///
/// The transition is monotonic: once a value leaves `Pending` it never
/// changes state again, and the settled payload is write-once alongside that
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Not settled yet; subscribers are being recorded.
    Pending,
    /// Settled successfully; the payload is a fulfillment value.
    Fulfilled,
    /// Settled with failure; the payload is a rejection reason.
    Rejected,
}

impl State {
    /// Returns `true` if the value has not settled yet.
    #[inline]
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if the value settled successfully.
    #[inline]
    #[must_use]
    pub const fn is_fulfilled(self) -> bool {
        matches!(self, Self::Fulfilled)
    }

    /// Returns `true` if the value settled with failure.
    #[inline]
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Pending subscription records, in registration order.
///
/// Most deferred values carry at most a couple of subscribers, so the list
/// stays inline.
pub(crate) type Observers<T> = SmallVec<[Subscription<T>; 2]>;

/// The internal tagged state of a deferred value.
///
/// Observers live inside the `Pending` variant, so "observers exist only
/// while pending and are consumed exactly once, at settlement" holds by
/// construction: the settling transition replaces the variant and hands the
/// recorded subscriptions back to the caller.
pub(crate) enum Slot<T> {
    /// Unsettled; holds every subscription registered so far.
    Pending(Observers<T>),
    /// Settled with a fulfillment value.
    Fulfilled(T),
    /// Settled with a rejection reason.
    Rejected(T),
}

impl<T> Slot<T> {
    pub(crate) fn new() -> Self {
        Self::Pending(SmallVec::new())
    }

    pub(crate) const fn state(&self) -> State {
        match self {
            Self::Pending(_) => State::Pending,
            Self::Fulfilled(_) => State::Fulfilled,
            Self::Rejected(_) => State::Rejected,
        }
    }
}

impl<T: Clone> Slot<T> {
    /// Records a subscription while pending, or hands it back together with
    /// the settled outcome so the caller can schedule the notification.
    pub(crate) fn register(
        &mut self,
        subscription: Subscription<T>,
    ) -> Option<(Subscription<T>, Result<T, T>)> {
        match self {
            Self::Pending(observers) => {
                observers.push(subscription);
                None
            }
            Self::Fulfilled(value) => Some((subscription, Ok(value.clone()))),
            Self::Rejected(reason) => Some((subscription, Err(reason.clone()))),
        }
    }

    /// Returns the settled outcome, or `None` while pending.
    pub(crate) fn settlement(&self) -> Option<Result<T, T>> {
        match self {
            Self::Pending(_) => None,
            Self::Fulfilled(value) => Some(Ok(value.clone())),
            Self::Rejected(reason) => Some(Err(reason.clone())),
        }
    }
}
