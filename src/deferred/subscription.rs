//! Subscription records and the notification unit of work.

use super::value::Deferred;

/// A one-shot subscriber callback.
///
/// `Ok(value)` fulfills the subscription's child with `value`; `Err(reason)`
/// rejects it with `reason`. Returning `Err` is this crate's rendition of a
/// handler throwing: the failure is caught at the handler boundary and never
/// escapes to whoever drives the queue.
pub type Handler<T> = Box<dyn FnOnce(T) -> Result<T, T>>;

/// A registered pair of optional handlers plus the child deferred value they
/// will settle.
///
/// Consumed exactly once, by [`notify`](Self::notify).
pub(crate) struct Subscription<T> {
    on_fulfilled: Option<Handler<T>>,
    on_rejected: Option<Handler<T>>,
    child: Deferred<T>,
}

impl<T: Clone + 'static> Subscription<T> {
    pub(crate) fn new(
        on_fulfilled: Option<Handler<T>>,
        on_rejected: Option<Handler<T>>,
        child: Deferred<T>,
    ) -> Self {
        Self {
            on_fulfilled,
            on_rejected,
            child,
        }
    }

    /// The notification unit of work: runs on a queue turn after the parent
    /// settled with `settled`.
    ///
    /// The handler matching the parent's settlement runs with the payload
    /// and its outcome settles the child. A missing handler forwards the
    /// settlement unchanged: fulfillment passes through a bare `catch`
    /// stage, and rejection propagates past a stage that only supplied a
    /// fulfillment handler.
    pub(crate) fn notify(self, settled: Result<T, T>) {
        match settled {
            Ok(value) => match self.on_fulfilled {
                Some(handler) => self.child.complete(handler(value)),
                None => self.child.complete(Ok(value)),
            },
            Err(reason) => match self.on_rejected {
                Some(handler) => self.child.complete(handler(reason)),
                None => self.child.complete(Err(reason)),
            },
        }
    }
}
