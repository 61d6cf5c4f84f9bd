//! The deferred value: a settlement state machine with asynchronous
//! subscriber notification and chaining.
//!
//! A [`Deferred`] starts pending and settles at most once, either fulfilled
//! or rejected, carrying an arbitrary payload either way. Interest is
//! registered with [`Deferred::subscribe`] (or the [`then`]/[`catch`] sugar),
//! which immediately returns a new child instance settled later from the
//! handler's outcome. Handlers always run on a later turn of the injected
//! scheduler queue, never synchronously.
//!
//! # Examples
//!
//! ```rust
//! use deferral::deferred::{Deferred, State};
//! use deferral::scheduler::TaskQueue;
//!
//! let queue = TaskQueue::new();
//! let deferred = Deferred::new(queue.clone(), |fulfill, _reject| {
//!     fulfill.settle(10);
//!     Ok(())
//! });
//! assert_eq!(deferred.state(), State::Fulfilled);
//!
//! let doubled = deferred.then(|value| Ok(value * 2));
//! assert_eq!(doubled.state(), State::Pending);
//!
//! queue.run_until_idle();
//! assert_eq!(doubled.value(), Some(20));
//! ```
//!
//! [`then`]: Deferred::then
//! [`catch`]: Deferred::catch

mod state;
mod subscription;
mod value;

pub use state::State;
pub use subscription::Handler;
pub use value::{Deferred, Fulfill, Reject};
