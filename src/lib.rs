//! # deferral
//!
//! A from-scratch deferred-value ("promise") abstraction. A [`Deferred`]
//! represents the eventual result of an operation that may settle later,
//! either successfully or with failure. No host deferred-value primitive is
//! involved: settlement, subscriber notification, and chaining are
//! implemented directly on top of an injected FIFO task queue.
//!
//! ## Overview
//!
//! - **Settlement state machine**: pending → fulfilled | rejected, terminal,
//!   one-way; the first settlement wins and later attempts are no-ops.
//! - **Subscriber registry**: callbacks registered before settlement are
//!   recorded; callbacks registered after settlement are scheduled right
//!   away. Either way they run on a later queue turn, never synchronously.
//! - **Chaining**: every subscription produces a new [`Deferred`] settled
//!   from the outcome of the supplied handler, with failures translating
//!   into rejection of the child.
//!
//! "Asynchronous" here means deferred to a later turn of the same logical
//! execution stream. The model is strictly single-threaded cooperative
//! scheduling; there is no parallelism anywhere in this crate.
//!
//! ## Example
//!
//! ```rust
//! use deferral::deferred::Deferred;
//! use deferral::scheduler::TaskQueue;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let queue = TaskQueue::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let first = Rc::clone(&seen);
//! let second = Rc::clone(&seen);
//! Deferred::new(queue.clone(), |fulfill, _reject| {
//!     fulfill.settle(10);
//!     Ok(())
//! })
//! .then(move |value| {
//!     first.borrow_mut().push(value);
//!     Ok(value + 5)
//! })
//! .then(move |value| {
//!     second.borrow_mut().push(value);
//!     Ok(value)
//! });
//!
//! // Handlers never run synchronously, even on a settled instance.
//! assert!(seen.borrow().is_empty());
//!
//! queue.run_until_idle();
//! assert_eq!(*seen.borrow(), vec![10, 15]);
//! ```
//!
//! [`Deferred`]: deferred::Deferred

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the public surface of the crate.
///
/// # Usage
///
/// ```rust
/// use deferral::prelude::*;
/// ```
pub mod prelude {
    pub use crate::deferred::{Deferred, Fulfill, Handler, Reject, State};
    pub use crate::scheduler::{Schedule, Task, TaskQueue};
}

pub mod deferred;
pub mod scheduler;
