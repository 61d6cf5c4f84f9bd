//! Deferred-execution scheduling.
//!
//! The deferred-value core never runs a subscriber callback inside the call
//! that registered it or inside the call that settled its parent. Instead it
//! submits zero-argument units of work to a queue that its owner drives to
//! completion after the current synchronous call stack unwinds.
//!
//! The core depends only on the [`Schedule`] trait, so any FIFO,
//! post-synchronous, single-threaded execution facility can host it.
//! [`TaskQueue`] is the reference implementation used by the tests and
//! benchmarks of this crate.
//!
//! # Examples
//!
//! ```rust
//! use deferral::scheduler::{Schedule, TaskQueue};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let queue = TaskQueue::new();
//! let order = Rc::new(RefCell::new(Vec::new()));
//!
//! for label in ["first", "second"] {
//!     let order = Rc::clone(&order);
//!     queue.enqueue(Box::new(move || order.borrow_mut().push(label)));
//! }
//!
//! assert!(order.borrow().is_empty());
//! assert_eq!(queue.run_until_idle(), 2);
//! assert_eq!(*order.borrow(), vec!["first", "second"]);
//! ```

mod queue;

pub use queue::{Schedule, Task, TaskQueue};
