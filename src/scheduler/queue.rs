//! FIFO task queue for cooperative, post-synchronous execution.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A zero-argument unit of work submitted to a scheduler.
///
/// Each task runs exactly once, to completion, on a later queue turn.
pub type Task = Box<dyn FnOnce()>;

/// The scheduler seam the deferred-value core depends on.
///
/// Submitting a task must guarantee that it runs strictly after the current
/// synchronous execution completes and after any work already queued ahead
/// of it (FIFO). Tasks never run concurrently with each other or with the
/// main line of execution.
///
/// The core holds its scheduler behind this trait rather than reaching for
/// any ambient runtime facility, so it is portable across hosts that provide
/// any FIFO post-synchronous execution mechanism (timer, task queue, manual
/// run loop).
pub trait Schedule {
    /// Adds a unit of work to the end of the queue.
    ///
    /// Never runs `task` synchronously.
    fn enqueue(&self, task: Task);
}

/// A single-threaded FIFO task queue.
///
/// `TaskQueue` is a cheaply cloneable handle; clones share the same
/// underlying queue. Its owner drives execution explicitly with
/// [`run_next`](Self::run_next) or [`run_until_idle`](Self::run_until_idle),
/// which stands in for the host runtime's own drain cycle.
///
/// # Re-entrancy
///
/// A running task may enqueue further tasks; the queue releases its interior
/// borrow before a task runs, so re-entrant submission is always safe. Work
/// enqueued by a running task is picked up by the same `run_until_idle`
/// call.
///
/// # Thread Safety
///
/// This type is NOT thread-safe. The whole crate models single-threaded
/// cooperative scheduling.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    /// Creates a new empty queue.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferral::scheduler::TaskQueue;
    ///
    /// let queue = TaskQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Removes and runs the task at the front of the queue.
    ///
    /// Returns `false` if the queue was empty. The interior borrow is
    /// released before the task runs, so the task may enqueue further work.
    pub fn run_next(&self) -> bool {
        let task = self.tasks.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Runs tasks in FIFO order until the queue is empty, including tasks
    /// enqueued by the tasks themselves.
    ///
    /// Returns the number of tasks run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deferral::scheduler::{Schedule, TaskQueue};
    ///
    /// let queue = TaskQueue::new();
    /// let inner = queue.clone();
    /// queue.enqueue(Box::new(move || inner.enqueue(Box::new(|| ()))));
    ///
    /// assert_eq!(queue.run_until_idle(), 2);
    /// ```
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    /// Returns the number of tasks currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Returns `true` if no tasks are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl Schedule for TaskQueue {
    #[inline]
    fn enqueue(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TaskQueue")
            .field("queued", &self.len())
            .finish()
    }
}
