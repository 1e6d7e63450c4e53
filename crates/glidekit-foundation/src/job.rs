//! Cancellable background work.
//!
//! A [`Job`] is the handle half of a host-spawned future: the controller
//! keeps the handle to ask whether the work is still running and to cancel
//! it, while the host polls the returned future on its executor.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Aborted};

/// Handle to a launched, abortable future.
#[derive(Debug)]
pub struct Job {
    abort_handle: AbortHandle,
    completed: Rc<Cell<bool>>,
}

impl Job {
    /// Wraps `task` as an abortable job.
    ///
    /// Returns the handle and the future the host must poll. The future
    /// resolves to `Err(Aborted)` if the job was cancelled first.
    pub fn launch<F>(task: F) -> (Job, impl Future<Output = Result<F::Output, Aborted>>)
    where
        F: Future,
    {
        let (abortable, abort_handle) = futures::future::abortable(task);
        let completed = Rc::new(Cell::new(false));
        let done = completed.clone();
        let future = async move {
            let result = abortable.await;
            done.set(true);
            result
        };
        (
            Job {
                abort_handle,
                completed,
            },
            future,
        )
    }

    /// Whether the job has neither completed nor been cancelled.
    pub fn is_active(&self) -> bool {
        !self.completed.get() && !self.abort_handle.is_aborted()
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort_handle.is_aborted()
    }

    /// Requests cancellation; the future resolves `Err(Aborted)` on its next poll.
    pub fn cancel(&self) {
        self.abort_handle.abort();
    }
}
