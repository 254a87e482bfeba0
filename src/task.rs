//! Task polling utilities
//!
//! Provides a helper for polling async tasks spawned on the tokio runtime
//! from a synchronous frame loop.

use tokio::task::{JoinError, JoinSet};

/// Result of polling a set of tasks
pub enum PollResult<T> {
    /// No task to poll (set is empty)
    NoTask,
    /// Tasks are still running and none has finished
    Pending,
    /// One task completed with result (may be Ok or join error)
    Complete(Result<T, JoinError>),
}

/// Take the next finished task out of a set without waiting.
///
/// Tasks are returned in the order they finish, not the order they were
/// spawned. Call repeatedly until `Pending` or `NoTask` to drain every
/// finished task.
///
/// # Example
/// ```ignore
/// loop {
///     match poll_set(&mut self.pending) {
///         PollResult::Complete(Ok(Ok(chapters))) => { /* success */ }
///         PollResult::Complete(Ok(Err(e))) => { /* task returned error */ }
///         PollResult::Complete(Err(e)) => { /* task panicked */ }
///         PollResult::Pending | PollResult::NoTask => break,
///     }
/// }
/// ```
pub fn poll_set<T: 'static>(set: &mut JoinSet<T>) -> PollResult<T> {
    if set.is_empty() {
        return PollResult::NoTask;
    }

    match set.try_join_next() {
        Some(result) => PollResult::Complete(result),
        None => PollResult::Pending,
    }
}
