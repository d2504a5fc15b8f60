//! Bounded concurrency for async work
//!
//! [`BoundedTaskPool`] drives a sequence of futures with at most `concurrency`
//! of them started and unsettled at any moment. Everything runs inside the
//! caller's task: nothing is spawned, so borrowed data can flow into the
//! futures and dropping the returned future drops the whole batch.
//!
//! Futures are lazy, so an iterator of futures is a sequence of deferred
//! units of work. When the iterator itself is lazy (e.g. `iter().map(..)`),
//! a future is only created once a slot is free, which keeps memory at
//! O(pending + concurrency).

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};

/// Concurrency limiter for a batch of fallible futures.
///
/// Two failure policies are offered, chosen per call site:
/// - [`run_settled`](Self::run_settled): every task runs; each outcome is reported.
/// - [`try_run`](Self::try_run): the first failure stops the batch.
///
/// Output order follows completion order, not input order. Callers that need
/// to know where a result came from must tag it inside the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedTaskPool {
    concurrency: usize,
}

impl BoundedTaskPool {
    /// Creates a pool. A `concurrency` of 0 is treated as 1.
    #[must_use]
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// Effective concurrency cap.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs every task and returns one outcome per task.
    ///
    /// A failing task never affects its siblings. Resolves once all tasks
    /// have settled; an empty input resolves immediately.
    pub async fn run_settled<I, F, T, E>(&self, tasks: I) -> Vec<Result<T, E>>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = Result<T, E>>,
    {
        let mut pending = tasks.into_iter();
        let mut in_flight = FuturesUnordered::new();
        let mut settled = Vec::new();

        loop {
            self.fill(&mut in_flight, &mut pending);
            match in_flight.next().await {
                Some(outcome) => settled.push(outcome),
                None => break,
            }
        }

        settled
    }

    /// Runs tasks until one fails.
    ///
    /// The first failure is returned as soon as it is observed. No queued
    /// task is started after it, and tasks still in flight are dropped
    /// (cancelled at their next await point).
    pub async fn try_run<I, F, T, E>(&self, tasks: I) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = Result<T, E>>,
    {
        let mut pending = tasks.into_iter();
        let mut in_flight = FuturesUnordered::new();
        let mut values = Vec::new();

        loop {
            self.fill(&mut in_flight, &mut pending);
            match in_flight.next().await {
                Some(Ok(value)) => values.push(value),
                Some(Err(e)) => return Err(e),
                None => return Ok(values),
            }
        }
    }

    /// Tops the in-flight set up to the cap.
    fn fill<F, I>(&self, in_flight: &mut FuturesUnordered<F>, pending: &mut I)
    where
        F: Future,
        I: Iterator<Item = F>,
    {
        while in_flight.len() < self.concurrency {
            match pending.next() {
                Some(task) => in_flight.push(task),
                None => break,
            }
        }
    }
}
