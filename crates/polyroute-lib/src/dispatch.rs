//! Background execution of shortest-path queries.
//!
//! Each submission gets a sequence token. Workers run on tokio's blocking
//! pool against the `Arc<Snapshot>` they were handed, so a reload never
//! touches a matrix that is being scanned. Only the most recently submitted
//! query may publish its result; anything older is discarded when it
//! finishes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::engine::PathOutcome;
use crate::error::{Error, Result};
use crate::snapshot::{QueryRequest, Snapshot};

/// Finished query as seen by the dispatcher.
#[derive(Debug)]
pub struct CompletedQuery {
    pub token: u64,
    pub generation: u64,
    pub request: QueryRequest,
    pub outcome: Result<PathOutcome>,
}

/// Whether a worker's result became the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Published,
    /// A newer query was submitted (or the dispatcher was invalidated) first.
    Stale,
}

/// Handle to a submitted query.
#[derive(Debug)]
pub struct QueryTicket {
    pub token: u64,
    pub request: QueryRequest,
    handle: JoinHandle<QueryStatus>,
}

impl QueryTicket {
    /// Wait for the worker to finish.
    pub async fn wait(self) -> Result<QueryStatus> {
        self.handle.await.map_err(|err| Error::QueryAborted {
            token: self.token,
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct DispatchState {
    sequence: AtomicU64,
    latest: Mutex<Option<Arc<CompletedQuery>>>,
}

impl DispatchState {
    fn publish(&self, completed: CompletedQuery) -> QueryStatus {
        let mut latest = match self.latest.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let current = self.sequence.load(Ordering::SeqCst);
        let superseded = latest
            .as_ref()
            .is_some_and(|existing| existing.token > completed.token);
        if completed.token != current || superseded {
            tracing::debug!(
                token = completed.token,
                current,
                request = %completed.request,
                "discarding stale query result"
            );
            return QueryStatus::Stale;
        }
        *latest = Some(Arc::new(completed));
        QueryStatus::Published
    }
}

/// Runs queries off the calling thread with last-request-wins semantics.
#[derive(Debug, Clone)]
pub struct QueryDispatcher {
    runtime: Handle,
    state: Arc<DispatchState>,
}

impl QueryDispatcher {
    /// Create a dispatcher spawning onto `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            state: Arc::new(DispatchState::default()),
        }
    }

    /// Create a dispatcher bound to the runtime of the calling task.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Submit a query against `snapshot`. Any earlier query still running
    /// becomes stale.
    pub fn submit(&self, snapshot: Arc<Snapshot>, request: QueryRequest) -> QueryTicket {
        let token = self.state.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let state = Arc::clone(&self.state);
        tracing::debug!(
            token,
            request = %request,
            generation = snapshot.generation(),
            "submitting query"
        );

        let handle = self.runtime.spawn_blocking(move || {
            let outcome = snapshot.query(request);
            state.publish(CompletedQuery {
                token,
                generation: snapshot.generation(),
                request,
                outcome,
            })
        });

        QueryTicket {
            token,
            request,
            handle,
        }
    }

    /// Drop the latest result and make every running query stale.
    pub fn invalidate(&self) {
        self.state.sequence.fetch_add(1, Ordering::SeqCst);
        let mut latest = match self.state.latest.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *latest = None;
    }

    /// Newest published result.
    pub fn latest(&self) -> Option<Arc<CompletedQuery>> {
        match self.state.latest.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Token of the most recent submission.
    pub fn current_token(&self) -> u64 {
        self.state.sequence.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn pair_snapshot() -> Arc<Snapshot> {
        let mut graph = Graph::new();
        graph.push_vertex(0.0, 0.0);
        graph.push_vertex(0.0, 2.0);
        graph.add_edge(0, 1, false).unwrap();
        Arc::new(Snapshot::new(graph, 1))
    }

    fn completed(token: u64) -> CompletedQuery {
        CompletedQuery {
            token,
            generation: 1,
            request: QueryRequest::new(0, 1),
            outcome: Ok(PathOutcome::NotReachable),
        }
    }

    #[test]
    fn publish_rejects_older_tokens() {
        let state = DispatchState::default();
        state.sequence.store(2, Ordering::SeqCst);
        assert_eq!(state.publish(completed(1)), QueryStatus::Stale);
        assert_eq!(state.publish(completed(2)), QueryStatus::Published);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn submitted_query_publishes_result() {
        let dispatcher = QueryDispatcher::current();
        let ticket = dispatcher.submit(pair_snapshot(), QueryRequest::new(0, 1));
        assert_eq!(ticket.wait().await.unwrap(), QueryStatus::Published);

        let latest = dispatcher.latest().expect("result published");
        let outcome = latest.outcome.as_ref().expect("valid query");
        assert_eq!(outcome.path().map(|p| p.total_cost), Some(2.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn invalidate_discards_pending_result() {
        let dispatcher = QueryDispatcher::current();
        let ticket = dispatcher.submit(pair_snapshot(), QueryRequest::new(0, 1));
        dispatcher.invalidate();
        // The worker may finish on either side of the invalidation; in both
        // cases nothing survives it.
        ticket.wait().await.unwrap();
        assert!(dispatcher.latest().is_none());
    }
}
