mod common;

use std::sync::Arc;

use polyroute_lib::{QueryDispatcher, QueryRequest, QueryStatus, Session, Snapshot};

use common::{fixture_path, random_graph};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn newest_request_wins() {
    let dispatcher = QueryDispatcher::current();
    let slow = Arc::new(Snapshot::new(random_graph(5, 600, 3_000), 1));
    let fast = Arc::new(Snapshot::new(random_graph(6, 10, 20), 2));

    let first = dispatcher.submit(slow, QueryRequest::new(0, 599));
    let second = dispatcher.submit(fast, QueryRequest::new(0, 9));
    let second_token = second.token;

    // The first query either finishes stale or is overwritten afterwards.
    first.wait().await.expect("worker finished");
    let second_status = second.wait().await.expect("worker finished");

    assert_eq!(second_status, QueryStatus::Published);
    let latest = dispatcher.latest().expect("result published");
    assert_eq!(latest.token, second_token);
    assert_eq!(latest.request, QueryRequest::new(0, 9));
    assert_eq!(latest.generation, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stale_worker_never_overwrites() {
    let dispatcher = QueryDispatcher::current();
    let snapshot = Arc::new(Snapshot::new(random_graph(8, 50, 150), 1));

    let tickets: Vec<_> = (1..6)
        .map(|destination| {
            dispatcher.submit(Arc::clone(&snapshot), QueryRequest::new(0, destination))
        })
        .collect();
    let last_token = tickets.last().map(|t| t.token).unwrap();

    let mut published_last = false;
    for ticket in tickets {
        let token = ticket.token;
        let status = ticket.wait().await.unwrap();
        if token == last_token {
            published_last = status == QueryStatus::Published;
        }
    }

    assert!(published_last);
    assert_eq!(dispatcher.latest().map(|q| q.token), Some(last_token));
    assert_eq!(dispatcher.current_token(), last_token);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn query_reads_the_snapshot_it_was_given() {
    let mut session = Session::new();
    session.load_path(&fixture_path("ring.poly")).unwrap();
    let old = session.snapshot().unwrap();

    // Reload with a graph where 0 and 2 are disconnected.
    session.load_path(&fixture_path("islands.poly")).unwrap();
    let new = session.snapshot().unwrap();
    assert_ne!(old.generation(), new.generation());

    let dispatcher = QueryDispatcher::current();
    let ticket = dispatcher.submit(Arc::clone(&old), QueryRequest::new(0, 2));
    assert_eq!(ticket.wait().await.unwrap(), QueryStatus::Published);

    let latest = dispatcher.latest().unwrap();
    assert_eq!(latest.generation, old.generation());
    let outcome = latest.outcome.as_ref().unwrap();
    assert_eq!(outcome.path().map(|p| p.total_cost), Some(20.0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_request_reports_error() {
    let dispatcher = QueryDispatcher::current();
    let snapshot = Arc::new(Snapshot::new(random_graph(1, 5, 5), 1));
    let ticket = dispatcher.submit(snapshot, QueryRequest::new(2, 2));
    ticket.wait().await.unwrap();

    let latest = dispatcher.latest().unwrap();
    assert!(latest.outcome.is_err());
}
