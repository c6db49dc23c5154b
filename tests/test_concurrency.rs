//! Concurrency tests for sessions
//!
//! Different sessions run in parallel, commands to one session are
//! serialized, and termination releases callers stuck on a session.

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{MockLauncher, registry, start, tools};
use kodegen_tools_gdb::GdbTools;
use tokio::sync::Barrier;

const DEADLINE: Duration = Duration::from_secs(5);

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_creation_yields_distinct_ids() {
    let registry = registry(MockLauncher::default());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.create(None).await.unwrap() })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids.len(), 16);
    assert_eq!(registry.len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_sessions_do_not_block_each_other() {
    // Both sends must be in flight at once to pass the barrier
    let tools = tools(MockLauncher {
        gate: Some(Arc::new(Barrier::new(2))),
        ..MockLauncher::default()
    });
    let first = start(&tools).await;
    let second = start(&tools).await;

    let a = {
        let tools = tools.clone();
        tokio::spawn(async move { tools.get_backtrace(first.as_str()).await })
    };
    let b = {
        let tools = tools.clone();
        tokio::spawn(async move { tools.get_backtrace(second.as_str()).await })
    };

    let (a, b) = tokio::time::timeout(DEADLINE, async { (a.await, b.await) })
        .await
        .expect("commands on different sessions ran concurrently");

    assert!(a.unwrap().contains("ran backtrace"));
    assert!(b.unwrap().contains("ran backtrace"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_session_commands_are_serialized() {
    let launcher = MockLauncher {
        send_delay: Duration::from_millis(20),
        ..MockLauncher::default()
    };
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = start(&tools).await;

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let tools = tools.clone();
            let id = id.clone();
            tokio::spawn(async move { tools.print_expression(id.as_str(), &format!("v{n}")).await })
        })
        .collect();

    for handle in handles {
        let output = handle.await.unwrap();
        assert!(output.contains("Result: Command completed successfully"));
    }

    assert_eq!(recorder.send_count(), 8);
    assert_eq!(recorder.overlaps.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn terminate_releases_in_flight_and_queued_commands() {
    let tools: GdbTools<MockLauncher> = tools(MockLauncher::default());
    let id = start(&tools).await;

    let in_flight = {
        let tools = tools.clone();
        let id = id.clone();
        tokio::spawn(async move { tools.execute_command(id.as_str(), "hang").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let queued = {
        let tools = tools.clone();
        let id = id.clone();
        tokio::spawn(async move { tools.get_backtrace(id.as_str()).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(tools.registry().terminate(id.as_str()).await);

    let (in_flight, queued) = tokio::time::timeout(DEADLINE, async { (in_flight.await, queued.await) })
        .await
        .expect("terminated session released its callers");

    let in_flight = in_flight.unwrap();
    let queued = queued.unwrap();
    assert!(in_flight.contains("not found"), "{in_flight}");
    assert!(queued.contains("not found"), "{queued}");
    assert!(!tools.registry().exists(id.as_str()));
}

#[tokio::test]
async fn slow_session_keeps_its_entry() {
    let tools = tools(MockLauncher {
        send_delay: Duration::from_millis(10),
        ..MockLauncher::default()
    });
    let id = start(&tools).await;

    let output = tools.execute_command(id.as_str(), "fail").await;

    assert!(output.starts_with("Error executing command"));
    assert!(tools.registry().exists(id.as_str()));
    assert!(tools.get_backtrace(id.as_str()).await.contains("ran backtrace"));
}
