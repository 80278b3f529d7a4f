use std::sync::Arc;
use std::time::{Duration, Instant};

use routerfed_application::RefreshCoordinator;
use routerfed_domain::{FailureKind, RefreshTarget};
use tokio::sync::Barrier;

mod helpers;
use helpers::{ManagerBehavior, MockClientCache, MockEndpointDirectory, MockManagerFactory};

const ADDRESSES: [&str; 4] = ["123", "local6", "789", "local"];

fn coordinator(
    directory: Arc<MockEndpointDirectory>,
    factory: Arc<MockManagerFactory>,
    cache: Arc<MockClientCache>,
) -> RefreshCoordinator {
    RefreshCoordinator::new(directory, factory, cache)
        .with_task_timeout(Duration::from_millis(1000))
}

#[tokio::test]
async fn test_all_tasks_complete_successfully() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Succeed));
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory.clone(), cache.clone())
        .run_cycle()
        .await
        .expect("cycle should run");

    assert_eq!(summary.success_count, 4);
    assert_eq!(summary.failure_count, 0);
    assert_eq!(summary.first_failure, None);
    assert_eq!(factory.refresh_count(), 4);
    assert_eq!(cache.invalidation_count(), 0);
}

#[tokio::test]
async fn test_all_tasks_fail() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Reject));
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory, cache.clone())
        .run_cycle()
        .await
        .expect("cycle should run");

    assert_eq!(summary.success_count, 0);
    assert_eq!(summary.failure_count, 4);
    // Every failed endpoint is evicted exactly once.
    assert_eq!(cache.invalidation_count(), 4);
    let mut invalidated = cache.invalidations();
    invalidated.sort();
    assert_eq!(invalidated, vec!["123", "789", "local", "local6"]);
}

#[tokio::test]
async fn test_some_tasks_fail() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(
        MockManagerFactory::all(ManagerBehavior::Succeed)
            .with_behavior("123", ManagerBehavior::Reject)
            .with_behavior("789", ManagerBehavior::Reject),
    );
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory, cache.clone())
        .run_cycle()
        .await
        .expect("cycle should run");

    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.failure_count, 2);
    let mut invalidated = cache.invalidations();
    invalidated.sort();
    assert_eq!(invalidated, vec!["123", "789"]);
}

#[tokio::test]
async fn test_one_task_completes_with_error() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(
        MockManagerFactory::all(ManagerBehavior::Succeed)
            .with_behavior("789", ManagerBehavior::Error),
    );
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory, cache.clone())
        .run_cycle()
        .await
        .expect("cycle should run");

    assert_eq!(summary.success_count, 3);
    assert_eq!(summary.failure_count, 1);
    assert_eq!(summary.first_failure, Some(FailureKind::Error));
    assert_eq!(cache.invalidations(), vec!["789"]);
}

#[tokio::test]
async fn test_one_task_exceeds_timeout() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(
        MockManagerFactory::all(ManagerBehavior::Succeed)
            .with_behavior("789", ManagerBehavior::Hang(Duration::from_secs(30))),
    );
    let cache = Arc::new(MockClientCache::new());

    let start = Instant::now();
    let summary = coordinator(directory, factory, cache.clone())
        .with_task_timeout(Duration::from_millis(100))
        .run_cycle()
        .await
        .expect("cycle should run");

    // The hung endpoint degrades to a timeout instead of hanging the cycle.
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(summary.success_count, 3);
    assert_eq!(summary.failure_count, 1);
    assert_eq!(summary.first_failure, Some(FailureKind::Timeout));
    assert_eq!(cache.invalidations(), vec!["789"]);
}

#[tokio::test]
async fn test_mixed_failures_report_first_seen_category() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(
        MockManagerFactory::all(ManagerBehavior::Succeed)
            .with_behavior("123", ManagerBehavior::Error)
            .with_behavior("789", ManagerBehavior::Hang(Duration::from_secs(30))),
    );
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory, cache.clone())
        .with_task_timeout(Duration::from_millis(100))
        .run_cycle()
        .await
        .expect("cycle should run");

    // "123" is submitted before "789", so the error category wins the
    // advisory text while both failures stay in the count.
    assert_eq!(summary.failure_count, 2);
    assert_eq!(summary.first_failure, Some(FailureKind::Error));
    assert_eq!(cache.invalidation_count(), 2);
}

#[tokio::test]
async fn test_concurrent_triggers_coalesce_into_one_cycle() {
    let directory = Arc::new(
        MockEndpointDirectory::new(&ADDRESSES).with_list_delay(Duration::from_millis(200)),
    );
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Succeed));
    let cache = Arc::new(MockClientCache::new());

    let coordinator = Arc::new(coordinator(directory, factory.clone(), cache.clone()));
    let barrier = Arc::new(Barrier::new(5));

    let mut calls = Vec::new();
    for _ in 0..5 {
        let coordinator = Arc::clone(&coordinator);
        let barrier = Arc::clone(&barrier);
        calls.push(tokio::spawn(async move {
            barrier.wait().await;
            coordinator.run_cycle().await
        }));
    }

    let mut completed = 0;
    for call in calls {
        if call.await.unwrap().is_some() {
            completed += 1;
        }
    }

    assert_eq!(completed, 1, "only the gate winner runs a cycle");
    assert_eq!(factory.refresh_count(), 4);
    assert_eq!(cache.invalidation_count(), 0);
}

#[tokio::test]
async fn test_blank_addresses_are_dropped() {
    let directory = Arc::new(MockEndpointDirectory::new(&["123", "", "   ", "local"]));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Succeed));
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory.clone(), cache)
        .run_cycle()
        .await
        .expect("cycle should run");

    assert_eq!(summary.total(), 2);
    assert_eq!(factory.refresh_count(), 2);
}

#[tokio::test]
async fn test_empty_directory_skips_fan_out() {
    let directory = Arc::new(MockEndpointDirectory::new(&[]));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Succeed));
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory.clone(), cache)
        .run_cycle()
        .await
        .expect("gate must be released even with nothing to do");

    assert_eq!(summary.total(), 0);
    assert_eq!(factory.refresh_count(), 0);
}

#[tokio::test]
async fn test_directory_failure_degrades_to_empty_cycle() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    directory.set_should_fail(true);
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Succeed));
    let cache = Arc::new(MockClientCache::new());

    let coordinator = coordinator(directory.clone(), factory.clone(), cache);
    let summary = coordinator.run_cycle().await.expect("cycle should run");
    assert_eq!(summary.total(), 0);
    assert_eq!(factory.refresh_count(), 0);

    // The gate was released: a later trigger runs a full cycle.
    directory.set_should_fail(false);
    let summary = coordinator.run_cycle().await.expect("cycle should run");
    assert_eq!(summary.total(), 4);
}

#[tokio::test]
async fn test_local_marker_resolves_local_targets_once() {
    let directory = Arc::new(MockEndpointDirectory::new(&["local6", "789"]));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Succeed));
    let cache = Arc::new(MockClientCache::new());

    coordinator(directory, factory.clone(), cache)
        .run_cycle()
        .await
        .expect("cycle should run");

    let targets = factory.resolved_targets();
    assert_eq!(targets.len(), 2);
    assert!(targets.contains(&RefreshTarget::Local));
    assert!(targets.contains(&RefreshTarget::Remote("789".to_string())));
}

#[tokio::test]
async fn test_sequential_cycles_after_failures() {
    let directory = Arc::new(MockEndpointDirectory::new(&ADDRESSES));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Reject));
    let cache = Arc::new(MockClientCache::new());

    let coordinator = coordinator(directory, factory, cache.clone());
    assert!(coordinator.run_cycle().await.is_some());
    // A failed cycle never wedges the gate; the next trigger refreshes again
    // and evicts again.
    assert!(coordinator.run_cycle().await.is_some());
    assert_eq!(cache.invalidation_count(), 8);
}

#[tokio::test]
async fn test_bounded_fan_out_still_settles_every_task() {
    let directory = Arc::new(MockEndpointDirectory::new(&["a1", "a2", "a3", "a4", "a5", "a6"]));
    let factory = Arc::new(MockManagerFactory::all(ManagerBehavior::Hang(
        Duration::from_millis(20),
    )));
    let cache = Arc::new(MockClientCache::new());

    let summary = coordinator(directory, factory, cache)
        .with_max_concurrent(2)
        .with_task_timeout(Duration::from_millis(2000))
        .run_cycle()
        .await
        .expect("cycle should run");

    assert_eq!(summary.success_count, 6);
    assert_eq!(summary.failure_count, 0);
}
