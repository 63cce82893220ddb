//! Concurrency and thread safety tests for the curation engine

use std::sync::Arc;
use std::thread;

use curate::{CurateConfig, CurationEngine, LockPolicy, Params};

fn engine_with(policy: LockPolicy) -> CurationEngine {
    let mut config = CurateConfig::default();
    config.dedup.lock_policy = policy;
    CurationEngine::new(config).unwrap()
}

#[test]
fn serialized_dedup_accepts_one_of_many_identical_texts() {
    let engine = engine_with(LockPolicy::Serialized);
    let text = "the same sample submitted from many workers at once";

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || engine.deduplicate(text, None).keep)
        })
        .collect();

    let kept = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&keep| keep)
        .count();
    assert_eq!(kept, 1);
    assert_eq!(engine.deduplicator().len(), 1);
}

#[test]
fn distinct_texts_are_all_kept_under_contention() {
    let engine = engine_with(LockPolicy::Optimistic);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = engine.clone();
            thread::spawn(move || {
                (0..25)
                    .filter(|i| {
                        let text = format!("w{t}i{i}alpha w{t}i{i}beta w{t}i{i}gamma");
                        engine.deduplicate(&text, None).keep
                    })
                    .count()
            })
        })
        .collect();

    let kept: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(kept, 200);
    assert_eq!(engine.deduplicator().len(), 200);
}

#[test]
fn concurrent_reliability_updates_are_not_lost() {
    let engine = engine_with(LockPolicy::default());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = engine.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    engine.record_evaluation("shared", i % 2 == 0, true);
                    engine.record_evaluation(&format!("own-{t}"), true, true);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let shared = engine.reliability().profile("shared").unwrap();
    assert_eq!(shared.total(), 800);
    assert_eq!(shared.true_positive, 400);
    assert_eq!(shared.false_negative, 400);
    assert_eq!(engine.reliability().len(), 9);
}

#[test]
fn filter_runs_share_one_registry() {
    let engine = Arc::new(engine_with(LockPolicy::default()));
    let text = "Concurrent filter runs read the registry without blocking each other.";

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .run_filters(text, &["entropy", "ngram", "readability_fog"], &Params::new())
                    .unwrap()
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn async_tasks_share_engine_state() {
    let engine = engine_with(LockPolicy::Serialized);

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine.record_evaluation("async-user", true, true);
                engine.deduplicate(&format!("a{i}sample b{i}number c{i}tail"), None)
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().keep);
    }
    assert_eq!(
        engine.reliability().profile("async-user").unwrap().true_positive,
        20
    );
}
