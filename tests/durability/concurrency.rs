//! Concurrent writers against one file-backed database.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

#[test]
fn concurrent_appends_through_executor_all_survive() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 20;

    let mut t = TestDb::new();
    let executor = Executor::new(t.db.clone());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let executor = executor.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for n in 0..PER_THREAD {
                    executor
                        .execute(sitedata::Command::Append {
                            collection: "clientRequests".into(),
                            record: record(json!({"worker": worker, "n": n})),
                        })
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    drop(executor);

    t.reopen();
    let records = t.db.list("clientRequests").unwrap();
    assert_eq!(records.len(), THREADS * PER_THREAD);

    for worker in 0..THREADS {
        let ns: Vec<u64> = records
            .iter()
            .filter(|r| r["worker"] == json!(worker))
            .map(|r| r["n"].as_u64().unwrap())
            .collect();
        assert_eq!(ns, (0..PER_THREAD as u64).collect::<Vec<_>>());
    }
}

#[test]
fn readers_never_see_partial_documents() {
    // Fail policy: a torn read would surface as an error instead of a reset
    let t = TestDb::with_policy(CorruptionPolicy::Fail);
    let db = t.db.clone();
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let reader = {
        let db = db.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut reads = 0usize;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                db.document().unwrap();
                reads += 1;
            }
            reads
        })
    };

    for i in 0..100 {
        db.merge_singleton("websiteStats", record(json!({"totalVisits": i})))
            .unwrap();
    }
    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    assert!(reader.join().unwrap() > 0);
}
