//! # Concurrency Verification Tests
//!
//! These tests verify the cache contracts under contention:
//!
//! 1. **Registry**: racing callers for one new key produce one value
//! 2. **Interner**: racing callers for one new fragment produce one id
//! 3. **Readers**: hits on present entries stay consistent during inserts
//!
//! Run with: cargo test --package hydra_cache --test concurrency

use std::sync::{Arc, Barrier};
use std::thread;

use hydra_cache::{SharedRegistry, TokenInterner};

const THREADS: usize = 8;

// ============================================================================
// REGISTRY RACES
// ============================================================================

#[test]
fn racing_get_or_create_single_winner() {
    let registry: Arc<SharedRegistry<String, Vec<u8>>> =
        Arc::new(SharedRegistry::new(|key: &String| {
            Some(key.as_bytes().to_vec())
        }));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get_or_create(&"zombie".to_string()).unwrap()
            })
        })
        .collect();

    let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Exactly one insertion won; everyone holds the same allocation.
    assert_eq!(registry.len(), 1);
    for value in &values[1..] {
        assert!(Arc::ptr_eq(&values[0], value));
    }
}

#[test]
fn racing_distinct_keys_all_inserted() {
    let registry: Arc<SharedRegistry<String, String>> =
        Arc::new(SharedRegistry::new(|key: &String| Some(key.repeat(2))));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Each thread hammers its own key plus one shared key.
                let own = registry.get_or_create(&format!("kind-{i}")).unwrap();
                let shared = registry.get_or_create(&"shared".to_string()).unwrap();
                (own, shared)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(registry.len(), THREADS + 1);
    for (_, shared) in &results[1..] {
        assert!(Arc::ptr_eq(&results[0].1, shared));
    }
}

// ============================================================================
// INTERNER RACES
// ============================================================================

#[test]
fn racing_intern_same_fragments_one_table() {
    let interner = Arc::new(TokenInterner::new());
    let barrier = Arc::new(Barrier::new(THREADS));
    let fragments = ["John", "Doe", "Jane", "Smith"];

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let interner = Arc::clone(&interner);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                fragments.map(|f| interner.intern(f))
            })
        })
        .collect();

    let id_sets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // One entry per distinct fragment, identical ids on every thread.
    assert_eq!(interner.len(), fragments.len());
    for ids in &id_sets[1..] {
        assert_eq!(*ids, id_sets[0]);
    }
    for (fragment, id) in fragments.iter().zip(id_sets[0]) {
        assert_eq!(interner.resolve(id).as_deref(), Some(*fragment));
    }
}

#[test]
fn readers_stay_consistent_during_inserts() {
    let interner = Arc::new(TokenInterner::new());
    let anchor = interner.intern("anchor");

    let writer = {
        let interner = Arc::clone(&interner);
        thread::spawn(move || {
            for i in 0..1_000 {
                interner.intern(&format!("fragment-{i}"));
            }
        })
    };

    // Concurrent hits on an existing entry never see it move.
    for _ in 0..1_000 {
        assert_eq!(interner.intern("anchor"), anchor);
        assert_eq!(interner.resolve(anchor).as_deref(), Some("anchor"));
    }

    writer.join().unwrap();
    assert_eq!(interner.len(), 1_001);
}
