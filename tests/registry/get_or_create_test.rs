/*!
 * Get-or-Create Atomicity Tests
 * Exactly one creator per key, every caller shares the creator's cell
 */

use rendezvous::cell::{BroadcastCell, SharedCell};
use rendezvous::registry::{IntRegistry, MapStrategy, Registry, RegistryConfig, StringRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const CALLERS: usize = 32;

fn registry_for(strategy: MapStrategy) -> StringRegistry<i32> {
    Registry::builder()
        .with_strategy(strategy)
        .with_shard_amount(16)
        .build()
        .unwrap()
}

#[test]
fn test_concurrent_get_or_create_single_winner() {
    for strategy in [MapStrategy::Locked, MapStrategy::Sharded] {
        for _ in 0..20 {
            let registry = Arc::new(registry_for(strategy));
            let barrier = Arc::new(Barrier::new(CALLERS));

            let handles: Vec<_> = (0..CALLERS)
                .map(|_| {
                    let registry = registry.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        registry.get_or_create("k")
                    })
                })
                .collect();

            let results: Vec<(SharedCell<i32>, bool)> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            let creators = results.iter().filter(|(_, existed)| !existed).count();
            assert_eq!(creators, 1, "{:?}: exactly one caller creates", strategy);

            let (winner, _) = results
                .iter()
                .find(|(_, existed)| !existed)
                .unwrap();
            assert!(results.iter().all(|(cell, _)| Arc::ptr_eq(cell, winner)));
            assert_eq!(registry.len(), 1);
        }
    }
}

#[test]
fn test_factory_runs_once_per_key() {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = created.clone();
    let registry = Arc::new(IntRegistry::<u8>::with_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        rendezvous::CellKind::Repeatable.create()
    }));

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for key in 0..100i64 {
                    registry.get_or_create(&key);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(created.load(Ordering::SeqCst), 100);
    assert_eq!(registry.len(), 100);
    assert_eq!(registry.stats().creations, 100);
}

#[test]
fn test_creator_broadcasts_everyone_observes() {
    const WAITERS: usize = 10;

    for strategy in [MapStrategy::Locked, MapStrategy::Sharded] {
        let registry = Arc::new(registry_for(strategy));
        let (cell, existed) = registry.get_or_create("k");
        assert!(!existed);

        let handles: Vec<_> = (0..WAITERS)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let (cell, existed) = registry.get_or_create("k");
                    assert!(existed);
                    *cell.wait()
                })
            })
            .collect();

        thread::sleep(std::time::Duration::from_millis(30));
        cell.broadcast(42);

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        assert_eq!(*cell.wait(), 42);
    }
}

#[test]
fn test_epochs_after_delete() {
    let registry = StringRegistry::<u8>::with_config(RegistryConfig::low_contention()).unwrap();

    let (first, existed) = registry.get_or_create("k");
    assert!(!existed);
    registry.delete("k");

    // A new epoch starts with a fresh cell
    let (second, existed) = registry.get_or_create("k");
    assert!(!existed);
    assert!(!Arc::ptr_eq(&first, &second));
}
