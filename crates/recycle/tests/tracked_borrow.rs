//! Integration tests for tracked borrow sets

#![allow(unsafe_code)]

use std::collections::HashSet;
use std::thread;

use nebula_recycle::prelude::*;

#[test]
fn test_concurrent_borrows_do_not_corrupt_earlier_ones() {
    let pool = ObjectPool::<String>::new();
    let lists = TrackingListPool::new();

    for _ in 0..10 {
        let set = TrackedBorrowSet::new(&pool, &lists);

        let mut buf1 = set.borrow();
        buf1.clear();
        buf1.push_str("foo");

        let mut buf2 = set.borrow();
        buf2.clear();
        buf2.push_str("bar");

        let mut buf3 = set.borrow();
        buf3.clear();
        buf3.push_str("baz");

        thread::scope(|s| {
            for _ in 0..10 {
                s.spawn(|| {
                    let mut buf = set.borrow();
                    buf.clear();
                });
            }
        });

        assert_eq!(*buf1, "foo");
        assert_eq!(*buf2, "bar");
        assert_eq!(*buf3, "baz");

        assert_eq!(set.len(), 13);
        assert_eq!(set.release_all(), 13);
    }

    // Every round reuses the same 13 strings.
    assert_eq!(pool.idle(), 13);
    assert_eq!(pool.stats().snapshot().creations, 13);
    assert_eq!(lists.stats().snapshot().creations, 1);
}

#[test]
fn test_every_borrow_tracked_and_released_once() {
    const THREADS: usize = 10;
    const PER_THREAD: usize = 25;

    let pool = ObjectPool::<Vec<u8>>::new();
    let lists = TrackingListPool::new();
    let set = TrackedBorrowSet::new(&pool, &lists);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..PER_THREAD {
                    let mut buf = set.borrow();
                    buf.clear();
                    buf.push(1);
                }
            });
        }
    });

    // SAFETY: all borrowing threads were joined by the scope.
    let snapshot = unsafe { set.snapshot_unchecked() };
    assert_eq!(snapshot.len(), THREADS * PER_THREAD);

    let addrs: HashSet<_> = snapshot.iter().map(TrackedHandle::as_ptr).collect();
    assert_eq!(
        addrs.len(),
        THREADS * PER_THREAD,
        "an object was handed out twice"
    );

    assert_eq!(set.release_all(), THREADS * PER_THREAD);

    let stats = pool.stats().snapshot();
    assert_eq!(stats.releases, (THREADS * PER_THREAD) as u64);
    assert_eq!(pool.idle(), THREADS * PER_THREAD);
}

#[test]
fn test_objects_come_back_dirty() {
    let pool = ObjectPool::<String>::new();
    let lists = TrackingListPool::new();

    let set = TrackedBorrowSet::new(&pool, &lists);
    set.borrow().push_str("left over");
    set.release_all();

    let set = TrackedBorrowSet::new(&pool, &lists);
    let reused = set.borrow();
    assert_eq!(*reused, "left over");
}

#[test]
fn test_sets_share_one_object_pool() {
    let pool = ObjectPool::<String>::new();
    let lists = TrackingListPool::new();

    let first = TrackedBorrowSet::new(&pool, &lists);
    let second = TrackedBorrowSet::new(&pool, &lists);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..50 {
                first.borrow().clear();
            }
        });
        s.spawn(|| {
            for _ in 0..50 {
                second.borrow().clear();
            }
        });
    });

    assert_eq!(first.len() + second.len(), 100);
    first.release_all();
    assert_eq!(pool.idle(), 50);
    second.release_all();
    assert_eq!(pool.idle(), 100);
    assert_eq!(lists.idle(), 2);
}

#[test]
fn test_panicking_operation_still_releases() {
    let pool = ObjectPool::<String>::new();
    let lists = TrackingListPool::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let set = TrackedBorrowSet::new(&pool, &lists);
        set.borrow().push_str("partial");
        panic!("operation failed");
    }));

    assert!(result.is_err());
    assert_eq!(pool.idle(), 1);
    assert_eq!(lists.idle(), 1);
}
