//! Integration tests for object pools and reusable lists

use nebula_recycle::prelude::*;

#[derive(Debug, Default)]
struct TestStruct {
    a: i32,
}

#[test]
fn test_pool_borrows_are_independent() {
    let pool = ObjectPool::<String>::new();

    let mut buf = pool.borrow();
    buf.clear();
    buf.push_str("foo");

    let mut buf2 = pool.borrow();
    buf2.clear();
    buf2.push_str("bar");

    assert_eq!(*buf, "foo");
    assert_eq!(*buf2, "bar");

    pool.release(buf);
    pool.release(buf2);
    assert_eq!(pool.idle(), 2);
}

#[test]
fn test_pool_with_constructor() {
    let pool = ObjectPool::with_constructor(|| Vec::<u8>::with_capacity(1024));

    let buf = pool.borrow();
    assert_eq!(buf.capacity(), 1024);
    pool.release(buf);

    let buf = pool.borrow();
    assert_eq!(buf.capacity(), 1024);

    let buf2 = pool.borrow();
    assert_eq!(buf2.capacity(), 1024);
}

#[test]
fn test_pool_with_config_and_constructor() {
    let config = PoolConfig::production("frames");
    let pool = ObjectPool::with_config(config, || Vec::<u8>::with_capacity(1024))
        .expect("valid config");

    assert_eq!(pool.idle(), 32);
    assert!(pool.try_borrow().is_some_and(|buf| buf.capacity() == 1024));
}

#[test]
fn test_pooled_list() {
    let pool = ObjectPool::<ReusableList<TestStruct>>::new();
    let mut list = pool.borrow();
    list.reset();

    list.append_dirty_slot().a = 1;
    list.append_dirty_slot().a = 2;

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].a, 1);
    assert_eq!(list[1].a, 2);
    pool.release(list);
}

#[test]
fn test_pooled_values() {
    let pool = ObjectPool::<ReusableValues<TestStruct>>::new();
    let mut list = pool.borrow();

    list.hard_reset_and_resize_to(2);
    list[0].a = 1;
    list[1].a = 2;

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].a, 1);
    assert_eq!(list[1].a, 2);
    pool.release(list);

    // Second cycle: dirty until the hard reset clears it.
    let mut list = pool.borrow();
    assert_eq!(list.len(), 2);
    list.hard_reset_and_resize_to(2);
    assert!(list.iter().all(|e| e.a == 0));
}

#[test]
fn test_guarded_borrow_round_trip() {
    let pool = ObjectPool::<String>::new();
    {
        let mut s = pool.borrow_guarded();
        s.push_str("kept");
    }

    let s = pool.borrow_guarded();
    assert_eq!(*s, "kept");
    let hit_rate = pool.stats().snapshot().hit_rate();
    assert!((hit_rate - 0.5).abs() < f64::EPSILON);
}
