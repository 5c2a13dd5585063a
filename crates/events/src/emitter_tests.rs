// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use rstest::rstest;

#[test]
fn fire_invokes_listeners_in_subscription_order() {
    let emitter = EventEmitter::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let a = {
        let seen = Arc::clone(&seen);
        emitter.subscribe(move |n| seen.lock().push(format!("a:{n}")))
    };
    let b = {
        let seen = Arc::clone(&seen);
        emitter.subscribe(move |n| seen.lock().push(format!("b:{n}")))
    };

    emitter.fire(&7);
    assert_eq!(*seen.lock(), vec!["a:7".to_string(), "b:7".to_string()]);

    a.dispose();
    b.dispose();
}

#[test]
fn fire_with_no_listeners_is_dropped() {
    let emitter = EventEmitter::<String>::new();
    emitter.fire(&"nobody home".to_string());
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn disposed_listener_is_not_invoked() {
    let emitter = EventEmitter::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sub = {
        let seen = Arc::clone(&seen);
        emitter.subscribe(move |n| seen.lock().push(*n))
    };
    emitter.fire(&1);
    sub.dispose();
    emitter.fire(&2);

    assert_eq!(*seen.lock(), vec![1]);
    assert!(sub.is_disposed());
}

#[test]
fn dispose_twice_is_a_noop() {
    let emitter = EventEmitter::<u32>::new();
    let sub = emitter.subscribe(|_| {});
    sub.dispose();
    sub.dispose();
    assert!(sub.is_disposed());
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn listener_disposed_mid_fire_before_its_turn_is_skipped() {
    let emitter = EventEmitter::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let first = {
        let seen = Arc::clone(&seen);
        let victim = Arc::clone(&victim);
        emitter.subscribe(move |n| {
            seen.lock().push(format!("first:{n}"));
            if let Some(sub) = victim.lock().as_ref() {
                sub.dispose();
            }
        })
    };
    let second = {
        let seen = Arc::clone(&seen);
        emitter.subscribe(move |n| seen.lock().push(format!("second:{n}")))
    };
    *victim.lock() = Some(second);

    emitter.fire(&1);
    assert_eq!(*seen.lock(), vec!["first:1".to_string()]);

    first.dispose();
}

#[test]
fn listener_subscribed_mid_fire_is_not_invoked_for_that_fire() {
    let emitter = EventEmitter::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let late: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

    let first = {
        let emitter = emitter.clone();
        let seen = Arc::clone(&seen);
        let late = Arc::clone(&late);
        emitter.clone().subscribe(move |n: &u32| {
            seen.lock().push(format!("first:{n}"));
            let seen = Arc::clone(&seen);
            late.lock()
                .push(emitter.subscribe(move |n| seen.lock().push(format!("late:{n}"))));
        })
    };

    emitter.fire(&1);
    assert_eq!(*seen.lock(), vec!["first:1".to_string()]);

    // The mid-fire subscriber sees subsequent fires.
    first.dispose();
    emitter.fire(&2);
    assert_eq!(
        *seen.lock(),
        vec!["first:1".to_string(), "late:2".to_string()]
    );
}

#[test]
fn clones_share_the_channel() {
    let emitter = EventEmitter::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sub = {
        let seen = Arc::clone(&seen);
        emitter.subscribe(move |n| seen.lock().push(*n))
    };

    emitter.clone().fire(&5);
    assert_eq!(*seen.lock(), vec![5]);
    sub.dispose();
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(8)]
fn every_listener_sees_every_fire(#[case] listeners: usize) {
    let emitter = EventEmitter::<u32>::new();
    let hits = Arc::new(Mutex::new(0usize));

    let subs: Vec<Subscription> = (0..listeners)
        .map(|_| {
            let hits = Arc::clone(&hits);
            emitter.subscribe(move |_| *hits.lock() += 1)
        })
        .collect();

    emitter.fire(&0);
    emitter.fire(&1);
    assert_eq!(*hits.lock(), listeners * 2);

    for sub in subs {
        sub.dispose();
    }
    assert_eq!(emitter.listener_count(), 0);
}
