//! Integration tests for rxcombine
//!
//! Exercises the public API end to end: subjects, one-shot producers,
//! combine_latest, and subscription lifetimes.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use rxcombine::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log { Rc::new(RefCell::new(Vec::new())) }

#[test]
fn test_current_value_subject_value_tracks_sends() {
  init_tracing();
  for v in [0, -3, 42] {
    let subject = CurrentValueSubject::<i32>::new(v);
    assert_eq!(subject.value(), v);
    subject.send(v + 1);
    assert_eq!(subject.value(), v + 1);
  }
}

#[test]
fn test_subscribe_replays_exactly_once_before_returning() {
  init_tracing();
  let subject = CurrentValueSubject::<&str>::new("initial");
  let calls = Rc::new(Cell::new(0));
  let c_calls = calls.clone();
  let _handle = subject.subscribe(move |_| c_calls.set(c_calls.get() + 1));
  assert_eq!(calls.get(), 1);
}

#[test]
fn test_passthrough_values_before_subscribe_are_lost() {
  init_tracing();
  let subject = PassthroughSubject::<i32>::new();
  for v in 0..5 {
    subject.send(v);
  }
  let seen = Rc::new(RefCell::new(vec![]));
  let c_seen = seen.clone();
  let _handle = subject.subscribe(move |v| c_seen.borrow_mut().push(v));
  assert!(seen.borrow().is_empty());
}

#[test]
fn test_just_replays_to_every_subscriber() {
  init_tracing();
  let just = Just::new("x");
  let log = log();
  for i in 0..3 {
    let on_value = log.clone();
    let on_done = log.clone();
    let handle = just.subscribe_completion(
      move |v| on_value.borrow_mut().push(format!("{i}:{v}")),
      move |c: Completion<Never>| on_done.borrow_mut().push(format!("{i}:{}", c.as_label())),
    );
    assert!(handle.is_closed());
  }
  assert_eq!(*log.borrow(), vec!["0:x", "0:finished", "1:x", "1:finished", "2:x", "2:finished"]);
}

#[test]
fn test_future_resolver_runs_once_for_any_number_of_subscribers() {
  init_tracing();
  for subscribers in [0, 1, 5] {
    let runs = Rc::new(Cell::new(0));
    let c_runs = runs.clone();
    let future = Future::<u8, &str>::new(move |promise| {
      c_runs.set(c_runs.get() + 1);
      promise.succeed(9);
    });

    let seen = Rc::new(RefCell::new(vec![]));
    let mut bag = SubscriptionBag::new();
    for _ in 0..subscribers {
      let c_seen = seen.clone();
      future.subscribe_completion(move |v| c_seen.borrow_mut().push(v), |_| {}).store(&mut bag);
    }

    assert_eq!(runs.get(), 1);
    assert_eq!(*seen.borrow(), vec![9; subscribers]);
  }
}

#[test]
fn test_future_subscribers_before_and_after_resolution_agree() {
  init_tracing();
  let source = PassthroughSubject::<i32, String>::new();
  let keep = Rc::new(RefCell::new(None));

  let c_source = source.clone();
  let c_keep = keep.clone();
  let future = Future::<i32, String>::new(move |promise| {
    let on_err = promise.clone();
    let handle = c_source.subscribe_completion(
      move |v| promise.succeed(v),
      move |c| {
        if let Completion::Failure(err) = c {
          on_err.fail(err);
        }
      },
    );
    *c_keep.borrow_mut() = Some(handle);
  });

  let log = log();
  let c_log = log.clone();
  let _early = future.subscribe_all(
    move |v| c_log.borrow_mut().push(format!("early {v}")),
    |_| {},
    || {},
  );
  source.send(4);
  source.send(5);
  let c_log = log.clone();
  let _late = future.subscribe_all(
    move |v| c_log.borrow_mut().push(format!("late {v}")),
    |_| {},
    || {},
  );
  assert_eq!(*log.borrow(), vec!["early 4", "late 4"]);
}

#[test]
fn test_deferred_builds_independent_inner_publishers() {
  init_tracing();
  let built = Rc::new(RefCell::new(Vec::<PassthroughSubject<i32>>::new()));
  let c_built = built.clone();
  let lazy = deferred(move || {
    let inner = PassthroughSubject::<i32>::new();
    c_built.borrow_mut().push(inner.clone());
    inner
  });
  assert!(built.borrow().is_empty());

  let log = log();
  let c_log = log.clone();
  let _a = lazy.subscribe(move |v| c_log.borrow_mut().push(format!("a{v}")));
  let c_log = log.clone();
  let _b = lazy.subscribe(move |v| c_log.borrow_mut().push(format!("b{v}")));
  assert_eq!(built.borrow().len(), 2);

  built.borrow()[1].send(1);
  built.borrow()[0].send(2);
  assert_eq!(*log.borrow(), vec!["b1", "a2"]);
}

#[test]
fn test_combine_latest_tutorial_sequence() {
  init_tracing();
  let value_subject = CurrentValueSubject::<i32>::new(3);
  let just = Just::new(1);
  let pairs = Rc::new(RefCell::new(vec![]));

  let c_pairs = pairs.clone();
  let _handle = just.combine_latest(value_subject.clone()).subscribe(move |p| c_pairs.borrow_mut().push(p));
  assert_eq!(*pairs.borrow(), vec![(1, 3)]);

  value_subject.send(10);
  value_subject.set_value(20);
  assert_eq!(*pairs.borrow(), vec![(1, 3), (1, 10), (1, 20)]);
}

#[test]
fn test_combine_latest_failure_is_delivered_once() {
  init_tracing();
  let a = PassthroughSubject::<i32, &str>::new();
  let b = CurrentValueSubject::<i32, &str>::new(0);
  let log = log();

  let on_value = log.clone();
  let on_done = log.clone();
  let _handle = combine_latest(a.clone(), b.clone()).subscribe_completion(
    move |(x, y)| on_value.borrow_mut().push(format!("{x}+{y}")),
    move |c| on_done.borrow_mut().push(format!("{c:?}")),
  );

  a.send(1);
  a.send_completion(Completion::Failure("a failed"));
  b.send(2);

  assert_eq!(*log.borrow(), vec!["1+0", "Failure(\"a failed\")"]);
  assert_eq!(b.subscriber_count(), 0);
}

#[test]
fn test_cancel_mid_send_keeps_current_snapshot() {
  init_tracing();
  let subject = PassthroughSubject::<i32>::new();
  let log = log();
  let handles: Rc<RefCell<Vec<CancellationHandle>>> = Rc::new(RefCell::new(vec![]));

  let c_handles = handles.clone();
  let c_log = log.clone();
  let first = subject.subscribe(move |v| {
    c_log.borrow_mut().push(format!("first {v}"));
    // Cancel everyone else on the first value.
    let taken: Vec<_> = c_handles.borrow_mut().drain(..).collect();
    for handle in taken {
      handle.cancel();
    }
  });
  for name in ["second", "third"] {
    let c_log = log.clone();
    let handle = subject.subscribe(move |v| c_log.borrow_mut().push(format!("{name} {v}")));
    handles.borrow_mut().push(handle);
  }

  subject.send(1);
  subject.send(2);
  assert_eq!(*log.borrow(), vec!["first 1", "second 1", "third 1", "first 2"]);
  drop(first);
  assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn test_handle_is_closed_once_subject_is_dropped() {
  init_tracing();
  let subject = CurrentValueSubject::<i32>::new(1);
  let handle = subject.subscribe(|_| {});
  drop(subject);
  assert!(handle.is_closed());
  handle.cancel();
}

#[test]
fn test_into_future_resolves_single_value() {
  init_tracing();
  let future = Future::<&str, Never>::new(|promise| promise.succeed("done"));
  let value = futures::executor::block_on(future.into_future());
  assert_eq!(value, Ok(Ok("done")));
}
