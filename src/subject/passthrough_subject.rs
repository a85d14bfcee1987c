use std::{convert::Infallible, rc::Rc};

use super::{subject_core::SubjectCore, subject_subscription::SubjectSubscription};
use crate::{error::Completion, observer::Observer, publisher::Publisher};

/// A subject without a cached value.
///
/// `send` reaches only the subscribers registered at the moment of the call.
/// Subscribing delivers nothing immediately, and values sent before a
/// subscription are never seen by it.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcombine::prelude::*;
///
/// let subject = PassthroughSubject::<i32>::new();
/// subject.send(1); // nobody is listening: lost
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let _handle = subject.subscribe(move |v| c_seen.borrow_mut().push(v));
/// subject.send(2);
/// assert_eq!(*seen.borrow(), vec![2]);
/// ```
pub struct PassthroughSubject<Item, Err = Infallible> {
  core: Rc<SubjectCore<Item, Err>>,
}

impl<Item, Err> PassthroughSubject<Item, Err> {
  pub fn new() -> Self { Self { core: Rc::new(SubjectCore::default()) } }

  /// Sends `value` to every current subscriber, in subscription order.
  pub fn send(&self, value: Item)
  where
    Item: Clone,
  {
    if self.core.reject_after_terminal("send") {
      return;
    }
    self.core.next(value);
  }

  /// Sends the terminal event. The subject accepts no further sends.
  pub fn send_completion(&self, completion: Completion<Err>)
  where
    Err: Clone,
  {
    if self.core.reject_after_terminal("send_completion") {
      return;
    }
    self.core.terminate(completion);
  }

  /// Get the number of current subscribers.
  #[inline]
  pub fn subscriber_count(&self) -> usize { self.core.subscriber_count() }

  /// Returns `true` once a completion has been sent.
  #[inline]
  pub fn is_terminated(&self) -> bool { self.core.is_terminated() }
}

impl<Item, Err> Default for PassthroughSubject<Item, Err> {
  fn default() -> Self { Self::new() }
}

impl<Item, Err> Clone for PassthroughSubject<Item, Err> {
  fn clone(&self) -> Self { Self { core: self.core.clone() } }
}

impl<Item, Err> Publisher for PassthroughSubject<Item, Err>
where
  Item: 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;
  type Unsub = Option<SubjectSubscription<Item, Err>>;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    self.core.subscribe(Box::new(observer), None)
  }
}

impl<Item, Err> Observer<Item, Err> for PassthroughSubject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  #[inline]
  fn next(&mut self, value: Item) { self.send(value) }

  #[inline]
  fn error(self, err: Err) { self.send_completion(Completion::Failure(err)) }

  #[inline]
  fn complete(self) { self.send_completion(Completion::Finished) }

  #[inline]
  fn is_closed(&self) -> bool { self.is_terminated() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::{
    publisher::just,
    subscription::{CancellationHandle, Subscription},
  };

  fn collect(subject: &PassthroughSubject<i32>, log: &Rc<RefCell<Vec<i32>>>) -> CancellationHandle {
    let log = log.clone();
    subject.subscribe(move |v| log.borrow_mut().push(v))
  }

  #[test]
  fn values_before_subscribe_are_lost() {
    let subject = PassthroughSubject::<i32>::new();
    subject.send(1);
    let log = Rc::new(RefCell::new(vec![]));
    let _h = collect(&subject, &log);
    assert!(log.borrow().is_empty());
    subject.send(2);
    assert_eq!(*log.borrow(), vec![2]);
  }

  #[test]
  fn multiple_subscribers_see_only_later_values() {
    let subject = PassthroughSubject::<i32>::new();
    let first = Rc::new(RefCell::new(vec![]));
    let second = Rc::new(RefCell::new(vec![]));

    let _h1 = collect(&subject, &first);
    subject.send(1);
    let _h2 = collect(&subject, &second);
    subject.send(2);

    assert_eq!(*first.borrow(), vec![1, 2]);
    assert_eq!(*second.borrow(), vec![2]);
    assert_eq!(subject.subscriber_count(), 2);
  }

  #[test]
  fn cancel_detaches() {
    let subject = PassthroughSubject::<i32>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let handle = collect(&subject, &log);
    subject.send(1);
    handle.cancel();
    subject.send(2);
    assert_eq!(*log.borrow(), vec![1]);
    assert_eq!(subject.subscriber_count(), 0);
  }

  #[test]
  fn dropping_the_handle_detaches() {
    let subject = PassthroughSubject::<i32>::new();
    let log = Rc::new(RefCell::new(vec![]));
    {
      let _h = collect(&subject, &log);
      subject.send(1);
    }
    subject.send(2);
    assert_eq!(*log.borrow(), vec![1]);
  }

  #[test]
  fn equal_values_are_not_deduplicated() {
    let subject = PassthroughSubject::<i32>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let _h = collect(&subject, &log);
    subject.send(5);
    subject.send(5);
    assert_eq!(*log.borrow(), vec![5, 5]);
  }

  #[test]
  fn completion_reaches_current_and_late_subscribers() {
    let subject = PassthroughSubject::<i32, &str>::new();
    let log = Rc::new(RefCell::new(vec![]));

    let c_log = log.clone();
    let c_log2 = log.clone();
    let _early = subject.subscribe_completion(
      move |v| c_log.borrow_mut().push(format!("early {v}")),
      move |c| c_log2.borrow_mut().push(format!("early {c:?}")),
    );
    subject.send(1);
    subject.send_completion(Completion::Failure("boom"));
    assert!(subject.is_terminated());
    assert_eq!(subject.subscriber_count(), 0);

    let c_log = log.clone();
    let late = subject.subscribe_completion(
      move |v| c_log.borrow_mut().push(format!("late {v}")),
      |_| {},
    );
    assert!(late.is_closed());
    assert_eq!(*log.borrow(), vec!["early 1", "early Failure(\"boom\")"]);
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "already completed")]
  fn send_after_completion_panics_in_debug() {
    let subject = PassthroughSubject::<i32>::new();
    subject.send_completion(Completion::Finished);
    subject.send(1);
  }

  #[test]
  #[cfg(not(debug_assertions))]
  fn sends_after_completion_are_ignored_in_release() {
    let subject = PassthroughSubject::<i32, &str>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    let c_log2 = log.clone();
    let _h = subject.subscribe_completion(
      move |v| c_log.borrow_mut().push(format!("{v}")),
      move |c| c_log2.borrow_mut().push(format!("{c:?}")),
    );

    subject.send_completion(Completion::Finished);
    subject.send(1);
    subject.send_completion(Completion::Failure("late"));
    assert_eq!(*log.borrow(), vec!["Finished"]);

    let c_log = log.clone();
    let _late = subject
      .subscribe_completion(|_| {}, move |c| c_log.borrow_mut().push(format!("late {c:?}")));
    assert_eq!(*log.borrow(), vec!["Finished", "late Finished"]);
  }

  #[test]
  fn subscriber_added_during_send_misses_that_send() {
    let subject = PassthroughSubject::<i32>::new();
    let late_log = Rc::new(RefCell::new(vec![]));
    let keep: Rc<RefCell<Vec<CancellationHandle>>> = Rc::new(RefCell::new(vec![]));

    let c_subject = subject.clone();
    let c_late = late_log.clone();
    let c_keep = keep.clone();
    let _outer = subject.subscribe(move |v| {
      if v == 1 {
        let log = c_late.clone();
        let handle = c_subject.subscribe(move |v| log.borrow_mut().push(v));
        c_keep.borrow_mut().push(handle);
      }
    });

    subject.send(1);
    assert!(late_log.borrow().is_empty());
    subject.send(2);
    assert_eq!(*late_log.borrow(), vec![2]);
  }

  #[test]
  fn subject_relays_another_publisher() {
    let subject = PassthroughSubject::<i32>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let _h = collect(&subject, &log);

    let relay = just(9).actual_subscribe(subject.clone());
    assert!(relay.is_closed());
    assert_eq!(*log.borrow(), vec![9]);
    assert!(subject.is_terminated());
  }
}
