use std::{cell::RefCell, convert::Infallible, rc::Rc};

use super::{subject_core::SubjectCore, subject_subscription::SubjectSubscription};
use crate::{error::Completion, observer::Observer, publisher::Publisher};

/// A subject that always holds a current value.
///
/// Every new subscriber synchronously receives the current value before
/// `subscribe` returns, then every value sent afterwards. Sending a value
/// equal to the current one is not deduplicated.
///
/// [`set_value`](CurrentValueSubject::set_value) and
/// [`send`](CurrentValueSubject::send) are the same operation: both update the
/// current value and notify subscribers.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcombine::prelude::*;
///
/// let subject = CurrentValueSubject::<_>::new(3);
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let _handle = subject.subscribe(move |v| c_seen.borrow_mut().push(v));
///
/// subject.set_value(10);
/// subject.send(20);
/// assert_eq!(*seen.borrow(), vec![3, 10, 20]);
/// assert_eq!(subject.value(), 20);
/// ```
pub struct CurrentValueSubject<Item, Err = Infallible> {
  current: Rc<RefCell<Item>>,
  core: Rc<SubjectCore<Item, Err>>,
}

impl<Item, Err> CurrentValueSubject<Item, Err> {
  pub fn new(initial: Item) -> Self {
    Self { current: Rc::new(RefCell::new(initial)), core: Rc::new(SubjectCore::default()) }
  }

  /// The current value.
  ///
  /// Never fails; it is valid from construction on.
  #[inline]
  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    self.current.borrow().clone()
  }

  /// Identical to [`send`](CurrentValueSubject::send).
  #[inline]
  pub fn set_value(&self, value: Item)
  where
    Item: Clone,
  {
    self.send(value)
  }

  /// Replaces the current value, then notifies every current subscriber in
  /// subscription order.
  pub fn send(&self, value: Item)
  where
    Item: Clone,
  {
    if self.core.reject_after_terminal("send") {
      return;
    }
    *self.current.borrow_mut() = value.clone();
    self.core.next(value);
  }

  /// Sends the terminal event. The current value stays readable, but late
  /// subscribers receive only the completion.
  pub fn send_completion(&self, completion: Completion<Err>)
  where
    Err: Clone,
  {
    if self.core.reject_after_terminal("send_completion") {
      return;
    }
    self.core.terminate(completion);
  }

  #[inline]
  pub fn subscriber_count(&self) -> usize { self.core.subscriber_count() }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.core.is_terminated() }
}

impl<Item, Err> Clone for CurrentValueSubject<Item, Err> {
  fn clone(&self) -> Self { Self { current: self.current.clone(), core: self.core.clone() } }
}

impl<Item: Default, Err> Default for CurrentValueSubject<Item, Err> {
  fn default() -> Self { Self::new(Item::default()) }
}

impl<Item, Err> Publisher for CurrentValueSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;
  type Unsub = Option<SubjectSubscription<Item, Err>>;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    let current = self.current.borrow().clone();
    self.core.subscribe(Box::new(observer), Some(current))
  }
}

impl<Item, Err> Observer<Item, Err> for CurrentValueSubject<Item, Err>
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
