use smallvec::SmallVec;

use super::CancellationHandle;

/// An explicitly owned collection of subscriptions.
///
/// Keeps every stored handle alive until the bag is cleared or dropped, at
/// which point all of them are cancelled in insertion order.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcombine::prelude::*;
///
/// let subject = PassthroughSubject::<i32>::new();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let mut bag = SubscriptionBag::new();
///
/// let c_seen = seen.clone();
/// subject.subscribe(move |v| c_seen.borrow_mut().push(v)).store(&mut bag);
/// subject.send(1);
/// drop(bag);
/// subject.send(2);
///
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionBag {
  handles: SmallVec<[CancellationHandle; 4]>,
}

impl SubscriptionBag {
  pub fn new() -> Self { Self::default() }

  /// Takes ownership of `handle`. Handles that have already closed are pruned
  /// first.
  pub fn insert(&mut self, handle: CancellationHandle) {
    self.handles.retain(|h| !h.is_closed());
    self.handles.push(handle);
  }

  #[inline]
  pub fn len(&self) -> usize { self.handles.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.handles.is_empty() }

  /// Cancels every stored subscription and empties the bag.
  pub fn cancel_all(&mut self) {
    for handle in self.handles.drain(..) {
      handle.cancel();
    }
  }
}

impl Drop for SubscriptionBag {
  fn drop(&mut self) { self.cancel_all(); }
}
