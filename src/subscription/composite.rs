use std::{cell::RefCell, rc::Rc};

use smallvec::SmallVec;

use super::{BoxedSubscription, Subscription};

/// A shared group of subscriptions that are cancelled together.
///
/// Cloning yields another handle to the same group. Operators with several
/// upstreams keep one clone internally so they can tear the group down when
/// one side fails, and return another clone to the subscriber.
///
/// Adding to a group that is already closed cancels the new subscription at
/// once.
#[derive(Clone, Default)]
pub struct CompositeSubscription(Rc<RefCell<Inner>>);

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxedSubscription; 2]>,
}

impl CompositeSubscription {
  pub fn add<S: Subscription + 'static>(&self, subscription: S) {
    let rejected = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        Some(subscription)
      } else {
        inner.teardown.retain(|s| !s.is_closed());
        inner.teardown.push(BoxedSubscription::new(subscription));
        None
      }
    };
    if let Some(subscription) = rejected {
      subscription.unsubscribe();
    }
  }

  /// Number of live subscriptions in the group.
  pub fn teardown_size(&self) -> usize { self.0.borrow().teardown.len() }

  /// Closes the group without consuming this handle.
  pub(crate) fn close(&self) {
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    // The borrow is released first: cancelling may drop observers that hold
    // clones of this group.
    for subscription in teardown {
      subscription.unsubscribe();
    }
  }
}

impl Subscription for CompositeSubscription {
  #[inline]
  fn unsubscribe(self) { self.close() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.borrow().closed }
}

impl std::fmt::Debug for CompositeSubscription {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("CompositeSubscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}
