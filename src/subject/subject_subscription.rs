use std::rc::Rc;

use super::subscribers::{SubscribersRc, SubscribersWeak};
use crate::subscription::Subscription;

/// Cancellation handle for an entry in a subscriber registry.
///
/// Holds only a weak pointer to the registry and the entry ID: the registry
/// keeps exclusive ownership of the observer. Unsubscribing removes the entry
/// synchronously. If the owning publisher has already been dropped, there is
/// nothing left to remove and unsubscribing is a no-op.
pub struct SubjectSubscription<Item, Err> {
  observers: SubscribersWeak<Item, Err>,
  id: usize,
}

impl<Item, Err> SubjectSubscription<Item, Err> {
  pub(crate) fn new(observers: &SubscribersRc<Item, Err>, id: usize) -> Self {
    Self { observers: Rc::downgrade(observers), id }
  }
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    let Some(observers) = self.observers.upgrade() else {
      return;
    };
    // Dropped after the registry borrow ends: the observer may own handles
    // into this same registry.
    let removed = observers.borrow_mut().remove(self.id);
    if removed.is_some() {
      tracing::trace!(subscriber_id = self.id, "subscriber removed");
    }
    drop(removed);
  }

  fn is_closed(&self) -> bool {
    self.observers.upgrade().is_none_or(|observers| !observers.borrow().contains(self.id))
  }
}

impl<Item, Err> std::fmt::Debug for SubjectSubscription<Item, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SubjectSubscription").field("id", &self.id).finish()
  }
}
