use super::{BoxedSubscription, Subscription, SubscriptionBag};

/// An RAII owner of a subscription.
///
/// When this structure is dropped (falls out of scope), the subscription is
/// cancelled. Store it in a variable, a struct field or a
/// [`SubscriptionBag`] to keep receiving events.
///
/// **Attention:** `let _ = publisher.subscribe(..)` drops the guard at once,
/// which cancels the subscription immediately.
#[derive(Debug)]
#[must_use = "dropping the guard cancels the subscription"]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

/// The handle every `subscribe*` call returns.
pub type CancellationHandle = SubscriptionGuard<BoxedSubscription>;

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription to enable RAII behavior for it.
  pub fn new(subscription: T) -> Self { SubscriptionGuard(Some(subscription)) }

  /// Cancels the subscription now.
  pub fn cancel(mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }

  /// Returns `true` once the subscription no longer receives events.
  pub fn is_closed(&self) -> bool { self.0.as_ref().is_none_or(Subscription::is_closed) }
}

impl SubscriptionGuard<BoxedSubscription> {
  /// Moves this handle into `bag`; the bag now owns its lifetime.
  pub fn store(self, bag: &mut SubscriptionBag) { bag.insert(self); }
}

impl<T: Subscription> Subscription for SubscriptionGuard<T> {
  #[inline]
  fn unsubscribe(self) { self.cancel() }

  #[inline]
  fn is_closed(&self) -> bool { SubscriptionGuard::is_closed(self) }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}
