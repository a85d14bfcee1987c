//! Subscription handles
//!
//! A [`Subscription`] is a revocation capability returned from subscribing.
//! It never owns the subscriber callback; the publisher's registry does.
//!
//! Ownership is explicit:
//!
//! - [`CancellationHandle`] is an RAII guard held by exactly one owner.
//!   Calling [`cancel`](SubscriptionGuard::cancel) or dropping it detaches the
//!   subscriber.
//! - [`SubscriptionBag`] is an explicitly owned collection of handles;
//!   dropping or clearing it cancels every contained subscription.

mod bag;
mod boxed;
mod composite;
mod guard;

pub use bag::SubscriptionBag;
pub use boxed::{BoxedSubscription, BoxedSubscriptionInner};
pub use composite::CompositeSubscription;
pub use guard::{CancellationHandle, SubscriptionGuard};

/// Handle that can detach a subscriber from its publisher.
pub trait Subscription {
  /// Detaches the subscriber so it receives no further events.
  ///
  /// Delivery already in progress for the current event is not interrupted.
  fn unsubscribe(self);

  /// Returns `true` once the subscription no longer receives events.
  fn is_closed(&self) -> bool;
}

/// Subscription of a publisher that finished synchronously inside
/// `subscribe`; there is nothing left to cancel.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<T: Subscription> Subscription for Option<T> {
  #[inline]
  fn unsubscribe(self) {
    if let Some(inner) = self {
      inner.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().is_none_or(Subscription::is_closed) }
}
