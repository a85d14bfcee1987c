//! The `Publisher` trait and the one-shot producers.
//!
//! Every producer kind implements the same subscribe contract:
//!
//! | Type | Hot/Cold | Behavior on subscribe |
//! |------|----------|-----------------------|
//! | [`Just`] | cold | emits its value, then finishes |
//! | [`Future`] | hot | resolver already ran; replays or waits for the outcome |
//! | [`Deferred`] | cold | builds a fresh inner publisher and forwards to it |
//! | [`CurrentValueSubject`](crate::subject::CurrentValueSubject) | hot | replays the current value |
//! | [`PassthroughSubject`](crate::subject::PassthroughSubject) | hot | nothing until the next `send` |
//! | [`CombineLatest`](crate::ops::combine_latest::CombineLatest) | depends on upstreams | subscribes to both upstreams |

use crate::{
  error::Completion,
  observer::{AllObserver, FnMutObserver, Observer, SinkObserver},
  ops::{combine_latest::CombineLatest, into_future::PublisherFuture},
  subscription::{BoxedSubscription, CancellationHandle, Subscription, SubscriptionGuard},
};

pub mod deferred;
pub mod future;
pub mod just;

pub use deferred::{deferred, Deferred};
pub use future::{Future, Promise};
pub use just::{just, Just};

/// Something that can be subscribed to and emits zero or more values,
/// optionally terminating with a [`Completion`].
///
/// Subscribing borrows the publisher, so one publisher can be subscribed any
/// number of times. All delivery is synchronous: events triggered by a
/// `subscribe` call are delivered before it returns.
pub trait Publisher {
  type Item;
  type Err;
  /// Handle returned by [`actual_subscribe`](Publisher::actual_subscribe).
  type Unsub: Subscription + 'static;

  /// Attaches `observer` and returns the raw subscription.
  ///
  /// Most callers want one of the `subscribe*` methods instead, which return
  /// an owning [`CancellationHandle`].
  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static;

  /// Subscribes with a value-only callback.
  ///
  /// Only available on publishers that cannot fail (`Err = Never`).
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
  /// subject.send(10);
  /// assert_eq!(*seen.borrow(), vec![3, 10]);
  /// ```
  fn subscribe<F>(&self, on_value: F) -> CancellationHandle
  where
    F: FnMut(Self::Item) + 'static,
    FnMutObserver<F>: Observer<Self::Item, Self::Err>,
  {
    SubscriptionGuard::new(BoxedSubscription::new(self.actual_subscribe(FnMutObserver(on_value))))
  }

  /// Subscribes with a value callback and a completion callback.
  ///
  /// `on_completion` runs at most once, with `Finished` or `Failure(err)`.
  fn subscribe_completion<N, C>(&self, on_value: N, on_completion: C) -> CancellationHandle
  where
    N: FnMut(Self::Item) + 'static,
    C: FnOnce(Completion<Self::Err>) + 'static,
  {
    let observer = SinkObserver::new(on_value, on_completion);
    SubscriptionGuard::new(BoxedSubscription::new(self.actual_subscribe(observer)))
  }

  /// Subscribes with separate callbacks for values, failure and completion.
  fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> CancellationHandle
  where
    N: FnMut(Self::Item) + 'static,
    E: FnOnce(Self::Err) + 'static,
    C: FnOnce() + 'static,
  {
    let observer = AllObserver { next, error, complete };
    SubscriptionGuard::new(BoxedSubscription::new(self.actual_subscribe(observer)))
  }

  /// Combines this publisher with `other`, emitting the pair of latest values
  /// whenever either side emits, once both have emitted at least once.
  fn combine_latest<B>(&self, other: B) -> CombineLatest<Self, B>
  where
    Self: Clone,
    B: Publisher<Err = Self::Err>,
  {
    CombineLatest::new(self.clone(), other)
  }

  /// Converts the publisher into a `std::future::Future` resolving with its
  /// single value.
  fn into_future(&self) -> PublisherFuture<Self::Item, Self::Err>
  where
    Self: Sized,
    Self::Item: 'static,
    Self::Err: 'static,
  {
    PublisherFuture::new(self)
  }
}
