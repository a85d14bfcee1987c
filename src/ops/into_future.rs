//! Bridges a publisher into a `std::future::Future`.
//!
//! ## Behavior
//!
//! - **Single value**: the future resolves with `Ok(Ok(value))` once the
//!   publisher finishes.
//! - **Failure**: the future resolves with `Ok(Err(err))`.
//! - **Finished without a value**: `Err(IntoFutureError::Empty)`.
//! - **More than one value**: `Err(IntoFutureError::MultipleValues)`, as soon
//!   as the second value arrives.
//!
//! Dropping the future cancels its subscription.
//!
//! ```rust
//! use rxcombine::prelude::*;
//!
//! let value = futures::executor::block_on(just(42).into_future());
//! assert_eq!(value, Ok(Ok(42)));
//! ```

use std::{
  cell::RefCell,
  future::Future,
  pin::Pin,
  rc::Rc,
  task::{Context as TaskContext, Poll, Waker},
};

use crate::{
  error::IntoFutureError,
  observer::Observer,
  publisher::Publisher,
  subscription::{BoxedSubscription, CancellationHandle, SubscriptionGuard},
};

/// The output of [`PublisherFuture`].
///
/// - `Ok(Ok(value))`: exactly one value, then finished
/// - `Ok(Err(err))`: the publisher failed
/// - `Err(_)`: the publisher did not produce exactly one value
pub type IntoFutureResult<T, E> = Result<Result<T, E>, IntoFutureError>;

enum State<Item, Err> {
  Empty,
  HasValue(Item),
  MultipleValues,
  Error(Err),
}

struct SharedState<Item, Err> {
  state: State<Item, Err>,
  waker: Option<Waker>,
  completed: bool,
}

// ============================================================================
// PublisherFuture
// ============================================================================

/// A future that resolves with the single value of a publisher.
#[must_use = "futures do nothing unless polled"]
pub struct PublisherFuture<Item, Err> {
  shared: Rc<RefCell<SharedState<Item, Err>>>,
  _subscription: CancellationHandle,
}

impl<Item: 'static, Err: 'static> PublisherFuture<Item, Err> {
  /// Subscribes to `publisher` right away.
  pub fn new<P>(publisher: &P) -> Self
  where
    P: Publisher<Item = Item, Err = Err>,
  {
    let shared =
      Rc::new(RefCell::new(SharedState { state: State::Empty, waker: None, completed: false }));
    let observer = IntoFutureObserver { shared: shared.clone() };
    let subscription =
      SubscriptionGuard::new(BoxedSubscription::new(publisher.actual_subscribe(observer)));
    Self { shared, _subscription: subscription }
  }
}

impl<Item, Err> Future for PublisherFuture<Item, Err> {
  type Output = IntoFutureResult<Item, Err>;

  fn poll(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
    let mut shared = self.shared.borrow_mut();
    if shared.completed {
      let result = match std::mem::replace(&mut shared.state, State::Empty) {
        State::Empty => Err(IntoFutureError::Empty),
        State::HasValue(v) => Ok(Ok(v)),
        State::MultipleValues => Err(IntoFutureError::MultipleValues),
        State::Error(e) => Ok(Err(e)),
      };
      Poll::Ready(result)
    } else {
      shared.waker = Some(cx.waker().clone());
      Poll::Pending
    }
  }
}

// ============================================================================
// IntoFutureObserver
// ============================================================================

struct IntoFutureObserver<Item, Err> {
  shared: Rc<RefCell<SharedState<Item, Err>>>,
}

impl<Item, Err> IntoFutureObserver<Item, Err> {
  fn wake(&self) {
    let waker = self.shared.borrow_mut().waker.take();
    if let Some(waker) = waker {
      waker.wake();
    }
  }
}

impl<Item, Err> Observer<Item, Err> for IntoFutureObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    let mut shared = self.shared.borrow_mut();
    match &shared.state {
      State::Empty => shared.state = State::HasValue(value),
      State::HasValue(_) => {
        shared.state = State::MultipleValues;
        shared.completed = true;
        drop(shared);
        self.wake();
      }
      State::MultipleValues | State::Error(_) => {}
    }
  }

  fn error(self, err: Err) {
    {
      let mut shared = self.shared.borrow_mut();
      if shared.completed {
        return;
      }
      shared.state = State::Error(err);
      shared.completed = true;
    }
    self.wake();
  }

  fn complete(self) {
    self.shared.borrow_mut().completed = true;
    self.wake();
  }

  fn is_closed(&self) -> bool { self.shared.borrow().completed }
}
