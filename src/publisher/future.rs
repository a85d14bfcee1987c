use std::{cell::RefCell, rc::Rc};

use super::Publisher;
use crate::{
  observer::Observer,
  subject::{
    subject_subscription::SubjectSubscription,
    subscribers::{broadcast_complete, broadcast_error, broadcast_value, Subscribers, SubscribersRc},
  },
  value_cell::ValueCell,
};

struct FutureInner<Item, Err> {
  cell: RefCell<ValueCell<Item, Err>>,
  pending: SubscribersRc<Item, Err>,
}

/// An eager, one-shot publisher.
///
/// The resolver closure runs exactly once, synchronously, inside
/// [`Future::new`], whether or not anyone ever subscribes. It receives a
/// [`Promise`] which it may fulfil right away or keep and fulfil later.
///
/// The first `succeed`/`fail` call wins; later calls are silently ignored.
/// Subscribers that arrive after resolution receive the stored outcome
/// immediately. Subscribers that arrive before wait in a queue and are
/// notified, in arrival order, when the promise is fulfilled.
///
/// A success is delivered as the value followed by a finished completion.
///
/// # Caveat
///
/// Only the promise is idempotent. If the resolver wires the promise to an
/// external source, for example a subject subscription, the code around the
/// promise call runs on every event from that source even though only the
/// first call has any effect on the outcome.
///
/// Wrap the future in [`Deferred`](super::Deferred) to run the resolver
/// lazily, once per subscription.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcombine::prelude::*;
///
/// let future = Future::<i32, Never>::new(|promise| promise.succeed(42));
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let _done = future.subscribe(move |v| c_seen.borrow_mut().push(v));
/// assert_eq!(*seen.borrow(), vec![42]);
/// ```
pub struct Future<Item, Err> {
  inner: Rc<FutureInner<Item, Err>>,
}

/// The capability handed to a [`Future`] resolver.
pub struct Promise<Item, Err> {
  inner: Rc<FutureInner<Item, Err>>,
}

impl<Item, Err> Future<Item, Err> {
  pub fn new<F>(resolver: F) -> Self
  where
    F: FnOnce(Promise<Item, Err>),
  {
    let inner = Rc::new(FutureInner {
      cell: RefCell::new(ValueCell::new()),
      pending: Rc::new(RefCell::new(Subscribers::default())),
    });
    resolver(Promise { inner: inner.clone() });
    Self { inner }
  }

  #[inline]
  pub fn is_resolved(&self) -> bool { self.inner.cell.borrow().is_resolved() }

  /// The resolved outcome, if the promise has been fulfilled.
  pub fn outcome(&self) -> Option<Result<Item, Err>>
  where
    Item: Clone,
    Err: Clone,
  {
    self.inner.cell.borrow().get().cloned()
  }
}

impl<Item, Err> Promise<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  #[inline]
  pub fn succeed(&self, value: Item) { self.resolve(Ok(value)) }

  #[inline]
  pub fn fail(&self, err: Err) { self.resolve(Err(err)) }

  /// Fulfils the promise with `outcome`, unless it was fulfilled before.
  pub fn resolve(&self, outcome: Result<Item, Err>) {
    let won = self.inner.cell.borrow_mut().resolve(outcome.clone());
    if !won {
      tracing::trace!("promise already fulfilled; ignoring");
      return;
    }
    let waiting = self.inner.pending.borrow_mut().drain();
    tracing::trace!(success = outcome.is_ok(), waiting = waiting.len(), "promise fulfilled");
    match outcome {
      Ok(value) => {
        broadcast_value(&waiting, value);
        broadcast_complete(&waiting);
      }
      Err(err) => broadcast_error(&waiting, err),
    }
  }
}

impl<Item, Err> Clone for Future<Item, Err> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<Item, Err> Clone for Promise<Item, Err> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<Item, Err> Publisher for Future<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;
  type Unsub = Option<SubjectSubscription<Item, Err>>;

  fn actual_subscribe<O>(&self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    let outcome = self.inner.cell.borrow().get().cloned();
    match outcome {
      Some(Ok(value)) => {
        observer.next(value);
        observer.complete();
        None
      }
      Some(Err(err)) => {
        observer.error(err);
        None
      }
      None => {
        let (id, _) = self.inner.pending.borrow_mut().add(Box::new(observer));
        Some(SubjectSubscription::new(&self.inner.pending, id))
      }
    }
  }
}
