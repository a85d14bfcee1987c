use std::{cell::RefCell, rc::Rc};

use crate::{
  observer::Observer,
  publisher::Publisher,
  subject::subscribers::{Event, Slot},
  subscription::{CompositeSubscription, Subscription},
};

/// Combines two publishers into a publisher of pairs.
///
/// See [`CombineLatest`].
pub fn combine_latest<A, B>(a: A, b: B) -> CombineLatest<A, B>
where
  A: Publisher,
  B: Publisher<Err = A::Err>,
{
  CombineLatest::new(a, b)
}

/// Emits `(latest_a, latest_b)` whenever either upstream emits, once both have
/// emitted at least once.
///
/// - Subscribing subscribes to `a` first, then to `b`.
/// - The first failure from either side is forwarded at once and both
///   upstream subscriptions are cancelled.
/// - The combined publisher finishes only when both upstreams have finished.
/// - Cancelling the combined subscription cancels both upstreams.
#[derive(Clone)]
pub struct CombineLatest<A, B> {
  a: A,
  b: B,
}

impl<A, B> CombineLatest<A, B> {
  pub fn new(a: A, b: B) -> Self { Self { a, b } }
}

struct Latest<A, B> {
  a: Option<A>,
  b: Option<B>,
  a_done: bool,
  b_done: bool,
}

struct CombineState<A, B, Err> {
  latest: RefCell<Latest<A, B>>,
  downstream: Slot<(A, B), Err>,
  upstreams: CompositeSubscription,
}

impl<A: Clone, B: Clone, Err> CombineState<A, B, Err> {
  fn update(&self, store: impl FnOnce(&mut Latest<A, B>)) {
    if self.upstreams.is_closed() {
      return;
    }
    let pair = {
      let mut latest = self.latest.borrow_mut();
      store(&mut latest);
      match (&latest.a, &latest.b) {
        (Some(a), Some(b)) => Some((a.clone(), b.clone())),
        _ => None,
      }
    };
    if let Some(pair) = pair {
      self.downstream.deliver(Event::Next(pair));
    }
  }

  fn fail(&self, err: Err) {
    if self.upstreams.is_closed() {
      return;
    }
    tracing::trace!("combine_latest upstream failed; cancelling both sides");
    self.upstreams.close();
    self.downstream.deliver(Event::Error(err));
  }

  fn finish(&self, mark: impl FnOnce(&mut Latest<A, B>)) {
    let both = {
      let mut latest = self.latest.borrow_mut();
      mark(&mut latest);
      latest.a_done && latest.b_done
    };
    if both && !self.upstreams.is_closed() {
      self.upstreams.close();
      self.downstream.deliver(Event::Complete);
    }
  }

  fn is_closed(&self) -> bool { self.upstreams.is_closed() || self.downstream.is_closed() }
}

struct SideA<A, B, Err>(Rc<CombineState<A, B, Err>>);

impl<A: Clone, B: Clone, Err> Observer<A, Err> for SideA<A, B, Err> {
  #[inline]
  fn next(&mut self, value: A) { self.0.update(|latest| latest.a = Some(value)) }

  #[inline]
  fn error(self, err: Err) { self.0.fail(err) }

  #[inline]
  fn complete(self) { self.0.finish(|latest| latest.a_done = true) }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

struct SideB<A, B, Err>(Rc<CombineState<A, B, Err>>);

impl<A: Clone, B: Clone, Err> Observer<B, Err> for SideB<A, B, Err> {
  #[inline]
  fn next(&mut self, value: B) { self.0.update(|latest| latest.b = Some(value)) }

  #[inline]
  fn error(self, err: Err) { self.0.fail(err) }

  #[inline]
  fn complete(self) { self.0.finish(|latest| latest.b_done = true) }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<A, B> Publisher for CombineLatest<A, B>
where
  A: Publisher,
  B: Publisher<Err = A::Err>,
  A::Item: Clone + 'static,
  B::Item: Clone + 'static,
  A::Err: 'static,
{
  type Item = (A::Item, B::Item);
  type Err = A::Err;
  type Unsub = CompositeSubscription;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    let upstreams = CompositeSubscription::default();
    let state = Rc::new(CombineState {
      latest: RefCell::new(Latest { a: None, b: None, a_done: false, b_done: false }),
      downstream: Slot::new(Box::new(observer)),
      upstreams: upstreams.clone(),
    });

    upstreams.add(self.a.actual_subscribe(SideA(state.clone())));
    // `a` may already have failed synchronously.
    if !upstreams.is_closed() {
      upstreams.add(self.b.actual_subscribe(SideB(state)));
    }
    upstreams
  }
}
