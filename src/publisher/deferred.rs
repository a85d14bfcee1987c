use super::Publisher;
use crate::observer::Observer;

/// Creates a publisher that builds a fresh inner publisher for every
/// subscription.
///
/// ```rust
/// use rxcombine::prelude::*;
///
/// let lazy = deferred(|| {
///   println!("Hi!");
///   just("Hello!")
/// });
/// // Nothing printed yet.
/// let _done = lazy.subscribe(|v| println!("{v}"));
/// // Prints: Hi!\nHello!\n
/// ```
pub fn deferred<F, P>(builder: F) -> Deferred<F>
where
  F: Fn() -> P,
  P: Publisher,
{
  Deferred::new(builder)
}

/// Lazy wrapper around a publisher factory.
///
/// The builder never runs at construction time. Each `subscribe` runs it
/// exactly once and forwards the subscription to the publisher it returns,
/// so every subscriber gets an independent inner publisher with independent
/// side effects. Wrapping an eager [`Future`](super::Future) this way turns
/// it into a lazy, per-subscriber one-shot.
#[derive(Clone)]
pub struct Deferred<F> {
  builder: F,
}

impl<F> Deferred<F> {
  pub fn new(builder: F) -> Self { Self { builder } }
}

impl<F, P> Publisher for Deferred<F>
where
  F: Fn() -> P,
  P: Publisher,
{
  type Item = P::Item;
  type Err = P::Err;
  type Unsub = P::Unsub;

  fn actual_subscribe<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    tracing::trace!("building deferred publisher");
    (self.builder)().actual_subscribe(observer)
  }
}
