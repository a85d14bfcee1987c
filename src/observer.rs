//! Observer trait and implementations
//!
//! An observer is the receiving end of a subscription: zero or more values,
//! then at most one terminal event, either a failure or a finish.

use std::convert::Infallible;

use crate::error::Completion;

// ============================================================================
// Observer Trait
// ============================================================================

/// The receiving end of a publisher.
///
/// `error` and `complete` take `self` by value: once a terminal event has been
/// delivered there is no observer left to deliver anything else to.
pub trait Observer<Item, Err> {
  fn next(&mut self, value: Item);

  /// The publisher failed. No further events follow.
  fn error(self, err: Err);

  /// The publisher finished normally. No further events follow.
  fn complete(self);

  /// Returns `true` if this observer no longer wants values.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Object-safe mirror of [`Observer`].
///
/// Terminal methods take `Box<Self>` so a boxed observer can still be consumed
/// through a vtable.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { self.error(err); }
  fn box_complete(self: Box<Self>) { self.complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed observer, as stored in subscriber registries.
pub type BoxedObserver<'a, Item, Err> = Box<dyn DynObserver<Item, Err> + 'a>;

impl<'a, Item, Err> Observer<Item, Err> for BoxedObserver<'a, Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Value-only closure observer.
///
/// Only usable with publishers that cannot fail: the error type is fixed to
/// `Infallible`, so a failure is statically impossible. Completion is ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item, Infallible> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, err: Infallible) { match err {} }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer built from a value closure and a completion closure.
///
/// `on_completion` runs at most once, with either `Finished` or
/// `Failure(err)`.
pub struct SinkObserver<N, C> {
  on_value: N,
  on_completion: C,
}

impl<N, C> SinkObserver<N, C> {
  pub fn new(on_value: N, on_completion: C) -> Self { Self { on_value, on_completion } }
}

impl<N, C, Item, Err> Observer<Item, Err> for SinkObserver<N, C>
where
  N: FnMut(Item),
  C: FnOnce(Completion<Err>),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.on_value)(value); }

  fn error(self, err: Err) { (self.on_completion)(Completion::Failure(err)); }

  fn complete(self) { (self.on_completion)(Completion::Finished); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer with separate closures for values, failure and completion.
pub struct AllObserver<N, E, C> {
  pub next: N,
  pub error: E,
  pub complete: C,
}

impl<N, E, C, Item, Err> Observer<Item, Err> for AllObserver<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  fn error(self, err: Err) { (self.error)(err); }

  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// An absent observer swallows every event and reports itself closed.
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = self.as_mut() {
      observer.next(value)
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(observer) = self {
      observer.complete()
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().is_none_or(Observer::is_closed) }
}

// ============================================================================
// Tests
// ============================================================================
