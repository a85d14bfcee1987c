use std::convert::Infallible;

use super::Publisher;
use crate::observer::Observer;

/// Creates a publisher that emits `v` once to each subscriber, then finishes.
///
/// ```rust
/// use rxcombine::prelude::*;
///
/// let _done = just(123).subscribe(|v| println!("{v}"));
/// ```
pub fn just<Item>(v: Item) -> Just<Item> { Just::new(v) }

/// A publisher holding one value.
///
/// Every subscription independently receives the value followed by a
/// finished completion, synchronously, before `subscribe` returns. `Just` never
/// fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Just<Item>(Item);

impl<Item> Just<Item> {
  pub fn new(v: Item) -> Self { Just(v) }

  /// The value every subscriber receives.
  #[inline]
  pub fn output(&self) -> &Item { &self.0 }
}

impl<Item: Clone> Publisher for Just<Item> {
  type Item = Item;
  type Err = Infallible;
  type Unsub = ();

  fn actual_subscribe<O>(&self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    observer.next(self.0.clone());
    observer.complete();
  }
}
