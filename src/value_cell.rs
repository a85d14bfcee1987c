//! Write-once outcome slot used by one-shot producers.

/// Holds zero or one terminal outcome.
///
/// A cell starts empty and transitions exactly once to a success value or a
/// failure. The first resolution wins; later attempts are ignored and leave
/// the stored outcome untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCell<Item, Err> {
  outcome: Option<Result<Item, Err>>,
}

impl<Item, Err> Default for ValueCell<Item, Err> {
  fn default() -> Self { Self { outcome: None } }
}

impl<Item, Err> ValueCell<Item, Err> {
  pub fn new() -> Self { Self::default() }

  #[inline]
  pub fn is_resolved(&self) -> bool { self.outcome.is_some() }

  /// Stores `outcome` if the cell is still empty.
  ///
  /// Returns `true` if this call resolved the cell, `false` if it was already
  /// resolved (in which case `outcome` is dropped).
  pub fn resolve(&mut self, outcome: Result<Item, Err>) -> bool {
    if self.outcome.is_some() {
      return false;
    }
    self.outcome = Some(outcome);
    true
  }

  #[inline]
  pub fn get(&self) -> Option<&Result<Item, Err>> { self.outcome.as_ref() }
}
