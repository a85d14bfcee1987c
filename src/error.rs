//! Error and completion types
//!
//! A publisher terminates at most once, either by finishing or by failing
//! with its error type. Publishers that cannot fail use [`Never`], which is
//! `std::convert::Infallible`: a `Failure(Never)` can never be constructed,
//! so "this publisher does not fail" is checked by the type system.

use std::convert::Infallible;

use thiserror::Error;

/// Error type for publishers that can never fail.
pub type Never = Infallible;

/// The terminal event of a publisher, delivered through the completion
/// channel of a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion<Err> {
  /// The publisher finished normally.
  Finished,
  /// The publisher failed with an error.
  Failure(Err),
}

impl<Err> Completion<Err> {
  /// Returns `true` for [`Completion::Finished`].
  #[inline]
  pub fn is_finished(&self) -> bool { matches!(self, Completion::Finished) }

  /// Returns `true` for [`Completion::Failure`].
  #[inline]
  pub fn is_failure(&self) -> bool { matches!(self, Completion::Failure(_)) }

  /// Consumes the completion and returns the error, if any.
  #[inline]
  pub fn failure(self) -> Option<Err> {
    match self {
      Completion::Finished => None,
      Completion::Failure(err) => Some(err),
    }
  }

  /// Short stable label for log fields.
  pub fn as_label(&self) -> &'static str {
    match self {
      Completion::Finished => "finished",
      Completion::Failure(_) => "failure",
    }
  }
}

/// Errors that prevent a publisher future from resolving to a single value.
///
/// Failures emitted by the publisher itself are not reported here; they are
/// carried in the inner `Result` of [`IntoFutureResult`](crate::ops::into_future::IntoFutureResult).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntoFutureError {
  /// The publisher finished without emitting a value.
  #[error("the publisher finished without emitting a value")]
  Empty,

  /// The publisher emitted more than one value before finishing.
  #[error("the publisher emitted more than one value")]
  MultipleValues,
}
