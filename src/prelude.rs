//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Observer trait and adapters
pub use crate::observer::{AllObserver, BoxedObserver, DynObserver, FnMutObserver, Observer, SinkObserver};
// Operators
pub use crate::ops::{
  combine_latest::{combine_latest, CombineLatest},
  into_future::{IntoFutureResult, PublisherFuture},
};
// Subject
pub use crate::subject::{CurrentValueSubject, PassthroughSubject, SubjectSubscription};
// Subscription
pub use crate::subscription::*;
pub use crate::{
  error::{Completion, IntoFutureError, Never},
  publisher::{deferred, just, Deferred, Future, Just, Promise, Publisher},
  value_cell::ValueCell,
};
