//! # rxcombine: synchronous publishers and subscribers
//!
//! A small, single-threaded pub/sub engine: subjects you feed by hand,
//! one-shot producers, lazy construction, `combine_latest`, and explicit
//! subscription lifetimes.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxcombine::prelude::*;
//!
//! let subject = CurrentValueSubject::<_>::new(3);
//! let seen = Rc::new(RefCell::new(vec![]));
//!
//! let c_seen = seen.clone();
//! let handle = just(1).combine_latest(subject.clone()).subscribe(move |v| c_seen.borrow_mut().push(v));
//! subject.send(10);
//! handle.cancel();
//! subject.send(20);
//!
//! assert_eq!(*seen.borrow(), vec![(1, 3), (1, 10)]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Publisher`] | Anything that can be subscribed to |
//! | [`Observer`] | Consumes values and one terminal [`Completion`] |
//! | [`CancellationHandle`] | Detaches a subscriber when cancelled or dropped |
//! | [`SubscriptionBag`] | Owns many handles; dropping it cancels them all |
//!
//! ## Delivery model
//!
//! Everything runs on the caller's thread. `send`, `subscribe` and promise
//! resolution invoke every affected callback before they return. Callbacks of
//! one send run in subscription order over a snapshot of the subscribers
//! taken when the send started. A send issued from inside a callback runs to
//! completion before the outer send resumes.
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (mostly at
//! `trace` level) and installs no subscriber of its own.
//!
//! [`Publisher`]: publisher::Publisher
//! [`Observer`]: observer::Observer
//! [`Completion`]: error::Completion
//! [`CancellationHandle`]: subscription::CancellationHandle
//! [`SubscriptionBag`]: subscription::SubscriptionBag

pub mod error;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod publisher;
pub mod subject;
pub mod subscription;
pub mod value_cell;

// Re-export the prelude module
pub use prelude::*;

// Bring the README into Cargo-driven doctests.
#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
