//! Operators built on top of [`Publisher`](crate::publisher::Publisher).

pub mod combine_latest;
pub mod into_future;
