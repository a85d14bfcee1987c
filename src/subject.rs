//! Subjects: publishers that are fed from the outside.
//!
//! - [`CurrentValueSubject`] caches its latest value and replays it to every
//!   new subscriber.
//! - [`PassthroughSubject`] caches nothing; a value sent while nobody is
//!   subscribed is lost.
//!
//! Both are cheap handles: cloning a subject yields another handle to the same
//! registry. Subjects also implement [`Observer`](crate::observer::Observer),
//! so a subject can subscribe to another publisher and relay its events.

mod current_value_subject;
mod passthrough_subject;
pub(crate) mod subject_core;
pub mod subject_subscription;
pub(crate) mod subscribers;

pub use current_value_subject::CurrentValueSubject;
pub use passthrough_subject::PassthroughSubject;
pub use subject_subscription::SubjectSubscription;
