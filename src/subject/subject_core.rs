use std::{cell::RefCell, rc::Rc};

use super::{
  subject_subscription::SubjectSubscription,
  subscribers::{
    broadcast_complete, broadcast_error, broadcast_value, Event, Slot, Subscribers, SubscribersRc,
  },
};
use crate::{error::Completion, observer::BoxedObserver};

/// Registry and terminal state shared by both subject flavours.
///
/// # Dispatch
///
/// Every emission snapshots the registry, releases it, then walks the
/// snapshot in subscription order. This fixes the following behavior:
///
/// - A subscriber added while an emission is in progress does not receive
///   that emission.
/// - A subscriber cancelled while an emission is in progress still receives
///   that emission (it is in the snapshot), and nothing after it.
/// - A callback that sends on the same subject runs the nested send to
///   completion, depth-first, before the outer send continues with its
///   remaining subscribers. The callback that triggered the nested send gets
///   the nested value right after it returns.
///
/// # Terminal state
///
/// After a completion has been sent the subject is terminal: the registry is
/// emptied, late subscribers receive the same completion immediately, and
/// further emissions are programmer errors. Those panic in debug builds and
/// are logged and ignored in release builds.
pub(crate) struct SubjectCore<Item, Err> {
  observers: SubscribersRc<Item, Err>,
  terminal: RefCell<Option<Completion<Err>>>,
}

impl<Item, Err> Default for SubjectCore<Item, Err> {
  fn default() -> Self {
    Self { observers: Rc::new(RefCell::new(Subscribers::default())), terminal: RefCell::new(None) }
  }
}

impl<Item, Err> SubjectCore<Item, Err> {
  #[inline]
  pub(crate) fn subscriber_count(&self) -> usize { self.observers.borrow().len() }

  #[inline]
  pub(crate) fn is_terminated(&self) -> bool { self.terminal.borrow().is_some() }

  /// Returns `true` (and reports the misuse) if the subject is terminal.
  pub(crate) fn reject_after_terminal(&self, op: &'static str) -> bool {
    if !self.is_terminated() {
      return false;
    }
    if cfg!(debug_assertions) {
      panic!("`{op}` called on a subject that has already completed");
    }
    tracing::warn!(op, "ignored emission on a completed subject");
    true
  }

  /// Registers `observer`, then delivers `replay` to it (if any) before
  /// returning.
  ///
  /// On a terminal subject the observer receives the stored completion
  /// instead and no subscription is created.
  pub(crate) fn subscribe(
    &self,
    observer: BoxedObserver<'static, Item, Err>,
    replay: Option<Item>,
  ) -> Option<SubjectSubscription<Item, Err>>
  where
    Err: Clone,
  {
    let terminal = self.terminal.borrow().clone();
    if let Some(completion) = terminal {
      let slot = Slot::new(observer);
      match completion {
        Completion::Finished => slot.deliver(Event::Complete),
        Completion::Failure(err) => slot.deliver(Event::Error(err)),
      }
      return None;
    }

    let (id, slot) = self.observers.borrow_mut().add(observer);
    tracing::trace!(subscriber_id = id, "subscriber registered");
    if let Some(value) = replay {
      slot.deliver(Event::Next(value));
    }
    Some(SubjectSubscription::new(&self.observers, id))
  }

  /// Broadcasts `value` to the subscribers registered right now.
  pub(crate) fn next(&self, value: Item)
  where
    Item: Clone,
  {
    let snapshot = self.observers.borrow().snapshot();
    broadcast_value(&snapshot, value);
  }

  /// Makes the subject terminal and delivers `completion` to every current
  /// subscriber, emptying the registry.
  pub(crate) fn terminate(&self, completion: Completion<Err>)
  where
    Err: Clone,
  {
    *self.terminal.borrow_mut() = Some(completion.clone());
    let drained = self.observers.borrow_mut().drain();
    tracing::trace!(completion = completion.as_label(), subscribers = drained.len(), "subject completed");
    match completion {
      Completion::Finished => broadcast_complete(&drained),
      Completion::Failure(err) => broadcast_error(&drained, err),
    }
  }
}
