use std::{
  cell::RefCell,
  collections::VecDeque,
  rc::{Rc, Weak},
};

use smallvec::SmallVec;

use crate::observer::{BoxedObserver, Observer};

/// A single event travelling from a publisher to one subscriber.
pub(crate) enum Event<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

/// One registry entry: a subscriber callback plus its completion state.
///
/// The observer is `None` once it has received a terminal event. Slots are
/// shared (`Rc`) between the registry and in-flight broadcast snapshots, so
/// removing a slot from the registry never interrupts an event that is being
/// delivered.
///
/// # Re-entrancy
///
/// If an event arrives while this slot's observer is already running (the
/// observer triggered a nested send), the event goes to the slot's backlog
/// and is delivered, in order, as soon as the running callback returns.
///
/// Only the triggering subscriber sees this deferral. With subscribers `a`
/// and `b`, where `a` sends `2` while handling `1`, delivery is `a1, b2, a2,
/// b1`: `b` gets the nested value depth-first, `a` gets it after its own
/// callback for `1` has returned rather than inside it.
pub(crate) struct Slot<Item, Err> {
  observer: RefCell<Option<BoxedObserver<'static, Item, Err>>>,
  backlog: RefCell<VecDeque<Event<Item, Err>>>,
}

impl<Item, Err> Slot<Item, Err> {
  pub(crate) fn new(observer: BoxedObserver<'static, Item, Err>) -> Self {
    Self { observer: RefCell::new(Some(observer)), backlog: RefCell::new(VecDeque::new()) }
  }

  /// Returns `true` once the observer has received a terminal event.
  pub(crate) fn is_closed(&self) -> bool {
    match self.observer.try_borrow() {
      Ok(observer) => observer.as_ref().is_none_or(Observer::is_closed),
      // Running right now, so not terminated yet.
      Err(_) => false,
    }
  }

  pub(crate) fn deliver(&self, event: Event<Item, Err>) {
    let Ok(mut observer) = self.observer.try_borrow_mut() else {
      self.backlog.borrow_mut().push_back(event);
      return;
    };
    Self::apply(&mut observer, event);
    loop {
      let queued = self.backlog.borrow_mut().pop_front();
      match queued {
        Some(event) => Self::apply(&mut observer, event),
        None => break,
      }
    }
  }

  fn apply(observer: &mut Option<BoxedObserver<'static, Item, Err>>, event: Event<Item, Err>) {
    match event {
      Event::Next(value) => {
        if let Some(observer) = observer.as_mut() {
          observer.next(value);
        }
      }
      Event::Error(err) => {
        if let Some(observer) = observer.take() {
          observer.error(err);
        }
      }
      Event::Complete => {
        if let Some(observer) = observer.take() {
          observer.complete();
        }
      }
    }
  }
}

/// A broadcast snapshot of a registry.
pub(crate) type Snapshot<Item, Err> = SmallVec<[Rc<Slot<Item, Err>>; 2]>;

/// Ordered subscriber registry with ID-based removal.
///
/// Entries keep their subscription order. Each entry gets a unique,
/// never-reused ID which its cancellation handle uses to remove it.
///
/// Broadcasting goes through [`snapshot`](Subscribers::snapshot): the caller
/// copies the current entries, releases the registry, and only then invokes
/// callbacks. Callbacks are therefore free to subscribe and cancel, and a
/// subscriber added mid-broadcast is not part of that broadcast.
pub struct Subscribers<Item, Err> {
  next_id: usize,
  items: SmallVec<[(usize, Rc<Slot<Item, Err>>); 2]>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  /// Add an observer at the end of the registry and return its ID and slot.
  pub(crate) fn add(&mut self, observer: BoxedObserver<'static, Item, Err>) -> (usize, Rc<Slot<Item, Err>>) {
    let id = self.next_id;
    self.next_id += 1;
    let slot = Rc::new(Slot::new(observer));
    self.items.push((id, slot.clone()));
    (id, slot)
  }

  /// Remove an entry by ID.
  ///
  /// The removed slot is returned so the caller can drop it after releasing
  /// the registry borrow.
  pub(crate) fn remove(&mut self, id: usize) -> Option<Rc<Slot<Item, Err>>> {
    self.items.iter().position(|(i, _)| *i == id).map(|pos| self.items.remove(pos).1)
  }

  /// Check if an ID exists.
  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  /// Copy of the current entries, in subscription order.
  pub(crate) fn snapshot(&self) -> Snapshot<Item, Err> {
    self.items.iter().map(|(_, slot)| slot.clone()).collect()
  }

  /// Remove every entry, returning them in subscription order.
  pub(crate) fn drain(&mut self) -> Snapshot<Item, Err> {
    self.items.drain(..).map(|(_, slot)| slot).collect()
  }
}

/// Shared pointer to a registry.
pub(crate) type SubscribersRc<Item, Err> = Rc<RefCell<Subscribers<Item, Err>>>;

/// Non-owning pointer to a registry, held by cancellation handles.
pub(crate) type SubscribersWeak<Item, Err> = Weak<RefCell<Subscribers<Item, Err>>>;

// ============================================================================
// Dispatch
// ============================================================================

/// Deliver `value` to every slot of `snapshot`, in order.
///
/// The value is cloned for all slots except the last one, which receives the
/// moved value.
pub(crate) fn broadcast_value<Item: Clone, Err>(snapshot: &[Rc<Slot<Item, Err>>], value: Item) {
  let mut iter = snapshot.iter().peekable();
  while let Some(slot) = iter.next() {
    if iter.peek().is_some() {
      slot.deliver(Event::Next(value.clone()));
    } else {
      slot.deliver(Event::Next(value));
      break;
    }
  }
}

/// Deliver `err` to every slot of `snapshot`, in order.
pub(crate) fn broadcast_error<Item, Err: Clone>(snapshot: &[Rc<Slot<Item, Err>>], err: Err) {
  let mut iter = snapshot.iter().peekable();
  while let Some(slot) = iter.next() {
    if iter.peek().is_some() {
      slot.deliver(Event::Error(err.clone()));
    } else {
      slot.deliver(Event::Error(err));
      break;
    }
  }
}

/// Deliver a finished completion to every slot of `snapshot`, in order.
pub(crate) fn broadcast_complete<Item, Err>(snapshot: &[Rc<Slot<Item, Err>>]) {
  for slot in snapshot {
    slot.deliver(Event::Complete);
  }
}
