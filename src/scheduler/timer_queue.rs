use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
    time::Duration,
};

use super::{Task, TimerId};

/// Deadline-ordered task queue shared by both scheduler implementations.
///
/// Entries are keyed by `(deadline, sequence)`, so tasks due at the same
/// instant pop in the order they were scheduled. Borrows never outlive a
/// single method call, which lets a running task schedule or cancel others.
#[derive(Default)]
pub(super) struct TimerQueue {
    next_id: Cell<u64>,
    entries: RefCell<BTreeMap<(Duration, u64), Task>>,
    deadlines: RefCell<HashMap<u64, Duration>>,
}

impl TimerQueue {
    pub(super) fn insert(&self, deadline: Duration, task: Task) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.entries.borrow_mut().insert((deadline, id), task);
        self.deadlines.borrow_mut().insert(id, deadline);
        TimerId::from_raw(id)
    }

    pub(super) fn cancel(&self, id: TimerId) -> bool {
        let raw = id.as_raw();
        match self.deadlines.borrow_mut().remove(&raw) {
            Some(deadline) => self.entries.borrow_mut().remove(&(deadline, raw)).is_some(),
            None => false,
        }
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub(super) fn pop_due(&self, now: Duration) -> Option<(Duration, Task)> {
        let mut entries = self.entries.borrow_mut();
        let (&(deadline, raw), _) = entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        let task = entries.remove(&(deadline, raw))?;
        self.deadlines.borrow_mut().remove(&raw);
        Some((deadline, task))
    }

    pub(super) fn next_deadline(&self) -> Option<Duration> {
        self.entries
            .borrow()
            .first_key_value()
            .map(|(&(deadline, _), _)| deadline)
    }

    pub(super) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
