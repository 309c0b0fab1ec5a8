//! Deferred event queue
//!
//! Fire-once, time-ordered, cancelable events. A sequencer owns one queue per
//! run, so dropping or clearing the queue is all it takes to guarantee that no
//! stale event ever reaches the display buffer.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Handle of a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// An event that came due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub due: Duration,
    pub event: E,
}

#[derive(Debug)]
struct Entry<E> {
    due: Duration,
    id: TimerId,
    event: E,
}

// Min-heap on (due, id): ids grow monotonically, so equal due times fire in
// scheduling order
impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for Entry<E> {}

/// Time-ordered queue of pending events
///
/// Canceled events are removed from the heap right away, so every entry in it
/// is live.
#[derive(Debug)]
pub struct TimerQueue<E> {
    heap: BinaryHeap<Entry<E>>,
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_id: 0,
        }
    }

    /// Schedule `event` to fire at `due`
    pub fn schedule_at(&mut self, due: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Entry { due, id, event });
        id
    }

    /// Cancel a single event. Returns false if it already fired or was canceled.
    ///
    /// The sequencers tear runs down with `cancel_all`; this is the per-handle
    /// form for hosts that schedule their own events on a queue.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|entry| entry.id != id);
        self.heap.len() != before
    }

    /// Cancel every pending event
    pub fn cancel_all(&mut self) {
        self.heap.clear();
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Due time of the earliest pending event
    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|entry| entry.due)
    }

    /// Pop the earliest event if it is due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<E>> {
        if self.heap.peek()?.due > now {
            return None;
        }
        let entry = self.heap.pop()?;
        Some(Fired {
            id: entry.id,
            due: entry.due,
            event: entry.event,
        })
    }

    /// Remove every pending event, returning them in firing order
    pub fn drain(&mut self) -> Vec<(Duration, E)> {
        let mut entries = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.heap.pop() {
            entries.push((entry.due, entry.event));
        }
        entries
    }
}
