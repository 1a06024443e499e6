//! Deterministic replacement for browser timeouts.
//!
//! Events are scheduled against a millisecond due time and drained by whoever
//! owns the timeline, usually once per frame. Nothing here reads a clock.

use smallvec::SmallVec;

/// Handle for a scheduled entry. Cancelling a handle that already fired is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<E> {
    id: TimerId,
    due_ms: f64,
    event: E,
}

/// Queue of pending events ordered by due time, ties broken by insertion order.
#[derive(Clone, Debug)]
pub struct Timeline<E> {
    entries: SmallVec<[Entry<E>; 16]>,
    next_id: u64,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, due_ms: f64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due_ms, event });
        id
    }

    /// Remove a pending entry. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Pop the earliest entry whose due time is at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, E)> {
        let mut best: Option<usize> = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.due_ms > now_ms {
                continue;
            }
            match best {
                Some(b) if self.entries[b].due_ms <= e.due_ms => {}
                _ => best = Some(i),
            }
        }
        best.map(|i| {
            let e = self.entries.remove(i);
            (e.due_ms, e.event)
        })
    }

    pub fn next_due(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.due_ms).reduce(f64::min)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
