//! Cancellable timeouts with deterministic ordering.
//!
//! Implements a priority queue that ensures:
//! - Timers fire in deadline order
//! - Ties are broken by insertion order (sequence number)
//! - A cancelled timer never fires

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::engine::PlaybackTime;

/// Handle returned by [`TimerQueue::schedule`], used to cancel the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A pending timer with deadline and sequence number.
#[derive(Debug, Clone)]
struct PendingTimer<T> {
    deadline: PlaybackTime,
    sequence: u64,
    payload: T,
}

// Min-heap ordering by deadline, then sequence; the payload does not take part.
impl<T> PartialEq for PendingTimer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl<T> Eq for PendingTimer<T> {}

impl<T> PartialOrd for PendingTimer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for PendingTimer<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.deadline.cmp(&other.deadline) {
            std::cmp::Ordering::Equal => self.sequence.cmp(&other.sequence),
            ord => ord,
        }
    }
}

/// Deadline-ordered queue of cancellable timers.
///
/// Cancellation is lazy: the entry stays in the heap but is no longer
/// live, and is discarded when it reaches the head. The head of the heap
/// is always live (or the heap is empty), so [`TimerQueue::next_deadline`]
/// is exact.
///
/// # Example
///
/// ```rust
/// use algoviz::engine::timer::TimerQueue;
/// use algoviz::engine::PlaybackTime;
///
/// let mut timers = TimerQueue::new();
/// let first = timers.schedule(PlaybackTime::from_millis(10), "advance");
/// timers.schedule(PlaybackTime::from_millis(20), "resume");
///
/// assert!(timers.cancel(first));
/// assert_eq!(timers.next_deadline(), Some(PlaybackTime::from_millis(20)));
/// ```
#[derive(Debug)]
pub struct TimerQueue<T> {
    /// Min-heap ordered by (deadline, sequence).
    queue: BinaryHeap<Reverse<PendingTimer<T>>>,
    /// Sequence numbers of timers that may still fire.
    live: HashSet<u64>,
    /// Monotonic sequence counter for tie-breaking.
    sequence: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            live: HashSet::new(),
            sequence: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty timer queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: PlaybackTime, payload: T) -> TimerHandle {
        let sequence = self.sequence;
        self.sequence += 1;

        self.live.insert(sequence);
        self.queue.push(Reverse(PendingTimer {
            deadline,
            sequence,
            payload,
        }));
        TimerHandle(sequence)
    }

    /// Cancel a timer.
    ///
    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let was_live = self.live.remove(&handle.0);
        self.discard_dead_head();
        was_live
    }

    /// Check whether a timer is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.live.contains(&handle.0)
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    #[must_use]
    pub fn pop_due(&mut self, now: PlaybackTime) -> Option<(TimerHandle, PlaybackTime, T)> {
        let due = matches!(self.queue.peek(), Some(Reverse(head)) if head.deadline <= now);
        if !due {
            return None;
        }

        let Reverse(timer) = self.queue.pop()?;
        self.live.remove(&timer.sequence);
        self.discard_dead_head();
        Some((TimerHandle(timer.sequence), timer.deadline, timer.payload))
    }

    /// Get the deadline of the next live timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<PlaybackTime> {
        self.queue.peek().map(|Reverse(t)| t.deadline)
    }

    /// Get the number of live timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Check if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.live.clear();
    }

    fn discard_dead_head(&mut self) {
        while let Some(Reverse(head)) = self.queue.peek() {
            if self.live.contains(&head.sequence) {
                break;
            }
            self.queue.pop();
        }
    }
}
