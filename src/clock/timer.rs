//! One-shot timers that can be cancelled before they fire.
//!
//! The queue does not own a clock: deadlines and polls use the same
//! timestamps the frame loop feeds to the scheduler, so everything runs on
//! the loop's thread and nothing fires between two polls.

use std::time::Duration;

/// Handle to a scheduled task, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Entry<T> {
    token: TimerToken,
    deadline: Duration,
    task: T,
}

/// Pending one-shot tasks ordered by deadline
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_token: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire once `deadline` is reached
    pub fn schedule(&mut self, deadline: Duration, task: T) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;

        // Keep entries sorted; equal deadlines fire in scheduling order
        let index = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            index,
            Entry {
                token,
                deadline,
                task,
            },
        );
        token
    }

    /// Remove a pending task. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.entries.iter().position(|e| e.token == token) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Take every task whose deadline is at or before `now`, earliest first
    pub fn poll(&mut self, now: Duration) -> Vec<(TimerToken, T)> {
        let due = self.entries.partition_point(|e| e.deadline <= now);
        self.entries
            .drain(..due)
            .map(|e| (e.token, e.task))
            .collect()
    }

    /// Deadline of the earliest pending task
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
