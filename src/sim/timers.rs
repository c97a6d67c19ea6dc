//! Timers tied to a cancellation token
//!
//! Spawn cadence, collision polls and drop completions all live in one
//! queue ordered by due time. Every entry carries a token; once a token (or
//! any of its ancestors) is canceled its entries are dropped unfired.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use super::state::ObjectId;

#[derive(Debug)]
struct TokenNode {
    canceled: Cell<bool>,
    parent: Option<Rc<TokenNode>>,
}

/// Shared cancellation flag; clones observe the same flag
#[derive(Debug, Clone)]
pub struct CancelToken(Rc<TokenNode>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Rc::new(TokenNode {
            canceled: Cell::new(false),
            parent: None,
        }))
    }

    /// A token canceled by itself or by this one
    pub fn child(&self) -> Self {
        Self(Rc::new(TokenNode {
            canceled: Cell::new(false),
            parent: Some(self.0.clone()),
        }))
    }

    pub fn cancel(&self) {
        self.0.canceled.set(true);
    }

    pub fn is_canceled(&self) -> bool {
        let mut node = Some(&self.0);
        while let Some(n) = node {
            if n.canceled.get() {
                return true;
            }
            node = n.parent.as_ref();
        }
        false
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Drop a new ball (repeats)
    Spawn,
    /// Run collision checks (repeats)
    CollisionPoll,
    /// A ball's drop animation finished
    DropComplete(ObjectId),
}

struct Entry {
    due: f64,
    seq: u64,
    kind: TimerKind,
    token: CancelToken,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed: BinaryHeap is a max-heap, we want the earliest entry on top
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A fired timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub due: f64,
    pub kind: TimerKind,
}

/// Time-ordered timer queue
///
/// Entries due at the same instant fire in the order they were scheduled.
#[derive(Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, kind: TimerKind, token: &CancelToken) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due,
            seq,
            kind,
            token: token.clone(),
        });
    }

    /// Earliest live entry due at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<Fired> {
        while let Some(top) = self.queue.peek() {
            if top.token.is_canceled() {
                self.queue.pop();
                continue;
            }
            if top.due > now {
                return None;
            }
            let entry = self.queue.pop()?;
            return Some(Fired {
                due: entry.due,
                kind: entry.kind,
            });
        }
        None
    }

    /// Live entries still waiting
    pub fn pending(&self) -> usize {
        self.queue.iter().filter(|e| !e.token.is_canceled()).count()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
