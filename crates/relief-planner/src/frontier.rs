//! Frontier containers shared by every search strategy.
//!
//! A strategy is a traversal paired with one of three frontiers:
//!
//! - [`FifoFrontier`]: breadth-first order.
//! - [`LifoFrontier`]: depth-first order. Neighbours are pushed in reverse
//!   so the first-listed neighbour is explored first.
//! - [`PriorityFrontier`]: lowest key first, ties broken by insertion order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use relief_types::Position;

/// A partial path waiting on the frontier.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The node this path ends at.
    pub position: Position,
    /// Nodes from the origin up to and including `position`.
    pub path: Vec<Position>,
    /// Accumulated weather-adjusted distance.
    pub distance: f64,
}

impl Candidate {
    /// The zero-length path sitting on `origin`.
    pub fn origin(origin: Position) -> Self {
        Self {
            position: origin,
            path: vec![origin],
            distance: 0.0,
        }
    }

    /// Extend this path by one hop.
    pub fn extend(&self, next: Position, cost: f64) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        Self {
            position: next,
            path,
            distance: self.distance + cost,
        }
    }

    /// Number of hops taken so far.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Ordered container of candidates.
pub trait Frontier {
    /// Whether neighbours must be pushed last-to-first to be popped
    /// first-to-last.
    const REVERSE_PUSH: bool = false;

    /// Add a candidate under `key`. Unordered frontiers ignore the key.
    fn push(&mut self, candidate: Candidate, key: f64);

    /// Take the next candidate to expand.
    fn pop(&mut self) -> Option<Candidate>;

    /// Number of waiting candidates.
    fn len(&self) -> usize;

    /// Whether nothing is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// FIFO / LIFO
// ---------------------------------------------------------------------------

/// Queue frontier.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<Candidate>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, candidate: Candidate, _key: f64) {
        self.queue.push_back(candidate);
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Stack frontier.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<Candidate>,
}

impl Frontier for LifoFrontier {
    const REVERSE_PUSH: bool = true;

    fn push(&mut self, candidate: Candidate, _key: f64) {
        self.stack.push(candidate);
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

struct Keyed {
    key: f64,
    seq: u64,
    candidate: Candidate,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    // Reversed: `BinaryHeap` is a max-heap and the smallest key must win.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority frontier.
#[derive(Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Keyed>,
    next_seq: u64,
}

impl std::fmt::Debug for PriorityFrontier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityFrontier")
            .field("len", &self.heap.len())
            .finish_non_exhaustive()
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, candidate: Candidate, key: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Keyed {
            key,
            seq,
            candidate,
        });
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|entry| entry.candidate)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
