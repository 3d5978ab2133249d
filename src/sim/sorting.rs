//! Bubble-sort stepper
//!
//! One comparison (or pass-bookkeeping move) per tick, expressed as a pure
//! function from state to next state. Scheduling lives elsewhere; nothing in
//! here knows about timers, so every intermediate state is directly testable.

use serde::{Deserialize, Serialize};

/// Canonical demo array shown by the lab
pub const DEMO_ARRAY: [u32; 9] = [5, 2, 8, 1, 9, 3, 7, 4, 6];

/// Bubble-sort progress: the array plus the two loop cursors.
///
/// `sorted` accumulates finalized indices largest-first (standard bubble-sort
/// tail fixing) and only ever grows; the array length never changes. Once the
/// terminal state is reached it is absorbing: further steps return an equal
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Outer pass index
    i: usize,
    /// Inner comparison cursor
    j: usize,
    pub values: Vec<u32>,
    /// Indices already in final position
    pub sorted: Vec<usize>,
    /// Pair compared by the latest tick (render highlight)
    pub active: Option<(usize, usize)>,
    done: bool,
}

impl SortState {
    /// Start a fresh run over the given values
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            i: 0,
            j: 0,
            values,
            sorted: Vec::new(),
            active: None,
            done: false,
        }
    }

    /// Fresh run over the canonical demo array
    pub fn demo() -> Self {
        Self::new(DEMO_ARRAY.to_vec())
    }

    /// Whether the terminal state has been reached
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by one tick.
    ///
    /// Either one comparison (with swap if out of order), one pass
    /// completion (fixing the largest remaining index), or entry into the
    /// terminal state where every index is marked sorted.
    pub fn step(&self) -> SortState {
        let mut next = self.clone();
        if next.done {
            return next;
        }

        let n = next.values.len();
        if next.i >= n {
            next.sorted = (0..n).collect();
            next.active = None;
            next.done = true;
        } else if next.j < n - next.i - 1 {
            next.active = Some((next.j, next.j + 1));
            if next.values[next.j] > next.values[next.j + 1] {
                next.values.swap(next.j, next.j + 1);
            }
            next.j += 1;
        } else {
            // Inner pass finished: the tail element is in place
            next.sorted.push(n - 1 - next.i);
            next.j = 0;
            next.i += 1;
        }
        next
    }

    /// Run to the terminal state, with a hard step bound as a safety net
    pub fn run_to_end(mut self) -> SortState {
        let n = self.values.len();
        let budget = n * (n + 2) + 2;
        for _ in 0..budget {
            if self.done {
                break;
            }
            self = self.step();
        }
        self
    }
}
