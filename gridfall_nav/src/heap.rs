// Indexed min-priority queue over path nodes.
//
// A binary heap keyed by estimated total cost (f32, `total_cmp`
// ordering) with an auxiliary coordinate -> slot map so membership is
// O(1) and decrease-key is O(log n). `std::collections::BinaryHeap`
// cannot lower a priority in place, and the frontier's contract
// requires it, so the sift routines are written out here and keep the
// slot map in step with every swap.
//
// Node identity is the coordinate alone; the action riding on a
// `PathNode` is metadata and is overwritten when a decrease-key lands.
//
// Ties in priority break on heap order, which is a pure function of the
// operation sequence — deterministic for a given insertion order, with
// no secondary key.
//
// See also: `search.rs`, the only consumer.

use crate::types::{GridCoord, PathNode};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug)]
struct Entry {
    node: PathNode,
    f: f32,
}

/// Min-heap of frontier nodes ordered by estimated total cost.
#[derive(Clone, Debug, Default)]
pub struct IndexedHeap {
    entries: Vec<Entry>,
    /// Coordinate -> position in `entries`.
    slots: FxHashMap<GridCoord, usize>,
}

impl IndexedHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserve capacity. An optimization only; the heap grows as
    /// needed regardless.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a node with this coordinate is in the queue.
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.slots.contains_key(&coord)
    }

    /// Insert a node known to be absent.
    pub fn insert(&mut self, node: PathNode, f: f32) {
        debug_assert!(!self.contains(node.coord));
        let slot = self.entries.len();
        self.entries.push(Entry { node, f });
        self.slots.insert(node.coord, slot);
        self.sift_up(slot);
    }

    /// Insert the node, or lower its priority in place if already
    /// queued. Never raises a priority: a larger `f` for a queued node
    /// is ignored.
    pub fn decrease_or_insert(&mut self, node: PathNode, f: f32) {
        match self.slots.get(&node.coord) {
            Some(&slot) => {
                if f < self.entries[slot].f {
                    self.entries[slot] = Entry { node, f };
                    self.sift_up(slot);
                }
            }
            None => self.insert(node, f),
        }
    }

    /// Remove and return the node with the smallest priority.
    pub fn pop_min(&mut self) -> Option<PathNode> {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.entries.swap_remove(0);
        self.slots.remove(&min.node.coord);
        if !self.entries.is_empty() {
            self.slots.insert(self.entries[0].node.coord, 0);
            self.sift_down(0);
        }
        Some(min.node)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].f.total_cmp(&self.entries[parent].f).is_lt() {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = slot * 2 + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.entries.len()
                && self.entries[left].f.total_cmp(&self.entries[smallest].f).is_lt()
            {
                smallest = left;
            }
            if right < self.entries.len()
                && self.entries[right].f.total_cmp(&self.entries[smallest].f).is_lt()
            {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap_slots(slot, smallest);
            slot = smallest;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.slots.insert(self.entries[a].node.coord, a);
        self.slots.insert(self.entries[b].node.coord, b);
    }
}
