// src/dedup.rs
// Bounded insertion-ordered membership set used to skip already-processed
// titles across polling cycles.

use std::collections::{HashSet, VecDeque};

/// FIFO-evicting dedup window. Queue and set always hold exactly the same
/// keys: eviction removes from both before any insert, so no corrective
/// sweep is ever needed. Single-writer; only the cycle runner mutates it.
#[derive(Debug)]
pub struct BoundedDedup {
    capacity: usize,
    queue: VecDeque<String>,
    set: HashSet<String>,
}

impl BoundedDedup {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity.min(4096)),
            set: HashSet::with_capacity(capacity.min(4096)),
        }
    }

    /// Returns true if `key` (trimmed) was already recorded; otherwise
    /// records it and returns false, evicting the oldest entry when full.
    /// Capacity 0 never remembers anything.
    pub fn seen(&mut self, key: &str) -> bool {
        let k = key.trim();
        if self.set.contains(k) {
            return true;
        }
        if self.capacity == 0 {
            return false;
        }
        while self.queue.len() >= self.capacity {
            if let Some(oldest) = self.queue.pop_front() {
                self.set.remove(&oldest);
            }
        }
        self.queue.push_back(k.to_string());
        self.set.insert(k.to_string());
        debug_assert_eq!(self.queue.len(), self.set.len());
        false
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
