//! Indexed binary min-heap used as the Dijkstra frontier.
//!
//! The heap stores `MarkerId`s only; their keys are the tentative distances
//! owned by the running search and passed in on every call.  Each marker's
//! current slot is tracked in `slot_of`, so lowering a key relocates the
//! existing entry in place instead of pushing a duplicate.
//!
//! Ordering is `(distance, MarkerId)`: among equal distances the lowest id
//! surfaces first, which makes route selection under ties deterministic.

use wp_core::MarkerId;

const NOT_QUEUED: usize = usize::MAX;

pub(crate) struct FrontierHeap {
    /// Array-backed heap; children of slot `i` are `2i + 1` and `2i + 2`.
    slots: Vec<MarkerId>,
    /// `slot_of[m]` = position of marker `m` in `slots`, or `NOT_QUEUED`.
    slot_of: Vec<usize>,
}

#[inline]
fn precedes(dist: &[f32], a: MarkerId, b: MarkerId) -> bool {
    let (da, db) = (dist[a.index()], dist[b.index()]);
    da < db || (da == db && a < b)
}

impl FrontierHeap {
    /// A heap holding every marker `0..dist.len()`, ordered by `dist`.
    pub(crate) fn with_all_markers(dist: &[f32]) -> Self {
        let n = dist.len();
        let mut heap = Self {
            slots: (0..n).map(|i| MarkerId(i as u32)).collect(),
            slot_of: (0..n).collect(),
        };
        for i in (0..n / 2).rev() {
            heap.bubble_down(i, dist);
        }
        heap
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, marker: MarkerId) -> bool {
        self.slot_of
            .get(marker.index())
            .is_some_and(|&s| s != NOT_QUEUED)
    }

    /// Remove and return the marker with the smallest key.
    pub(crate) fn pop(&mut self, dist: &[f32]) -> Option<MarkerId> {
        let last = self.slots.len().checked_sub(1)?;
        self.swap(0, last);
        let top = self.slots.pop()?;
        self.slot_of[top.index()] = NOT_QUEUED;
        if !self.slots.is_empty() {
            self.bubble_down(0, dist);
        }
        Some(top)
    }

    /// Restore heap order after `dist[marker]` was lowered.
    ///
    /// Returns `false` if `marker` is no longer queued.
    pub(crate) fn decrease_key(&mut self, marker: MarkerId, dist: &[f32]) -> bool {
        match self.slot_of.get(marker.index()) {
            Some(&slot) if slot != NOT_QUEUED => {
                self.bubble_up(slot, dist);
                true
            }
            _ => false,
        }
    }

    /// Swap slot `i` with its parent while it sorts strictly before it.
    pub(crate) fn bubble_up(&mut self, mut i: usize, dist: &[f32]) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !precedes(dist, self.slots[i], self.slots[parent]) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    /// Swap slot `i` with its smaller child while that child sorts strictly
    /// before it.
    pub(crate) fn bubble_down(&mut self, mut i: usize, dist: &[f32]) {
        let len = self.slots.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && precedes(dist, self.slots[right], self.slots[left]) {
                child = right;
            }
            if !precedes(dist, self.slots[child], self.slots[i]) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.slot_of[self.slots[a].index()] = a;
        self.slot_of[self.slots[b].index()] = b;
    }

    /// Every parent's key is ≤ both children's keys, and the slot index
    /// agrees with the array.
    #[cfg(test)]
    pub(crate) fn is_heap_ordered(&self, dist: &[f32]) -> bool {
        let ordered = (1..self.slots.len()).all(|i| {
            let parent = (i - 1) / 2;
            !precedes(dist, self.slots[i], self.slots[parent])
        });
        let indexed = self
            .slots
            .iter()
            .enumerate()
            .all(|(s, m)| self.slot_of[m.index()] == s);
        ordered && indexed
    }
}
