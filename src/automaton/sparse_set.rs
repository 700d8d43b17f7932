//! Sparse set over NFA state indices.
//!
//! Based on: https://research.swtch.com/sparse
//!
//! The epsilon-closure and subset-construction fixed points repeatedly build
//! membership sets over `0..nfa.size()`. A sparse set gives O(1) insert and
//! membership with no hashing, and iteration in insertion order, at the cost
//! of 2*capacity memory.

use super::nfa::StateId;

/// A set of state indices in the range `[0, capacity)`.
#[derive(Clone, Debug)]
pub struct SparseSet {
    /// Number of states currently in the set.
    len: usize,
    /// Dense array of member states in insertion order.
    dense: Vec<StateId>,
    /// Maps state -> position in dense. A state is a member iff
    /// `sparse[state] < len && dense[sparse[state]] == state`.
    sparse: Vec<usize>,
}

impl SparseSet {
    /// Create an empty set able to hold states in `[0, capacity)`.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        SparseSet {
            len: 0,
            dense: vec![0; capacity],
            sparse: vec![0; capacity],
        }
    }

    /// Maximum state index plus one.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    /// Number of member states.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a state. Returns true if it was not already a member.
    ///
    /// Panics if `state >= capacity`.
    #[inline]
    pub fn insert(&mut self, state: StateId) -> bool {
        if self.contains(state) {
            return false;
        }
        debug_assert!(self.len < self.capacity());
        self.dense[self.len] = state;
        self.sparse[state] = self.len;
        self.len += 1;
        true
    }

    /// Membership test.
    ///
    /// Panics if `state >= capacity`.
    #[inline]
    pub fn contains(&self, state: StateId) -> bool {
        let idx = self.sparse[state];
        idx < self.len && self.dense[idx] == state
    }

    /// Empty the set in O(1).
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Iterate over member states in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.dense[..self.len].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = SparseSet::new(10);
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(set.insert(1));

        assert_eq!(set.len(), 3);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(set.contains(1));
        assert!(!set.contains(0));
        assert!(!set.contains(5));

        // Duplicate insert returns false
        assert!(!set.insert(3));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_insertion_order() {
        let mut set = SparseSet::new(10);
        set.insert(5);
        set.insert(2);
        set.insert(8);
        let members: Vec<_> = set.iter().collect();
        assert_eq!(members, vec![5, 2, 8]);
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut set = SparseSet::new(10);
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));

        set.insert(9);
        assert_eq!(set.len(), 1);
        assert!(set.contains(9));
    }
}
