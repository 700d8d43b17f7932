//! NFA core: a fixed-size directed graph over integer states with a dense
//! transition table, plus the structural operators (grow, splice, merge) used
//! by Thompson's construction to build larger automata from smaller ones.
//!
//! The start state is always index 0 and the final (accepting) state is
//! always index N-1. The structural operators are written so that every
//! composite automaton they produce preserves that contract.

use std::collections::BTreeSet;

use smallvec::SmallVec;

use super::sparse_set::SparseSet;
use crate::CompileError;

/// Index of a state in an automaton's transition table.
pub type StateId = usize;

/// An edge label in the NFA transition table.
///
/// Epsilon is its own variant rather than a reserved character, so it can
/// never collide with a declared alphabet symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Consumes one input symbol.
    Symbol(char),
    /// Consumes no input.
    Epsilon,
}

/// A nondeterministic finite automaton over a dense N x N transition table.
///
/// Cell `[from][to]` holds the label of the edge from `from` to `to`, or
/// `None` when there is no edge. There is at most one label per ordered state
/// pair: [`Nfa::add_transition`] overwrites, last write wins. This is an
/// inherited contract of the table representation, not an accident.
///
/// Structural operators (`prepend`, `append`, `chain`, the grow operations)
/// mutate the receiver in place; callers that need to preserve an automaton
/// must clone it first. The builders in [`crate::regexp::thompson`] do
/// exactly that, so finished automata handed to the determinizer are never
/// aliased into another automaton's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    table: Vec<Vec<Option<Label>>>,
    alphabet: BTreeSet<char>,
}

impl Nfa {
    /// Create an automaton of `size` isolated states with an empty alphabet.
    ///
    /// Fails with [`CompileError::InvalidSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, CompileError> {
        if size < 1 {
            return Err(CompileError::InvalidSize(size));
        }
        Ok(Self::with_states(size))
    }

    /// Create an automaton of `size` isolated states with a declared alphabet.
    pub fn with_alphabet(size: usize, alphabet: BTreeSet<char>) -> Result<Self, CompileError> {
        let mut nfa = Self::new(size)?;
        nfa.alphabet = alphabet;
        Ok(nfa)
    }

    /// Infallible constructor for sizes known to be valid.
    pub(crate) fn with_states(size: usize) -> Self {
        debug_assert!(size >= 1);
        Self {
            table: vec![vec![None; size]; size],
            alphabet: BTreeSet::new(),
        }
    }

    /// Number of states.
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// The start state, always index 0.
    #[inline]
    pub fn start_state(&self) -> StateId {
        0
    }

    /// The final (accepting) state, always the highest index.
    #[inline]
    pub fn final_state(&self) -> StateId {
        self.table.len() - 1
    }

    /// The declared alphabet. Structural operators union the alphabets of
    /// their operands, so a fully built automaton carries the set of symbols
    /// that appear on its edges.
    #[inline]
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Replace the declared alphabet.
    pub fn set_alphabet(&mut self, alphabet: BTreeSet<char>) {
        self.alphabet = alphabet;
    }

    /// Read-only view of the square transition table, indexed `[from][to]`.
    #[inline]
    pub fn transition_table(&self) -> &[Vec<Option<Label>>] {
        &self.table
    }

    /// The label on the edge `from -> to`, if any.
    #[inline]
    pub fn label(&self, from: StateId, to: StateId) -> Option<Label> {
        self.table[from][to]
    }

    /// Set the label on the edge `from -> to`, overwriting any existing
    /// label (last write wins; the table cannot hold parallel edges).
    ///
    /// Fails with [`CompileError::InvalidState`] if either index is out of
    /// range.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        label: Label,
    ) -> Result<(), CompileError> {
        if from >= self.size() {
            return Err(CompileError::InvalidState(from));
        }
        if to >= self.size() {
            return Err(CompileError::InvalidState(to));
        }
        self.set(from, to, label);
        Ok(())
    }

    /// Unchecked transition write for construction code whose indices are
    /// valid by construction.
    pub(crate) fn set(&mut self, from: StateId, to: StateId, label: Label) {
        debug_assert!(from < self.size() && to < self.size());
        if let Label::Symbol(c) = label {
            self.alphabet.insert(c);
        }
        self.table[from][to] = Some(label);
    }

    /// Extend the automaton's high end by `n` empty states. Existing edges
    /// keep their positions; the new states are edge-free.
    ///
    /// Fails with [`CompileError::InvalidSize`] if `n` is zero.
    pub fn append_empty_states(&mut self, n: usize) -> Result<(), CompileError> {
        if n < 1 {
            return Err(CompileError::InvalidSize(n));
        }
        self.grow_high(n);
        Ok(())
    }

    /// Extend the automaton's low end by `n` empty states, re-indexing every
    /// existing state by `+n` so the relative structure is preserved.
    ///
    /// Fails with [`CompileError::InvalidSize`] if `n` is zero.
    pub fn prepend_empty_states(&mut self, n: usize) -> Result<(), CompileError> {
        if n < 1 {
            return Err(CompileError::InvalidSize(n));
        }
        self.grow_low(n);
        Ok(())
    }

    pub(crate) fn grow_high(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let new_size = self.size() + n;
        for row in &mut self.table {
            row.resize(new_size, None);
        }
        self.table.resize(new_size, vec![None; new_size]);
    }

    pub(crate) fn grow_low(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let new_size = self.size() + n;
        let mut table = vec![vec![None; new_size]; new_size];
        for (i, row) in self.table.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                table[i + n][j + n] = *cell;
            }
        }
        self.table = table;
    }

    /// Splice a copy of `other`'s full graph onto the low end of the state
    /// space. No state is merged: `other` occupies indices `0..other.size()`
    /// and every prior state shifts up by `other.size()`.
    pub fn prepend(&mut self, other: &Nfa) {
        self.grow_low(other.size());
        for (i, row) in other.table.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                self.table[i][j] = *cell;
            }
        }
        self.alphabet.extend(other.alphabet.iter().copied());
    }

    /// Splice a copy of `other`'s full graph onto the high end of the state
    /// space. No state is merged: `other` occupies the new top indices and
    /// this automaton's states keep their positions.
    pub fn append(&mut self, other: &Nfa) {
        let orig = self.size();
        self.grow_high(other.size());
        for (i, row) in other.table.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                self.table[orig + i][orig + j] = *cell;
            }
        }
        self.alphabet.extend(other.alphabet.iter().copied());
    }

    /// Merge this automaton's final state with `other`'s start state. The
    /// result has `self.size() + other.size() - 1` states; the merged state
    /// gains `other`'s start-state outgoing edges and keeps the edges that
    /// arrived at the old final state.
    pub fn chain(&mut self, other: &Nfa) {
        let orig = self.size();
        // One fewer new state than other's size: other's start state is
        // absorbed into this automaton's final state.
        self.grow_high(other.size() - 1);
        for (i, row) in other.table.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                self.table[orig - 1 + i][orig - 1 + j] = *cell;
            }
        }
        self.alphabet.extend(other.alphabet.iter().copied());
    }

    /// All states reachable from any seed via zero or more epsilon edges.
    /// A state is trivially in its own closure. Returns a sorted,
    /// duplicate-free list.
    ///
    /// Seeds must be in range; construction code always satisfies this.
    pub fn epsilon_closure(&self, seeds: &[StateId]) -> Vec<StateId> {
        let mut closure = SparseSet::new(self.size());
        let mut stack: SmallVec<[StateId; 8]> = SmallVec::new();
        for &seed in seeds {
            debug_assert!(seed < self.size(), "seed state {seed} out of range");
            if closure.insert(seed) {
                stack.push(seed);
            }
            while let Some(t) = stack.pop() {
                for (u, cell) in self.table[t].iter().enumerate() {
                    if *cell == Some(Label::Epsilon) && closure.insert(u) {
                        stack.push(u);
                    }
                }
            }
        }
        let mut result: Vec<StateId> = closure.iter().collect();
        result.sort_unstable();
        result
    }

    /// All states reachable from any seed by exactly one edge labeled
    /// `symbol`. Epsilon edges are not followed. Returns a sorted,
    /// duplicate-free list.
    pub fn reachable_states(&self, seeds: &[StateId], symbol: char) -> Vec<StateId> {
        let mut reachable = SparseSet::new(self.size());
        for &seed in seeds {
            debug_assert!(seed < self.size(), "seed state {seed} out of range");
            for (s, cell) in self.table[seed].iter().enumerate() {
                if *cell == Some(Label::Symbol(symbol)) {
                    reachable.insert(s);
                }
            }
        }
        let mut result: Vec<StateId> = reachable.iter().collect();
        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_states() {
        match Nfa::new(0) {
            Err(CompileError::InvalidSize(0)) => {}
            other => panic!("expected InvalidSize, got {other:?}"),
        }
    }

    #[test]
    fn test_fresh_automaton_has_no_edges() {
        let nfa = Nfa::new(4).unwrap();
        for from in 0..nfa.size() {
            for to in 0..nfa.size() {
                assert_eq!(nfa.label(from, to), None);
            }
        }
        assert_eq!(nfa.start_state(), 0);
        assert_eq!(nfa.final_state(), 3);
    }

    #[test]
    fn test_add_transition_bounds() {
        let mut nfa = Nfa::new(2).unwrap();
        assert!(nfa.add_transition(0, 1, Label::Symbol('a')).is_ok());
        match nfa.add_transition(2, 0, Label::Epsilon) {
            Err(CompileError::InvalidState(2)) => {}
            other => panic!("expected InvalidState, got {other:?}"),
        }
        match nfa.add_transition(0, 5, Label::Epsilon) {
            Err(CompileError::InvalidState(5)) => {}
            other => panic!("expected InvalidState, got {other:?}"),
        }
    }

    #[test]
    fn test_add_transition_last_write_wins() {
        let mut nfa = Nfa::new(2).unwrap();
        nfa.add_transition(0, 1, Label::Symbol('a')).unwrap();
        nfa.add_transition(0, 1, Label::Symbol('b')).unwrap();
        assert_eq!(nfa.label(0, 1), Some(Label::Symbol('b')));
    }

    #[test]
    fn test_grow_rejects_zero() {
        let mut nfa = Nfa::new(2).unwrap();
        assert!(matches!(
            nfa.append_empty_states(0),
            Err(CompileError::InvalidSize(0))
        ));
        assert!(matches!(
            nfa.prepend_empty_states(0),
            Err(CompileError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_alphabet_tracks_symbol_edges() {
        let mut nfa = Nfa::new(3).unwrap();
        nfa.add_transition(0, 1, Label::Symbol('a')).unwrap();
        nfa.add_transition(1, 2, Label::Symbol('b')).unwrap();
        nfa.add_transition(2, 0, Label::Epsilon).unwrap();
        let alphabet: Vec<char> = nfa.alphabet().iter().copied().collect();
        assert_eq!(alphabet, vec!['a', 'b']);
    }

    #[test]
    fn test_epsilon_closure_trivial() {
        let nfa = Nfa::new(3).unwrap();
        assert_eq!(nfa.epsilon_closure(&[1]), vec![1]);
    }

    #[test]
    fn test_epsilon_closure_follows_chains() {
        // 0 -eps-> 1 -eps-> 2, 3 isolated
        let mut nfa = Nfa::new(4).unwrap();
        nfa.add_transition(0, 1, Label::Epsilon).unwrap();
        nfa.add_transition(1, 2, Label::Epsilon).unwrap();
        assert_eq!(nfa.epsilon_closure(&[0]), vec![0, 1, 2]);
        assert_eq!(nfa.epsilon_closure(&[1]), vec![1, 2]);
        assert_eq!(nfa.epsilon_closure(&[3]), vec![3]);
        assert_eq!(nfa.epsilon_closure(&[0, 3]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_epsilon_closure_ignores_symbol_edges() {
        let mut nfa = Nfa::new(3).unwrap();
        nfa.add_transition(0, 1, Label::Symbol('a')).unwrap();
        nfa.add_transition(0, 2, Label::Epsilon).unwrap();
        assert_eq!(nfa.epsilon_closure(&[0]), vec![0, 2]);
    }

    #[test]
    fn test_epsilon_closure_handles_cycles() {
        // 0 -eps-> 1 -eps-> 0 must terminate
        let mut nfa = Nfa::new(2).unwrap();
        nfa.add_transition(0, 1, Label::Epsilon).unwrap();
        nfa.add_transition(1, 0, Label::Epsilon).unwrap();
        assert_eq!(nfa.epsilon_closure(&[0]), vec![0, 1]);
    }

    #[test]
    fn test_reachable_states_single_edge_only() {
        // 0 -a-> 1 -a-> 2: one step from 0 reaches only 1
        let mut nfa = Nfa::new(3).unwrap();
        nfa.add_transition(0, 1, Label::Symbol('a')).unwrap();
        nfa.add_transition(1, 2, Label::Symbol('a')).unwrap();
        assert_eq!(nfa.reachable_states(&[0], 'a'), vec![1]);
        assert_eq!(nfa.reachable_states(&[0, 1], 'a'), vec![1, 2]);
        assert_eq!(nfa.reachable_states(&[0], 'b'), Vec::<StateId>::new());
    }

    #[test]
    fn test_reachable_states_excludes_epsilon() {
        let mut nfa = Nfa::new(3).unwrap();
        nfa.add_transition(0, 1, Label::Epsilon).unwrap();
        nfa.add_transition(0, 2, Label::Symbol('x')).unwrap();
        assert_eq!(nfa.reachable_states(&[0], 'x'), vec![2]);
    }
}
