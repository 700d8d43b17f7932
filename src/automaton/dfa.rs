//! Determinization and matching.
//!
//! Subset construction turns a finished NFA into a DFA whose states are sets
//! of NFA state indices, then `simulate` walks the DFA over an input
//! sequence. Matching is fully anchored: the whole input must be consumed.
//!
//! The construction is a worklist fixed point: each discovered DFA-state is
//! enqueued exactly once, and the finite alphabet times the finite subset
//! space (at most 2^N sets) bounds the loop.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::nfa::{Nfa, StateId};

/// A DFA state: a sorted, duplicate-free set of NFA state indices produced
/// by subset construction.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(Box<[StateId]>);

impl StateSet {
    /// Build a state set from a list of indices; sorts and deduplicates.
    pub fn new(mut states: Vec<StateId>) -> Self {
        states.sort_unstable();
        states.dedup();
        StateSet(states.into_boxed_slice())
    }

    /// The set holding a single state.
    pub fn singleton(state: StateId) -> Self {
        StateSet(Box::new([state]))
    }

    /// Member states in ascending order.
    #[inline]
    pub fn states(&self) -> &[StateId] {
        &self.0
    }

    /// Membership test by binary search.
    #[inline]
    pub fn contains(&self, state: StateId) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, "}}")
    }
}

/// The DFA transition mapping: state set -> (symbol -> successor state set).
pub type DfaTable = FxHashMap<StateSet, FxHashMap<char, StateSet>>;

/// A deterministic finite automaton produced by subset construction.
///
/// Built once by [`Dfa::from_nfa`], read-only thereafter. Simulation never
/// fails: any input produces accept or reject, including inputs containing
/// symbols outside the declared alphabet (those simply have no transition).
#[derive(Debug, Clone)]
pub struct Dfa {
    table: DfaTable,
    start: StateSet,
    accepting: StateId,
}

impl Dfa {
    /// Determinize `nfa` over its declared alphabet.
    pub fn from_nfa(nfa: &Nfa) -> Self {
        let alphabet: Vec<char> = nfa.alphabet().iter().copied().collect();
        Self::build(nfa, &alphabet)
    }

    /// Determinize `nfa` over an explicit alphabet. The epsilon marker is
    /// not a symbol and cannot appear here by construction.
    pub fn with_alphabet(nfa: &Nfa, alphabet: &BTreeSet<char>) -> Self {
        let alphabet: Vec<char> = alphabet.iter().copied().collect();
        Self::build(nfa, &alphabet)
    }

    fn build(nfa: &Nfa, alphabet: &[char]) -> Self {
        let accepting = nfa.final_state();
        let start = StateSet::new(nfa.epsilon_closure(&[nfa.start_state()]));

        let mut table = DfaTable::default();
        let mut seen: FxHashSet<StateSet> = FxHashSet::default();
        let mut worklist: SmallVec<[StateSet; 8]> = SmallVec::new();
        seen.insert(start.clone());
        worklist.push(start.clone());

        while let Some(current) = worklist.pop() {
            let mut transitions: FxHashMap<char, StateSet> = FxHashMap::default();
            for &symbol in alphabet {
                let reachable = nfa.reachable_states(current.states(), symbol);
                if reachable.is_empty() {
                    continue;
                }
                // Fold in epsilon edges; the closure includes the reachable
                // states themselves.
                let successor = StateSet::new(nfa.epsilon_closure(&reachable));
                if seen.insert(successor.clone()) {
                    worklist.push(successor.clone());
                }
                transitions.insert(symbol, successor);
            }
            if !transitions.is_empty() {
                table.insert(current, transitions);
            }
        }

        // Terminal entry: a walk landing on exactly the accepting state must
        // find a present (successor-free) entry.
        table.entry(StateSet::singleton(accepting)).or_default();

        Dfa {
            table,
            start,
            accepting,
        }
    }

    /// Read-only view of the transition mapping.
    #[inline]
    pub fn transition_table(&self) -> &DfaTable {
        &self.table
    }

    /// The start DFA-state: the epsilon-closure of NFA state 0.
    #[inline]
    pub fn start_set(&self) -> &StateSet {
        &self.start
    }

    /// The NFA's accepting state index.
    #[inline]
    pub fn accepting_state(&self) -> StateId {
        self.accepting
    }

    /// Whether a DFA-state is accepting, i.e. contains the NFA's accepting
    /// index.
    #[inline]
    pub fn is_accepting(&self, set: &StateSet) -> bool {
        set.contains(self.accepting)
    }

    /// Run the DFA over `input`, one symbol at a time from the start state.
    ///
    /// Rejects as soon as the current DFA-state has no table entry or no
    /// transition for the current symbol. After consuming all input, accepts
    /// iff the current DFA-state contains the accepting NFA index. The match
    /// is anchored: no partial or substring matches.
    pub fn simulate(&self, input: &str) -> bool {
        let mut current = &self.start;
        for symbol in input.chars() {
            let Some(transitions) = self.table.get(current) else {
                return false;
            };
            let Some(successor) = transitions.get(&symbol) else {
                return false;
            };
            current = successor;
        }
        current.contains(self.accepting)
    }
}
