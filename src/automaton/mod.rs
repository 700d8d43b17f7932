//! Finite-automaton engine: NFA graph surgery plus DFA determinization.
//!
//! The key components are:
//!
//! - `Nfa`: a dense square transition table with structural operators
//!   (grow, splice, merge) for composing automata, plus the epsilon-closure
//!   and single-step reachability queries the determinizer needs
//! - `StateSet` / `Dfa`: subset construction and anchored simulation
//! - `SparseSet`: membership set with O(1) clear backing the fixed-point
//!   graph searches
//!
//! # Module Organization
//!
//! - `nfa`: NFA representation and in-place composition operators
//! - `dfa`: determinizer and matcher
//! - `sparse_set`: state-index set used by the traversals

mod dfa;
mod nfa;
mod sparse_set;

// Re-export from nfa
pub use nfa::{Label, Nfa, StateId};

// Re-export from dfa
pub use dfa::{Dfa, DfaTable, StateSet};

// Re-export from sparse_set
pub use sparse_set::SparseSet;
