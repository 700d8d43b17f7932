//! regex-fsm: a regex-to-automaton compiler and anchored matcher.
//!
//! Patterns built from literal symbols, concatenation, alternation (`|`),
//! repetition (`*`, `+`, `?`), and grouping parentheses are compiled into a
//! nondeterministic finite automaton via Thompson's construction,
//! determinized via subset construction, and matched by simulating the
//! resulting DFA over the whole input (no substring matching).
//!
//! ```
//! use regex_fsm::Pattern;
//!
//! let pattern = Pattern::compile("(a|b)*abb").unwrap();
//! assert!(pattern.is_match("ababb"));
//! assert!(!pattern.is_match("ab"));
//! ```
//!
//! The layers are usable on their own: [`regexp::parse`] yields the Thompson
//! NFA, [`automaton::Dfa::from_nfa`] determinizes it, and the
//! [`automaton::Nfa`] structural operators are public for building automata
//! by hand. [`PatternSet`] and [`SharedPatternSet`] match one input against
//! many named patterns at once.

pub mod automaton;
pub mod regexp;

mod matcher;

use std::fmt;

pub use automaton::{Dfa, DfaTable, Label, Nfa, StateId, StateSet};
pub use matcher::{PatternSet, SharedPatternSet};
pub use regexp::{compile, derive_alphabet, parse};

/// Errors surfaced while building or compiling automata.
///
/// All variants are local precondition violations reported fail-fast: no
/// partial automaton is ever produced. Simulation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An automaton or growth step was given a non-positive state count.
    InvalidSize(usize),
    /// A state index outside `[0, size)`.
    InvalidState(StateId),
    /// An operator had too few preceding fragments; carries the operator.
    MissingOperand(char),
    /// Mismatched grouping parentheses.
    UnbalancedParens,
    /// The parse finished with other than one fragment; carries the count.
    MalformedPattern(usize),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::InvalidSize(n) => {
                write!(f, "automaton must have at least one state (got {n})")
            }
            CompileError::InvalidState(s) => write!(f, "state index {s} is out of range"),
            CompileError::MissingOperand(op) => {
                write!(f, "operator '{op}' is missing an operand")
            }
            CompileError::UnbalancedParens => write!(f, "unbalanced parentheses in pattern"),
            CompileError::MalformedPattern(n) => write!(
                f,
                "pattern did not reduce to a single automaton ({n} fragments left)"
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// A compiled pattern: source text plus its DFA.
///
/// Compilation happens exactly once, at construction; the result is
/// immutable, so repeated matching never re-parses.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    dfa: Dfa,
}

impl Pattern {
    /// Compile `source` through the full parse/determinize pipeline.
    pub fn compile(source: &str) -> Result<Self, CompileError> {
        let dfa = regexp::compile(source)?;
        Ok(Pattern {
            source: source.to_string(),
            dfa,
        })
    }

    /// Whether the whole of `input` is accepted. Never fails: inputs
    /// containing symbols outside the pattern's alphabet are rejected.
    #[inline]
    pub fn is_match(&self, input: &str) -> bool {
        self.dfa.simulate(input)
    }

    /// The pattern text this was compiled from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled DFA, for inspection.
    #[inline]
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}
