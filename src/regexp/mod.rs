//! Regex compilation pipeline.
//!
//! A pattern string is compiled in three stages:
//!
//! 1. `parser`: shunting-yard scan driving Thompson's construction
//! 2. `thompson`: the pure automaton builders the parser invokes
//! 3. determinization: subset construction over the pattern's alphabet
//!    (see [`crate::automaton::Dfa`])
//!
//! The alphabet is the explicit, finite set of literal characters appearing
//! in the pattern; the six operator characters `( ) | * ? +` are never part
//! of it. There is no escaping, so patterns cannot match the operator
//! characters themselves.

pub mod parser;
pub mod thompson;

use std::collections::BTreeSet;

pub use parser::parse;

use crate::automaton::Dfa;
use crate::CompileError;

/// The characters with operator meaning in a pattern.
pub const METACHARACTERS: &[char] = &['(', ')', '|', '*', '?', '+'];

/// The alphabet of a pattern: its literal characters, operators excluded.
pub fn derive_alphabet(pattern: &str) -> BTreeSet<char> {
    pattern
        .chars()
        .filter(|c| !METACHARACTERS.contains(c))
        .collect()
}

/// Compile a pattern all the way to a DFA.
///
/// The parsed NFA carries the pattern's alphabet (the builders collect it
/// from the literal edges), so determinization needs no separate alphabet
/// argument.
pub fn compile(pattern: &str) -> Result<Dfa, CompileError> {
    let nfa = parse(pattern)?;
    Ok(Dfa::from_nfa(&nfa))
}
