//! Thompson construction: pure builders mapping symbols and sub-automata to
//! new automata, one primitive automaton per pattern operator.
//!
//! Every builder borrows its inputs, clones where it must, and returns a
//! fresh automaton whose start state is 0 and final state is N-1. The
//! structural surgery itself lives in [`crate::automaton::Nfa`]; this module
//! only decides which states to splice and which epsilon edges to wire.

use crate::automaton::{Label, Nfa};

/// A 2-state automaton with one edge `0 -> 1` carrying `label`.
///
/// Called with [`Label::Epsilon`] this yields the empty-sequence automaton
/// that [`question_mark`] alternates against.
pub fn literal(label: Label) -> Nfa {
    let mut nfa = Nfa::with_states(2);
    nfa.set(0, 1, label);
    nfa
}

/// The automaton accepting a sequence accepted by `a` followed by one
/// accepted by `b`: `a`'s final state is merged with `b`'s start state.
pub fn concatenation(a: &Nfa, b: &Nfa) -> Nfa {
    let mut nfa = a.clone();
    nfa.chain(b);
    nfa
}

/// The automaton accepting what `a` or `b` accepts.
///
/// Lays `a` then `b` out contiguously, prepends a new start state with
/// epsilon edges into both sub-starts and appends a new final state reached
/// by epsilon from both sub-finals.
pub fn alternation(a: &Nfa, b: &Nfa) -> Nfa {
    let mut alt = a.clone();
    alt.append(b);
    alt.grow_low(1);
    alt.grow_high(1);
    let last = alt.size() - 1;
    // After the shift, a occupies 1..=a.size() and b the states above it.
    alt.set(0, 1, Label::Epsilon);
    alt.set(0, 1 + a.size(), Label::Epsilon);
    alt.set(a.size(), last, Label::Epsilon);
    alt.set(a.size() + b.size(), last, Label::Epsilon);
    alt
}

/// The automaton accepting zero or more sequences each accepted by `x`.
///
/// Wraps `x` in one new start and one new final state, wired with four
/// epsilon edges: enter, skip, repeat, exit.
pub fn kleene_star(x: &Nfa) -> Nfa {
    let mut star = x.clone();
    star.grow_low(1);
    star.grow_high(1);
    let last = star.size() - 1;
    star.set(0, 1, Label::Epsilon); // enter
    star.set(0, last, Label::Epsilon); // skip
    star.set(last - 1, 1, Label::Epsilon); // repeat
    star.set(last - 1, last, Label::Epsilon); // exit
    star
}

/// Zero-or-one: `x` alternated with the empty-sequence automaton.
pub fn question_mark(x: &Nfa) -> Nfa {
    alternation(x, &literal(Label::Epsilon))
}

/// One-or-more: `x` followed by `x*`.
pub fn plus_sign(x: &Nfa) -> Nfa {
    concatenation(x, &kleene_star(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Dfa;

    fn accepts(nfa: &Nfa, input: &str) -> bool {
        Dfa::from_nfa(nfa).simulate(input)
    }

    #[test]
    fn test_literal_structure() {
        let nfa = literal(Label::Symbol('x'));
        assert_eq!(nfa.size(), 2);
        assert_eq!(nfa.label(0, 1), Some(Label::Symbol('x')));
        assert_eq!(nfa.label(1, 0), None);
    }

    #[test]
    fn test_literal_accepts_exactly_its_symbol() {
        let nfa = literal(Label::Symbol('x'));
        assert!(accepts(&nfa, "x"));
        assert!(!accepts(&nfa, ""));
        assert!(!accepts(&nfa, "y"));
        assert!(!accepts(&nfa, "xx"));
    }

    #[test]
    fn test_concatenation_size_and_behavior() {
        let a = literal(Label::Symbol('a'));
        let b = literal(Label::Symbol('b'));
        let ab = concatenation(&a, &b);
        assert_eq!(ab.size(), a.size() + b.size() - 1);
        assert!(accepts(&ab, "ab"));
        assert!(!accepts(&ab, "a"));
        assert!(!accepts(&ab, "b"));
        assert!(!accepts(&ab, "ba"));
    }

    #[test]
    fn test_alternation_structure() {
        let a = literal(Label::Symbol('a'));
        let b = literal(Label::Symbol('b'));
        let alt = alternation(&a, &b);

        // One new start, both operands, one new final.
        assert_eq!(alt.size(), a.size() + b.size() + 2);
        let last = alt.size() - 1;
        assert_eq!(alt.label(0, 1), Some(Label::Epsilon));
        assert_eq!(alt.label(0, 1 + a.size()), Some(Label::Epsilon));
        assert_eq!(alt.label(a.size(), last), Some(Label::Epsilon));
        assert_eq!(alt.label(a.size() + b.size(), last), Some(Label::Epsilon));
    }

    #[test]
    fn test_alternation_accepts_either() {
        let alt = alternation(&literal(Label::Symbol('a')), &literal(Label::Symbol('b')));
        assert!(accepts(&alt, "a"));
        assert!(accepts(&alt, "b"));
        assert!(!accepts(&alt, ""));
        assert!(!accepts(&alt, "ab"));
    }

    #[test]
    fn test_kleene_star_accepts_repetitions() {
        let star = kleene_star(&literal(Label::Symbol('a')));
        assert!(accepts(&star, ""));
        assert!(accepts(&star, "a"));
        assert!(accepts(&star, "aaaa"));
        assert!(!accepts(&star, "b"));
        assert!(!accepts(&star, "aab"));
    }

    #[test]
    fn test_kleene_star_over_composite() {
        // (ab)* accepts concatenations of zero or more "ab" sequences.
        let ab = concatenation(&literal(Label::Symbol('a')), &literal(Label::Symbol('b')));
        let star = kleene_star(&ab);
        assert!(accepts(&star, ""));
        assert!(accepts(&star, "ab"));
        assert!(accepts(&star, "abab"));
        assert!(!accepts(&star, "a"));
        assert!(!accepts(&star, "aba"));
    }

    #[test]
    fn test_question_mark_zero_or_one() {
        let opt = question_mark(&literal(Label::Symbol('a')));
        assert!(accepts(&opt, ""));
        assert!(accepts(&opt, "a"));
        assert!(!accepts(&opt, "aa"));
    }

    #[test]
    fn test_plus_sign_one_or_more() {
        let plus = plus_sign(&literal(Label::Symbol('a')));
        assert!(!accepts(&plus, ""));
        assert!(accepts(&plus, "a"));
        assert!(accepts(&plus, "aaa"));
        assert!(!accepts(&plus, "ab"));
    }

    #[test]
    fn test_builders_leave_inputs_unchanged() {
        let a = literal(Label::Symbol('a'));
        let b = literal(Label::Symbol('b'));
        let a_before = a.clone();
        let b_before = b.clone();

        let _ = concatenation(&a, &b);
        let _ = alternation(&a, &b);
        let _ = kleene_star(&a);
        let _ = question_mark(&a);
        let _ = plus_sign(&a);

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }
}
