//! Shunting-yard parsing of regex patterns into NFAs.
//!
//! The parser scans the pattern left to right and drives Thompson's
//! construction token by token, with no intermediate parse tree. Supported
//! syntax:
//! - literal symbols (any character that is not an operator)
//! - implicit concatenation
//! - `|` alternation
//! - `*`, `+`, `?` postfix repetition
//! - `(...)` grouping
//!
//! There is no escaping: a character is either an operator or a literal,
//! never both, so the operator characters themselves can never be matched.
//!
//! State is two stacks plus one flag. The operator stack holds only
//! alternation and left-paren markers; postfix operators are applied
//! immediately. The output stack holds NFA fragments. The separator flag
//! records whether the previous token ended a sub-expression, which decides
//! whether the next literal starts a new fragment or concatenates onto the
//! current one. A consequence: a postfix operator applies to the whole
//! fragment scanned since the last separator, so `ab*` is `(ab)*`.

use crate::automaton::{Label, Nfa};
use crate::regexp::thompson;
use crate::CompileError;

/// Markers deferred on the operator stack. Everything else is evaluated in
/// place as it is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackOp {
    Alternation,
    LeftParen,
}

/// Parser scratch state, fully consumed by the end of the parse.
struct ShuntingYard {
    ops: Vec<StackOp>,
    output: Vec<Nfa>,
    nesting: usize,
    prev_separator: bool,
}

/// Parse a pattern into its Thompson NFA.
///
/// Fails fast on the first syntax violation; no partial automaton is ever
/// returned. Parsing is deterministic, so parsing the same pattern twice
/// yields identical transition tables.
pub fn parse(pattern: &str) -> Result<Nfa, CompileError> {
    let mut parser = ShuntingYard {
        ops: Vec::new(),
        output: Vec::new(),
        nesting: 0,
        prev_separator: false,
    };

    for c in pattern.chars() {
        match c {
            '(' => {
                parser.ops.push(StackOp::LeftParen);
                parser.prev_separator = true;
                parser.nesting += 1;
            }
            ')' => parser.close_group()?,
            '*' => parser.apply_postfix(c, thompson::kleene_star)?,
            '?' => parser.apply_postfix(c, thompson::question_mark)?,
            '+' => parser.apply_postfix(c, thompson::plus_sign)?,
            '|' => {
                parser.ops.push(StackOp::Alternation);
                parser.prev_separator = true;
            }
            _ => parser.push_literal(c),
        }
    }

    parser.finish()
}

impl ShuntingYard {
    /// Pop and fold alternation markers down to the matching left paren.
    fn close_group(&mut self) -> Result<(), CompileError> {
        if self.nesting == 0 {
            return Err(CompileError::UnbalancedParens);
        }
        loop {
            match self.ops.pop() {
                Some(StackOp::Alternation) => self.fold_alternation()?,
                Some(StackOp::LeftParen) => break,
                None => return Err(CompileError::UnbalancedParens),
            }
        }
        self.prev_separator = true;
        self.nesting -= 1;
        Ok(())
    }

    /// Apply a unary postfix builder to the top fragment, then merge the
    /// whole output stack. A postfix operator cannot follow another postfix
    /// operator, and it binds tighter than any pending concatenation, so
    /// this is the point where accumulated fragments must be concatenated
    /// before a later literal can only extend the rightmost one.
    fn apply_postfix(
        &mut self,
        op: char,
        builder: fn(&Nfa) -> Nfa,
    ) -> Result<(), CompileError> {
        let top = self
            .output
            .last_mut()
            .ok_or(CompileError::MissingOperand(op))?;
        *top = builder(top);
        self.prev_separator = false;
        self.fold_concatenation();
        Ok(())
    }

    /// Scan a literal symbol: start a new fragment after a separator,
    /// otherwise concatenate onto the current top fragment.
    fn push_literal(&mut self, c: char) {
        let lit = thompson::literal(Label::Symbol(c));
        if self.prev_separator {
            self.output.push(lit);
            self.prev_separator = false;
        } else {
            match self.output.last_mut() {
                Some(top) => *top = thompson::concatenation(top, &lit),
                None => self.output.push(lit),
            }
        }
    }

    /// Replace the two most recent fragments with their alternation.
    fn fold_alternation(&mut self) -> Result<(), CompileError> {
        if self.output.len() < 2 {
            return Err(CompileError::MissingOperand('|'));
        }
        let second = self.output.remove(self.output.len() - 1);
        let first = self.output.remove(self.output.len() - 1);
        self.output.push(thompson::alternation(&first, &second));
        Ok(())
    }

    /// Merge the entire output stack into one fragment, left to right.
    fn fold_concatenation(&mut self) {
        while self.output.len() > 1 {
            let second = self.output.remove(self.output.len() - 1);
            let first = self.output.remove(self.output.len() - 1);
            self.output.push(thompson::concatenation(&first, &second));
        }
    }

    /// Resolve operators remaining at end of input; only alternation
    /// markers may be left.
    fn finish(mut self) -> Result<Nfa, CompileError> {
        while let Some(op) = self.ops.pop() {
            match op {
                StackOp::Alternation => self.fold_alternation()?,
                StackOp::LeftParen => return Err(CompileError::UnbalancedParens),
            }
        }
        if self.output.len() != 1 {
            return Err(CompileError::MalformedPattern(self.output.len()));
        }
        Ok(self.output.remove(0))
    }
}
