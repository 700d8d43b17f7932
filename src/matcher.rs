//! Multi-pattern front end.
//!
//! [`PatternSet`] holds many compiled patterns under caller-chosen
//! identifiers and reports which identifiers accept a given input.
//! [`SharedPatternSet`] wraps it for concurrent use: readers match against
//! an atomically swapped snapshot without locking, while writers serialize
//! behind a mutex and publish a new snapshot per update.

use std::hash::Hash;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{CompileError, Pattern};

/// A set of compiled patterns keyed by identifier.
///
/// `PatternSet` is `Clone`, so a snapshot can be taken and used
/// independently of later mutations.
#[derive(Clone)]
pub struct PatternSet<X = String> {
    patterns: FxHashMap<X, Vec<Pattern>>,
}

impl<X: Clone + Eq + Hash> PatternSet<X> {
    pub fn new() -> Self {
        PatternSet {
            patterns: FxHashMap::default(),
        }
    }

    /// Compile `source` and register it under `x`. An identifier may carry
    /// several patterns; any of them matching counts as a match for `x`.
    pub fn add_pattern(&mut self, x: X, source: &str) -> Result<(), CompileError> {
        let pattern = Pattern::compile(source)?;
        self.patterns.entry(x).or_default().push(pattern);
        Ok(())
    }

    /// Identifiers whose patterns accept the whole of `input`. Each
    /// identifier appears at most once.
    pub fn matches(&self, input: &str) -> Vec<X> {
        let mut matched = Vec::new();
        for (x, patterns) in &self.patterns {
            if patterns.iter().any(|p| p.is_match(input)) {
                matched.push(x.clone());
            }
        }
        matched
    }

    /// Whether any registered pattern accepts `input`.
    pub fn has_matches(&self, input: &str) -> bool {
        self.patterns
            .values()
            .any(|patterns| patterns.iter().any(|p| p.is_match(input)))
    }

    /// Remove every pattern registered under `x`.
    pub fn delete_patterns(&mut self, x: &X) {
        self.patterns.remove(x);
    }

    /// Number of distinct identifiers.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }
}

impl<X: Clone + Eq + Hash> Default for PatternSet<X> {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe pattern set with lock-free matching.
///
/// Matching loads the current snapshot through an [`ArcSwap`]; updates
/// clone the snapshot, mutate the clone, and atomically publish it.
/// Readers never block writers and never observe a half-applied update.
pub struct SharedPatternSet<X = String> {
    current: ArcSwap<PatternSet<X>>,
    write_lock: Mutex<()>,
}

impl<X: Clone + Eq + Hash> SharedPatternSet<X> {
    pub fn new() -> Self {
        SharedPatternSet {
            current: ArcSwap::from_pointee(PatternSet::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Compile and register a pattern, publishing a new snapshot.
    pub fn add_pattern(&self, x: X, source: &str) -> Result<(), CompileError> {
        let _guard = self.write_lock.lock();
        let mut next = PatternSet::clone(&self.current.load());
        next.add_pattern(x, source)?;
        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Remove every pattern registered under `x`, publishing a new snapshot.
    pub fn delete_patterns(&self, x: &X) {
        let _guard = self.write_lock.lock();
        let mut next = PatternSet::clone(&self.current.load());
        next.delete_patterns(x);
        self.current.store(Arc::new(next));
    }

    /// Match against the current snapshot without locking.
    pub fn matches(&self, input: &str) -> Vec<X> {
        self.current.load().matches(input)
    }

    /// Whether any pattern in the current snapshot accepts `input`.
    pub fn has_matches(&self, input: &str) -> bool {
        self.current.load().has_matches(input)
    }

    /// A point-in-time snapshot unaffected by later updates.
    pub fn snapshot(&self) -> Arc<PatternSet<X>> {
        self.current.load_full()
    }

    pub fn pattern_count(&self) -> usize {
        self.current.load().pattern_count()
    }
}

impl<X: Clone + Eq + Hash> Default for SharedPatternSet<X> {
    fn default() -> Self {
        Self::new()
    }
}
