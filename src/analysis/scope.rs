//! Loop-frame stack and the scope signals accumulated while scanning.
//!
//! Both scanner variants feed recognized loop headers into a [`FrameStack`].
//! The stack only differs between languages in *when* frames are popped,
//! which the scanners decide; everything about what a pushed frame means for
//! the signals lives here.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use super::EngineConfig;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap();
    static ref INDEXED_CONTAINER: Regex =
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_.]*)\s*\[\s*([A-Za-z_][A-Za-z0-9_]*)\s*\]$").unwrap();
}

/// Words that never count as a shared loop variable.
const NON_IDENTIFIERS: &[&str] = &[
    "and", "or", "not", "in", "is", "True", "False", "None", "true", "false", "nullptr", "NULL",
];

/// Kind of loop construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopKind {
    For,
    While,
}

/// A loop header as parsed by a language scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopHeader {
    pub kind: LoopKind,
    /// Variable bound by a `for` loop, if it is a single identifier.
    pub iteration_variable: Option<String>,
    /// Expression iterated by a for-each style loop.
    pub iterable: Option<String>,
    /// Condition text of a `while` loop.
    pub condition: Option<String>,
    /// Iteration count is a small literal.
    pub is_constant_bound: bool,
    /// The `while` condition is a membership test (`in`, `.count(`, `.find(`).
    pub tests_membership: bool,
}

impl LoopHeader {
    pub fn new(kind: LoopKind) -> Self {
        Self {
            kind,
            iteration_variable: None,
            iterable: None,
            condition: None,
            is_constant_bound: false,
            tests_membership: false,
        }
    }
}

/// An active loop on the scan stack.
#[derive(Debug, Clone)]
pub struct LoopFrame {
    /// Indentation width (Python) or brace depth (C family) of the header.
    pub level: usize,
    pub kind: LoopKind,
    pub iteration_variable: Option<String>,
    pub is_constant_bound: bool,
    pub condition: Option<String>,
    /// Brace-less C-family header whose body has not been seen yet.
    pub(crate) pending: bool,
}

/// Aggregate loop-shape signals for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopeSignals {
    /// Deepest nesting of non-constant loops.
    pub max_effective_depth: usize,
    /// An inner loop iterates an element bound by an enclosing loop.
    pub has_char_iteration: bool,
    /// An inner loop iterates `container[i]` for an enclosing loop's `i`.
    pub has_bucket_traversal: bool,
    /// Two-pointer or loop-guarded membership-test shape.
    pub has_amortized_linear: bool,
    /// At least one loop was seen and every loop was constant-bound.
    pub has_only_constant_loops: bool,
    /// Number of loop headers recognized.
    pub loops_seen: usize,
}

/// Stack of loop frames plus the running signal totals.
pub struct FrameStack<'c> {
    frames: Vec<LoopFrame>,
    signals: ScopeSignals,
    constant_loops: usize,
    config: &'c EngineConfig,
}

impl<'c> FrameStack<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self {
            frames: Vec::new(),
            signals: ScopeSignals::default(),
            constant_loops: 0,
            config,
        }
    }

    pub fn top(&self) -> Option<&LoopFrame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut LoopFrame> {
        self.frames.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Pop frames from the top for as long as `closed` holds.
    pub fn pop_while<F>(&mut self, mut closed: F)
    where
        F: FnMut(&LoopFrame) -> bool,
    {
        while let Some(frame) = self.frames.last() {
            if !closed(frame) {
                break;
            }
            trace!(level = frame.level, kind = ?frame.kind, "pop loop frame");
            self.frames.pop();
        }
    }

    /// Record a loop header at `level` and push its frame.
    pub fn push(&mut self, header: LoopHeader, level: usize, pending: bool) {
        self.signals.loops_seen += 1;
        if header.is_constant_bound {
            self.constant_loops += 1;
        }

        if let Some(iterable) = header.iterable.as_deref() {
            self.check_iterable(iterable.trim());
        }

        if header.kind == LoopKind::While && self.config.amortized_linear {
            self.check_amortized(&header);
        }

        trace!(
            level,
            kind = ?header.kind,
            constant = header.is_constant_bound,
            var = ?header.iteration_variable,
            "push loop frame"
        );

        let is_constant = header.is_constant_bound;
        self.frames.push(LoopFrame {
            level,
            kind: header.kind,
            iteration_variable: header.iteration_variable,
            is_constant_bound: header.is_constant_bound,
            condition: header.condition,
            pending,
        });

        if !is_constant {
            let depth = self.frames.iter().filter(|f| !f.is_constant_bound).count();
            self.signals.max_effective_depth = self.signals.max_effective_depth.max(depth);
        }
    }

    /// Finish the scan and return the accumulated signals.
    pub fn finish(mut self) -> ScopeSignals {
        self.signals.has_only_constant_loops =
            self.signals.loops_seen > 0 && self.constant_loops == self.signals.loops_seen;
        self.signals
    }

    fn is_enclosing_variable(&self, name: &str) -> bool {
        self.frames
            .iter()
            .any(|f| f.iteration_variable.as_deref() == Some(name))
    }

    fn check_iterable(&mut self, iterable: &str) {
        if self.is_enclosing_variable(iterable) {
            self.signals.has_char_iteration = true;
            return;
        }
        if let Some(caps) = INDEXED_CONTAINER.captures(iterable) {
            if self.is_enclosing_variable(&caps[2]) {
                self.signals.has_bucket_traversal = true;
            }
        }
    }

    fn check_amortized(&mut self, header: &LoopHeader) {
        if header.tests_membership && !self.frames.is_empty() {
            self.signals.has_amortized_linear = true;
            return;
        }

        let (Some(condition), Some(outer)) = (header.condition.as_deref(), self.frames.last())
        else {
            return;
        };
        if outer.kind != LoopKind::While {
            return;
        }
        let Some(outer_condition) = outer.condition.as_deref() else {
            return;
        };

        let outer_ids = identifiers(outer_condition);
        if identifiers(condition).iter().any(|id| outer_ids.contains(id)) {
            self.signals.has_amortized_linear = true;
        }
    }
}

/// Identifiers appearing in an expression, minus keywords and literals.
pub fn identifiers(expr: &str) -> BTreeSet<&str> {
    IDENTIFIER
        .find_iter(expr)
        .map(|m| m.as_str())
        .filter(|id| !NON_IDENTIFIERS.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn for_over(var: &str, iterable: &str) -> LoopHeader {
        LoopHeader {
            iteration_variable: Some(var.to_string()),
            iterable: Some(iterable.to_string()),
            ..LoopHeader::new(LoopKind::For)
        }
    }

    fn while_on(condition: &str) -> LoopHeader {
        LoopHeader {
            condition: Some(condition.to_string()),
            ..LoopHeader::new(LoopKind::While)
        }
    }

    #[test]
    fn test_constant_frames_do_not_count_toward_depth() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        stack.push(for_over("x", "nums"), 0, false);
        stack.push(
            LoopHeader {
                is_constant_bound: true,
                ..for_over("c", "range(26)")
            },
            4,
            false,
        );
        let signals = stack.finish();
        assert_eq!(signals.max_effective_depth, 1);
        assert_eq!(signals.loops_seen, 2);
        assert!(!signals.has_only_constant_loops);
    }

    #[test]
    fn test_only_constant_loops() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        let constant = LoopHeader {
            is_constant_bound: true,
            ..for_over("i", "range(9)")
        };
        stack.push(constant.clone(), 0, false);
        stack.push(constant, 4, false);
        let signals = stack.finish();
        assert!(signals.has_only_constant_loops);
        assert_eq!(signals.max_effective_depth, 0);
    }

    #[test]
    fn test_no_loops_is_not_only_constant() {
        let config = EngineConfig::default();
        let signals = FrameStack::new(&config).finish();
        assert!(!signals.has_only_constant_loops);
    }

    #[test]
    fn test_char_and_bucket_iteration() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        stack.push(for_over("word", "words"), 0, false);
        stack.push(for_over("ch", "word"), 4, false);
        assert!(stack.finish().has_char_iteration);

        let mut stack = FrameStack::new(&config);
        stack.push(for_over("i", "range(len(buckets))"), 0, false);
        stack.push(for_over("n", "buckets[i]"), 4, false);
        let signals = stack.finish();
        assert!(signals.has_bucket_traversal);
        assert!(!signals.has_char_iteration);
    }

    #[test]
    fn test_pop_while_restores_depth_tracking() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        stack.push(for_over("a", "xs"), 0, false);
        stack.pop_while(|_| true);
        assert!(stack.is_empty());
        stack.push(for_over("b", "ys"), 0, false);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.finish().max_effective_depth, 1);
    }

    #[test]
    fn test_two_pointer_shares_identifier_with_enclosing_while() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        stack.push(while_on("l < r"), 0, false);
        stack.push(while_on("l < r and nums[l] == nums[l + 1]"), 4, false);
        assert!(stack.finish().has_amortized_linear);
    }

    #[test]
    fn test_unrelated_while_conditions_are_not_amortized() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        stack.push(while_on("i < n"), 0, false);
        stack.push(while_on("j < m"), 4, false);
        assert!(!stack.finish().has_amortized_linear);
    }

    #[test]
    fn test_membership_test_inside_loop() {
        let config = EngineConfig::default();
        let mut stack = FrameStack::new(&config);
        stack.push(for_over("n", "nums"), 0, false);
        stack.push(
            LoopHeader {
                tests_membership: true,
                ..while_on("n + length in seen")
            },
            4,
            false,
        );
        assert!(stack.finish().has_amortized_linear);
    }

    #[test]
    fn test_amortized_detection_can_be_disabled() {
        let config = EngineConfig {
            amortized_linear: false,
            ..EngineConfig::default()
        };
        let mut stack = FrameStack::new(&config);
        stack.push(while_on("l < r"), 0, false);
        stack.push(while_on("l < r"), 4, false);
        assert!(!stack.finish().has_amortized_linear);
    }

    #[test]
    fn test_identifiers_skip_keywords() {
        let ids = identifiers("x not in seen and True");
        assert!(ids.contains("x"));
        assert!(ids.contains("seen"));
        assert!(!ids.contains("not"));
        assert!(!ids.contains("True"));
    }
}
