//! The compile-time handoff from the structural compiler.
//!
//! The structural side parses the query text, assigns capture and literal
//! ids, and flattens each pattern's predicates into a step array. This module
//! defines the trait the predicate compiler reads that handoff through, plus
//! an owned implementation for marshalling and tests.

use serde::{Deserialize, Serialize};
use sito_core::{CaptureId, CaptureQuantifier, LiteralId, PredicateStep};

/// Read access to a parsed pattern set.
///
/// Step arrays use [`PredicateStep::Done`] as a sentinel terminating each
/// predicate. Capture and literal ids index the set's name tables; the
/// compiler validates them before resolving.
pub trait PatternSet {
    fn pattern_count(&self) -> usize;
    fn capture_count(&self) -> usize;
    fn string_count(&self) -> usize;

    /// Byte offset of the pattern in the query source.
    fn start_byte_for_pattern(&self, pattern_index: usize) -> usize;

    /// Flat predicate steps of one pattern.
    fn predicate_steps(&self, pattern_index: usize) -> &[PredicateStep];

    fn capture_name(&self, id: CaptureId) -> &str;
    fn string_literal(&self, id: LiteralId) -> &str;

    /// Quantifier of a capture within a pattern.
    ///
    /// Sets that do not track quantifiers inherit the default of
    /// [`CaptureQuantifier::One`].
    fn capture_quantifier(&self, pattern_index: usize, capture: CaptureId) -> CaptureQuantifier {
        let _ = (pattern_index, capture);
        CaptureQuantifier::One
    }
}

/// One pattern's slice of the handoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPattern {
    pub start_byte: usize,
    pub steps: Vec<PredicateStep>,
    /// Quantifier per capture id. Entries beyond the row default to `One`.
    pub quantifiers: Vec<CaptureQuantifier>,
}

/// An owned [`PatternSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSetData {
    pub capture_names: Vec<String>,
    pub string_literals: Vec<String>,
    pub patterns: Vec<RawPattern>,
}

impl PatternSet for PatternSetData {
    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn capture_count(&self) -> usize {
        self.capture_names.len()
    }

    fn string_count(&self) -> usize {
        self.string_literals.len()
    }

    fn start_byte_for_pattern(&self, pattern_index: usize) -> usize {
        self.patterns[pattern_index].start_byte
    }

    fn predicate_steps(&self, pattern_index: usize) -> &[PredicateStep] {
        &self.patterns[pattern_index].steps
    }

    fn capture_name(&self, id: CaptureId) -> &str {
        &self.capture_names[id as usize]
    }

    fn string_literal(&self, id: LiteralId) -> &str {
        &self.string_literals[id as usize]
    }

    fn capture_quantifier(&self, pattern_index: usize, capture: CaptureId) -> CaptureQuantifier {
        self.patterns[pattern_index]
            .quantifiers
            .get(capture as usize)
            .copied()
            .unwrap_or(CaptureQuantifier::One)
    }
}
